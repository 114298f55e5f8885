//! Rational numbers with 64-bit numerator and denominator.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Values closer than this compare equal.
pub const PRECISION: f64 = 1e-11;

/// Largest denominator produced when approximating a double.
pub const MAX_DENOMINATOR: i64 = 0x10000;

const MAX_ITERATIONS: usize = 100;

/// A fraction kept in lowest terms, sign on the numerator.
///
/// A zero denominator is allowed and reads as a signed infinity.
#[derive(Clone, Copy, Debug)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    /// Create a reduced fraction.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self::from_wide(numerator as i128, denominator as i128)
    }

    /// `n/1`.
    pub fn from_integer(n: i64) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    /// Nearest fraction by continued-fraction expansion.
    ///
    /// Stops when the convergent is within [`PRECISION`] of `value` or the
    /// next denominator would exceed [`MAX_DENOMINATOR`].
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::new(0, 0);
        }
        let sign = if value < 0.0 { -1 } else { 1 };
        let target = value.abs();
        if target.is_infinite() {
            return Self::new(sign, 0);
        }
        if target >= (i64::MAX / 2) as f64 {
            return Self::from_integer(sign * target as i64);
        }

        let (mut h_prev, mut h) = (0i64, 1i64);
        let (mut k_prev, mut k) = (1i64, 0i64);
        let mut x = target;
        for _ in 0..MAX_ITERATIONS {
            let a = x.floor() as i64;
            let next = a
                .checked_mul(h)
                .and_then(|v| v.checked_add(h_prev))
                .zip(a.checked_mul(k).and_then(|v| v.checked_add(k_prev)));
            let Some((h_next, k_next)) = next else { break };
            if k_next > MAX_DENOMINATOR {
                break;
            }
            (h_prev, h) = (h, h_next);
            (k_prev, k) = (k, k_next);

            if (h as f64 / k as f64 - target).abs() < PRECISION {
                break;
            }
            let rem = x - a as f64;
            if rem <= f64::EPSILON {
                break;
            }
            x = 1.0 / rem;
        }
        Self::new(sign * h, k)
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Value as a double; a zero denominator gives a signed infinity.
    pub fn to_f64(&self) -> f64 {
        if self.denominator == 0 {
            match self.numerator.cmp(&0) {
                Ordering::Less => f64::NEG_INFINITY,
                Ordering::Greater => f64::INFINITY,
                Ordering::Equal => f64::NAN,
            }
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }

    /// `d/n`.
    pub fn reciprocal(&self) -> Self {
        Self::new(self.denominator, self.numerator)
    }

    /// True if the value has no fractional part.
    pub fn is_integral(&self) -> bool {
        self.denominator == 1
    }

    fn from_wide(n: i128, d: i128) -> Self {
        let (mut n, mut d) = if d < 0 { (-n, -d) } else { (n, d) };
        let g = gcd(n.unsigned_abs(), d.unsigned_abs());
        if g > 1 {
            n /= g as i128;
            d /= g as i128;
        }
        match (i64::try_from(n), i64::try_from(d)) {
            (Ok(numerator), Ok(denominator)) => Self {
                numerator,
                denominator,
            },
            // Too large for 64 bits even in lowest terms; settle for the
            // nearest representable approximation.
            _ => Self::from_f64(n as f64 / d as f64),
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<f64> for Fraction {
    fn from(v: f64) -> Self {
        Self::from_f64(v)
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        let (a, b, c, d) = self.wide(&rhs);
        Fraction::from_wide(a * d + c * b, b * d)
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        let (a, b, c, d) = self.wide(&rhs);
        Fraction::from_wide(a * d - c * b, b * d)
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        let (a, b, c, d) = self.wide(&rhs);
        Fraction::from_wide(a * c, b * d)
    }
}

impl Div for Fraction {
    type Output = Fraction;

    fn div(self, rhs: Fraction) -> Fraction {
        self * rhs.reciprocal()
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction::from_wide(-(self.numerator as i128), self.denominator as i128)
    }
}

impl Fraction {
    fn wide(&self, rhs: &Fraction) -> (i128, i128, i128, i128) {
        (
            self.numerator as i128,
            self.denominator as i128,
            rhs.numerator as i128,
            rhs.denominator as i128,
        )
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.to_f64(), other.to_f64());
        a == b || (a - b).abs() < PRECISION
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        self.to_f64().partial_cmp(&other.to_f64())
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
