//! Three-component vector with optional (unset) components.
//!
//! An unset component is stored as NaN. Two combination rules apply:
//!
//! - vector with vector: an unset side contributes nothing, so partial
//!   vectors can be assembled axis by axis (`x ->{x} y ->{y} +`).
//! - vector with number: the number is applied to every component that is
//!   set; unset components stay unset.

use std::fmt;

/// Axis selector for single-component construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A 3-vector of doubles, each independently settable.
#[derive(Clone, Copy, Debug)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Create a vector with all components set.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A vector with every component unset.
    pub fn unset() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN)
    }

    /// A vector with only `axis` set to `value`.
    pub fn on_axis(axis: Axis, value: f64) -> Self {
        let mut v = Self::unset();
        match axis {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
        v
    }

    /// Components in x, y, z order.
    pub fn components(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// True if no component is set.
    pub fn is_unset(&self) -> bool {
        self.components().iter().all(|c| c.is_nan())
    }

    /// Component-wise sum; an unset side is the identity.
    pub fn add_vec(&self, rhs: &Vec3) -> Vec3 {
        self.zip(rhs, merge_add)
    }

    /// Component-wise difference; an unset left side negates the right.
    pub fn sub_vec(&self, rhs: &Vec3) -> Vec3 {
        self.zip(rhs, merge_sub)
    }

    /// Add `n` to every set component.
    pub fn add_scalar(&self, n: f64) -> Vec3 {
        self.map(|c| c + n)
    }

    /// Subtract `n` from every set component.
    pub fn sub_scalar(&self, n: f64) -> Vec3 {
        self.map(|c| c - n)
    }

    /// `n - component` for every set component.
    pub fn scalar_sub(&self, n: f64) -> Vec3 {
        self.map(|c| n - c)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Vec3 {
        // NaN propagates through f, which keeps unset components unset.
        Vec3::new(f(self.x), f(self.y), f(self.z))
    }

    fn zip(&self, rhs: &Vec3, f: fn(f64, f64) -> f64) -> Vec3 {
        Vec3::new(f(self.x, rhs.x), f(self.y, rhs.y), f(self.z, rhs.z))
    }
}

fn merge_add(a: f64, b: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a + b,
        (false, true) => a,
        (true, false) => b,
        (true, true) => f64::NAN,
    }
}

fn merge_sub(a: f64, b: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a - b,
        (false, true) => a,
        (true, false) => -b,
        (true, true) => f64::NAN,
    }
}

impl PartialEq for Vec3 {
    fn eq(&self, other: &Self) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |c: f64| {
            if c.is_nan() {
                "-".to_string()
            } else {
                format!("{c:.4}")
            }
        };
        write!(f, "({}, {}, {})", part(self.x), part(self.y), part(self.z))
    }
}
