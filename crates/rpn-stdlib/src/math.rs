//! Arithmetic and transcendental words.
//!
//! Integer with Integer stays Integer (wrapping); any Double operand makes
//! the result a Double. Trigonometry works in degrees.
//!
//! RAND, DRAND and RDZ share a linear congruential generator with the
//! MINSTD parameters: a=48271, c=0, m=2^31-1.

use std::cell::Cell;

use rpn_lang::{Interp, Value, ValueKind, WordContext, WordDefinition, WordError, WordResult};

use crate::{NUMBERS, depth, kinds, pop_pair, word};

/// Default seed value (same as many HP calculators).
const DEFAULT_SEED: i64 = 999_999_999;

/// LCG multiplier (MINSTD).
const LCG_A: i64 = 48271;

/// LCG modulus (2^31 - 1, a Mersenne prime).
const LCG_M: i64 = 2_147_483_647;

type IntBinary = fn(i64, i64) -> Value;
type FloatBinary = fn(f64, f64) -> f64;

fn int_div(a: i64, b: i64) -> Value {
    Value::Integer(match (a, b) {
        (0, 0) => 0,
        (a, 0) if a > 0 => i64::MAX,
        (_, 0) => -i64::MAX,
        (a, b) => a.wrapping_div(b),
    })
}

fn int_pow(a: i64, b: i64) -> Value {
    match u32::try_from(b) {
        Ok(e) => Value::Integer(a.saturating_pow(e)),
        Err(_) if b > 0 => Value::Integer(a.saturating_pow(u32::MAX)),
        Err(_) => Value::Double((a as f64).powf(b as f64)),
    }
}

/// (name, integer form, double form)
const BINARY: &[(&str, Option<IntBinary>, FloatBinary)] = &[
    ("+", Some(|a: i64, b: i64| Value::Integer(a.wrapping_add(b))), |a, b| a + b),
    ("-", Some(|a: i64, b: i64| Value::Integer(a.wrapping_sub(b))), |a, b| a - b),
    ("*", Some(|a: i64, b: i64| Value::Integer(a.wrapping_mul(b))), |a, b| a * b),
    ("/", Some(int_div), |a, b| a / b),
    ("^", Some(int_pow), f64::powf),
    ("MIN", Some(|a: i64, b: i64| Value::Integer(a.min(b))), f64::min),
    ("MAX", Some(|a: i64, b: i64| Value::Integer(a.max(b))), f64::max),
    ("HYPOT", None, f64::hypot),
    ("ATAN2", None, |y, x| y.atan2(x).to_degrees()),
];

type IntUnary = fn(i64) -> i64;
type FloatUnary = fn(f64) -> f64;

const UNARY: &[(&str, Option<IntUnary>, FloatUnary)] = &[
    ("INV", None, |x| 1.0 / x),
    ("SQ", Some(|x: i64| x.wrapping_mul(x)), |x| x * x),
    ("SQRT", None, f64::sqrt),
    ("COS", None, |x| x.to_radians().cos()),
    ("SIN", None, |x| x.to_radians().sin()),
    ("TAN", None, |x| x.to_radians().tan()),
    ("ACOS", None, |x| x.acos().to_degrees()),
    ("ASIN", None, |x| x.asin().to_degrees()),
    ("ATAN", None, |x| x.atan().to_degrees()),
    ("EXP", None, f64::exp),
    ("LN", None, f64::ln),
    ("LN2", None, f64::log2),
    ("LOG", None, f64::log10),
    ("CHS", Some(i64::wrapping_neg), |x| -x),
];

const ROUNDING: &[(&str, FloatUnary)] = &[
    ("ROUND", f64::round),
    ("CEIL", f64::ceil),
    ("FLOOR", f64::floor),
];

fn binary(int_op: Option<IntBinary>, float_op: FloatBinary) -> impl Fn(&mut Interp) -> WordResult {
    move |interp| {
        let (a, b) = pop_pair(interp)?;
        let result = match (int_op, &a, &b) {
            (Some(op), Value::Integer(x), Value::Integer(y)) => op(*x, *y),
            _ => Value::Double(float_op(a.as_double(), b.as_double())),
        };
        Ok(interp.stack.push(result)?)
    }
}

fn unary(int_op: Option<IntUnary>, float_op: FloatUnary) -> impl Fn(&mut Interp) -> WordResult {
    move |interp| {
        let v = interp.stack.pop()?;
        let result = match (int_op, &v) {
            (Some(op), Value::Integer(x)) => Value::Integer(op(*x)),
            _ => Value::Double(float_op(v.as_double())),
        };
        Ok(interp.stack.push(result)?)
    }
}

/// Real roots of `a x^2 + b x + c`, larger first; NaN when there are none.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> (f64, f64) {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return (f64::NAN, f64::NAN);
    }
    let root = disc.sqrt();
    ((-b + root) / (2.0 * a), (-b - root) / (2.0 * a))
}

/// Advance the generator and return the new state.
fn next_random(seed: &Cell<i64>) -> i64 {
    let next = LCG_A.wrapping_mul(seed.get()).rem_euclid(LCG_M);
    seed.set(next);
    next
}

fn rng(ctx: &WordContext) -> Result<&Cell<i64>, WordError> {
    ctx.downcast::<Cell<i64>>()
        .ok_or_else(|| WordError::eval("random generator state missing"))
}

pub fn register(interp: &mut Interp) -> WordResult {
    use ValueKind::Double;

    for (name, int_op, float_op) in BINARY {
        for next in NUMBERS {
            for top in NUMBERS {
                interp.register(*name, word(&kinds(&[top, next]), binary(*int_op, *float_op)));
            }
        }
    }

    for (name, int_op, float_op) in UNARY {
        for kind in NUMBERS {
            interp.register(*name, word(&kinds(&[kind]), unary(*int_op, *float_op)));
        }
    }

    let double = kinds(&[Double]);
    for (name, op) in ROUNDING {
        let op = *op;
        interp.register(
            *name,
            word(&double, move |i| {
                let v = i.stack.pop_double()?;
                Ok(i.stack.push_double(op(v))?)
            }),
        );
    }

    // a b c QUAD -> r1 r2
    for a in NUMBERS {
        for b in NUMBERS {
            for c in NUMBERS {
                interp.register(
                    "QUAD",
                    word(&kinds(&[c, b, a]), |i| {
                        let c = i.stack.pop_as_double()?;
                        let (a, b) = pop_pair(i)?;
                        let (r1, r2) = quadratic_roots(a.as_double(), b.as_double(), c);
                        i.stack.push_double(r1)?;
                        Ok(i.stack.push_double(r2)?)
                    }),
                );
            }
        }
    }

    let none = depth(0);
    interp.register(
        "k_PI",
        word(&none, |i| Ok(i.stack.push_double(std::f64::consts::PI)?)),
    );
    interp.register(
        "k_E",
        word(&none, |i| Ok(i.stack.push_double(std::f64::consts::E)?)),
    );

    let seed = WordContext::extension(Cell::new(DEFAULT_SEED));
    interp.register(
        "RAND",
        WordDefinition::new(&none, |i, ctx, _| {
            let n = next_random(rng(ctx)?);
            Ok(i.stack.push_integer(n)?)
        })
        .with_context(seed.clone()),
    );
    interp.register(
        "DRAND",
        WordDefinition::new(&none, |i, ctx, _| {
            let n = next_random(rng(ctx)?);
            Ok(i.stack.push_double(n as f64 / LCG_M as f64)?)
        })
        .with_context(seed.clone()),
    );
    interp.register(
        "RDZ",
        WordDefinition::new(&kinds(&[ValueKind::Integer]), |i, ctx, _| {
            let state = rng(ctx)?;
            let seed = i.stack.pop_integer()?.rem_euclid(LCG_M);
            state.set(if seed == 0 { DEFAULT_SEED } else { seed });
            Ok(())
        })
        .with_context(seed),
    );
    Ok(())
}
