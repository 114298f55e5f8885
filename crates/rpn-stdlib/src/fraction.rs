//! Rational arithmetic on [`Fraction`] values.
//!
//! Mixed operations keep the result a Fraction. Integer operands are taken
//! exactly; Double operands go through the continued-fraction approximation.

use rpn_lang::{Fraction, Interp, Value, ValueKind, WordResult};

use crate::{kinds, pop_pair, word};

type FractionOp = fn(Fraction, Fraction) -> Fraction;

const BINARY: &[(&str, FractionOp)] = &[
    ("+", |a, b| a + b),
    ("-", |a, b| a - b),
    ("*", |a, b| a * b),
    ("/", |a, b| a / b),
    ("^", power),
];

/// `base^exponent`, exact by repeated squaring when the exponent is whole.
fn power(base: Fraction, exponent: Fraction) -> Fraction {
    if !exponent.is_integral() {
        return Fraction::from_f64(base.to_f64().powf(exponent.to_f64()));
    }
    let e = exponent.numerator();
    let mut result = Fraction::from_integer(1);
    let mut square = if e < 0 { base.reciprocal() } else { base };
    let mut remaining = e.unsigned_abs();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result * square;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = square * square;
        }
    }
    result
}

fn as_fraction(value: &Value) -> Fraction {
    match value {
        Value::Fraction(f) => *f,
        Value::Integer(i) => Fraction::from_integer(*i),
        other => Fraction::from_f64(other.as_double()),
    }
}

fn binary(op: FractionOp) -> impl Fn(&mut Interp) -> WordResult {
    move |interp| {
        let (a, b) = pop_pair(interp)?;
        Ok(interp.stack.push_fraction(op(as_fraction(&a), as_fraction(&b)))?)
    }
}

pub fn register(interp: &mut Interp) -> WordResult {
    use ValueKind::{Double, Fraction as F, Integer};

    interp.register(
        "->FRAC",
        word(&kinds(&[Integer, Integer]), |i| {
            let den = i.stack.pop_integer()?;
            let num = i.stack.pop_integer()?;
            Ok(i.stack.push_fraction(Fraction::new(num, den))?)
        }),
    );
    interp.register(
        "->FRAC",
        word(&kinds(&[Double]), |i| {
            let d = i.stack.pop_double()?;
            Ok(i.stack.push_fraction(Fraction::from_f64(d))?)
        }),
    );

    let one = kinds(&[F]);
    interp.register(
        "->DOUBLE",
        word(&one, |i| {
            let f = i.stack.pop_fraction()?;
            Ok(i.stack.push_double(f.to_f64())?)
        }),
    );
    interp.register(
        "OBJ->",
        word(&one, |i| {
            let f = i.stack.pop_fraction()?;
            i.stack.push_integer(f.numerator())?;
            Ok(i.stack.push_integer(f.denominator())?)
        }),
    );

    let unary: [(&str, fn(Fraction) -> Fraction); 4] = [
        ("INV", |f| f.reciprocal()),
        ("NEG", |f| -f),
        ("SQ", |f| f * f),
        ("SQRT", |f| Fraction::from_f64(f.to_f64().sqrt())),
    ];
    for (name, op) in unary {
        interp.register(
            name,
            word(&one, move |i| {
                let f = i.stack.pop_fraction()?;
                Ok(i.stack.push_fraction(op(f))?)
            }),
        );
    }

    // Top-first: fraction over number, number over fraction, both fractions.
    let grids = [
        [Integer, F],
        [Double, F],
        [F, Integer],
        [F, Double],
        [F, F],
    ];
    for (name, op) in BINARY {
        for grid in &grids {
            interp.register(*name, word(&kinds(grid), binary(*op)));
        }
    }
    Ok(())
}
