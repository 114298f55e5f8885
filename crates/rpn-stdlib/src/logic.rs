//! Comparison, selection and boolean/bitwise words.

use std::cmp::Ordering;

use rpn_lang::{Interp, ValueKind, WordError, WordResult};

use crate::{depth, kinds, pop_pair, word};

type OrderTest = fn(Ordering) -> bool;

const ORDERINGS: &[(&str, OrderTest)] = &[
    (">", Ordering::is_gt),
    (">=", Ordering::is_ge),
    ("<", Ordering::is_lt),
    ("<=", Ordering::is_le),
];

fn compare(name: &'static str, test: OrderTest) -> impl Fn(&mut Interp) -> WordResult {
    move |interp| {
        let ordering = interp
            .stack
            .peek(2)?
            .compare(interp.stack.peek(1)?)
            .ok_or_else(|| WordError::Param(name.to_string()))?;
        interp.stack.dropn(2)?;
        Ok(interp.stack.push_boolean(test(ordering))?)
    }
}

pub fn register(interp: &mut Interp) -> WordResult {
    use ValueKind::{Any, Boolean, Integer};

    // a b flag IFTE -> a if flag, else b
    interp.register(
        "IFTE",
        word(&kinds(&[Boolean, Any, Any]), |i| {
            let flag = i.stack.pop_boolean()?;
            let (a, b) = pop_pair(i)?;
            Ok(i.stack.push(if flag { a } else { b })?)
        }),
    );

    let two = depth(2);
    interp.register(
        "==",
        word(&two, |i| {
            let (a, b) = pop_pair(i)?;
            Ok(i.stack.push_boolean(a == b)?)
        }),
    );
    interp.register(
        "!=",
        word(&two, |i| {
            let (a, b) = pop_pair(i)?;
            Ok(i.stack.push_boolean(a != b)?)
        }),
    );
    for (name, test) in ORDERINGS {
        interp.register(*name, word(&two, compare(*name, *test)));
    }

    let booleans = kinds(&[Boolean, Boolean]);
    interp.register(
        "NOT",
        word(&kinds(&[Boolean]), |i| {
            let v = i.stack.pop_boolean()?;
            Ok(i.stack.push_boolean(!v)?)
        }),
    );
    interp.register(
        "AND",
        word(&booleans, |i| {
            let b = i.stack.pop_boolean()?;
            let a = i.stack.pop_boolean()?;
            Ok(i.stack.push_boolean(a && b)?)
        }),
    );
    interp.register(
        "OR",
        word(&booleans, |i| {
            let b = i.stack.pop_boolean()?;
            let a = i.stack.pop_boolean()?;
            Ok(i.stack.push_boolean(a || b)?)
        }),
    );

    let integers = kinds(&[Integer, Integer]);
    let bitwise: [(&str, fn(i64, i64) -> i64); 3] = [
        ("AND", |a, b| a & b),
        ("OR", |a, b| a | b),
        ("XOR", |a, b| a ^ b),
    ];
    for (name, op) in bitwise {
        interp.register(
            name,
            word(&integers, move |i| {
                let b = i.stack.pop_integer()?;
                let a = i.stack.pop_integer()?;
                Ok(i.stack.push_integer(op(a, b))?)
            }),
        );
    }
    interp.register(
        "NEG",
        word(&kinds(&[Integer]), |i| {
            let v = i.stack.pop_integer()?;
            Ok(i.stack.push_integer(!v)?)
        }),
    );
    Ok(())
}
