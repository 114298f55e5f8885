//! Arithmetic and transcendental words.

use pretty_assertions::assert_eq;

use crate::{assert_stack_approx, eval_error, eval_to_strings, eval_to_values};
use rpn::{ErrorKind, Value};

#[test]
fn integer_arithmetic_stays_integer() {
    assert_eq!(eval_to_values("1 2 +"), vec![Value::Integer(3)]);
    assert_eq!(eval_to_values("7 2 /"), vec![Value::Integer(3)]);
    assert_eq!(eval_to_values("3 4 * 5 -"), vec![Value::Integer(7)]);
}

#[test]
fn doubles_contaminate() {
    assert_eq!(eval_to_values("1 2.0 +"), vec![Value::Double(3.0)]);
    assert_eq!(eval_to_strings("7.0 2 /"), vec!["3.5000"]);
}

#[test]
fn plus_dispatches_on_operand_kinds() {
    assert_eq!(eval_to_values("1.5 2 +"), vec![Value::Double(3.5)]);
    assert_eq!(eval_to_values("1.5 2.5 +"), vec![Value::Double(4.0)]);
    assert_eq!(
        eval_to_strings("1 2 3 ->VEC3 10 20 30 ->VEC3 +"),
        vec!["(11.0000, 22.0000, 33.0000)"]
    );

    let (kind, status) = eval_error(".\" text\" 1 2 3 ->VEC3 +");
    assert_eq!(kind, ErrorKind::ParamError);
    assert_eq!(status, "+: parameter error");
}

#[test]
fn transcendentals_in_degrees() {
    assert_stack_approx("30 SIN 45 TAN 0.5 ACOS", &[0.5, 1.0, 60.0], 1e-9);
    assert_stack_approx("2 SQRT SQ", &[2.0], 1e-9);
    assert_stack_approx("1 EXP LN", &[1.0], 1e-12);
}

#[test]
fn quadratic_roots() {
    assert_stack_approx("1 -5 6 QUAD", &[3.0, 2.0], 1e-12);
    assert_stack_approx("2 4 2 QUAD", &[-1.0, -1.0], 1e-12);
}

#[test]
fn random_numbers_repeat_from_a_seed() {
    let a = eval_to_values("7 RDZ RAND DRAND");
    let b = eval_to_values("7 RDZ RAND DRAND");
    assert_eq!(a, b);
    assert!(matches!(a[0], Value::Integer(n) if n > 0));
    assert!((0.0..1.0).contains(&a[1].as_double()));
}
