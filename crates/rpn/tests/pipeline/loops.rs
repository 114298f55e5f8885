//! FOR ... NEXT loops, at top level and inside definitions.

use pretty_assertions::assert_eq;

use crate::{eval_error, eval_to_reals, eval_to_values};
use rpn::ErrorKind;

#[test]
fn top_level_loop_runs_immediately() {
    assert_eq!(
        eval_to_reals("0 5 FOR i i 10 * NEXT"),
        vec![0.0, 10.0, 20.0, 30.0, 40.0]
    );
}

#[test]
fn empty_range_runs_nothing() {
    assert!(eval_to_values("5 5 FOR i i NEXT").is_empty());
    assert!(eval_to_values("5 2 FOR i i NEXT").is_empty());
}

#[test]
fn nested_loops() {
    let stack = eval_to_reals("0 5 FOR i 0 5 FOR j i j * NEXT NEXT");
    assert_eq!(stack.len(), 25);
    assert_eq!(stack[7], 2.0);
    assert_eq!(stack[24], 16.0);
}

#[test]
fn nested_loops_see_the_outer_variable() {
    let stack = eval_to_reals("0 5 FOR i 0 5 FOR j i 10 * j + NEXT NEXT");
    let expected: Vec<f64> = (0..5)
        .flat_map(|i| (0..5).map(move |j| f64::from(i * 10 + j)))
        .collect();
    assert_eq!(stack, expected);
}

#[test]
fn loop_inside_definition() {
    assert_eq!(
        eval_to_reals(": SQUARES 0 SWAP FOR k k k * NEXT ; 4 SQUARES"),
        vec![0.0, 1.0, 4.0, 9.0]
    );
}

#[test]
fn loop_bounds_must_be_numbers() {
    assert_eq!(eval_error(".\" a\" 3 FOR i i NEXT").0, ErrorKind::ParamError);
}

#[test]
fn unbounded_loops_fail_instead_of_spinning() {
    assert_eq!(eval_error("0 1.0 0 / FOR i NEXT").0, ErrorKind::ParamError);
    assert_eq!(
        eval_error("100000000000000000.0 100000000000000010.0 FOR i NEXT").0,
        ErrorKind::EvalError
    );
}

#[test]
fn stray_next_is_compile_error() {
    assert_eq!(eval_error("NEXT").0, ErrorKind::CompileError);
}
