//! User-defined words: definition, redefinition, recursion and scoping.

use pretty_assertions::assert_eq;

use crate::{eval_error, eval_to_ints, session};
use rpn::{ErrorKind, Value};

#[test]
fn define_and_call() {
    assert_eq!(eval_to_ints(": SQ3 DUP DUP * * ; 3 SQ3"), vec![27]);
}

#[test]
fn definitions_persist_across_lines() {
    let mut s = session();
    s.eval(": INC 1 + ;").unwrap();
    assert!(!s.interp().is_compiling());
    assert_eq!(s.eval("41 INC").unwrap(), vec![Value::Integer(42)]);
}

#[test]
fn definition_can_span_lines() {
    let mut s = session();
    s.eval(": TRIPLE").unwrap();
    assert!(s.interp().is_compiling());
    s.eval("3 *").unwrap();
    s.eval(";").unwrap();
    assert_eq!(s.eval("5 TRIPLE").unwrap(), vec![Value::Integer(15)]);
}

#[test]
fn redefinition_replaces_the_compiled_word() {
    let mut s = session();
    s.eval(": W 1 ;").unwrap();
    s.eval(": W 2 ;").unwrap();
    assert_eq!(s.eval("W").unwrap(), vec![Value::Integer(2)]);
}

#[test]
fn direct_recursion() {
    // Each call consumes n and leaves 2^n copies of 1.
    assert_eq!(
        eval_to_ints(": R 0 SWAP FOR k k R NEXT 1 ; 3 R"),
        vec![1; 8]
    );
}

#[test]
fn mutual_recursion_through_a_stub() {
    let mut s = session();
    s.eval(": B ;").unwrap();
    s.eval(": A 0 SWAP FOR k k B NEXT 2 ;").unwrap();
    s.eval(": B 0 SWAP FOR k k A NEXT 1 ;").unwrap();
    assert_eq!(
        s.eval("2 A").unwrap(),
        [1, 2, 1, 2].map(Value::Integer).to_vec()
    );
}

#[test]
fn loop_variables_are_scoped_per_call() {
    let mut s = session();
    s.eval(": INNER 0 2 FOR i i NEXT ;").unwrap();
    s.eval(": OUTER 10 12 FOR i INNER i NEXT ;").unwrap();
    assert_eq!(
        eval_reals(&mut s, "OUTER"),
        vec![0.0, 1.0, 10.0, 0.0, 1.0, 11.0]
    );
}

#[test]
fn runaway_recursion_hits_the_call_limit() {
    let (kind, status) = eval_error(": FOREVER FOREVER ; FOREVER");
    assert_eq!(kind, ErrorKind::EvalError);
    assert!(status.starts_with("FOREVER: eval error"), "{status}");
}

#[test]
fn stray_semicolon_is_compile_error() {
    assert_eq!(eval_error(";").0, ErrorKind::CompileError);
}

fn eval_reals(s: &mut rpn::Session, code: &str) -> Vec<f64> {
    s.eval(code)
        .unwrap()
        .iter()
        .map(|v| v.as_double())
        .collect()
}
