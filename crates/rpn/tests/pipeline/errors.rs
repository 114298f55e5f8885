//! Failure reporting: status text, partial stacks and recovery.

use pretty_assertions::assert_eq;

use crate::{eval_error, session};
use rpn::{ErrorKind, SessionError, Value};

#[test]
fn failing_word_keeps_earlier_results() {
    let mut s = session();
    let err = s.eval("CLEAR 123 456 > FOO 7").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::DictionaryError));
    assert_eq!(s.status(), "FOO: not found");
    assert_eq!(s.stack().as_slice(), &[Value::Boolean(false)]);
}

#[test]
fn status_after_success_names_the_last_word() {
    let mut s = session();
    s.eval("1 2 +").unwrap();
    assert_eq!(s.status(), "+: ok");
}

#[test]
fn eval_error_quotes_the_rest_of_the_line() {
    let (kind, status) = eval_error("0 1 ->FRAC 10 ->TC 5 6");
    assert_eq!(kind, ErrorKind::EvalError);
    assert_eq!(status, "->TC: eval error '5 6'");
}

#[test]
fn param_error_does_not_quote() {
    let (kind, status) = eval_error("1 .\" a\" + 2 3");
    assert_eq!(kind, ErrorKind::ParamError);
    assert_eq!(status, "+: parameter error");
}

#[test]
fn parse_errors() {
    assert_eq!(eval_error("1 .\" never closed").0, ErrorKind::ParseError);
    assert_eq!(eval_error("( no end").0, ErrorKind::ParseError);
    assert_eq!(eval_error("12abc").0, ErrorKind::ParseError);
    assert_eq!(eval_error("99999999999999999999").0, ErrorKind::ParseError);
}

#[test]
fn compile_failure_abandons_the_definition() {
    let mut s = session();
    let err = s.eval(": W NOPE ;").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::DictionaryError));
    assert!(!s.interp().is_compiling());
    assert!(!s.interp().word_exists("W"));

    let err = s.eval(": 5 ;").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::CompileError));
    assert!(!s.interp().is_compiling());

    // The session is usable afterwards.
    assert_eq!(s.eval("CLEAR 4").unwrap(), vec![Value::Integer(4)]);
}

#[test]
fn unregistered_word_is_not_found() {
    let mut s = session();
    assert!(s.interp_mut().unregister("DUP"));
    assert!(!s.interp_mut().unregister("DUP"));
    match s.eval("1 DUP") {
        Err(SessionError::Eval { kind, status }) => {
            assert_eq!(kind, ErrorKind::DictionaryError);
            assert_eq!(status, "DUP: not found");
        }
        other => panic!("expected not-found, got {other:?}"),
    }
}

#[test]
fn eval_with_reports_to_the_callback() {
    let mut s = session();
    let mut seen = None;
    s.interp_mut().eval_with("1 2 SWAP", |result, status| {
        seen = Some((result.is_ok(), status.to_string()));
    });
    assert_eq!(seen, Some((true, "SWAP: ok".to_string())));
}
