//! File evaluation and configuration loading.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::session;
use rpn::{ErrorKind, InterpConfig, Session, SessionError, Value};

fn file_with(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

#[test]
fn file_runs_line_by_line() {
    let file = file_with(&[
        "( squares of 0..n )",
        ": SQUARES",
        "  0 SWAP FOR k k k * NEXT",
        ";",
        "3 SQUARES",
    ]);
    let stack = session().run_file(file.path()).unwrap();
    assert_eq!(
        stack,
        vec![Value::Double(0.0), Value::Double(1.0), Value::Double(4.0)]
    );
}

#[test]
fn file_error_names_the_line() {
    let file = file_with(&["1 2", "+", "BOGUS", "4"]);
    let mut s = session();
    match s.run_file(file.path()) {
        Err(SessionError::File(e)) => {
            assert_eq!(e.line, 3);
            assert_eq!(e.source.kind(), ErrorKind::DictionaryError);
        }
        other => panic!("expected a file error, got {other:?}"),
    }
    assert_eq!(s.stack().as_slice(), &[Value::Integer(3)]);
}

#[test]
fn missing_file_is_line_zero() {
    match session().run_file("/nonexistent/words.rpn") {
        Err(SessionError::File(e)) => assert_eq!(e.line, 0),
        other => panic!("expected a file error, got {other:?}"),
    }
}

#[test]
fn session_from_config_file() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "max_stack_depth = 8").unwrap();
    writeln!(config, "prelude = [\": CUBE DUP DUP * * ;\"]").unwrap();

    let mut s = Session::from_config_file(config.path()).unwrap();
    assert_eq!(s.eval("2 CUBE").unwrap(), vec![Value::Integer(8)]);
    assert_eq!(s.stack().max_size(), Some(8));
}

#[test]
fn invalid_config_is_rejected() {
    let config = file_with(&["max_call_depth = 0"]);
    assert!(matches!(
        Session::from_config_file(config.path()),
        Err(SessionError::Config(_))
    ));
}

#[test]
fn call_depth_from_config() {
    let config = InterpConfig {
        max_call_depth: 4,
        ..InterpConfig::default()
    };
    let mut s = Session::with_config(&config).unwrap();
    s.eval(": L1 1 ; : L2 L1 ; : L3 L2 ; : L4 L3 ; : L5 L4 ;").unwrap();
    assert_eq!(s.eval("L4").unwrap(), vec![Value::Integer(1)]);
    let err = s.eval("CLEAR L5").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::EvalError));
}
