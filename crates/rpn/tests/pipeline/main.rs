//! End-to-end evaluation tests.
//!
//! Each test drives a full [`Session`] (every standard package loaded)
//! through word-source text and inspects the resulting stack or status.
//! Tests are organized into modules by functionality.

use rpn::{ErrorKind, Session, SessionError, Value};

mod arithmetic;
mod errors;
mod files;
mod fraction;
mod logic;
mod loops;
mod properties;
mod stack;
mod timecode;
mod types;
mod words;

// ============================================================================
// Test Helpers
// ============================================================================

pub fn session() -> Session {
    Session::new().unwrap_or_else(|e| panic!("session failed: {e}"))
}

/// Evaluate `code` on a fresh session and return the stack.
pub fn eval_to_values(code: &str) -> Vec<Value> {
    session()
        .eval(code)
        .unwrap_or_else(|e| panic!("eval failed for '{code}': {e}"))
}

/// Evaluate `code` and render the stack bottom to top.
pub fn eval_to_strings(code: &str) -> Vec<String> {
    eval_to_values(code).iter().map(Value::to_string).collect()
}

/// Evaluate `code` and return the stack as integers.
pub fn eval_to_ints(code: &str) -> Vec<i64> {
    eval_to_values(code)
        .iter()
        .map(|v| match v {
            Value::Integer(i) => *i,
            other => panic!("expected Integer for '{code}', got {other:?}"),
        })
        .collect()
}

/// Evaluate `code` and return the stack as doubles.
pub fn eval_to_reals(code: &str) -> Vec<f64> {
    eval_to_values(code)
        .iter()
        .map(|v| {
            v.as_number()
                .unwrap_or_else(|| panic!("expected a number for '{code}', got {v:?}"))
        })
        .collect()
}

/// Check numeric stack contents with a tolerance.
pub fn assert_stack_approx(code: &str, expected: &[f64], epsilon: f64) {
    let actual = eval_to_reals(code);
    assert_eq!(
        actual.len(),
        expected.len(),
        "stack depth mismatch for '{code}': expected {expected:?}, got {actual:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < epsilon,
            "value {i} for '{code}': expected {e}, got {a}"
        );
    }
}

/// The error kind and status a failing line stops with.
pub fn eval_error(code: &str) -> (ErrorKind, String) {
    match session().eval(code) {
        Err(SessionError::Eval { kind, status }) => (kind, status),
        Err(other) => panic!("expected an eval error for '{code}', got {other}"),
        Ok(stack) => panic!("expected '{code}' to fail, got {stack:?}"),
    }
}
