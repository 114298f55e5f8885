//! Comparison, selection and boolean words.

use pretty_assertions::assert_eq;

use crate::{eval_error, eval_to_strings};
use rpn::ErrorKind;

#[test]
fn comparisons() {
    assert_eq!(eval_to_strings("123 456 >"), vec!["<false>"]);
    assert_eq!(eval_to_strings("123 456 <"), vec!["<true>"]);
    assert_eq!(eval_to_strings("2 2.0 >="), vec!["<true>"]);
    assert_eq!(eval_to_strings("2 2.0 =="), vec!["<false>"]);
}

#[test]
fn ifte_selects() {
    assert_eq!(eval_to_strings(".\" yes\" .\" no\" 1 2 < IFTE"), vec!["yes"]);
    assert_eq!(eval_to_strings(".\" yes\" .\" no\" 1 2 > IFTE"), vec!["no"]);
}

#[test]
fn boolean_words() {
    assert_eq!(eval_to_strings("<true> <false> OR NOT"), vec!["<false>"]);
    assert_eq!(eval_to_strings("6 3 XOR"), vec!["5"]);
}

#[test]
fn mismatched_comparison_is_param_error() {
    let (kind, status) = eval_error("<true> 1 <");
    assert_eq!(kind, ErrorKind::ParamError);
    assert_eq!(status, "<: parameter error");
}
