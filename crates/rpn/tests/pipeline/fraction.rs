//! Fraction words end to end.

use pretty_assertions::assert_eq;

use crate::eval_to_strings;

#[test]
fn fraction_arithmetic() {
    assert_eq!(eval_to_strings("1 3 ->FRAC 1 6 ->FRAC +"), vec!["1/2"]);
    assert_eq!(eval_to_strings("3 4 ->FRAC 2 *"), vec!["3/2"]);
    assert_eq!(eval_to_strings("1 1 3 ->FRAC /"), vec!["3/1"]);
}

#[test]
fn doubles_approximate_to_fractions() {
    assert_eq!(eval_to_strings("0.125 ->FRAC"), vec!["1/8"]);
    assert_eq!(eval_to_strings("0.333333333333 ->FRAC"), vec!["1/3"]);
}

#[test]
fn explode_and_convert() {
    assert_eq!(eval_to_strings("6 -4 ->FRAC OBJ->"), vec!["-3", "2"]);
    assert_eq!(eval_to_strings("1 8 ->FRAC ->DOUBLE"), vec!["0.1250"]);
}
