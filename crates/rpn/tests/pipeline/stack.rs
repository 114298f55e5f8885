//! Stack manipulation words.

use pretty_assertions::assert_eq;

use crate::{eval_error, eval_to_ints};
use rpn::ErrorKind;

#[test]
fn basic_words() {
    assert_eq!(eval_to_ints("1 2 SWAP"), vec![2, 1]);
    assert_eq!(eval_to_ints("1 2 OVER"), vec![1, 2, 1]);
    assert_eq!(eval_to_ints("1 DUP"), vec![1, 1]);
    assert_eq!(eval_to_ints("1 2 DROP"), vec![1]);
    assert_eq!(eval_to_ints("1 2 3 CLEAR"), Vec::<i64>::new());
    assert_eq!(eval_to_ints("7 8 DEPTH"), vec![7, 8, 2]);
}

#[test]
fn rotations() {
    assert_eq!(eval_to_ints("1 2 3 ROTU"), vec![2, 3, 1]);
    assert_eq!(eval_to_ints("1 2 3 ROTD"), vec![3, 1, 2]);
    assert_eq!(eval_to_ints("1 2 3 4 ROLLU"), vec![2, 3, 4, 1]);
    assert_eq!(eval_to_ints("1 2 3 4 ROLLD"), vec![4, 1, 2, 3]);
    assert_eq!(eval_to_ints("1 2 3 4 REVERSE"), vec![4, 3, 2, 1]);
}

#[test]
fn counted_words() {
    assert_eq!(eval_to_ints("1 2 3 2 DROPN"), vec![1]);
    assert_eq!(eval_to_ints("1 2 2 DUPN"), vec![1, 2, 1, 2]);
    assert_eq!(eval_to_ints("1 2 3 3 PICK"), vec![1, 2, 3, 1]);
    assert_eq!(eval_to_ints("1 2 3 4 3 ROLLUN"), vec![1, 3, 4, 2]);
    assert_eq!(eval_to_ints("1 2 3 4 3 ROLLDN"), vec![1, 4, 2, 3]);
    assert_eq!(eval_to_ints("1 2 3 4 3 REVERSEN"), vec![1, 4, 3, 2]);
    assert_eq!(eval_to_ints("1 2 2 TUCKN"), vec![2, 1, 2]);
}

#[test]
fn word_source_helpers() {
    assert_eq!(eval_to_ints("1 2 DUP2"), vec![1, 2, 1, 2]);
    assert_eq!(eval_to_ints("1 2 3 DROP2"), vec![1]);
}

#[test]
fn too_few_items_is_param_error() {
    assert_eq!(eval_error("1 SWAP").0, ErrorKind::ParamError);
    assert_eq!(eval_error("1 2 5 DROPN").0, ErrorKind::ParamError);
    assert_eq!(eval_error("DROP").0, ErrorKind::ParamError);
}
