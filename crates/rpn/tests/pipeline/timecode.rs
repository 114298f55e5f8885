//! Timecode words end to end.

use pretty_assertions::assert_eq;

use crate::{eval_error, eval_to_ints, eval_to_strings};
use rpn::ErrorKind;

#[test]
fn non_drop_frame() {
    assert_eq!(
        eval_to_strings("25 1 ->FRAC 0 59 59 25 ->TC"),
        vec!["TC/NDF 01:00:00:00 @ 25.00"]
    );
}

#[test]
fn drop_frame_skips_numbers_each_minute() {
    // One frame before and at a minute boundary at 29.97.
    assert_eq!(
        eval_to_strings("30000 1001 ->FRAC 0 0 59 29 ->TC 1 +"),
        vec!["TC/DF 00:01:00;02 @ 29.97"]
    );
    // Every tenth minute keeps its first two frame numbers.
    assert_eq!(
        eval_to_ints("30000 1001 ->FRAC 0 10 0 0 ->TC ->FRAMES"),
        vec![17982]
    );
}

#[test]
fn timecode_difference() {
    assert_eq!(
        eval_to_ints("24 1 ->FRAC 0 0 2 0 ->TC 24 1 ->FRAC 0 0 1 12 ->TC - ->FRAMES"),
        vec![12]
    );
}

#[test]
fn huge_fields_and_rates_do_not_crash() {
    let max = i64::MAX;
    assert_eq!(
        eval_to_strings(&format!("24 1 ->FRAC 0 0 {max} {max} ->TC")).len(),
        1
    );
    let (kind, status) = eval_error("1000000000000000000 1 ->FRAC 0 ->TC");
    assert_eq!(kind, ErrorKind::EvalError);
    assert_eq!(status, "->TC: eval error");
}
