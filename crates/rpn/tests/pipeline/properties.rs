//! Property tests over whole-line evaluation.

use proptest::prelude::*;

use crate::eval_to_values;
use rpn::Value;

proptest! {
    #[test]
    fn integer_literals_evaluate_to_themselves(n in any::<i64>()) {
        prop_assert_eq!(eval_to_values(&n.to_string()), vec![Value::Integer(n)]);
    }

    #[test]
    fn integer_addition_wraps(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(
            eval_to_values(&format!("{a} {b} +")),
            vec![Value::Integer(a.wrapping_add(b))]
        );
    }

    #[test]
    fn finite_doubles_deparse_exactly(d in -1.0e300f64..1.0e300) {
        let value = Value::Double(d);
        let source = value.deparse().unwrap();
        prop_assert_eq!(eval_to_values(&source), vec![value]);
    }

    #[test]
    fn swap_twice_is_identity(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(
            eval_to_values(&format!("{a} {b} SWAP SWAP")),
            vec![Value::Integer(a), Value::Integer(b)]
        );
    }
}
