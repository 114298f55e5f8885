//! Conversions, objects, arrays and vec3 values end to end.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;

use crate::{eval_error, eval_to_strings, eval_to_values};
use rpn::{ErrorKind, Value};
use rpn_vm::{Fraction, Vec3};

#[test]
fn conversions() {
    assert_eq!(eval_to_strings("7.9 ->INT 2 ->FLOAT"), vec!["7", "2.0000"]);
    assert_eq!(
        eval_to_values("1 2 3 ->VEC3 ->STRING"),
        vec![Value::string("(1.0000, 2.0000, 3.0000)")]
    );
}

#[test]
fn arrays_collect_and_explode() {
    assert_eq!(eval_to_strings("1 2.5 .\" x\" 3 ->ARRAY"), vec!["[1, 2.5000, x]"]);
    assert_eq!(eval_to_strings("1 2 2 ->ARRAY OBJ->"), vec!["1", "2", "2"]);
    assert_eq!(eval_error("1 -1 ->ARRAY").0, ErrorKind::ParamError);
}

#[test]
fn objects_keep_keys_sorted() {
    assert_eq!(
        eval_to_strings("1 .\" z\" ->OBJECT 2 .\" a\" + 3 .\" m\" +"),
        vec!["{a:2, m:3, z:1}"]
    );
}

#[test]
fn vec3_assembled_axis_by_axis() {
    assert_eq!(
        eval_to_values("1 ->{x} 2 ->{y} + 3 ->{z} +"),
        vec![Value::Vec3(Vec3::new(1.0, 2.0, 3.0))]
    );
    assert_eq!(eval_to_strings("1 2 ->{xy}"), vec!["(1.0000, 2.0000, -)"]);
}

#[test]
fn deparsed_values_evaluate_back() {
    let mut map = BTreeMap::new();
    map.insert("a".to_string(), Value::Integer(1));
    map.insert("b".to_string(), Value::Double(2.5));
    let values = vec![
        Value::Boolean(true),
        Value::Double(1e20),
        Value::string("two words"),
        Value::Vec3(Vec3::new(1.0, f64::NAN, 3.0)),
        Value::Fraction(Fraction::new(-3, 4)),
        Value::List(vec![
            Value::Integer(1),
            Value::List(vec![Value::string("x")]),
        ]),
        Value::Map(map),
    ];
    for value in values {
        let source = value.deparse().unwrap();
        assert_eq!(eval_to_values(&source), vec![value], "{source}");
    }
}
