//! Conversions, objects (maps), arrays (lists) and vec3 words.

use std::collections::BTreeMap;
use std::rc::Rc;

use rpn_lang::{Axis, Interp, Validator, Value, ValueKind, Vec3, WordError, WordResult};

use crate::{NUMBERS, kinds, word};

const AXES: &[(Axis, [&str; 2])] = &[
    (Axis::X, ["->VEC3x", "->{x}"]),
    (Axis::Y, ["->VEC3y", "->{y}"]),
    (Axis::Z, ["->VEC3z", "->{z}"]),
];

const DEFINITIONS: &[&str] = &[
    ": VEC3->{xy} ( <v3> <v3'> ) VEC3-> DROP ->{y} SWAP ->{x} + ;",
    ": ->{xy} ( x y -- <v3'> ) ->{y} SWAP ->{x} + ;",
];

fn count(n: usize) -> Value {
    Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}

fn conversions(interp: &mut Interp) {
    use ValueKind::{Any, Double, Fraction, Integer};

    interp.register("->INT", word(&kinds(&[Integer]), |_| Ok(())));
    for kind in [Double, Fraction] {
        interp.register(
            "->INT",
            word(&kinds(&[kind]), |i| {
                let v = match i.stack.pop()? {
                    Value::Fraction(f) => f.to_f64(),
                    other => other.as_double(),
                };
                Ok(i.stack.push_integer(v.trunc() as i64)?)
            }),
        );
    }
    for kind in [Integer, Double, Fraction] {
        interp.register(
            "->FLOAT",
            word(&kinds(&[kind]), |i| {
                let v = match i.stack.pop()? {
                    Value::Fraction(f) => f.to_f64(),
                    other => other.as_double(),
                };
                Ok(i.stack.push_double(v)?)
            }),
        );
    }
    interp.register(
        "->STRING",
        word(&kinds(&[Any]), |i| {
            let v = i.stack.pop()?;
            Ok(i.stack.push_string(v.to_string())?)
        }),
    );
}

fn push_entries(interp: &mut Interp, map: BTreeMap<String, Value>) -> WordResult {
    let n = map.len();
    for (key, value) in map {
        interp.stack.push(value)?;
        interp.stack.push_string(key)?;
    }
    Ok(interp.stack.push(count(n))?)
}

fn objects(interp: &mut Interp) {
    use ValueKind::{Any, Map};

    // v key ->OBJECT
    interp.register(
        "->OBJECT",
        word(&kinds(&[ValueKind::String, Any]), |i| {
            let key = i.stack.pop_string()?;
            let value = i.stack.pop()?;
            Ok(i.stack.push(Value::Map(BTreeMap::from([(key, value)])))?)
        }),
    );
    // v key map +
    interp.register(
        "+",
        word(&kinds(&[Map, ValueKind::String, Any]), |i| {
            let mut map = i.stack.pop_map()?;
            let key = i.stack.pop_string()?;
            let value = i.stack.pop()?;
            map.insert(key, value);
            Ok(i.stack.push(Value::Map(map))?)
        }),
    );
    // map v key +
    interp.register(
        "+",
        word(&kinds(&[ValueKind::String, Any, Map]), |i| {
            let key = i.stack.pop_string()?;
            let value = i.stack.pop()?;
            let mut map = i.stack.pop_map()?;
            map.insert(key, value);
            Ok(i.stack.push(Value::Map(map))?)
        }),
    );

    let map = kinds(&[Map]);
    for name in ["OBJECT->", "OBJ->"] {
        interp.register(
            name,
            word(&map, |i| {
                let entries = i.stack.pop_map()?;
                push_entries(i, entries)
            }),
        );
    }
}

fn arrays(interp: &mut Interp) {
    use ValueKind::{Any, List};

    interp.register(
        "->ARRAY",
        word(&Rc::new(Validator::count_on_top()), |i| {
            let n = i.stack.pop_integer()?;
            let n = usize::try_from(n).map_err(|_| WordError::eval(format!("bad count {n}")))?;
            let items = i.stack.pop_n(n)?;
            Ok(i.stack.push(Value::List(items))?)
        }),
    );

    let list = kinds(&[List]);
    for name in ["ARRAY->", "OBJ->"] {
        interp.register(
            name,
            word(&list, |i| {
                let items = i.stack.pop_list()?;
                let n = items.len();
                for item in items {
                    i.stack.push(item)?;
                }
                Ok(i.stack.push(count(n))?)
            }),
        );
    }

    // list v +
    interp.register(
        "+",
        word(&kinds(&[Any, List]), |i| {
            let value = i.stack.pop()?;
            let mut items = i.stack.pop_list()?;
            items.push(value);
            Ok(i.stack.push(Value::List(items))?)
        }),
    );
    // v list +
    interp.register(
        "+",
        word(&kinds(&[List, Any]), |i| {
            let mut items = i.stack.pop_list()?;
            let value = i.stack.pop()?;
            items.insert(0, value);
            Ok(i.stack.push(Value::List(items))?)
        }),
    );
}

fn vectors(interp: &mut Interp) {
    use ValueKind::Vec3 as V;

    let pair = kinds(&[V, V]);
    interp.register(
        "+",
        word(&pair, |i| {
            let b = i.stack.pop_vec3()?;
            let a = i.stack.pop_vec3()?;
            Ok(i.stack.push_vec3(a.add_vec(&b))?)
        }),
    );
    interp.register(
        "-",
        word(&pair, |i| {
            let b = i.stack.pop_vec3()?;
            let a = i.stack.pop_vec3()?;
            Ok(i.stack.push_vec3(a.sub_vec(&b))?)
        }),
    );

    for kind in NUMBERS {
        // v n +, v n -
        let scalar_on_top = kinds(&[kind, V]);
        interp.register(
            "+",
            word(&scalar_on_top, |i| {
                let n = i.stack.pop_as_double()?;
                let v = i.stack.pop_vec3()?;
                Ok(i.stack.push_vec3(v.add_scalar(n))?)
            }),
        );
        interp.register(
            "-",
            word(&scalar_on_top, |i| {
                let n = i.stack.pop_as_double()?;
                let v = i.stack.pop_vec3()?;
                Ok(i.stack.push_vec3(v.sub_scalar(n))?)
            }),
        );

        // n v +, n v -
        let vector_on_top = kinds(&[V, kind]);
        interp.register(
            "+",
            word(&vector_on_top, |i| {
                let v = i.stack.pop_vec3()?;
                let n = i.stack.pop_as_double()?;
                Ok(i.stack.push_vec3(v.add_scalar(n))?)
            }),
        );
        interp.register(
            "-",
            word(&vector_on_top, |i| {
                let v = i.stack.pop_vec3()?;
                let n = i.stack.pop_as_double()?;
                Ok(i.stack.push_vec3(v.scalar_sub(n))?)
            }),
        );
    }

    for x in NUMBERS {
        for y in NUMBERS {
            for z in NUMBERS {
                interp.register(
                    "->VEC3",
                    word(&kinds(&[z, y, x]), |i| {
                        let z = i.stack.pop_as_double()?;
                        let y = i.stack.pop_as_double()?;
                        let x = i.stack.pop_as_double()?;
                        Ok(i.stack.push_vec3(Vec3::new(x, y, z))?)
                    }),
                );
            }
        }
    }

    for (axis, names) in AXES {
        let axis = *axis;
        for kind in NUMBERS {
            for name in names {
                interp.register(
                    *name,
                    word(&kinds(&[kind]), move |i| {
                        let n = i.stack.pop_as_double()?;
                        Ok(i.stack.push_vec3(Vec3::on_axis(axis, n))?)
                    }),
                );
            }
        }
    }

    let vector = kinds(&[V]);
    for name in ["VEC3->", "OBJ->"] {
        interp.register(
            name,
            word(&vector, |i| {
                let v = i.stack.pop_vec3()?;
                for c in v.components() {
                    i.stack.push_double(c)?;
                }
                Ok(())
            }),
        );
    }
}

pub fn register(interp: &mut Interp) -> WordResult {
    conversions(interp);
    vectors(interp);
    objects(interp);
    arrays(interp);
    for line in DEFINITIONS {
        interp.eval(line)?;
    }
    Ok(())
}
