use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::body::CompiledBody;
use crate::fraction::Fraction;
use crate::timecode::Timecode;
use crate::vec3::Vec3;

/// Value kinds, as seen by dispatch validators.
///
/// `Any` never describes a value; it is the validator wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Any,
    Boolean,
    Integer,
    Double,
    String,
    Vec3,
    Fraction,
    Timecode,
    List,
    Map,
    Body,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Any => "any",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Vec3 => "vec3",
            ValueKind::Fraction => "fraction",
            ValueKind::Timecode => "timecode",
            ValueKind::List => "array",
            ValueKind::Map => "object",
            ValueKind::Body => "progn",
        }
    }

    /// Validator matching: `Any` accepts every kind.
    pub fn accepts(self, actual: ValueKind) -> bool {
        self == ValueKind::Any || self == actual
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Stack-resident value.
#[derive(Clone, Debug)]
pub enum Value {
    Boolean(bool),
    /// Integer (64-bit signed).
    Integer(i64),
    /// Double (64-bit float).
    Double(f64),
    String(String),
    Vec3(Vec3),
    Fraction(Fraction),
    Timecode(Timecode),
    /// Ordered sequence of owned values.
    List(Vec<Value>),
    /// Name to value mapping; iteration is in key order.
    Map(BTreeMap<String, Value>),
    /// A compiled word or loop body.
    Body(CompiledBody),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Fraction(_) => ValueKind::Fraction,
            Value::Timecode(_) => ValueKind::Timecode,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Body(_) => ValueKind::Body,
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Integer or Double as f64.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Numeric coercion: NaN for anything that is not a number.
    pub fn as_double(&self) -> f64 {
        self.as_number().unwrap_or(f64::NAN)
    }

    /// Truthiness: non-zero numbers and non-empty strings are true.
    pub fn as_boolean(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Double(d) => *d != 0.0,
            Value::String(s) => !s.is_empty(),
            _ => false,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Double(_))
    }

    /// Ordering where one is meaningful.
    ///
    /// Integer and Double compare with each other by value; other kinds
    /// only compare with their own kind.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (a, b) if a.is_number() && b.is_number() => a.as_double().partial_cmp(&b.as_double()),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Fraction(a), Value::Fraction(b)) => a.partial_cmp(b),
            (Value::Timecode(a), Value::Timecode(b)) => Some(a.to_frames().cmp(&b.to_frames())),
            _ => None,
        }
    }

    /// Word-source text that pushes an equal value when evaluated.
    pub fn deparse(&self) -> Option<String> {
        match self {
            Value::Boolean(true) => Some("<true>".into()),
            Value::Boolean(false) => Some("<false>".into()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Double(d) => double_literal(*d),
            Value::String(s) if !s.contains('"') => Some(format!(".\" {s}\"")),
            Value::String(_) => None,
            Value::Vec3(v) => deparse_vec3(v),
            Value::Fraction(f) => Some(format!("{} {} ->FRAC", f.numerator(), f.denominator())),
            Value::Timecode(tc) => Some(format!(
                "{} {} ->FRAC {} ->TC",
                tc.rate().numerator(),
                tc.rate().denominator(),
                tc.to_frames()
            )),
            Value::List(items) => {
                let mut parts = items.iter().map(Value::deparse).collect::<Option<Vec<_>>>()?;
                parts.push(format!("{} ->ARRAY", items.len()));
                Some(parts.join(" "))
            }
            Value::Map(map) => {
                let mut out = String::new();
                for (i, (key, value)) in map.iter().enumerate() {
                    if key.contains('"') {
                        return None;
                    }
                    let joiner = if i == 0 { "->OBJECT" } else { "+" };
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(&format!("{} .\" {key}\" {joiner}", value.deparse()?));
                }
                (!out.is_empty()).then_some(out)
            }
            Value::Body(_) => None,
        }
    }
}

fn double_literal(d: f64) -> Option<String> {
    if !d.is_finite() {
        return None;
    }
    let text = format!("{d:?}");
    if text.contains('.') {
        return Some(text);
    }
    // `1e20` has no '.', which would lex as an integer.
    Some(match text.split_once('e') {
        Some((mantissa, exp)) => format!("{mantissa}.0e{exp}"),
        None => format!("{text}.0"),
    })
}

fn deparse_vec3(v: &Vec3) -> Option<String> {
    let parts: Vec<_> = v.components().into_iter().map(double_literal).collect();
    if let [Some(x), Some(y), Some(z)] = &parts[..] {
        return Some(format!("{x} {y} {z} ->VEC3"));
    }
    let set: Vec<String> = parts
        .iter()
        .zip(["->{x}", "->{y}", "->{z}"])
        .filter_map(|(part, word)| part.as_ref().map(|p| format!("{p} {word}")))
        .collect();
    let (first, rest) = set.split_first()?;
    let mut out = first.clone();
    for part in rest {
        out.push_str(&format!(" {part} +"));
    }
    Some(out)
}

impl PartialEq for Value {
    /// Structural equality; values of different kinds are never equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Vec3(a), Value::Vec3(b)) => a == b,
            (Value::Fraction(a), Value::Fraction(b)) => a == b,
            (Value::Timecode(a), Value::Timecode(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Body(a), Value::Body(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(true) => f.write_str("<true>"),
            Value::Boolean(false) => f.write_str("<false>"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d:.4}"),
            Value::String(s) => f.write_str(s),
            Value::Vec3(v) => write!(f, "{v}"),
            Value::Fraction(fr) => write!(f, "{fr}"),
            Value::Timecode(tc) => write!(f, "{tc}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                write!(f, "}}")
            }
            Value::Body(body) => write!(f, "{body}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Value::Vec3(v)
    }
}

impl From<Fraction> for Value {
    fn from(v: Fraction) -> Self {
        Value::Fraction(v)
    }
}

impl From<Timecode> for Value {
    fn from(v: Timecode) -> Self {
        Value::Timecode(v)
    }
}
