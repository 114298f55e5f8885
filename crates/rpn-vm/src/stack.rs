//! Interpreter data stack.
//!
//! Positions are 1-based from the top: position 1 is the most recently
//! pushed item. Every operation that fails leaves the stack unmodified.

use smallvec::SmallVec;

use crate::error::StackError;
use crate::fraction::Fraction;
use crate::timecode::Timecode;
use crate::value::{Value, ValueKind};
use crate::vec3::Vec3;

/// Top-first kind sequence, as consumed by dispatch validators.
pub type KindList = SmallVec<[ValueKind; 8]>;

/// The data stack.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    items: Vec<Value>,
    max_size: Option<usize>,
}

fn mismatch(expected: ValueKind, found: &Value) -> StackError {
    StackError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

impl Stack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            max_size: None,
        }
    }

    /// Create a stack holding at most `max` items.
    pub fn with_max_size(max: usize) -> Self {
        Self {
            items: Vec::new(),
            max_size: Some(max),
        }
    }

    pub fn set_max_size(&mut self, max: Option<usize>) {
        self.max_size = max;
    }

    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Alias for [`Stack::len`].
    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, bottom to top.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Kinds of every item, top first.
    pub fn types(&self) -> KindList {
        self.items.iter().rev().map(Value::kind).collect()
    }

    fn need(&self, needed: usize) -> Result<(), StackError> {
        if needed > self.items.len() {
            return Err(StackError::underflow(needed, self.items.len()));
        }
        Ok(())
    }

    fn room(&self, extra: usize) -> Result<(), StackError> {
        if let Some(max) = self.max_size
            && self.items.len() + extra > max
        {
            return Err(StackError::Overflow(max));
        }
        Ok(())
    }

    // ---- push / pop ----

    pub fn push(&mut self, value: Value) -> Result<(), StackError> {
        self.room(1)?;
        self.items.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Value, StackError> {
        self.items.pop().ok_or(StackError::underflow(1, 0))
    }

    /// Remove the top `n` items, returned bottom to top.
    pub fn pop_n(&mut self, n: usize) -> Result<Vec<Value>, StackError> {
        self.need(n)?;
        let at = self.items.len() - n;
        Ok(self.items.split_off(at))
    }

    pub fn push_boolean(&mut self, v: bool) -> Result<(), StackError> {
        self.push(Value::Boolean(v))
    }

    pub fn push_integer(&mut self, v: i64) -> Result<(), StackError> {
        self.push(Value::Integer(v))
    }

    pub fn push_double(&mut self, v: f64) -> Result<(), StackError> {
        self.push(Value::Double(v))
    }

    pub fn push_string(&mut self, v: impl Into<String>) -> Result<(), StackError> {
        self.push(Value::String(v.into()))
    }

    pub fn push_vec3(&mut self, v: Vec3) -> Result<(), StackError> {
        self.push(Value::Vec3(v))
    }

    pub fn push_fraction(&mut self, v: Fraction) -> Result<(), StackError> {
        self.push(Value::Fraction(v))
    }

    pub fn push_timecode(&mut self, v: Timecode) -> Result<(), StackError> {
        self.push(Value::Timecode(v))
    }

    /// Pop the top item if it has kind `expected`.
    fn pop_kind(&mut self, expected: ValueKind) -> Result<Value, StackError> {
        let top = self.top()?;
        if top.kind() != expected {
            return Err(mismatch(expected, top));
        }
        self.pop()
    }

    pub fn pop_boolean(&mut self) -> Result<bool, StackError> {
        match self.pop_kind(ValueKind::Boolean)? {
            Value::Boolean(v) => Ok(v),
            other => Err(mismatch(ValueKind::Boolean, &other)),
        }
    }

    pub fn pop_integer(&mut self) -> Result<i64, StackError> {
        match self.pop_kind(ValueKind::Integer)? {
            Value::Integer(v) => Ok(v),
            other => Err(mismatch(ValueKind::Integer, &other)),
        }
    }

    pub fn pop_double(&mut self) -> Result<f64, StackError> {
        match self.pop_kind(ValueKind::Double)? {
            Value::Double(v) => Ok(v),
            other => Err(mismatch(ValueKind::Double, &other)),
        }
    }

    pub fn pop_string(&mut self) -> Result<String, StackError> {
        match self.pop_kind(ValueKind::String)? {
            Value::String(v) => Ok(v),
            other => Err(mismatch(ValueKind::String, &other)),
        }
    }

    pub fn pop_vec3(&mut self) -> Result<Vec3, StackError> {
        match self.pop_kind(ValueKind::Vec3)? {
            Value::Vec3(v) => Ok(v),
            other => Err(mismatch(ValueKind::Vec3, &other)),
        }
    }

    pub fn pop_fraction(&mut self) -> Result<Fraction, StackError> {
        match self.pop_kind(ValueKind::Fraction)? {
            Value::Fraction(v) => Ok(v),
            other => Err(mismatch(ValueKind::Fraction, &other)),
        }
    }

    pub fn pop_timecode(&mut self) -> Result<Timecode, StackError> {
        match self.pop_kind(ValueKind::Timecode)? {
            Value::Timecode(v) => Ok(v),
            other => Err(mismatch(ValueKind::Timecode, &other)),
        }
    }

    pub fn pop_list(&mut self) -> Result<Vec<Value>, StackError> {
        match self.pop_kind(ValueKind::List)? {
            Value::List(v) => Ok(v),
            other => Err(mismatch(ValueKind::List, &other)),
        }
    }

    pub fn pop_map(&mut self) -> Result<std::collections::BTreeMap<String, Value>, StackError> {
        match self.pop_kind(ValueKind::Map)? {
            Value::Map(v) => Ok(v),
            other => Err(mismatch(ValueKind::Map, &other)),
        }
    }

    /// Pop and coerce to a double; non-numbers give NaN.
    pub fn pop_as_double(&mut self) -> Result<f64, StackError> {
        Ok(self.pop()?.as_double())
    }

    /// Pop and coerce to a boolean; see [`Value::as_boolean`].
    pub fn pop_as_boolean(&mut self) -> Result<bool, StackError> {
        Ok(self.pop()?.as_boolean())
    }

    /// Pop and render as display text.
    pub fn pop_as_string(&mut self) -> Result<String, StackError> {
        Ok(match self.pop()? {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    // ---- peek ----

    pub fn top(&self) -> Result<&Value, StackError> {
        self.items.last().ok_or(StackError::underflow(1, 0))
    }

    /// The item at position `n` (1 = top).
    pub fn peek(&self, n: usize) -> Result<&Value, StackError> {
        if n == 0 {
            return Err(StackError::InvalidIndex(0));
        }
        self.need(n)?;
        Ok(&self.items[self.items.len() - n])
    }

    pub fn peek_mut(&mut self, n: usize) -> Result<&mut Value, StackError> {
        if n == 0 {
            return Err(StackError::InvalidIndex(0));
        }
        self.need(n)?;
        let len = self.items.len();
        Ok(&mut self.items[len - n])
    }

    pub fn peek_boolean(&self, n: usize) -> Result<bool, StackError> {
        match self.peek(n)? {
            Value::Boolean(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Boolean, other)),
        }
    }

    pub fn peek_integer(&self, n: usize) -> Result<i64, StackError> {
        match self.peek(n)? {
            Value::Integer(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Integer, other)),
        }
    }

    pub fn peek_double(&self, n: usize) -> Result<f64, StackError> {
        match self.peek(n)? {
            Value::Double(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Double, other)),
        }
    }

    pub fn peek_string(&self, n: usize) -> Result<&str, StackError> {
        match self.peek(n)? {
            Value::String(v) => Ok(v),
            other => Err(mismatch(ValueKind::String, other)),
        }
    }

    pub fn peek_vec3(&self, n: usize) -> Result<Vec3, StackError> {
        match self.peek(n)? {
            Value::Vec3(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Vec3, other)),
        }
    }

    pub fn peek_fraction(&self, n: usize) -> Result<Fraction, StackError> {
        match self.peek(n)? {
            Value::Fraction(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Fraction, other)),
        }
    }

    pub fn peek_timecode(&self, n: usize) -> Result<Timecode, StackError> {
        match self.peek(n)? {
            Value::Timecode(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Timecode, other)),
        }
    }

    pub fn peek_as_double(&self, n: usize) -> Result<f64, StackError> {
        Ok(self.peek(n)?.as_double())
    }

    pub fn peek_as_boolean(&self, n: usize) -> Result<bool, StackError> {
        Ok(self.peek(n)?.as_boolean())
    }

    pub fn peek_as_string(&self, n: usize) -> Result<String, StackError> {
        Ok(self.peek(n)?.to_string())
    }

    // ---- manipulation ----

    pub fn swap(&mut self) -> Result<(), StackError> {
        self.need(2)?;
        let len = self.items.len();
        self.items.swap(len - 1, len - 2);
        Ok(())
    }

    pub fn drop(&mut self) -> Result<(), StackError> {
        self.pop()?;
        Ok(())
    }

    pub fn dropn(&mut self, n: usize) -> Result<(), StackError> {
        self.need(n)?;
        let len = self.items.len();
        self.items.truncate(len - n);
        Ok(())
    }

    /// `1 PICK`.
    pub fn dup(&mut self) -> Result<(), StackError> {
        self.pick(1)
    }

    /// Copy the top `n` items as a block, order preserved.
    pub fn dupn(&mut self, n: usize) -> Result<(), StackError> {
        self.need(n)?;
        self.room(n)?;
        let len = self.items.len();
        self.items.extend_from_within(len - n..);
        Ok(())
    }

    /// `2 PICK`.
    pub fn over(&mut self) -> Result<(), StackError> {
        self.pick(2)
    }

    /// Copy the item at position `n` to the top.
    pub fn pick(&mut self, n: usize) -> Result<(), StackError> {
        let value = self.peek(n)?.clone();
        self.push(value)
    }

    /// Remove the item at position `n`; items above it close the gap.
    pub fn nipn(&mut self, n: usize) -> Result<Value, StackError> {
        if n == 0 {
            return Err(StackError::InvalidIndex(0));
        }
        self.need(n)?;
        let at = self.items.len() - n;
        Ok(self.items.remove(at))
    }

    /// Bottom item moves to the top.
    pub fn rollu(&mut self) -> Result<(), StackError> {
        self.rollun(self.items.len())
    }

    /// Top item moves to the bottom.
    pub fn rolld(&mut self) -> Result<(), StackError> {
        self.rolldn(self.items.len())
    }

    /// Within the top `n`, the deepest item moves to the top.
    pub fn rollun(&mut self, n: usize) -> Result<(), StackError> {
        self.need(n)?;
        if n > 1 {
            let len = self.items.len();
            self.items[len - n..].rotate_left(1);
        }
        Ok(())
    }

    /// Within the top `n`, the top item moves to position `n`.
    pub fn rolldn(&mut self, n: usize) -> Result<(), StackError> {
        self.need(n)?;
        if n > 1 {
            let len = self.items.len();
            self.items[len - n..].rotate_right(1);
        }
        Ok(())
    }

    /// `3 ROLLUN`: `a b c` becomes `b c a`.
    pub fn rotu(&mut self) -> Result<(), StackError> {
        self.rollun(3)
    }

    /// `3 ROLLDN`: `a b c` becomes `c a b`.
    pub fn rotd(&mut self) -> Result<(), StackError> {
        self.rolldn(3)
    }

    /// Insert a copy of the top item just below position `n`.
    ///
    /// `2 TUCKN` is the classic `TUCK`: `a b` becomes `b a b`.
    pub fn tuckn(&mut self, n: usize) -> Result<(), StackError> {
        if n == 0 {
            return Err(StackError::InvalidIndex(0));
        }
        self.need(n)?;
        self.room(1)?;
        let len = self.items.len();
        let top = self.items[len - 1].clone();
        self.items.insert(len - n, top);
        Ok(())
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Reverse the order of the top `n` items.
    pub fn reversen(&mut self, n: usize) -> Result<(), StackError> {
        self.need(n)?;
        let len = self.items.len();
        self.items[len - n..].reverse();
        Ok(())
    }
}
