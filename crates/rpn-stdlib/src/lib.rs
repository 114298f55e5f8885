//! Standard word packages for the RPN interpreter.
//!
//! Each package registers its words through [`Interp::register`] only:
//! - `stack` - DUP, SWAP, ROLLUN, PICK and friends
//! - `logic` - comparisons, IFTE, boolean and bitwise words
//! - `math` - arithmetic, transcendentals, constants, random numbers
//! - `types` - conversions, objects, arrays and vec3 words
//! - `fraction` - rational arithmetic
//! - `timecode` - frame-rate timecodes

use std::rc::Rc;

use rpn_lang::{Interp, Validator, Value, ValueKind, WordDefinition, WordError, WordResult};
use tracing::debug;

pub mod fraction;
pub mod logic;
pub mod math;
pub mod stack;
pub mod timecode;
pub mod types;

/// Register every package, in dependency order.
pub fn register_all(interp: &mut Interp) -> WordResult {
    stack::register(interp)?;
    logic::register(interp)?;
    math::register(interp)?;
    types::register(interp)?;
    fraction::register(interp)?;
    timecode::register(interp)?;
    debug!(words = interp.words().len(), "registered standard packages");
    Ok(())
}

/// Evaluate one line on a fresh interpreter with every package loaded.
///
/// ```
/// use rpn_lang::Value;
///
/// let result = rpn_stdlib::eval("1 2 +").unwrap();
/// assert_eq!(result, vec![Value::Integer(3)]);
/// ```
pub fn eval(source: &str) -> Result<Vec<Value>, WordError> {
    let mut interp = Interp::new();
    register_all(&mut interp)?;
    interp.eval(source)?;
    Ok(interp.stack.as_slice().to_vec())
}

/// Both numeric kinds, for building overload grids.
pub(crate) const NUMBERS: [ValueKind; 2] = [ValueKind::Integer, ValueKind::Double];

/// A shared validator over the given top-first kinds.
pub(crate) fn kinds(kinds: &[ValueKind]) -> Rc<Validator> {
    Rc::new(Validator::kinds(kinds))
}

pub(crate) fn depth(n: usize) -> Rc<Validator> {
    Rc::new(Validator::depth(n))
}

/// A definition whose action needs neither context nor inline text.
pub(crate) fn word(
    validator: &Rc<Validator>,
    action: impl Fn(&mut Interp) -> WordResult + 'static,
) -> WordDefinition {
    WordDefinition::new(validator, move |interp, _, _| action(interp))
}

/// Pop two operands, returned as (next, top).
pub(crate) fn pop_pair(interp: &mut Interp) -> Result<(Value, Value), WordError> {
    let top = interp.stack.pop()?;
    let next = interp.stack.pop()?;
    Ok((next, top))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Render the stack after `source`, bottom to top.
    pub fn rendered(source: &str) -> Vec<String> {
        eval(source)
            .unwrap_or_else(|e| panic!("{source}: {e}"))
            .iter()
            .map(Value::to_string)
            .collect()
    }

    /// The kind of error `source` stops with.
    pub fn error_kind(source: &str) -> rpn_lang::ErrorKind {
        match eval(source) {
            Ok(stack) => panic!("{source}: expected an error, got {stack:?}"),
            Err(e) => e.kind(),
        }
    }

    /// Run `f` under a subscriber that records every event as plain text.
    pub fn captured_logs(f: impl FnOnce()) -> String {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buf);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || LogSink(Arc::clone(&sink)))
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
