//! Stack manipulation words.
//!
//! Count-taking words (`DROPN`, `PICK`, ...) read their count from the top
//! of the stack; it does not count toward the depth they need.

use std::rc::Rc;

use rpn_lang::{Interp, Stack, StackError, Validator, WordError, WordResult};
use tracing::info;

use crate::{depth, word};

type StackOp = fn(&mut Stack) -> Result<(), StackError>;
type CountOp = fn(&mut Stack, usize) -> Result<(), StackError>;

fn clear(stack: &mut Stack) -> Result<(), StackError> {
    stack.clear();
    Ok(())
}

fn depth_of(stack: &mut Stack) -> Result<(), StackError> {
    let n = i64::try_from(stack.len()).unwrap_or(i64::MAX);
    stack.push_integer(n)
}

fn reverse(stack: &mut Stack) -> Result<(), StackError> {
    stack.reverse();
    Ok(())
}

fn nipn(stack: &mut Stack, n: usize) -> Result<(), StackError> {
    stack.nipn(n).map(|_| ())
}

/// (name, required depth, operation)
const FIXED: &[(&str, usize, StackOp)] = &[
    ("DROP", 1, Stack::drop),
    ("CLEAR", 0, clear),
    ("DEPTH", 0, depth_of),
    ("SWAP", 2, Stack::swap),
    ("ROLLU", 0, Stack::rollu),
    ("ROLLD", 0, Stack::rolld),
    ("OVER", 2, Stack::over),
    ("DUP", 1, Stack::dup),
    ("ROTU", 3, Stack::rotu),
    ("ROTD", 3, Stack::rotd),
    ("REVERSE", 0, reverse),
];

const COUNTED: &[(&str, CountOp)] = &[
    ("DROPN", Stack::dropn),
    ("DUPN", Stack::dupn),
    ("NIPN", nipn),
    ("PICK", Stack::pick),
    ("ROLLDN", Stack::rolldn),
    ("ROLLUN", Stack::rollun),
    ("TUCKN", Stack::tuckn),
    ("REVERSEN", Stack::reversen),
];

/// Words defined in word source on top of the native ones.
const DEFINITIONS: &[&str] = &[": DUP2 2 DUPN ;", ": DROP2 DROP DROP ;"];

fn counted(op: CountOp) -> impl Fn(&mut Interp) -> WordResult {
    move |interp| {
        let n = interp.stack.pop_integer()?;
        let count = usize::try_from(n).map_err(|_| WordError::eval(format!("bad count {n}")))?;
        if let Err(e) = op(&mut interp.stack, count) {
            interp.stack.push_integer(n)?;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Log the stack as a table, top first, without changing it.
fn show(interp: &mut Interp) -> WordResult {
    let items = interp.stack.as_slice();
    info!(depth = items.len(), ".S");
    for (pos, value) in items.iter().rev().enumerate() {
        info!("{:>4}: {:<10} {}", pos + 1, value.kind(), value);
    }
    Ok(())
}

pub fn register(interp: &mut Interp) -> WordResult {
    for (name, needed, op) in FIXED {
        let op = *op;
        interp.register(*name, word(&depth(*needed), move |i| Ok(op(&mut i.stack)?)));
    }

    let count_on_top = Rc::new(Validator::count_on_top());
    for (name, op) in COUNTED {
        interp.register(*name, word(&count_on_top, counted(*op)));
    }

    interp.register(".S", word(&depth(0), show));

    for line in DEFINITIONS {
        interp.eval(line)?;
    }
    Ok(())
}
