//! Captured word bodies produced by `: ... ;` and `FOR ... NEXT`.

use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

/// How a body runs when invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// A named word: run the items once.
    Word,
    /// A counted loop: pop the bounds, then run the items once per pass with
    /// the induction variable bound to the current count.
    ForLoop,
}

/// One element of a body.
#[derive(Clone, Debug, PartialEq)]
pub enum BodyItem {
    /// A token evaluated (or resolved as a local) at run time.
    Word(String),
    /// A nested loop body, owned by its enclosing body.
    Block(CompiledBody),
}

/// A replayable token sequence plus the locals it owns.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledBody {
    kind: BodyKind,
    ident: String,
    items: Vec<BodyItem>,
    locals: BTreeMap<String, Value>,
}

impl CompiledBody {
    pub fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            ident: String::new(),
            items: Vec::new(),
            locals: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// The word name (for [`BodyKind::Word`]) or induction variable (for
    /// [`BodyKind::ForLoop`]); empty until captured.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn set_ident(&mut self, ident: impl Into<String>) {
        self.ident = ident.into();
    }

    pub fn items(&self) -> &[BodyItem] {
        &self.items
    }

    pub fn push_word(&mut self, word: impl Into<String>) {
        self.items.push(BodyItem::Word(word.into()));
    }

    pub fn push_block(&mut self, block: CompiledBody) {
        self.items.push(BodyItem::Block(block));
    }

    pub fn locals(&self) -> &BTreeMap<String, Value> {
        &self.locals
    }

    pub fn locals_mut(&mut self) -> &mut BTreeMap<String, Value> {
        &mut self.locals
    }

    /// True if `name` is this body's identifier or one of its locals.
    pub fn binds(&self, name: &str) -> bool {
        self.ident == name || self.locals.contains_key(name)
    }
}

impl fmt::Display for CompiledBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == BodyKind::ForLoop {
            write!(f, "FOR {} ", self.ident)?;
        }
        write!(f, "<<")?;
        for item in &self.items {
            match item {
                BodyItem::Word(w) => write!(f, " {w}")?,
                BodyItem::Block(b) => write!(f, " {b}")?,
            }
        }
        write!(f, " >>")
    }
}
