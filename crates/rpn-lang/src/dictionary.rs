//! Word dictionary and dispatch by stack shape.
//!
//! A name maps to one or more definitions. Each definition carries a
//! [`Validator`] that inspects the live stack; lookup returns the first
//! definition, in registration order, whose validator accepts.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use rpn_vm::{CompiledBody, Stack, Value, ValueKind};
use smallvec::SmallVec;

use crate::error::WordResult;
use crate::interp::Interp;

/// Applicability predicate for one definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validator {
    /// The top items have these kinds, top first. `Any` matches anything.
    Kinds(SmallVec<[ValueKind; 4]>),
    /// At least this many items.
    Depth(usize),
    /// The top is a non-negative Integer `n` with at least `n` items below it.
    CountOnTop,
}

impl Validator {
    pub fn kinds(kinds: &[ValueKind]) -> Self {
        Validator::Kinds(kinds.iter().copied().collect())
    }

    pub fn depth(n: usize) -> Self {
        Validator::Depth(n)
    }

    pub fn count_on_top() -> Self {
        Validator::CountOnTop
    }

    /// Test against top-first `types` of `stack`.
    pub fn accepts(&self, types: &[ValueKind], stack: &Stack) -> bool {
        match self {
            Validator::Kinds(expected) => {
                types.len() >= expected.len()
                    && expected.iter().zip(types).all(|(want, got)| want.accepts(*got))
            }
            Validator::Depth(n) => stack.len() >= *n,
            Validator::CountOnTop => match stack.top() {
                Ok(Value::Integer(n)) => usize::try_from(*n).is_ok_and(|n| stack.len() > n),
                _ => false,
            },
        }
    }
}

/// Owning state an action can reach, resolved before the action runs.
#[derive(Clone, Default)]
pub enum WordContext {
    #[default]
    None,
    /// The interpreter itself; core structural words use this.
    Owner,
    /// A user-defined word's captured body.
    Body(Rc<CompiledBody>),
    /// State owned by an extension package.
    Extension(Rc<dyn Any>),
}

impl WordContext {
    pub fn extension(state: impl Any) -> Self {
        WordContext::Extension(Rc::new(state))
    }

    /// Checked access to extension state of type `T`.
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        match self {
            WordContext::Extension(state) => (**state).downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&CompiledBody> {
        match self {
            WordContext::Body(body) => Some(body),
            _ => None,
        }
    }
}

impl fmt::Debug for WordContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordContext::None => write!(f, "None"),
            WordContext::Owner => write!(f, "Owner"),
            WordContext::Body(body) => write!(f, "Body({body})"),
            WordContext::Extension(_) => write!(f, "Extension(..)"),
        }
    }
}

/// A word's behavior: interpreter, context, and the unparsed rest of the line.
///
/// Actions that consume inline syntax (comments, string literals) shorten
/// the rest in place.
pub type WordAction = Rc<dyn Fn(&mut Interp, &WordContext, &mut String) -> WordResult>;

/// One overload of a word.
#[derive(Clone)]
pub struct WordDefinition {
    pub validator: Rc<Validator>,
    pub action: WordAction,
    pub context: WordContext,
}

impl WordDefinition {
    pub fn new(
        validator: &Rc<Validator>,
        action: impl Fn(&mut Interp, &WordContext, &mut String) -> WordResult + 'static,
    ) -> Self {
        Self {
            validator: Rc::clone(validator),
            action: Rc::new(action),
            context: WordContext::None,
        }
    }

    pub fn with_context(mut self, context: WordContext) -> Self {
        self.context = context;
        self
    }

    /// True for definitions installed by `: ... ;`.
    pub fn is_compiled(&self) -> bool {
        matches!(self.context, WordContext::Body(_))
    }
}

impl fmt::Debug for WordDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordDefinition")
            .field("validator", &self.validator)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Name to overloads multi-map.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    words: HashMap<String, Vec<WordDefinition>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an overload. Returns false for an empty name.
    pub fn register(&mut self, name: impl Into<String>, definition: WordDefinition) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        self.words.entry(name).or_default().push(definition);
        true
    }

    /// Drop every overload of `name`.
    pub fn remove(&mut self, name: &str) -> bool {
        self.words.remove(name).is_some()
    }

    /// Drop compiled overloads of `name`, keeping native ones.
    pub fn remove_compiled(&mut self, name: &str) {
        if let Some(defs) = self.words.get_mut(name) {
            defs.retain(|d| !d.is_compiled());
            if defs.is_empty() {
                self.words.remove(name);
            }
        }
    }

    pub fn word_exists(&self, name: &str) -> bool {
        self.words.contains_key(name)
    }

    pub fn definitions(&self, name: &str) -> &[WordDefinition] {
        self.words.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// First overload of `name` whose validator accepts `stack`.
    pub fn lookup(&self, name: &str, stack: &Stack) -> Option<&WordDefinition> {
        let defs = self.words.get(name)?;
        let types = stack.types();
        defs.iter().find(|d| d.validator.accepts(&types, stack))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.words.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
