//! The interpreter: evaluation loop and compile-time state machine.
//!
//! Each word of a line is either pushed as a literal, appended to the body
//! under construction (while compiling), or dispatched through the run-time
//! dictionary against the live stack.

use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use rpn_vm::{BodyItem, BodyKind, CompiledBody, Stack, StackError, Value};
use tracing::{debug, info, warn};

use crate::builtins;
use crate::compiler::CompilationContext;
use crate::config::InterpConfig;
use crate::dictionary::{Dictionary, Validator, WordContext, WordDefinition};
use crate::error::{ErrorKind, FileError, WordError, WordResult};
use crate::lexer;

/// Target for per-word trace events enabled by `TRACE`.
pub const TRACE_TARGET: &str = "rpn::trace";

/// Default nesting limit for compiled-word calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Word that introduces a string literal; compiled bodies store the
/// literal text as the item after it.
pub(crate) const STRING_WORD: &str = ".\"";

/// An interpreter instance: one stack and its dictionaries.
pub struct Interp {
    /// The data stack, exposed so word actions can work on it directly.
    pub stack: Stack,
    runtime: Dictionary,
    compile_time: Dictionary,
    compiler: CompilationContext,
    /// Local scopes of running bodies, innermost last.
    scopes: Vec<BTreeMap<String, Value>>,
    tracing: bool,
    status: String,
    call_depth: usize,
    max_call_depth: usize,
    compiled_validator: Rc<Validator>,
}

impl Default for Interp {
    fn default() -> Self {
        Self::new()
    }
}

impl Interp {
    /// Create an interpreter with only the core structural words.
    pub fn new() -> Self {
        let mut interp = Self {
            stack: Stack::new(),
            runtime: Dictionary::new(),
            compile_time: Dictionary::new(),
            compiler: CompilationContext::new(),
            scopes: Vec::new(),
            tracing: false,
            status: String::new(),
            call_depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            compiled_validator: Rc::new(Validator::depth(0)),
        };
        builtins::register(&mut interp);
        interp
    }

    pub fn with_config(config: &InterpConfig) -> Self {
        let mut interp = Self::new();
        interp.apply_config(config);
        interp
    }

    /// Apply limits and the initial trace state. The prelude is left to
    /// the caller, which usually registers word packages first.
    pub fn apply_config(&mut self, config: &InterpConfig) {
        self.stack.set_max_size(config.max_stack_depth);
        self.max_call_depth = config.max_call_depth;
        self.tracing = config.trace;
    }

    // ---- registration ----

    /// Add a run-time overload for `name`.
    pub fn register(&mut self, name: impl Into<String>, definition: WordDefinition) -> bool {
        self.runtime.register(name, definition)
    }

    pub(crate) fn register_compile_time(
        &mut self,
        name: impl Into<String>,
        definition: WordDefinition,
    ) -> bool {
        self.compile_time.register(name, definition)
    }

    /// Remove every run-time overload of `name`.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.runtime.remove(name)
    }

    pub fn word_exists(&self, name: &str) -> bool {
        self.runtime.word_exists(name)
    }

    /// True if some overload of `name` accepts the current stack.
    pub fn validates(&self, name: &str) -> bool {
        self.runtime.lookup(name, &self.stack).is_some()
    }

    /// Run-time word names, sorted.
    pub fn words(&self) -> Vec<String> {
        self.runtime.names().into_iter().map(str::to_string).collect()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.runtime
    }

    // ---- state ----

    /// Summary of the last evaluated word.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_compiling(&self) -> bool {
        self.compiler.is_active()
    }

    pub fn is_tracing(&self) -> bool {
        self.tracing
    }

    pub fn set_tracing(&mut self, on: bool) {
        self.tracing = on;
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    pub fn set_max_call_depth(&mut self, depth: usize) {
        self.max_call_depth = depth;
    }

    /// Value of the innermost visible local called `name`.
    pub fn lookup_local(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    // ---- evaluation ----

    /// Evaluate one line. Stops at the first failing word.
    pub fn eval(&mut self, line: &str) -> WordResult {
        self.parse(line)
    }

    /// Evaluate one line, then hand the result and status to `done`.
    pub fn eval_with(&mut self, line: &str, done: impl FnOnce(WordResult, &str)) {
        let result = self.parse(line);
        done(result, &self.status);
    }

    /// Split `line` into words and evaluate each until one fails; the rest
    /// of the line is discarded.
    pub fn parse(&mut self, line: &str) -> WordResult {
        let mut rest = line.to_string();
        loop {
            let word = lexer::next_word(&mut rest);
            if word.is_empty() {
                return Ok(());
            }
            if let Err(e) = self.eval_word(&word, &mut rest) {
                debug!(status = %self.status, error = %e, "evaluation failed");
                return Err(e);
            }
        }
    }

    /// Evaluate a file line by line, stopping at the first failing line.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FileError {
            line: 0,
            source: WordError::Io {
                path: path.to_owned(),
                source,
            },
        })?;

        for (index, line) in text.lines().enumerate() {
            if let Err(source) = self.parse(line) {
                warn!(
                    path = %path.display(),
                    line = index + 1,
                    status = %self.status,
                    "file evaluation stopped"
                );
                return Err(FileError {
                    line: index + 1,
                    source,
                });
            }
        }
        Ok(())
    }

    /// Evaluate a single word. `rest` is the unparsed remainder of the
    /// line; inline syntax consumes from it.
    pub fn eval_word(&mut self, word: &str, rest: &mut String) -> WordResult {
        if word.is_empty() {
            return Ok(());
        }
        if self.tracing {
            info!(target: TRACE_TARGET, word, rest = rest.as_str(), "eval");
        }

        let result = if self.compiler.is_active() {
            self.compile_word(word, rest)
        } else {
            self.run_word(word, rest)
        };

        if result.is_err() && self.compiler.is_active() {
            self.compiler.unwind();
        }
        self.status = status_line(word, &result, rest);
        if self.tracing {
            info!(target: TRACE_TARGET, status = self.status.as_str(), "done");
        }
        if let Err(e) = &result
            && e.kind() == ErrorKind::ParseError
        {
            rest.clear();
        }
        result
    }

    fn run_word(&mut self, word: &str, rest: &mut String) -> WordResult {
        if let Some(value) = lexer::parse_number(word)? {
            self.stack.push(value)?;
            return Ok(());
        }
        let Some(def) = self.runtime.lookup(word, &self.stack).cloned() else {
            return Err(if self.runtime.word_exists(word) {
                WordError::Param(word.to_string())
            } else {
                WordError::NotFound(word.to_string())
            });
        };
        (def.action)(self, &def.context, rest)
    }

    fn compile_word(&mut self, word: &str, rest: &mut String) -> WordResult {
        if self.compiler.needs_ident() {
            return self.capture_ident(word);
        }
        if let Some(def) = self.compile_time.lookup(word, &self.stack).cloned() {
            return (def.action)(self, &def.context, rest);
        }
        let known = lexer::parse_number(word)?.is_some()
            || self.compiler.is_local(word)
            || self.runtime.word_exists(word);
        if !known {
            return Err(WordError::NotFound(word.to_string()));
        }
        self.append(word);
        Ok(())
    }

    fn capture_ident(&mut self, word: &str) -> WordResult {
        if lexer::is_number(word) || self.compile_time.word_exists(word) {
            return Err(WordError::compile(format!("'{word}' cannot be used as a name")));
        }
        if let Some(frame) = self.compiler.current_mut() {
            frame.set_ident(word);
        }
        Ok(())
    }

    fn append(&mut self, word: &str) {
        if let Some(frame) = self.compiler.current_mut() {
            frame.push_word(word);
        }
    }

    // ---- structural words ----

    pub(crate) fn begin_definition(&mut self) -> WordResult {
        self.compiler.begin(BodyKind::Word);
        Ok(())
    }

    pub(crate) fn begin_loop(&mut self) -> WordResult {
        self.compiler.begin(BodyKind::ForLoop);
        Ok(())
    }

    /// `;`: install the finished body as a run-time word, replacing earlier
    /// compiled definitions of the same name.
    pub(crate) fn end_definition(&mut self) -> WordResult {
        if self.compiler.innermost_kind() != Some(BodyKind::Word) {
            return Err(WordError::compile("; without matching :"));
        }
        let Some(body) = self.compiler.finish() else {
            return Err(WordError::compile("; without matching :"));
        };
        let name = body.ident().to_string();
        debug!(word = %name, body = %body, "defined word");

        self.runtime.remove_compiled(&name);
        let definition = WordDefinition::new(&self.compiled_validator, |interp, ctx, _| {
            match ctx.body() {
                Some(body) => interp.run_compiled(body),
                None => Err(WordError::eval("compiled word has no body")),
            }
        })
        .with_context(WordContext::Body(Rc::new(body)));
        self.runtime.register(name, definition);
        Ok(())
    }

    /// `NEXT`: close the innermost loop and either run it now or nest it in
    /// the enclosing body.
    pub(crate) fn end_loop(&mut self) -> WordResult {
        if self.compiler.innermost_kind() != Some(BodyKind::ForLoop) {
            return Err(WordError::compile("NEXT without matching FOR"));
        }
        let Some(block) = self.compiler.finish() else {
            return Err(WordError::compile("NEXT without matching FOR"));
        };
        match self.compiler.current_mut() {
            Some(outer) => {
                outer.push_block(block);
                Ok(())
            }
            None => self.run_loop(&block),
        }
    }

    /// Append a string literal as two items so it is pushed at run time.
    pub(crate) fn append_literal(&mut self, literal: String) {
        if let Some(frame) = self.compiler.current_mut() {
            frame.push_word(STRING_WORD);
            frame.push_word(literal);
        }
    }

    // ---- running bodies ----

    /// Run a body according to its kind.
    pub fn run_body(&mut self, body: &CompiledBody) -> WordResult {
        match body.kind() {
            BodyKind::Word => self.run_compiled(body),
            BodyKind::ForLoop => self.run_loop(body),
        }
    }

    /// Run a user-defined word's body in a fresh scope chain, so the
    /// callee never sees the caller's locals.
    pub fn run_compiled(&mut self, body: &CompiledBody) -> WordResult {
        if self.call_depth >= self.max_call_depth {
            return Err(WordError::eval(format!(
                "{}: call depth limit {} exceeded",
                body.ident(),
                self.max_call_depth
            )));
        }
        self.call_depth += 1;
        let saved = std::mem::take(&mut self.scopes);
        self.scopes.push(body.locals().clone());

        let result = self.run_items(body);

        self.scopes = saved;
        self.call_depth -= 1;
        result
    }

    /// Pop `end` then `start` and run the body once per count in
    /// `start..end`, with the induction variable bound to the count.
    fn run_loop(&mut self, block: &CompiledBody) -> WordResult {
        let depth = self.stack.len();
        if depth < 2 {
            return Err(StackError::underflow(2, depth).into());
        }
        if !(self.stack.peek(1)?.is_number() && self.stack.peek(2)?.is_number()) {
            return Err(WordError::Param("FOR".to_string()));
        }
        // Infinite or NaN bounds never terminate.
        let bounds = [self.stack.peek_as_double(1)?, self.stack.peek_as_double(2)?];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(WordError::Param("FOR".to_string()));
        }
        let end = self.stack.pop_as_double()?;
        let start = self.stack.pop_as_double()?;

        self.scopes.push(block.locals().clone());
        let result = self.loop_passes(block, start, end);
        self.scopes.pop();
        result
    }

    fn loop_passes(&mut self, block: &CompiledBody, start: f64, end: f64) -> WordResult {
        let mut i = start;
        while i < end {
            if let Some(scope) = self.scopes.last_mut() {
                scope.insert(block.ident().to_string(), Value::Double(i));
            }
            self.run_items(block)?;
            let next = i + 1.0;
            if next <= i {
                return Err(WordError::eval(format!("FOR: counter cannot step past {i}")));
            }
            i = next;
        }
        Ok(())
    }

    fn run_items(&mut self, body: &CompiledBody) -> WordResult {
        let mut items = body.items().iter();
        while let Some(item) = items.next() {
            match item {
                BodyItem::Block(block) => self.run_body(block)?,
                BodyItem::Word(word) if word == STRING_WORD => {
                    let Some(BodyItem::Word(literal)) = items.next() else {
                        return Err(WordError::compile("string literal missing from body"));
                    };
                    let mut rest = format!("{literal}\"");
                    self.eval_word(word, &mut rest)?;
                }
                BodyItem::Word(word) => {
                    if let Some(value) = self.lookup_local(word).cloned() {
                        self.stack.push(value)?;
                        continue;
                    }
                    self.eval_word(word, &mut String::new())?;
                }
            }
        }
        Ok(())
    }
}

fn status_line(word: &str, result: &WordResult, rest: &str) -> String {
    let Err(e) = result else {
        return format!("{word}: ok");
    };
    let kind = e.kind();
    let rest = rest.trim();
    if kind.shows_rest() && !rest.is_empty() {
        format!("{word}: {} '{rest}'", kind.outcome())
    } else {
        format!("{word}: {}", kind.outcome())
    }
}
