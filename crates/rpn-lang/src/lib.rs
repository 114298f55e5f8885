//! The RPN word language engine.
//!
//! This crate provides:
//! - `dictionary` - validators, word definitions and dispatch by stack shape
//! - `interp` - the evaluation loop and compile-time state machine
//! - `compiler` - bodies under construction for `:` and `FOR`
//! - `lexer` - word splitting and numeric literals
//! - `config` - TOML interpreter configuration
//!
//! Word packages extend an [`Interp`] only through [`Interp::register`].

mod builtins;
pub mod compiler;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod interp;
pub mod lexer;

pub use compiler::CompilationContext;
pub use config::InterpConfig;
pub use dictionary::{Dictionary, Validator, WordAction, WordContext, WordDefinition};
pub use error::{ConfigError, ErrorKind, FileError, WordError, WordResult};
pub use interp::{DEFAULT_MAX_CALL_DEPTH, Interp, TRACE_TARGET};

// Re-export the value layer for word packages.
pub use rpn_vm::{
    Axis, BodyItem, BodyKind, CompiledBody, Fraction, Stack, StackError, Timecode, Value,
    ValueKind, Vec3,
};
