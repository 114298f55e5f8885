//! Error types for dispatch, evaluation and configuration.

use std::fmt;
use std::path::PathBuf;

use rpn_vm::StackError;
use thiserror::Error;

/// The flat result taxonomy reported to hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed comment, string literal or number.
    ParseError,
    /// Unknown word.
    DictionaryError,
    /// Known word, but no definition accepts the current stack.
    ParamError,
    /// A word's action failed.
    EvalError,
    /// Structural misuse of `:`, `;`, `FOR` or `NEXT`.
    CompileError,
    /// Recognized but unimplemented word.
    ImplementationError,
}

impl ErrorKind {
    /// Outcome text used in status lines.
    pub fn outcome(self) -> &'static str {
        match self {
            ErrorKind::ParseError => "parse error",
            ErrorKind::DictionaryError => "not found",
            ErrorKind::ParamError => "parameter error",
            ErrorKind::EvalError => "eval error",
            ErrorKind::CompileError => "compile error",
            ErrorKind::ImplementationError => "implementation error",
        }
    }

    /// Whether the status line quotes the unparsed remainder.
    pub fn shows_rest(self) -> bool {
        matches!(
            self,
            ErrorKind::ParseError | ErrorKind::EvalError | ErrorKind::CompileError
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.outcome())
    }
}

/// Failure of a single word.
#[derive(Debug, Error)]
pub enum WordError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}: not found")]
    NotFound(String),

    #[error("{0}: no definition matches the stack")]
    Param(String),

    #[error("{0}")]
    Eval(String),

    #[error("{0}")]
    Compile(String),

    /// A word a host recognizes but has not built. No standard word
    /// returns it.
    #[error("{0}: not implemented")]
    Unimplemented(String),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WordError {
    pub fn eval(msg: impl Into<String>) -> Self {
        WordError::Eval(msg.into())
    }

    pub fn compile(msg: impl Into<String>) -> Self {
        WordError::Compile(msg.into())
    }

    pub fn unimplemented(word: impl Into<String>) -> Self {
        WordError::Unimplemented(word.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WordError::Parse(_) => ErrorKind::ParseError,
            WordError::NotFound(_) => ErrorKind::DictionaryError,
            WordError::Param(_) => ErrorKind::ParamError,
            WordError::Eval(_) | WordError::Io { .. } => ErrorKind::EvalError,
            WordError::Compile(_) => ErrorKind::CompileError,
            WordError::Unimplemented(_) => ErrorKind::ImplementationError,
            WordError::Stack(StackError::TypeMismatch { .. }) => ErrorKind::ParamError,
            WordError::Stack(_) => ErrorKind::EvalError,
        }
    }
}

/// Result of evaluating one word.
pub type WordResult = Result<(), WordError>;

/// A failure while running a file, with the 1-based line it happened on.
///
/// `line` is 0 when the file could not be read at all.
#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct FileError {
    pub line: usize,
    #[source]
    pub source: WordError,
}

/// Errors that can occur when loading an interpreter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}
