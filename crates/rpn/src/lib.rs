//! RPN: an embeddable stack-based word interpreter.
//!
//! [`Session`] is an [`Interp`] with the standard word packages and a
//! configuration applied. It is the entry point used by the `rpn` binary.
//!
//! # Example
//!
//! ```
//! use rpn::{Session, Value};
//!
//! let mut session = Session::new().unwrap();
//! session.eval(": SQ3 DUP DUP * * ;").unwrap();
//! let stack = session.eval("3 SQ3").unwrap();
//! assert_eq!(stack, vec![Value::Integer(27)]);
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::debug;

pub use rpn_lang::{
    ConfigError, ErrorKind, FileError, Interp, InterpConfig, TRACE_TARGET, WordError,
    WordResult,
};
pub use rpn_vm::{Stack, Value, ValueKind};

/// Errors surfaced by a [`Session`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// A line stopped at a failing word; `status` is the interpreter status.
    #[error("{status}")]
    Eval { kind: ErrorKind, status: String },

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Prelude line `index` (0-based) failed with `status`.
    #[error("prelude line {index}: {status}")]
    Prelude { index: usize, status: String },

    /// A word package failed to register.
    #[error("registering packages: {0}")]
    Package(WordError),
}

impl SessionError {
    /// The taxonomy kind, where the error came from evaluation.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SessionError::Eval { kind, .. } => Some(*kind),
            SessionError::File(e) => Some(e.source.kind()),
            _ => None,
        }
    }
}

/// An interpreter with every standard package registered.
pub struct Session {
    interp: Interp,
}

impl Session {
    /// Create a session with the default configuration.
    pub fn new() -> Result<Self, SessionError> {
        Self::with_config(&InterpConfig::default())
    }

    /// Create a session: apply limits and trace state, register the
    /// packages, then evaluate the prelude in order.
    pub fn with_config(config: &InterpConfig) -> Result<Self, SessionError> {
        let mut interp = Interp::new();
        interp.apply_config(config);
        rpn_stdlib::register_all(&mut interp).map_err(SessionError::Package)?;

        for (index, line) in config.prelude.iter().enumerate() {
            if interp.eval(line).is_err() {
                return Err(SessionError::Prelude {
                    index,
                    status: interp.status().to_string(),
                });
            }
        }
        debug!(
            words = interp.words().len(),
            prelude = config.prelude.len(),
            "session ready"
        );
        Ok(Self { interp })
    }

    /// Load a TOML config from `path` and create a session from it.
    pub fn from_config_file(path: &Path) -> Result<Self, SessionError> {
        Self::with_config(&InterpConfig::from_file(path)?)
    }

    /// Evaluate one line and return the whole stack, bottom to top.
    ///
    /// On failure the stack keeps whatever the words before the failing
    /// one left there.
    pub fn eval(&mut self, line: &str) -> Result<Vec<Value>, SessionError> {
        match self.interp.eval(line) {
            Ok(()) => Ok(self.stack().as_slice().to_vec()),
            Err(e) => Err(SessionError::Eval {
                kind: e.kind(),
                status: self.interp.status().to_string(),
            }),
        }
    }

    /// Evaluate a file line by line.
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<Value>, SessionError> {
        self.interp.parse_file(path)?;
        Ok(self.stack().as_slice().to_vec())
    }

    pub fn status(&self) -> &str {
        self.interp.status()
    }

    pub fn stack(&self) -> &Stack {
        &self.interp.stack
    }

    pub fn interp(&self) -> &Interp {
        &self.interp
    }

    pub fn interp_mut(&mut self) -> &mut Interp {
        &mut self.interp
    }
}
