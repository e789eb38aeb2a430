//! src/error.rs
//! Errors raised while parsing or applying a vmodule configuration.

use std::num::ParseIntError;

use logging::FormatError;
use thiserror::Error;

/// Error returned when a verbosity, override string or format is invalid.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum VmoduleError {
    /// The global verbosity is not a base-10 integer.
    #[error("invalid verbosity {input:?}: {source}")]
    InvalidVerbosity {
        /// The rejected text.
        input: String,
        /// Why the integer did not parse.
        source: ParseIntError,
    },
    /// One `name=level` item of the override string has a bad level.
    #[error("invalid vmodule item {item:?}: level {level:?} is not an integer ({source})")]
    InvalidOverride {
        /// The complete item as written.
        item: String,
        /// Category named by the item.
        category: String,
        /// Level text following the first `=`.
        level: String,
        /// Why the level did not parse.
        source: ParseIntError,
    },
    /// The record template does not parse.
    #[error("invalid log format: {0}")]
    Format(#[from] FormatError),
}

impl VmoduleError {
    /// Returns the override item that failed, if this error came from one.
    #[must_use]
    pub fn item(&self) -> Option<&str> {
        match self {
            Self::InvalidOverride { item, .. } => Some(item),
            _ => None,
        }
    }
}
