//! Error types for the persistence boundary
//!
//! The simulation itself never fails: bad numbers are coerced and crashes are
//! game states, not errors. Only the key-value store can report problems, and
//! callers log and swallow them.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No storage backend (private mode, storage disabled, no window)
    Unavailable,
    /// The backend rejected the operation (quota exceeded, security error)
    Backend(String),
    /// A stored value could not be decoded
    Malformed { key: String, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Backend(msg) => write!(f, "storage backend error: {msg}"),
            Self::Malformed { key, reason } => {
                write!(f, "malformed value under '{key}': {reason}")
            }
        }
    }
}

impl std::error::Error for StoreError {}
