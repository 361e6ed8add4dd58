//! Error type shared by the parser, the session and the persistence codec.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaggerError>;

#[derive(Debug, Error)]
pub enum TaggerError {
    /// The subtitle source is structurally malformed. `line` is 1-based.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// No cue survived parsing and sanitization.
    #[error("no dialogue cues left to tag")]
    EmptyInput,

    #[error("no saved session at {}", path.display())]
    NotFound { path: PathBuf },

    /// A saved record exists but cannot be turned back into a session.
    #[error("corrupt session record {}: {reason}", path.display())]
    CorruptRecord { path: PathBuf, reason: String },

    #[error("cue {index} is out of range (session has {len} cues)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TaggerError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
