//! JSON parser error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed JSON at byte {position}: {reason}")]
    Malformed {
        position: usize,
        reason: &'static str,
    },
}

impl ParseError {
    /// Byte offset into the input where parsing stopped.
    pub fn position(&self) -> usize {
        match self {
            Self::Malformed { position, .. } => *position,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::Malformed { reason, .. } => reason,
        }
    }
}
