//! Errors raised by the Huffman codec.
//!
//! Every failure is a contract violation between the pieces of one run
//! (a table built from one input used against another, a corrupt bit stream),
//! so nothing here is retried or recovered in place.

use std::io;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    /// The tree builder was handed something it cannot build from,
    /// such as an empty frequency table.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    /// A symbol being encoded has no entry in the code table.
    #[error("no code for symbol {symbol}")]
    MissingCode { symbol: String },
    /// The bit stream holds a non-binary digit or ends in the middle of a code.
    #[error("malformed stream: {reason}")]
    MalformedStream { reason: String },
}

impl HuffmanError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_code(symbol: &impl std::fmt::Debug) -> Self {
        Self::MissingCode {
            symbol: format!("{:?}", symbol),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedStream {
            reason: reason.into(),
        }
    }
}

/// Lets callers working with `io::Result` propagate codec failures with `?`.
impl From<HuffmanError> for io::Error {
    fn from(err: HuffmanError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
