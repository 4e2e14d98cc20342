// SPDX-License-Identifier: MIT
//
// Error types for color tokens and identifiers.

/// Why a single color token could not be normalized.
///
/// These are local and recoverable: the input adapter drops the offending
/// token and moves on. They only surface as values when a caller parses a
/// token directly with [`crate::notation::parse_token`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty color token")]
    Empty,

    #[error("hex color must have 6 digits, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex digit")]
    InvalidHexDigit,

    #[error("expected 3 components, got {0}")]
    WrongArity(usize),

    #[error("component {0:?} is not a number")]
    NotANumber(String),

    #[error("component {0:?} is not an integer")]
    NotAnInteger(String),

    #[error("component {0:?} is out of range")]
    OutOfRange(String),
}

/// An identifier that names no known color space or notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {name:?}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownName {
    pub(crate) fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}
