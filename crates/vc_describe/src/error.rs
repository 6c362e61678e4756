use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::describe::ScalarKind;

// -----------------------------------------------------------------------------
// Found

/// What the reader saw where it expected something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Char(char),
    End,
}

impl From<Option<char>> for Found {
    #[inline]
    fn from(value: Option<char>) -> Self {
        value.map_or(Self::End, Self::Char)
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "`{c}`"),
            Self::End => f.write_str("end of input"),
        }
    }
}

// -----------------------------------------------------------------------------
// ReadError

/// A failed read.
///
/// Offsets are byte offsets into the input. A failed read leaves the target
/// partially updated: members consumed before the failure keep their new
/// values.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ReadError {
    #[error("expected `{expected}` at offset {offset}, found {found}")]
    Expected {
        expected: char,
        found: Found,
        offset: usize,
    },

    #[error("expected a number at offset {offset}, found {found}")]
    ExpectedNumber { found: Found, offset: usize },

    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("escape sequences are not supported (offset {offset})")]
    EscapeSequence { offset: usize },

    #[error("`{text}` at offset {offset} is not a valid {kind}")]
    InvalidNumber {
        kind: ScalarKind,
        text: String,
        offset: usize,
    },

    #[error("unknown member `{name}` on `{record}`")]
    UnknownMember { name: String, record: &'static str },

    #[error("trailing characters at offset {offset}")]
    TrailingCharacters { offset: usize },
}

// -----------------------------------------------------------------------------
// WriteError

/// A failed write.
///
/// Writes driven by [`write`](crate::write) only fail when the output
/// fails; the structural variants report misuse of a [`Serializer`] by
/// hand-written event sequences.
///
/// [`Serializer`]: crate::Serializer
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteError {
    #[error("failed to write to the output")]
    Fmt(#[from] fmt::Error),

    #[cfg(feature = "std")]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("map keys must be strings, found a {0}")]
    NonStringKey(&'static str),

    #[error("`{0}` does not match the innermost open container")]
    Unbalanced(&'static str),

    #[error("map closed after a key without a value")]
    DanglingKey,

    #[error("{0} container(s) left open")]
    Unclosed(usize),
}

#[cfg(test)]
mod tests {
    use super::{Found, ReadError};
    use alloc::string::{String, ToString};

    #[test]
    fn messages() {
        let err = ReadError::Expected {
            expected: ':',
            found: Found::Char(','),
            offset: 7,
        };
        assert_eq!(err.to_string(), "expected `:` at offset 7, found `,`");

        let err = ReadError::UnknownMember {
            name: String::from("unknown"),
            record: "Foo",
        };
        assert_eq!(err.to_string(), "unknown member `unknown` on `Foo`");

        assert_eq!(Found::from(None).to_string(), "end of input");
    }
}
