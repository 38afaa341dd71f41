//! Error types for red.

use std::fmt;
use std::io;

/// Result type alias for red operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for red operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal or input operations.
    Io(io::Error),
    /// Insert position lies outside `[0, len]` of the current document.
    PositionNotFound { pos: usize, len: usize },
    /// Insert position splits a multi-byte UTF-8 character.
    NotCharBoundary { pos: usize },
    /// Input listener started without an input source.
    EmptyInputSource,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::PositionNotFound { pos, len } => {
                write!(
                    f,
                    "couldn't find piece in which to insert: position {pos} outside document of length {len}"
                )
            }
            Self::NotCharBoundary { pos } => {
                write!(f, "position {pos} is not on a character boundary")
            }
            Self::EmptyInputSource => write!(f, "no input source configured"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
