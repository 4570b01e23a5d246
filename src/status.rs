//! First-line status parsing.
//!
//! The smoke-test suite reports its result as the first whitespace-delimited
//! token of its first output line, e.g. `0 all tests passed` or
//! `3 failures: test_auth ...`. The token must be an integer in the process
//! exit-code range; anything else is surfaced as a tagged error so the
//! caller can fail loudly instead of defaulting to success.

use std::fmt;

/// Why a captured output could not be read as a status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// The suite produced no output at all.
    Empty,
    /// The first token of `line` is not an integer.
    NotNumeric { line: String },
    /// The token parsed but falls outside the valid exit-code range (0–255).
    OutOfRange { value: i64, line: String },
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no status line: suite produced no output"),
            Self::NotNumeric { line } => {
                write!(f, "no status token in first line: {line:?}")
            }
            Self::OutOfRange { value, line } => {
                write!(f, "status {value} out of exit-code range in: {line:?}")
            }
        }
    }
}

impl std::error::Error for StatusError {}

/// Parse the suite's reported status from its captured output.
///
/// Takes the first line, splits on whitespace, and reads the first token as
/// an integer in `0..=255`.
///
/// # Errors
///
/// Returns [`StatusError::Empty`] for empty output, [`StatusError::NotNumeric`]
/// when the first line carries no integer token, and
/// [`StatusError::OutOfRange`] when the token is an integer but not a valid
/// process exit code.
pub fn parse_reported_status(output: &str) -> Result<i32, StatusError> {
    if output.is_empty() {
        return Err(StatusError::Empty);
    }
    let line = output.lines().next().unwrap_or_default();
    let Some(token) = line.split_whitespace().next() else {
        return Err(StatusError::NotNumeric {
            line: line.to_string(),
        });
    };

    if let Ok(code) = token.parse::<u8>() {
        return Ok(i32::from(code));
    }
    match token.parse::<i64>() {
        Ok(value) => Err(StatusError::OutOfRange {
            value,
            line: line.to_string(),
        }),
        Err(_) => Err(StatusError::NotNumeric {
            line: line.to_string(),
        }),
    }
}
