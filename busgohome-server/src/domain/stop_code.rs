//! Bus stop code type.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Longest stop code accepted.
const MAX_LEN: usize = 16;

/// Error returned when parsing an invalid bus stop code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bus stop code: {reason}")]
pub struct InvalidStopCode {
    reason: &'static str,
}

/// A bus stop code, e.g. `"95099"`.
///
/// Stop codes are non-empty runs of ASCII letters and digits. Any `StopCode`
/// value is valid by construction, and cloning one is cheap.
///
/// # Examples
///
/// ```
/// use busgohome_server::domain::StopCode;
///
/// let code = StopCode::parse("95099").unwrap();
/// assert_eq!(code.as_str(), "95099");
///
/// // Separators and whitespace are rejected
/// assert!(StopCode::parse("950-99").is_err());
/// assert!(StopCode::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopCode(Arc<str>);

impl StopCode {
    /// Parse a stop code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopCode> {
        if s.is_empty() {
            return Err(InvalidStopCode {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidStopCode {
                reason: "must be at most 16 characters",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStopCode {
                reason: "must contain only ASCII letters and digits",
            });
        }

        Ok(StopCode(Arc::from(s)))
    }

    /// Returns the stop code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopCode {
    type Error = InvalidStopCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StopCode::parse(&value)
    }
}

impl From<StopCode> for String {
    fn from(value: StopCode) -> Self {
        value.0.to_string()
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.as_str())
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
