//! Bus service identity types.
//!
//! A bus service number alone does not identify a route: most services run
//! in two directions with different stop sequences. [`ServiceKey`] pairs the
//! two as a structured value. Keys are never flattened into one string,
//! since `"3" + "31"` and `"33" + "1"` would collide.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::StopCode;

/// Longest service number accepted.
const MAX_SERVICE_LEN: usize = 8;

/// Error returned when parsing an invalid service number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid service number: {reason}")]
pub struct InvalidServiceNo {
    reason: &'static str,
}

/// Error returned when parsing an invalid direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction {value}: must be 1 or 2")]
pub struct InvalidDirection {
    value: i64,
}

/// Error returned when parsing a `service-direction` pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidServiceKey {
    #[error("expected SERVICE-DIRECTION, got {0:?}")]
    MissingSeparator(String),

    #[error(transparent)]
    ServiceNo(#[from] InvalidServiceNo),

    #[error(transparent)]
    Direction(#[from] InvalidDirection),

    #[error("direction is not a number: {0:?}")]
    DirectionNotNumeric(String),
}

/// A bus service number such as `"10"`, `"10e"` or `"NR1"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceNo(Arc<str>);

impl ServiceNo {
    /// Parse a service number: 1 to 8 ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidServiceNo> {
        if s.is_empty() {
            return Err(InvalidServiceNo {
                reason: "must not be empty",
            });
        }
        if s.len() > MAX_SERVICE_LEN {
            return Err(InvalidServiceNo {
                reason: "must be at most 8 characters",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidServiceNo {
                reason: "must contain only ASCII letters and digits",
            });
        }
        Ok(ServiceNo(Arc::from(s)))
    }

    /// Returns the service number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceNo {
    type Error = InvalidServiceNo;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ServiceNo::parse(&value)
    }
}

impl From<ServiceNo> for String {
    fn from(value: ServiceNo) -> Self {
        value.0.to_string()
    }
}

impl fmt::Debug for ServiceNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceNo({})", self.as_str())
    }
}

impl fmt::Display for ServiceNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of travel along a service: 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Direction(u8);

impl Direction {
    /// Validate a numeric direction.
    pub fn new(value: i64) -> Result<Self, InvalidDirection> {
        match value {
            1 | 2 => Ok(Direction(value as u8)),
            _ => Err(InvalidDirection { value }),
        }
    }

    /// Returns the direction as a number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Direction::new(value)
    }
}

impl From<Direction> for u8 {
    fn from(value: Direction) -> Self {
        value.0
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directional bus route: (service number, direction).
///
/// # Examples
///
/// ```
/// use busgohome_server::domain::ServiceKey;
///
/// let key = ServiceKey::parse("10e-2").unwrap();
/// assert_eq!(key.service_no.as_str(), "10e");
/// assert_eq!(key.direction.get(), 2);
/// assert_eq!(key.to_string(), "10e-2");
///
/// // "3"+"31" and "33"+"1" stay distinct
/// assert_ne!(ServiceKey::parse("3-1").unwrap(), ServiceKey::parse("33-1").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey {
    pub service_no: ServiceNo,
    pub direction: Direction,
}

impl ServiceKey {
    /// Create a key from validated parts.
    pub fn new(service_no: ServiceNo, direction: Direction) -> Self {
        Self {
            service_no,
            direction,
        }
    }

    /// Parse the `SERVICE-DIRECTION` form used in URLs, e.g. `"189-1"`.
    pub fn parse(s: &str) -> Result<Self, InvalidServiceKey> {
        let (service, direction) = s
            .rsplit_once('-')
            .ok_or_else(|| InvalidServiceKey::MissingSeparator(s.to_string()))?;

        let service_no = ServiceNo::parse(service)?;
        let direction: i64 = direction
            .parse()
            .map_err(|_| InvalidServiceKey::DirectionNotNumeric(direction.to_string()))?;
        let direction = Direction::new(direction)?;

        Ok(Self::new(service_no, direction))
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.service_no, self.direction)
    }
}

/// Descriptive metadata for a directional bus service.
#[derive(Debug, Clone, PartialEq)]
pub struct BusService {
    pub key: ServiceKey,
    pub operator: String,
    pub category: String,
    pub origin_code: StopCode,
    pub destination_code: StopCode,
    /// Non-empty for loop services, e.g. "Raffles Blvd".
    pub loop_desc: String,
}
