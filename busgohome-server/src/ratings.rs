//! Service rating book.
//!
//! Riders rate a directional service from 1 to 5. The book keeps a running
//! average per service in memory.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::ServiceKey;

/// Error returned for a rating outside 1..=5.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid rating {0}: must be an integer from 1 to 5")]
pub struct InvalidRating(pub i64);

/// A single rider rating, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, InvalidRating> {
        match value {
            1..=5 => Ok(Rating(value as u8)),
            _ => Err(InvalidRating(value)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Aggregate rating for one service.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

impl RatingSummary {
    /// Fold one more rating into the running average.
    fn add(self, rating: Rating) -> Self {
        let count = self.count + 1;
        let average = (self.average * f64::from(self.count) + f64::from(rating.get())) / f64::from(count);
        Self { average, count }
    }
}

/// Thread-safe rating store.
///
/// Submissions take the write lock for the whole read-modify-write, so
/// concurrent ratings for one service are never lost.
#[derive(Debug, Default)]
pub struct RatingBook {
    inner: RwLock<HashMap<ServiceKey, RatingSummary>>,
}

impl RatingBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current summary for a service; zeros if it has never been rated.
    pub async fn get(&self, service: &ServiceKey) -> RatingSummary {
        let guard = self.inner.read().await;
        guard.get(service).copied().unwrap_or_default()
    }

    /// Record a rating and return the updated summary.
    pub async fn submit(&self, service: &ServiceKey, rating: Rating) -> RatingSummary {
        let mut guard = self.inner.write().await;
        let summary = guard.entry(service.clone()).or_default();
        *summary = summary.add(rating);
        *summary
    }
}
