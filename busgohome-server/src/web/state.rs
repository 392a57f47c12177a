//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::{PlannerConfig, SnapshotStore};
use crate::ratings::RatingBook;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current route data and graph
    pub snapshot: Arc<SnapshotStore>,

    /// Service ratings
    pub ratings: Arc<RatingBook>,

    /// Journey planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(snapshot: Arc<SnapshotStore>, ratings: RatingBook, config: PlannerConfig) -> Self {
        Self {
            snapshot,
            ratings: Arc::new(ratings),
            config: Arc::new(config),
        }
    }
}
