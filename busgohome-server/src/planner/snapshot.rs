//! Current route data snapshot.
//!
//! The network and the graph built from it are swapped together as one
//! immutable [`Snapshot`]. Readers clone the `Arc` and drop the lock, so a
//! solve in flight keeps the snapshot it started with.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::network::RouteNetwork;

use super::graph::{GraphError, RouteGraph};

/// Route data and the graph built from it.
#[derive(Debug)]
pub struct Snapshot {
    pub network: RouteNetwork,
    pub graph: RouteGraph,
}

impl Snapshot {
    /// Build the graph for a network.
    pub fn build(network: RouteNetwork) -> Result<Self, GraphError> {
        let graph = RouteGraph::build(&network)?;
        Ok(Self { network, graph })
    }
}

/// Holder of the current snapshot.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    /// Create a store from an initial network.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if the network's route data is malformed.
    pub fn new(network: RouteNetwork) -> Result<Self, GraphError> {
        let snapshot = Snapshot::build(network)?;
        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Returns the current snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        // The lock only guards a pointer swap, so a poisoned lock still
        // holds a complete snapshot
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot with one built from `network`.
    ///
    /// The graph is built before the swap. On failure the previous snapshot
    /// stays in place.
    pub fn replace(&self, network: RouteNetwork) -> Result<(), GraphError> {
        let snapshot = match Snapshot::build(network) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Keeping previous route snapshot");
                return Err(e);
            }
        };

        info!(
            stops = snapshot.network.stop_count(),
            services = snapshot.network.service_count(),
            nodes = snapshot.graph.node_count(),
            edges = snapshot.graph.edge_count(),
            "Replaced route snapshot"
        );

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
        Ok(())
    }
}
