//! Analysis Service connectivity monitoring.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::AnalysisClient;

/// Observable reachability state of the Analysis Service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// A probe is in flight and no verdict has landed yet.
    Checking,
    /// The last probe got a 2xx health response.
    Connected,
    /// The last probe failed or returned a non-2xx status.
    Disconnected,
}

/// Tracks Analysis Service reachability via on-demand health probes.
///
/// Probes may overlap; the state reflects whichever probe wrote last.
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    client: Arc<AnalysisClient>,
    state: Arc<RwLock<ConnectivityState>>,
}

impl ConnectivityMonitor {
    /// Create a monitor in the `Checking` state.
    #[must_use]
    pub fn new(client: Arc<AnalysisClient>) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(ConnectivityState::Checking)),
        }
    }

    /// Current reachability state.
    #[must_use]
    pub fn current(&self) -> ConnectivityState {
        *self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one health probe and record its verdict.
    ///
    /// The state flips to `Checking` while the probe is in flight, then to
    /// `Connected` or `Disconnected` once it resolves.
    pub async fn probe(&self) -> ConnectivityState {
        self.set_state(ConnectivityState::Checking);
        let verdict = match self.client.health().await {
            Ok(()) => {
                info!("analysis service reachable");
                ConnectivityState::Connected
            }
            Err(err) => {
                warn!(error = %err, "analysis service unreachable");
                ConnectivityState::Disconnected
            }
        };
        self.set_state(verdict);
        verdict
    }

    fn set_state(&self, next: ConnectivityState) {
        *self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next;
    }
}
