//! Configuration types shared across orchestrators and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Global configuration for the `Vane` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaneConfig {
    /// Default bound for one provider call when the connector declares no timeout.
    pub provider_timeout: Duration,
    /// Optional bound for the batch request; defaults to the batch connector's
    /// own timeout, then `provider_timeout`.
    pub batch_timeout: Option<Duration>,
}

impl Default for VaneConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            batch_timeout: None,
        }
    }
}
