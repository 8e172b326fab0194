//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (ingestion
//! pipeline, admin tooling) that the
//! [`MoldRiskService`](super::service::MoldRiskService) interprets.

use super::key::RoomKey;
use crate::config::RiskConfig;
use crate::reading::EnvironmentalReading;

/// Commands that external adapters can send into the service.
#[derive(Debug, Clone)]
pub enum RiskCommand {
    /// Apply one sensor reading to a room's state.
    ProcessReading {
        key: RoomKey,
        reading: EnvironmentalReading,
    },

    /// Forget a room's accumulated state.
    ResetState(RoomKey),

    /// Hot-reload configuration.
    UpdateConfig(RiskConfig),
}
