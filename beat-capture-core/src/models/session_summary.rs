use serde::{Deserialize, Serialize};

use super::audio_models::DeviceId;

/// Returned by the `stop()` call that actually tore a session down.
///
/// Serializable for JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub device: DeviceId,
    pub started_at: String,
    pub stopped_at: String,
    pub pulses: u64,
    pub read_failures: u64,
}

/// Identity and start time of a connected session.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SessionInfo {
    pub id: String,
    pub device: DeviceId,
    pub started_at: String,
}

impl SessionInfo {
    pub fn new(device: DeviceId) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            device,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn finish(self, pulses: u64, read_failures: u64) -> SessionSummary {
        SessionSummary {
            id: self.id,
            device: self.device,
            started_at: self.started_at,
            stopped_at: chrono::Utc::now().to_rfc3339(),
            pulses,
            read_failures,
        }
    }
}
