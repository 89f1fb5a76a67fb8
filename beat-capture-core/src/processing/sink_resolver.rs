use crate::models::audio_models::DeviceId;
use crate::models::error::CaptureError;
use crate::traits::sink_query::SinkStatusQuery;

/// Finds the sink the audio server currently reports as running.
///
/// Scans the status lines of a `SinkStatusQuery` once, in order, and returns
/// the zero-based index of the first line containing the active marker.
/// Lines after the match are never pulled.
pub struct SinkResolver<Q: SinkStatusQuery> {
    query: Q,
    marker: String,
}

impl<Q: SinkStatusQuery> SinkResolver<Q> {
    pub fn new(query: Q, marker: impl Into<String>) -> Self {
        Self {
            query,
            marker: marker.into(),
        }
    }

    /// Resolve the running sink. Spawns the query, so keep it out of the
    /// per-frame path.
    pub fn resolve(&mut self) -> Result<DeviceId, CaptureError> {
        let lines = self.query.query()?;

        let mut scanned = 0;
        for line in lines {
            let line = line.map_err(|e| {
                CaptureError::DeviceQuery(format!("failed to read sink status: {}", e))
            })?;

            if line.contains(self.marker.as_str()) {
                log::debug!("running sink found at index {}: {}", scanned, line.trim());
                return Ok(DeviceId::from_index(scanned));
            }
            scanned += 1;
        }

        Err(CaptureError::DeviceNotFound { scanned })
    }

    pub fn status_query(&self) -> &Q {
        &self.query
    }
}
