use thiserror::Error;

use super::state::DriverState;

/// Errors that can occur while locating, opening or reading a capture stream.
///
/// `Read` is the only recoverable variant: the driver reports it and keeps
/// pulsing. Everything raised from `start()` is fatal to that start attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("no running sink found (scanned {scanned} sink status lines)")]
    DeviceNotFound { scanned: usize },

    #[error("sink status query failed: {0}")]
    DeviceQuery(String),

    #[error("couldn't connect to audio server (code {code}): {message}")]
    Connection { code: i32, message: String },

    #[error("error reading from audio server (code {code}): {message}")]
    Read { code: i32, message: String },

    #[error("{operation}() is not valid in the {state:?} state")]
    InvalidState {
        operation: &'static str,
        state: DriverState,
    },

    #[error("configuration failed: {0}")]
    Configuration(String),
}

impl CaptureError {
    /// Whether the pipeline keeps running after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}
