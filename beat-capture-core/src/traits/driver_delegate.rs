use crate::models::error::CaptureError;
use crate::models::state::DriverState;

/// Event delegate for driver notifications.
///
/// All methods are called synchronously from whichever thread is driving
/// `start`/`pulse`/`stop`; keep them cheap, `on_read_error` can fire once
/// per frame.
pub trait DriverDelegate: Send + Sync {
    /// Called after the driver changes state.
    fn on_state_changed(&self, state: DriverState);

    /// Called for every failed read. The pulse still completes.
    fn on_read_error(&self, error: &CaptureError);
}
