/// Driver lifecycle state machine.
///
/// State transitions:
/// ```text
/// uninitialized ──start()──→ connected ──stop()──→ stopped
///        └──────────────────stop()───────────────────┘
/// ```
///
/// `Stopped` is terminal: a driver never reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DriverState {
    #[default]
    Uninitialized,
    Connected,
    Stopped,
}

impl DriverState {
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Self::Uninitialized)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    pub fn can_start(&self) -> bool {
        self.is_uninitialized()
    }

    pub fn can_pulse(&self) -> bool {
        self.is_connected()
    }
}
