use std::io;

use crate::models::error::CaptureError;

/// Source of sink status lines, one per output device, in enumeration order.
///
/// Implemented by:
/// - `CommandSinkQuery::pacmd()` / `CommandSinkQuery::pactl()` (PulseAudio backend)
/// - in-memory line lists in tests
///
/// The returned iterator is consumed lazily; the resolver stops pulling
/// lines as soon as it finds a match and then drops it.
pub trait SinkStatusQuery {
    type Lines: Iterator<Item = io::Result<String>>;

    /// Start the enumeration. Errors here mean the query could not run at all.
    fn query(&mut self) -> Result<Self::Lines, CaptureError>;
}

impl<Q: SinkStatusQuery + ?Sized> SinkStatusQuery for &mut Q {
    type Lines = Q::Lines;

    fn query(&mut self) -> Result<Self::Lines, CaptureError> {
        (**self).query()
    }
}
