//! Status display contract: a pure render of a [`StatusSnapshot`],
//! with no feedback into the control core.

use ares_types::{AresError, StatusSnapshot};

/// Anything that can show the operator the rover's current state: an
/// onboard OLED, a log line, a dashboard row.
pub trait StatusDisplay: Send {
    /// Render `snapshot`. Implementations must not block the tick
    /// cadence; slow displays should drop frames rather than queue.
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] if the display cannot be
    /// driven. Callers treat this as cosmetic and keep ticking.
    fn render(&mut self, snapshot: &StatusSnapshot) -> Result<(), AresError>;
}
