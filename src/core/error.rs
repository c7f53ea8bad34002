//! Error taxonomy for the reminder engine
//!
//! The `Display` text of each variant is exactly what the invoking user sees
//! as a reply; validation happens before any timer is armed or registry
//! state is touched, so a failed operation never leaves a partial add.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderError {
    /// The time token was unparsable, already in the past, or not over one
    /// minute from now.
    #[error("ERROR: remind time must be over 1, value is count based on minutes.")]
    InvalidDuration,

    /// Removal targeted a 1-based position with no live reminder.
    #[error("no reminder at position {0}")]
    IndexOutOfRange(usize),
}
