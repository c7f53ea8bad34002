//! # Features
//!
//! Feature modules for the chime bot. The reminders module is the engine;
//! everything else supports it.

pub mod clock;
pub mod keepalive;
pub mod reminders;

// Re-export commonly used items
pub use clock::{Clock, SystemClock};
pub use reminders::{ReminderRegistry, Stage};
