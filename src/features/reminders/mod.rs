//! # Feature: Reminders
//!
//! Staged reminder engine: time-token resolution, warning-stage planning,
//! the live registry with its armed timers, and the board renderer.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Stable ids for due-timer self-removal instead of positional index
//! - 1.1.0: Board rendering split out of the registry
//! - 1.0.0: Initial add/remove/clear with 10/5/1-minute staged warnings

pub mod board;
pub mod duration;
pub mod registry;
pub mod stages;

pub use registry::{ReminderId, ReminderRegistry};
pub use stages::Stage;
