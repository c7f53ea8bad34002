// Core layer - shared types, configuration, and error taxonomy
pub mod core;

// Features layer - scheduling engine and supporting features
pub mod features;

// Outbound messaging seam (Discord delivery of notifications and the board)
pub mod messenger;

// Application layer
pub mod command_handler;

// Re-export core config for convenience
pub use crate::core::Config;

// Re-export feature items
pub use features::{
    // Clock
    Clock, SystemClock,
    // Reminders
    ReminderRegistry, Stage,
};

pub use command_handler::CommandHandler;
pub use messenger::{DiscordMessenger, Messenger};
