//! # Command Handler
//!
//! Splits raw channel messages into commands and drives the registry.
//! Validation errors are replied to the invoking user rather than broadcast,
//! and every processed user message is deleted so the channel holds only the
//! board and notifications.

use anyhow::Result;
use chrono::{FixedOffset, Offset, Utc};
use log::debug;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::core::ReminderError;
use crate::features::clock::Clock;
use crate::features::reminders::{duration, ReminderRegistry};
use crate::messenger::Messenger;

/// A parsed command from the reminder channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `<time-token> <label...>` registers a reminder
    Add { token: String, display: String },
    /// `remove <index>` drops one reminder by 1-based position
    Remove { index: String },
    /// `clear` drops everything
    Clear,
    /// `refresh` / `show` reposts the board as the latest message
    Refresh,
}

/// Split message content into a command. `None` when the content does not
/// start with the prefix or carries nothing after it.
pub fn parse_command(content: &str, prefix: &str) -> Option<Command> {
    let rest = content.strip_prefix(prefix)?.trim_start();
    let mut parts = rest.split_whitespace();
    match parts.next()? {
        "clear" => Some(Command::Clear),
        "refresh" | "show" => Some(Command::Refresh),
        "remove" => Some(Command::Remove {
            index: parts.next().unwrap_or_default().to_string(),
        }),
        token => Some(Command::Add {
            token: token.to_string(),
            display: parts.collect::<Vec<_>>().join(" "),
        }),
    }
}

pub struct CommandHandler {
    registry: Arc<ReminderRegistry>,
    messenger: Arc<dyn Messenger>,
    clock: Arc<dyn Clock>,
    prefix: String,
    utc_offset: FixedOffset,
    channel_id: u64,
}

impl CommandHandler {
    pub fn new(
        registry: Arc<ReminderRegistry>,
        messenger: Arc<dyn Messenger>,
        clock: Arc<dyn Clock>,
        prefix: String,
        utc_offset_hours: i32,
        channel_id: u64,
    ) -> Self {
        // Config validates the range, so this only falls back for a zero
        // offset it would have produced anyway.
        let utc_offset =
            FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix());
        CommandHandler {
            registry,
            messenger,
            clock,
            prefix,
            utc_offset,
            channel_id,
        }
    }

    /// Handle one inbound gateway message: run a parsed command if there is
    /// one, then delete the message to keep the board channel clean.
    pub async fn handle_message(&self, ctx: &Context, msg: &Message) -> Result<()> {
        if msg.author.bot || msg.channel_id.0 != self.channel_id {
            return Ok(());
        }

        if let Some(command) = parse_command(&msg.content, &self.prefix) {
            debug!("Running {command:?} from {}", msg.author.name);
            if let Err(e) = self.run(command).await {
                msg.reply(&ctx.http, e.to_string()).await?;
            }
        }

        if let Err(e) = msg.delete(&ctx.http).await {
            debug!("Could not delete message {}: {e}", msg.id);
        }
        Ok(())
    }

    /// Execute a command against the registry.
    pub async fn run(&self, command: Command) -> Result<(), ReminderError> {
        match command {
            Command::Add { token, display } => {
                let now = self.clock.now().with_timezone(&self.utc_offset).naive_local();
                let total = duration::resolve(&token, now)?;
                let position = self.registry.add(&display, total).await?;
                debug!("Reminder {display:?} registered at position {position}");
                Ok(())
            }
            Command::Remove { index } => {
                let position = index.parse::<usize>().unwrap_or(0);
                self.registry.remove_at(position).await
            }
            Command::Clear => {
                self.registry.clear().await;
                Ok(())
            }
            Command::Refresh => {
                self.messenger.reset_board().await;
                self.registry.publish_board().await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_minutes() {
        assert_eq!(
            parse_command("r! 30 water the plants", "r!"),
            Some(Command::Add {
                token: "30".to_string(),
                display: "water the plants".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_add_with_wall_clock() {
        assert_eq!(
            parse_command("r! 10:30 standup", "r!"),
            Some(Command::Add {
                token: "10:30".to_string(),
                display: "standup".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_remove() {
        assert_eq!(
            parse_command("r! remove 2", "r!"),
            Some(Command::Remove {
                index: "2".to_string()
            })
        );
        // missing argument still parses; the registry rejects it
        assert_eq!(
            parse_command("r! remove", "r!"),
            Some(Command::Remove {
                index: String::new()
            })
        );
    }

    #[test]
    fn test_parse_clear_refresh_show() {
        assert_eq!(parse_command("r! clear", "r!"), Some(Command::Clear));
        assert_eq!(parse_command("r! refresh", "r!"), Some(Command::Refresh));
        assert_eq!(parse_command("r! show", "r!"), Some(Command::Refresh));
    }

    #[test]
    fn test_parse_ignores_unprefixed_and_empty() {
        assert_eq!(parse_command("hello there", "r!"), None);
        assert_eq!(parse_command("r!", "r!"), None);
        assert_eq!(parse_command("r!   ", "r!"), None);
    }

    mod run {
        use crate::command_handler::{Command, CommandHandler};
        use crate::core::ReminderError;
        use crate::features::clock::FixedClock;
        use crate::features::reminders::ReminderRegistry;
        use crate::messenger::Messenger;
        use async_trait::async_trait;
        use chrono::{TimeZone, Utc};
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        struct CountingMessenger {
            renders: AtomicUsize,
            resets: AtomicUsize,
        }

        #[async_trait]
        impl Messenger for CountingMessenger {
            async fn notify(&self, _text: &str) {}
            async fn render(&self, _text: &str) {
                self.renders.fetch_add(1, Ordering::SeqCst);
            }
            async fn reset_board(&self) {
                self.resets.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn fixture() -> (CommandHandler, Arc<ReminderRegistry>, Arc<CountingMessenger>) {
            let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
            let messenger = Arc::new(CountingMessenger {
                renders: AtomicUsize::new(0),
                resets: AtomicUsize::new(0),
            });
            let registry = ReminderRegistry::new(clock.clone(), messenger.clone());
            let handler = CommandHandler::new(
                Arc::clone(&registry),
                messenger.clone(),
                clock,
                "r!".to_string(),
                0,
                1,
            );
            (handler, registry, messenger)
        }

        #[tokio::test(start_paused = true)]
        async fn test_add_resolves_wall_clock_against_offset_now() {
            let (handler, registry, _) = fixture();
            // clock is 10:00; 10:30 is a valid half-hour reminder
            handler
                .run(Command::Add {
                    token: "10:30".to_string(),
                    display: "standup".to_string(),
                })
                .await
                .unwrap();
            assert_eq!(registry.len().await, 1);

            // 09:00 already passed today
            let err = handler
                .run(Command::Add {
                    token: "09:00".to_string(),
                    display: "too late".to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(err, ReminderError::InvalidDuration);
            assert_eq!(registry.len().await, 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_add_surfaces_literal_duration_error() {
            let (handler, registry, _) = fixture();
            let err = handler
                .run(Command::Add {
                    token: "1".to_string(),
                    display: "too short".to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "ERROR: remind time must be over 1, value is count based on minutes."
            );
            assert!(registry.is_empty().await);
        }

        #[tokio::test(start_paused = true)]
        async fn test_remove_with_unparsable_index() {
            let (handler, _, _) = fixture();
            let err = handler
                .run(Command::Remove {
                    index: "first".to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(err, ReminderError::IndexOutOfRange(0));
        }

        #[tokio::test(start_paused = true)]
        async fn test_refresh_reposts_board() {
            let (handler, _, messenger) = fixture();
            handler.run(Command::Refresh).await.unwrap();
            assert_eq!(messenger.resets.load(Ordering::SeqCst), 1);
            assert_eq!(messenger.renders.load(Ordering::SeqCst), 1);
        }
    }
}
