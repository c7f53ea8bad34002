//! # Reminder registry
//!
//! Owns the ordered list of live reminders and their armed timers. Every
//! mutation and every timer callback serializes on one async lock, so a
//! removed reminder's timers can never deliver a stale notification:
//! removal aborts the timer tasks while holding the lock, and a firing task
//! re-checks that its reminder is still present before it says anything.
//!
//! Entries are addressed two ways. User commands use the 1-based position
//! in current insertion order, which shifts when earlier entries go away.
//! Timers instead carry the entry's stable id, assigned at creation, so a
//! due timer always removes the reminder it was armed for no matter how the
//! list has shifted since.

use chrono::{DateTime, Utc};
use log::{debug, info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::board;
use super::stages::{self, Stage};
use crate::core::ReminderError;
use crate::features::clock::Clock;
use crate::messenger::Messenger;

pub type ReminderId = u64;

/// One pending notification sequence.
pub(super) struct Reminder {
    pub(super) id: ReminderId,
    pub(super) display: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) total: Duration,
    timers: Vec<(Stage, JoinHandle<()>)>,
}

impl Reminder {
    fn cancel(&self) {
        for (_, handle) in &self.timers {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub(super) fn stub(display: &str, created_at: DateTime<Utc>, total: Duration) -> Self {
        Reminder {
            id: 0,
            display: display.to_string(),
            created_at,
            total,
            timers: Vec::new(),
        }
    }
}

pub struct ReminderRegistry {
    entries: Mutex<Vec<Reminder>>,
    next_id: AtomicU64,
    clock: Arc<dyn Clock>,
    messenger: Arc<dyn Messenger>,
}

impl ReminderRegistry {
    pub fn new(clock: Arc<dyn Clock>, messenger: Arc<dyn Messenger>) -> Arc<Self> {
        Arc::new(ReminderRegistry {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            clock,
            messenger,
        })
    }

    /// Register a reminder and arm its staged timers. Returns the 1-based
    /// position of the new entry at insertion time.
    ///
    /// Validation happens before anything is armed or stored, so a rejected
    /// add leaves no trace.
    pub async fn add(
        self: &Arc<Self>,
        display: &str,
        total: Duration,
    ) -> Result<usize, ReminderError> {
        let stages = stages::plan(total)?;
        let stage_count = stages.len();

        let mut entries = self.entries.lock().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let timers = stages
            .into_iter()
            .map(|stage| {
                let registry = Arc::clone(self);
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(stage.fire_after(total)).await;
                    registry.fire(id, stage).await;
                });
                (stage, handle)
            })
            .collect();
        entries.push(Reminder {
            id,
            display: display.to_string(),
            created_at: self.clock.now(),
            total,
            timers,
        });
        let position = entries.len();

        info!(
            "Added reminder {id} ({display:?}) due in {}ms, {stage_count} stages armed",
            total.as_millis()
        );
        self.messenger
            .render(&board::render(&entries, self.clock.now()))
            .await;
        Ok(position)
    }

    /// Remove the reminder at a 1-based position, cancelling its timers
    /// before the entry disappears.
    pub async fn remove_at(&self, position: usize) -> Result<(), ReminderError> {
        let mut entries = self.entries.lock().await;
        if position == 0 || position > entries.len() {
            return Err(ReminderError::IndexOutOfRange(position));
        }
        let removed = entries.remove(position - 1);
        removed.cancel();
        info!("Removed reminder {} ({:?})", removed.id, removed.display);
        self.messenger
            .render(&board::render(&entries, self.clock.now()))
            .await;
        Ok(())
    }

    /// Remove every reminder, cancelling all armed timers. Cannot fail.
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        for entry in entries.drain(..) {
            entry.cancel();
        }
        info!("Cleared all reminders");
        self.messenger
            .render(&board::render(&entries, self.clock.now()))
            .await;
    }

    /// Re-render the board from current state.
    pub async fn publish_board(&self) {
        let entries = self.entries.lock().await;
        self.messenger
            .render(&board::render(&entries, self.clock.now()))
            .await;
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Timer callback. Looks the reminder up by stable id at fire time; an
    /// entry that lost the lock race to a removal is absent here and stays
    /// silent.
    async fn fire(&self, id: ReminderId, stage: Stage) {
        let mut entries = self.entries.lock().await;
        let Some(index) = entries.iter().position(|entry| entry.id == id) else {
            debug!("Timer for reminder {id} fired after removal; ignoring");
            return;
        };
        match stage {
            Stage::Warn { minutes } => {
                let entry = &mut entries[index];
                entry.timers.retain(|(armed, _)| *armed != stage);
                self.messenger
                    .notify(&format!(
                        "REMIND: @here, {minutes} minutes more to {}",
                        entry.display
                    ))
                    .await;
            }
            Stage::Due => {
                let entry = entries.remove(index);
                // This task's own handle is among the armed timers; aborting
                // it would kill the notification below at its first await.
                for (armed, handle) in &entry.timers {
                    if *armed != Stage::Due {
                        handle.abort();
                    }
                }
                info!("Reminder {} ({:?}) is due", entry.id, entry.display);
                self.messenger
                    .notify(&format!("REMIND: @here, its time to {}", entry.display))
                    .await;
                self.messenger
                    .render(&board::render(&entries, self.clock.now()))
                    .await;
            }
        }
    }

    #[cfg(test)]
    pub(super) async fn armed_timers(&self, position: usize) -> usize {
        self.entries.lock().await[position - 1].timers.len()
    }
}
