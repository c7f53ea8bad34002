//! Warning-stage planning.
//!
//! Every reminder gets a due timer and a 1-minute warning; longer reminders
//! also get 5- and 10-minute warnings. Checkpoints that would land before
//! registration are omitted instead of firing immediately.

use std::time::Duration;

use crate::core::ReminderError;

/// Advance-warning checkpoints, in minutes of lead time.
const WARN_MINUTES: [u32; 3] = [10, 5, 1];

/// One scheduled checkpoint for a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fires when the total duration has elapsed.
    Due,
    /// Fires `minutes` before due.
    Warn { minutes: u32 },
}

impl Stage {
    /// Offset from registration at which this stage fires.
    pub fn fire_after(&self, total: Duration) -> Duration {
        match self {
            Stage::Due => total,
            Stage::Warn { minutes } => {
                total - Duration::from_secs(u64::from(*minutes) * 60)
            }
        }
    }
}

/// Plan the stages for a reminder of `total` length.
///
/// Durations of one minute or less are rejected outright, before any timer
/// is armed.
pub fn plan(total: Duration) -> Result<Vec<Stage>, ReminderError> {
    if total <= Duration::from_millis(60_000) {
        return Err(ReminderError::InvalidDuration);
    }
    let mut stages = vec![Stage::Due];
    for minutes in WARN_MINUTES {
        if total > Duration::from_secs(u64::from(minutes) * 60) {
            stages.push(Stage::Warn { minutes });
        }
    }
    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_plan_rejects_one_minute_or_less() {
        assert_eq!(plan(ms(0)), Err(ReminderError::InvalidDuration));
        assert_eq!(plan(ms(59_000)), Err(ReminderError::InvalidDuration));
        assert_eq!(plan(ms(60_000)), Err(ReminderError::InvalidDuration));
    }

    #[test]
    fn test_plan_short_reminder_gets_due_and_one_minute() {
        let stages = plan(ms(60_001)).unwrap();
        assert_eq!(stages, vec![Stage::Due, Stage::Warn { minutes: 1 }]);

        // up to and including five minutes stays at two stages
        assert_eq!(plan(ms(300_000)).unwrap().len(), 2);
    }

    #[test]
    fn test_plan_medium_reminder_adds_five_minute_warning() {
        let stages = plan(ms(300_001)).unwrap();
        assert_eq!(stages.len(), 3);
        assert!(stages.contains(&Stage::Warn { minutes: 5 }));
        assert!(!stages.contains(&Stage::Warn { minutes: 10 }));

        assert_eq!(plan(ms(600_000)).unwrap().len(), 3);
    }

    #[test]
    fn test_plan_long_reminder_adds_ten_minute_warning() {
        let stages = plan(ms(600_001)).unwrap();
        assert_eq!(stages.len(), 4);
        assert!(stages.contains(&Stage::Warn { minutes: 10 }));
        assert_eq!(plan(ms(3_600_000)).unwrap().len(), 4);
    }

    #[test]
    fn test_fire_after_offsets() {
        let total = ms(900_000); // 15 minutes
        assert_eq!(Stage::Due.fire_after(total), ms(900_000));
        assert_eq!(Stage::Warn { minutes: 1 }.fire_after(total), ms(840_000));
        assert_eq!(Stage::Warn { minutes: 5 }.fire_after(total), ms(600_000));
        assert_eq!(Stage::Warn { minutes: 10 }.fire_after(total), ms(300_000));
    }
}
