//! Time-token resolution for the add command.
//!
//! A token is either "HH:MM" (wall clock under the configured fixed offset)
//! or a bare integer count of minutes.

use chrono::{NaiveDateTime, NaiveTime};
use std::time::Duration;

use crate::core::ReminderError;

/// Resolve a user-supplied time token into a duration from `now`.
///
/// An "HH:MM" token that has already passed today resolves non-positive and
/// is rejected rather than rolling over to tomorrow.
pub fn resolve(token: &str, now: NaiveDateTime) -> Result<Duration, ReminderError> {
    if token.contains(':') {
        let target = NaiveTime::parse_from_str(token, "%H:%M")
            .map_err(|_| ReminderError::InvalidDuration)?;
        let until = now.date().and_time(target) - now;
        let ms = until.num_milliseconds();
        if ms <= 0 {
            return Err(ReminderError::InvalidDuration);
        }
        Ok(Duration::from_millis(ms as u64))
    } else {
        let minutes: u64 = token.parse().map_err(|_| ReminderError::InvalidDuration)?;
        if minutes == 0 {
            return Err(ReminderError::InvalidDuration);
        }
        let ms = minutes
            .checked_mul(60_000)
            .ok_or(ReminderError::InvalidDuration)?;
        Ok(Duration::from_millis(ms))
    }
}
