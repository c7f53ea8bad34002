//! Board rendering: the usage header plus one remaining-time line per
//! pending reminder. Pure over registry state; only ever reads.

use chrono::{DateTime, Utc};

use super::registry::Reminder;

const USAGE_HEADER: &[&str] = &[
    " ----------- Reminder Usage -----------",
    "1. r! {hh:mm} {reminder display}   - add new reminder using expiry date hour & minutes",
    "2. r! {minutes} {reminder display} - add new reminder using expiry in minutes",
    "3. r! clear                        - remove all current reminder",
    "4. r! remove {index}               - remove reminder based on index",
    "5. r! refresh                      - refresh reminder to latest message",
];

pub(super) fn render(entries: &[Reminder], now: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = USAGE_HEADER.iter().map(|line| line.to_string()).collect();
    lines.push(format!(
        " ----------- Reminder ( {} ) ----------- ",
        entries.len()
    ));
    for (index, entry) in entries.iter().enumerate() {
        let due_at =
            entry.created_at + chrono::Duration::milliseconds(entry.total.as_millis() as i64);
        let remaining_ms = due_at.signed_duration_since(now).num_milliseconds().max(0) as u64;
        let (minutes, seconds) = remaining_parts(remaining_ms);
        lines.push(format!(
            "{}.  *{minutes}* minutes *{seconds}* seconds    {}",
            index + 1,
            entry.display
        ));
    }
    lines.join("\n")
}

/// Split remaining milliseconds into display minutes and seconds, rounding
/// up to the next whole second first so the board never shows
/// "0 minutes 60 seconds" partway through a minute.
fn remaining_parts(remaining_ms: u64) -> (u64, u64) {
    let total_seconds = remaining_ms.div_ceil(1000);
    (total_seconds / 60, total_seconds % 60)
}
