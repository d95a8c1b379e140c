use chrono::{DateTime, Utc};

/// `HH:MM:SS` stamp shown next to a session note.
#[must_use]
pub fn format_clock(value: DateTime<Utc>) -> String {
    value.format("%H:%M:%S").to_string()
}

