use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A line of guide text, spoken once and then moved into the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utterance {
    text: String,
    pause: Option<Duration>,
}

impl Utterance {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pause: None,
        }
    }

    /// Overrides the page's read pause for this line only.
    #[must_use]
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = Some(pause);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn pause(&self) -> Option<Duration> {
        self.pause
    }

    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl From<&str> for Utterance {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub spoken_at: DateTime<Utc>,
}

/// Side panel of everything the narrator has said, in speaking order.
///
/// Entries can only be appended; there is no way to edit or drop one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NarratorLog {
    entries: Vec<LogEntry>,
}

impl NarratorLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, utterance: Utterance, spoken_at: DateTime<Utc>) -> &LogEntry {
        self.entries.push(LogEntry {
            text: utterance.into_text(),
            spoken_at,
        });
        &self.entries[self.entries.len() - 1]
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn append_keeps_text_verbatim_and_in_order() {
        let mut log = NarratorLog::new();
        let now = fixed_now();
        log.append(Utterance::new("  first, with spaces  "), now);
        let entry = log.append(Utterance::new("second"), now).clone();

        assert_eq!(log.len(), 2);
        assert_eq!(entry.text, "second");
        assert_eq!(
            log.texts().collect::<Vec<_>>(),
            vec!["  first, with spaces  ", "second"]
        );
    }

    #[test]
    fn char_count_counts_scalar_values() {
        assert_eq!(Utterance::new("Pipeline Ready ✔").char_count(), 16);
    }
}
