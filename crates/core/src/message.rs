//! Customer message (contact form submission) rules.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Preview length used by the message list.
pub const PREVIEW_LEN: usize = 60;

/// Follow-up state of a customer message.
///
/// Stored values are matched case-insensitively and always written back in
/// lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MessageStatus {
    #[default]
    Pending,
    Contacted,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Contacted => "contacted",
        }
    }
}

impl FromStr for MessageStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(MessageStatus::Pending),
            "contacted" => Ok(MessageStatus::Contacted),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: pending, contacted"
            ))),
        }
    }
}

impl TryFrom<String> for MessageStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Status filter of the message list: `all` or a single status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(MessageStatus),
}

impl StatusFilter {
    pub fn matches(self, status: MessageStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") || s.trim().is_empty() {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Number of messages per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub contacted: usize,
}

impl StatusCounts {
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = MessageStatus>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |mut counts, status| {
                match status {
                    MessageStatus::Pending => counts.pending += 1,
                    MessageStatus::Contacted => counts.contacted += 1,
                }
                counts
            })
    }
}

/// Cut a message to `len` characters, appending `...` when anything was cut.
pub fn truncate_message(msg: &str, len: usize) -> String {
    match msg.char_indices().nth(len) {
        Some((idx, _)) => format!("{}...", &msg[..idx]),
        None => msg.to_string(),
    }
}

/// `date` and `time` column values stamped on a new submission.
pub fn submission_stamp(now: Timestamp) -> (String, String) {
    (
        now.format("%Y-%m-%d").to_string(),
        now.format("%H:%M:%S").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Pending".parse::<MessageStatus>().unwrap(), MessageStatus::Pending);
        assert_eq!(
            serde_json::from_str::<MessageStatus>("\"CONTACTED\"").unwrap(),
            MessageStatus::Contacted
        );
        assert!("archived".parse::<MessageStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&MessageStatus::Contacted).unwrap(),
            "\"contacted\""
        );
    }

    #[test]
    fn filter_all_matches_everything() {
        let filter: StatusFilter = "all".parse().unwrap();
        assert!(filter.matches(MessageStatus::Pending));
        assert!(filter.matches(MessageStatus::Contacted));

        let filter: StatusFilter = "contacted".parse().unwrap();
        assert!(!filter.matches(MessageStatus::Pending));
        assert!(filter.matches(MessageStatus::Contacted));
    }

    #[test]
    fn counts_by_status() {
        let counts = StatusCounts::tally([
            MessageStatus::Pending,
            MessageStatus::Contacted,
            MessageStatus::Pending,
        ]);
        assert_eq!(counts, StatusCounts { pending: 2, contacted: 1 });
    }

    #[test]
    fn truncates_long_messages() {
        let long = "a".repeat(61);
        assert_eq!(truncate_message(&long, PREVIEW_LEN), format!("{}...", "a".repeat(60)));
        assert_eq!(truncate_message("short", PREVIEW_LEN), "short");
        assert_eq!(truncate_message("héllo", 2), "hé...");
    }

    #[test]
    fn stamp_splits_date_and_time() {
        let now = chrono::Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            submission_stamp(now),
            ("2025-03-09".to_string(), "14:05:07".to_string())
        );
    }
}
