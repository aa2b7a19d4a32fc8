use std::fmt;

use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Primary key of a backend row.
///
/// The managed backend owns the schema, so a table may key its rows by
/// integer sequence or by UUID text. The id is carried as whichever JSON
/// scalar the backend returned and rendered verbatim into equality filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Parse a path segment. Integers become [`RecordId::Int`], anything
    /// else is kept as text.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prefers_integers() {
        assert_eq!(RecordId::parse("42"), RecordId::Int(42));
        assert_eq!(
            RecordId::parse("6f1c0e3a-1b2c-4d5e-8f90-123456789abc"),
            RecordId::Text("6f1c0e3a-1b2c-4d5e-8f90-123456789abc".into())
        );
    }

    #[test]
    fn deserializes_from_either_json_scalar() {
        let int: RecordId = serde_json::from_str("7").unwrap();
        let text: RecordId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(int, RecordId::Int(7));
        assert_eq!(text, RecordId::Text("abc".into()));
        assert_eq!(int.to_string(), "7");
        assert_eq!(text.to_string(), "abc");
    }
}
