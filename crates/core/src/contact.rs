//! Contact section rules.
//!
//! The heading and the individual contact items share one backend table and
//! are told apart by a `type` column (see [`RecordKind`]).

use serde::{Deserialize, Serialize};

/// Heading shown on the public site until an admin saves one.
pub const DEFAULT_SECTION_HEADING: &str = "Connect With Us";

/// Subheading shown on the public site until an admin saves one.
pub const DEFAULT_SECTION_SUBHEADING: &str = "We'd love to hear from you \u{2014} whether it's about sustainability, collaboration, or a new project idea.";

/// Value of the `type` discriminator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Section,
    Contact,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Section => "section",
            RecordKind::Contact => "contact",
        }
    }
}

/// Icon rendered next to a contact item.
///
/// Unknown names read from the backend fall back to [`ContactIcon::Mail`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ContactIcon {
    #[default]
    Mail,
    Phone,
    MapPin,
}

impl ContactIcon {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Phone" => ContactIcon::Phone,
            "MapPin" => ContactIcon::MapPin,
            _ => ContactIcon::Mail,
        }
    }
}

impl From<String> for ContactIcon {
    fn from(name: String) -> Self {
        ContactIcon::from_name(&name)
    }
}

/// Display order for a newly added item: one past the highest existing
/// order, never below 1.
pub fn next_display_order<I>(existing: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    existing.into_iter().fold(0, i32::max) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_icons_fall_back_to_mail() {
        let icon: ContactIcon = serde_json::from_str("\"Fax\"").unwrap();
        assert_eq!(icon, ContactIcon::Mail);
        let icon: ContactIcon = serde_json::from_str("\"MapPin\"").unwrap();
        assert_eq!(icon, ContactIcon::MapPin);
        assert_eq!(serde_json::to_string(&ContactIcon::Phone).unwrap(), "\"Phone\"");
    }

    #[test]
    fn next_order_is_max_plus_one() {
        assert_eq!(next_display_order([]), 1);
        assert_eq!(next_display_order([3, 1, 2]), 4);
        assert_eq!(next_display_order([-5]), 1);
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(RecordKind::Section.as_str(), "section");
        assert_eq!(
            serde_json::to_string(&RecordKind::Contact).unwrap(),
            "\"contact\""
        );
    }
}
