//! Case-insensitive substring search used by every list screen.

/// `true` when `term` is empty or appears in any of `fields`, ignoring case.
pub fn matches_term(term: &str, fields: &[&str]) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_term_matches() {
        assert!(matches_term("", &["anything"]));
        assert!(matches_term("  ", &[]));
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let fields = ["Wastewater Audit", "Treatment plant survey for Pune"];
        assert!(matches_term("WASTEWATER", &fields));
        assert!(matches_term("pune", &fields));
        assert!(!matches_term("solar", &fields));
    }
}
