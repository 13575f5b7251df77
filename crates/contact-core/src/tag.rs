//! Tag vocabulary and tag filter selection.

use std::fmt;

/// Tags offered by the list and form menus.
///
/// Stores do not enforce this set; any string is accepted as a tag.
pub const KNOWN_TAGS: [&str; 4] = ["friends", "family", "work", "other"];

/// Which tag the contact list is narrowed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TagFilter {
    /// No tag filtering.
    #[default]
    All,
    /// Only contacts carrying this tag.
    Only(String),
}

impl TagFilter {
    /// Parse a menu selection.
    ///
    /// An empty selection and `"all"` (any case) both mean no filtering.
    pub fn parse(selection: &str) -> Self {
        let selection = selection.trim();
        if selection.is_empty() || selection.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(selection.to_string())
        }
    }

    /// Whether a contact with the given tags passes this filter.
    pub fn matches(&self, tags: &[String]) -> bool {
        match self {
            Self::All => true,
            Self::Only(tag) => tags.iter().any(|t| t == tag),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(tag) => tag,
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TagFilter {
    fn from(selection: &str) -> Self {
        Self::parse(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_all_variants() {
        assert_eq!(TagFilter::parse(""), TagFilter::All);
        assert_eq!(TagFilter::parse("all"), TagFilter::All);
        assert_eq!(TagFilter::parse("  ALL "), TagFilter::All);
        assert_eq!(TagFilter::parse("work"), TagFilter::Only("work".to_string()));
    }

    #[test]
    fn test_matches() {
        let work = TagFilter::parse("work");
        assert!(work.matches(&tags(&["friends", "work"])));
        assert!(!work.matches(&tags(&["friends"])));
        assert!(!work.matches(&[]));
        assert!(TagFilter::All.matches(&[]));
    }

    #[test]
    fn test_unknown_tags_are_accepted() {
        let filter = TagFilter::parse("climbing");
        assert!(filter.matches(&tags(&["climbing"])));
        assert_eq!(filter.to_string(), "climbing");
    }
}
