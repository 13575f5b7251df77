//! List filters: search text, tag selection, and favorites-only.

use contact_core::{Contact, TagFilter};

/// The UI inputs that narrow the contact list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Case-insensitive substring matched against "first last".
    pub search_term: String,
    pub tag: TagFilter,
    pub favorites_only: bool,
}

impl Filters {
    /// Whether any filter narrows the list.
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || self.tag != TagFilter::All || self.favorites_only
    }

    /// Lowercased search term, computed once per pass.
    pub(crate) fn search_needle(&self) -> String {
        self.search_term.to_lowercase()
    }

    /// Apply the three predicates in order: search, tag, favorites.
    pub(crate) fn matches(&self, contact: &Contact, needle: &str, is_favorite: bool) -> bool {
        matches_search(contact, needle)
            && self.tag.matches(&contact.tags)
            && (!self.favorites_only || is_favorite)
    }
}

/// Substring match on the lowercased full name. No tokenization.
///
/// `needle` must already be lowercased; an empty needle matches everything.
pub fn matches_search(contact: &Contact, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    contact.display_name().to_lowercase().contains(needle)
}
