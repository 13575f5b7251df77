//! Engine state and the visible-list projection.
//!
//! State is kept in two layers: the last-fetched snapshot, which is the
//! authoritative copy of the store, and a favorite override map patched
//! locally after each confirmed toggle. Every successful load reseeds the
//! overrides from the snapshot.

use std::cmp::Ordering;
use std::collections::HashMap;

use contact_core::Contact;
use icu_collator::{Collator, CollatorOptions};
use tracing::warn;
use unicase::UniCase;

use crate::error::ViewError;
use crate::filter::Filters;
use crate::group::{group_contacts, ContactGroup};

thread_local! {
    static COLLATOR: Option<Collator> =
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                warn!(error = %err, "Root collator unavailable, sorting case-insensitively");
                None
            }
        };
}

/// Compare last names with the Unicode root collation, so accented letters
/// sort next to their base letters. Leading whitespace is ignored, matching
/// [`group_key`](crate::group::group_key).
pub fn compare_last_names(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.trim_start(), b.trim_start());
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => UniCase::new(a).cmp(&UniCase::new(b)),
    })
}

/// Sort contacts by last name. The sort is stable, so equal names keep
/// their store order.
pub fn sort_by_last_name(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| compare_last_names(&a.last_name, &b.last_name));
}

/// Everything the list screen derives its view from.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    snapshot: Vec<Contact>,
    overrides: HashMap<String, bool>,
    /// Search, tag, and favorites-only inputs.
    pub filters: Filters,
    /// Contact whose preview card is showing.
    pub hovered: Option<String>,
    /// Most recent failure, shown as an error indicator.
    pub last_error: Option<ViewError>,
}

impl EngineState {
    /// Build state from freshly fetched records.
    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        let mut state = Self::default();
        state.replace_snapshot(contacts);
        state
    }

    /// Replace the snapshot with a new fetch and reseed the overrides.
    pub fn replace_snapshot(&mut self, mut contacts: Vec<Contact>) {
        sort_by_last_name(&mut contacts);
        self.overrides = contacts
            .iter()
            .map(|contact| (contact.id.clone(), contact.favorite))
            .collect();
        self.snapshot = contacts;

        if let Some(hovered) = &self.hovered {
            if !self.snapshot.iter().any(|c| &c.id == hovered) {
                self.hovered = None;
            }
        }
    }

    /// Snapshot contacts in last-name order.
    pub fn contacts(&self) -> &[Contact] {
        &self.snapshot
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.snapshot.iter().find(|c| c.id == id)
    }

    /// Effective favorite flag: the override when set, otherwise the
    /// snapshot value.
    pub fn is_favorite(&self, id: &str) -> bool {
        match self.overrides.get(id) {
            Some(favorite) => *favorite,
            None => self.get(id).map(|c| c.favorite).unwrap_or(false),
        }
    }

    pub fn set_favorite_override(&mut self, id: &str, favorite: bool) {
        self.overrides.insert(id.to_string(), favorite);
    }

    pub fn favorite_override(&self, id: &str) -> Option<bool> {
        self.overrides.get(id).copied()
    }

    /// Insert or replace a single record, keeping last-name order.
    ///
    /// An existing override is kept; a new record seeds its override from
    /// its stored flag.
    pub fn upsert(&mut self, contact: Contact) {
        self.overrides
            .entry(contact.id.clone())
            .or_insert(contact.favorite);

        if let Some(existing) = self.snapshot.iter_mut().find(|c| c.id == contact.id) {
            *existing = contact;
            sort_by_last_name(&mut self.snapshot);
        } else {
            let position = self.snapshot.partition_point(|c| {
                compare_last_names(&c.last_name, &contact.last_name) != Ordering::Greater
            });
            self.snapshot.insert(position, contact);
        }
    }

    /// Drop a record and its override. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.overrides.remove(id);
        if self.hovered.as_deref() == Some(id) {
            self.hovered = None;
        }

        let before = self.snapshot.len();
        self.snapshot.retain(|c| c.id != id);
        self.snapshot.len() != before
    }

    /// The filtered, grouped list to render.
    ///
    /// Pure: search, tag, and favorites filters run in that order over the
    /// snapshot, then survivors are grouped by last-name initial. Entries
    /// carry the effective favorite flag.
    pub fn compute_visible(&self) -> Vec<ContactGroup> {
        let needle = self.filters.search_needle();

        let survivors = self.snapshot.iter().filter_map(|contact| {
            let favorite = self.is_favorite(&contact.id);
            if !self.filters.matches(contact, &needle, favorite) {
                return None;
            }
            let mut entry = contact.clone();
            entry.favorite = favorite;
            Some(entry)
        });

        group_contacts(survivors)
    }
}

/// Read-only projection published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleContacts {
    pub groups: Vec<ContactGroup>,
    /// Number of contacts across all groups.
    pub displayed_count: usize,
    pub filters: Filters,
    /// Contact for the preview card, if one is hovered.
    pub hovered: Option<Contact>,
    pub error: Option<ViewError>,
}

impl VisibleContacts {
    pub fn from_state(state: &EngineState) -> Self {
        let groups = state.compute_visible();
        let displayed_count = groups.iter().map(ContactGroup::len).sum();
        let hovered = state.hovered.as_deref().and_then(|id| {
            state.get(id).cloned().map(|mut contact| {
                contact.favorite = state.is_favorite(id);
                contact
            })
        });

        Self {
            groups,
            displayed_count,
            filters: state.filters.clone(),
            hovered,
            error: state.last_error.clone(),
        }
    }

    /// Ids of every displayed contact, in display order.
    pub fn ids(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.contacts.iter().map(|c| c.id.as_str()))
            .collect()
    }

    pub fn group(&self, key: &str) -> Option<&ContactGroup> {
        self.groups.iter().find(|g| g.key == key)
    }
}
