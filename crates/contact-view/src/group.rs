//! Alphabetical grouping by the first letter of the last name.

use std::collections::BTreeMap;

use contact_core::Contact;

/// Group key for contacts whose last name is empty or blank.
pub const UNGROUPED_KEY: &str = "#";

/// A section of the list: contacts sharing a last-name initial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactGroup {
    pub key: String,
    pub contacts: Vec<Contact>,
}

impl ContactGroup {
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// Uppercased first character of the last name, or [`UNGROUPED_KEY`].
pub fn group_key(last_name: &str) -> String {
    match last_name.trim_start().chars().next() {
        Some(first) => first.to_uppercase().collect(),
        None => UNGROUPED_KEY.to_string(),
    }
}

/// Bucket contacts by [`group_key`].
///
/// Groups come out in ascending key order and only exist when non-empty.
/// Members keep the order they were given in.
pub fn group_contacts(contacts: impl IntoIterator<Item = Contact>) -> Vec<ContactGroup> {
    let mut buckets: BTreeMap<String, Vec<Contact>> = BTreeMap::new();
    for contact in contacts {
        buckets
            .entry(group_key(&contact.last_name))
            .or_default()
            .push(contact);
    }

    buckets
        .into_iter()
        .map(|(key, contacts)| ContactGroup { key, contacts })
        .collect()
}
