//! In-memory store - records kept in a map ordered by insertion.

use async_trait::async_trait;
use contact_core::{Contact, ContactDraft, ContactPatch, ContactStore, StoreError};
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A store that keeps every record in memory.
///
/// Insertion order is the store order returned by `get_all`. Ids are random
/// UUIDs, like a document database would hand out.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<IndexMap<String, Contact>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given records, keeping their ids.
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let records = contacts
            .into_iter()
            .map(|contact| (contact.id.clone(), contact))
            .collect();

        Self {
            records: RwLock::new(records),
        }
    }

    /// Insert or replace a record directly, bypassing the trait.
    ///
    /// Simulates a write made by another client of the same collection.
    pub async fn put(&self, contact: Contact) {
        self.records
            .write()
            .await
            .insert(contact.id.clone(), contact);
    }

    /// All stored records, in store order.
    pub async fn snapshot(&self) -> Vec<Contact> {
        self.records.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self.snapshot().await)
    }

    async fn get_one(&self, id: &str) -> Result<Contact, StoreError> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn create(&self, draft: ContactDraft) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let contact = Contact::from_draft(id.clone(), draft);
        self.records.write().await.insert(id.clone(), contact);
        tracing::debug!(id = %id, "Created contact in memory store");
        Ok(id)
    }

    async fn update(&self, id: &str, patch: ContactPatch) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let contact = records.get_mut(id).ok_or_else(|| StoreError::not_found(id))?;
        contact.apply(&patch);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn name(&self) -> &str {
        "MemoryStore"
    }
}
