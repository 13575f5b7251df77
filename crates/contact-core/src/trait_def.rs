//! The ContactStore trait definition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::contact::{Contact, ContactDraft, ContactPatch};
use crate::error::StoreError;

/// A document collection holding contact records keyed by opaque ids.
///
/// Implementations range from an in-memory map to a SQLite database or a
/// remote managed service. This trait is object-safe and can be used with
/// `Box<dyn ContactStore>`.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Fetch every record, in store order.
    ///
    /// No pagination and no filtering are pushed down to the store.
    async fn get_all(&self) -> Result<Vec<Contact>, StoreError>;

    /// Fetch a single record.
    ///
    /// Fails with [`StoreError::NotFound`] when the id does not exist.
    async fn get_one(&self, id: &str) -> Result<Contact, StoreError>;

    /// Create a record from the given fields and return its new id.
    ///
    /// New records are not favorites.
    async fn create(&self, draft: ContactDraft) -> Result<String, StoreError>;

    /// Merge the given fields into an existing record.
    ///
    /// Fails with [`StoreError::NotFound`] when the id no longer exists.
    async fn update(&self, id: &str, patch: ContactPatch) -> Result<(), StoreError>;

    /// Delete a record.
    ///
    /// Fails with [`StoreError::NotFound`] when it is already gone.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Get a human-readable name for this store implementation.
    fn name(&self) -> &str;

    /// Check if the store is ready to serve requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}

#[async_trait]
impl<S: ContactStore + ?Sized> ContactStore for Arc<S> {
    async fn get_all(&self) -> Result<Vec<Contact>, StoreError> {
        (**self).get_all().await
    }

    async fn get_one(&self, id: &str) -> Result<Contact, StoreError> {
        (**self).get_one(id).await
    }

    async fn create(&self, draft: ContactDraft) -> Result<String, StoreError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &str, patch: ContactPatch) -> Result<(), StoreError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_ready(&self) -> bool {
        (**self).is_ready().await
    }
}

#[async_trait]
impl<S: ContactStore + ?Sized> ContactStore for Box<S> {
    async fn get_all(&self) -> Result<Vec<Contact>, StoreError> {
        (**self).get_all().await
    }

    async fn get_one(&self, id: &str) -> Result<Contact, StoreError> {
        (**self).get_one(id).await
    }

    async fn create(&self, draft: ContactDraft) -> Result<String, StoreError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &str, patch: ContactPatch) -> Result<(), StoreError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_ready(&self) -> bool {
        (**self).is_ready().await
    }
}
