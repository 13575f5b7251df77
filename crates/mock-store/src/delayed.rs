//! Delayed store implementation - wraps another store with artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use contact_core::{Contact, ContactDraft, ContactPatch, ContactStore, StoreError};
use tokio::time::sleep;

/// A store that wraps another store and sleeps before every call.
///
/// Useful for simulating network round trips and for interleaving
/// concurrent calls in tests.
pub struct DelayedStore<S: ContactStore> {
    inner: S,
    delay: Duration,
}

impl<S: ContactStore> DelayedStore<S> {
    /// Create a new DelayedStore wrapping the given store with the specified delay.
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a store with a delay in milliseconds.
    pub fn with_millis(inner: S, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ContactStore> ContactStore for DelayedStore<S> {
    async fn get_all(&self) -> Result<Vec<Contact>, StoreError> {
        sleep(self.delay).await;
        self.inner.get_all().await
    }

    async fn get_one(&self, id: &str) -> Result<Contact, StoreError> {
        sleep(self.delay).await;
        self.inner.get_one(id).await
    }

    async fn create(&self, draft: ContactDraft) -> Result<String, StoreError> {
        sleep(self.delay).await;
        self.inner.create(draft).await
    }

    async fn update(&self, id: &str, patch: ContactPatch) -> Result<(), StoreError> {
        sleep(self.delay).await;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        sleep(self.delay).await;
        self.inner.delete(id).await
    }

    fn name(&self) -> &str {
        "DelayedStore"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_store() {
        let store = DelayedStore::with_millis(MemoryStore::new(), 100);

        let start = Instant::now();
        let contacts = store.get_all().await.unwrap();
        let elapsed = start.elapsed();

        assert!(contacts.is_empty());
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_concurrent_calls_overlap() {
        let store = DelayedStore::with_millis(MemoryStore::new(), 200);

        let start = Instant::now();
        let (a, b) = futures::join!(store.get_all(), store.get_all());
        assert!(a.is_ok() && b.is_ok());
        assert!(start.elapsed() < Duration::from_millis(390));
    }

    #[tokio::test]
    async fn test_store_name() {
        let store = DelayedStore::with_millis(MemoryStore::new(), 0);
        assert_eq!(store.name(), "DelayedStore");
    }
}
