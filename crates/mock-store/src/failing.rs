//! Failing store - wraps another store and fails operations on demand.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use contact_core::{Contact, ContactDraft, ContactPatch, ContactStore, StoreError};

/// A store operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAll,
    GetOne,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn index(self) -> usize {
        match self {
            Operation::GetAll => 0,
            Operation::GetOne => 1,
            Operation::Create => 2,
            Operation::Update => 3,
            Operation::Delete => 4,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Operation::GetAll => "get_all",
            Operation::GetOne => "get_one",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// A store that forwards to an inner store unless the operation is switched
/// to fail, in which case it returns [`StoreError::Unavailable`] without
/// touching the inner store.
///
/// Useful for testing how callers handle transient network failures.
pub struct FailingStore<S: ContactStore> {
    inner: S,
    failing: [AtomicBool; 5],
}

impl<S: ContactStore> FailingStore<S> {
    /// Wrap a store with every operation succeeding.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing: Default::default(),
        }
    }

    /// Make an operation fail (or succeed again).
    pub fn set_failing(&self, operation: Operation, failing: bool) {
        self.failing[operation.index()].store(failing, Ordering::SeqCst);
    }

    /// Make every operation fail (or succeed again).
    pub fn set_all_failing(&self, failing: bool) {
        for flag in &self.failing {
            flag.store(failing, Ordering::SeqCst);
        }
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn check(&self, operation: Operation) -> Result<(), StoreError> {
        if self.failing[operation.index()].load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "{} failed (injected)",
                operation.as_str()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: ContactStore> ContactStore for FailingStore<S> {
    async fn get_all(&self) -> Result<Vec<Contact>, StoreError> {
        self.check(Operation::GetAll)?;
        self.inner.get_all().await
    }

    async fn get_one(&self, id: &str) -> Result<Contact, StoreError> {
        self.check(Operation::GetOne)?;
        self.inner.get_one(id).await
    }

    async fn create(&self, draft: ContactDraft) -> Result<String, StoreError> {
        self.check(Operation::Create)?;
        self.inner.create(draft).await
    }

    async fn update(&self, id: &str, patch: ContactPatch) -> Result<(), StoreError> {
        self.check(Operation::Update)?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check(Operation::Delete)?;
        self.inner.delete(id).await
    }

    fn name(&self) -> &str {
        "FailingStore"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[tokio::test]
    async fn test_passes_through_by_default() {
        let store = FailingStore::new(MemoryStore::new());
        let id = store
            .create(ContactDraft::new("Ada", "Lovelace", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 1);
        assert_eq!(store.get_one(&id).await.unwrap().first_name, "Ada");
    }

    #[tokio::test]
    async fn test_failing_update_leaves_inner_untouched() {
        let store = FailingStore::new(MemoryStore::new());
        let id = store
            .create(ContactDraft::new("Ada", "Lovelace", "ada@example.com"))
            .await
            .unwrap();

        store.set_failing(Operation::Update, true);
        let err = store.update(&id, ContactPatch::favorite(true)).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(!store.inner().get_one(&id).await.unwrap().favorite);

        store.set_failing(Operation::Update, false);
        store.update(&id, ContactPatch::favorite(true)).await.unwrap();
        assert!(store.inner().get_one(&id).await.unwrap().favorite);
    }

    #[tokio::test]
    async fn test_set_all_failing() {
        let store = FailingStore::new(MemoryStore::new());
        store.set_all_failing(true);
        assert!(store.get_all().await.is_err());
        assert!(store.delete("x").await.is_err());

        store.set_all_failing(false);
        assert!(store.get_all().await.is_ok());
    }
}
