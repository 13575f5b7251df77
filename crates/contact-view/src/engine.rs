//! The view-state engine.

use std::sync::Arc;

use contact_core::{Contact, ContactDraft, ContactPatch, ContactStore, TagFilter};
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::error::ViewError;
use crate::filter::Filters;
use crate::state::{EngineState, VisibleContacts};

/// Derives the contact list the screens render and mediates writes to the
/// store.
///
/// The store is injected at construction. Local inputs (search, tag,
/// favorites-only, hover) are set synchronously; operations that touch the
/// store are async and only update local state once the store confirms.
///
/// Concurrent calls are not serialized. Two toggles on the same contact
/// issued before either resolves can race; each one still reads the store
/// before writing.
///
/// # Example
///
/// ```rust
/// use contact_view::ViewEngine;
/// use mock_store::{ContactDraft, ContactStore, MemoryStore};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let store = MemoryStore::new();
///     store
///         .create(ContactDraft::new("Ada", "Lovelace", "ada@example.com"))
///         .await
///         .unwrap();
///
///     let engine = ViewEngine::new(store);
///     engine.load().await;
///     engine.set_search_term("ada");
///
///     let visible = engine.visible();
///     assert_eq!(visible.displayed_count, 1);
///     assert_eq!(visible.groups[0].key, "L");
/// }
/// ```
pub struct ViewEngine<S: ContactStore> {
    store: S,
    state: RwLock<EngineState>,
    updates: watch::Sender<Arc<VisibleContacts>>,
}

impl<S: ContactStore> ViewEngine<S> {
    /// Create an engine over the given store. Nothing is fetched until
    /// [`load`](Self::load) is called.
    pub fn new(store: S) -> Self {
        let (updates, _) = watch::channel(Arc::new(VisibleContacts::default()));
        Self {
            store,
            state: RwLock::new(EngineState::default()),
            updates,
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Receive a fresh projection whenever the visible state changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<VisibleContacts>> {
        self.updates.subscribe()
    }

    /// The current projection.
    pub fn visible(&self) -> Arc<VisibleContacts> {
        self.updates.borrow().clone()
    }

    /// Snapshot contacts in last-name order, unfiltered.
    pub fn contacts(&self) -> Vec<Contact> {
        self.state.read().contacts().to_vec()
    }

    pub fn filters(&self) -> Filters {
        self.state.read().filters.clone()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.read().is_favorite(id)
    }

    pub fn last_error(&self) -> Option<ViewError> {
        self.state.read().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.mutate(|state| state.last_error.take().is_some());
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// Refetch every contact from the store.
    ///
    /// Never fails: a fetch error is logged and recorded in
    /// [`last_error`](Self::last_error), and the previously loaded list stays
    /// as it was.
    pub async fn load(&self) {
        // Failure is already logged and recorded.
        let _ = self.try_load().await;
    }

    /// Refetch every contact, returning how many were loaded.
    pub async fn try_load(&self) -> Result<usize, ViewError> {
        match self.store.get_all().await {
            Ok(contacts) => {
                let count = contacts.len();
                self.mutate(|state| {
                    state.replace_snapshot(contacts);
                    state.last_error = None;
                    true
                });
                info!(store = self.store.name(), count, "Loaded contacts");
                Ok(count)
            }
            Err(err) => {
                error!(store = self.store.name(), error = %err, "Error fetching contacts");
                Err(self.fail(ViewError::FetchFailed(err.to_string())))
            }
        }
    }

    /// Fetch a single contact for the details screen.
    pub async fn contact(&self, id: &str) -> Result<Contact, ViewError> {
        self.store.get_one(id).await.map_err(|err| {
            warn!(id, error = %err, "Error fetching contact");
            ViewError::from_read(err)
        })
    }

    // ------------------------------------------------------------------
    // Local inputs
    // ------------------------------------------------------------------

    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.mutate(|state| replace(&mut state.filters.search_term, term));
    }

    pub fn set_tag_filter(&self, tag: TagFilter) {
        self.mutate(|state| replace(&mut state.filters.tag, tag));
    }

    /// Select a tag from the menu; `""` and `"all"` clear the tag filter.
    pub fn select_tag(&self, selection: &str) {
        self.set_tag_filter(TagFilter::parse(selection));
    }

    pub fn set_favorites_only(&self, favorites_only: bool) {
        self.mutate(|state| replace(&mut state.filters.favorites_only, favorites_only));
    }

    /// Flip favorites-only and return the new setting.
    pub fn toggle_favorites_only(&self) -> bool {
        let mut enabled = false;
        self.mutate(|state| {
            state.filters.favorites_only = !state.filters.favorites_only;
            enabled = state.filters.favorites_only;
            true
        });
        enabled
    }

    /// Show (or hide, with `None`) the preview card for a contact.
    pub fn set_hovered(&self, id: Option<String>) {
        self.mutate(|state| replace(&mut state.hovered, id));
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Flip a contact's favorite flag and return the new value.
    ///
    /// The current flag is read from the store rather than from local state,
    /// so a stale local copy is never negated. The override changes only
    /// after the store accepts the write.
    pub async fn toggle_favorite(&self, id: &str) -> Result<bool, ViewError> {
        let current = match self.store.get_one(id).await {
            Ok(contact) => contact,
            Err(err) => {
                error!(id, error = %err, "Error favoriting contact");
                return Err(self.fail(ViewError::from_read(err)));
            }
        };

        let favorite = !current.favorite;
        if let Err(err) = self.store.update(id, ContactPatch::favorite(favorite)).await {
            error!(id, error = %err, "Error favoriting contact");
            return Err(self.fail(ViewError::from_write(err)));
        }

        self.mutate(|state| {
            state.set_favorite_override(id, favorite);
            true
        });
        debug!(id, favorite, "Toggled favorite");
        Ok(favorite)
    }

    /// Create a contact and return its store-assigned id.
    ///
    /// The draft is validated before anything is written.
    pub async fn create_contact(&self, draft: ContactDraft) -> Result<String, ViewError> {
        let draft = draft.normalized();
        draft.validate()?;

        let id = match self.store.create(draft.clone()).await {
            Ok(id) => id,
            Err(err) => {
                error!(error = %err, "Error adding contact");
                return Err(self.fail(ViewError::from_write(err)));
            }
        };

        let contact = Contact::from_draft(id.clone(), draft);
        self.mutate(|state| {
            state.upsert(contact);
            true
        });
        info!(id = %id, "Contact created");
        Ok(id)
    }

    /// Overwrite a contact's editable fields and return the updated record.
    ///
    /// The favorite flag is left untouched.
    pub async fn update_contact(&self, id: &str, draft: ContactDraft) -> Result<Contact, ViewError> {
        let draft = draft.normalized();
        draft.validate()?;

        let mut contact = match self.store.get_one(id).await {
            Ok(contact) => contact,
            Err(err) => {
                error!(id, error = %err, "Error updating contact");
                return Err(self.fail(ViewError::from_read(err)));
            }
        };

        let patch = ContactPatch::from_draft(draft);
        if let Err(err) = self.store.update(id, patch.clone()).await {
            error!(id, error = %err, "Error updating contact");
            return Err(self.fail(ViewError::from_write(err)));
        }

        contact.apply(&patch);
        self.mutate(|state| {
            state.upsert(contact.clone());
            true
        });
        info!(id, "Contact updated");
        Ok(contact)
    }

    /// Delete a contact.
    ///
    /// If the store reports the record already gone, it is dropped locally
    /// as well and [`ViewError::RecordNotFound`] is returned.
    pub async fn delete_contact(&self, id: &str) -> Result<(), ViewError> {
        match self.store.delete(id).await {
            Ok(()) => {
                self.mutate(|state| state.remove(id));
                info!(id, "Contact deleted");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                warn!(id, "Contact already deleted");
                self.mutate(|state| {
                    state.remove(id);
                    state.last_error = Some(ViewError::from_write(err.clone()));
                    true
                });
                Err(ViewError::from_write(err))
            }
            Err(err) => {
                error!(id, error = %err, "Error deleting contact");
                Err(self.fail(ViewError::from_write(err)))
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Apply a change to the state and republish if it reports a change.
    ///
    /// The lock is released before publishing and is never held across an
    /// await point.
    /// Apply `change` and, when it reports a change, publish the new
    /// projection before the write lock is released so publications stay in
    /// mutation order.
    fn mutate(&self, change: impl FnOnce(&mut EngineState) -> bool) {
        let mut state = self.state.write();
        if change(&mut *state) {
            let visible = VisibleContacts::from_state(&state);
            self.updates.send_replace(Arc::new(visible));
        }
    }

    /// Record an operation failure for the error indicator.
    fn fail(&self, err: ViewError) -> ViewError {
        self.mutate(|state| {
            state.last_error = Some(err.clone());
            true
        });
        err
    }
}

/// Assign `value` and report whether it differed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_store::MemoryStore;

    fn contact(id: &str, first: &str, last: &str) -> Contact {
        Contact::from_draft(id, ContactDraft::new(first, last, "x@example.com"))
    }

    async fn loaded(contacts: Vec<Contact>) -> ViewEngine<MemoryStore> {
        let engine = ViewEngine::new(MemoryStore::with_contacts(contacts));
        engine.try_load().await.unwrap();
        engine
    }

    #[tokio::test]
    async fn test_empty_before_load() {
        let engine = ViewEngine::new(MemoryStore::with_contacts(vec![contact("1", "A", "B")]));
        assert_eq!(engine.visible().displayed_count, 0);
        assert!(engine.contacts().is_empty());
    }

    #[tokio::test]
    async fn test_setters_only_publish_changes() {
        let engine = loaded(vec![contact("1", "Ada", "Lovelace")]).await;
        let mut rx = engine.subscribe();
        rx.borrow_and_update();

        engine.set_search_term("");
        assert!(!rx.has_changed().unwrap());

        engine.set_search_term("zzz");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().displayed_count, 0);
    }

    #[tokio::test]
    async fn test_toggle_favorites_only() {
        let engine = loaded(vec![contact("1", "Ada", "Lovelace")]).await;
        assert!(engine.toggle_favorites_only());
        assert!(engine.filters().favorites_only);
        assert!(!engine.toggle_favorites_only());
    }

    #[tokio::test]
    async fn test_hover_resolves_contact() {
        let engine = loaded(vec![contact("1", "Ada", "Lovelace")]).await;
        engine.set_hovered(Some("1".to_string()));
        assert_eq!(
            engine.visible().hovered.as_ref().map(|c| c.first_name.as_str()),
            Some("Ada")
        );

        engine.set_hovered(None);
        assert!(engine.visible().hovered.is_none());
    }

    #[tokio::test]
    async fn test_clear_error() {
        let engine = loaded(vec![]).await;
        let err = engine.toggle_favorite("missing").await.unwrap_err();
        assert_eq!(err, ViewError::RecordNotFound("missing".to_string()));
        assert_eq!(engine.visible().error, Some(err));

        engine.clear_error();
        assert!(engine.last_error().is_none());
        assert!(engine.visible().error.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_last_publication_matches_state() {
        let engine = Arc::new(loaded(vec![contact("1", "Ada", "Lovelace")]).await);
        let rx = engine.subscribe();

        let mut handles = Vec::new();
        for worker in 0..8 {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                for round in 0..200 {
                    engine.set_search_term(format!("{worker}-{round}"));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(rx.borrow().filters, engine.filters());
    }

    #[test]
    fn test_replace_reports_change() {
        let mut value = 1;
        assert!(!replace(&mut value, 1));
        assert!(replace(&mut value, 2));
        assert_eq!(value, 2);
    }
}
