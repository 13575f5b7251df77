//! View-state engine for the contact list.
//!
//! Turns the raw records fetched from a [`ContactStore`] plus the list
//! screen's local inputs into the ordered, grouped, filtered list to render:
//!
//! 1. search filter (case-insensitive substring of "first last")
//! 2. tag filter (`""` / `"all"` disable it)
//! 3. favorites-only filter, using the local favorite overrides
//! 4. grouping by the uppercased first letter of the last name
//!
//! The engine also mediates writes (favorite toggles, create, edit, delete)
//! and updates local state once the store confirms them.

mod engine;
mod error;
pub mod filter;
pub mod group;
pub mod state;

pub use contact_core::{Contact, ContactDraft, ContactStore, TagFilter, KNOWN_TAGS};
pub use engine::ViewEngine;
pub use error::ViewError;
pub use filter::Filters;
pub use group::{ContactGroup, UNGROUPED_KEY};
pub use state::{EngineState, VisibleContacts};
