//! Core trait and types for the contact book.
//!
//! This crate provides the shared interface between the view layer and
//! whatever document store holds the contacts. It defines:
//!
//! - [`Contact`] / [`ContactDraft`] / [`ContactPatch`] - The record, its editable fields, and partial updates
//! - [`ContactStore`] - The trait every store backend must implement
//! - [`StoreError`] - Error types for store operations
//! - [`TagFilter`] - Tag selection used by list filtering
//!
//! # Example
//!
//! ```rust
//! use contact_core::{async_trait, Contact, ContactDraft, ContactPatch, ContactStore, StoreError};
//!
//! struct EmptyStore;
//!
//! #[async_trait]
//! impl ContactStore for EmptyStore {
//!     async fn get_all(&self) -> Result<Vec<Contact>, StoreError> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn get_one(&self, id: &str) -> Result<Contact, StoreError> {
//!         Err(StoreError::not_found(id))
//!     }
//!
//!     async fn create(&self, _draft: ContactDraft) -> Result<String, StoreError> {
//!         Err(StoreError::Rejected("read-only".to_string()))
//!     }
//!
//!     async fn update(&self, id: &str, _patch: ContactPatch) -> Result<(), StoreError> {
//!         Err(StoreError::not_found(id))
//!     }
//!
//!     async fn delete(&self, id: &str) -> Result<(), StoreError> {
//!         Err(StoreError::not_found(id))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "EmptyStore"
//!     }
//! }
//! ```

mod contact;
mod error;
mod tag;
mod trait_def;
pub mod validation;

pub use contact::{Contact, ContactDraft, ContactPatch, PLACEHOLDER_IMAGE};
pub use error::StoreError;
pub use tag::{TagFilter, KNOWN_TAGS};
pub use trait_def::ContactStore;
pub use validation::ValidationError;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
