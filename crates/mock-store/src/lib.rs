//! Mock contact stores for exercising the view layer.
//!
//! This crate provides implementations of the `ContactStore` trait for testing:
//! - `MemoryStore` - Keeps records in memory, in insertion order
//! - `FailingStore` - Wraps another store and fails selected operations on demand
//! - `DelayedStore` - Wraps another store with artificial latency
//!
//! For durable storage, use the `database` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_store::{ContactDraft, ContactStore, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_store::StoreError> {
//!     let store = MemoryStore::new();
//!
//!     let id = store
//!         .create(ContactDraft::new("Ada", "Lovelace", "ada@example.com"))
//!         .await?;
//!
//!     let contact = store.get_one(&id).await?;
//!     println!("Stored: {}", contact.display_name());
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod memory;

// Re-export contact-core types for convenience
pub use contact_core::{async_trait, Contact, ContactDraft, ContactPatch, ContactStore, StoreError};

pub use delayed::DelayedStore;
pub use failing::{FailingStore, Operation};
pub use memory::MemoryStore;
