//! SQLite persistence layer for the contact book.
//!
//! This crate provides a durable [`ContactStore`] backed by SQLx with SQLite,
//! plus the free CRUD functions it is built on.
//!
//! # Example
//!
//! ```no_run
//! use database::{ContactDraft, ContactStore, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:contacts.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a contact
//!     let id = db
//!         .create(ContactDraft::new("Ada", "Lovelace", "ada@example.com"))
//!         .await?;
//!     println!("created {id}");
//!
//!     Ok(())
//! }
//! ```

pub mod contact;
pub mod error;
pub mod models;

pub use contact_core::{Contact, ContactDraft, ContactPatch, ContactStore, StoreError};
pub use error::{DatabaseError, Result};
pub use models::ContactRow;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use uuid::Uuid;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 5;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/contacts.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ContactStore for Database {
    async fn get_all(&self) -> std::result::Result<Vec<Contact>, StoreError> {
        Ok(contact::list_contacts(&self.pool).await?)
    }

    async fn get_one(&self, id: &str) -> std::result::Result<Contact, StoreError> {
        Ok(contact::get_contact(&self.pool, id).await?)
    }

    async fn create(&self, draft: ContactDraft) -> std::result::Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let record = Contact::from_draft(id.clone(), draft);
        contact::create_contact(&self.pool, &record).await?;
        tracing::debug!(id = %id, "Inserted contact");
        Ok(id)
    }

    async fn update(&self, id: &str, patch: ContactPatch) -> std::result::Result<(), StoreError> {
        Ok(contact::update_contact(&self.pool, id, &patch).await?)
    }

    async fn delete(&self, id: &str) -> std::result::Result<(), StoreError> {
        Ok(contact::delete_contact(&self.pool, id).await?)
    }

    fn name(&self) -> &str {
        "SQLite"
    }

    async fn is_ready(&self) -> bool {
        !self.pool.is_closed()
    }
}
