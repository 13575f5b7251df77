//! Contact CRUD operations.

use contact_core::{Contact, ContactPatch};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::ContactRow;

/// Insert a new contact. The contact's id must not exist yet.
pub async fn create_contact(pool: &SqlitePool, contact: &Contact) -> Result<()> {
    let row = ContactRow::from_contact(contact)?;

    sqlx::query(
        r#"
        INSERT INTO contacts (id, first_name, last_name, email, image_link, tags, favorite)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&row.id)
    .bind(&row.first_name)
    .bind(&row.last_name)
    .bind(&row.email)
    .bind(&row.image_link)
    .bind(&row.tags)
    .bind(row.favorite)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a contact by ID.
pub async fn get_contact(pool: &SqlitePool, id: &str) -> Result<Contact> {
    sqlx::query_as::<_, ContactRow>(
        r#"
        SELECT id, first_name, last_name, email, image_link, tags, favorite
        FROM contacts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Contact",
        id: id.to_string(),
    })?
    .into_contact()
}

/// List all contacts in insertion order.
pub async fn list_contacts(pool: &SqlitePool) -> Result<Vec<Contact>> {
    let rows = sqlx::query_as::<_, ContactRow>(
        r#"
        SELECT id, first_name, last_name, email, image_link, tags, favorite
        FROM contacts
        ORDER BY seq
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ContactRow::into_contact).collect()
}

/// Merge a partial update into an existing contact.
///
/// The read and the write happen in one transaction, so the update is a
/// single atomic document write.
pub async fn update_contact(pool: &SqlitePool, id: &str, patch: &ContactPatch) -> Result<()> {
    let mut tx = pool.begin().await?;

    let mut contact = sqlx::query_as::<_, ContactRow>(
        r#"
        SELECT id, first_name, last_name, email, image_link, tags, favorite
        FROM contacts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Contact",
        id: id.to_string(),
    })?
    .into_contact()?;

    contact.apply(patch);
    let row = ContactRow::from_contact(&contact)?;

    sqlx::query(
        r#"
        UPDATE contacts
        SET first_name = ?, last_name = ?, email = ?, image_link = ?, tags = ?,
            favorite = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(&row.first_name)
    .bind(&row.last_name)
    .bind(&row.email)
    .bind(&row.image_link)
    .bind(&row.tags)
    .bind(row.favorite)
    .bind(&row.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Delete a contact by ID.
pub async fn delete_contact(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM contacts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Contact",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Count total contacts.
pub async fn count_contacts(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM contacts
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
