//! Database models.

use contact_core::Contact;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::Result;

/// A row of the `contacts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContactRow {
    /// Opaque id handed out at creation.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_link: Option<String>,
    /// JSON array of tag strings.
    pub tags: String,
    pub favorite: bool,
}

impl ContactRow {
    /// Build a row from a contact, encoding its tags.
    pub fn from_contact(contact: &Contact) -> Result<Self> {
        Ok(Self {
            id: contact.id.clone(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            image_link: contact.image_link.clone(),
            tags: serde_json::to_string(&contact.tags)?,
            favorite: contact.favorite,
        })
    }

    /// Decode the row into a contact.
    pub fn into_contact(self) -> Result<Contact> {
        let tags: Vec<String> = serde_json::from_str(&self.tags)?;
        Ok(Contact {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            image_link: self.image_link,
            tags,
            favorite: self.favorite,
        })
    }
}
