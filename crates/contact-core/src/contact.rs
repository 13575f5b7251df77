//! Contact records, form drafts, and partial updates.

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Image shown for contacts without an image link.
pub const PLACEHOLDER_IMAGE: &str =
    "https://imebehavioralhealth.com/wp-content/uploads/2021/10/user-icon-placeholder-1.png";

/// A person record as held by the store.
///
/// Field names follow the stored document format (`firstName`, `lastName`,
/// `imageLink`). Documents written by other clients may omit fields; missing
/// names decode as empty, missing `tags` as the empty set and missing
/// `favorite` as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Store-assigned id, immutable once created.
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    /// Unordered; duplicates are not removed by the data model.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl Contact {
    /// Build a stored record from submitted form fields.
    pub fn from_draft(id: impl Into<String>, draft: ContactDraft) -> Self {
        Self {
            id: id.into(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            image_link: draft.image_link,
            tags: draft.tags,
            favorite: false,
        }
    }

    /// "First Last", as used for searching and headings.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The image link, or the placeholder when none is set.
    pub fn image_or_placeholder(&self) -> &str {
        match self.image_link.as_deref() {
            Some(link) if !link.trim().is_empty() => link,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Merge a partial update into this record. The id never changes.
    pub fn apply(&mut self, patch: &ContactPatch) {
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(image_link) = &patch.image_link {
            self.image_link = image_link.clone();
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(favorite) = patch.favorite {
            self.favorite = favorite;
        }
    }
}

/// The editable fields of a contact, as submitted by the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContactDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            image_link: None,
            tags: Vec::new(),
        }
    }

    pub fn with_image_link(mut self, link: impl Into<String>) -> Self {
        self.image_link = Some(link.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add the tag when absent, remove it when present.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.tags.iter().any(|t| t == tag) {
            self.tags.retain(|t| t != tag);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    /// Check required fields and length limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_name("first name", &self.first_name)?;
        validation::validate_name("last name", &self.last_name)?;
        validation::validate_email(&self.email)?;
        Ok(())
    }

    /// Trim fields, drop a blank image link, drop blank and repeated tags.
    pub fn normalized(self) -> Self {
        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            image_link: self
                .image_link
                .map(|link| link.trim().to_string())
                .filter(|link| !link.is_empty()),
            tags,
        }
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            image_link: contact.image_link.clone(),
            tags: contact.tags.clone(),
        }
    }
}

/// A partial update. `None` fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the image link.
    pub image_link: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub favorite: Option<bool>,
}

impl ContactPatch {
    /// Update only the favorite flag.
    pub fn favorite(favorite: bool) -> Self {
        Self {
            favorite: Some(favorite),
            ..Self::default()
        }
    }

    /// Overwrite every editable field; the favorite flag is left alone.
    pub fn from_draft(draft: ContactDraft) -> Self {
        Self {
            first_name: Some(draft.first_name),
            last_name: Some(draft.last_name),
            email: Some(draft.email),
            image_link: Some(draft.image_link),
            tags: Some(draft.tags),
            favorite: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Contact {
        Contact::from_draft(
            "c1",
            ContactDraft::new("Ada", "Lovelace", "ada@example.com").with_tag("work"),
        )
    }

    #[test]
    fn test_decode_sparse_document() {
        let json = r#"{"id":"x1","firstName":"Grace","lastName":"Hopper","email":"g@navy.mil"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert!(contact.tags.is_empty());
        assert!(!contact.favorite);
        assert_eq!(contact.image_link, None);
        assert_eq!(contact.image_or_placeholder(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_decode_missing_last_name() {
        let json = r#"{"id":"x2","firstName":"Cher"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.last_name, "");
    }

    #[test]
    fn test_encode_uses_document_field_names() {
        let value = serde_json::to_value(ada()).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["lastName"], "Lovelace");
        assert_eq!(value["tags"], serde_json::json!(["work"]));
        assert_eq!(value["favorite"], false);
        assert!(value.get("imageLink").is_none());
    }

    #[test]
    fn test_blank_image_link_uses_placeholder() {
        let mut contact = ada();
        contact.image_link = Some("   ".to_string());
        assert_eq!(contact.image_or_placeholder(), PLACEHOLDER_IMAGE);

        contact.image_link = Some("https://example.com/ada.png".to_string());
        assert_eq!(contact.image_or_placeholder(), "https://example.com/ada.png");
    }

    #[test]
    fn test_apply_favorite_patch_only_touches_favorite() {
        let mut contact = ada();
        contact.apply(&ContactPatch::favorite(true));
        assert!(contact.favorite);
        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.tags, vec!["work".to_string()]);
    }

    #[test]
    fn test_apply_draft_patch_preserves_favorite() {
        let mut contact = ada();
        contact.favorite = true;

        let draft = ContactDraft::new("Augusta", "King", "ak@example.com")
            .with_image_link("https://example.com/a.png");
        contact.apply(&ContactPatch::from_draft(draft));

        assert_eq!(contact.id, "c1");
        assert_eq!(contact.display_name(), "Augusta King");
        assert!(contact.tags.is_empty());
        assert!(contact.favorite);
        assert_eq!(contact.image_link.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_patch_clears_image_link() {
        let mut contact = ada();
        contact.image_link = Some("https://example.com/a.png".to_string());
        contact.apply(&ContactPatch {
            image_link: Some(None),
            ..ContactPatch::default()
        });
        assert_eq!(contact.image_link, None);
    }

    #[test]
    fn test_toggle_tag() {
        let mut draft = ContactDraft::new("Ada", "Lovelace", "ada@example.com");
        draft.toggle_tag("family");
        draft.toggle_tag("work");
        assert_eq!(draft.tags, vec!["family".to_string(), "work".to_string()]);
        draft.toggle_tag("family");
        assert_eq!(draft.tags, vec!["work".to_string()]);
    }

    #[test]
    fn test_normalized() {
        let draft = ContactDraft {
            first_name: "  Ada ".to_string(),
            last_name: "Lovelace ".to_string(),
            email: " ada@example.com".to_string(),
            image_link: Some("  ".to_string()),
            tags: vec![
                "work".to_string(),
                " ".to_string(),
                "work".to_string(),
                "friends ".to_string(),
            ],
        }
        .normalized();

        assert_eq!(draft.first_name, "Ada");
        assert_eq!(draft.last_name, "Lovelace");
        assert_eq!(draft.email, "ada@example.com");
        assert_eq!(draft.image_link, None);
        assert_eq!(draft.tags, vec!["work".to_string(), "friends".to_string()]);
    }

    #[test]
    fn test_validate_rejects_missing_last_name() {
        let draft = ContactDraft::new("Ada", "", "ada@example.com");
        assert!(matches!(draft.validate(), Err(ValidationError::Empty(_))));
    }

    #[test]
    fn test_draft_from_contact() {
        let draft = ContactDraft::from(&ada());
        assert_eq!(draft.last_name, "Lovelace");
        assert_eq!(draft.tags, vec!["work".to_string()]);
        assert!(ContactPatch::default().is_empty());
        assert!(!ContactPatch::from_draft(draft).is_empty());
    }
}
