//! Plain-text rendering of engine output.

use std::fmt::Write;

use contact_core::Contact;
use contact_view::VisibleContacts;

/// Render the grouped list, one section per initial.
pub fn render_list(visible: &VisibleContacts) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Displayed Contacts: {}", visible.displayed_count);

    for group in &visible.groups {
        let _ = writeln!(out, "\n{}", group.key);
        for contact in &group.contacts {
            let star = if contact.favorite { " (Favorite)" } else { "" };
            let _ = writeln!(
                out,
                "  {} {}{}  [{}]",
                contact.last_name, contact.first_name, star, contact.id
            );
        }
    }

    out
}

/// Render the details view of a single contact.
pub fn render_details(contact: &Contact) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// {}", contact.display_name());
    let _ = writeln!(out, "id:       {}", contact.id);
    let _ = writeln!(out, "email:    {}", contact.email);
    let _ = writeln!(out, "image:    {}", contact.image_or_placeholder());
    if !contact.tags.is_empty() {
        let _ = writeln!(out, "tags:     {}", contact.tags.join(", "));
    }
    let _ = writeln!(out, "favorite: {}", if contact.favorite { "yes" } else { "no" });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_core::{ContactDraft, PLACEHOLDER_IMAGE};
    use contact_view::EngineState;

    #[test]
    fn test_render_list() {
        let mut ada = Contact::from_draft("c1", ContactDraft::new("Ada", "Lovelace", "ada@example.com"));
        ada.favorite = true;
        let alan = Contact::from_draft("c2", ContactDraft::new("Alan", "Turing", "alan@example.com"));

        let visible = VisibleContacts::from_state(&EngineState::from_contacts(vec![alan, ada]));
        let text = render_list(&visible);

        assert_eq!(
            text,
            "Displayed Contacts: 2\n\nL\n  Lovelace Ada (Favorite)  [c1]\n\nT\n  Turing Alan  [c2]\n"
        );
    }

    #[test]
    fn test_render_details_uses_placeholder() {
        let contact = Contact::from_draft(
            "c1",
            ContactDraft::new("Ada", "Lovelace", "ada@example.com").with_tag("work"),
        );
        let text = render_details(&contact);
        assert!(text.starts_with("// Ada Lovelace\n"));
        assert!(text.contains(PLACEHOLDER_IMAGE));
        assert!(text.contains("tags:     work"));
        assert!(text.contains("favorite: no"));
    }
}
