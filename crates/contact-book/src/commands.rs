//! Subcommands and their execution against the view engine.

use clap::{Args, Subcommand};
use contact_core::{ContactDraft, ContactStore, TagFilter, KNOWN_TAGS};
use contact_view::{ViewEngine, ViewError};

use crate::output::{render_details, render_list};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List contacts grouped by last-name initial
    List {
        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,

        /// Only contacts with this tag ("all" for every contact)
        #[arg(long, default_value = "all")]
        tag: String,

        /// Only favorite contacts
        #[arg(long)]
        favorites: bool,
    },

    /// Show a single contact
    Show { id: String },

    /// Create a contact
    Add(NewContactArgs),

    /// Edit a contact's fields
    Edit {
        id: String,

        #[command(flatten)]
        fields: EditContactArgs,
    },

    /// Delete a contact
    Delete { id: String },

    /// Toggle a contact's favorite flag
    Favorite { id: String },

    /// List the tags offered by the forms
    Tags,
}

#[derive(Debug, Args)]
pub struct NewContactArgs {
    #[arg(long)]
    first: String,

    #[arg(long)]
    last: String,

    #[arg(long)]
    email: String,

    /// Profile picture URL
    #[arg(long)]
    image: Option<String>,

    /// Tag to attach (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
}

impl From<NewContactArgs> for ContactDraft {
    fn from(args: NewContactArgs) -> Self {
        Self {
            first_name: args.first,
            last_name: args.last,
            email: args.email,
            image_link: args.image,
            tags: args.tags,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct EditContactArgs {
    #[arg(long)]
    first: Option<String>,

    #[arg(long)]
    last: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long, conflicts_with = "clear_image")]
    image: Option<String>,

    /// Remove the profile picture
    #[arg(long)]
    clear_image: bool,

    /// Tag to add, or remove if already present (repeatable)
    #[arg(long = "tag")]
    toggle_tags: Vec<String>,
}

impl EditContactArgs {
    /// Apply the given flags on top of the current form values.
    fn apply(self, draft: &mut ContactDraft) {
        if let Some(first) = self.first {
            draft.first_name = first;
        }
        if let Some(last) = self.last {
            draft.last_name = last;
        }
        if let Some(email) = self.email {
            draft.email = email;
        }
        if self.clear_image {
            draft.image_link = None;
        } else if let Some(image) = self.image {
            draft.image_link = Some(image);
        }
        for tag in &self.toggle_tags {
            draft.toggle_tag(tag);
        }
    }
}

/// Execute a command and return the text to print.
pub async fn run<S: ContactStore>(
    engine: &ViewEngine<S>,
    command: Command,
) -> Result<String, ViewError> {
    match command {
        Command::List {
            search,
            tag,
            favorites,
        } => {
            engine.try_load().await?;
            engine.set_search_term(search);
            engine.set_tag_filter(TagFilter::parse(&tag));
            engine.set_favorites_only(favorites);
            Ok(render_list(&engine.visible()))
        }
        Command::Show { id } => {
            let contact = engine.contact(&id).await?;
            Ok(render_details(&contact))
        }
        Command::Add(args) => {
            let id = engine.create_contact(args.into()).await?;
            Ok(format!("Created contact {id}\n"))
        }
        Command::Edit { id, fields } => {
            let current = engine.contact(&id).await?;
            let mut draft = ContactDraft::from(&current);
            fields.apply(&mut draft);
            let updated = engine.update_contact(&id, draft).await?;
            Ok(render_details(&updated))
        }
        Command::Delete { id } => {
            engine.delete_contact(&id).await?;
            Ok(format!("Deleted contact {id}\n"))
        }
        Command::Favorite { id } => {
            let favorite = engine.toggle_favorite(&id).await?;
            let verb = if favorite { "favorited" } else { "unfavorited" };
            Ok(format!("Contact {id} {verb}\n"))
        }
        Command::Tags => Ok(format!("{}\n", KNOWN_TAGS.join("\n"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_store::MemoryStore;

    fn add(first: &str, last: &str, tags: &[&str]) -> Command {
        Command::Add(NewContactArgs {
            first: first.to_string(),
            last: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            image: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
    }

    fn list(search: &str, tag: &str, favorites: bool) -> Command {
        Command::List {
            search: search.to_string(),
            tag: tag.to_string(),
            favorites,
        }
    }

    async fn created_id(engine: &ViewEngine<MemoryStore>, command: Command) -> String {
        let out = run(engine, command).await.unwrap();
        out.trim().trim_start_matches("Created contact ").to_string()
    }

    #[tokio::test]
    async fn test_add_list_and_filter() {
        let engine = ViewEngine::new(MemoryStore::new());
        created_id(&engine, add("Ada", "Lovelace", &["work"])).await;
        created_id(&engine, add("Alan", "Turing", &["friends"])).await;

        let out = run(&engine, list("", "all", false)).await.unwrap();
        assert!(out.starts_with("Displayed Contacts: 2\n"));

        let out = run(&engine, list("", "work", false)).await.unwrap();
        assert!(out.contains("Lovelace Ada"));
        assert!(!out.contains("Turing"));
    }

    #[tokio::test]
    async fn test_favorite_then_favorites_only() {
        let engine = ViewEngine::new(MemoryStore::new());
        let id = created_id(&engine, add("Ada", "Lovelace", &[])).await;
        created_id(&engine, add("Alan", "Turing", &[])).await;

        let out = run(&engine, Command::Favorite { id: id.clone() }).await.unwrap();
        assert_eq!(out, format!("Contact {id} favorited\n"));

        let out = run(&engine, list("", "all", true)).await.unwrap();
        assert!(out.starts_with("Displayed Contacts: 1\n"));
        assert!(out.contains("Lovelace Ada (Favorite)"));
    }

    #[tokio::test]
    async fn test_edit_toggles_tags_and_keeps_other_fields() {
        let engine = ViewEngine::new(MemoryStore::new());
        let id = created_id(&engine, add("Ada", "Lovelace", &["work"])).await;

        let fields = EditContactArgs {
            last: Some("Byron".to_string()),
            toggle_tags: vec!["work".to_string(), "family".to_string()],
            ..EditContactArgs::default()
        };
        run(&engine, Command::Edit { id: id.clone(), fields }).await.unwrap();

        let stored = engine.store().get_one(&id).await.unwrap();
        assert_eq!(stored.display_name(), "Ada Byron");
        assert_eq!(stored.email, "ada@example.com");
        assert_eq!(stored.tags, vec!["family".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_add_is_rejected() {
        let engine = ViewEngine::new(MemoryStore::new());
        let err = run(&engine, add("Ada", "", &[])).await.unwrap_err();
        assert!(matches!(err, ViewError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_delete_and_show_missing() {
        let engine = ViewEngine::new(MemoryStore::new());
        let id = created_id(&engine, add("Ada", "Lovelace", &[])).await;

        run(&engine, Command::Delete { id: id.clone() }).await.unwrap();
        let err = run(&engine, Command::Show { id: id.clone() }).await.unwrap_err();
        assert_eq!(err, ViewError::RecordNotFound(id));
    }

    #[tokio::test]
    async fn test_tags() {
        let engine = ViewEngine::new(MemoryStore::new());
        let out = run(&engine, Command::Tags).await.unwrap();
        assert_eq!(out, "friends\nfamily\nwork\nother\n");
    }
}
