//! Rating commands.

use anyhow::Result;
use badchef::RecipeId;
use clap::Subcommand;
use serde_json::json;

use crate::config::build_client;
use crate::handlers::rating as handlers;
use crate::output::{print_item, print_status, OutputFormat};

#[derive(Subcommand)]
pub enum RateAction {
    /// Rate a recipe from 1 to 3
    Set {
        /// Recipe ID
        id: RecipeId,
        /// Rating value
        value: i64,
    },

    /// Show your rating of a recipe
    Show {
        /// Recipe ID
        id: RecipeId,
    },

    /// Remove your rating of a recipe
    #[command(alias = "rm")]
    Remove {
        /// Recipe ID
        id: RecipeId,
    },
}

pub async fn handle(action: RateAction, backend: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = build_client(backend)?;

    match action {
        RateAction::Set { id, value } => {
            let info = handlers::set_rating(&client, id, value).await?;
            print_status(
                &format!("Rated recipe {} {}", id, info.stars()),
                &info,
                format,
            );
        }
        RateAction::Show { id } => {
            let info = handlers::show_rating(&client, id).await?;
            print_item(&info, format);
        }
        RateAction::Remove { id } => {
            handlers::remove_rating(&client, id).await?;
            print_status(
                &format!("Removed rating for recipe {}", id),
                &json!({ "recipe_id": id, "removed": true }),
                format,
            );
        }
    }

    Ok(())
}
