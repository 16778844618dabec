//! Favorite commands.

use anyhow::Result;
use badchef::RecipeId;
use clap::Subcommand;

use crate::config::build_client;
use crate::handlers::{cancel_on_ctrl_c, favorite as handlers};
use crate::output::{print_status, print_table, OutputFormat};

#[derive(Subcommand)]
pub enum FavAction {
    /// List favorite recipes
    #[command(alias = "ls")]
    List,

    /// Add a recipe to favorites
    Add {
        /// Recipe ID
        id: RecipeId,
    },

    /// Remove a recipe from favorites
    #[command(alias = "rm")]
    Remove {
        /// Recipe ID
        id: RecipeId,
    },
}

pub async fn handle(action: FavAction, backend: Option<&str>, format: OutputFormat) -> Result<()> {
    match action {
        FavAction::List => list_favorites(backend, format).await,
        FavAction::Add { id } => add_favorite(backend, id, format).await,
        FavAction::Remove { id } => remove_favorite(backend, id, format).await,
    }
}

async fn list_favorites(backend: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = build_client(backend)?;
    let favorites = handlers::list_favorites(&client, &cancel_on_ctrl_c()).await?;

    print_table(favorites, format);
    Ok(())
}

async fn add_favorite(backend: Option<&str>, id: RecipeId, format: OutputFormat) -> Result<()> {
    let client = build_client(backend)?;
    let change = handlers::add_favorite(&client, &cancel_on_ctrl_c(), id).await?;

    print_status(&format!("Added recipe {} to favorites", id), &change, format);
    Ok(())
}

async fn remove_favorite(backend: Option<&str>, id: RecipeId, format: OutputFormat) -> Result<()> {
    let client = build_client(backend)?;
    let change = handlers::remove_favorite(&client, &cancel_on_ctrl_c(), id).await?;

    print_status(&format!("Removed recipe {} from favorites", id), &change, format);
    Ok(())
}
