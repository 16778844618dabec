//! Favorite handlers.

use anyhow::Result;
use badchef::{
    view, CancelHandle, Favorite, FavoritesState, RecipeClient, RecipeId, Route,
};
use colored::Colorize;
use serde::Serialize;

use super::into_data;
use crate::output::{PlainPrint, TableRow};

/// Favorite list entry.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteRow {
    pub recipe_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub image: String,
}

impl From<&Favorite> for FavoriteRow {
    fn from(f: &Favorite) -> Self {
        Self {
            recipe_id: f.recipe_id.to_string(),
            title: f.title.clone(),
            author: f.byline(),
            category: f.category.clone().unwrap_or_default(),
            image: f.image().to_string(),
        }
    }
}

impl TableRow for FavoriteRow {
    fn headers() -> Vec<&'static str> {
        vec!["Recipe", "Title", "Author", "Category"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.recipe_id.clone(),
            self.title.clone(),
            self.author.clone(),
            self.category.clone(),
        ]
    }
}

impl PlainPrint for FavoriteRow {
    fn plain_print(&self) {
        println!(
            "{} {} {}",
            "♥".red(),
            format!("[{}]", self.recipe_id).cyan(),
            self.title.bold()
        );
        println!("   {}", self.author.green());
    }
}

/// Result of a favorite toggle.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteChange {
    pub recipe_id: String,
    pub favorite: bool,
    pub total: usize,
}

/// Load the current favorites through the favorites page guard.
async fn load_state(client: &RecipeClient, cancel: &CancelHandle) -> Result<FavoritesState> {
    let api = client.favorites();
    let page = view::open(client, Route::Favorites, cancel, || api.list()).await;
    Ok(FavoritesState::new(into_data(page)?))
}

/// List favorites.
pub async fn list_favorites(client: &RecipeClient, cancel: &CancelHandle) -> Result<Vec<FavoriteRow>> {
    let state = load_state(client, cancel).await?;
    Ok(state.items().iter().map(FavoriteRow::from).collect())
}

/// Add a recipe to favorites.
pub async fn add_favorite(
    client: &RecipeClient,
    cancel: &CancelHandle,
    id: RecipeId,
) -> Result<FavoriteChange> {
    let mut state = load_state(client, cancel).await?;
    let recipe = cancel.run(client.recipes().get(id)).await?;

    let api = client.favorites();
    cancel
        .run(state.like(&api, Favorite::from(&recipe)))
        .await?;

    Ok(FavoriteChange {
        recipe_id: id.to_string(),
        favorite: true,
        total: state.len(),
    })
}

/// Remove a recipe from favorites.
pub async fn remove_favorite(
    client: &RecipeClient,
    cancel: &CancelHandle,
    id: RecipeId,
) -> Result<FavoriteChange> {
    let mut state = load_state(client, cancel).await?;
    let api = client.favorites();

    if state.contains(id) {
        cancel.run(state.unlike(&api, id)).await?;
    } else {
        // Not in our list; make sure the server agrees.
        cancel.run(api.remove(id)).await?;
    }

    Ok(FavoriteChange {
        recipe_id: id.to_string(),
        favorite: false,
        total: state.len(),
    })
}
