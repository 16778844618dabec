//! Rating handlers.

use anyhow::{Context, Result};
use badchef::{Rating, RatingValue, RecipeClient, RecipeId};
use colored::Colorize;
use serde::Serialize;

use crate::output::PlainPrint;

/// A rating as shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct RatingInfo {
    pub recipe_id: String,
    pub value: Option<u8>,
}

impl From<&Rating> for RatingInfo {
    fn from(r: &Rating) -> Self {
        Self {
            recipe_id: r.recipe_id.to_string(),
            value: Some(r.value.get()),
        }
    }
}

impl RatingInfo {
    /// Filled and empty stars on the platform's scale.
    pub fn stars(&self) -> String {
        let filled = usize::from(self.value.unwrap_or(0));
        let empty = usize::from(RatingValue::MAX).saturating_sub(filled);
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl PlainPrint for RatingInfo {
    fn plain_print(&self) {
        match self.value {
            Some(value) => println!(
                "{} {} {}",
                format!("[{}]", self.recipe_id).cyan(),
                self.stars().yellow(),
                format!("({}/{})", value, RatingValue::MAX).dimmed()
            ),
            None => println!(
                "{} {}",
                format!("[{}]", self.recipe_id).cyan(),
                "Not rated".dimmed()
            ),
        }
    }
}

/// Rate a recipe, replacing any earlier rating.
pub async fn set_rating(client: &RecipeClient, id: RecipeId, value: i64) -> Result<RatingInfo> {
    let rating = client.ratings().set(id, value).await?;
    Ok(RatingInfo::from(&rating))
}

/// The current user's rating of a recipe.
pub async fn show_rating(client: &RecipeClient, id: RecipeId) -> Result<RatingInfo> {
    let me = client.users().me().await?;
    let user_id = me.id.context("Server did not return a user id")?;

    let rating = client.ratings().get(id, user_id).await?;
    Ok(match rating {
        Some(rating) => RatingInfo::from(&rating),
        None => RatingInfo {
            recipe_id: id.to_string(),
            value: None,
        },
    })
}

/// Remove the current user's rating.
pub async fn remove_rating(client: &RecipeClient, id: RecipeId) -> Result<()> {
    client.ratings().remove(id).await?;
    Ok(())
}
