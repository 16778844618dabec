//! Recipe detail formatting.

use serde::Serialize;

use crate::models::{Recipe, RecipeId, DEFAULT_IMAGE};
use crate::parser::{capitalize, Instructions};

/// A recipe prepared for display.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetailView {
    pub id: RecipeId,
    pub title: String,
    pub byline: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Instructions,
    pub category: Option<String>,
    pub time: Option<String>,
    pub serves: Option<String>,
    pub tags: Vec<String>,
    pub image: String,
    pub created_at: Option<String>,
}

impl From<&Recipe> for RecipeDetailView {
    fn from(r: &Recipe) -> Self {
        Self {
            id: r.id,
            title: capitalize(r.title.trim()),
            byline: r.byline(),
            description: capitalize(r.description.trim()),
            ingredients: r.ingredient_list(),
            instructions: r.instruction_steps(),
            category: r.category.as_deref().map(|c| capitalize(c.trim())),
            time: r.time.clone(),
            serves: r.serves.clone(),
            tags: r.tags.clone(),
            image: r
                .image_source
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE.to_owned()),
            created_at: r
                .created_at
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

impl RecipeDetailView {
    /// `category · time · serves`, skipping what is missing.
    pub fn meta_line(&self) -> String {
        [
            self.category.clone(),
            self.time.clone(),
            self.serves.as_ref().map(|s| format!("serves {}", s)),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" \u{00b7} ")
    }
}
