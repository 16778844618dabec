//! Favorite models.

use serde::{Deserialize, Deserializer, Serialize};

use super::{FavoriteId, Recipe, RecipeId, UserId};

/// Placeholder image for recipes without one.
pub const DEFAULT_IMAGE: &str = "assets/bruschetta.png";

/// A favorited recipe as listed by `/favorites/all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    /// Favorited recipe.
    pub recipe_id: RecipeId,
    /// Recipe title.
    #[serde(default)]
    pub title: String,
    /// Recipe author. The backend sends this as either a number or a string.
    #[serde(default, deserialize_with = "lenient_string")]
    pub author_id: Option<String>,
    /// Recipe category.
    #[serde(default)]
    pub category: Option<String>,
    /// Recipe image.
    #[serde(default)]
    pub image_source: Option<String>,
    /// Preparation time.
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
    /// Serving size.
    #[serde(default, deserialize_with = "lenient_string")]
    pub serves: Option<String>,
}

impl Favorite {
    /// Image to show, falling back to the placeholder.
    pub fn image(&self) -> &str {
        self.image_source.as_deref().unwrap_or(DEFAULT_IMAGE)
    }

    /// Author line for cards.
    pub fn byline(&self) -> String {
        match self.author_id.as_deref() {
            Some(author) if !author.is_empty() => format!("by {}", author),
            _ => "by Unknown".to_owned(),
        }
    }
}

impl From<&Recipe> for Favorite {
    fn from(r: &Recipe) -> Self {
        Self {
            recipe_id: r.id,
            title: r.title.clone(),
            author_id: r
                .author
                .clone()
                .or_else(|| (r.author_id.get() > 0).then(|| r.author_id.to_string())),
            category: r.category.clone(),
            image_source: r.image_source.clone(),
            time: r.time.clone(),
            serves: r.serves.clone(),
        }
    }
}

/// Request body for adding or removing a favorite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FavoriteRef {
    pub recipe_id: RecipeId,
}

/// The stored association returned by `POST /favorites`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoriteRecord {
    #[serde(default)]
    pub id: Option<FavoriteId>,
    #[serde(default)]
    pub user_id: UserId,
    pub recipe_id: RecipeId,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
