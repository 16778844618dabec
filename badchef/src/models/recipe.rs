//! Recipe models.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{RecipeId, UserId};
use crate::parser::{self, Instructions};

/// A recipe as served by `/recipes/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe ID.
    pub id: RecipeId,
    /// Title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Delimited ingredient text.
    #[serde(default)]
    pub ingredients: String,
    /// Raw instructions. Either plain text or a JSON-encoded step list.
    #[serde(default, deserialize_with = "string_or_json")]
    pub instructions: String,
    /// Author user ID.
    #[serde(default)]
    pub author_id: UserId,
    /// Author display name, when the backend joins it in.
    #[serde(default)]
    pub author: Option<String>,
    /// Category.
    #[serde(default)]
    pub category: Option<String>,
    /// Preparation time, free text.
    #[serde(default)]
    pub time: Option<String>,
    /// Serving size, free text.
    #[serde(default)]
    pub serves: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image reference.
    #[serde(default, alias = "imageSource")]
    pub image_source: Option<String>,
    /// Creation time.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Ingredients split into display lines.
    pub fn ingredient_list(&self) -> Vec<String> {
        parser::parse_ingredients(&self.ingredients)
    }

    /// Instructions normalized into one of the known shapes.
    pub fn instruction_steps(&self) -> Instructions {
        Instructions::parse(&self.instructions)
    }

    /// Author shown on cards: the name if known, else the ID.
    pub fn byline(&self) -> String {
        match &self.author {
            Some(name) if !name.trim().is_empty() => format!("by {}", name.trim()),
            _ if self.author_id.get() > 0 => format!("by {}", self.author_id),
            _ => "by Unknown".to_owned(),
        }
    }

    /// Case-insensitive match against title, description, category and tags.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self
                .category
                .as_deref()
                .map_or(false, |c| c.to_lowercase().contains(&query))
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

/// Payload for `POST /recipes/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
}

/// Accept instructions either as a string or as an already-decoded JSON list.
fn string_or_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// The backend emits naive ISO timestamps without an offset; treat them as UTC.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    Ok(NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_backend_recipe() {
        let json = serde_json::json!({
            "id": 3,
            "title": "Bruschetta",
            "description": "Toasted bread",
            "ingredients": "bread\ntomato\nbasil",
            "instructions": "Toast.\nTop.",
            "author_id": 1,
            "created_at": "2025-02-01T10:20:30.123456",
            "category": null
        });

        let recipe: Recipe = serde_json::from_value(json).unwrap();
        assert_eq!(recipe.id, RecipeId(3));
        assert_eq!(recipe.category, None);
        assert_eq!(
            recipe.created_at.map(|d| d.to_rfc3339()),
            Some("2025-02-01T10:20:30.123456+00:00".to_owned())
        );
        assert_eq!(recipe.ingredient_list(), vec!["Bread", "Tomato", "Basil"]);
    }

    #[test]
    fn test_instructions_as_json_array() {
        let json = serde_json::json!({
            "id": 1,
            "title": "Soup",
            "instructions": [{"section": "Broth", "steps": ["boil water"]}]
        });

        let recipe: Recipe = serde_json::from_value(json).unwrap();
        assert!(recipe.instructions.starts_with('['));
        assert!(matches!(
            recipe.instruction_steps(),
            Instructions::Sections(ref s) if s[0].title == "Broth"
        ));
    }

    #[test]
    fn test_matches_and_byline() {
        let recipe = Recipe {
            id: RecipeId(1),
            title: "Pad Thai".into(),
            category: Some("Noodles".into()),
            tags: vec!["spicy".into()],
            author_id: UserId(9),
            ..Default::default()
        };

        assert!(recipe.matches("pad"));
        assert!(recipe.matches("NOODLE"));
        assert!(recipe.matches("spicy"));
        assert!(recipe.matches("  "));
        assert!(!recipe.matches("pizza"));
        assert_eq!(recipe.byline(), "by 9");
    }
}
