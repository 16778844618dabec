//! Recipe handlers.

use anyhow::Result;
use badchef::{
    view::{self, categories, filter_recipes},
    CancelHandle, Instructions, NewRecipe, Recipe, RecipeClient, RecipeDetailView, RecipeFilter,
    RecipeId, Route,
};
use colored::Colorize;
use serde::Serialize;

use super::into_data;
use crate::output::{format_time, truncate, PlainPrint, TableRow};

/// Recipe list entry.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub author: String,
    pub description: String,
    pub created: String,
}

impl From<&Recipe> for RecipeRow {
    fn from(r: &Recipe) -> Self {
        Self {
            id: r.id.to_string(),
            title: r.title.clone(),
            category: r.category.clone().unwrap_or_default(),
            author: r.byline(),
            description: truncate(r.description.trim(), 60),
            created: format_time(r.created_at),
        }
    }
}

impl TableRow for RecipeRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Title", "Category", "Author", "Created"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.category.clone(),
            self.author.clone(),
            self.created.clone(),
        ]
    }
}

impl PlainPrint for RecipeRow {
    fn plain_print(&self) {
        let category = if self.category.is_empty() {
            String::new()
        } else {
            format!(" [{}]", self.category)
        };
        println!(
            "{} {}{}",
            format!("[{}]", self.id).cyan(),
            self.title.bold(),
            category.dimmed()
        );
        println!("   {} | {}", self.author.green(), self.created.dimmed());
        if !self.description.is_empty() {
            println!("   {}", self.description);
        }
    }
}

/// Result of a filtered listing.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeListing {
    pub total: usize,
    pub categories: Vec<String>,
    pub recipes: Vec<RecipeRow>,
}

/// Full recipe page.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub view: RecipeDetailView,
    pub favorite: bool,
}

impl PlainPrint for RecipeDetail {
    fn plain_print(&self) {
        let v = &self.view;
        let heart = if self.favorite {
            " ♥".red().to_string()
        } else {
            String::new()
        };

        println!("{} {}{}", format!("[{}]", v.id).cyan(), v.title.bold(), heart);
        println!("   {}", v.byline.green());
        let meta = v.meta_line();
        if !meta.is_empty() {
            println!("   {}", meta.dimmed());
        }
        if let Some(created) = &v.created_at {
            println!("   {}", created.dimmed());
        }
        if !v.tags.is_empty() {
            println!("   {}", format!("#{}", v.tags.join(" #")).dimmed());
        }

        if !v.description.is_empty() {
            println!();
            println!("{}", v.description);
        }

        println!();
        println!("{}", "Ingredients".bold().underline());
        if v.ingredients.is_empty() {
            println!("   {}", "None listed".dimmed());
        }
        for ingredient in &v.ingredients {
            println!("   • {}", ingredient);
        }

        println!();
        println!("{}", "Instructions".bold().underline());
        if v.instructions.is_empty() {
            println!("   {}", "None listed".dimmed());
        }
        let sectioned = matches!(v.instructions, Instructions::Sections(_));
        for line in v.instructions.to_lines() {
            if sectioned && line.ends_with(':') {
                println!("  {}", line.yellow());
            } else {
                println!("   {}", line);
            }
        }
    }
}

/// Load the recipe list and filter it locally.
pub async fn list_recipes(
    client: &RecipeClient,
    cancel: &CancelHandle,
    filter: &RecipeFilter,
) -> Result<RecipeListing> {
    let api = client.recipes();
    let page = view::open(client, Route::Recipes, cancel, || api.list()).await;
    let recipes = into_data(page)?;

    Ok(RecipeListing {
        total: recipes.len(),
        categories: categories(&recipes),
        recipes: filter_recipes(&recipes, filter)
            .into_iter()
            .map(RecipeRow::from)
            .collect(),
    })
}

/// Load one recipe together with whether it is a favorite.
pub async fn show_recipe(
    client: &RecipeClient,
    cancel: &CancelHandle,
    id: RecipeId,
) -> Result<RecipeDetail> {
    let recipes = client.recipes();
    let favorites = client.favorites();
    let (recipes, favorites) = (&recipes, &favorites);

    let page = view::open(client, Route::RecipeDetail(id), cancel, move || async move {
        futures::try_join!(recipes.get(id), favorites.contains(id))
    })
    .await;
    let (recipe, favorite) = into_data(page)?;

    Ok(RecipeDetail {
        view: RecipeDetailView::from(&recipe),
        favorite,
    })
}

/// Publish a recipe.
pub async fn create_recipe(client: &RecipeClient, recipe: NewRecipe) -> Result<RecipeRow> {
    let created = client.recipes().create(&recipe).await?;
    Ok(RecipeRow::from(&created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use badchef::UserId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recipe_row() {
        let recipe = Recipe {
            id: RecipeId(3),
            title: "Pancakes".into(),
            description: "Fluffy".into(),
            author_id: UserId(9),
            category: Some("Breakfast".into()),
            ..Default::default()
        };

        let row = RecipeRow::from(&recipe);
        assert_eq!(
            row.row(),
            vec!["3", "Pancakes", "Breakfast", "by 9", "-"]
        );
        assert_eq!(RecipeRow::headers().len(), row.row().len());
    }
}
