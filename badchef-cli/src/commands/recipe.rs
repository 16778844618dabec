//! Recipe commands.

use anyhow::Result;
use badchef::{NewRecipe, RecipeFilter, RecipeId};
use clap::Subcommand;
use colored::Colorize;

use crate::config::build_client;
use crate::handlers::{cancel_on_ctrl_c, recipe as handlers};
use crate::output::{print_item, print_table, OutputFormat};

#[derive(Subcommand)]
pub enum RecipeAction {
    /// List recipes
    #[command(alias = "ls")]
    List {
        /// Search title, description, category and tags
        #[arg(short, long)]
        search: Option<String>,
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show a recipe
    Show {
        /// Recipe ID
        id: RecipeId,
    },

    /// Publish a recipe
    Create {
        /// Title
        #[arg(short, long)]
        title: String,
        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Ingredients, one per line or separated by ';'
        #[arg(short, long, default_value = "")]
        ingredients: String,
        /// Instructions, one step per line
        #[arg(short = 's', long, default_value = "")]
        instructions: String,
    },
}

pub async fn handle(
    action: RecipeAction,
    backend: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    match action {
        RecipeAction::List { search, category } => {
            let filter = RecipeFilter::default()
                .query(search.unwrap_or_default())
                .category(category.unwrap_or_default());
            list_recipes(backend, &filter, format, verbose).await
        }
        RecipeAction::Show { id } => show_recipe(backend, id, format).await,
        RecipeAction::Create {
            title,
            description,
            ingredients,
            instructions,
        } => {
            let recipe = NewRecipe {
                title,
                description,
                ingredients,
                instructions,
            };
            create_recipe(backend, recipe, format).await
        }
    }
}

async fn list_recipes(
    backend: Option<&str>,
    filter: &RecipeFilter,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let client = build_client(backend)?;
    let listing = handlers::list_recipes(&client, &cancel_on_ctrl_c(), filter).await?;

    if matches!(format, OutputFormat::Plain) {
        if verbose && !listing.categories.is_empty() {
            println!("Categories: {}\n", listing.categories.join(", ").dimmed());
        }
        if !filter.is_empty() {
            println!(
                "{}\n",
                format!("{} of {} recipes", listing.recipes.len(), listing.total).dimmed()
            );
        }
    }

    print_table(listing.recipes, format);
    Ok(())
}

async fn show_recipe(backend: Option<&str>, id: RecipeId, format: OutputFormat) -> Result<()> {
    let client = build_client(backend)?;
    let detail = handlers::show_recipe(&client, &cancel_on_ctrl_c(), id).await?;

    print_item(&detail, format);
    Ok(())
}

async fn create_recipe(backend: Option<&str>, recipe: NewRecipe, format: OutputFormat) -> Result<()> {
    let client = build_client(backend)?;
    let row = handlers::create_recipe(&client, recipe).await?;

    print_table(vec![row], format);
    Ok(())
}
