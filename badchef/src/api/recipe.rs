//! Recipe API.

use reqwest::Method;
use std::sync::Arc;

use crate::{
    client::{Access, ClientInner},
    error::{Error, Result},
    models::{NewRecipe, Recipe, RecipeId},
};

/// API for recipe operations.
pub struct RecipeApi {
    client: Arc<ClientInner>,
}

impl RecipeApi {
    pub(crate) fn new(client: Arc<ClientInner>) -> Self {
        Self { client }
    }

    /// List all recipes.
    pub async fn list(&self) -> Result<Vec<Recipe>> {
        self.client.get_json("recipes/", &[], Access::Public).await
    }

    /// Get one recipe.
    pub async fn get(&self, id: impl Into<RecipeId>) -> Result<Recipe> {
        let id = id.into();
        self.client
            .get_json(&format!("recipes/{}", id), &[], Access::Public)
            .await
    }

    /// Publish a recipe as the current user.
    pub async fn create(&self, recipe: &NewRecipe) -> Result<Recipe> {
        if recipe.title.trim().is_empty() {
            return Err(Error::InvalidArgument("Title is required".into()));
        }

        self.client
            .send_json(Method::POST, "recipes/", recipe, Access::Authenticated)
            .await
    }
}
