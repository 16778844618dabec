//! Favorites API.

use reqwest::Method;
use std::sync::Arc;

use crate::{
    client::{Access, ClientInner},
    error::{Error, Result},
    models::{Favorite, FavoriteRecord, FavoriteRef, RecipeId},
};

/// API for the current user's favorites.
pub struct FavoriteApi {
    client: Arc<ClientInner>,
}

impl FavoriteApi {
    pub(crate) fn new(client: Arc<ClientInner>) -> Self {
        Self { client }
    }

    /// List favorited recipes.
    pub async fn list(&self) -> Result<Vec<Favorite>> {
        self.client
            .get_json("favorites/all", &[], Access::Authenticated)
            .await
    }

    /// Add a recipe to favorites.
    pub async fn add(&self, recipe_id: impl Into<RecipeId>) -> Result<FavoriteRecord> {
        let body = FavoriteRef {
            recipe_id: recipe_id.into(),
        };

        self.client
            .send_json(Method::POST, "favorites", &body, Access::Authenticated)
            .await
    }

    /// Remove a recipe from favorites.
    ///
    /// A 404 means the association is already gone and counts as success.
    pub async fn remove(&self, recipe_id: impl Into<RecipeId>) -> Result<()> {
        let body = FavoriteRef {
            recipe_id: recipe_id.into(),
        };

        let result = self
            .client
            .send(
                Method::DELETE,
                "favorites",
                &[],
                Some(&body),
                Access::Authenticated,
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(Error::NotFound(detail)) => {
                log::debug!(
                    "favorite {} already removed: {}",
                    body.recipe_id,
                    detail
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Check whether a recipe is favorited.
    pub async fn contains(&self, recipe_id: impl Into<RecipeId>) -> Result<bool> {
        let id = recipe_id.into().to_string();

        let result = self
            .client
            .send::<()>(
                Method::GET,
                "favorites",
                &[("recipe_id", id.as_str())],
                None,
                Access::Authenticated,
            )
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(Error::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
