//! Ratings API.

use reqwest::Method;
use std::sync::Arc;

use crate::{
    client::{Access, ClientInner},
    error::{Error, Result},
    models::{Rating, RatingRequest, RatingValue, RecipeId, UserId},
};

/// API for recipe ratings.
pub struct RatingApi {
    client: Arc<ClientInner>,
}

impl RatingApi {
    pub(crate) fn new(client: Arc<ClientInner>) -> Self {
        Self { client }
    }

    /// Rate a recipe for the first time.
    pub async fn rate(&self, recipe_id: impl Into<RecipeId>, value: i64) -> Result<Rating> {
        let body = RatingRequest {
            recipe_id: recipe_id.into(),
            value: RatingValue::new(value)?,
        };

        self.client
            .send_json(Method::POST, "ratings/", &body, Access::Authenticated)
            .await
    }

    /// Change an existing rating.
    pub async fn update(&self, recipe_id: impl Into<RecipeId>, value: i64) -> Result<Rating> {
        let body = RatingRequest {
            recipe_id: recipe_id.into(),
            value: RatingValue::new(value)?,
        };

        self.client
            .send_json(Method::PUT, "ratings/", &body, Access::Authenticated)
            .await
    }

    /// Rate a recipe, updating the rating if one already exists.
    pub async fn set(&self, recipe_id: impl Into<RecipeId>, value: i64) -> Result<Rating> {
        let recipe_id = recipe_id.into();
        match self.update(recipe_id, value).await {
            Err(Error::NotFound(_)) => self.rate(recipe_id, value).await,
            other => other,
        }
    }

    /// A user's rating of a recipe, if any.
    pub async fn get(
        &self,
        recipe_id: impl Into<RecipeId>,
        user_id: impl Into<UserId>,
    ) -> Result<Option<Rating>> {
        let recipe_id = recipe_id.into().to_string();
        let user_id = user_id.into().to_string();

        let result = self
            .client
            .get_json(
                "ratings/",
                &[("recipe_id", recipe_id.as_str()), ("user_id", user_id.as_str())],
                Access::Authenticated,
            )
            .await;

        match result {
            Ok(rating) => Ok(Some(rating)),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Remove a rating.
    pub async fn remove(&self, recipe_id: impl Into<RecipeId>) -> Result<()> {
        let recipe_id: RecipeId = recipe_id.into();
        // The backend reuses the create payload for deletes; only recipe_id is read.
        let body = serde_json::json!({
            "recipe_id": recipe_id,
            "value": RatingValue::MIN,
        });

        self.client
            .send(
                Method::DELETE,
                "ratings/",
                &[],
                Some(&body),
                Access::Authenticated,
            )
            .await?;
        Ok(())
    }
}
