//! Data models for recipe platform entities.

mod favorite;
mod ids;
mod rating;
mod recipe;
mod user;

pub use favorite::{Favorite, FavoriteRecord, FavoriteRef, DEFAULT_IMAGE};
pub use ids::{FavoriteId, RatingId, RecipeId, UserId};
pub use rating::{Rating, RatingRequest, RatingValue};
pub use recipe::{NewRecipe, Recipe};
pub use user::{Credential, LoginRequest, NewUser, TokenResponse, User};
