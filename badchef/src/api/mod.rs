//! API modules.

mod favorite;
mod rating;
mod recipe;
mod user;

pub use favorite::FavoriteApi;
pub use rating::RatingApi;
pub use recipe::RecipeApi;
pub use user::UserApi;
