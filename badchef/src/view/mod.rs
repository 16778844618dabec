//! Page state for the recipe views.

mod detail;
mod favorites;
mod list;
mod page;

pub use detail::RecipeDetailView;
pub use favorites::FavoritesState;
pub use list::{categories, filter_recipes, RecipeFilter};
pub use page::{enter_login, open, LoadOutcome, Page, PageState};
