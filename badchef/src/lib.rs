//! Rust client library for the Bad Chef recipe platform.

pub mod api;
pub mod cancel;
pub mod client;
pub mod error;
pub mod models;
pub mod parser;
pub mod session;
pub mod store;
pub mod view;

// Re-export main types
pub use cancel::{CancelHandle, CancelOnDrop};
pub use client::{HttpConfig, RecipeClient, RecipeClientBuilder};
pub use error::{Error, ErrorKind, Result};

// Re-export commonly used models
pub use models::{
    Credential, Favorite, FavoriteRecord, NewRecipe, Rating, RatingValue, Recipe, RecipeId, User,
    UserId,
};
pub use parser::{Instructions, Section};
pub use session::{Decision, GuardPolicy, GuardState, Route, RouteGuard, SessionValidator, Validity};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

// Re-export view types
pub use view::{FavoritesState, LoadOutcome, Page, PageState, RecipeDetailView, RecipeFilter};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_client_builder() {
        let client = RecipeClient::builder().build();
        assert!(client.is_ok());

        let client = client.unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_client_with_stored_token() {
        let store = Arc::new(MemoryTokenStore::with_token("test_token"));
        let client = RecipeClient::builder()
            .base_url("http://127.0.0.1:9")
            .token_store(store)
            .build()
            .unwrap();

        assert!(client.is_authenticated());
        assert_eq!(client.logout().unwrap(), Route::Login);
        assert!(!client.is_authenticated());
    }
}
