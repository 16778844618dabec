//! Favorites with optimistic toggling.

use serde::Serialize;

use crate::api::FavoriteApi;
use crate::error::{Error, Result};
use crate::models::{Favorite, RecipeId};

/// The favorites list as the user sees it.
///
/// Toggles change local state first and then tell the server. When the
/// server refuses, the local change is rolled back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FavoritesState {
    items: Vec<Favorite>,
}

/// Enough to undo one local change.
#[derive(Debug, Clone)]
enum Undo {
    Remove(RecipeId),
    Restore(usize, Favorite),
}

impl FavoritesState {
    pub fn new(items: Vec<Favorite>) -> Self {
        let mut state = Self::default();
        for item in items {
            if !state.contains(item.recipe_id) {
                state.items.push(item);
            }
        }
        state
    }

    pub fn items(&self) -> &[Favorite] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        self.items.iter().any(|f| f.recipe_id == id)
    }

    /// Locally mark a recipe as liked. No-op if it already is.
    fn like_local(&mut self, favorite: Favorite) -> Option<Undo> {
        if self.contains(favorite.recipe_id) {
            return None;
        }
        let id = favorite.recipe_id;
        self.items.push(favorite);
        Some(Undo::Remove(id))
    }

    /// Locally unlike a recipe. No-op if it is not liked.
    fn unlike_local(&mut self, id: RecipeId) -> Option<Undo> {
        let index = self.items.iter().position(|f| f.recipe_id == id)?;
        let removed = self.items.remove(index);
        Some(Undo::Restore(index, removed))
    }

    fn undo(&mut self, undo: Undo) {
        match undo {
            Undo::Remove(id) => self.items.retain(|f| f.recipe_id != id),
            Undo::Restore(index, favorite) => {
                let index = index.min(self.items.len());
                self.items.insert(index, favorite);
            }
        }
    }

    /// Like a recipe. A 401 rolls back and leaves the session logged out.
    pub async fn like(&mut self, api: &FavoriteApi, favorite: Favorite) -> Result<()> {
        let id = favorite.recipe_id;
        let Some(undo) = self.like_local(favorite) else {
            return Ok(());
        };

        match api.add(id).await {
            Ok(_) => Ok(()),
            // The server already has it; local state is right.
            Err(Error::Api { status: 400, .. }) => {
                log::debug!("recipe {} was already a favorite", id);
                Ok(())
            }
            Err(e) => {
                log::warn!("could not favorite recipe {}: {}", id, e);
                self.undo(undo);
                Err(e)
            }
        }
    }

    /// Unlike a recipe. A server-side 404 is treated as already unliked.
    pub async fn unlike(&mut self, api: &FavoriteApi, id: RecipeId) -> Result<()> {
        let Some(undo) = self.unlike_local(id) else {
            return Ok(());
        };

        if let Err(e) = api.remove(id).await {
            log::warn!("could not unfavorite recipe {}: {}", id, e);
            self.undo(undo);
            return Err(e);
        }
        Ok(())
    }

    /// Flip a recipe's liked state. Returns whether it is liked afterwards.
    pub async fn toggle(&mut self, api: &FavoriteApi, favorite: Favorite) -> Result<bool> {
        if self.contains(favorite.recipe_id) {
            self.unlike(api, favorite.recipe_id).await?;
            Ok(false)
        } else {
            self.like(api, favorite).await?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fav(id: i64) -> Favorite {
        Favorite {
            recipe_id: RecipeId(id),
            title: format!("Recipe {}", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_dedups() {
        let state = FavoritesState::new(vec![fav(1), fav(2), fav(1)]);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_add_then_remove_restores_list() {
        let mut state = FavoritesState::new(vec![fav(1), fav(2)]);
        let before = state.clone();

        assert!(state.like_local(fav(3)).is_some());
        assert!(state.contains(RecipeId(3)));
        assert!(state.unlike_local(RecipeId(3)).is_some());

        assert_eq!(state, before);
    }

    #[test]
    fn test_undo_restores_position() {
        let mut state = FavoritesState::new(vec![fav(1), fav(2), fav(3)]);
        let before = state.clone();

        let undo = state.unlike_local(RecipeId(2)).unwrap();
        assert_eq!(state.len(), 2);
        state.undo(undo);
        assert_eq!(state, before);

        let undo = state.like_local(fav(9)).unwrap();
        state.undo(undo);
        assert_eq!(state, before);
    }

    #[test]
    fn test_local_noops() {
        let mut state = FavoritesState::new(vec![fav(1)]);
        assert!(state.like_local(fav(1)).is_none());
        assert!(state.unlike_local(RecipeId(5)).is_none());
        assert_eq!(state.len(), 1);
    }
}
