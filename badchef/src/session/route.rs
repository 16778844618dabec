//! Application routes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::models::RecipeId;

/// A navigable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Login and sign-up, at `/`.
    Login,
    /// Recipe list.
    Recipes,
    /// One recipe.
    RecipeDetail(RecipeId),
    /// The current user's favorites.
    Favorites,
}

impl Route {
    /// URL path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_owned(),
            Route::Recipes => "/recipes".to_owned(),
            Route::RecipeDetail(id) => format!("/recipe/{}", id),
            Route::Favorites => "/favorites".to_owned(),
        }
    }

    /// Check if reaching this route needs a valid session.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim().trim_end_matches('/');
        let lower = path.to_lowercase();

        match lower.as_str() {
            "" => Ok(Route::Login),
            "/recipes" => Ok(Route::Recipes),
            "/favorites" => Ok(Route::Favorites),
            _ => match lower.strip_prefix("/recipe/") {
                Some(id) => Ok(Route::RecipeDetail(id.parse()?)),
                None => Err(Error::InvalidArgument(format!("unknown route {:?}", s))),
            },
        }
    }
}
