//! Rating models.

use serde::{Deserialize, Serialize};

use super::{RatingId, RecipeId, UserId};
use crate::error::{Error, Result};

/// A rating score. The platform uses a three-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RatingValue(u8);

impl RatingValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    /// Validate a raw score.
    pub fn new(value: i64) -> Result<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(RatingValue(value as u8))
        } else {
            Err(Error::InvalidArgument(format!(
                "Rating must be between {} and {}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        RatingValue::new(value)
    }
}

impl From<RatingValue> for i64 {
    fn from(v: RatingValue) -> Self {
        i64::from(v.0)
    }
}

/// A user's rating of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub id: Option<RatingId>,
    pub recipe_id: RecipeId,
    #[serde(default)]
    pub user_id: UserId,
    pub value: RatingValue,
}

/// Request body for the `/ratings/` endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatingRequest {
    pub recipe_id: RecipeId,
    pub value: RatingValue,
}
