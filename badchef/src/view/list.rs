//! Local search and filtering over a fetched recipe list.

use std::collections::BTreeSet;

use crate::models::Recipe;

/// Search box and category picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub query: Option<String>,
    pub category: Option<String>,
}

impl RecipeFilter {
    /// Set the search text. Blank text clears it.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.trim().is_empty()).then(|| query.trim().to_owned());
        self
    }

    /// Restrict to one category. Blank clears it.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.trim().is_empty()).then(|| category.trim().to_owned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.category.is_none()
    }

    pub fn accepts(&self, recipe: &Recipe) -> bool {
        let category_ok = match &self.category {
            Some(wanted) => recipe
                .category
                .as_deref()
                .map_or(false, |c| c.trim().eq_ignore_ascii_case(wanted)),
            None => true,
        };

        category_ok && self.query.as_deref().map_or(true, |q| recipe.matches(q))
    }
}

/// Recipes passing the filter, in their original order.
pub fn filter_recipes<'a>(recipes: &'a [Recipe], filter: &RecipeFilter) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| filter.accepts(r)).collect()
}

/// Distinct categories present in the list, sorted.
pub fn categories(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .filter_map(|r| r.category.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeId;

    fn recipe(id: i64, title: &str, category: Option<&str>) -> Recipe {
        Recipe {
            id: RecipeId(id),
            title: title.into(),
            category: category.map(Into::into),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe(1, "Tomato Soup", Some("Soup")),
            recipe(2, "Bruschetta", Some("Appetizer")),
            recipe(3, "Miso Soup", Some("soup")),
            recipe(4, "Toast", None),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        let recipes = sample();
        let filter = RecipeFilter::default().query("   ");
        assert!(filter.is_empty());
        assert_eq!(filter_recipes(&recipes, &filter).len(), 4);
    }

    #[test]
    fn test_query_and_category() {
        let recipes = sample();

        let ids = |f: &RecipeFilter| -> Vec<i64> {
            filter_recipes(&recipes, f).iter().map(|r| r.id.get()).collect()
        };

        assert_eq!(ids(&RecipeFilter::default().query("soup")), vec![1, 3]);
        assert_eq!(ids(&RecipeFilter::default().category("SOUP")), vec![1, 3]);
        assert_eq!(
            ids(&RecipeFilter::default().query("miso").category("soup")),
            vec![3]
        );
        assert!(ids(&RecipeFilter::default().category("Dessert")).is_empty());
    }

    #[test]
    fn test_categories() {
        assert_eq!(categories(&sample()), vec!["Appetizer", "Soup", "soup"]);
    }
}
