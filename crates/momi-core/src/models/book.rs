use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recipe::{Recipe, RecipeId};

/// Unique identifier for a recipe book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    /// Id of the book created for a fresh installation or by legacy migration.
    pub const DEFAULT: &'static str = "default";

    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn default_book() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, colored collection of recipes and their categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeBook {
    pub id: BookId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl RecipeBook {
    pub fn new(name: String, color: String) -> Self {
        Self::with_contents(BookId::new(), name, color, Vec::new(), Vec::new())
    }

    pub fn with_contents(
        id: BookId,
        name: String,
        color: String,
        recipes: Vec<Recipe>,
        categories: Vec<String>,
    ) -> Self {
        Self {
            id,
            name,
            color,
            recipes,
            categories,
            created_at: super::timestamp_now(),
        }
    }

    pub fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    pub fn recipe_mut(&mut self, id: &RecipeId) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| &r.id == id)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    /// Merge the provided fields. Id and creation time never change.
    pub fn apply(&mut self, update: BookUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(recipes) = update.recipes {
            self.recipes = recipes;
        }
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
    }
}

/// Partial update for a book. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub recipes: Option<Vec<Recipe>>,
    pub categories: Option<Vec<String>>,
}

impl BookUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_json_uses_web_client_names() {
        let book = RecipeBook::new("Sommer".into(), "#10b981".into());
        let value = serde_json::to_value(&book).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["recipes"], serde_json::json!([]));

        let back: RecipeBook = serde_json::from_value(value).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_apply_merges_only_given_fields() {
        let mut book = RecipeBook::new("Sommer".into(), "#10b981".into());
        book.categories.push("Salat".into());
        let id = book.id.clone();
        book.apply(BookUpdate::rename("Vinter"));
        assert_eq!(book.id, id);
        assert_eq!(book.name, "Vinter");
        assert_eq!(book.color, "#10b981");
        assert_eq!(book.categories, vec!["Salat".to_string()]);
    }
}
