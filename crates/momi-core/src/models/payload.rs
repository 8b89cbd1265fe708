use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::book::RecipeBook;
use super::recipe::Recipe;
use crate::config::DEFAULT_PALETTE;

/// Payload version written by this build.
pub const PAYLOAD_VERSION: u32 = 1;

/// Number of recipe titles listed in a share preview.
const PREVIEW_TITLES: usize = 10;

/// The portable projection of a book carried inside a share token.
///
/// Book id and creation time are not part of it: the recipient always gets a
/// new book identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedBookPayload {
    /// Absent in tokens produced by the web client, which are version 1.
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub recipes: Vec<Recipe>,
    pub categories: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub shared_at: DateTime<Utc>,
}

fn default_version() -> u32 {
    PAYLOAD_VERSION
}

fn default_color() -> String {
    DEFAULT_PALETTE[0].to_string()
}

impl SharedBookPayload {
    /// Project a book for sharing, stamped with the current time.
    pub fn from_book(book: &RecipeBook) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            name: book.name.clone(),
            color: book.color.clone(),
            recipes: book.recipes.clone(),
            categories: book.categories.clone(),
            shared_at: super::timestamp_now(),
        }
    }

    pub fn summary(&self) -> PayloadSummary {
        PayloadSummary {
            name: self.name.clone(),
            color: self.color.clone(),
            recipe_count: self.recipes.len(),
            category_count: self.categories.len(),
            preview: self
                .recipes
                .iter()
                .take(PREVIEW_TITLES)
                .map(|r| (r.title.clone(), r.category.clone()))
                .collect(),
            remaining: self.recipes.len().saturating_sub(PREVIEW_TITLES),
        }
    }
}

/// What a recipient sees before accepting an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSummary {
    pub name: String,
    pub color: String,
    pub recipe_count: usize,
    pub category_count: usize,
    /// `(title, category)` of the first recipes, in payload order.
    pub preview: Vec<(String, String)>,
    /// Recipes not listed in `preview`.
    pub remaining: usize,
}
