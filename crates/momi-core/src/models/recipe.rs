use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a recipe within its book.
///
/// Ids are opaque strings: new recipes get a UUIDv7, while recipes created by
/// the web client carry millisecond timestamps and are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved recipe link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(rename = "titel")]
    pub title: String,
    pub link: String,
    /// Category label. Expected to be one of the owning book's categories,
    /// but a label that has since disappeared from the list is still valid.
    #[serde(rename = "kategori")]
    pub category: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Recipe {
    /// Stamp a draft with a fresh id and creation time.
    pub fn from_draft(draft: RecipeDraft) -> Self {
        Self {
            id: RecipeId::new(),
            title: draft.title,
            link: draft.link,
            category: draft.category,
            created_at: super::timestamp_now(),
            is_favorite: draft.is_favorite,
        }
    }

    /// Merge the provided fields. Id and creation time never change.
    pub fn apply(&mut self, update: &RecipeUpdate) {
        if let Some(ref title) = update.title {
            self.title = title.clone();
        }
        if let Some(ref link) = update.link {
            self.link = link.clone();
        }
        if let Some(ref category) = update.category {
            self.category = category.clone();
        }
        if let Some(is_favorite) = update.is_favorite {
            self.is_favorite = is_favorite;
        }
    }
}

/// Input for a new recipe: everything except id and creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub link: String,
    pub category: String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl RecipeDraft {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            category: category.into(),
            is_favorite: false,
        }
    }
}

/// Partial update for an existing recipe. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub link: Option<String>,
    pub category: Option<String>,
    pub is_favorite: Option<bool>,
}

impl RecipeUpdate {
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.link.is_none()
            && self.category.is_none()
            && self.is_favorite.is_none()
    }
}
