use momi_core::config::MomiConfig;
use momi_core::error::MomiError;
use momi_core::models::book::{BookId, RecipeBook};
use momi_core::models::recipe::Recipe;
use momi_store::KeyValueStore;

use crate::{ACTIVE_BOOK_KEY, BOOKS_KEY, LEGACY_CATEGORIES_KEY, LEGACY_RECIPES_KEY};

/// What [`migrate_legacy`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Flat data was wrapped into the default book.
    Migrated { recipes: usize, categories: usize },
    /// Books already exist; nothing was touched.
    AlreadyMigrated,
    /// No books and no flat data either.
    NothingToMigrate,
}

/// Read a flat slot. A slot that is present but unreadable is an error, so the
/// caller never removes data it could not carry over.
fn read_legacy<S, T>(store: &S, key: &str) -> Result<Vec<T>, MomiError>
where
    S: KeyValueStore + ?Sized,
    T: serde::de::DeserializeOwned,
{
    match store.get(key)? {
        Some(value) => serde_json::from_value(value).map_err(|e| {
            tracing::warn!(key, error = %e, "legacy slot unreadable, leaving it in place");
            MomiError::from(e)
        }),
        None => Ok(Vec::new()),
    }
}

/// Wrap data from before multi-book support into a single default book.
///
/// Runs only when a flat recipe or category list is stored and no books
/// exist yet. The new book is written together with the active id before the
/// flat slots are removed, so an interrupted run is picked up again by the
/// next one without losing data.
pub fn migrate_legacy<S>(store: &S, config: &MomiConfig) -> Result<MigrationOutcome, MomiError>
where
    S: KeyValueStore + ?Sized,
{
    if store.contains(BOOKS_KEY)? {
        return Ok(MigrationOutcome::AlreadyMigrated);
    }
    let has_recipes = store.contains(LEGACY_RECIPES_KEY)?;
    let has_categories = store.contains(LEGACY_CATEGORIES_KEY)?;
    if !has_recipes && !has_categories {
        return Ok(MigrationOutcome::NothingToMigrate);
    }

    let recipes: Vec<Recipe> = read_legacy(store, LEGACY_RECIPES_KEY)?;
    let categories: Vec<String> = read_legacy(store, LEGACY_CATEGORIES_KEY)?;
    let outcome = MigrationOutcome::Migrated {
        recipes: recipes.len(),
        categories: categories.len(),
    };

    let book = RecipeBook::with_contents(
        BookId::default_book(),
        config.default_book_name.clone(),
        config.color_for_index(0),
        recipes,
        categories,
    );
    store.set_many(&[
        (BOOKS_KEY, serde_json::to_value(vec![&book])?),
        (ACTIVE_BOOK_KEY, serde_json::to_value(&book.id)?),
    ])?;
    store.remove(LEGACY_RECIPES_KEY)?;
    store.remove(LEGACY_CATEGORIES_KEY)?;

    tracing::info!(?outcome, "migrated flat recipe data into default book");
    Ok(outcome)
}
