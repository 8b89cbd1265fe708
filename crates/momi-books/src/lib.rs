pub mod categories;
pub mod legacy;
pub mod recipes;
pub mod repository;

use momi_core::config::MomiConfig;
use momi_core::error::MomiError;
use momi_store::KeyValueStore;

pub use categories::Categories;
pub use legacy::{migrate_legacy, MigrationOutcome};
pub use recipes::Recipes;
pub use repository::BookRepository;

/// Slot holding the JSON array of books.
pub const BOOKS_KEY: &str = "recipeBooks";
/// Slot holding the JSON string id of the active book.
pub const ACTIVE_BOOK_KEY: &str = "activeBookId";
/// Flat recipe list written before books existed.
pub const LEGACY_RECIPES_KEY: &str = "recipes";
/// Flat category list written before books existed.
pub const LEGACY_CATEGORIES_KEY: &str = "categories";

/// Upgrade any legacy data in `store`, then open the repository on it.
pub fn open_library<S: KeyValueStore>(
    store: S,
    config: &MomiConfig,
) -> Result<BookRepository<S>, MomiError> {
    let outcome = migrate_legacy(&store, config)?;
    tracing::debug!(?outcome, "legacy migration checked");
    BookRepository::open(store, config)
}
