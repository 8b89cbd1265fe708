use momi_core::config::MomiConfig;
use momi_core::error::MomiError;
use momi_core::models::book::{BookId, BookUpdate, RecipeBook};
use momi_core::models::library::LibraryState;
use momi_core::models::payload::SharedBookPayload;
use momi_core::models::recipe::{Recipe, RecipeDraft, RecipeId, RecipeUpdate};
use momi_store::{load_or, KeyValueStore};

use crate::categories::Categories;
use crate::recipes::Recipes;
use crate::{ACTIVE_BOOK_KEY, BOOKS_KEY};

/// Owner of all recipe books and the active-book pointer.
///
/// Every mutation builds the next state from a copy, persists it, and only
/// then replaces the in-memory state. A failed write leaves the repository
/// exactly as it was.
pub struct BookRepository<S: KeyValueStore> {
    store: S,
    state: LibraryState,
    palette: Vec<String>,
}

impl<S: KeyValueStore> BookRepository<S> {
    /// Load the library from `store`.
    ///
    /// A store without books gets the default book, which is written back
    /// immediately. A books slot that cannot be read is an error rather than
    /// being replaced. A dangling active id is clamped to the first book.
    pub fn open(store: S, config: &MomiConfig) -> Result<Self, MomiError> {
        let stored: Option<Vec<RecipeBook>> = match store.get(BOOKS_KEY)? {
            Some(value) => Some(serde_json::from_value(value)?),
            None => None,
        };
        let mut repo = match stored {
            Some(books) => {
                let active_book_id: BookId =
                    load_or(&store, ACTIVE_BOOK_KEY, BookId::default_book())?;
                let mut state = LibraryState {
                    books,
                    active_book_id,
                };
                if state.repair_active() {
                    tracing::warn!(
                        active = %state.active_book_id,
                        "active book id did not match any book, using first book"
                    );
                }
                Self {
                    store,
                    state,
                    palette: config.palette.clone(),
                }
            }
            None => {
                let state = LibraryState::with_default_book(
                    &config.default_book_name,
                    &config.color_for_index(0),
                );
                let mut repo = Self {
                    store,
                    state: state.clone(),
                    palette: config.palette.clone(),
                };
                tracing::info!("no books stored, creating default book");
                repo.commit(state)?;
                repo
            }
        };
        repo.dedupe_ids();
        Ok(repo)
    }

    // ── Reads ──

    pub fn books(&self) -> &[RecipeBook] {
        &self.state.books
    }

    pub fn book(&self, id: &BookId) -> Option<&RecipeBook> {
        self.state.book(id)
    }

    pub fn active_book_id(&self) -> &BookId {
        &self.state.active_book_id
    }

    /// The active book, or `None` when the pointer dangles.
    pub fn active_book(&self) -> Option<&RecipeBook> {
        self.state.active_book()
    }

    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    /// True when there is no book yet and one must be created first.
    pub fn needs_onboarding(&self) -> bool {
        self.state.books.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Category view scoped to the active book.
    pub fn categories(&mut self) -> Categories<'_, S> {
        Categories::new(self)
    }

    /// Recipe view scoped to the active book.
    pub fn recipes(&mut self) -> Recipes<'_, S> {
        Recipes::new(self)
    }

    // ── Books ──

    /// Create an empty book, append it, and make it active.
    ///
    /// Without `color`, the palette is cycled by the current book count.
    pub fn add_book(&mut self, name: &str, color: Option<&str>) -> Result<BookId, MomiError> {
        let color = match color {
            Some(c) => c.to_string(),
            None => self.palette_color(self.state.books.len()),
        };
        let book = RecipeBook::new(name.to_string(), color);
        let id = book.id.clone();

        let mut next = self.state.clone();
        next.books.push(book);
        next.active_book_id = id.clone();
        self.commit(next)?;
        tracing::debug!(book = %id, name, "added book");
        Ok(id)
    }

    /// Remove a book. The last remaining book is never removed.
    ///
    /// Deleting the active book moves the pointer to the first remaining
    /// book. Returns whether a book was removed.
    pub fn delete_book(&mut self, id: &BookId) -> Result<bool, MomiError> {
        if self.state.books.len() <= 1 || self.state.book(id).is_none() {
            return Ok(false);
        }
        let mut next = self.state.clone();
        next.books.retain(|b| &b.id != id);
        if &next.active_book_id == id {
            next.active_book_id = next.books[0].id.clone();
        }
        self.commit(next)?;
        tracing::debug!(book = %id, "deleted book");
        Ok(true)
    }

    /// Merge fields into a book. Returns false if the book does not exist.
    pub fn update_book(&mut self, id: &BookId, update: BookUpdate) -> Result<bool, MomiError> {
        let mut next = self.state.clone();
        match next.book_mut(id) {
            Some(book) => book.apply(update),
            None => return Ok(false),
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Point the active book at `id`. The id is not checked: an unknown id
    /// leaves no active book.
    pub fn set_active_book_id(&mut self, id: &BookId) -> Result<(), MomiError> {
        let mut next = self.state.clone();
        next.active_book_id = id.clone();
        self.commit(next)
    }

    /// Copy a shared book into a new book with a fresh id and make it active.
    pub fn import_book(&mut self, payload: SharedBookPayload) -> Result<BookId, MomiError> {
        let book = RecipeBook::with_contents(
            BookId::new(),
            payload.name,
            payload.color,
            payload.recipes,
            payload.categories,
        );
        let id = book.id.clone();
        let (recipes, categories) = (book.recipes.len(), book.categories.len());

        let mut next = self.state.clone();
        next.books.push(book);
        next.active_book_id = id.clone();
        self.commit(next)?;
        tracing::info!(book = %id, recipes, categories, "imported shared book");
        Ok(id)
    }

    // ── Recipes ──

    /// Stamp and append a recipe. Returns `None` if the book does not exist.
    pub fn add_recipe_to_book(
        &mut self,
        book_id: &BookId,
        draft: RecipeDraft,
    ) -> Result<Option<RecipeId>, MomiError> {
        let mut next = self.state.clone();
        let Some(book) = next.book_mut(book_id) else {
            return Ok(None);
        };
        let recipe = Recipe::from_draft(draft);
        let id = recipe.id.clone();
        book.recipes.push(recipe);
        self.commit(next)?;
        tracing::debug!(book = %book_id, recipe = %id, "added recipe");
        Ok(Some(id))
    }

    /// Merge fields into a recipe. Returns false if book or recipe is missing.
    pub fn update_recipe_in_book(
        &mut self,
        book_id: &BookId,
        recipe_id: &RecipeId,
        update: &RecipeUpdate,
    ) -> Result<bool, MomiError> {
        let mut next = self.state.clone();
        let Some(recipe) = next
            .book_mut(book_id)
            .and_then(|b| b.recipe_mut(recipe_id))
        else {
            return Ok(false);
        };
        recipe.apply(update);
        self.commit(next)?;
        Ok(true)
    }

    /// Remove a recipe. Returns false if book or recipe is missing.
    pub fn delete_recipe_from_book(
        &mut self,
        book_id: &BookId,
        recipe_id: &RecipeId,
    ) -> Result<bool, MomiError> {
        let mut next = self.state.clone();
        let Some(book) = next.book_mut(book_id) else {
            return Ok(false);
        };
        let before = book.recipes.len();
        book.recipes.retain(|r| &r.id != recipe_id);
        if book.recipes.len() == before {
            return Ok(false);
        }
        self.commit(next)?;
        tracing::debug!(book = %book_id, recipe = %recipe_id, "deleted recipe");
        Ok(true)
    }

    // ── Categories ──

    /// Append a category to a book.
    ///
    /// The name is trimmed. Returns false without changing anything when the
    /// trimmed name is empty, the book does not exist, or the book already
    /// has exactly this name.
    pub fn add_category_to_book(&mut self, book_id: &BookId, name: &str) -> Result<bool, MomiError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        let mut next = self.state.clone();
        let Some(book) = next.book_mut(book_id) else {
            return Ok(false);
        };
        if book.has_category(trimmed) {
            return Ok(false);
        }
        book.categories.push(trimmed.to_string());
        self.commit(next)?;
        Ok(true)
    }

    /// Add every category label used by a recipe but missing from the book's
    /// list. Returns the labels added, in first-use order.
    pub fn reconcile_categories(&mut self, book_id: &BookId) -> Result<Vec<String>, MomiError> {
        let mut next = self.state.clone();
        let Some(book) = next.book_mut(book_id) else {
            return Ok(Vec::new());
        };
        let mut added: Vec<String> = Vec::new();
        for recipe in &book.recipes {
            let label = recipe.category.trim();
            if label.is_empty() || book.has_category(label) || added.iter().any(|a| a == label) {
                continue;
            }
            added.push(label.to_string());
        }
        if added.is_empty() {
            return Ok(added);
        }
        book.categories.extend(added.iter().cloned());
        self.commit(next)?;
        tracing::info!(book = %book_id, added = added.len(), "restored orphaned categories");
        Ok(added)
    }

    // ── Internals ──

    fn palette_color(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return MomiConfig::default().color_for_index(index);
        }
        self.palette[index % self.palette.len()].clone()
    }

    /// Persist `next` as one unit, then adopt it.
    fn commit(&mut self, next: LibraryState) -> Result<(), MomiError> {
        let books = serde_json::to_value(&next.books)?;
        let active = serde_json::to_value(&next.active_book_id)?;
        self.store
            .set_many(&[(BOOKS_KEY, books), (ACTIVE_BOOK_KEY, active)])?;
        self.state = next;
        Ok(())
    }

    /// Stored data written by hand or by older clients can repeat a book id.
    /// Later duplicates get a fresh id in memory; the fix is persisted with
    /// the next write.
    fn dedupe_ids(&mut self) {
        let mut seen: Vec<BookId> = Vec::with_capacity(self.state.books.len());
        for book in &mut self.state.books {
            if seen.contains(&book.id) {
                let fresh = BookId::new();
                tracing::warn!(duplicate = %book.id, fresh = %fresh, "duplicate book id renamed");
                book.id = fresh;
            }
            seen.push(book.id.clone());
        }
    }
}
