use momi_core::error::MomiError;
use momi_core::grouping::{compare_labels, group_by_initial, LetterGroup};
use momi_store::KeyValueStore;

use crate::repository::BookRepository;

/// Category list of whichever book is active.
pub struct Categories<'a, S: KeyValueStore> {
    repo: &'a mut BookRepository<S>,
}

impl<'a, S: KeyValueStore> Categories<'a, S> {
    pub(crate) fn new(repo: &'a mut BookRepository<S>) -> Self {
        Self { repo }
    }

    /// Categories in insertion order; empty when there is no active book.
    pub fn list(&self) -> &[String] {
        self.repo
            .active_book()
            .map(|b| b.categories.as_slice())
            .unwrap_or(&[])
    }

    /// Categories sorted by name and grouped by first letter.
    pub fn alphabetical(&self) -> Vec<LetterGroup<'_, String>> {
        group_by_initial(self.list(), |c| c.as_str())
    }

    /// Add a category to the active book. See
    /// [`BookRepository::add_category_to_book`].
    pub fn add(&mut self, name: &str) -> Result<bool, MomiError> {
        let id = self.repo.active_book_id().clone();
        self.repo.add_category_to_book(&id, name)
    }

    /// Each category with the number of recipes filed under it, sorted by
    /// name.
    pub fn counts(&self) -> Vec<(String, usize)> {
        let Some(book) = self.repo.active_book() else {
            return Vec::new();
        };
        let mut out: Vec<(String, usize)> = book
            .categories
            .iter()
            .map(|c| {
                let n = book.recipes.iter().filter(|r| &r.category == c).count();
                (c.clone(), n)
            })
            .collect();
        out.sort_by(|a, b| compare_labels(&a.0, &b.0));
        out
    }

    /// Add any category used by the active book's recipes but missing from
    /// its list.
    pub fn reconcile(&mut self) -> Result<Vec<String>, MomiError> {
        let id = self.repo.active_book_id().clone();
        self.repo.reconcile_categories(&id)
    }
}
