use serde::{Deserialize, Serialize};

use super::book::{BookId, RecipeBook};

/// Every book on this installation plus the pointer to the selected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryState {
    pub books: Vec<RecipeBook>,
    pub active_book_id: BookId,
}

impl LibraryState {
    /// A library holding only the default book, which is active.
    pub fn with_default_book(name: &str, color: &str) -> Self {
        let book = RecipeBook::with_contents(
            BookId::default_book(),
            name.to_string(),
            color.to_string(),
            Vec::new(),
            Vec::new(),
        );
        Self {
            active_book_id: book.id.clone(),
            books: vec![book],
        }
    }

    pub fn book(&self, id: &BookId) -> Option<&RecipeBook> {
        self.books.iter().find(|b| &b.id == id)
    }

    pub fn book_mut(&mut self, id: &BookId) -> Option<&mut RecipeBook> {
        self.books.iter_mut().find(|b| &b.id == id)
    }

    /// The active book, or `None` when the pointer dangles.
    pub fn active_book(&self) -> Option<&RecipeBook> {
        self.book(&self.active_book_id)
    }

    /// Point a dangling active id at the first book. Returns true if it moved.
    pub fn repair_active(&mut self) -> bool {
        if self.books.is_empty() || self.active_book().is_some() {
            return false;
        }
        self.active_book_id = self.books[0].id.clone();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_library_has_active_default_book() {
        let state = LibraryState::with_default_book("Mine Opskrifter", "#3b82f6");
        assert_eq!(state.books.len(), 1);
        assert_eq!(state.active_book_id.as_str(), BookId::DEFAULT);
        assert_eq!(state.active_book().unwrap().name, "Mine Opskrifter");
    }

    #[test]
    fn test_repair_active_clamps_to_first_book() {
        let mut state = LibraryState::with_default_book("Mine Opskrifter", "#3b82f6");
        state.active_book_id = BookId::from("gone");
        assert!(state.active_book().is_none());
        assert!(state.repair_active());
        assert_eq!(state.active_book_id.as_str(), BookId::DEFAULT);
        assert!(!state.repair_active());
    }

    #[test]
    fn test_repair_active_leaves_empty_library_alone() {
        let mut state = LibraryState {
            books: Vec::new(),
            active_book_id: BookId::from("x"),
        };
        assert!(!state.repair_active());
        assert_eq!(state.active_book_id.as_str(), "x");
    }
}
