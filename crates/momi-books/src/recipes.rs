use momi_core::error::MomiError;
use momi_core::grouping::{compare_labels, group_by_initial, LetterGroup};
use momi_core::models::recipe::{Recipe, RecipeDraft, RecipeId, RecipeUpdate};
use momi_store::KeyValueStore;

use crate::repository::BookRepository;

/// Recipes of whichever book is active.
///
/// With no active book every read is empty and every write does nothing.
pub struct Recipes<'a, S: KeyValueStore> {
    repo: &'a mut BookRepository<S>,
}

impl<'a, S: KeyValueStore> Recipes<'a, S> {
    pub(crate) fn new(repo: &'a mut BookRepository<S>) -> Self {
        Self { repo }
    }

    /// Recipes in insertion order.
    pub fn list(&self) -> &[Recipe] {
        self.repo
            .active_book()
            .map(|b| b.recipes.as_slice())
            .unwrap_or(&[])
    }

    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.list().iter().find(|r| &r.id == id)
    }

    /// Recipes sorted by title and grouped by first letter.
    pub fn alphabetical(&self) -> Vec<LetterGroup<'_, Recipe>> {
        group_by_initial(self.list(), |r| r.title.as_str())
    }

    /// Favorited recipes sorted by title.
    pub fn favorites(&self) -> Vec<&Recipe> {
        self.sorted_where(|r| r.is_favorite)
    }

    /// Recipes filed under exactly `category`, sorted by title.
    pub fn in_category(&self, category: &str) -> Vec<&Recipe> {
        self.sorted_where(|r| r.category == category)
    }

    pub fn add(&mut self, draft: RecipeDraft) -> Result<Option<RecipeId>, MomiError> {
        let book = self.repo.active_book_id().clone();
        self.repo.add_recipe_to_book(&book, draft)
    }

    pub fn update(&mut self, id: &RecipeId, update: &RecipeUpdate) -> Result<bool, MomiError> {
        let book = self.repo.active_book_id().clone();
        self.repo.update_recipe_in_book(&book, id, update)
    }

    pub fn delete(&mut self, id: &RecipeId) -> Result<bool, MomiError> {
        let book = self.repo.active_book_id().clone();
        self.repo.delete_recipe_from_book(&book, id)
    }

    /// Flip the favorite flag. Returns the new value, or `None` if the recipe
    /// is not in the active book.
    pub fn toggle_favorite(&mut self, id: &RecipeId) -> Result<Option<bool>, MomiError> {
        let Some(current) = self.get(id).map(|r| r.is_favorite) else {
            return Ok(None);
        };
        let book = self.repo.active_book_id().clone();
        self.repo
            .update_recipe_in_book(&book, id, &RecipeUpdate::favorite(!current))?;
        Ok(Some(!current))
    }

    fn sorted_where<F>(&self, keep: F) -> Vec<&Recipe>
    where
        F: Fn(&Recipe) -> bool,
    {
        let mut out: Vec<&Recipe> = self.list().iter().filter(|r| keep(*r)).collect();
        out.sort_by(|a, b| compare_labels(&a.title, &b.title));
        out
    }
}

#[cfg(test)]
mod tests {
    use momi_core::config::MomiConfig;
    use momi_core::models::book::BookId;
    use momi_core::models::recipe::{RecipeDraft, RecipeId, RecipeUpdate};
    use momi_store::MemoryStore;

    use crate::repository::BookRepository;

    fn open() -> BookRepository<MemoryStore> {
        BookRepository::open(MemoryStore::new(), &MomiConfig::default()).unwrap()
    }

    fn add(repo: &mut BookRepository<MemoryStore>, title: &str, category: &str) -> RecipeId {
        repo.recipes()
            .add(RecipeDraft::new(title, format!("https://mad.dk/{title}"), category))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_toggle_favorite_is_an_involution() {
        let mut repo = open();
        let id = add(&mut repo, "Frikadeller", "Aftensmad");

        assert_eq!(repo.recipes().toggle_favorite(&id).unwrap(), Some(true));
        assert!(repo.recipes().get(&id).unwrap().is_favorite);
        assert_eq!(repo.recipes().toggle_favorite(&id).unwrap(), Some(false));
        assert!(!repo.recipes().get(&id).unwrap().is_favorite);
    }

    #[test]
    fn test_toggle_unknown_recipe_is_noop() {
        let mut repo = open();
        add(&mut repo, "Frikadeller", "Aftensmad");
        let before = repo.state().clone();
        assert_eq!(
            repo.recipes().toggle_favorite(&RecipeId::from("nope")).unwrap(),
            None
        );
        assert_eq!(repo.state(), &before);
    }

    #[test]
    fn test_views_are_empty_without_active_book() {
        let mut repo = open();
        add(&mut repo, "Frikadeller", "Aftensmad");
        repo.set_active_book_id(&BookId::from("gone")).unwrap();

        let mut recipes = repo.recipes();
        assert!(recipes.list().is_empty());
        assert!(recipes
            .add(RecipeDraft::new("x", "https://x.dk", "y"))
            .unwrap()
            .is_none());
        assert!(!recipes.delete(&RecipeId::from("x")).unwrap());
        assert!(!recipes
            .update(&RecipeId::from("x"), &RecipeUpdate::favorite(true))
            .unwrap());
    }

    #[test]
    fn test_alphabetical_grouping() {
        let mut repo = open();
        add(&mut repo, "pølser", "Grill");
        add(&mut repo, "Burger", "Grill");
        add(&mut repo, "Pasta", "Aftensmad");

        let recipes = repo.recipes();
        let groups = recipes.alphabetical();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].letter, "B");
        assert_eq!(groups[1].letter, "P");
        let titles: Vec<&str> = groups[1].items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Pasta", "pølser"]);
    }

    #[test]
    fn test_favorites_and_category_filters() {
        let mut repo = open();
        let a = add(&mut repo, "Tiramisu", "Dessert");
        let b = add(&mut repo, "Citronfromage", "Dessert");
        add(&mut repo, "Gullasch", "Aftensmad");
        repo.recipes().toggle_favorite(&a).unwrap();
        repo.recipes().toggle_favorite(&b).unwrap();

        let recipes = repo.recipes();
        let favorites = recipes.favorites();
        let titles: Vec<&str> = favorites.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Citronfromage", "Tiramisu"]);
        assert_eq!(recipes.in_category("Dessert").len(), 2);
        assert!(recipes.in_category("dessert").is_empty());
    }

    #[test]
    fn test_update_and_delete_through_view() {
        let mut repo = open();
        let id = add(&mut repo, "Æblekage", "Dessert");
        let update = RecipeUpdate {
            link: Some("https://ny.dk/aeblekage".into()),
            ..RecipeUpdate::default()
        };
        assert!(repo.recipes().update(&id, &update).unwrap());
        assert_eq!(repo.recipes().get(&id).unwrap().link, "https://ny.dk/aeblekage");
        assert!(repo.recipes().delete(&id).unwrap());
        assert!(repo.recipes().list().is_empty());
    }
}
