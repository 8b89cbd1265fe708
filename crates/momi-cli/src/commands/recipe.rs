use clap::Subcommand;
use comfy_table::{Cell, Color, Table};
use console::style;
use momi_core::error::MomiError;
use momi_core::models::recipe::{Recipe, RecipeDraft, RecipeId, RecipeUpdate};

use super::{confirm, open};

#[derive(Subcommand)]
pub enum RecipeAction {
    /// List recipes grouped by first letter
    List {
        /// Only recipes in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Save a recipe link
    Add {
        /// Recipe title
        title: String,
        /// Link to the recipe
        link: String,
        /// Category label
        #[arg(long)]
        category: String,
        /// Mark as favorite right away
        #[arg(long)]
        favorite: bool,
    },
    /// Change fields of a recipe
    Edit {
        /// Recipe id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a recipe
    Delete {
        /// Recipe id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Toggle the favorite flag of a recipe
    Favorite {
        /// Recipe id
        id: String,
    },
    /// List favorite recipes
    Favorites,
}

pub fn run(action: RecipeAction) -> anyhow::Result<()> {
    let (_config, mut repo) = open()?;
    let book_name = repo
        .active_book()
        .map(|b| b.name.clone())
        .ok_or_else(|| anyhow::anyhow!("No active book. Use `momi book use` to pick one."))?;
    let mut recipes = repo.recipes();

    match action {
        RecipeAction::List { category } => {
            if let Some(category) = category {
                let found = recipes.in_category(&category);
                if found.is_empty() {
                    println!("No recipes in '{category}'.");
                    return Ok(());
                }
                print_table(found.iter().copied());
                println!("{} recipes in '{}'", found.len(), category);
                return Ok(());
            }

            let groups = recipes.alphabetical();
            if groups.is_empty() {
                println!("No recipes in '{book_name}'. Use `momi recipe add` to save one.");
                return Ok(());
            }
            let mut table = recipe_table();
            for group in &groups {
                table.add_row(vec![Cell::new(&group.letter).fg(Color::Cyan)]);
                for recipe in &group.items {
                    table.add_row(recipe_row(recipe));
                }
            }
            println!("{table}");
            println!("{} recipes in '{}'", recipes.list().len(), book_name);
            Ok(())
        }
        RecipeAction::Add {
            title,
            link,
            category,
            favorite,
        } => {
            let title = title.trim();
            let category = category.trim();
            if title.is_empty() || category.is_empty() {
                anyhow::bail!("Title and category cannot be empty");
            }
            let draft = RecipeDraft {
                is_favorite: favorite,
                ..RecipeDraft::new(title, link.trim(), category)
            };
            let id = recipes
                .add(draft)?
                .ok_or_else(|| anyhow::anyhow!("No active book"))?;
            println!("{} Added '{}' to '{}' ({})", style("✓").green(), title, book_name, id);
            if !repo.categories().list().iter().any(|c| c == category) {
                println!(
                    "  {} '{}' is not in the category list; `momi category add` registers it",
                    style("note:").yellow(),
                    category
                );
            }
            Ok(())
        }
        RecipeAction::Edit {
            id,
            title,
            link,
            category,
        } => {
            let update = RecipeUpdate {
                title,
                link,
                category,
                is_favorite: None,
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to change. Pass --title, --link or --category.");
            }
            if !recipes.update(&RecipeId::from(id.as_str()), &update)? {
                return Err(MomiError::RecipeNotFound { id }.into());
            }
            println!("{} Updated recipe {}", style("✓").green(), id);
            Ok(())
        }
        RecipeAction::Delete { id, yes } => {
            let id = RecipeId::from(id.as_str());
            let title = recipes
                .get(&id)
                .map(|r| r.title.clone())
                .ok_or_else(|| MomiError::RecipeNotFound { id: id.to_string() })?;
            if !yes && !confirm(&format!("Delete '{title}'?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            recipes.delete(&id)?;
            println!("{} Deleted '{}'", style("✓").green(), title);
            Ok(())
        }
        RecipeAction::Favorite { id } => {
            let id = RecipeId::from(id.as_str());
            match recipes.toggle_favorite(&id)? {
                Some(true) => println!("{} Marked {} as favorite", style("★").yellow(), id),
                Some(false) => println!("{} Removed {} from favorites", style("☆").dim(), id),
                None => return Err(MomiError::RecipeNotFound { id: id.to_string() }.into()),
            }
            Ok(())
        }
        RecipeAction::Favorites => {
            let favorites = recipes.favorites();
            if favorites.is_empty() {
                println!("No favorites in '{book_name}'.");
                return Ok(());
            }
            print_table(favorites.iter().copied());
            println!("{} favorites in '{}'", favorites.len(), book_name);
            Ok(())
        }
    }
}

fn recipe_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["", "TITLE", "CATEGORY", "LINK", "ADDED", "ID"]);
    table
}

fn recipe_row(recipe: &Recipe) -> Vec<Cell> {
    vec![
        Cell::new(if recipe.is_favorite { "★" } else { "" }).fg(Color::Yellow),
        Cell::new(&recipe.title),
        Cell::new(&recipe.category),
        Cell::new(&recipe.link),
        Cell::new(recipe.created_at.format("%Y-%m-%d").to_string()),
        Cell::new(&recipe.id),
    ]
}

fn print_table<'a>(recipes: impl Iterator<Item = &'a Recipe>) {
    let mut table = recipe_table();
    for recipe in recipes {
        table.add_row(recipe_row(recipe));
    }
    println!("{table}");
}
