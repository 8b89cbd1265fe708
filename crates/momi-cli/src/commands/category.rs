use clap::Subcommand;
use comfy_table::{Cell, Color, Table};
use console::style;

use super::open;

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories with recipe counts
    List,
    /// Add a category
    Add {
        /// Category name
        name: String,
    },
    /// Show the recipes in one category
    Show {
        /// Category name
        name: String,
    },
    /// Add categories that recipes use but the list is missing
    Reconcile,
}

pub fn run(action: CategoryAction) -> anyhow::Result<()> {
    let (_config, mut repo) = open()?;
    let book_name = repo
        .active_book()
        .map(|b| b.name.clone())
        .ok_or_else(|| anyhow::anyhow!("No active book. Use `momi book use` to pick one."))?;

    match action {
        CategoryAction::List => {
            let counts = repo.categories().counts();
            if counts.is_empty() {
                println!("No categories in '{book_name}'. Use `momi category add` to create one.");
                return Ok(());
            }
            let categories = repo.categories();
            let mut table = Table::new();
            table.set_header(vec!["CATEGORY", "RECIPES"]);
            for group in categories.alphabetical() {
                table.add_row(vec![Cell::new(&group.letter).fg(Color::Cyan)]);
                for name in group.items {
                    let count = counts
                        .iter()
                        .find(|(c, _)| c == name)
                        .map_or(0, |(_, n)| *n);
                    let count_cell = Cell::new(count);
                    table.add_row(vec![
                        Cell::new(format!("  {name}")),
                        if count == 0 {
                            count_cell.fg(Color::DarkGrey)
                        } else {
                            count_cell
                        },
                    ]);
                }
            }
            println!("{table}");
            Ok(())
        }
        CategoryAction::Add { name } => {
            if repo.categories().add(&name)? {
                println!("{} Added category '{}'", style("✓").green(), name.trim());
            } else if name.trim().is_empty() {
                anyhow::bail!("Category name cannot be empty");
            } else {
                println!(
                    "{} '{}' already exists in '{}'",
                    style("=").dim(),
                    name.trim(),
                    book_name
                );
            }
            Ok(())
        }
        CategoryAction::Show { name } => {
            let recipes = repo.recipes();
            let found = recipes.in_category(&name);
            if found.is_empty() {
                println!("No recipes in '{name}'.");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_header(vec!["", "TITLE", "LINK", "ID"]);
            for recipe in &found {
                table.add_row(vec![
                    Cell::new(if recipe.is_favorite { "★" } else { "" }).fg(Color::Yellow),
                    Cell::new(&recipe.title),
                    Cell::new(&recipe.link),
                    Cell::new(&recipe.id),
                ]);
            }
            println!("{table}");
            println!("{} recipes in '{}'", found.len(), name);
            Ok(())
        }
        CategoryAction::Reconcile => {
            let added = repo.categories().reconcile()?;
            if added.is_empty() {
                println!("Every recipe category is already listed.");
            } else {
                println!(
                    "{} Added {} categories: {}",
                    style("✓").green(),
                    added.len(),
                    added.join(", ")
                );
            }
            Ok(())
        }
    }
}
