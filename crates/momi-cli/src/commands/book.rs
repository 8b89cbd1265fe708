use clap::Subcommand;
use comfy_table::{Cell, Color, Table};
use console::style;
use momi_core::models::book::BookUpdate;

use super::{confirm, open, resolve_book, swatch};

#[derive(Subcommand)]
pub enum BookAction {
    /// List all books
    List,
    /// Create a new book and switch to it
    Add {
        /// Book name
        name: String,
        /// Accent color (e.g. "#10b981"); cycles the palette if omitted
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename a book or change its color
    Rename {
        /// Book id or name
        book: String,
        /// New name
        name: String,
        /// New accent color
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a book and all of its recipes
    Delete {
        /// Book id or name
        book: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Switch the active book
    Use {
        /// Book id or name
        book: String,
    },
}

pub fn run(action: BookAction) -> anyhow::Result<()> {
    let (_config, mut repo) = open()?;

    match action {
        BookAction::List => {
            let mut table = Table::new();
            table.set_header(vec!["", "NAME", "COLOR", "RECIPES", "CATEGORIES", "CREATED", "ID"]);
            for book in repo.books() {
                let active = &book.id == repo.active_book_id();
                let name = Cell::new(&book.name);
                table.add_row(vec![
                    Cell::new(if active { "*" } else { "" }).fg(Color::Green),
                    if active { name.fg(Color::Green) } else { name },
                    Cell::new(&book.color).fg(swatch(&book.color)),
                    Cell::new(book.recipes.len()),
                    Cell::new(book.categories.len()),
                    Cell::new(book.created_at.format("%Y-%m-%d").to_string()),
                    Cell::new(&book.id),
                ]);
            }
            println!("{table}");
            println!("{} books total", repo.books().len());
            Ok(())
        }
        BookAction::Add { name, color } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("Book name cannot be empty");
            }
            let id = repo.add_book(name, color.as_deref())?;
            println!("{} Added book '{}' ({})", style("✓").green(), name, id);
            Ok(())
        }
        BookAction::Rename { book, name, color } => {
            let id = resolve_book(&repo, &book)?;
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("Book name cannot be empty");
            }
            let update = BookUpdate {
                color,
                ..BookUpdate::rename(name)
            };
            repo.update_book(&id, update)?;
            println!("{} Renamed book to '{}'", style("✓").green(), name);
            Ok(())
        }
        BookAction::Delete { book, yes } => {
            let id = resolve_book(&repo, &book)?;
            if repo.books().len() <= 1 {
                anyhow::bail!("Cannot delete the only book");
            }
            let (name, count) = repo
                .book(&id)
                .map(|b| (b.name.clone(), b.recipes.len()))
                .unwrap_or_default();
            if !yes && !confirm(&format!("Delete '{name}' and its {count} recipes?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            repo.delete_book(&id)?;
            println!("{} Deleted book '{}'", style("✓").green(), name);
            if let Some(active) = repo.active_book() {
                println!("  active book: {}", active.name);
            }
            Ok(())
        }
        BookAction::Use { book } => {
            let id = resolve_book(&repo, &book)?;
            repo.set_active_book_id(&id)?;
            let name = repo.active_book().map(|b| b.name.as_str()).unwrap_or_default();
            println!("{} Now using '{}'", style("✓").green(), name);
            Ok(())
        }
    }
}
