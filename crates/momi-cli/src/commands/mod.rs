pub mod book;
pub mod category;
pub mod config;
pub mod import;
pub mod recipe;
pub mod share;

use std::io::Write;

use clap::Subcommand;
use momi_books::BookRepository;
use momi_core::config::MomiConfig;
use momi_core::error::MomiError;
use momi_core::models::book::{BookId, RecipeBook};
use momi_store::{KeyValueStore, SqliteStore};

#[derive(Subcommand)]
pub enum Command {
    /// Initialize and show Momi configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
    /// Manage recipe books
    Book {
        #[command(subcommand)]
        action: book::BookAction,
    },
    /// Manage recipes in the active book
    Recipe {
        #[command(subcommand)]
        action: recipe::RecipeAction,
    },
    /// Manage categories in the active book
    Category {
        #[command(subcommand)]
        action: category::CategoryAction,
    },
    /// Print a share link for a book
    Share(share::ShareArgs),
    /// Import a book from a share link or token
    Import(import::ImportArgs),
}

pub fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Config { action } => config::run(action),
        Command::Book { action } => book::run(action),
        Command::Recipe { action } => recipe::run(action),
        Command::Category { action } => category::run(action),
        Command::Share(args) => share::run(args),
        Command::Import(args) => import::run(args),
    }
}

/// Load config and open the library in the Momi database, migrating legacy
/// data on the way.
pub(crate) fn open() -> anyhow::Result<(MomiConfig, BookRepository<SqliteStore>)> {
    let config = MomiConfig::load()?;
    let db_path = MomiConfig::db_path()?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::debug!(path = %db_path.display(), "opening library");
    let store = momi_store::open_store(&db_path)?;
    let repo = momi_books::open_library(store, &config)?;
    Ok((config, repo))
}

/// Find a book by exact id, then by case-insensitive name.
pub(crate) fn find_book<'a>(books: &'a [RecipeBook], selector: &str) -> Option<&'a RecipeBook> {
    let lower = selector.to_lowercase();
    books
        .iter()
        .find(|b| b.id.as_str() == selector)
        .or_else(|| books.iter().find(|b| b.name.to_lowercase() == lower))
}

pub(crate) fn resolve_book<S: KeyValueStore>(
    repo: &BookRepository<S>,
    selector: &str,
) -> Result<BookId, MomiError> {
    find_book(repo.books(), selector)
        .map(|b| b.id.clone())
        .ok_or_else(|| MomiError::BookNotFound {
            id: selector.to_string(),
        })
}

/// Ask a yes/no question on stderr. Anything but `y`/`yes` is a no.
pub(crate) fn confirm(prompt: &str) -> anyhow::Result<bool> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Color swatch for a `#rrggbb` book color.
pub(crate) fn swatch(color: &str) -> comfy_table::Color {
    let hex = color.trim_start_matches('#');
    let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
    match (hex.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => comfy_table::Color::Rgb { r, g, b },
        _ => comfy_table::Color::Reset,
    }
}
