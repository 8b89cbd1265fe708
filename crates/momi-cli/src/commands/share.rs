use clap::Args;
use console::style;

use super::{open, resolve_book};

#[derive(Args)]
pub struct ShareArgs {
    /// Book id or name; defaults to the active book
    #[arg(long)]
    book: Option<String>,
    /// Print only the token instead of a full link
    #[arg(long)]
    token_only: bool,
}

pub fn run(args: ShareArgs) -> anyhow::Result<()> {
    let (config, repo) = open()?;

    let book = match &args.book {
        Some(selector) => {
            let id = resolve_book(&repo, selector)?;
            repo.book(&id)
        }
        None => repo.active_book(),
    }
    .ok_or_else(|| anyhow::anyhow!("No book to share. Use --book to pick one."))?;

    let token = momi_share::encode(book)?;
    if args.token_only {
        println!("{token}");
        return Ok(());
    }

    let link = momi_share::share_link(&config.share_base_url, &token)?;
    eprintln!(
        "{} Sharing '{}' ({} recipes, {} categories)",
        style("↗").cyan(),
        book.name,
        book.recipes.len(),
        book.categories.len()
    );
    println!("{link}");
    Ok(())
}
