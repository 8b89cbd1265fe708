use clap::Args;
use console::style;

use super::{confirm, open};

#[derive(Args)]
pub struct ImportArgs {
    /// Share link or bare token
    link: String,
    /// Import without asking
    #[arg(long)]
    yes: bool,
}

pub fn run(args: ImportArgs) -> anyhow::Result<()> {
    let payload = momi_share::decode_link(&args.link)
        .map_err(|e| anyhow::anyhow!("Invalid share link: {e}"))?;
    let summary = payload.summary();

    println!(
        "{} {} ({} recipes, {} categories)",
        style("Shared book:").bold(),
        summary.name,
        summary.recipe_count,
        summary.category_count
    );
    for (title, category) in &summary.preview {
        println!("  • {title} {}", style(format!("[{category}]")).dim());
    }
    if summary.remaining > 0 {
        println!("  … and {} more", summary.remaining);
    }

    if !args.yes && !confirm("Import this book?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let (_config, mut repo) = open()?;
    let id = repo.import_book(payload)?;
    println!(
        "{} Imported '{}' as a new book ({}) and switched to it",
        style("✓").green(),
        summary.name,
        id
    );
    Ok(())
}
