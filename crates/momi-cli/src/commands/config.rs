use clap::Subcommand;
use momi_core::config::MomiConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Initialize ~/.momi/ with default config and database
    Init,
    /// Show current configuration
    Show,
}

pub fn run(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let home = MomiConfig::init()?;
            let config = MomiConfig::load()?;
            let db_path = MomiConfig::db_path()?;

            // Creates the schema and the default book
            let store = momi_store::open_store(&db_path)?;
            let repo = momi_books::open_library(store, &config)?;

            println!("Initialized momi at {}", home.display());
            println!("  config: {}", MomiConfig::config_path()?.display());
            println!("  database: {}", db_path.display());
            println!("  books: {}", repo.books().len());
            Ok(())
        }
        ConfigAction::Show => {
            let config = MomiConfig::load()?;
            let toml_str = toml::to_string_pretty(&config)?;
            println!("{toml_str}");
            Ok(())
        }
    }
}
