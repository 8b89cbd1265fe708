mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "momi", version, about = "Recipe link books you can share with a single link")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::run(cli.command)
}
