use clap::Parser;
use recallchat::cli::Cli;

fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (ignore errors if missing)
    dotenvy::dotenv().ok();

    recallchat::logging::init_from_env()?;

    let cli = Cli::parse();
    cli.run()
}
