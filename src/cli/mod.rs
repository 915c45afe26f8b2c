pub mod ask;
pub mod config;
pub mod serve;
pub mod stats;
pub mod teach;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

#[derive(Parser)]
#[command(name = "recallchat")]
#[command(about = "Similarity-retrieval chat service with an online teaching loop")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP chat service
    Serve {
        /// Address to bind (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (defaults to the configured port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Ask a single question from the command line
    Ask {
        /// Query text
        query: String,
    },
    /// Teach a query/response pair
    Teach {
        /// Query text to store
        query: String,
        /// Response to return for similar queries
        response: String,
    },
    /// Show corpus and model statistics
    Stats,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show a single configuration value
    Get {
        /// Configuration key (e.g. confidence-threshold)
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (e.g. confidence-threshold)
        key: String,
        /// New value
        value: String,
    },
    /// Reset a configuration value to its default
    Unset {
        /// Configuration key to reset
        key: String,
    },
    /// List all configuration values
    List,
    /// Print the configuration file path
    Path,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let rt = Runtime::new()?;

        rt.block_on(async {
            match self.command {
                Commands::Serve { host, port } => serve::handle_serve_command(host, port).await,
                Commands::Ask { query } => ask::handle_ask_command(query).await,
                Commands::Teach { query, response } => {
                    teach::handle_teach_command(query, response).await
                }
                Commands::Stats => stats::handle_stats_command().await,
                Commands::Config { command } => match command {
                    ConfigCommands::Get { key } => config::handle_get_command(key).await,
                    ConfigCommands::Set { key, value } => {
                        config::handle_set_command(key, value).await
                    }
                    ConfigCommands::Unset { key } => config::handle_unset_command(key).await,
                    ConfigCommands::List => config::handle_list_command().await,
                    ConfigCommands::Path => config::handle_path_command().await,
                },
            }
        })
    }
}
