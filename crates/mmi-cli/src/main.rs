mod mood;
mod symbols;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use mmi_core::SymbolDirectory;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mmi-cli")]
#[command(about = "Market mood index command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List or search the symbol directory
    Symbols {
        /// Case-insensitive match against company names and tickers
        #[arg(long)]
        search: Option<String>,

        /// Maximum rows to print
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Analyze the market mood for one company
    Mood {
        /// Company display name, exactly as listed in the symbol directory
        name: String,
    },
}

impl Commands {
    /// Only commands that call the prediction endpoints need `FLOWISE_API_KEY`.
    fn needs_app_config(&self) -> bool {
        matches!(self, Commands::Mood { .. })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directory_config = mmi_core::load_directory_config();
    let app_config = if cli.command.needs_app_config() {
        Some(mmi_core::load_app_config()?)
    } else {
        None
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directory_config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let directory = SymbolDirectory::load(&directory_config.symbols_path)?;

    match (cli.command, app_config) {
        (Commands::Symbols { search, limit }, _) => {
            symbols::run_symbols(&directory, search.as_deref(), limit);
        }
        (Commands::Mood { name }, Some(config)) => {
            mood::run_mood(&config, Arc::new(directory), &name).await?;
        }
        (Commands::Mood { .. }, None) => {
            anyhow::bail!("mood requires the full application config");
        }
    }

    Ok(())
}
