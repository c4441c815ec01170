mod dashboard;
mod game;
mod logging;
mod run;

use chrono::Utc;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(name = "playsmart")]
#[command(about = "Track and rank current game deals from CheapShark")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, transform and persist one batch of deals
    Run,
    /// Show the ranked deals from the latest run
    Show {
        /// Only deals with at least this discount percentage
        #[arg(long)]
        min_discount: Option<Decimal>,

        /// Only deals at or below this price
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Maximum number of rows to print
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Per-store statistics for the latest run
    Stores,
    /// List one game's current offers across stores
    Game {
        /// CheapShark game ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = playsmart_core::load_app_config()?;
    let started_at = Utc::now();

    let log_file = match (&cli.command, &config.log_dir) {
        (Commands::Run, Some(dir)) => Some(logging::run_log_path(dir, started_at)),
        _ => None,
    };
    let _log_guard = logging::init(&config.log_level, log_file.as_deref())?;

    tracing::debug!(env = %config.env, command = ?cli.command, "starting");

    match cli.command {
        Commands::Run => run::run_pipeline(&config, started_at, log_file.as_deref()).await,
        Commands::Show {
            min_discount,
            max_price,
            limit,
        } => dashboard::run_show(
            &config,
            &dashboard::ShowFilter {
                min_discount,
                max_price,
                limit,
            },
        ),
        Commands::Stores => dashboard::run_stores(&config),
        Commands::Game { id } => game::run_game(&config, &id).await,
    }
}

#[cfg(test)]
mod tests;
