use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jollyscout_core::SearchQuery;

mod output;
mod search;

#[derive(Debug, Parser)]
#[command(name = "jollyscout")]
#[command(about = "Hotel availability scraping and value ranking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a destination and write the full and top-10 scored listings
    Search {
        /// Destination to search for (e.g. "Ölüdeniz")
        destination: String,

        /// Check-in month name as the site's calendar displays it (e.g. "Ağustos")
        #[arg(long)]
        month: String,

        /// Check-in year (e.g. 2025)
        #[arg(long)]
        year: i32,

        /// Day of the month to check in
        #[arg(long)]
        checkin_day: u8,

        /// Day of the month to check out
        #[arg(long)]
        checkout_day: u8,

        /// Number of adults (the site caps this at 9)
        #[arg(long, default_value_t = 2)]
        adults: u8,

        /// Show the browser window while the run executes
        #[arg(long)]
        headed: bool,

        /// Write artifacts somewhere other than the configured output dir
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let mut config = jollyscout_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            destination,
            month,
            year,
            checkin_day,
            checkout_day,
            adults,
            headed,
            output_dir,
        } => {
            if headed {
                config.headless = false;
            }
            let roster = jollyscout_core::load_roster(&config.roster_path)?;
            let query = SearchQuery {
                destination,
                target_month: month,
                target_year: year,
                checkin_day,
                checkout_day,
                adult_count: adults,
            };
            search::run_search(&config, &roster, query, output_dir).await
        }
    }
}
