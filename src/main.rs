//! ecom-crawler - Browser-driven product scraper for the webscraper.io
//! demo e-commerce sites.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ecom_crawler::commands::ScrapeCommand;
use ecom_crawler::config::Config;
use ecom_crawler::store::targets::destination_for;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ecom-crawler",
    version,
    about = "Scrapes the webscraper.io demo e-commerce listings into per-page CSV files"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory to write CSV files into
    #[arg(short, long, global = true, env = "ECOM_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Run the browser with a visible window
    #[arg(long, global = true)]
    no_headless: bool,

    /// Upper bound on "load more" clicks per page
    #[arg(long, global = true, env = "ECOM_MAX_CLICKS")]
    max_clicks: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape all configured listing pages
    #[command(alias = "s")]
    Scrape,

    /// List configured targets and their CSV destinations
    Targets,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if cli.no_headless {
        config.headless = false;
    }
    if let Some(clicks) = cli.max_clicks {
        config.max_clicks = clicks;
    }

    match cli.command {
        Commands::Scrape => {
            let cmd = ScrapeCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Targets => {
            println!("Configured targets:\n");
            println!("{:<70} {:<10} {}", "URL", "Paginate", "Destination");
            println!("{:-<70} {:-<10} {:-<12}", "", "", "");

            for target in &config.targets {
                let destination = destination_for(&target.url)
                    .map(|name| format!("{name}.csv"))
                    .unwrap_or_else(|_| "<invalid>".to_string());

                println!(
                    "{:<70} {:<10} {}",
                    target.url,
                    if target.paginate { "yes" } else { "no" },
                    destination
                );
            }
        }
    }

    Ok(())
}
