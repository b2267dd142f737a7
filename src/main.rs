//! ebay-watch - Watches eBay auctions for wanted items under a price ceiling.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ebay_watch::commands::{GenerateCommand, ServeCommand};
use ebay_watch::config::Config;
use ebay_watch::ebay::Site;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ebay-watch",
    version,
    about = "Watch eBay auctions for wanted items under a price ceiling",
    long_about = "Reads a search file of \"<max price> <keywords>\" lines, queries the eBay Finding API \
                  for each, and publishes the listings whose price plus shipping is under the ceiling \
                  as an HTML report."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// eBay site to search
    #[arg(short, long, global = true)]
    site: Option<Site>,

    /// Finding API application id
    #[arg(long, global = true, env = "EBAY_APP_ID", hide_env_values = true)]
    app_id: Option<String>,

    /// Search directive file
    #[arg(long, global = true)]
    search_file: Option<PathBuf>,

    /// Report output path
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    /// Delay before each query in milliseconds
    #[arg(long, global = true)]
    delay: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every search once and write the report
    #[command(alias = "g")]
    Generate,

    /// Generate the report, then serve it over HTTP (default)
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "EBAY_LISTEN")]
        listen: Option<String>,
    },

    /// List supported eBay sites
    Sites,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(site) = cli.site {
        config.site = site;
    }
    if let Some(app_id) = cli.app_id {
        config.app_id = Some(app_id);
    }
    if let Some(path) = cli.search_file {
        config.search_file = path;
    }
    if let Some(path) = cli.report {
        config.report_path = path;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }

    match cli.command.unwrap_or(Commands::Serve { listen: None }) {
        Commands::Generate => {
            let report = GenerateCommand::new(config.clone()).execute().await?;
            println!(
                "Wrote {} ({} blocks)",
                config.report_path.display(),
                report.blocks().len()
            );
        }

        Commands::Serve { listen } => {
            if let Some(listen) = listen {
                config.listen = listen;
            }
            ServeCommand::new(config).execute().await?;
        }

        Commands::Sites => {
            println!("Supported eBay sites:\n");
            println!("{:<6} {:<12} {:<10}", "Code", "Global ID", "Currency");
            println!("{:-<6} {:-<12} {:-<10}", "", "", "");

            for site in Site::all() {
                println!("{:<6} {:<12} {:<10}", site.to_string(), site.global_id(), site.currency());
            }
        }
    }

    Ok(())
}
