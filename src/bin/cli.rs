//! buzzreport CLI
//!
//! Serves the report UI, or runs one-off project listings and reports.

use std::path::PathBuf;
use std::sync::Arc;

use buzzreport::{
    error::{AppError, Result},
    models::Config,
    pipeline::{ReportBackend, Reporter},
    services::ReportQuery,
    web::{self, AppState},
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;

/// buzzreport - BuzzStream outreach reporting bridge
#[derive(Parser, Debug)]
#[command(
    name = "buzzreport",
    version,
    about = "Flatten BuzzStream outreach data into JSON report rows"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server
    Serve {
        /// Address to bind (default: server.bind from config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print the allow-listed projects as JSON
    Projects,

    /// Build a report and print it as JSON
    Report {
        /// Project id
        #[arg(long)]
        project_id: String,

        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,

        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration and credentials
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config).with_env_overrides();
    init_logging(cli.verbose, &config.logging.level);

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    match cli.command {
        Command::Serve { bind } => {
            let reporter = Reporter::from_config(&config)?;
            let state = AppState::new(Arc::new(reporter.clone()), reporter.zone());
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            web::serve(&bind, state).await?;
        }

        Command::Projects => {
            let reporter = Reporter::from_config(&config)?;
            let projects = reporter.projects().await?;
            log::info!("Found {} projects", projects.len());
            println!("{}", serde_json::to_string_pretty(&projects)?);
        }

        Command::Report {
            project_id,
            start,
            end,
            output,
        } => {
            if end < start {
                return Err(AppError::validation("--end is before --start"));
            }

            let reporter = Reporter::from_config(&config)?;
            let zone = reporter.zone();
            let window = zone.day_window(zone.midnight_millis(start)?, zone.midnight_millis(end)?)?;
            let query = ReportQuery { project_id, window };

            let report = reporter.run(&query).await;
            let body = json!({
                "status": "success",
                "websites": report.websites,
                "summary": report.stats,
            });
            let text = serde_json::to_string_pretty(&body)?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, text).await?;
                    log::info!("Report saved to {}", path.display());
                }
                None => println!("{text}"),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            let credentials = config.require_credentials()?;
            log::info!("✓ Config OK (API base {})", config.api.base_url);
            log::info!("✓ Credentials present for key {}", credentials.consumer_key);
        }
    }

    Ok(())
}
