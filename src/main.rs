//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geoip_local` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use geoip_local::config::{DOWNLOAD_URL_ENV, UPDATE_PERIOD_SECS};
use geoip_local::initialization::init_logger_with;
use geoip_local::{
    database_status, lookup_ip, update, Config, Enricher, LogFormat, LogLevel, UpdateScheduler,
};

#[derive(Debug, Parser)]
#[command(name = "geoip_local", version, about)]
struct Cli {
    /// Writable directory where refreshed databases are installed
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Database filename inside the data directory (and the bundled fallback)
    #[arg(long)]
    db_filename: Option<String>,

    /// Directory holding the bundled fallback database
    #[arg(long)]
    fallback_dir: Option<PathBuf>,

    /// Download URL for the gzip-compressed database snapshot
    #[arg(long)]
    download_url: Option<String>,

    /// Disable the periodic refresh job (manual updates still work)
    #[arg(long)]
    no_auto_update: bool,

    /// Seconds between scheduled refreshes
    #[arg(long, default_value_t = UPDATE_PERIOD_SECS)]
    update_period_secs: u64,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up geographic information for an IPv4 address
    Lookup {
        /// Address to look up
        ip: String,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Download and install a fresh database snapshot now
    Update,
    /// Show the resolved database file and its freshness
    Status {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the periodic refresh job in the foreground until interrupted
    Watch,
}

impl Cli {
    fn to_config(&self) -> Config {
        let defaults = Config::default();
        Config {
            data_dir: self.data_dir.clone().unwrap_or(defaults.data_dir),
            db_filename: self.db_filename.clone().unwrap_or(defaults.db_filename),
            fallback_dir: self.fallback_dir.clone(),
            download_url: self
                .download_url
                .clone()
                .or_else(|| std::env::var(DOWNLOAD_URL_ENV).ok())
                .unwrap_or(defaults.download_url),
            auto_update: !self.no_auto_update,
            update_period_secs: self.update_period_secs,
            download_timeout_secs: defaults.download_timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists). This allows
    // setting GEOIP_DOWNLOAD_URL in .env without exporting it manually.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = cli.log_level.clone();
    let log_format = cli.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let config = cli.to_config();

    match cli.command {
        Command::Lookup { ip, json } => match lookup_ip(&config, &Enricher::with_defaults(), &ip) {
            Ok(Some(record)) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                } else {
                    println!(
                        "{} {}  {} {}  ({:.4}, {:.4})  {}",
                        record.country_code,
                        record
                            .region_name
                            .as_deref()
                            .unwrap_or(record.region.as_str()),
                        record.city,
                        record.timezone.as_deref().unwrap_or("-"),
                        record.latitude,
                        record.longitude,
                        ip
                    );
                }
            }
            Ok(None) => println!("No geo information found for {}", ip),
            Err(e) => {
                eprintln!("geoip_local error: {}", e);
                process::exit(1);
            }
        },
        Command::Update => match update(&config).await {
            Ok(report) => println!(
                "Updated successfully: {} ({} bytes)",
                report.path.display(),
                report.bytes_written
            ),
            Err(e) => {
                eprintln!("Update failed. {}", e);
                process::exit(1);
            }
        },
        Command::Status { json } => {
            let status = database_status(&config);
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("Database: {}", status.path.display());
                match (status.exists, status.modified) {
                    (true, Some(modified)) => {
                        println!(
                            "Last updated: {} ({} bytes)",
                            modified.format("%Y-%m-%d %H:%M:%S UTC"),
                            status.size_bytes.unwrap_or(0)
                        );
                        match status.build_epoch {
                            Some(epoch) => println!("Build epoch: {}", epoch),
                            None => println!("Warning: file does not parse as a GeoIP database"),
                        }
                    }
                    _ => println!(
                        "No GeoIP database found. Run the update command or ship a bundled copy."
                    ),
                }
            }
        }
        Command::Watch => {
            if !config.auto_update {
                log::warn!("Auto-update is disabled; nothing to schedule");
                return Ok(());
            }
            let mut scheduler = UpdateScheduler::new(config);
            scheduler.activate();
            tokio::signal::ctrl_c()
                .await
                .context("Failed to wait for interrupt signal")?;
            scheduler.deactivate();
        }
    }

    Ok(())
}
