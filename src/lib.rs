//! geoip_local library: local GeoIP lookups with scheduled database refresh
//!
//! This library answers "where is this IP?" against a MaxMind database file
//! on local disk, and keeps that file fresh by periodically downloading a
//! gzip-compressed snapshot and installing it atomically. Lookups and
//! updates share no state: every lookup opens the currently resolved file,
//! and updates replace it with a single rename, so readers never observe a
//! partially written database.
//!
//! # Example
//!
//! ```no_run
//! use geoip_local::{lookup_ip, Config, Enricher};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let enricher = Enricher::with_defaults();
//!
//! match lookup_ip(&config, &enricher, "8.8.8.8")? {
//!     Some(record) => println!("{}, {} ({})", record.city, record.country_code,
//!                              record.timezone.as_deref().unwrap_or("-")),
//!     None => println!("no geo information"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The update pipeline and the scheduler require a Tokio runtime; lookups
//! are plain synchronous reads.

#![warn(missing_docs)]

pub mod config;
mod enrich;
mod error_handling;
pub mod initialization;
mod locator;
mod lookup;
mod metadata;
mod models;
mod scheduler;
mod updater;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use enrich::{EnrichStep, Enricher, RegionNameStep, TimezoneStep};
pub use error_handling::{InitializationError, LookupError, UpdateError};
pub use locator::resolve_database_path;
pub use lookup::lookup_ip;
pub use metadata::{database_status, DatabaseStatus};
pub use models::{GeoRecord, UNKNOWN_CITY};
pub use scheduler::UpdateScheduler;
pub use updater::{update, UpdateReport};
