//! Process-level initialization: logger and HTTP client.

mod client;
mod logger;

pub use client::init_http_client;
pub use logger::init_logger_with;
