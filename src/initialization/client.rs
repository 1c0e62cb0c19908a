//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::error_handling::InitializationError;

/// Builds the HTTP client used for snapshot downloads.
///
/// The timeout bounds the whole transfer, not just connection setup, so a
/// stalled download fails instead of hanging the update job.
pub fn init_http_client(timeout_secs: u64) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("geoip_local/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_http_client_builds() {
        let client = init_http_client(5);
        assert!(client.is_ok());
    }
}
