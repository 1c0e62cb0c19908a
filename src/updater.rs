//! Database download and atomic install.
//!
//! The refresh pipeline: fetch the gzip-compressed snapshot to a temporary
//! file, stream-decompress it into a staging file *inside the data
//! directory*, verify the result actually parses as a GeoIP database, and
//! only then rename it over the installed copy. Readers that open the
//! database mid-update therefore see either the fully-old or the fully-new
//! file; a failure at any stage leaves the previous install byte-identical.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tempfile::NamedTempFile;
use url::Url;

use crate::config::{Config, GUNZIP_CHUNK_SIZE, MAX_DOWNLOAD_SIZE};
use crate::error_handling::{get_retry_strategy, UpdateError};
use crate::initialization::init_http_client;

/// Outcome of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    /// Where the new database was installed
    pub path: PathBuf,
    /// Decompressed size of the installed database
    pub bytes_written: u64,
    /// Build epoch reported by the new database's own metadata
    pub build_epoch: u64,
}

/// Downloads and installs a fresh copy of the database.
///
/// Invoked by the scheduled refresh job and by the manual `update` action;
/// both share this single code path. Blocking work (decompression, file
/// I/O) runs inline: this function is only ever called from the scheduler
/// task or an explicit admin action, never on a lookup path.
///
/// # Errors
///
/// [`UpdateError::Download`] for network-side failures (bad URL, HTTP error
/// status, timeout, size cap, or transfer errors after bounded retries with
/// backoff), [`UpdateError::Install`] for everything after the transfer
/// (unreadable download, bad gzip stream, content that is not a GeoIP
/// database, filesystem errors writing or renaming). In every failure case
/// the previously installed database, if any, is untouched.
pub async fn update(config: &Config) -> Result<UpdateReport, UpdateError> {
    let out_path = config.data_path();
    std::fs::create_dir_all(&config.data_dir).map_err(|e| {
        UpdateError::Install(format!(
            "could not create data directory {}: {}",
            config.data_dir.display(),
            e
        ))
    })?;

    let url = parse_download_url(&config.download_url)?;
    let client = init_http_client(config.download_timeout_secs)
        .map_err(|e| UpdateError::Download(e.to_string()))?;

    log::info!("Downloading database snapshot from {}", url);
    let snapshot = tokio_retry::Retry::spawn(get_retry_strategy(), || {
        download_snapshot(&client, url.as_str())
    })
    .await
    .map_err(UpdateError::Download)?;

    let (staged, bytes_written) = decompress_to_staging(snapshot.path(), config, &out_path)?;
    let build_epoch = validate_database(staged.path())?;

    staged.persist(&out_path).map_err(|e| {
        UpdateError::Install(format!(
            "could not move new database into place at {}: {}",
            out_path.display(),
            e.error
        ))
    })?;
    // The downloaded artifact is removed when `snapshot` drops; cleanup is
    // best-effort and cannot affect the result at this point.

    log::info!(
        "Installed database snapshot at {} ({} bytes, build epoch {})",
        out_path.display(),
        bytes_written,
        build_epoch
    );
    Ok(UpdateReport {
        path: out_path,
        bytes_written,
        build_epoch,
    })
}

/// Parses and sanity-checks the configured download URL.
fn parse_download_url(raw: &str) -> Result<Url, UpdateError> {
    let url = Url::parse(raw)
        .map_err(|e| UpdateError::Download(format!("invalid download URL {:?}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UpdateError::Download(format!(
            "unsupported download URL scheme {:?} in {}",
            other, url
        ))),
    }
}

/// Fetches the compressed snapshot into a temporary file.
///
/// Enforces `MAX_DOWNLOAD_SIZE` both on the advertised content length and on
/// the actual received byte count, since the header may be missing or wrong.
/// Returns an error string rather than [`UpdateError`] so the retry wrapper
/// can hand back the final attempt's message.
async fn download_snapshot(client: &reqwest::Client, url: &str) -> Result<NamedTempFile, String> {
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request to {} failed: {}", url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP status {} from {}", status, url));
    }

    if let Some(content_length) = response.content_length() {
        if content_length > MAX_DOWNLOAD_SIZE as u64 {
            return Err(format!(
                "snapshot too large: {} bytes (max: {} bytes)",
                content_length, MAX_DOWNLOAD_SIZE
            ));
        }
    }

    let mut snapshot =
        NamedTempFile::new().map_err(|e| format!("could not create temporary file: {}", e))?;

    let mut received: usize = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| format!("transfer from {} failed: {}", url, e))?
    {
        received += chunk.len();
        // Double-check actual size in case content-length was missing or wrong
        if received > MAX_DOWNLOAD_SIZE {
            return Err(format!(
                "snapshot too large: more than {} bytes received",
                MAX_DOWNLOAD_SIZE
            ));
        }
        snapshot
            .write_all(&chunk)
            .map_err(|e| format!("could not write temporary file: {}", e))?;
    }

    log::debug!("Downloaded {} compressed bytes from {}", received, url);
    Ok(snapshot)
}

/// Stream-decompresses the downloaded snapshot into a staging file.
///
/// The staging file lives in the data directory so the final rename stays on
/// one filesystem and is atomic. Reads fixed-size chunks until end of
/// stream; a bad gzip stream surfaces as a read error mid-loop.
fn decompress_to_staging(
    snapshot_path: &Path,
    config: &Config,
    out_path: &Path,
) -> Result<(NamedTempFile, u64), UpdateError> {
    let compressed = std::fs::File::open(snapshot_path).map_err(|e| {
        UpdateError::Install(format!(
            "downloaded snapshot could not be opened for reading: {}",
            e
        ))
    })?;
    let mut decoder = GzDecoder::new(compressed);

    let mut staged = NamedTempFile::new_in(&config.data_dir).map_err(|e| {
        UpdateError::Install(format!(
            "new database could not be written ({}): {}",
            out_path.display(),
            e
        ))
    })?;

    let mut buffer = [0u8; GUNZIP_CHUNK_SIZE];
    let mut bytes_written: u64 = 0;
    loop {
        let n = decoder.read(&mut buffer).map_err(|e| {
            UpdateError::Install(format!("decompression of downloaded snapshot failed: {}", e))
        })?;
        if n == 0 {
            break;
        }
        staged.write_all(&buffer[..n]).map_err(|e| {
            UpdateError::Install(format!(
                "new database could not be written ({}): {}",
                out_path.display(),
                e
            ))
        })?;
        bytes_written += n as u64;
    }

    Ok((staged, bytes_written))
}

/// Verifies the decompressed bytes parse as a GeoIP database.
///
/// Guards against endpoints that return an error page with a 200 status:
/// such content must never be renamed over a working database.
fn validate_database(path: &Path) -> Result<u64, UpdateError> {
    let reader = maxminddb::Reader::open_readfile(path).map_err(|e| {
        UpdateError::Install(format!(
            "downloaded snapshot is not a valid GeoIP database: {}",
            e
        ))
    })?;
    Ok(reader.metadata.build_epoch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use tempfile::TempDir;

    fn gzip_bytes(payload: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap()
    }

    fn staging_config(data_dir: &Path) -> Config {
        Config {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_download_url_accepts_http_and_https() {
        assert!(parse_download_url("https://example.com/db.mmdb.gz").is_ok());
        assert!(parse_download_url("http://example.com/db.mmdb.gz").is_ok());
    }

    #[test]
    fn test_parse_download_url_rejects_other_schemes() {
        let result = parse_download_url("file:///etc/passwd");
        assert!(matches!(result, Err(UpdateError::Download(_))));

        let result = parse_download_url("not a url at all");
        assert!(matches!(result, Err(UpdateError::Download(_))));
    }

    #[test]
    fn test_decompress_round_trips_payload() {
        let work = TempDir::new().expect("Failed to create temp directory");
        let config = staging_config(work.path());
        let payload = b"pretend database contents".repeat(1000);

        let snapshot_path = work.path().join("snapshot.gz");
        std::fs::write(&snapshot_path, gzip_bytes(&payload)).unwrap();

        let (staged, bytes_written) =
            decompress_to_staging(&snapshot_path, &config, &config.data_path())
                .expect("Decompression should succeed");
        assert_eq!(bytes_written, payload.len() as u64);
        assert_eq!(std::fs::read(staged.path()).unwrap(), payload);
        // Staging happens inside the data directory so the rename is atomic
        assert_eq!(staged.path().parent(), Some(work.path()));
    }

    #[test]
    fn test_decompress_payload_larger_than_chunk_size() {
        let work = TempDir::new().expect("Failed to create temp directory");
        let config = staging_config(work.path());
        // Not a multiple of the chunk size, to exercise the final short read
        let payload = vec![0xA5u8; GUNZIP_CHUNK_SIZE * 3 + 17];

        let snapshot_path = work.path().join("snapshot.gz");
        std::fs::write(&snapshot_path, gzip_bytes(&payload)).unwrap();

        let (_staged, bytes_written) =
            decompress_to_staging(&snapshot_path, &config, &config.data_path()).unwrap();
        assert_eq!(bytes_written, payload.len() as u64);
    }

    #[test]
    fn test_decompress_rejects_non_gzip_input() {
        let work = TempDir::new().expect("Failed to create temp directory");
        let config = staging_config(work.path());

        let snapshot_path = work.path().join("snapshot.gz");
        std::fs::write(&snapshot_path, b"<html>404 Not Found</html>").unwrap();

        let result = decompress_to_staging(&snapshot_path, &config, &config.data_path());
        match result {
            Err(UpdateError::Install(msg)) => {
                assert!(msg.contains("decompression"), "Unexpected message: {}", msg)
            }
            other => panic!("Expected Install error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_decompress_missing_snapshot_identifies_read_side() {
        let work = TempDir::new().expect("Failed to create temp directory");
        let config = staging_config(work.path());

        let result = decompress_to_staging(
            &work.path().join("does-not-exist.gz"),
            &config,
            &config.data_path(),
        );
        match result {
            Err(UpdateError::Install(msg)) => assert!(
                msg.contains("opened for reading"),
                "Unexpected message: {}",
                msg
            ),
            other => panic!("Expected Install error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_validate_rejects_non_database_content() {
        let work = TempDir::new().expect("Failed to create temp directory");
        let staged = work.path().join("staged");
        std::fs::write(&staged, b"<html>maintenance page</html>").unwrap();

        let result = validate_database(&staged);
        match result {
            Err(UpdateError::Install(msg)) => assert!(
                msg.contains("not a valid GeoIP database"),
                "Unexpected message: {}",
                msg
            ),
            other => panic!("Expected Install error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_download_snapshot_writes_body_to_temp_file() {
        let server = Server::run();
        let body = gzip_bytes(b"snapshot body");
        server.expect(
            Expectation::matching(request::method_path("GET", "/db.mmdb.gz"))
                .respond_with(status_code(200).body(body.clone())),
        );

        let client = init_http_client(5).unwrap();
        let url = server.url("/db.mmdb.gz").to_string();
        let snapshot = download_snapshot(&client, &url)
            .await
            .expect("Download should succeed");
        assert_eq!(std::fs::read(snapshot.path()).unwrap(), body);
    }

    #[tokio::test]
    async fn test_download_snapshot_http_error_includes_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/db.mmdb.gz"))
                .respond_with(status_code(503)),
        );

        let client = init_http_client(5).unwrap();
        let url = server.url("/db.mmdb.gz").to_string();
        let result = download_snapshot(&client, &url).await;
        let msg = result.expect_err("503 must fail the download");
        assert!(msg.contains("503"), "Unexpected message: {}", msg);
    }

    #[tokio::test]
    async fn test_download_snapshot_rejects_oversized_content_length() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/db.mmdb.gz")).respond_with(
                status_code(200)
                    .append_header("content-length", (MAX_DOWNLOAD_SIZE + 1).to_string()),
            ),
        );

        let client = init_http_client(5).unwrap();
        let url = server.url("/db.mmdb.gz").to_string();
        let result = download_snapshot(&client, &url).await;
        let msg = result.expect_err("Oversized content-length must fail");
        assert!(msg.contains("too large"), "Unexpected message: {}", msg);
    }
}
