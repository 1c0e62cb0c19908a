//! IP address lookup.
//!
//! Each lookup opens the resolved database file read-only, performs a single
//! indexed read, and drops the handle before returning. Nothing is cached
//! across calls: combined with the atomic install in the updater, a lookup
//! always sees either the fully-old or fully-new database, so no locking is
//! needed between lookups and updates.

use std::net::{IpAddr, Ipv4Addr};

use maxminddb::Reader;

use crate::config::Config;
use crate::enrich::Enricher;
use crate::error_handling::LookupError;
use crate::locator::resolve_database_path;
use crate::models::GeoRecord;

/// Looks up geographic information for an IPv4 address.
///
/// Returns `Ok(None)` when the database has no record for the address.
/// The raw record passes through the enrichment chain and then coordinate
/// normalization, so a damaged database yields the `Unknown` sentinel rather
/// than out-of-range coordinates.
///
/// # Errors
///
/// - [`LookupError::InvalidInput`] when `ip` is not a syntactically valid
///   IPv4 address (checked before touching the filesystem)
/// - [`LookupError::DatabaseUnavailable`] when the resolved database file
///   cannot be opened or parsed
pub fn lookup_ip(
    config: &Config,
    enricher: &Enricher,
    ip: &str,
) -> Result<Option<GeoRecord>, LookupError> {
    let addr: Ipv4Addr = ip
        .parse()
        .map_err(|_| LookupError::InvalidInput(ip.to_string()))?;

    let path = resolve_database_path(config);
    let reader = Reader::open_readfile(&path).map_err(|e| LookupError::DatabaseUnavailable {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let record = read_record(&reader, IpAddr::V4(addr));
    // Reader handle is released here on every path; enrichment and
    // normalization only touch the already-extracted record.
    let record = enricher.apply(record);
    Ok(record.map(GeoRecord::normalized))
}

/// Executes the indexed read and maps the decoded entry onto a [`GeoRecord`].
///
/// Reader-level failures (including whatever the reader does with inputs it
/// cannot handle) are treated as "no record", never propagated as errors.
fn read_record<T: AsRef<[u8]>>(reader: &Reader<T>, ip: IpAddr) -> Option<GeoRecord> {
    let lookup = reader.lookup(ip).ok()?;
    if !lookup.has_data() {
        return None;
    }

    let city: maxminddb::geoip2::City = match lookup.decode() {
        Ok(Some(city)) => city,
        Ok(None) => return None,
        Err(_) => return None,
    };

    let mut record = GeoRecord {
        latitude: city.location.latitude.unwrap_or(0.0),
        longitude: city.location.longitude.unwrap_or(0.0),
        ..Default::default()
    };

    record.country_code = city
        .country
        .iso_code
        .map(|s| s.to_string())
        .unwrap_or_default();

    if let Some(subdivision) = city.subdivisions.first() {
        record.region = subdivision.iso_code.map(|s| s.to_string()).unwrap_or_default();
    }

    record.city = city
        .city
        .names
        .english
        .map(|s| s.to_string())
        .unwrap_or_default();

    // The modern database format carries a timezone; the enrichment step
    // only fills this when absent.
    record.timezone = city.location.time_zone.map(|s| s.to_string());

    Some(record)
}
