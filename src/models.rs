//! Core data structures for lookup results.

use serde::Serialize;

/// City name used when a record's coordinates are out of range.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Geographic information for a single IP address.
///
/// `region` holds the subdivision code as stored in the database (e.g. "TX",
/// "ON"); `region_name` and `timezone` are filled in by enrichment steps and
/// stay `None` when no mapping exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoRecord {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// City name, or [`UNKNOWN_CITY`] after corruption recovery
    pub city: String,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
    /// Subdivision (region/state/province) code
    pub region: String,
    /// Human-readable region name (enrichment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    /// IANA timezone identifier (enrichment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl GeoRecord {
    /// Returns true when either coordinate is below -90 degrees.
    ///
    /// Valid records have both coordinates in `[-90, 90]`; values below that
    /// range only occur when the database file is damaged.
    pub fn is_corrupted(&self) -> bool {
        self.latitude < -90.0 || self.longitude < -90.0
    }

    /// Replaces corrupted coordinates with a safe sentinel.
    ///
    /// Sets `latitude` and `longitude` to `0.0` and `city` to
    /// [`UNKNOWN_CITY`]; all other fields are left untouched. Records that
    /// pass the coordinate check are returned unchanged.
    pub fn normalized(mut self) -> Self {
        if self.is_corrupted() {
            self.latitude = 0.0;
            self.longitude = 0.0;
            self.city = UNKNOWN_CITY.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> GeoRecord {
        GeoRecord {
            latitude: 30.2672,
            longitude: -97.7431,
            city: "Austin".to_string(),
            country_code: "US".to_string(),
            region: "TX".to_string(),
            region_name: Some("Texas".to_string()),
            timezone: Some("America/Chicago".to_string()),
        }
    }

    #[test]
    fn test_valid_record_unchanged_by_normalization() {
        let record = sample_record();
        let normalized = record.clone().normalized();
        assert_eq!(normalized, record);
    }

    #[test]
    fn test_corrupted_latitude_normalized_to_sentinel() {
        let mut record = sample_record();
        record.latitude = -180.0;
        let normalized = record.normalized();
        assert_eq!(normalized.latitude, 0.0);
        assert_eq!(normalized.longitude, 0.0);
        assert_eq!(normalized.city, UNKNOWN_CITY);
    }

    #[test]
    fn test_corrupted_longitude_normalized_to_sentinel() {
        let mut record = sample_record();
        record.longitude = -9999.0;
        let normalized = record.normalized();
        assert_eq!(normalized.latitude, 0.0);
        assert_eq!(normalized.longitude, 0.0);
        assert_eq!(normalized.city, UNKNOWN_CITY);
    }

    #[test]
    fn test_normalization_leaves_other_fields_untouched() {
        let mut record = sample_record();
        record.latitude = -91.0;
        let normalized = record.normalized();
        assert_eq!(normalized.country_code, "US");
        assert_eq!(normalized.region, "TX");
        assert_eq!(normalized.region_name.as_deref(), Some("Texas"));
        assert_eq!(normalized.timezone.as_deref(), Some("America/Chicago"));
    }

    #[test]
    fn test_boundary_coordinates_are_valid() {
        // -90 exactly is the edge of the valid range, not corruption
        let mut record = sample_record();
        record.latitude = -90.0;
        record.longitude = -90.0;
        assert!(!record.is_corrupted());
        let normalized = record.clone().normalized();
        assert_eq!(normalized, record);
    }

    #[test]
    fn test_serialization_skips_absent_enrichment_fields() {
        let mut record = sample_record();
        record.region_name = None;
        record.timezone = None;
        let json = serde_json::to_string(&record).expect("Failed to serialize record");
        assert!(!json.contains("region_name"));
        assert!(!json.contains("timezone"));
    }
}
