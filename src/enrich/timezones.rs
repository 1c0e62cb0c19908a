//! Timezone inference.
//!
//! Static reference table mapping `(country_code, region)` pairs to IANA
//! timezone identifiers. The US and Canada span several zones and are keyed
//! by subdivision; single-zone (or dominant-zone) countries are keyed by
//! country alone.

use crate::enrich::EnrichStep;
use crate::models::GeoRecord;

/// Fills `timezone` from the static reference table.
///
/// Acts as a fallback: a timezone already present on the record (the modern
/// database format carries one) is kept as-is. Missing mappings leave the
/// field unset.
pub struct TimezoneStep;

impl EnrichStep for TimezoneStep {
    fn name(&self) -> &'static str {
        "timezone"
    }

    fn apply(&self, mut record: GeoRecord) -> GeoRecord {
        if record.timezone.is_none() {
            if let Some(tz) = timezone_for(&record.country_code, &record.region) {
                record.timezone = Some(tz.to_string());
            }
        }
        record
    }
}

/// Looks up the IANA timezone for a `(country, region)` pair.
pub(crate) fn timezone_for(country_code: &str, region: &str) -> Option<&'static str> {
    match country_code {
        "US" => us_timezone(region),
        "CA" => ca_timezone(region),
        _ => country_timezone(country_code),
    }
}

fn us_timezone(region: &str) -> Option<&'static str> {
    let tz = match region {
        "AL" | "AR" | "IA" | "IL" | "KS" | "LA" | "MN" | "MO" | "MS" | "ND" | "NE" | "OK"
        | "SD" | "TN" | "TX" | "WI" => "America/Chicago",
        "CT" | "DC" | "DE" | "FL" | "GA" | "KY" | "MA" | "MD" | "ME" | "NC" | "NH" | "NJ"
        | "NY" | "OH" | "PA" | "RI" | "SC" | "VA" | "VT" | "WV" => "America/New_York",
        "CO" | "ID" | "MT" | "NM" | "UT" | "WY" => "America/Denver",
        "CA" | "NV" | "OR" | "WA" => "America/Los_Angeles",
        "AZ" => "America/Phoenix",
        "AK" => "America/Anchorage",
        "HI" => "Pacific/Honolulu",
        "IN" => "America/Indiana/Indianapolis",
        "MI" => "America/Detroit",
        _ => return None,
    };
    Some(tz)
}

fn ca_timezone(region: &str) -> Option<&'static str> {
    let tz = match region {
        "AB" => "America/Edmonton",
        "BC" => "America/Vancouver",
        "MB" => "America/Winnipeg",
        "NB" => "America/Moncton",
        "NL" => "America/St_Johns",
        "NS" | "PE" => "America/Halifax",
        "NT" => "America/Yellowknife",
        "NU" => "America/Iqaluit",
        "ON" => "America/Toronto",
        "QC" => "America/Montreal",
        "SK" => "America/Regina",
        "YT" => "America/Whitehorse",
        _ => return None,
    };
    Some(tz)
}

fn country_timezone(country_code: &str) -> Option<&'static str> {
    let tz = match country_code {
        "AE" => "Asia/Dubai",
        "AR" => "America/Argentina/Buenos_Aires",
        "AT" => "Europe/Vienna",
        "AU" => "Australia/Sydney",
        "BE" => "Europe/Brussels",
        "BR" => "America/Sao_Paulo",
        "CH" => "Europe/Zurich",
        "CL" => "America/Santiago",
        "CN" => "Asia/Shanghai",
        "CO" => "America/Bogota",
        "CZ" => "Europe/Prague",
        "DE" => "Europe/Berlin",
        "DK" => "Europe/Copenhagen",
        "EG" => "Africa/Cairo",
        "ES" => "Europe/Madrid",
        "FI" => "Europe/Helsinki",
        "FR" => "Europe/Paris",
        "GB" => "Europe/London",
        "GR" => "Europe/Athens",
        "HK" => "Asia/Hong_Kong",
        "ID" => "Asia/Jakarta",
        "IE" => "Europe/Dublin",
        "IL" => "Asia/Jerusalem",
        "IN" => "Asia/Kolkata",
        "IT" => "Europe/Rome",
        "JP" => "Asia/Tokyo",
        "KE" => "Africa/Nairobi",
        "KR" => "Asia/Seoul",
        "MX" => "America/Mexico_City",
        "NG" => "Africa/Lagos",
        "NL" => "Europe/Amsterdam",
        "NO" => "Europe/Oslo",
        "NZ" => "Pacific/Auckland",
        "PE" => "America/Lima",
        "PL" => "Europe/Warsaw",
        "PT" => "Europe/Lisbon",
        "RU" => "Europe/Moscow",
        "SA" => "Asia/Riyadh",
        "SE" => "Europe/Stockholm",
        "SG" => "Asia/Singapore",
        "TH" => "Asia/Bangkok",
        "TR" => "Europe/Istanbul",
        "TW" => "Asia/Taipei",
        "ZA" => "Africa/Johannesburg",
        _ => return None,
    };
    Some(tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_subdivision_timezones() {
        assert_eq!(timezone_for("US", "TX"), Some("America/Chicago"));
        assert_eq!(timezone_for("US", "CA"), Some("America/Los_Angeles"));
        assert_eq!(timezone_for("US", "HI"), Some("Pacific/Honolulu"));
    }

    #[test]
    fn test_ca_subdivision_timezones() {
        assert_eq!(timezone_for("CA", "BC"), Some("America/Vancouver"));
        assert_eq!(timezone_for("CA", "NL"), Some("America/St_Johns"));
    }

    #[test]
    fn test_country_level_timezones_ignore_region() {
        assert_eq!(timezone_for("DE", "BY"), Some("Europe/Berlin"));
        assert_eq!(timezone_for("JP", ""), Some("Asia/Tokyo"));
    }

    #[test]
    fn test_unknown_mapping_is_none() {
        assert_eq!(timezone_for("US", "ZZ"), None);
        assert_eq!(timezone_for("XX", ""), None);
    }

    #[test]
    fn test_step_keeps_existing_timezone() {
        // Database-provided value wins over the table
        let record = GeoRecord {
            country_code: "US".to_string(),
            region: "TX".to_string(),
            timezone: Some("America/North_Dakota/Beulah".to_string()),
            ..Default::default()
        };
        let enriched = TimezoneStep.apply(record);
        assert_eq!(
            enriched.timezone.as_deref(),
            Some("America/North_Dakota/Beulah")
        );
    }

    #[test]
    fn test_step_fills_missing_timezone() {
        let record = GeoRecord {
            country_code: "CA".to_string(),
            region: "ON".to_string(),
            ..Default::default()
        };
        let enriched = TimezoneStep.apply(record);
        assert_eq!(enriched.timezone.as_deref(), Some("America/Toronto"));
    }

    #[test]
    fn test_step_tolerates_missing_mapping() {
        let record = GeoRecord {
            country_code: "XX".to_string(),
            ..Default::default()
        };
        let enriched = TimezoneStep.apply(record.clone());
        assert_eq!(enriched, record);
    }
}
