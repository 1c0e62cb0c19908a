//! Human-readable region names.
//!
//! Static reference table mapping `(country_code, region)` pairs to display
//! names. Coverage is limited to the countries whose databases carry
//! subdivision codes that users actually see (US states and Canadian
//! provinces); everything else passes through without a name.

use crate::enrich::EnrichStep;
use crate::models::GeoRecord;

/// Fills `region_name` from the static reference table.
///
/// Leaves the field untouched when no mapping exists or when the record has
/// no region code.
pub struct RegionNameStep;

impl EnrichStep for RegionNameStep {
    fn name(&self) -> &'static str {
        "region_name"
    }

    fn apply(&self, mut record: GeoRecord) -> GeoRecord {
        if let Some(name) = region_name(&record.country_code, &record.region) {
            record.region_name = Some(name.to_string());
        }
        record
    }
}

/// Looks up the display name for a subdivision code.
pub(crate) fn region_name(country_code: &str, region: &str) -> Option<&'static str> {
    match country_code {
        "US" => us_state_name(region),
        "CA" => ca_province_name(region),
        _ => None,
    }
}

fn us_state_name(region: &str) -> Option<&'static str> {
    let name = match region {
        "AL" => "Alabama",
        "AK" => "Alaska",
        "AZ" => "Arizona",
        "AR" => "Arkansas",
        "CA" => "California",
        "CO" => "Colorado",
        "CT" => "Connecticut",
        "DC" => "District of Columbia",
        "DE" => "Delaware",
        "FL" => "Florida",
        "GA" => "Georgia",
        "HI" => "Hawaii",
        "ID" => "Idaho",
        "IL" => "Illinois",
        "IN" => "Indiana",
        "IA" => "Iowa",
        "KS" => "Kansas",
        "KY" => "Kentucky",
        "LA" => "Louisiana",
        "ME" => "Maine",
        "MD" => "Maryland",
        "MA" => "Massachusetts",
        "MI" => "Michigan",
        "MN" => "Minnesota",
        "MS" => "Mississippi",
        "MO" => "Missouri",
        "MT" => "Montana",
        "NE" => "Nebraska",
        "NV" => "Nevada",
        "NH" => "New Hampshire",
        "NJ" => "New Jersey",
        "NM" => "New Mexico",
        "NY" => "New York",
        "NC" => "North Carolina",
        "ND" => "North Dakota",
        "OH" => "Ohio",
        "OK" => "Oklahoma",
        "OR" => "Oregon",
        "PA" => "Pennsylvania",
        "RI" => "Rhode Island",
        "SC" => "South Carolina",
        "SD" => "South Dakota",
        "TN" => "Tennessee",
        "TX" => "Texas",
        "UT" => "Utah",
        "VT" => "Vermont",
        "VA" => "Virginia",
        "WA" => "Washington",
        "WV" => "West Virginia",
        "WI" => "Wisconsin",
        "WY" => "Wyoming",
        _ => return None,
    };
    Some(name)
}

fn ca_province_name(region: &str) -> Option<&'static str> {
    let name = match region {
        "AB" => "Alberta",
        "BC" => "British Columbia",
        "MB" => "Manitoba",
        "NB" => "New Brunswick",
        "NL" => "Newfoundland and Labrador",
        "NS" => "Nova Scotia",
        "NT" => "Northwest Territories",
        "NU" => "Nunavut",
        "ON" => "Ontario",
        "PE" => "Prince Edward Island",
        "QC" => "Quebec",
        "SK" => "Saskatchewan",
        "YT" => "Yukon",
        _ => return None,
    };
    Some(name)
}
