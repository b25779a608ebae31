use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Earliest commissioning year considered plausible in the source data.
pub const MIN_COMMISSIONING_YEAR: i32 = 1900;

/// One power plant row from the source table.
///
/// All typed fields are optional: a malformed or absent cell in the source
/// file becomes `None` for that cell only, and the row is kept. Identity is
/// the row's position in the loaded table; there is no explicit primary key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerPlant {
    /// Short country code (e.g. "KEN").
    pub country: Option<String>,
    /// Full country name, used for filtering and hover text.
    pub country_long: Option<String>,
    pub name: String,
    /// Nameplate capacity in megawatts, non-negative when present.
    pub capacity_mw: Option<f64>,
    pub primary_fuel: Option<String>,
    /// Secondary fuels joined with ", ", built from the source's
    /// other_fuel1..other_fuel3 columns.
    pub other_fuels: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub commissioning_year: Option<i32>,
    pub owner: Option<String>,
}

impl PowerPlant {
    /// Whether the plant can be placed on the map. Rows without coordinates
    /// stay in the table; only the map excludes them.
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Trimmed, non-empty text or `None`.
pub fn parse_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Capacity cell: finite, non-negative megawatts or `None`.
pub fn parse_capacity(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Latitude cell: finite value in [-90, 90] or `None`.
pub fn parse_latitude(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() && (-90.0..=90.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Longitude cell: finite value in [-180, 180] or `None`.
pub fn parse_longitude(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() && (-180.0..=180.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Commissioning year cell. The source stores years as floats ("1985.0"),
/// so parse as f64 and round. Years outside 1900..=current become `None`.
pub fn parse_year(raw: &str) -> Option<i32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let year = value.round() as i32;
    if (MIN_COMMISSIONING_YEAR..=current_year()).contains(&year) {
        Some(year)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_cells_are_trimmed_and_emptiness_is_missing() {
        assert_eq!(parse_text("  Hydro "), Some("Hydro".to_string()));
        assert_eq!(parse_text(""), None);
        assert_eq!(parse_text("   "), None);
    }

    #[test]
    fn capacity_rejects_negative_and_garbage() {
        assert_eq!(parse_capacity("10.5"), Some(10.5));
        assert_eq!(parse_capacity("0"), Some(0.0));
        assert_eq!(parse_capacity("-3"), None);
        assert_eq!(parse_capacity("ten"), None);
        assert_eq!(parse_capacity("NaN"), None);
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert_eq!(parse_latitude("-1.2921"), Some(-1.2921));
        assert_eq!(parse_latitude("91"), None);
        assert_eq!(parse_longitude("179.9"), Some(179.9));
        assert_eq!(parse_longitude("-181"), None);
        assert_eq!(parse_latitude("not-a-number"), None);
    }

    #[test]
    fn years_accept_float_notation_and_reject_implausible_values() {
        assert_eq!(parse_year("1985.0"), Some(1985));
        assert_eq!(parse_year("2010"), Some(2010));
        assert_eq!(parse_year("1776"), None);
        assert_eq!(parse_year("3000"), None);
        assert_eq!(parse_year("unknown"), None);
    }

    #[test]
    fn coordinate_presence_requires_both_axes() {
        let mut plant = PowerPlant {
            country: None,
            country_long: Some("Kenya".to_string()),
            name: "Plant A".to_string(),
            capacity_mw: Some(10.0),
            primary_fuel: Some("Hydro".to_string()),
            other_fuels: None,
            latitude: Some(-1.29),
            longitude: Some(36.82),
            commissioning_year: None,
            owner: None,
        };
        assert!(plant.has_coordinates());
        plant.longitude = None;
        assert!(!plant.has_coordinates());
    }
}
