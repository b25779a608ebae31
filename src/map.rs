use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::filter::{self, Dimension};
use crate::record::PowerPlant;

/// Smallest marker radius drawn on the map. Plants with missing or
/// non-positive capacity land on this floor instead of disappearing.
pub const SIZE_FLOOR_PX: f64 = 4.0;
/// Largest marker radius, matching the original explorer's cap.
pub const SIZE_MAX_PX: f64 = 14.0;

/// Color used for plants whose primary fuel is missing.
pub const UNKNOWN_FUEL_COLOR: &str = "#7f7f7f";
/// Hover/legend label for a missing field.
pub const PLACEHOLDER: &str = "N/A";

lazy_static! {
    /// Qualitative palette cycled over the table's fuel categories.
    static ref PALETTE: Vec<&'static str> = vec![
        "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3",
        "#ff6692", "#b6e880", "#ff97ff", "#fecb52", "#1f77b4", "#8c564b",
    ];
}

/// One plotted marker.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub size_px: f64,
    pub color: String,
    pub fuel: String,
    /// HTML hover card, uniform layout with "N/A" for missing fields.
    pub hover: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub fuel: String,
    pub color: String,
}

/// The full figure handed to the page's map layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapFigure {
    pub points: Vec<MapPoint>,
    pub legend: Vec<LegendEntry>,
}

/// Stable fuel-to-color assignment over the FULL table, computed once at
/// startup. Filtered renders reuse it, so a fuel keeps its color no matter
/// which subset is on screen.
pub fn fuel_colors(dataset: &Dataset) -> BTreeMap<String, String> {
    filter::options_for(dataset, Dimension::Fuel)
        .into_iter()
        .enumerate()
        .map(|(i, fuel)| (fuel, PALETTE[i % PALETTE.len()].to_string()))
        .collect()
}

/// Build the map figure for a filtered subset.
///
/// Rows without coordinates are excluded here and only here, so the table
/// view upstream still lists them. Marker radius scales linearly with
/// capacity into [SIZE_FLOOR_PX, SIZE_MAX_PX] within the plotted set; an
/// empty subset yields an empty figure rather than an error.
///
/// # Arguments
/// * `subset` - The filtered rows, coordinates present or not
/// * `colors` - The session-stable fuel color map from [`fuel_colors`]
pub fn render(subset: &[&PowerPlant], colors: &BTreeMap<String, String>) -> MapFigure {
    let plottable: Vec<&PowerPlant> = subset
        .iter()
        .copied()
        .filter(|p| p.has_coordinates())
        .collect();

    let max_capacity = plottable
        .iter()
        .filter_map(|p| p.capacity_mw)
        .filter(|c| *c > 0.0)
        .fold(0.0_f64, f64::max);

    let points = plottable
        .iter()
        .filter_map(|p| {
            let (lat, lon) = (p.latitude?, p.longitude?);
            let fuel = p.primary_fuel.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
            let color = colors
                .get(fuel.as_str())
                .map(String::as_str)
                .unwrap_or(UNKNOWN_FUEL_COLOR)
                .to_string();
            Some(MapPoint {
                lat,
                lon,
                size_px: marker_size(p.capacity_mw, max_capacity),
                color,
                fuel,
                hover: build_hover_text(p),
            })
        })
        .collect();

    let mut legend: Vec<LegendEntry> = Vec::new();
    for p in &plottable {
        let fuel = p.primary_fuel.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
        if legend.iter().any(|e| e.fuel == fuel) {
            continue;
        }
        let color = colors
            .get(fuel.as_str())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_FUEL_COLOR)
            .to_string();
        legend.push(LegendEntry { fuel, color });
    }
    legend.sort_by(|a, b| a.fuel.to_lowercase().cmp(&b.fuel.to_lowercase()));

    MapFigure { points, legend }
}

fn marker_size(capacity_mw: Option<f64>, max_capacity: f64) -> f64 {
    match capacity_mw {
        Some(c) if c > 0.0 && max_capacity > 0.0 => {
            SIZE_FLOOR_PX + (c / max_capacity) * (SIZE_MAX_PX - SIZE_FLOOR_PX)
        }
        _ => SIZE_FLOOR_PX,
    }
}

/// Uniform hover card: every field is present, missing values show as "N/A"
/// so the layout never shifts between markers.
pub fn build_hover_text(plant: &PowerPlant) -> String {
    let capacity = plant
        .capacity_mw
        .map(|c| format!("{} MW", trim_decimal(c)))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let year = plant
        .commissioning_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    [
        format!("<b>{}</b>", escape_html(&plant.name)),
        format!("Country: {}", escape_html(field(&plant.country_long))),
        format!("Capacity: {}", capacity),
        format!("Primary fuel: {}", escape_html(field(&plant.primary_fuel))),
        format!("Other fuels: {}", escape_html(field(&plant.other_fuels))),
        format!("Commissioned: {}", year),
        format!("Owner: {}", escape_html(field(&plant.owner))),
    ]
    .join("<br>")
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(PLACEHOLDER)
}

fn trim_decimal(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
