use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::record::PowerPlant;

/// Dropdown label for the country "no restriction" entry.
pub const ALL_COUNTRIES: &str = "All countries";
/// Dropdown label for the fuel "no restriction" entry.
pub const ALL_FUELS: &str = "All fuels";

/// A filter choice on one dimension: either the "all" sentinel or one of the
/// concrete values observed in the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Interpret a query-string parameter. A missing parameter, an empty
    /// string, or the sentinel label all mean "no restriction".
    pub fn from_param(raw: Option<&str>, all_label: &str) -> Self {
        match raw {
            None => Selection::All,
            Some(value) if value.is_empty() || value == all_label => Selection::All,
            Some(value) => Selection::Value(value.to_string()),
        }
    }

    pub fn matches(&self, cell: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(wanted) => cell == Some(wanted.as_str()),
        }
    }
}

/// The two filterable dimensions of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Country,
    Fuel,
}

impl Dimension {
    fn cell<'a>(&self, plant: &'a PowerPlant) -> Option<&'a str> {
        match self {
            Dimension::Country => plant.country_long.as_deref(),
            Dimension::Fuel => plant.primary_fuel.as_deref(),
        }
    }
}

/// Distinct non-missing values for one dimension, duplicate-free and in
/// case-insensitive lexicographic order so repeated renders are stable. The
/// "all" sentinel is prepended by the presentation layer, not here.
pub fn options_for(dataset: &Dataset, dimension: Dimension) -> Vec<String> {
    let mut values: Vec<String> = dataset
        .plants
        .iter()
        .filter_map(|p| dimension.cell(p))
        .map(|v| v.to_string())
        .collect();
    values.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    values.dedup();
    values
}

/// The filtered subset: a row is included iff it matches both selections.
/// Subset order preserves table order; an empty result is valid.
pub fn apply<'a>(
    dataset: &'a Dataset,
    country: &Selection,
    fuel: &Selection,
) -> Vec<&'a PowerPlant> {
    dataset
        .plants
        .iter()
        .filter(|p| country.matches(p.country_long.as_deref()) && fuel.matches(p.primary_fuel.as_deref()))
        .collect()
}
