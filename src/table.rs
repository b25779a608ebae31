use serde::Serialize;

use crate::record::PowerPlant;

/// Display value substituted for a missing cell.
pub const PLACEHOLDER: &str = "N/A";

/// One listed row, every column formatted for display. Column set mirrors
/// the original explorer's listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub country: String,
    pub name: String,
    pub capacity_mw: String,
    pub primary_fuel: String,
    pub other_fuels: String,
    pub commissioning_year: String,
    pub owner: String,
}

/// Direct passthrough of the filtered subset: every row in subset order,
/// coordinates or not, with missing cells shown as the placeholder. An empty
/// subset is an empty listing.
pub fn render(subset: &[&PowerPlant]) -> Vec<TableRow> {
    subset.iter().map(|p| row(p)).collect()
}

fn row(plant: &PowerPlant) -> TableRow {
    TableRow {
        country: text(&plant.country_long),
        name: plant.name.clone(),
        capacity_mw: plant
            .capacity_mw
            .map(|c| format!("{:.1}", c))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        primary_fuel: text(&plant.primary_fuel),
        other_fuels: text(&plant.other_fuels),
        commissioning_year: plant
            .commissioning_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        owner: text(&plant.owner),
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(name: &str, capacity: Option<f64>, coords: Option<(f64, f64)>) -> PowerPlant {
        PowerPlant {
            country: Some("KEN".to_string()),
            country_long: Some("Kenya".to_string()),
            name: name.to_string(),
            capacity_mw: capacity,
            primary_fuel: Some("Hydro".to_string()),
            other_fuels: None,
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            commissioning_year: Some(1985),
            owner: Some("KenGen".to_string()),
        }
    }

    #[test]
    fn preserves_subset_order_and_keeps_unmappable_rows() {
        let a = plant("Plant A", Some(10.0), Some((-1.29, 36.82)));
        let c = plant("Plant C", Some(5.0), None);
        let rows = render(&[&a, &c]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Plant A");
        // No coordinates, still listed.
        assert_eq!(rows[1].name, "Plant C");
    }

    #[test]
    fn missing_cells_render_as_placeholder() {
        let mut b = plant("Plant B", None, None);
        b.owner = None;
        b.commissioning_year = None;
        let rows = render(&[&b]);
        assert_eq!(rows[0].capacity_mw, PLACEHOLDER);
        assert_eq!(rows[0].owner, PLACEHOLDER);
        assert_eq!(rows[0].commissioning_year, PLACEHOLDER);
        assert_eq!(rows[0].other_fuels, PLACEHOLDER);
    }

    #[test]
    fn empty_subset_is_an_empty_listing() {
        assert!(render(&[]).is_empty());
    }

    #[test]
    fn capacity_is_formatted_with_one_decimal() {
        let a = plant("Plant A", Some(10.0), None);
        assert_eq!(render(&[&a])[0].capacity_mw, "10.0");
    }
}
