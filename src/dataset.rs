use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use crate::record::{self, PowerPlant};

/// Errors from loading the power plant table.
///
/// Only file-level problems are fatal. Malformed values inside a row are
/// coerced to missing cells and never surface here.
#[derive(Debug)]
pub enum DatasetError {
    /// The file could not be opened or read.
    Io(std::io::Error),
    /// The file is not parseable as CSV at all.
    Parse(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "cannot read dataset: {}", e),
            DatasetError::Parse(msg) => write!(f, "cannot parse dataset: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            DatasetError::Parse(_) => None,
        }
    }
}

impl From<csv::Error> for DatasetError {
    fn from(e: csv::Error) -> Self {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => DatasetError::Io(io),
            kind => DatasetError::Parse(format!("{:?}", kind)),
        }
    }
}

/// Raw CSV row, every cell read as text so malformed values can be coerced
/// per cell instead of rejecting the whole row. Columns are mapped by header
/// name; extra columns in the source file are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    country: String,
    #[serde(default)]
    country_long: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    capacity_mw: String,
    #[serde(default)]
    latitude: String,
    #[serde(default)]
    longitude: String,
    #[serde(default)]
    primary_fuel: String,
    #[serde(default)]
    other_fuel1: String,
    #[serde(default)]
    other_fuel2: String,
    #[serde(default)]
    other_fuel3: String,
    #[serde(default)]
    commissioning_year: String,
    #[serde(default)]
    owner: String,
}

impl RawRow {
    fn into_plant(self) -> PowerPlant {
        let other_fuels: Vec<String> = [self.other_fuel1, self.other_fuel2, self.other_fuel3]
            .into_iter()
            .filter_map(|f| record::parse_text(&f))
            .collect();

        PowerPlant {
            country: record::parse_text(&self.country),
            country_long: record::parse_text(&self.country_long),
            name: self.name.trim().to_string(),
            capacity_mw: record::parse_capacity(&self.capacity_mw),
            primary_fuel: record::parse_text(&self.primary_fuel),
            other_fuels: if other_fuels.is_empty() {
                None
            } else {
                Some(other_fuels.join(", "))
            },
            latitude: record::parse_latitude(&self.latitude),
            longitude: record::parse_longitude(&self.longitude),
            commissioning_year: record::parse_year(&self.commissioning_year),
            owner: record::parse_text(&self.owner),
        }
    }
}

/// The loaded power plant table. Immutable for the lifetime of the process;
/// every filtered view is recomputed from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub plants: Vec<PowerPlant>,
}

impl Dataset {
    /// Load the table from a CSV file.
    ///
    /// Rows with missing coordinates are kept; the map layer excludes them
    /// later so the table view can still list them. Rows the CSV reader
    /// cannot decode at all are skipped with a warning.
    ///
    /// # Arguments
    /// * `path` - Path to the CSV file to load
    ///
    /// # Returns
    /// * `Result<Dataset, DatasetError>` - The loaded table or a file-level error
    ///
    /// # Examples
    /// ```no_run
    /// use plant_explorer::dataset::Dataset;
    ///
    /// match Dataset::load("global_power_plant_database.csv") {
    ///     Ok(dataset) => println!("loaded {} plants", dataset.plants.len()),
    ///     Err(e) => eprintln!("error loading dataset: {}", e),
    /// }
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)?;

        let mut plants = Vec::new();
        let mut skipped = 0usize;
        for result in reader.deserialize::<RawRow>() {
            match result {
                Ok(raw) => plants.push(raw.into_plant()),
                Err(e) => {
                    skipped += 1;
                    log::warn!("skipping undecodable row in {}: {}", path.display(), e);
                }
            }
        }

        let without_coords = plants.iter().filter(|p| !p.has_coordinates()).count();
        log::info!(
            "loaded {} plants from {} ({} skipped, {} without coordinates)",
            plants.len(),
            path.display(),
            skipped,
            without_coords
        );

        Ok(Dataset { plants })
    }
}

static SHARED: OnceLock<Arc<Dataset>> = OnceLock::new();

/// Process-wide read-only handle to the dataset, loaded on first access and
/// reused by every session until the process restarts.
pub fn shared(path: impl AsRef<Path>) -> Result<Arc<Dataset>, DatasetError> {
    if let Some(dataset) = SHARED.get() {
        return Ok(Arc::clone(dataset));
    }
    let dataset = Arc::new(Dataset::load(path)?);
    // A concurrent first access may have won the race; serve whichever
    // handle landed in the cell.
    Ok(Arc::clone(SHARED.get_or_init(|| dataset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp csv");
        file.write_all(contents.as_bytes()).expect("write temp csv");
        file
    }

    const HEADER: &str = "country,country_long,name,capacity_mw,latitude,longitude,primary_fuel,other_fuel1,other_fuel2,other_fuel3,commissioning_year,owner\n";

    #[test]
    fn loads_typed_rows() {
        let file = write_csv(&format!(
            "{HEADER}KEN,Kenya,Plant A,10,-1.29,36.82,Hydro,Solar,,,1985.0,KenGen\n"
        ));
        let dataset = Dataset::load(file.path()).expect("load");
        assert_eq!(dataset.plants.len(), 1);

        let plant = &dataset.plants[0];
        assert_eq!(plant.country_long.as_deref(), Some("Kenya"));
        assert_eq!(plant.name, "Plant A");
        assert_eq!(plant.capacity_mw, Some(10.0));
        assert_eq!(plant.other_fuels.as_deref(), Some("Solar"));
        assert_eq!(plant.commissioning_year, Some(1985));
        assert_eq!(plant.owner.as_deref(), Some("KenGen"));
        assert!(plant.has_coordinates());
    }

    #[test]
    fn malformed_cells_become_missing_but_rows_survive() {
        let file = write_csv(&format!(
            "{HEADER}TZA,Tanzania,Plant C,abc,,-999,Hydro,,,,1492,\n"
        ));
        let dataset = Dataset::load(file.path()).expect("load");
        assert_eq!(dataset.plants.len(), 1);

        let plant = &dataset.plants[0];
        assert_eq!(plant.capacity_mw, None);
        assert_eq!(plant.latitude, None);
        assert_eq!(plant.longitude, None);
        assert_eq!(plant.commissioning_year, None);
        assert_eq!(plant.owner, None);
        // The typed text columns still came through.
        assert_eq!(plant.primary_fuel.as_deref(), Some("Hydro"));
    }

    #[test]
    fn rows_without_coordinates_are_kept() {
        let file = write_csv(&format!(
            "{HEADER}KEN,Kenya,Plant A,10,-1.29,36.82,Hydro,,,,,\nTZA,Tanzania,Plant C,5,,,Hydro,,,,,\n"
        ));
        let dataset = Dataset::load(file.path()).expect("load");
        assert_eq!(dataset.plants.len(), 2);
        assert!(!dataset.plants[1].has_coordinates());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let file = write_csv(
            "country,country_long,name,capacity_mw,latitude,longitude,primary_fuel,other_fuel1,other_fuel2,other_fuel3,commissioning_year,owner,gppd_idnr,url\nKEN,Kenya,Plant A,10,-1.29,36.82,Hydro,,,,,,WRI1,http://example.com\n",
        );
        let dataset = Dataset::load(file.path()).expect("load");
        assert_eq!(dataset.plants.len(), 1);
        assert_eq!(dataset.plants[0].name, "Plant A");
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = Dataset::load("/nonexistent/never.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
