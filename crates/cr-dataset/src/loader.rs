//! CSV dataset loader.
//!
//! # CSV format
//!
//! One row per city.  Regions appear in first-seen order; cities keep file
//! order within their region.
//!
//! ```csv
//! region,city,lat,lon
//! Jawa Barat,Bandung,-6.9175,107.6191
//! Jawa Tengah,Semarang,-6.9667,110.4167
//! ```
//!
//! # Validation
//!
//! - `region` and `city` must be non-empty after trimming.
//! - `lat`/`lon` must be finite and within WGS-84 bounds.
//! - A city name may appear only once in the whole file, because all
//!   regions are merged into one graph.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use cr_core::GeoPoint;

use crate::dataset::{City, Dataset, Region};
use crate::{DatasetError, DatasetResult};

/// The Jawa Barat / Jawa Tengah / Jawa Timur table shipped with the crate.
pub const EMBEDDED_CSV: &str = include_str!("../data/java_cities.csv");

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CityRecord {
    region: String,
    city:   String,
    lat:    f64,
    lon:    f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate the embedded Java table.
pub fn load_embedded() -> DatasetResult<Dataset> {
    load_dataset_reader(EMBEDDED_CSV.as_bytes())
}

/// Load and validate a dataset from a CSV file.
pub fn load_dataset_csv(path: &Path) -> DatasetResult<Dataset> {
    let file = std::fs::File::open(path)?;
    load_dataset_reader(file)
}

/// Like [`load_dataset_csv`] but accepts any `Read` source.
pub fn load_dataset_reader<R: Read>(reader: R) -> DatasetResult<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut regions: Vec<Region> = Vec::new();
    let mut region_idx: HashMap<String, usize> = HashMap::new();
    let mut city_region: HashMap<String, usize> = HashMap::new();

    for (i, result) in csv_reader.deserialize::<CityRecord>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let row = result.map_err(|e| DatasetError::Parse(e.to_string()))?;

        if row.region.is_empty() {
            return Err(DatasetError::EmptyName { line, field: "region" });
        }
        if row.city.is_empty() {
            return Err(DatasetError::EmptyName { line, field: "city" });
        }
        let pos = GeoPoint::try_new(row.lat, row.lon).map_err(|_| {
            DatasetError::InvalidCoordinate { line, city: row.city.clone(), lat: row.lat, lon: row.lon }
        })?;

        let r = *region_idx.entry(row.region.clone()).or_insert_with(|| {
            regions.push(Region::new(row.region.clone()));
            regions.len() - 1
        });

        if let Some(&first) = city_region.get(&row.city) {
            return Err(DatasetError::DuplicateCity {
                city:          row.city,
                first_region:  regions[first].name().to_owned(),
                second_region: row.region,
            });
        }
        city_region.insert(row.city.clone(), r);
        regions[r].push(City { name: row.city, pos });
    }

    let dataset = Dataset::from_parts(regions, city_region);
    debug!(
        regions = dataset.region_count(),
        cities = dataset.city_count(),
        "loaded dataset"
    );
    Ok(dataset)
}
