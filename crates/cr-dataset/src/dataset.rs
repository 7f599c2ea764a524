//! Validated region → city → coordinate table.
//!
//! A `Dataset` is immutable once loaded.  [`Dataset::points`] flattens it
//! into the `PointSet` consumed by `cr_spatial::build_graph`; the graph
//! builder never sees regions.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use cr_core::{GeoPoint, PointSet};

use crate::loader;
use crate::{DatasetError, DatasetResult};

/// A named city and its coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct City {
    pub name: String,
    pub pos:  GeoPoint,
}

/// A province: a name plus its cities in file order.
#[derive(Clone, Debug)]
pub struct Region {
    name:   String,
    cities: Vec<City>,
}

impl Region {
    pub(crate) fn new(name: String) -> Self {
        Self { name, cities: Vec::new() }
    }

    pub(crate) fn push(&mut self, city: City) {
        self.cities.push(city);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// City names in alphabetical order (the order endpoint pickers show).
    pub fn sorted_city_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cities.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// All regions, with city names unique across the whole table.
#[derive(Clone, Debug)]
pub struct Dataset {
    regions:     Vec<Region>,
    city_region: HashMap<String, usize>,
}

impl Dataset {
    pub(crate) fn from_parts(regions: Vec<Region>, city_region: HashMap<String, usize>) -> Self {
        Self { regions, city_region }
    }

    /// The shipped Java table.
    pub fn embedded() -> DatasetResult<Self> {
        loader::load_embedded()
    }

    pub fn from_path(path: &Path) -> DatasetResult<Self> {
        loader::load_dataset_csv(path)
    }

    pub fn from_reader<R: Read>(reader: R) -> DatasetResult<Self> {
        loader::load_dataset_reader(reader)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn city_count(&self) -> usize {
        self.city_region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.city_region.is_empty()
    }

    /// Region names in file order.
    pub fn region_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.regions.iter().map(|r| r.name())
    }

    pub fn region(&self, name: &str) -> DatasetResult<&Region> {
        self.regions
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| DatasetError::UnknownRegion(name.to_owned()))
    }

    pub fn sorted_city_names(&self, region: &str) -> DatasetResult<Vec<&str>> {
        Ok(self.region(region)?.sorted_city_names())
    }

    /// The alphabetically first and last cities of `region`, used as the
    /// default origin and destination.
    pub fn default_endpoints(&self, region: &str) -> DatasetResult<(&str, &str)> {
        let names = self.sorted_city_names(region)?;
        match (names.first(), names.last()) {
            (Some(&first), Some(&last)) => Ok((first, last)),
            _ => Err(DatasetError::UnknownRegion(region.to_owned())),
        }
    }

    /// The region a city belongs to.
    pub fn region_of(&self, city: &str) -> Option<&str> {
        self.city_region.get(city).map(|&r| self.regions[r].name())
    }

    pub fn city(&self, name: &str) -> Option<GeoPoint> {
        let r = *self.city_region.get(name)?;
        self.regions[r]
            .cities
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.pos)
    }

    /// Every city of every region merged into one point set, in file order.
    pub fn points(&self) -> DatasetResult<PointSet> {
        let mut set = PointSet::with_capacity(self.city_count());
        for city in self.regions.iter().flat_map(|r| r.cities.iter()) {
            set.insert(city.name.clone(), city.pos)?;
        }
        Ok(set)
    }
}
