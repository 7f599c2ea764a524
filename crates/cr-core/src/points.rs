//! Ordered, duplicate-free mapping of point names to coordinates.
//!
//! `PointSet` is the input to graph construction.  Enumeration order is
//! insertion order, which fixes the order of the builder's pairwise scan and
//! therefore the `NodeId` assigned to each point.

use std::collections::HashMap;

use crate::{CoreError, CoreResult, GeoPoint};

#[derive(Clone, Debug, Default)]
pub struct PointSet {
    entries: Vec<(String, GeoPoint)>,
    by_name: HashMap<String, usize>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
            by_name: HashMap::with_capacity(n),
        }
    }

    /// Build from `(name, point)` pairs, failing on the first duplicate name
    /// or invalid coordinate.
    pub fn from_points<I, S>(points: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (S, GeoPoint)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (name, pos) in points {
            set.insert(name, pos)?;
        }
        Ok(set)
    }

    /// Append a point.  Names must be unique and coordinates finite and
    /// within WGS-84 bounds.
    pub fn insert(&mut self, name: impl Into<String>, pos: GeoPoint) -> CoreResult<()> {
        let name = name.into();
        let pos = GeoPoint::try_new(pos.lat, pos.lon)?;
        if self.by_name.contains_key(&name) {
            return Err(CoreError::DuplicatePoint(name));
        }
        self.by_name.insert(name.clone(), self.entries.len());
        self.entries.push((name, pos));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<GeoPoint> {
        self.by_name.get(name).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, GeoPoint)> + '_ {
        self.entries.iter().map(|(n, p)| (n.as_str(), *p))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}
