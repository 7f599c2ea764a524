//! `cr-dataset`: the named-point table that feeds graph construction.
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`dataset`] | `Dataset`, `Region`, `City` and their queries             |
//! | [`loader`]  | CSV parsing and validation, the embedded Java table       |
//! | [`error`]   | `DatasetError`, `DatasetResult<T>`                        |
//!
//! The shipped table covers the Jawa Barat, Jawa Tengah and Jawa Timur
//! provinces.  Any CSV in the same `region,city,lat,lon` layout can be
//! loaded instead.

pub mod dataset;
pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

pub use dataset::{City, Dataset, Region};
pub use error::{DatasetError, DatasetResult};
pub use loader::EMBEDDED_CSV;
