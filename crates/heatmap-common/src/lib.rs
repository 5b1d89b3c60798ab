//! Common types and utilities shared across the temperature heat map crates.

pub mod calendar;
pub mod dataset;
pub mod error;

pub use calendar::{month_name, MONTHS};
pub use dataset::{MonthlyRecord, TemperatureDataset, DEFAULT_DATASET_URL};
pub use error::{HeatmapError, HeatmapResult};
