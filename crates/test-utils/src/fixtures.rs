//! Common dataset fixtures for heat map tests.
//!
//! Each fixture is a complete JSON document in the published shape.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

/// Baseline used by the published global-temperature dataset.
pub const PUBLISHED_BASE_TEMPERATURE: f64 = 8.66;

/// First year of the published dataset.
pub const PUBLISHED_FIRST_YEAR: i32 = 1753;

/// Two records around a zero baseline: the coldest and warmest ends.
pub const TWO_EXTREMES_JSON: &str = r#"{
    "baseTemperature": 0.0,
    "monthlyVariance": [
        {"year": 2000, "month": 1, "variance": -1.0},
        {"year": 2000, "month": 2, "variance": 1.0}
    ]
}"#;

/// A dataset without any records.
pub const EMPTY_DATASET_JSON: &str = r#"{
    "baseTemperature": 8.66,
    "monthlyVariance": []
}"#;

/// Every record has the same variance.
pub const UNIFORM_DATASET_JSON: &str = r#"{
    "baseTemperature": 8.66,
    "monthlyVariance": [
        {"year": 1900, "month": 1, "variance": 0.5},
        {"year": 1900, "month": 2, "variance": 0.5},
        {"year": 1901, "month": 1, "variance": 0.5},
        {"year": 1901, "month": 2, "variance": 0.5}
    ]
}"#;

/// Years repeat and are not contiguous.
pub const DUPLICATE_YEARS_JSON: &str = r#"{
    "baseTemperature": 0.0,
    "monthlyVariance": [
        {"year": 1900, "month": 1, "variance": 0.1},
        {"year": 1900, "month": 2, "variance": 0.2},
        {"year": 1901, "month": 1, "variance": 0.3},
        {"year": 2000, "month": 1, "variance": 0.4}
    ]
}"#;

/// A record with a month the chart cannot place.
pub const INVALID_MONTH_JSON: &str = r#"{
    "baseTemperature": 8.66,
    "monthlyVariance": [
        {"year": 1900, "month": 1, "variance": 0.1},
        {"year": 1900, "month": 13, "variance": 0.2}
    ]
}"#;

/// First two years of the published dataset.
pub fn published_sample_json() -> &'static str {
    include_str!("../testdata/global-temperature-sample.json")
}

/// Path to the on-disk copy of [`published_sample_json`].
pub fn published_sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("global-temperature-sample.json")
}

/// Write a JSON document to a temporary file that lives as long as the
/// returned handle.
pub fn write_temp_dataset(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp dataset file");
    file.write_all(json.as_bytes())
        .expect("write temp dataset file");
    file.flush().expect("flush temp dataset file");
    file
}
