//! Monthly temperature variance dataset.
//!
//! The document shape is fixed:
//!
//! ```json
//! {
//!   "baseTemperature": 8.66,
//!   "monthlyVariance": [{ "year": 1753, "month": 1, "variance": -1.366 }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};

/// Published global land-surface temperature dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// A single month's offset from the baseline temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
    /// Signed offset in degrees from the baseline
    pub variance: f64,
}

impl MonthlyRecord {
    pub fn new(year: i32, month: u32, variance: f64) -> Self {
        Self { year, month, variance }
    }

    /// Absolute temperature for this record. Never rounded.
    #[inline]
    pub fn temperature(&self, baseline: f64) -> f64 {
        baseline + self.variance
    }
}

/// The full document as published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureDataset {
    pub base_temperature: f64,
    #[serde(default)]
    pub monthly_variance: Vec<MonthlyRecord>,
}

impl TemperatureDataset {
    pub fn new(base_temperature: f64, monthly_variance: Vec<MonthlyRecord>) -> Self {
        Self {
            base_temperature,
            monthly_variance,
        }
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a dataset from raw response bytes.
    pub fn from_slice(bytes: &[u8]) -> HeatmapResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse and validate in one step.
    pub fn from_json_validated(json: &str) -> HeatmapResult<Self> {
        let dataset = Self::from_json(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check that every record can be placed on the chart.
    ///
    /// Months must lie in `1..=12` and all temperatures must be finite, so
    /// that the quantile domain and the rendered cells are the same set.
    pub fn validate(&self) -> HeatmapResult<()> {
        if !self.base_temperature.is_finite() {
            return Err(HeatmapError::InvalidBaseTemperature(self.base_temperature));
        }

        for (index, record) in self.monthly_variance.iter().enumerate() {
            if !(1..=12).contains(&record.month) {
                return Err(HeatmapError::InvalidMonth {
                    index,
                    year: record.year,
                    month: record.month,
                });
            }
            if !record.variance.is_finite() {
                return Err(HeatmapError::InvalidVariance {
                    index,
                    year: record.year,
                    month: record.month,
                });
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.monthly_variance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_variance.is_empty()
    }

    /// First and last year present, if any.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        self.monthly_variance.iter().fold(None, |span, r| match span {
            None => Some((r.year, r.year)),
            Some((lo, hi)) => Some((lo.min(r.year), hi.max(r.year))),
        })
    }

    /// Derived temperatures in record order.
    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        let base = self.base_temperature;
        self.monthly_variance.iter().map(move |r| r.temperature(base))
    }
}
