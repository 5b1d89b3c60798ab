//! Derived temperatures and quantile colour quantization.
//!
//! Every record is turned into an absolute temperature (`baseline +
//! variance`), the full sample is used to build a quantile scale, and each
//! record is then assigned to one of `k` equal-count buckets. Bucket `0` is
//! the coldest, bucket `k - 1` the warmest.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use heatmap_common::{MonthlyRecord, MONTHS};
use tracing::{debug, warn};

/// Absolute temperatures for every record, in record order.
pub fn derived_temperatures(baseline: f64, records: &[MonthlyRecord]) -> Vec<f64> {
    records.iter().map(|r| r.temperature(baseline)).collect()
}

/// Distinct years in ascending order.
pub fn year_domain(records: &[MonthlyRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Quantile scale over a sample distribution.
///
/// Thresholds are the `i / k` sample quantiles (`i = 1..k`) using linear
/// interpolation between order statistics. A value belongs to the bucket of
/// the number of thresholds less than or equal to it, so ties at a threshold
/// go to the upper bucket and identical samples land in one bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileScale {
    thresholds: Vec<f64>,
    extent: Option<(f64, f64)>,
    bucket_count: usize,
}

impl QuantileScale {
    /// Build a scale from unsorted samples. Non-finite samples are ignored.
    ///
    /// A `bucket_count` of zero is treated as one.
    pub fn new(samples: &[f64], bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);

        let mut sorted: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        if sorted.is_empty() {
            return Self {
                thresholds: Vec::new(),
                extent: None,
                bucket_count,
            };
        }

        let thresholds = (1..bucket_count)
            .map(|i| quantile_sorted(&sorted, i, bucket_count))
            .collect();

        Self {
            thresholds,
            extent: Some((sorted[0], sorted[sorted.len() - 1])),
            bucket_count,
        }
    }

    /// Upper-exclusive bucket boundaries, `bucket_count - 1` of them (none
    /// for an empty sample).
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// `(min, max)` of the samples, or `None` if there were none.
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.extent
    }

    /// Bucket index for a value, in `0..bucket_count`.
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds.partition_point(|&t| t <= value)
    }

    /// Value range covered by a bucket, clamped to the sample extent.
    pub fn bucket_range(&self, bucket: usize) -> Option<(f64, f64)> {
        let (min, max) = self.extent?;
        if bucket >= self.bucket_count {
            return None;
        }
        let lo = if bucket == 0 {
            min
        } else {
            self.thresholds.get(bucket - 1).copied().unwrap_or(min)
        };
        let hi = self.thresholds.get(bucket).copied().unwrap_or(max);
        Some((lo, hi))
    }
}

/// R-7 sample quantile at `i / k` of a non-empty ascending slice.
///
/// The order-statistic index `(n - 1) * i / k` is split in integers so that
/// whole-number positions never round down to the previous sample.
fn quantile_sorted(sorted: &[f64], i: usize, k: usize) -> f64 {
    let n = sorted.len();
    let num = (n - 1) * i.min(k);
    let lo = num / k;
    let hi = (lo + 1).min(n - 1);
    let frac = (num % k) as f64 / k as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Axis domains for the chart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxisDomains {
    /// Distinct years, ascending
    pub years: Vec<i32>,
    /// Months `1..=12`; empty when there are no records
    pub months: Vec<u32>,
}

/// A record placed on the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAssignment {
    pub year: i32,
    pub month: u32,
    pub temperature: f64,
    pub bucket: usize,
}

/// Output of the quantization pipeline.
#[derive(Debug, Clone)]
pub struct Quantization {
    pub baseline: f64,
    /// One entry per input record with a finite temperature, in input order
    pub cells: Vec<CellAssignment>,
    pub scale: QuantileScale,
    pub domains: AxisDomains,
}

impl Quantization {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells in each bucket.
    pub fn bucket_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.scale.bucket_count()];
        for cell in &self.cells {
            sizes[cell.bucket] += 1;
        }
        sizes
    }
}

/// Run the full pipeline.
///
/// The quantile domain is built from every record before any bucket is
/// assigned, so the buckets are a function of the whole dataset. Records
/// whose temperature is not finite are dropped up front so that the cells
/// and the quantile domain stay the same set.
pub fn quantize(baseline: f64, records: &[MonthlyRecord], bucket_count: usize) -> Quantization {
    let finite: Vec<MonthlyRecord>;
    let records = if records.iter().all(|r| r.temperature(baseline).is_finite()) {
        records
    } else {
        finite = records
            .iter()
            .copied()
            .filter(|r| r.temperature(baseline).is_finite())
            .collect();
        warn!(
            dropped = records.len() - finite.len(),
            "Skipping records with non-finite temperature"
        );
        &finite
    };

    let temperatures = derived_temperatures(baseline, records);
    let scale = QuantileScale::new(&temperatures, bucket_count);

    debug!(
        records = records.len(),
        buckets = scale.bucket_count(),
        extent = ?scale.extent(),
        thresholds = ?scale.thresholds(),
        "Built quantile scale"
    );

    let cells = records
        .iter()
        .zip(&temperatures)
        .map(|(record, &temperature)| CellAssignment {
            year: record.year,
            month: record.month,
            temperature,
            bucket: scale.bucket(temperature),
        })
        .collect();

    let domains = if records.is_empty() {
        AxisDomains::default()
    } else {
        AxisDomains {
            years: year_domain(records),
            months: MONTHS.to_vec(),
        }
    };

    Quantization {
        baseline,
        cells,
        scale,
        domains,
    }
}
