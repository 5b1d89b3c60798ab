//! Tests for the derived-temperature and quantile quantization pipeline.

use heatmap_common::{MonthlyRecord, TemperatureDataset};
use renderer::quantize::{derived_temperatures, quantize, year_domain, QuantileScale};
use test_utils::{
    dataset_json, generate_monthly_records, generate_seasonal_records, DUPLICATE_YEARS_JSON,
    EMPTY_DATASET_JSON, TWO_EXTREMES_JSON, UNIFORM_DATASET_JSON,
};

fn load(json: &str) -> TemperatureDataset {
    TemperatureDataset::from_json_validated(json).expect("fixture should parse")
}

fn to_records(tuples: &[(i32, u32, f64)]) -> Vec<MonthlyRecord> {
    tuples
        .iter()
        .map(|&(year, month, variance)| MonthlyRecord::new(year, month, variance))
        .collect()
}

// ============================================================================
// Derived temperatures
// ============================================================================

#[test]
fn test_temperature_is_baseline_plus_variance() {
    let records = to_records(&generate_seasonal_records(1753, 4));
    let baseline = 8.66;
    let temps = derived_temperatures(baseline, &records);

    assert_eq!(temps.len(), records.len());
    for (record, temp) in records.iter().zip(&temps) {
        // Exact: no rounding before bucketing
        assert_eq!(*temp, baseline + record.variance);
    }
}

#[test]
fn test_cells_carry_exact_temperature() {
    let dataset = load(test_utils::published_sample_json());
    let q = quantize(dataset.base_temperature, &dataset.monthly_variance, 4);

    for (cell, record) in q.cells.iter().zip(&dataset.monthly_variance) {
        assert_eq!(cell.temperature, 8.66 + record.variance);
    }
}

// ============================================================================
// Assignment count
// ============================================================================

#[test]
fn test_one_assignment_per_record() {
    for years in [1, 3, 17, 100] {
        let records = to_records(&generate_seasonal_records(1850, years));
        let q = quantize(8.66, &records, 4);
        assert_eq!(q.cells.len(), records.len());
    }
}

#[test]
fn test_buckets_in_range() {
    let records = to_records(&generate_seasonal_records(1850, 50));
    for k in [4, 5, 9, 11] {
        let q = quantize(0.0, &records, k);
        assert!(q.cells.iter().all(|c| c.bucket < k));
    }
}

// ============================================================================
// Equal-count property
// ============================================================================

fn assert_equal_count(sizes: &[usize], total: usize) {
    let expected = total as f64 / sizes.len() as f64;
    for (bucket, &size) in sizes.iter().enumerate() {
        assert!(
            (size as f64 - expected).abs() <= 1.0,
            "bucket {} has {} samples, expected about {:.2} (sizes {:?})",
            bucket,
            size,
            expected,
            sizes
        );
    }
}

fn distinct_records(n: usize) -> Vec<MonthlyRecord> {
    (0..n)
        .map(|i| MonthlyRecord::new(1900 + (i / 12) as i32, (i % 12) as u32 + 1, i as f64))
        .collect()
}

#[test]
fn test_equal_count_partition() {
    for n in 1..=500 {
        let records = distinct_records(n);
        for k in 4..=12 {
            let q = quantize(0.0, &records, k);
            assert_eq!(q.cells.len(), n);
            assert_equal_count(&q.bucket_sizes(), n);
        }
    }
}

#[test]
fn test_equal_count_when_quantile_index_is_whole() {
    // Every threshold falls exactly on a sample: (78 - 1) / 11 = 7
    let q = quantize(0.0, &distinct_records(78), 11);
    assert_eq!(q.bucket_sizes(), vec![7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 8]);
    let expected: Vec<f64> = (1..11).map(|i| (7 * i) as f64).collect();
    assert_eq!(q.scale.thresholds(), expected.as_slice());
}

#[test]
fn test_equal_count_generated_records() {
    for (years, k) in [(1, 4), (2, 4), (10, 5), (33, 7), (263, 4), (263, 11)] {
        let records = to_records(&generate_monthly_records(1753, years));
        let q = quantize(8.66, &records, k);
        assert_equal_count(&q.bucket_sizes(), records.len());
    }
}

#[test]
fn test_equal_count_not_equal_width() {
    // Heavily skewed sample: most values near zero, a few far out
    let mut variances: Vec<f64> = (0..96).map(|i| i as f64 * 0.001).collect();
    variances.extend([50.0, 60.0, 70.0, 80.0]);
    let records: Vec<MonthlyRecord> = variances
        .iter()
        .enumerate()
        .map(|(i, &v)| MonthlyRecord::new(1900 + (i / 12) as i32, (i % 12) as u32 + 1, v))
        .collect();

    let q = quantize(0.0, &records, 4);
    assert_eq!(q.bucket_sizes(), vec![25, 25, 25, 25]);

    // Equal-width buckets would have put almost everything in bucket 0
    let (min, max) = q.scale.extent().unwrap();
    let equal_width_first = min + (max - min) / 4.0;
    assert!(q.scale.thresholds()[0] < equal_width_first);
}

#[test]
fn test_buckets_monotonic_in_temperature() {
    let records = to_records(&generate_seasonal_records(1900, 20));
    let q = quantize(8.66, &records, 4);

    let mut cells = q.cells.clone();
    cells.sort_by(|a, b| a.temperature.partial_cmp(&b.temperature).unwrap());
    for pair in cells.windows(2) {
        assert!(pair[0].bucket <= pair[1].bucket);
    }
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_extremes_land_at_opposite_ends() {
    let dataset = load(TWO_EXTREMES_JSON);
    let q = quantize(dataset.base_temperature, &dataset.monthly_variance, 4);

    assert_eq!(q.cells.len(), 2);
    assert_eq!(q.cells[0].temperature, -1.0);
    assert_eq!(q.cells[1].temperature, 1.0);
    assert_eq!(q.cells[0].bucket, 0);
    assert_eq!(q.cells[1].bucket, 3);
}

#[test]
fn test_identical_temperatures_share_one_bucket() {
    let dataset = load(UNIFORM_DATASET_JSON);
    let q = quantize(dataset.base_temperature, &dataset.monthly_variance, 4);

    assert_eq!(q.cells.len(), 4);
    let first = q.cells[0].bucket;
    assert!(q.cells.iter().all(|c| c.bucket == first));
    assert!(q.scale.thresholds().iter().all(|t| t.is_finite()));
}

#[test]
fn test_identical_temperatures_deterministic() {
    let records = vec![MonthlyRecord::new(2000, 1, 0.25); 7];
    let a = quantize(1.0, &records, 4);
    let b = quantize(1.0, &records, 4);
    assert_eq!(a.cells, b.cells);
}

#[test]
fn test_empty_input() {
    let dataset = load(EMPTY_DATASET_JSON);
    let q = quantize(dataset.base_temperature, &dataset.monthly_variance, 4);

    assert!(q.is_empty());
    assert!(q.domains.years.is_empty());
    assert!(q.domains.months.is_empty());
    assert_eq!(q.scale.extent(), None);
    assert_eq!(q.bucket_sizes(), vec![0, 0, 0, 0]);
}

#[test]
fn test_single_record() {
    let records = vec![MonthlyRecord::new(1999, 7, -0.4)];
    let q = quantize(8.0, &records, 4);
    assert_eq!(q.cells.len(), 1);
    assert_eq!(q.scale.extent(), Some((8.0 + -0.4, 8.0 + -0.4)));
    assert_eq!(q.domains.years, vec![1999]);
}

// ============================================================================
// Axis domains
// ============================================================================

#[test]
fn test_year_domain_distinct_ascending() {
    let dataset = load(DUPLICATE_YEARS_JSON);
    assert_eq!(year_domain(&dataset.monthly_variance), vec![1900, 1901, 2000]);

    let q = quantize(dataset.base_temperature, &dataset.monthly_variance, 4);
    assert_eq!(q.domains.years, vec![1900, 1901, 2000]);
    assert_eq!(q.domains.months, (1..=12).collect::<Vec<u32>>());
}

#[test]
fn test_year_domain_sorts_unordered_input() {
    let records = to_records(&[(2001, 1, 0.0), (1999, 1, 0.0), (2000, 5, 0.0), (1999, 2, 0.0)]);
    assert_eq!(year_domain(&records), vec![1999, 2000, 2001]);
}

// ============================================================================
// Scale built from generated documents
// ============================================================================

#[test]
fn test_scale_from_generated_document() {
    let json = dataset_json(8.66, &generate_monthly_records(1900, 10));
    let dataset = load(&json);
    let temps: Vec<f64> = dataset.temperatures().collect();

    let scale = QuantileScale::new(&temps, 4);
    let (min, max) = scale.extent().unwrap();
    assert!(scale.thresholds().iter().all(|&t| t >= min && t <= max));
    assert!(scale.thresholds().windows(2).all(|w| w[0] <= w[1]));
}
