//! Generators for synthetic monthly variance data.
//!
//! These create predictable, verifiable patterns that can be used across
//! the test suite and in benchmarks. Records are plain
//! `(year, month, variance)` tuples.

/// Creates a full calendar of records for `years` consecutive years.
///
/// Each variance is `(year - first_year) * 0.01 + month * 0.0005`, so values
/// are all distinct and increase strictly with (year, month).
///
/// # Example
///
/// ```
/// use test_utils::generate_monthly_records;
///
/// let records = generate_monthly_records(1900, 2);
/// assert_eq!(records.len(), 24);
/// assert_eq!(records[0], (1900, 1, 0.0005));
/// ```
pub fn generate_monthly_records(first_year: i32, years: usize) -> Vec<(i32, u32, f64)> {
    let mut records = Vec::with_capacity(years * 12);
    for offset in 0..years {
        let year = first_year + offset as i32;
        for month in 1..=12u32 {
            let variance = offset as f64 * 0.01 + month as f64 * 0.0005;
            records.push((year, month, variance));
        }
    }
    records
}

/// Creates records with a seasonal cycle and a warming trend, similar in
/// shape to the published dataset.
pub fn generate_seasonal_records(first_year: i32, years: usize) -> Vec<(i32, u32, f64)> {
    let mut records = Vec::with_capacity(years * 12);
    for offset in 0..years {
        let year = first_year + offset as i32;
        let trend = offset as f64 / years.max(1) as f64 * 1.5 - 0.75;
        for month in 1..=12u32 {
            let phase = (month as f64 - 1.0) / 12.0 * std::f64::consts::TAU;
            let seasonal = phase.sin() * 0.4;
            // Deterministic jitter keeps values distinct without an RNG
            let jitter = ((offset * 31 + month as usize * 17) % 97) as f64 / 970.0;
            records.push((year, month, trend + seasonal + jitter));
        }
    }
    records
}

/// Serializes records into a dataset document.
pub fn dataset_json(base_temperature: f64, records: &[(i32, u32, f64)]) -> String {
    let body: Vec<String> = records
        .iter()
        .map(|(year, month, variance)| {
            format!(
                r#"{{"year":{},"month":{},"variance":{:?}}}"#,
                year, month, variance
            )
        })
        .collect();
    format!(
        r#"{{"baseTemperature":{:?},"monthlyVariance":[{}]}}"#,
        base_temperature,
        body.join(",")
    )
}
