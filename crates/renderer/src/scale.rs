//! Band scales and axis ticks.

use std::collections::HashMap;
use std::hash::Hash;

use heatmap_common::month_name;

/// Ordinal scale mapping each domain value to an equal-width band.
///
/// Bands have no padding: band `i` starts at `start + i * step`. Duplicate
/// domain values are collapsed, keeping the first occurrence.
#[derive(Debug, Clone)]
pub struct BandScale<T> {
    domain: Vec<T>,
    index: HashMap<T, usize>,
    start: f64,
    step: f64,
}

impl<T: Copy + Eq + Hash> BandScale<T> {
    pub fn new(domain: impl IntoIterator<Item = T>, range: (f64, f64)) -> Self {
        let mut values = Vec::new();
        let mut index = HashMap::new();
        for value in domain {
            if !index.contains_key(&value) {
                index.insert(value, values.len());
                values.push(value);
            }
        }

        let (start, end) = range;
        let step = if values.is_empty() {
            0.0
        } else {
            (end - start) / values.len() as f64
        };

        Self {
            domain: values,
            index,
            start,
            step,
        }
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    /// Start of the band for `value`, or `None` if it is not in the domain.
    pub fn position(&self, value: T) -> Option<f64> {
        self.index
            .get(&value)
            .map(|&i| self.start + i as f64 * self.step)
    }

    /// Centre of the band for `value`.
    pub fn center(&self, value: T) -> Option<f64> {
        self.position(value).map(|p| p + self.step / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step
    }
}

/// A labelled axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Offset along the axis, at the band centre
    pub offset: f64,
    pub label: String,
}

/// Ticks for every year divisible by ten.
pub fn decade_ticks(scale: &BandScale<i32>) -> Vec<Tick> {
    scale
        .domain()
        .iter()
        .filter(|&&year| year % 10 == 0)
        .filter_map(|&year| {
            scale.center(year).map(|offset| Tick {
                offset,
                label: year.to_string(),
            })
        })
        .collect()
}

/// One tick per month, labelled with the full month name.
pub fn month_ticks(scale: &BandScale<u32>) -> Vec<Tick> {
    scale
        .domain()
        .iter()
        .filter_map(|&month| {
            let offset = scale.center(month)?;
            let label = month_name(month)?.to_string();
            Some(Tick { offset, label })
        })
        .collect()
}
