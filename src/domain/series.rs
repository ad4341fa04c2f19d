// Price series domain model and series processing
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use thiserror::Error;

/// Timestamp of a chart point, either Unix seconds or a calendar day ("2024-01-31")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartTime {
    Unix(i64),
    Day(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint<T = ChartTime> {
    pub time: T,
    pub value: f64,
}

impl<T> TimePoint<T> {
    pub fn new(time: T, value: f64) -> Self {
        Self { time, value }
    }
}

pub type Series<T = ChartTime> = Vec<TimePoint<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("cannot summarize an empty series")]
    Empty,
}

/// Min, max and arithmetic mean of the series values
pub fn summarize<T>(series: &[TimePoint<T>]) -> Result<SeriesSummary, SeriesError> {
    if series.is_empty() {
        return Err(SeriesError::Empty);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut mean = 0.0;

    // Running mean, each term scaled by 1/n so large prices cannot overflow
    for (i, p) in series.iter().enumerate() {
        let n = (i + 1) as f64;
        min = min.min(p.value);
        max = max.max(p.value);
        mean += p.value / n - mean / n;
    }

    Ok(SeriesSummary {
        min,
        max,
        // Rounding can leave the mean an ulp outside the observed range
        average: mean.max(min).min(max),
    })
}

/// Ratio `a / b` at every timestamp of `a` that also appears in `b`.
///
/// Points of `a` without a match are dropped and the order of `a` is kept.
/// When `b` repeats a timestamp the first occurrence wins. A zero in `b`
/// yields a non-finite value rather than an error.
pub fn align_ratio<T>(a: &[TimePoint<T>], b: &[TimePoint<T>]) -> Series<T>
where
    T: Eq + Hash + Clone,
{
    let mut index: HashMap<&T, f64> = HashMap::with_capacity(b.len());
    for point in b {
        index.entry(&point.time).or_insert(point.value);
    }

    a.iter()
        .filter_map(|x| {
            index
                .get(&x.time)
                .map(|y| TimePoint::new(x.time.clone(), x.value / y))
        })
        .collect()
}
