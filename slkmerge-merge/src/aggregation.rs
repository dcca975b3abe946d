//! Strategies for reducing every data row that overlaps a target segment to a
//! single value.
//!
//! An [`Aggregation`] is applied to the [`Observation`]s selected for one
//! target row and one action: the rows whose value is present and whose overlap
//! with the target is strictly positive, in the data table's original row order.
use std::cmp::Ordering;
use std::fmt::{self, Display};

use slkmerge_core::models::{DataType, Value};

use crate::errors::AggregationError;

///
/// A fraction in `[0, 1]` used by [`Aggregation::LengthWeightedPercentile`].
///
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Percentile(f64);

impl Percentile {
    pub fn new(percentile: f64) -> Result<Self, AggregationError> {
        if (0.0..=1.0).contains(&percentile) {
            Ok(Percentile(percentile))
        } else {
            Err(AggregationError::PercentileOutOfRange(percentile))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Percentile {
    type Error = AggregationError;

    fn try_from(value: f64) -> Result<Self, AggregationError> {
        Percentile::new(value)
    }
}

impl From<Percentile> for f64 {
    fn from(percentile: Percentile) -> Self {
        percentile.0
    }
}

///
/// How the overlapping values of one column are reduced to one value.
///
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aggregation {
    /// Value of the first overlapping row, in data row order.
    First,
    /// Unweighted mean.
    Average,
    /// Mean weighted by overlap length.
    LengthWeightedAverage,
    /// Percentile where each value is supported by its overlap length.
    LengthWeightedPercentile(Percentile),
    /// Value of the row with the longest overlap.
    KeepLongestSegment,
    /// Value with the largest total overlap across all rows sharing it.
    #[cfg_attr(feature = "serde", serde(alias = "KeepLongestValue"))]
    KeepLongest,
    /// Unweighted sum.
    Sum,
    /// Sum of each value scaled by the fraction of its own row that overlaps.
    ProportionalSum,
    /// Row label of the row holding the largest value.
    IndexOfMax,
}

impl Aggregation {
    /// Shorthand for `LengthWeightedPercentile(Percentile::new(percentile)?)`.
    pub fn length_weighted_percentile(percentile: f64) -> Result<Self, AggregationError> {
        Ok(Aggregation::LengthWeightedPercentile(Percentile::new(
            percentile,
        )?))
    }

    /// Whether the source column must be numeric.
    pub fn requires_numeric(&self) -> bool {
        !matches!(
            self,
            Aggregation::First | Aggregation::KeepLongestSegment | Aggregation::KeepLongest
        )
    }

    ///
    /// Type of the output column, given the type of the source column and the
    /// type of the data table's row labels.
    ///
    pub fn output_type(&self, source: DataType, label: DataType) -> DataType {
        match self {
            Aggregation::First | Aggregation::KeepLongestSegment | Aggregation::KeepLongest => {
                source
            }
            Aggregation::IndexOfMax => label,
            _ => DataType::Float,
        }
    }

    ///
    /// Reduce the observations to a single value.
    ///
    /// Observations must be non-empty; the caller substitutes the missing value
    /// when nothing qualifies.
    pub fn apply(&self, observations: &[Observation]) -> Result<Value, AggregationError> {
        if observations.is_empty() {
            return Err(AggregationError::EmptySelection {
                aggregation: self.to_string(),
            });
        }

        let value = match self {
            Aggregation::First => observations[0].value.clone(),
            Aggregation::Average => {
                let values = self.numeric_values(observations)?;
                Value::Float(values.iter().sum::<f64>() / values.len() as f64)
            }
            Aggregation::LengthWeightedAverage => {
                let values = self.numeric_values(observations)?;
                let total_length: f64 = observations.iter().map(|o| o.overlap_len).sum();
                // a single row has weight exactly 1
                Value::Float(
                    values
                        .iter()
                        .zip(observations)
                        .map(|(v, o)| v * (o.overlap_len / total_length))
                        .sum(),
                )
            }
            Aggregation::LengthWeightedPercentile(percentile) => {
                let values = self.numeric_values(observations)?;
                let pairs = values
                    .into_iter()
                    .zip(observations.iter().map(|o| o.overlap_len))
                    .collect();
                Value::Float(weighted_percentile(pairs, percentile.value()))
            }
            Aggregation::KeepLongestSegment => {
                let mut longest = &observations[0];
                for observation in &observations[1..] {
                    if observation.overlap_len > longest.overlap_len {
                        longest = observation;
                    }
                }
                longest.value.clone()
            }
            Aggregation::KeepLongest => keep_longest_value(observations),
            Aggregation::Sum => {
                let values = self.numeric_values(observations)?;
                Value::Float(values.iter().sum())
            }
            Aggregation::ProportionalSum => {
                let values = self.numeric_values(observations)?;
                Value::Float(
                    values
                        .iter()
                        .zip(observations)
                        .map(|(v, o)| v * o.overlap_len / o.row_len)
                        .sum(),
                )
            }
            Aggregation::IndexOfMax => {
                let values = self.numeric_values(observations)?;
                let mut best = 0;
                for (i, v) in values.iter().enumerate().skip(1) {
                    if *v > values[best] {
                        best = i;
                    }
                }
                observations[best].label.clone()
            }
        };

        Ok(value)
    }

    fn numeric_values(&self, observations: &[Observation]) -> Result<Vec<f64>, AggregationError> {
        observations
            .iter()
            .map(|o| {
                o.value
                    .as_f64()
                    .ok_or_else(|| AggregationError::NonNumericValue {
                        aggregation: self.to_string(),
                        value: o.value.to_string(),
                    })
            })
            .collect()
    }
}

impl Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::First => write!(f, "First"),
            Aggregation::Average => write!(f, "Average"),
            Aggregation::LengthWeightedAverage => write!(f, "LengthWeightedAverage"),
            Aggregation::LengthWeightedPercentile(p) => {
                write!(f, "LengthWeightedPercentile({})", p.value())
            }
            Aggregation::KeepLongestSegment => write!(f, "KeepLongestSegment"),
            Aggregation::KeepLongest => write!(f, "KeepLongest"),
            Aggregation::Sum => write!(f, "Sum"),
            Aggregation::ProportionalSum => write!(f, "ProportionalSum"),
            Aggregation::IndexOfMax => write!(f, "IndexOfMax"),
        }
    }
}

///
/// One data row as seen by an aggregation.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// The non-missing value of the action's column
    pub value: Value,
    /// Length of the overlap with the target segment, always positive
    pub overlap_len: f64,
    /// Length of the data row's own interval
    pub row_len: f64,
    /// Row label of the data row
    pub label: Value,
}

///
/// Sum the overlap length per distinct value and keep the value with the
/// largest total. Equal totals resolve to the smallest value. `-0.0` and
/// `0.0` are the same value.
///
fn keep_longest_value(observations: &[Observation]) -> Value {
    let mut totals: Vec<(Value, f64)> = Vec::new();
    for observation in observations {
        let value = match &observation.value {
            Value::Float(v) => Value::Float(v + 0.0),
            other => other.clone(),
        };
        match totals
            .iter_mut()
            .find(|(seen, _)| seen.total_cmp(&value) == Ordering::Equal)
        {
            Some((_, total)) => *total += observation.overlap_len,
            None => totals.push((value, observation.overlap_len)),
        }
    }

    totals.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut best = 0;
    for (i, (_, total)) in totals.iter().enumerate().skip(1) {
        if *total > totals[best].1 {
            best = i;
        }
    }
    totals.swap_remove(best).0
}

///
/// Length weighted percentile of `(value, length)` pairs.
///
/// Pairs are sorted by value. Each value is placed at the cumulative sum of the
/// mean of its own length and its predecessor's length (the first value sits at
/// zero), the positions are normalised to `[0, 1]`, and `percentile` is linearly
/// interpolated against them. A single pair returns its value.
///
pub fn weighted_percentile(mut pairs: Vec<(f64, f64)>, percentile: f64) -> f64 {
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    if pairs.len() == 1 {
        return pairs[0].0;
    }

    let mut positions = Vec::with_capacity(pairs.len());
    let mut cumulative = 0.0;
    positions.push(cumulative);
    for window in pairs.windows(2) {
        cumulative += (window[0].1 + window[1].1) / 2.0;
        positions.push(cumulative);
    }

    let values: Vec<f64> = pairs.iter().map(|(v, _)| *v).collect();
    if !(cumulative > 0.0) {
        return values[0];
    }
    for position in positions.iter_mut() {
        *position /= cumulative;
    }

    interpolate(percentile, &positions, &values)
}

///
/// Piecewise linear interpolation of `x` on increasing `xs`, clamped to the
/// first and last `ys` outside the range.
///
fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }

    let upper = xs.partition_point(|v| *v <= x);
    let lower = upper - 1;
    let span = xs[upper] - xs[lower];
    if span == 0.0 {
        return ys[upper];
    }
    ys[lower] + (x - xs[lower]) / span * (ys[upper] - ys[lower])
}
