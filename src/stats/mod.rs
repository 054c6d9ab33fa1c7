//! Central tendency and dispersion of distances.
//!
//! [`summarize`] turns a list of distances into a [Summary]: mean and sample
//! standard deviation, mean and adjusted mean (with a nominal population
//! size), or median and scaled median absolute deviation. [`tree_statistics`]
//! applies it per leaf and again over the per-leaf centres.

pub mod config;
pub mod tree_stats;

pub use config::{Action, DEFAULT_MATRIX_SEPARATOR, StatConfig, parse_positive};
pub use tree_stats::{LeafStatistics, TreeStatistics, tree_statistics};

use crate::error::DistError;
use std::fmt;
use tracing::warn;

/// Scales the median absolute deviation to a consistent estimator of the
/// standard deviation of normally distributed data.
pub const MAD_MULTIPLIER: f64 = 1.48260221850560;

/// Dispersion part of a [Summary].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spread {
    /// Sample standard deviation (Bessel's correction).
    StandardDeviation(f64),
    /// Sum of values divided by the nominal population size.
    AdjustedMean(f64),
    /// Median absolute deviation times [MAD_MULTIPLIER].
    MedianAbsoluteDeviation(f64),
}

impl Spread {
    pub fn value(&self) -> f64 {
        match *self {
            Spread::StandardDeviation(v)
            | Spread::AdjustedMean(v)
            | Spread::MedianAbsoluteDeviation(v) => v,
        }
    }
}

/// The nominal population size is smaller than the observed count, so the
/// observed count is used instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NominalSizeWarning {
    pub nominal: usize,
    pub observed: usize,
}

impl fmt::Display for NominalSizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The nominal size of the database {} is less than the actual count of sequences {}",
            self.nominal, self.observed
        )
    }
}

/// Central value and spread of a list of distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Mean, or median in median mode
    pub centre: f64,
    pub spread: Spread,
    /// Number of observed values
    pub count: usize,
    pub nominal_size_warning: Option<NominalSizeWarning>,
}

/// Summarizes `values` according to `config`:
/// - median mode: median and MAD (nominal size not applied)
/// - with nominal size: mean and [Spread::AdjustedMean], i.e. the values are
///   taken as padded with zeros up to the nominal size
/// - otherwise: mean and sample standard deviation
///
/// A nominal size below the number of values is logged and reported in
/// [Summary::nominal_size_warning]; the observed count is used then.
///
/// # Errors
/// [DistError::EmptySample] if `values` is empty, or holds a single value
/// when a sample standard deviation is needed.
///
/// # Example
/// ```
/// use treedist::stats::{StatConfig, Spread, summarize};
///
/// let summary = summarize(&[1.0, 2.0, 3.0], &StatConfig::new())?;
/// assert_eq!(summary.centre, 2.0);
/// assert_eq!(summary.spread, Spread::StandardDeviation(1.0));
///
/// # Ok::<(), treedist::DistError>(())
/// ```
pub fn summarize(values: &[f64], config: &StatConfig) -> Result<Summary, DistError> {
    let count = values.len();
    if config.median() {
        require("median", 1, count)?;
        let (median, mad) = median_mad(values);
        return Ok(Summary {
            centre: median,
            spread: Spread::MedianAbsoluteDeviation(mad),
            count,
            nominal_size_warning: None,
        });
    }

    require("mean", 1, count)?;
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;

    let Some(nominal) = config.nominal_n() else {
        require("sample standard deviation", 2, count)?;
        let sum_of_squares: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        return Ok(Summary {
            centre: mean,
            spread: Spread::StandardDeviation((sum_of_squares / (count - 1) as f64).sqrt()),
            count,
            nominal_size_warning: None,
        });
    };

    let nominal_size_warning = (nominal < count).then_some(NominalSizeWarning {
        nominal,
        observed: count,
    });
    if let Some(warning) = &nominal_size_warning {
        warn!("{warning}");
    }
    let population = nominal.max(count);

    Ok(Summary {
        centre: mean,
        spread: Spread::AdjustedMean(sum / population as f64),
        count,
        nominal_size_warning,
    })
}

fn require(statistic: &'static str, required: usize, found: usize) -> Result<(), DistError> {
    if found < required {
        return Err(DistError::EmptySample {
            statistic,
            required,
            found,
        });
    }
    Ok(())
}

/// Median of a non-empty list: the middle value, or the average of the two
/// middle values for even length.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let halfway = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[halfway - 1] + sorted[halfway]) / 2.0
    } else {
        sorted[halfway]
    }
}

/// Median and scaled median absolute deviation of a non-empty list.
fn median_mad(values: &[f64]) -> (f64, f64) {
    let centre = median(values);
    let deviations: Vec<f64> = values.iter().map(|v| (v - centre).abs()).collect();
    (centre, median(&deviations) * MAD_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_and_even_lists() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[7.5]), 7.5);
    }

    #[test]
    fn mad_of_symmetric_list() {
        let (centre, mad) = median_mad(&[1.0, 2.0, 3.0]);
        assert_eq!(centre, 2.0);
        assert!((mad - MAD_MULTIPLIER).abs() < 1e-12);
    }
}
