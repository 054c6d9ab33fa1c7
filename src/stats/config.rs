//! Configuration of a pipeline run.

use crate::error::DistError;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Default separator between the `(identifier distance)` pairs of matrix output.
pub const DEFAULT_MATRIX_SEPARATOR: &str = " ";

// =#========================================================================#=
// ACTION
// =#========================================================================#=
/// What a run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Per-leaf centre and spread, followed by the summary line.
    #[default]
    PerSeq,
    /// Only the summary line.
    AllAve,
    /// The distance matrix, no statistics.
    Matrix,
}

impl Action {
    /// Name of the action on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::PerSeq => "per_seq",
            Action::AllAve => "all_ave",
            Action::Matrix => "matrix",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_seq" => Ok(Action::PerSeq),
            "all_ave" => Ok(Action::AllAve),
            "matrix" => Ok(Action::Matrix),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

// =#========================================================================#=
// STAT CONFIG
// =#========================================================================#=
/// Immutable configuration of statistics and matrix output.
///
/// # Configuration
/// * [`with_action(action)`](Self::with_action) - what to report, default [Action::PerSeq]
/// * [`with_nominal_n(n)`](Self::with_nominal_n) - nominal population size,
///   larger than the observed count
/// * [`with_misl(n)`](Self::with_misl) - median input sequence length, to
///   report distance per 100 sites
/// * [`with_median()`](Self::with_median) - median and MAD instead of mean and SD
/// * [`with_sorted_matrix()`](Self::with_sorted_matrix) and
///   [`with_descending_matrix()`](Self::with_descending_matrix) - order of
///   matrix rows by distance
/// * [`with_branches()`](Self::with_branches) - keep internal vertices in the matrix
/// * [`with_matrix_separator(sep)`](Self::with_matrix_separator) - default a blank
///
/// # Example
/// ```
/// use treedist::stats::{Action, StatConfig};
///
/// let config = StatConfig::new()
///     .with_action(Action::AllAve)
///     .with_nominal_n(200)?
///     .with_misl(350)?;
/// assert_eq!(config.nominal_n(), Some(200));
///
/// # Ok::<(), treedist::DistError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StatConfig {
    action: Action,
    nominal_n: Option<NonZeroUsize>,
    misl: Option<NonZeroUsize>,
    median: bool,
    sort_matrix: bool,
    sort_descending: bool,
    include_branches: bool,
    matrix_separator: String,
}

impl Default for StatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StatConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        StatConfig {
            action: Action::default(),
            nominal_n: None,
            misl: None,
            median: false,
            sort_matrix: false,
            sort_descending: false,
            include_branches: false,
            matrix_separator: DEFAULT_MATRIX_SEPARATOR.to_string(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Sets the nominal population size.
    ///
    /// # Errors
    /// [DistError::InvalidArgument] if `nominal_n` is zero.
    pub fn with_nominal_n(mut self, nominal_n: usize) -> Result<Self, DistError> {
        self.nominal_n = Some(positive("-nominalN", nominal_n)?);
        Ok(self)
    }

    /// Sets the median input sequence length.
    ///
    /// # Errors
    /// [DistError::InvalidArgument] if `misl` is zero.
    pub fn with_misl(mut self, misl: usize) -> Result<Self, DistError> {
        self.misl = Some(positive("-MISL", misl)?);
        Ok(self)
    }

    pub fn with_median(mut self) -> Self {
        self.median = true;
        self
    }

    pub fn with_sorted_matrix(mut self) -> Self {
        self.sort_matrix = true;
        self
    }

    /// Sorts matrix rows by descending distance; implies sorting.
    pub fn with_descending_matrix(mut self) -> Self {
        self.sort_descending = true;
        self
    }

    pub fn with_branches(mut self) -> Self {
        self.include_branches = true;
        self
    }

    pub fn with_matrix_separator(mut self, separator: impl Into<String>) -> Self {
        self.matrix_separator = separator.into();
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn nominal_n(&self) -> Option<usize> {
        self.nominal_n.map(NonZeroUsize::get)
    }

    pub fn misl(&self) -> Option<usize> {
        self.misl.map(NonZeroUsize::get)
    }

    pub fn median(&self) -> bool {
        self.median
    }

    /// Whether matrix rows are sorted by distance at all.
    pub fn sort_matrix(&self) -> bool {
        self.sort_matrix || self.sort_descending
    }

    pub fn sort_descending(&self) -> bool {
        self.sort_descending
    }

    pub fn include_branches(&self) -> bool {
        self.include_branches
    }

    pub fn matrix_separator(&self) -> &str {
        &self.matrix_separator
    }
}

fn positive(flag: &str, value: usize) -> Result<NonZeroUsize, DistError> {
    NonZeroUsize::new(value).ok_or_else(|| DistError::InvalidArgument {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

/// Parses the value of a numeric option, which must be a positive integer.
///
/// # Errors
/// [DistError::InvalidArgument] naming `flag` and `value` if `value` is not
/// a positive integer.
///
/// # Example
/// ```
/// use treedist::stats::parse_positive;
///
/// assert_eq!(parse_positive("-MISL", "350").unwrap(), 350);
/// assert!(parse_positive("-MISL", "-3").is_err());
/// assert!(parse_positive("-nominalN", "many").is_err());
/// ```
pub fn parse_positive(flag: &str, value: &str) -> Result<usize, DistError> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| DistError::InvalidArgument {
            flag: flag.to_string(),
            value: value.to_string(),
        })
}
