//! Command-line arguments of `treedist`.
//!
//! Options are declared with their double-dash spelling; the historic
//! single-dash spelling (`-nominalN 200`) is mapped onto it by
//! [normalize_legacy_flags] before parsing.

use clap::Parser;
use std::ffi::OsString;

/// Options that may be given with a single leading dash.
const LEGACY_FLAGS: [&str; 7] = [
    "-nominalN",
    "-MISL",
    "-median",
    "-sort_matrix",
    "-sort_matrix_descending",
    "-include_branches",
    "-matrix_sep",
];

/// Options whose following argument is a value and never an option.
const VALUE_FLAGS: [&str; 6] = [
    "-nominalN",
    "--nominalN",
    "-MISL",
    "--MISL",
    "-matrix_sep",
    "--matrix_sep",
];

#[derive(Debug, Parser)]
#[command(
    name = "treedist",
    version,
    about = "Distance statistics of the leaves of a Newick tree.",
    after_help = "ACTIONS:\n  \
        per_seq  (default) mean distance between each leaf and every other leaf\n  \
        all_ave  a single value for the mean of all the per sequence averages\n  \
        matrix   the matrix of distances instead of statistics"
)]
pub struct TreeDistArgs {
    /// Optional action (per_seq, all_ave or matrix) followed by the Newick file
    #[arg(value_name = "[ACTION] FILE", num_args = 1..=2, required = true)]
    pub operands: Vec<String>,

    /// Nominal count of values, greater than the actual count
    #[arg(long = "nominalN", value_name = "N", allow_hyphen_values = true)]
    pub nominal_n: Option<String>,

    /// Median input sequence length, to get distance per 100 input sites
    #[arg(long = "MISL", value_name = "N", allow_hyphen_values = true)]
    pub misl: Option<String>,

    /// Use median and median absolute deviation in place of mean and SD
    #[arg(long = "median")]
    pub median: bool,

    /// Sort each matrix row by ascending distance (rather than input order)
    #[arg(long = "sort_matrix")]
    pub sort_matrix: bool,

    /// Sort each matrix row by descending distance
    #[arg(long = "sort_matrix_descending")]
    pub sort_matrix_descending: bool,

    /// Keep branches (internal vertices) in the computed matrix; printed rows stay leaf-only
    #[arg(long = "include_branches")]
    pub include_branches: bool,

    /// Separator between the distance pairs of a matrix row [default: blank]
    #[arg(long = "matrix_sep", value_name = "S", allow_hyphen_values = true)]
    pub matrix_sep: Option<String>,
}

/// Rewrites single-dash long options to their double-dash spelling.
///
/// The argument following an option that takes a value is left alone, so
/// `-matrix_sep -median` keeps `-median` as the separator.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut value_follows = false;
    for arg in args.into_iter().map(Into::into) {
        if value_follows {
            value_follows = false;
            normalized.push(arg);
            continue;
        }
        let flag = arg.to_str().unwrap_or_default();
        value_follows = VALUE_FLAGS.contains(&flag);
        if LEGACY_FLAGS.contains(&flag) {
            normalized.push(OsString::from(format!("-{flag}")));
        } else {
            normalized.push(arg);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_legacy_flags(args.iter().copied())
            .into_iter()
            .map(|arg| arg.into_string().unwrap())
            .collect()
    }

    #[test]
    fn single_dash_flags_are_doubled() {
        assert_eq!(
            normalize(&["treedist", "all_ave", "-nominalN", "20", "-median", "t.nwk"]),
            ["treedist", "all_ave", "--nominalN", "20", "--median", "t.nwk"]
        );
    }

    #[test]
    fn separator_value_is_kept() {
        assert_eq!(
            normalize(&["treedist", "matrix", "-matrix_sep", "-median", "t.nwk"]),
            ["treedist", "matrix", "--matrix_sep", "-median", "t.nwk"]
        );
    }

    #[test]
    fn legacy_arguments_parse() {
        let args = TreeDistArgs::parse_from(normalize_legacy_flags([
            "treedist",
            "matrix",
            "-sort_matrix_descending",
            "-matrix_sep",
            ",",
            "tree.nwk",
        ]));
        assert_eq!(args.operands, ["matrix", "tree.nwk"]);
        assert!(args.sort_matrix_descending);
        assert_eq!(args.matrix_sep.as_deref(), Some(","));
    }

    #[test]
    fn negative_number_reaches_validation() {
        let args = TreeDistArgs::parse_from(normalize_legacy_flags([
            "treedist", "-MISL", "-5", "tree.nwk",
        ]));
        assert_eq!(args.misl.as_deref(), Some("-5"));
    }
}
