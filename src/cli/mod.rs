//! The `treedist` command-line interface.
//!
//! Parses the arguments into a [StatConfig], loads the first tree of the
//! given file and prints the report to stdout. Errors go to stderr as
//! `Error: <message>` with exit status 1.

pub mod args;

use crate::cli::args::{TreeDistArgs, normalize_legacy_flags};
use crate::error::DistError;
use crate::stats::{Action, StatConfig, parse_positive};
use crate::{newick, pipeline};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Dist(#[from] DistError),

    #[error("Unknown action '{0}', expected per_seq, all_ave or matrix")]
    UnknownAction(String),

    #[error("Cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Runs the CLI on the arguments of the current process.
pub fn run() -> ExitCode {
    run_from(std::env::args_os())
}

/// Runs the CLI on the given arguments, the first being the program name.
pub fn run_from<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = normalize_legacy_flags(args);
    if args.len() <= 1 {
        // Bare invocation: usage only
        return match TreeDistArgs::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", CliError::Output(e));
                ExitCode::FAILURE
            }
        };
    }

    let args = TreeDistArgs::parse_from(args);
    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: TreeDistArgs) -> Result<(), CliError> {
    let (config, file) = into_config(args)?;
    let tree = newick::parse_file(&file)?;
    let report = pipeline::run(&tree, &config)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(report.text().as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Splits the operands into action and file, and validates the options.
fn into_config(args: TreeDistArgs) -> Result<(StatConfig, PathBuf), CliError> {
    let mut operands = args.operands;
    let file = PathBuf::from(operands.pop().unwrap_or_default());
    let action = match operands.pop() {
        Some(action) => action
            .parse::<Action>()
            .map_err(|_| CliError::UnknownAction(action))?,
        None => Action::default(),
    };

    let mut config = StatConfig::new().with_action(action);
    if let Some(value) = args.nominal_n {
        config = config.with_nominal_n(parse_positive("-nominalN", &value)?)?;
    }
    if let Some(value) = args.misl {
        config = config.with_misl(parse_positive("-MISL", &value)?)?;
    }
    if args.median {
        config = config.with_median();
    }
    if args.sort_matrix {
        config = config.with_sorted_matrix();
    }
    if args.sort_matrix_descending {
        config = config.with_descending_matrix();
    }
    if args.include_branches {
        config = config.with_branches();
    }
    if let Some(separator) = args.matrix_sep {
        config = config.with_matrix_separator(separator);
    }

    Ok((config, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_of(args: &[&str]) -> Result<(StatConfig, PathBuf), CliError> {
        into_config(TreeDistArgs::parse_from(normalize_legacy_flags(args.iter().copied())))
    }

    #[test]
    fn action_defaults_to_per_seq() {
        let (config, file) = config_of(&["treedist", "tree.nwk"]).unwrap();
        assert_eq!(config.action(), Action::PerSeq);
        assert_eq!(file, PathBuf::from("tree.nwk"));
    }

    #[test]
    fn options_reach_config() {
        let (config, _) = config_of(&[
            "treedist", "all_ave", "-nominalN", "200", "-MISL", "350", "-median", "tree.nwk",
        ])
        .unwrap();
        assert_eq!(config.action(), Action::AllAve);
        assert_eq!(config.nominal_n(), Some(200));
        assert_eq!(config.misl(), Some(350));
        assert!(config.median());
    }

    #[test]
    fn invalid_number_names_flag_and_value() {
        let err = config_of(&["treedist", "-nominalN", "abc", "tree.nwk"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The value given for -nominalN (abc) is not a positive integer"
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = config_of(&["treedist", "everything", "tree.nwk"]).unwrap_err();
        assert!(matches!(err, CliError::UnknownAction(action) if action == "everything"));
    }
}
