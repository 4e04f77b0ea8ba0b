// src/core/options.rs

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use clap::{Parser, error::ErrorKind};

use crate::cli::display::DisplaySurface;

/// Parses the raw argument tail of one command into its options record.
///
/// Every command declares its options as a `clap` derive struct with
/// `no_binary_name = true`. Three outcomes:
/// - `Ok(Some(opts))`: the tail validated.
/// - `Ok(None)`: the tail was a help request; usage was printed and the
///   command should do nothing further (not an error).
/// - `Err(..)`: unknown flag, bad type, or out-of-range choice. The message
///   carries clap's usage text and is reported at the handler boundary.
///
/// When `default_flag` is given and the first token is not a flag, the flag
/// is prepended so `load AAPL` works as shorthand for `load -t AAPL`.
pub fn parse_args<T: Parser>(
    args: &[String],
    default_flag: Option<&str>,
    display: &mut dyn DisplaySurface,
) -> Result<Option<T>> {
    let is_help_request = args.iter().any(|arg| arg == "-h" || arg == "--help");

    let mut argv: Vec<String> = args.to_vec();
    if !is_help_request
        && let Some(flag) = default_flag
        && let Some(first) = argv.first()
        && !first.starts_with('-')
    {
        argv.insert(0, flag.to_string());
    }

    match T::try_parse_from(argv) {
        Ok(opts) => Ok(Some(opts)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            display.print(&err.to_string());
            Ok(None)
        }
        Err(err) => Err(anyhow!("{err}")),
    }
}

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("'{raw}' is not a valid date (expected YYYY-MM-DD)"))
}
