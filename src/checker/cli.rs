// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::env;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::core::borrow::SubProvider;
use crate::core::error::{CheckError, CheckErrorKind};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LONG_ABOUT: &str = "Conformance checker for 16-bit subtract-with-borrow.

Runs the built-in vector table in order and stops at the first mismatch.
Exit status is 0 when every vector passes, 1 on a mismatch, and 2 on usage,
configuration, or vector-file errors.
Extra vectors can be loaded from a JSON file with --vectors; 16-bit files run
after the built-in table, other widths run on their own.";

#[derive(Parser, Debug)]
#[command(
    name = "subcs",
    version = VERSION,
    about = "Subtract-with-borrow conformance checker",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        long = "provider",
        value_enum,
        long_help = "Implementation under test. native chains wrapping subtractions; reference computes in wide signed arithmetic. Defaults to native."
    )]
    pub provider: Option<ProviderArg>,
    #[arg(
        long = "vectors",
        value_name = "FILE",
        long_help = "Load additional vectors from a JSON file."
    )]
    pub vectors_file: Option<PathBuf>,
    #[arg(
        long = "no-builtin",
        action = ArgAction::SetTrue,
        long_help = "Skip the built-in 16-bit table and check only the vector file (from --vectors or SUBCS_VECTORS)."
    )]
    pub no_builtin: bool,
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        long_help = "Select output format. text is default; json emits one object per line."
    )]
    pub format: OutputFormat,
    #[arg(
        short = 'q',
        long = "quiet",
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        long_help = "Suppress the summary line on success. Failures are still reported."
    )]
    pub quiet: bool,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::SetTrue,
        long_help = "Report each passing vector."
    )]
    pub verbose: bool,
    #[arg(
        short = 'E',
        long = "error",
        value_name = "FILE",
        long_help = "Write diagnostics to FILE instead of stderr."
    )]
    pub error_file: Option<PathBuf>,
    #[arg(
        long = "list",
        action = ArgAction::SetTrue,
        long_help = "Print the vectors that would be checked and exit."
    )]
    pub list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Native,
    Reference,
}

impl From<ProviderArg> for SubProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Native => SubProvider::Native,
            ProviderArg::Reference => SubProvider::Reference,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticsSinkConfig {
    Stderr,
    File { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub provider: SubProvider,
    pub vectors_file: Option<PathBuf>,
    pub run_builtin: bool,
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub diagnostics_sink: DiagnosticsSinkConfig,
    pub list_only: bool,
}

fn cli_error(message: impl Into<String>) -> CheckError {
    CheckError::new(CheckErrorKind::Cli, message)
}

fn parse_env_bool(var_name: &str) -> Result<Option<bool>, CheckError> {
    let Some(raw) = env::var_os(var_name) else {
        return Ok(None);
    };
    let value = raw.to_string_lossy().trim().to_ascii_lowercase();
    let parsed = match value.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        "" => None,
        _ => {
            return Err(cli_error(format!(
                "Invalid boolean value for {var_name}: {value}"
            )));
        }
    };
    Ok(parsed)
}

fn parse_env_path(var_name: &str) -> Result<Option<PathBuf>, CheckError> {
    let Some(raw) = env::var_os(var_name) else {
        return Ok(None);
    };
    let value = raw.to_string_lossy().trim().to_string();
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(value)))
}

fn parse_env_provider(var_name: &str) -> Result<Option<SubProvider>, CheckError> {
    let Some(raw) = env::var_os(var_name) else {
        return Ok(None);
    };
    let value = raw.to_string_lossy().trim().to_string();
    if value.is_empty() {
        return Ok(None);
    }
    SubProvider::parse(&value)
        .map(Some)
        .ok_or_else(|| cli_error(format!("Invalid provider for {var_name}: {value}")))
}

/// Validate CLI arguments and return parsed configuration.
///
/// Flags take precedence over `SUBCS_PROVIDER`, `SUBCS_VECTORS`, and
/// `SUBCS_QUIET`.
pub fn validate_cli(cli: &Cli) -> Result<CliConfig, CheckError> {
    let env_provider = parse_env_provider("SUBCS_PROVIDER")?;
    let env_vectors = parse_env_path("SUBCS_VECTORS")?;
    let env_quiet = parse_env_bool("SUBCS_QUIET")?;

    let provider = cli
        .provider
        .map(SubProvider::from)
        .or(env_provider)
        .unwrap_or(SubProvider::Native);
    let vectors_file = cli.vectors_file.clone().or(env_vectors);
    if cli.no_builtin && vectors_file.is_none() {
        return Err(cli_error("--no-builtin requires a vector file"));
    }
    let quiet = cli.quiet || (!cli.verbose && env_quiet.unwrap_or(false));

    Ok(CliConfig {
        provider,
        vectors_file,
        run_builtin: !cli.no_builtin,
        output_format: cli.format,
        quiet,
        verbose: cli.verbose,
        diagnostics_sink: match &cli.error_file {
            Some(path) => DiagnosticsSinkConfig::File { path: path.clone() },
            None => DiagnosticsSinkConfig::Stderr,
        },
        list_only: cli.list,
    })
}
