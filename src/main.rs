// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for subcs.

use std::fs::OpenOptions;
use std::io::{self, Write};

use clap::Parser;
use serde_json::json;

use subcs::checker::cli::{validate_cli, Cli, CliConfig, DiagnosticsSinkConfig, OutputFormat};
use subcs::checker::{run_with_config, CheckPlan, RunError};
use subcs::core::error::CheckError;
use subcs::core::report::pass_prefix;

struct DiagnosticsSink<'a> {
    writer: Box<dyn Write + 'a>,
}

impl DiagnosticsSink<'_> {
    fn from_config(config: &DiagnosticsSinkConfig) -> io::Result<Self> {
        match config {
            DiagnosticsSinkConfig::Stderr => Ok(Self {
                writer: Box::new(io::stderr()),
            }),
            DiagnosticsSinkConfig::File { path } => {
                let file = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(path)?;
                Ok(Self {
                    writer: Box::new(file),
                })
            }
        }
    }

    fn emit_line(&mut self, line: &str) {
        let _ = writeln!(self.writer, "{line}");
    }

    fn emit_error(&mut self, err: &RunError, format: OutputFormat, use_color: bool) {
        match format {
            OutputFormat::Json => self.emit_line(&err.to_json().to_string()),
            OutputFormat::Text => self.emit_line(&err.as_check_error().to_text_line(use_color)),
        }
    }
}

fn print_listing(config: &CliConfig) -> Result<(), CheckError> {
    let plan = CheckPlan::from_config(config)?;
    for row in plan.listing() {
        if config.output_format == OutputFormat::Json {
            println!(
                "{}",
                json!({ "index": row.index, "width": row.bits, "vector": row.json })
            );
        } else {
            println!("{:>4}  u{:<2}  {}", row.index, row.bits, row.text);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let use_color = std::env::var("NO_COLOR").is_err();

    let config = match validate_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.to_text_line(use_color));
            std::process::exit(err.kind().exit_status());
        }
    };

    let mut sink = match DiagnosticsSink::from_config(&config.diagnostics_sink) {
        Ok(sink) => sink,
        Err(err) => {
            eprintln!("Failed to open diagnostics sink: {err}");
            std::process::exit(2);
        }
    };

    if config.list_only {
        if let Err(err) = print_listing(&config) {
            sink.emit_error(&RunError::Setup(err.clone()), config.output_format, use_color);
            std::process::exit(err.kind().exit_status());
        }
        return;
    }

    let verbose = config.verbose;
    let format = config.output_format;
    let mut on_pass = |index: usize, vector: String| {
        if !verbose {
            return;
        }
        if format == OutputFormat::Json {
            println!("{}", json!({ "index": index, "status": "pass", "vector": vector }));
        } else {
            println!("{} [{index}] {vector}", pass_prefix(use_color));
        }
    };

    match run_with_config(&config, &mut on_pass) {
        Ok(summary) => {
            if config.quiet {
                return;
            }
            if format == OutputFormat::Json {
                println!("{}", summary.to_json());
            } else {
                println!("{}: {}", pass_prefix(use_color), summary.to_text());
            }
        }
        Err(err) => {
            sink.emit_error(&err, format, use_color);
            std::process::exit(err.exit_status());
        }
    }
}
