//! CLI for running regulated activity extraction on a saved location payload.
//!
//! # Responsibility
//! - Read one CQC location payload from a file, stdin, or the built-in sample.
//! - Print the extraction result, activity codes and Registered Managers.

use anyhow::{Context, Result};
use clap::Parser;
use cqc_activity_core::{
    activity_name_for_code, default_log_level, extract_with_sink, init_logging,
    payload::parse_location, DiagnosticSink, ExtractOptions, LogSink, UNKNOWN_LOCATION,
};
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cqc-activities")]
#[command(about = "Extract regulated activities from a CQC location payload")]
struct Cli {
    /// Location payload JSON file (reads stdin when omitted)
    #[arg(short, long, conflicts_with = "sample")]
    file: Option<PathBuf>,

    /// Run on a built-in sample location
    #[arg(long)]
    sample: bool,

    /// Skip structural validation of activity entries
    #[arg(long)]
    no_validate: bool,

    /// Print extraction errors to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let location = load_location(&cli)?;
    let options = ExtractOptions::default()
        .with_validation(!cli.no_validate)
        .with_verbose(cli.verbose);

    let sink = |location_id: Option<&str>, errors: &[String]| {
        LogSink.report(location_id, errors);
        eprintln!(
            "WARN: Errors extracting activities for {}:",
            location_id.unwrap_or(UNKNOWN_LOCATION)
        );
        for error in errors {
            eprintln!("  - {error}");
        }
    };
    let result = extract_with_sink(&location, options, &sink);

    println!("Extraction result:");
    println!("{}", serde_json::to_string_pretty(&result)?);

    println!("\nActivity codes:");
    for code in result.activity_codes() {
        let reference = activity_name_for_code(code).unwrap_or("(not in reference table)");
        println!("  {code}: {reference}");
    }

    println!("\nRegistered Managers:");
    println!(
        "{}",
        serde_json::to_string_pretty(&result.registered_managers())?
    );

    Ok(())
}

fn load_location(cli: &Cli) -> Result<Value> {
    if cli.sample {
        return Ok(sample_location());
    }

    let text = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read payload from stdin")?;
            buffer
        }
    };

    Ok(parse_location(&text)?)
}

fn sample_location() -> Value {
    json!({
        "locationId": "1-10000302982",
        "name": "Henley House",
        "regulatedActivities": [
            {
                "name": "Accommodation for persons who require nursing or personal care",
                "code": "RA2",
                "contacts": [
                    {
                        "personTitle": "Ms",
                        "personGivenName": "Rebecca Jane",
                        "personFamilyName": "Bewley",
                        "personRoles": ["Registered Manager"]
                    }
                ]
            }
        ]
    })
}
