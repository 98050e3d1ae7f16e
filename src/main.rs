//! Size Calculator
//!
//! Reads one measurement record as JSON (file argument or stdin) and prints
//! the calculation result as JSON on stdout.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use sizecalc::build_info;
use sizecalc::tools::calculate;
use sizecalc::{MeasurementInput, ReferenceTables};

/// Reference tables from `SIZECALC_REFERENCE_PATH`, or the built-in ones
fn load_reference_tables() -> Result<ReferenceTables, Box<dyn std::error::Error>> {
    match std::env::var("SIZECALC_REFERENCE_PATH") {
        Ok(path) => {
            let path = PathBuf::from(path);
            eprintln!("Reference tables: {}", path.display());
            Ok(ReferenceTables::from_path(&path)?)
        }
        Err(_) => Ok(ReferenceTables::default()),
    }
}

fn read_input(path: Option<&str>) -> Result<MeasurementInput, Box<dyn std::error::Error>> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(serde_json::from_str(&json)?)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays a single JSON document
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sizecalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let tables = load_reference_tables()?;
    let relaxed = std::env::var("SIZECALC_RELAXED_MATCH").is_ok_and(|v| v == "1" || v == "true");
    let path = std::env::args().nth(1);
    let input = read_input(path.as_deref())?;

    let response = calculate::calculate(&tables, &input, relaxed)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
