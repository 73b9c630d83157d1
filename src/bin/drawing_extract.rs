//! Debugging CLI for the extraction pipeline.
//!
//! Reads a fragment dump (the JSON shape an upstream PDF content reader
//! produces: an array of pages with their fragments), runs the pipeline
//! with default configuration, and prints the structured result as pretty
//! JSON on stdout.
//!
//! Usage:
//! ```text
//! drawing_extract <fragments.json>
//! RUST_LOG=debug drawing_extract <fragments.json>
//! ```

use std::fs;
use std::process::ExitCode;

use drawing_oxide::{extract_drawing, ExtractionConfig, PageContent};

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: drawing_extract <fragments.json>");
        return ExitCode::FAILURE;
    };

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("error: cannot read {}: {}", path, err);
            return ExitCode::FAILURE;
        },
    };

    let pages: Vec<PageContent> = match serde_json::from_str(&raw) {
        Ok(pages) => pages,
        Err(err) => {
            eprintln!("error: {} is not a fragment dump: {}", path, err);
            return ExitCode::FAILURE;
        },
    };

    let result = match extract_drawing(&pages, ExtractionConfig::default()) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        },
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("error: cannot serialize result: {}", err);
            ExitCode::FAILURE
        },
    }
}
