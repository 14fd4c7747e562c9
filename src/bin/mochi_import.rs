//! Mochi Canvas Importer
//!
//! Imports an ANSI art, text or native canvas file and prints the
//! resulting canvas as text or as a JSON snapshot.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use mochi_canvas::{import_canvas_with, import_list, ImportConfig, Snapshot};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut format: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut input_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_help = false;
    let mut show_list = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--format" => {
                i += 1;
                if i < args.len() {
                    format = Some(args[i].clone());
                }
            },
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(PathBuf::from(&args[i]));
                }
            },
            "-l" | "--list" => {
                show_list = true;
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if show_list {
        for &(name, description) in import_list() {
            let name = if name.is_empty() { "\"\"" } else { name };
            println!("{:<8} {}", name, description);
        }
        return ExitCode::SUCCESS;
    }

    let config = match &config_path {
        Some(path) => match ImportConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => ImportConfig::load_or_default(),
    };
    let format = format.unwrap_or_else(|| config.default_format.clone());

    // Read input
    let input_data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            // Read from stdin
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };

    let canvas = match import_canvas_with(&input_data, &format, &config) {
        Ok(canvas) => canvas,
        Err(e) => {
            eprintln!("Import failed: {}", e);
            return ExitCode::FAILURE;
        },
    };

    // Output result
    let snapshot = Snapshot::from_canvas(&canvas);
    match output_format {
        OutputFormat::Text => {
            println!("Canvas ({}x{}):", snapshot.width, snapshot.height);
            println!("---");
            print!("{}", snapshot.to_text());
            println!("---");
        },
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    ExitCode::SUCCESS
}

fn print_help() {
    println!("Mochi Canvas Importer");
    println!();
    println!("Usage: mochi-import [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -f, --format <NAME>  Input format: text, caca, ansi (default: autodetect)");
    println!("  -l, --list           List supported import formats");
    println!("  -j, --json           Output snapshot as JSON");
    println!("  -t, --text           Output canvas as text (default)");
    println!("      --config <PATH>  Load configuration from a JSON file");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!("Set RUST_LOG=debug to see which decoder is used.");
    println!();
    println!("Examples:");
    println!("  mochi-import artwork.ans");
    println!("  mochi-import --format text README");
    println!("  mochi-import --json < dump.caca > snapshot.json");
}
