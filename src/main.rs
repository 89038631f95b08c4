// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use pianoscales::{FingeringTable, Generator, GlyphTypeface, RenderConfig};
use thiserror::Error;
use tracing::Level;

const DEFAULT_OUTPUT_DIR: &str = "output";

fn print_usage() {
    println!("pianoscales - Piano Scale Image Generator");
    println!();
    println!("Generates keyboard images with the keys of every major and");
    println!("harmonic minor scale colored, and fingerings for each hand.");
    println!();
    println!("Usage: pianoscales [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --output-dir <DIR>  Output directory for generated images (default: output)");
    println!("  --help              Show this help message");
}

/// Errors from command-line parsing
#[derive(Debug, PartialEq, Eq, Error)]
enum ArgsError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("--output-dir requires a directory")]
    MissingOutputDir,
}

/// What the command line asks for
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Generate { output_dir: PathBuf },
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, ArgsError> {
    let mut output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--output-dir" => {
                let dir = iter.next().ok_or(ArgsError::MissingOutputDir)?;
                output_dir = PathBuf::from(dir);
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => match other.strip_prefix("--output-dir=") {
                Some("") => return Err(ArgsError::MissingOutputDir),
                Some(dir) => output_dir = PathBuf::from(dir),
                None => return Err(ArgsError::UnknownOption(other.to_string())),
            },
        }
    }

    Ok(Command::Generate { output_dir })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    let output_dir = match parse_args(&args) {
        Ok(Command::Generate { output_dir }) => output_dir,
        Ok(Command::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{}", err);
            print_usage();
            process::exit(1);
        }
    };

    let config = RenderConfig::default();
    let typeface = GlyphTypeface::load(&config.font_path, config.font_size)?;
    let fingerings = FingeringTable::builtin().context("Built-in fingering table is invalid")?;

    let generator = Generator::new(&output_dir, &config, &fingerings, &typeface);
    generator.generate_all()?;

    Ok(())
}
