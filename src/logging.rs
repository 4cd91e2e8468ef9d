use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Target, WriteStyle};
use log::LevelFilter;

const CRATES: [&str; 2] = ["fundcmp", "fundcmp_engine"];

fn levels() -> (LevelFilter, LevelFilter) {
    if cfg!(debug_assertions) {
        (LevelFilter::Warn, LevelFilter::Info)
    } else {
        (LevelFilter::Error, LevelFilter::Warn)
    }
}

fn builder() -> env_logger::Builder {
    let (global_level, my_code_level) = levels();

    let mut builder = env_logger::Builder::new();

    builder.filter(None, global_level);
    for name in CRATES.iter() {
        builder.filter(Some(*name), my_code_level);
    }

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder
}

/// The dashboard owns the terminal, so logs only go somewhere when a file is
/// given. Headless runs fall back to stderr.
pub fn init(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let mut builder = builder();

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            builder
                .write_style(WriteStyle::Never)
                .target(Target::Pipe(Box::new(file)));
        }
        None if headless => {
            builder.target(Target::Stderr);
        }
        None => return Ok(()),
    }

    builder.try_init().context("Failed to initialize logger")?;

    Ok(())
}
