//! gazetteer — turn GeoNames dumps into JSON collections
//!
//! Reads the four standard GeoNames text dumps and writes
//! `countries.json`, `states.json` and `cities.json`.
//!
//! Usage examples
//! --------------
//!
//! - Run next to the dumps, output goes to `./jsonFiles`
//!   $ gazetteer
//!
//! - Dumps elsewhere, custom output directory
//!   $ gazetteer --data-dir /srv/geonames --output-dir /tmp/geo
//!
//! - More detail about dropped lines
//!   $ RUST_LOG=debug gazetteer
//!
//! A missing input file or a failed write ends the run with a non-zero exit
//! status; malformed lines are only counted.
mod args;

use crate::args::CliArgs;
use anyhow::Context;
use clap::Parser;
use gazetteer_core::{build_gazetteer, write_collections, JsonStyle, SourcePaths};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    if let Err(err) = run(&args) {
        error!("{err:#}");
        return Err(err);
    }
    Ok(())
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let sources = match &args.data_dir {
        Some(dir) => SourcePaths::in_dir(dir),
        None => SourcePaths::default(),
    };
    let style = if args.compact {
        JsonStyle::Compact
    } else {
        JsonStyle::Pretty
    };

    let (db, report) = build_gazetteer(&sources).context("Failed to build gazetteer")?;
    write_collections(&db, &args.output_dir, style).context("Failed to write JSON output")?;
    info!("Wrote JSON collections to {}", args.output_dir.display());

    println!("Gazetteer summary:");
    println!("  Alternate names: {}", report.alternate_names);
    println!("  Countries: {}", report.countries);
    println!("  States/Regions: {}", report.states);
    println!("  Cities: {}", report.cities);
    println!("Done.");

    Ok(())
}
