// crates/gazetteer-core/src/loader/builder.rs

use super::common_io::open_stream;
use super::{SourcePaths, CITIES_JSON, COUNTRIES_JSON, STATES_JSON};
use crate::alias::AlternateNameIndex;
use crate::common::BuildReport;
use crate::error::{GazetteerError, Result};
use crate::model::{load_cities, load_countries, load_states, Gazetteer};

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// Two-space indented, one field per line.
    #[default]
    Pretty,
    /// Everything on a single line.
    Compact,
}

// -----------------------------------------------------------------------------
// PIPELINE
// -----------------------------------------------------------------------------

/// Runs every stage over the sources and returns the finished collections.
///
/// alternate names -> countries -> states -> cities -> coordinate averages.
/// Each source file is open only while its own stage runs.
pub fn build_gazetteer(sources: &SourcePaths) -> Result<(Gazetteer, BuildReport)> {
    // 1. Alternate names
    let (names, names_report) = AlternateNameIndex::load_from_path(&sources.alternate_names)?;

    // 2. Countries
    let countries = load_countries(open_stream(&sources.country_info)?, &names)?;

    // 3. States
    let states = load_states(open_stream(&sources.admin1_codes)?, &countries.ids, &names)?;

    // 4. Cities
    let cities = load_cities(
        open_stream(&sources.cities)?,
        &countries.ids,
        &states.ids,
        &names,
    )?;

    // 5. Aggregate
    let mut db = Gazetteer {
        countries: countries.countries,
        states: states.states,
        cities: cities.cities,
    };
    cities.samples.apply(&mut db.countries, &mut db.states);

    let report = BuildReport {
        alternate_names: names_report,
        countries: countries.report,
        states: states.report,
        cities: cities.report,
        stats: db.stats(),
    };
    Ok((db, report))
}

// -----------------------------------------------------------------------------
// OUTPUT
// -----------------------------------------------------------------------------

/// Writes `countries.json`, `states.json` and `cities.json` into `out_dir`,
/// creating it if needed.
///
/// Files are written one after another; a failure leaves the files already
/// written in place.
pub fn write_collections(db: &Gazetteer, out_dir: impl AsRef<Path>, style: JsonStyle) -> Result<()> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(|source| GazetteerError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    write_generic(&out_dir.join(COUNTRIES_JSON), &db.countries, style)?;
    write_generic(&out_dir.join(STATES_JSON), &db.states, style)?;
    write_generic(&out_dir.join(CITIES_JSON), &db.cities, style)?;

    info!("Wrote JSON collections to {}", out_dir.display());
    Ok(())
}

/// Serializes any collection to `path` as UTF-8 JSON. Non-ASCII text is
/// written as is, never `\u` escaped.
fn write_generic<T: Serialize + ?Sized>(path: &Path, value: &T, style: JsonStyle) -> Result<()> {
    let write_err = |source: std::io::Error| GazetteerError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    let written = match style {
        JsonStyle::Pretty => serde_json::to_writer_pretty(&mut writer, value),
        JsonStyle::Compact => serde_json::to_writer(&mut writer, value),
    };
    written.map_err(|e| {
        if e.is_io() {
            write_err(e.into())
        } else {
            GazetteerError::Json(e)
        }
    })?;

    writer.flush().map_err(write_err)?;
    Ok(())
}
