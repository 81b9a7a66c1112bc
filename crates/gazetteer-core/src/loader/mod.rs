// crates/gazetteer-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (opening files, decompression, tab splitting)
//! and the builder that drives the stages and writes the JSON collections.

use std::path::{Path, PathBuf};

pub mod builder;
pub mod common_io;

pub const ALTERNATE_NAMES_FILE: &str = "alternateNames.txt";
pub const COUNTRY_INFO_FILE: &str = "countryInfo.txt";
pub const ADMIN1_CODES_FILE: &str = "admin1CodesASCII.txt";
pub const CITIES_FILE: &str = "cities500.txt";

/// Directory the JSON collections are written to unless told otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "jsonFiles";

pub const COUNTRIES_JSON: &str = "countries.json";
pub const STATES_JSON: &str = "states.json";
pub const CITIES_JSON: &str = "cities.json";

/// Locations of the four source dumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub alternate_names: PathBuf,
    pub country_info: PathBuf,
    pub admin1_codes: PathBuf,
    pub cities: PathBuf,
}

impl SourcePaths {
    /// The standard dump file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            alternate_names: dir.join(ALTERNATE_NAMES_FILE),
            country_info: dir.join(COUNTRY_INFO_FILE),
            admin1_codes: dir.join(ADMIN1_CODES_FILE),
            cities: dir.join(CITIES_FILE),
        }
    }
}

impl Default for SourcePaths {
    /// The standard dump file names in the working directory.
    fn default() -> Self {
        Self {
            alternate_names: PathBuf::from(ALTERNATE_NAMES_FILE),
            country_info: PathBuf::from(COUNTRY_INFO_FILE),
            admin1_codes: PathBuf::from(ADMIN1_CODES_FILE),
            cities: PathBuf::from(CITIES_FILE),
        }
    }
}
