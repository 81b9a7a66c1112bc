// crates/gazetteer-core/src/lib.rs

//! # gazetteer-core
//!
//! Turns the flat GeoNames-style dumps (`countryInfo.txt`,
//! `admin1CodesASCII.txt`, `cities500.txt`, `alternateNames.txt`) into three
//! normalized collections: countries, states and cities, with Persian and
//! Arabic display names attached and state/country coordinates averaged from
//! their cities.
//!
//! The pipeline is strictly linear:
//!
//! ```text
//! alternate names -> countries -> states -> cities -> aggregate -> JSON
//! ```
//!
//! ```no_run
//! use gazetteer_core::{build_gazetteer, write_collections, JsonStyle, SourcePaths};
//!
//! let (db, report) = build_gazetteer(&SourcePaths::default())?;
//! write_collections(&db, "jsonFiles", JsonStyle::Pretty)?;
//! println!("{} cities", report.stats.cities);
//! # Ok::<(), gazetteer_core::GazetteerError>(())
//! ```

pub mod alias;
pub mod common;
pub mod error;
pub mod loader;
pub mod model;
pub mod text;
// Shared raw input records, one parser per source format
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::alias::AlternateNameIndex;
pub use crate::common::{BuildReport, DbStats, DiscardReason, StageReport};
pub use crate::error::{GazetteerError, Result};
pub use crate::loader::builder::{build_gazetteer, write_collections, JsonStyle};
pub use crate::loader::{SourcePaths, DEFAULT_OUTPUT_DIR};
pub use crate::model::{City, Country, Gazetteer, State};
pub use crate::text::strip_diacritics;
