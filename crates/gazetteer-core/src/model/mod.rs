// crates/gazetteer-core/src/model/mod.rs
pub mod aggregate;
pub mod convert;
pub mod domain;

pub use aggregate::{Centroid, CoordinateSamples};
pub use convert::{load_cities, load_countries, load_states, CityStage, CountryStage, StateStage};
pub use domain::{City, Country, Gazetteer, State};
