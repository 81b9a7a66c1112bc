// crates/gazetteer-core/src/model/convert.rs

//! Raw -> model conversion, one function per pipeline stage.
//!
//! Each stage reads one source stream, consults the lookup tables produced by
//! the stages before it, and hands back its entities, its own lookup table
//! and a [`StageReport`]. Nothing is shared between stages except through
//! these return values.

use super::aggregate::CoordinateSamples;
use super::domain::{City, Country, State};
use crate::alias::{AlternateNameIndex, Lang};
use crate::common::{DiscardReason, StageReport};
use crate::error::Result;
use crate::loader::common_io::{for_each_row, Comments};
use crate::raw::{Admin1CodeRaw, CityRaw, CountryInfoRaw, FromRow};
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info, warn};

/// Key → place identifier. ISO code for countries, `<ISO>.<admin1>` for states.
pub type IdMap = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct CountryStage {
    pub countries: Vec<Country>,
    /// ISO code → country identifier.
    pub ids: IdMap,
    pub report: StageReport,
}

#[derive(Debug, Clone, Default)]
pub struct StateStage {
    pub states: Vec<State>,
    /// State code → state identifier.
    pub ids: IdMap,
    pub report: StageReport,
}

#[derive(Debug, Clone, Default)]
pub struct CityStage {
    pub cities: Vec<City>,
    pub samples: CoordinateSamples,
    pub report: StageReport,
}

/// Resolves a key to a usable (non-empty) identifier.
fn resolve<'a>(ids: &'a IdMap, key: &str) -> Option<&'a str> {
    ids.get(key).map(String::as_str).filter(|id| !id.is_empty())
}

/// Pushes `item` under `key`, or replaces the earlier item with the same key
/// in place so output order follows first appearance.
fn upsert<T>(items: &mut Vec<T>, positions: &mut HashMap<String, usize>, key: &str, item: T) {
    match positions.get(key) {
        Some(&at) => items[at] = item,
        None => {
            positions.insert(key.to_owned(), items.len());
            items.push(item);
        }
    }
}

/// **Stage 2:** `countryInfo.txt` -> countries.
pub fn load_countries<R: Read>(reader: R, names: &AlternateNameIndex) -> Result<CountryStage> {
    let mut stage = CountryStage::default();
    let mut positions = HashMap::new();

    for_each_row(reader, Comments::Skip, |row| {
        let raw = match row.and_then(|row| CountryInfoRaw::parse(&row)) {
            Ok(raw) => raw,
            Err(reason) => return stage.report.record_discard(reason),
        };

        stage.ids.insert(raw.iso.clone(), raw.geonameid.clone());
        let country = Country {
            name_fa: names.name_or_empty(&raw.geonameid, Lang::Fa),
            name_ar: names.name_or_empty(&raw.geonameid, Lang::Ar),
            id: raw.geonameid,
            code: raw.iso,
            cultures: raw.languages,
            name_en: raw.name,
            phone_code: raw.phone,
            latitude: 0.0,
            longitude: 0.0,
        };
        let key = country.code.clone();
        upsert(&mut stage.countries, &mut positions, &key, country);
    })?;

    stage.report.loaded = stage.countries.len();
    info!("Loaded {} countries", stage.report.loaded);
    Ok(stage)
}

/// **Stage 3:** `admin1CodesASCII.txt` -> states, joined to their country.
pub fn load_states<R: Read>(
    reader: R,
    country_ids: &IdMap,
    names: &AlternateNameIndex,
) -> Result<StateStage> {
    let mut stage = StateStage::default();
    let mut positions = HashMap::new();

    for_each_row(reader, Comments::Keep, |row| {
        let raw = match row.and_then(|row| Admin1CodeRaw::parse(&row)) {
            Ok(raw) => raw,
            Err(reason) => return stage.report.record_discard(reason),
        };

        let Some(country_id) = resolve(country_ids, &raw.country_iso) else {
            debug!("dropping state {}: unknown country {}", raw.code, raw.country_iso);
            return stage.report.record_discard(DiscardReason::UnknownCountry);
        };

        stage.ids.insert(raw.code.clone(), raw.geonameid.clone());
        let state = State {
            name_fa: names.name_or_empty(&raw.geonameid, Lang::Fa),
            name_ar: names.name_or_empty(&raw.geonameid, Lang::Ar),
            id: raw.geonameid,
            code: raw.code,
            country_id: country_id.to_owned(),
            country_code: raw.country_iso,
            name_en: raw.name,
            latitude: 0.0,
            longitude: 0.0,
        };
        let key = state.code.clone();
        upsert(&mut stage.states, &mut positions, &key, state);
    })?;

    stage.report.loaded = stage.states.len();
    info!(
        "Loaded {} states ({} without a known country)",
        stage.report.loaded,
        stage.report.discarded(DiscardReason::UnknownCountry)
    );
    Ok(stage)
}

/// **Stage 4:** `cities500.txt` -> cities, joined to state and country, with
/// their coordinates collected for [`CoordinateSamples::apply`].
///
/// A city whose state code is unknown is dropped and its coordinates count
/// towards no average.
pub fn load_cities<R: Read>(
    reader: R,
    country_ids: &IdMap,
    state_ids: &IdMap,
    names: &AlternateNameIndex,
) -> Result<CityStage> {
    let mut stage = CityStage::default();

    for_each_row(reader, Comments::Keep, |row| {
        let line = row.as_ref().map_or(0, |r| r.line);
        let raw = match row.and_then(|row| CityRaw::parse(&row)) {
            Ok(raw) => raw,
            Err(DiscardReason::InvalidCoordinate) => {
                warn!("skipping city on line {line}: coordinate is not a finite number");
                return stage.report.record_discard(DiscardReason::InvalidCoordinate);
            }
            Err(reason) => return stage.report.record_discard(reason),
        };

        let state_code = raw.state_code();
        let Some(state_id) = resolve(state_ids, &state_code) else {
            return stage.report.record_discard(DiscardReason::UnknownState);
        };
        // Only reachable with a state map not built by `load_states` from
        // the same country map.
        let Some(country_id) = resolve(country_ids, &raw.country_code) else {
            debug!("dropping city {}: unknown country {}", raw.geonameid, raw.country_code);
            return stage.report.record_discard(DiscardReason::UnknownCountry);
        };

        stage
            .samples
            .add(&state_code, &raw.country_code, raw.latitude, raw.longitude);
        stage.cities.push(City {
            name_fa: names.name_or_empty(&raw.geonameid, Lang::Fa),
            name_ar: names.name_or_empty(&raw.geonameid, Lang::Ar),
            id: raw.geonameid,
            state_id: state_id.to_owned(),
            state_code,
            country_id: country_id.to_owned(),
            country_code: raw.country_code,
            name_en: raw.name,
            latitude: raw.latitude,
            longitude: raw.longitude,
            time_zone: raw.timezone,
        });
    })?;

    stage.report.loaded = stage.cities.len();
    info!(
        "Loaded {} cities ({} without a known state)",
        stage.report.loaded,
        stage.report.discarded(DiscardReason::UnknownState)
    );
    Ok(stage)
}
