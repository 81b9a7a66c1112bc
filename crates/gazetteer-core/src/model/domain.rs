// crates/gazetteer-core/src/model/domain.rs
use crate::common::DbStats;
use serde::{Deserialize, Serialize};

/// The three output collections, in source order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gazetteer {
    pub countries: Vec<Country>,
    pub states: Vec<State>,
    pub cities: Vec<City>,
}

/// A Country entry, as written to `countries.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    /// GeoNames place identifier.
    pub id: String,
    /// ISO 3166-1 alpha-2, e.g. "IR".
    pub code: String,
    /// Comma separated locale list, e.g. "fa-IR,ku,ar,az".
    pub cultures: String,
    #[serde(rename = "Name_EN")]
    pub name_en: String,
    #[serde(rename = "Name_FA")]
    pub name_fa: String,
    #[serde(rename = "Name_AR")]
    pub name_ar: String,
    pub phone_code: String,
    /// Mean of the country's city coordinates, 0 when it has none.
    pub latitude: f64,
    pub longitude: f64,
}

/// A State/Region (admin1) entry, as written to `states.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct State {
    pub id: String,
    /// `<ISO>.<admin1>`, e.g. "IR.07".
    pub code: String,
    pub country_id: String,
    pub country_code: String,
    #[serde(rename = "Name_EN")]
    pub name_en: String,
    #[serde(rename = "Name_FA")]
    pub name_fa: String,
    #[serde(rename = "Name_AR")]
    pub name_ar: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A City entry, as written to `cities.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct City {
    pub id: String,
    pub state_id: String,
    pub state_code: String,
    pub country_id: String,
    pub country_code: String,
    #[serde(rename = "Name_EN")]
    pub name_en: String,
    #[serde(rename = "Name_FA")]
    pub name_fa: String,
    #[serde(rename = "Name_AR")]
    pub name_ar: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: String,
}

impl Gazetteer {
    pub fn stats(&self) -> DbStats {
        DbStats {
            countries: self.countries.len(),
            states: self.states.len(),
            cities: self.cities.len(),
        }
    }

    /// Find a country by ISO2 code, case-insensitive (e.g. "IR", "de").
    pub fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(iso2))
    }

    /// Find a state by its exact composite code (e.g. "IR.07").
    pub fn find_state_by_code(&self, code: &str) -> Option<&State> {
        self.states.iter().find(|s| s.code == code)
    }

    pub fn states_for_country<'a>(
        &'a self,
        country: &'a Country,
    ) -> impl Iterator<Item = &'a State> + 'a {
        self.states
            .iter()
            .filter(move |s| s.country_code == country.code)
    }

    pub fn cities_for_state<'a>(&'a self, state: &'a State) -> impl Iterator<Item = &'a City> + 'a {
        self.cities.iter().filter(move |c| c.state_code == state.code)
    }
}

impl Country {
    /// The locale codes, split out of [`Country::cultures`].
    pub fn cultures(&self) -> impl Iterator<Item = &str> {
        self.cultures
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
