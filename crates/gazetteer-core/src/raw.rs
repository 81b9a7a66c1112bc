// crates/gazetteer-core/src/raw.rs

//! Raw records as they come out of the GeoNames dumps.
//!
//! NOTE: these types mirror the external dataset layout. Each format has one
//! parser ([`FromRow`]) that checks the field count and picks the columns by
//! name, so positional indexing does not leak into the pipeline.

use crate::common::DiscardReason;
use crate::loader::common_io::Row;

/// A record type that can be parsed from one tab-split source line.
pub trait FromRow: Sized {
    /// Fewer fields than this and the line is a [`DiscardReason::MalformedRecord`].
    const MIN_FIELDS: usize;

    /// Builds the record; `fields` is guaranteed to hold at least `MIN_FIELDS`.
    fn from_fields(fields: &[&str]) -> Result<Self, DiscardReason>;

    fn parse(row: &Row<'_>) -> Result<Self, DiscardReason> {
        if row.fields.len() < Self::MIN_FIELDS {
            return Err(DiscardReason::MalformedRecord);
        }
        Self::from_fields(&row.fields)
    }
}

// The table 'alternate names':
// alternateNameId, geonameid, isolanguage, alternate name, isPreferredName,
// isShortName, isColloquial, isHistoric, from, to
#[derive(Debug, Clone, PartialEq)]
pub struct AlternateNameRaw {
    pub geonameid: String,
    pub isolanguage: String,
    pub name: String,
}

impl FromRow for AlternateNameRaw {
    const MIN_FIELDS: usize = 4;

    fn from_fields(f: &[&str]) -> Result<Self, DiscardReason> {
        Ok(Self {
            geonameid: f[1].to_owned(),
            isolanguage: f[2].to_owned(),
            name: f[3].to_owned(),
        })
    }
}

// countryInfo.txt:
// ISO ISO3 ISO-Numeric fips Country Capital Area Population Continent tld
// CurrencyCode CurrencyName Phone PostalCodeFormat PostalCodeRegex Languages
// geonameid neighbours EquivalentFipsCode
#[derive(Debug, Clone, PartialEq)]
pub struct CountryInfoRaw {
    pub iso: String,
    pub name: String,
    pub phone: String,
    pub languages: String,
    pub geonameid: String,
}

impl FromRow for CountryInfoRaw {
    const MIN_FIELDS: usize = 17;

    fn from_fields(f: &[&str]) -> Result<Self, DiscardReason> {
        Ok(Self {
            iso: f[0].to_owned(),
            name: f[4].to_owned(),
            phone: f[12].to_owned(),
            languages: f[15].to_owned(),
            geonameid: f[16].to_owned(),
        })
    }
}

// admin1CodesASCII.txt: code, name, name ascii, geonameid
#[derive(Debug, Clone, PartialEq)]
pub struct Admin1CodeRaw {
    /// `<ISO>.<admin1>`, e.g. `IR.07`.
    pub code: String,
    pub country_iso: String,
    pub admin1: String,
    pub name: String,
    pub geonameid: String,
}

impl FromRow for Admin1CodeRaw {
    const MIN_FIELDS: usize = 4;

    fn from_fields(f: &[&str]) -> Result<Self, DiscardReason> {
        let code = f[0];
        let (country_iso, admin1) = split_composite_code(code)?;
        Ok(Self {
            code: code.to_owned(),
            country_iso: country_iso.to_owned(),
            admin1: admin1.to_owned(),
            name: f[1].to_owned(),
            geonameid: f[3].to_owned(),
        })
    }
}

/// Splits `IR.07` into `("IR", "07")`. Exactly one `.` is accepted.
pub fn split_composite_code(code: &str) -> Result<(&str, &str), DiscardReason> {
    match code.split_once('.') {
        Some((iso, rest)) if !rest.contains('.') => Ok((iso, rest)),
        _ => Err(DiscardReason::MalformedCode),
    }
}

/// Joins a country ISO code and admin1 suffix into the state key.
pub fn composite_code(country_iso: &str, admin1: &str) -> String {
    format!("{country_iso}.{admin1}")
}

// The main 'geoname' table (cities500.txt):
// geonameid, name, asciiname, alternatenames, latitude, longitude,
// feature class, feature code, country code, cc2, admin1 code, admin2 code,
// admin3 code, admin4 code, population, elevation, dem, timezone,
// modification date
#[derive(Debug, Clone, PartialEq)]
pub struct CityRaw {
    pub geonameid: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
    pub admin1_code: String,
    pub timezone: String,
}

impl CityRaw {
    /// The `<ISO>.<admin1>` key of the state this city claims to belong to.
    pub fn state_code(&self) -> String {
        composite_code(&self.country_code, &self.admin1_code)
    }
}

impl FromRow for CityRaw {
    const MIN_FIELDS: usize = 19;

    fn from_fields(f: &[&str]) -> Result<Self, DiscardReason> {
        Ok(Self {
            geonameid: f[0].to_owned(),
            name: f[2].to_owned(),
            latitude: parse_coordinate(f[4])?,
            longitude: parse_coordinate(f[5])?,
            country_code: f[8].to_owned(),
            admin1_code: f[10].to_owned(),
            timezone: f[17].to_owned(),
        })
    }
}

/// A finite decimal degree value; `NaN` and the infinities are rejected.
fn parse_coordinate(s: &str) -> Result<f64, DiscardReason> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(DiscardReason::InvalidCoordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row<'a>(fields: &[&'a str]) -> Row<'a> {
        Row {
            line: 1,
            fields: fields.to_vec(),
        }
    }

    fn city_fields<'a>(lat: &'a str, lon: &'a str) -> Vec<&'a str> {
        vec![
            "112931", "Tehran", "Tehran", "", lat, lon, "P", "PPLC", "IR", "", "07", "", "", "",
            "7153309", "", "1191", "Asia/Tehran", "2023-01-01",
        ]
    }

    #[test]
    fn alternate_name_picks_named_columns() {
        let rec = AlternateNameRaw::parse(&row(&["9", "112931", "fa", "تهران", "1"])).unwrap();
        assert_eq!(rec.geonameid, "112931");
        assert_eq!(rec.isolanguage, "fa");
        assert_eq!(rec.name, "تهران");
    }

    #[test]
    fn short_rows_are_malformed() {
        assert_eq!(
            AlternateNameRaw::parse(&row(&["9", "112931", "fa"])),
            Err(DiscardReason::MalformedRecord)
        );
        assert_eq!(
            CountryInfoRaw::parse(&row(&["IR"; 16])),
            Err(DiscardReason::MalformedRecord)
        );
        assert_eq!(
            CityRaw::parse(&row(&city_fields("1", "2")[..18])),
            Err(DiscardReason::MalformedRecord)
        );
    }

    #[test]
    fn country_info_columns() {
        let fields = [
            "IR", "IRN", "364", "IR", "Iran", "Tehran", "1648000", "81800269", "AS", ".ir",
            "IRR", "Rial", "98", "#####-#####", "^(\\d{10})$", "fa-IR,ku", "130758",
        ];
        let rec = CountryInfoRaw::parse(&row(&fields)).unwrap();
        assert_eq!(rec.iso, "IR");
        assert_eq!(rec.name, "Iran");
        assert_eq!(rec.phone, "98");
        assert_eq!(rec.languages, "fa-IR,ku");
        assert_eq!(rec.geonameid, "130758");
    }

    #[test]
    fn admin1_code_is_split_once() {
        let rec = Admin1CodeRaw::parse(&row(&["IR.07", "Tehran", "Tehran", "112931"])).unwrap();
        assert_eq!(rec.country_iso, "IR");
        assert_eq!(rec.admin1, "07");
        assert_eq!(rec.geonameid, "112931");
    }

    #[test]
    fn admin1_code_needs_exactly_one_separator() {
        for code in ["IR07", "IR.07.1", ""] {
            assert_eq!(
                Admin1CodeRaw::parse(&row(&[code, "x", "x", "1"])),
                Err(DiscardReason::MalformedCode),
                "{code:?}"
            );
        }
    }

    #[test]
    fn city_columns_and_state_code() {
        let rec = CityRaw::parse(&row(&city_fields("35.69439", "51.42151"))).unwrap();
        assert_eq!(rec.geonameid, "112931");
        assert_eq!(rec.latitude, 35.69439);
        assert_eq!(rec.longitude, 51.42151);
        assert_eq!(rec.timezone, "Asia/Tehran");
        assert_eq!(rec.state_code(), "IR.07");
    }

    #[test]
    fn bad_coordinates_are_reported() {
        assert_eq!(
            CityRaw::parse(&row(&city_fields("north", "51.4"))),
            Err(DiscardReason::InvalidCoordinate)
        );
        assert_eq!(
            CityRaw::parse(&row(&city_fields("35.7", ""))),
            Err(DiscardReason::InvalidCoordinate)
        );
    }

    #[test]
    fn non_finite_coordinates_are_reported() {
        for (lat, lon) in [
            ("NaN", "51.4"),
            ("nan", "51.4"),
            ("35.7", "inf"),
            ("-infinity", "51.4"),
            ("1e400", "51.4"),
        ] {
            assert_eq!(
                CityRaw::parse(&row(&city_fields(lat, lon))),
                Err(DiscardReason::InvalidCoordinate),
                "{lat:?} {lon:?}"
            );
        }
    }
}
