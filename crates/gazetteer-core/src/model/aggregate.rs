// crates/gazetteer-core/src/model/aggregate.rs
use super::domain::{Country, State};
use std::collections::HashMap;

/// Running mean of coordinate samples.
///
/// Sums are Neumaier-compensated and accumulated in input order, so the same
/// samples in the same order always give the same mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Centroid {
    lat: CompensatedSum,
    lon: CompensatedSum,
    count: usize,
}

impl Centroid {
    pub fn add(&mut self, lat: f64, lon: f64) {
        self.lat.add(lat);
        self.lon.add(lon);
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `(lat, lon)` mean, `None` without samples.
    pub fn mean(&self) -> Option<(f64, f64)> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some((self.lat.total() / n, self.lon.total() / n))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Coordinate samples of the retained cities, keyed by state code and by
/// country ISO code.
#[derive(Debug, Clone, Default)]
pub struct CoordinateSamples {
    by_state: HashMap<String, Centroid>,
    by_country: HashMap<String, Centroid>,
}

impl CoordinateSamples {
    pub fn add(&mut self, state_code: &str, country_iso: &str, lat: f64, lon: f64) {
        self.by_state
            .entry(state_code.to_owned())
            .or_default()
            .add(lat, lon);
        self.by_country
            .entry(country_iso.to_owned())
            .or_default()
            .add(lat, lon);
    }

    pub fn for_state(&self, code: &str) -> Option<&Centroid> {
        self.by_state.get(code)
    }

    pub fn for_country(&self, iso: &str) -> Option<&Centroid> {
        self.by_country.get(iso)
    }

    /// Overwrites the placeholder coordinates of every state and country that
    /// received at least one sample. The rest stay at (0, 0).
    pub fn apply(&self, countries: &mut [Country], states: &mut [State]) {
        for state in states.iter_mut() {
            if let Some((lat, lon)) = self.for_state(&state.code).and_then(Centroid::mean) {
                state.latitude = lat;
                state.longitude = lon;
            }
        }
        for country in countries.iter_mut() {
            if let Some((lat, lon)) = self.for_country(&country.code).and_then(Centroid::mean) {
                country.latitude = lat;
                country.longitude = lon;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state(code: &str) -> State {
        State {
            id: "1".into(),
            code: code.into(),
            country_id: "2".into(),
            country_code: code[..2].into(),
            name_en: code.into(),
            name_fa: String::new(),
            name_ar: String::new(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn country(code: &str) -> Country {
        Country {
            id: "2".into(),
            code: code.into(),
            cultures: String::new(),
            name_en: code.into(),
            name_fa: String::new(),
            name_ar: String::new(),
            phone_code: String::new(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    #[test]
    fn mean_of_two_samples() {
        let mut c = Centroid::default();
        c.add(10.0, 20.0);
        c.add(12.0, 22.0);
        assert_eq!(c.mean(), Some((11.0, 21.0)));
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn empty_centroid_has_no_mean() {
        assert_eq!(Centroid::default().mean(), None);
    }

    #[test]
    fn compensated_sum_keeps_small_terms() {
        let mut c = Centroid::default();
        c.add(1e16, 0.0);
        c.add(1.0, 0.0);
        c.add(-1e16, 0.0);
        let (lat, _) = c.mean().unwrap();
        assert_relative_eq!(lat, 1.0 / 3.0);
    }

    #[test]
    fn apply_updates_sampled_entities_only() {
        let mut samples = CoordinateSamples::default();
        samples.add("IR.07", "IR", 35.0, 51.0);
        samples.add("IR.07", "IR", 36.0, 52.0);
        samples.add("IR.23", "IR", 29.0, 52.5);

        let mut countries = vec![country("IR"), country("IQ")];
        let mut states = vec![state("IR.07"), state("IR.23"), state("IR.01")];
        samples.apply(&mut countries, &mut states);

        assert_eq!((states[0].latitude, states[0].longitude), (35.5, 51.5));
        assert_eq!((states[1].latitude, states[1].longitude), (29.0, 52.5));
        assert_eq!((states[2].latitude, states[2].longitude), (0.0, 0.0));

        assert_relative_eq!(countries[0].latitude, 100.0 / 3.0);
        assert_relative_eq!(countries[0].longitude, 155.5 / 3.0);
        assert_eq!((countries[1].latitude, countries[1].longitude), (0.0, 0.0));
    }
}
