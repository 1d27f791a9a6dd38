//! In-memory list of registered locations.
//!
//! Insertion order is display order; a postal code appears at most once.
//! Nothing here persists; callers save a snapshot after each mutation.

use crate::types::{Document, Location};
use crate::zipcode::ZipCode;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationState {
    locations: Vec<Location>,
}

impl LocationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from a persisted document, keeping the first entry per postal code.
    pub fn from_document(document: Document) -> Self {
        let mut state = Self::new();
        for location in document.locations {
            let zip = location.zip_code.clone();
            if !state.add(location) {
                tracing::warn!("Dropping duplicate stored location {}", zip);
            }
        }
        state
    }

    pub fn is_registered(&self, zip: &ZipCode) -> bool {
        self.locations.iter().any(|l| &l.zip_code == zip)
    }

    /// Append a location. Returns `false` without changing anything if its
    /// postal code is already registered.
    pub fn add(&mut self, location: Location) -> bool {
        if self.is_registered(&location.zip_code) {
            return false;
        }
        self.locations.push(location);
        true
    }

    /// Remove every entry for `zip`; returns how many were removed.
    pub fn remove(&mut self, zip: &ZipCode) -> usize {
        let before = self.locations.len();
        self.locations.retain(|l| &l.zip_code != zip);
        before - self.locations.len()
    }

    pub fn get(&self, zip: &ZipCode) -> Option<&Location> {
        self.locations.iter().find(|l| &l.zip_code == zip)
    }

    pub fn snapshot(&self) -> &[Location] {
        &self.locations
    }

    pub fn to_document(&self) -> Document {
        Document {
            locations: self.locations.clone(),
        }
    }

    pub fn zip_codes(&self) -> Vec<ZipCode> {
        self.locations.iter().map(|l| l.zip_code.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MainReadings, WeatherPayload, Wind};

    fn payload(name: &str, temp: f64) -> WeatherPayload {
        WeatherPayload {
            name: name.to_string(),
            weather: Vec::new(),
            main: MainReadings {
                temp,
                temp_min: temp,
                temp_max: temp,
                feels_like: temp,
                pressure: 1013.0,
                humidity: 50.0,
                extra: Default::default(),
            },
            wind: Wind::default(),
            visibility: None,
            extra: Default::default(),
        }
    }

    fn location(zip: &str, temp: f64) -> Location {
        Location::new(ZipCode::parse(zip).unwrap(), payload("Somewhere", temp))
    }

    fn zip(s: &str) -> ZipCode {
        ZipCode::parse(s).unwrap()
    }

    #[test]
    fn add_registers_once() {
        let mut state = LocationState::new();
        assert!(state.add(location("10115", 5.0)));
        assert!(state.is_registered(&zip("10115")));

        assert!(!state.add(location("10115", 9.0)));
        assert_eq!(state.len(), 1);
        assert_eq!(state.get(&zip("10115")).unwrap().weather.main.temp, 5.0);
    }

    #[test]
    fn remove_unregisters() {
        let mut state = LocationState::new();
        state.add(location("10115", 5.0));
        assert_eq!(state.remove(&zip("10115")), 1);
        assert!(!state.is_registered(&zip("10115")));
        assert!(state.is_empty());
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut state = LocationState::new();
        state.add(location("10115", 5.0));
        assert_eq!(state.remove(&zip("80331")), 0);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut state = LocationState::new();
        state.add(location("80331", 1.0));
        state.add(location("10115", 2.0));
        state.add(location("20095", 3.0));
        state.remove(&zip("10115"));
        state.add(location("10115", 4.0));

        let order: Vec<String> = state.zip_codes().iter().map(|z| z.to_string()).collect();
        assert_eq!(order, vec!["80331", "20095", "10115"]);
    }

    #[test]
    fn from_document_drops_duplicates() {
        let document = Document {
            locations: vec![location("10115", 1.0), location("10115", 2.0), location("80331", 3.0)],
        };
        let state = LocationState::from_document(document);
        assert_eq!(state.len(), 2);
        assert_eq!(state.get(&zip("10115")).unwrap().weather.main.temp, 1.0);
    }

    #[test]
    fn document_round_trip_preserves_order() {
        let mut state = LocationState::new();
        state.add(location("80331", 1.0));
        state.add(location("10115", 2.0));

        let rebuilt = LocationState::from_document(state.to_document());
        assert_eq!(rebuilt, state);
    }
}
