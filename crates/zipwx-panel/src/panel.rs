//! The weather panel controller.
//!
//! Owns the location list, its persisted copy and the current input. Every
//! mutation is followed by a full save. Fetch failures are logged and change
//! nothing.

use chrono::{DateTime, TimeZone};
use zipwx_weather::{
    validate_input, BlobStore, InputValidation, Location, LocationState, PersistedStore,
    StoreError, WeatherClient, WeatherError, WeatherPayload, ZipCode,
};

use crate::error_mapping::IntoAppError;
use crate::settings::PanelSettings;
use crate::view::{self, PanelView};

/// What a clickable node does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove(ZipCode),
    Refresh,
}

/// Result of applying a finished fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Added,
    /// Registered meanwhile (e.g. a second submit of the same code); result dropped
    AlreadyRegistered,
    Failed,
    /// Input was invalid or already registered; nothing was fetched
    Skipped,
}

pub struct WeatherPanel<S> {
    state: LocationState,
    store: PersistedStore<S>,
    settings: PanelSettings,
    input: String,
    validation: InputValidation,
}

impl<S: BlobStore> WeatherPanel<S> {
    /// Restore the panel from the store.
    pub fn open(store: PersistedStore<S>, settings: PanelSettings) -> Self {
        let state = LocationState::from_document(store.load());
        tracing::info!("Weather panel opened with {} location(s)", state.len());

        Self {
            state,
            store,
            settings,
            input: String::new(),
            validation: validate_input(""),
        }
    }

    pub fn state(&self) -> &LocationState {
        &self.state
    }

    pub fn store(&self) -> &PersistedStore<S> {
        &self.store
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn validation(&self) -> &InputValidation {
        &self.validation
    }

    /// Keystroke handler: replaces the input text and re-validates it.
    pub fn on_input(&mut self, text: &str) -> &InputValidation {
        self.input = text.to_string();
        self.validation = validate_input(text);
        &self.validation
    }

    /// Postal code to fetch for the current input, if submitting is allowed
    /// and the code is not registered yet.
    pub fn request_add(&self) -> Option<ZipCode> {
        if !self.validation.submit_enabled {
            tracing::debug!("Submit ignored, input {:?} is invalid", self.input);
            return None;
        }
        let zip = ZipCode::parse(&self.input).ok()?;
        if self.state.is_registered(&zip) {
            tracing::debug!("{} is already registered", zip);
            return None;
        }
        Some(zip)
    }

    /// Apply a finished fetch. The registration check is repeated here since
    /// the list may have changed while the request was in flight.
    pub fn complete_fetch(
        &mut self,
        zip: ZipCode,
        result: Result<WeatherPayload, WeatherError>,
    ) -> Result<FetchOutcome, StoreError> {
        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Fetching weather for {} failed: {}", zip, e.into_app_error());
                return Ok(FetchOutcome::Failed);
            }
        };

        if !self.state.add(Location::new(zip.clone(), payload)) {
            tracing::debug!("Dropping result for {}, registered meanwhile", zip);
            return Ok(FetchOutcome::AlreadyRegistered);
        }

        tracing::info!("Added location {}", zip);
        self.save()?;
        Ok(FetchOutcome::Added)
    }

    /// Submit the current input: fetch and append if valid and new.
    pub async fn add(&mut self, client: &WeatherClient) -> Result<FetchOutcome, StoreError> {
        let Some(zip) = self.request_add() else {
            return Ok(FetchOutcome::Skipped);
        };
        let result = client.fetch(&zip).await;
        self.complete_fetch(zip, result)
    }

    /// Fetch and append `zip` without going through the input.
    pub async fn add_zip(
        &mut self,
        client: &WeatherClient,
        zip: ZipCode,
    ) -> Result<FetchOutcome, StoreError> {
        if self.state.is_registered(&zip) {
            tracing::debug!("{} is already registered", zip);
            return Ok(FetchOutcome::Skipped);
        }
        let result = client.fetch(&zip).await;
        self.complete_fetch(zip, result)
    }

    /// Remove a location. Absent codes are a no-op and are not saved.
    pub fn remove(&mut self, zip: &ZipCode) -> Result<bool, StoreError> {
        if self.state.remove(zip) == 0 {
            return Ok(false);
        }
        tracing::info!("Removed location {}", zip);
        self.save()?;
        Ok(true)
    }

    /// Drop every location and return their codes, in display order, for
    /// re-fetching. If the emptied list cannot be saved the locations are
    /// put back, so memory and store keep agreeing.
    pub fn begin_refresh(&mut self) -> Result<Vec<ZipCode>, StoreError> {
        let previous = self.state.clone();
        let zips = self.state.zip_codes();
        for zip in &zips {
            self.state.remove(zip);
        }
        if !zips.is_empty() {
            if let Err(e) = self.save() {
                self.state = previous;
                return Err(e);
            }
        }
        Ok(zips)
    }

    /// Re-fetch every location one after another. A location whose fetch
    /// fails is gone afterwards. A failed save does not stop the loop: every
    /// code is still re-fetched and the first save error is returned at the
    /// end. Returns how many were re-added.
    pub async fn refresh(&mut self, client: &WeatherClient) -> Result<usize, StoreError> {
        let zips = self.begin_refresh()?;
        tracing::info!("Refreshing {} location(s)", zips.len());

        let mut refreshed = 0;
        let mut first_error = None;
        for zip in zips {
            let result = client.fetch(&zip).await;
            match self.complete_fetch(zip, result) {
                Ok(FetchOutcome::Added) => refreshed += 1,
                Ok(_) => {}
                Err(e) => {
                    // Added in memory, only the save failed.
                    refreshed += 1;
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(refreshed),
        }
    }

    /// Run the action behind a clicked node.
    pub async fn dispatch(
        &mut self,
        action: Action,
        client: &WeatherClient,
    ) -> Result<(), StoreError> {
        match action {
            Action::Add => {
                self.add(client).await?;
            }
            Action::Remove(zip) => {
                self.remove(&zip)?;
            }
            Action::Refresh => {
                self.refresh(client).await?;
            }
        }
        Ok(())
    }

    pub fn view<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> PanelView
    where
        Tz::Offset: std::fmt::Display,
    {
        view::project(&self.state, &self.input, &self.validation, &self.settings, now)
    }

    fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.state.to_document()).inspect_err(|e| {
            tracing::warn!("Saving locations failed: {}", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use zipwx_weather::MemoryBlobStore;

    fn payload(name: &str, temp: f64) -> WeatherPayload {
        serde_json::from_value(serde_json::json!({
            "weather": [{ "icon": "01d" }],
            "main": {
                "temp": temp, "feels_like": temp, "temp_min": temp,
                "temp_max": temp, "pressure": 1015, "humidity": 60
            },
            "wind": { "speed": 2.0 },
            "name": name
        }))
        .unwrap()
    }

    fn panel() -> (WeatherPanel<MemoryBlobStore>, MemoryBlobStore) {
        let blobs = MemoryBlobStore::new();
        let panel = WeatherPanel::open(PersistedStore::new(blobs.clone()), PanelSettings::default());
        (panel, blobs)
    }

    fn zip(s: &str) -> ZipCode {
        ZipCode::parse(s).unwrap()
    }

    fn stored_zips(blobs: &MemoryBlobStore) -> Vec<String> {
        PersistedStore::new(blobs.clone())
            .load()
            .locations
            .iter()
            .map(|l| l.zip_code.to_string())
            .collect()
    }

    #[test]
    fn request_add_is_gated_by_validation() {
        let (mut panel, _) = panel();
        panel.on_input("1011");
        assert_eq!(panel.request_add(), None);

        panel.on_input("10115");
        assert_eq!(panel.request_add(), Some(zip("10115")));
    }

    #[test]
    fn request_add_skips_registered_codes() {
        let (mut panel, _) = panel();
        panel
            .complete_fetch(zip("10115"), Ok(payload("Berlin", 5.0)))
            .unwrap();
        panel.on_input("10115");
        assert_eq!(panel.request_add(), None);
    }

    #[test]
    fn completed_fetch_is_saved() {
        let (mut panel, blobs) = panel();
        let outcome = panel
            .complete_fetch(zip("10115"), Ok(payload("Berlin", 5.0)))
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Added);
        assert!(panel.state().is_registered(&zip("10115")));
        assert!(panel.state().get(&zip("10115")).unwrap().fetched_at.is_some());
        assert_eq!(stored_zips(&blobs), vec!["10115"]);
    }

    #[test]
    fn failed_fetch_changes_nothing() {
        let (mut panel, blobs) = panel();
        let outcome = panel
            .complete_fetch(
                zip("10115"),
                Err(WeatherError::Status {
                    status: 404,
                    message: "city not found".into(),
                }),
            )
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(panel.state().is_empty());
        assert!(PersistedStore::new(blobs).try_load().unwrap().is_none());
    }

    #[test]
    fn double_submit_keeps_one_entry() {
        let (mut panel, _) = panel();
        panel.on_input("10115");
        let first = panel.request_add().unwrap();
        let second = panel.request_add().unwrap();

        assert_eq!(
            panel.complete_fetch(first, Ok(payload("Berlin", 5.0))).unwrap(),
            FetchOutcome::Added
        );
        assert_eq!(
            panel.complete_fetch(second, Ok(payload("Berlin", 6.0))).unwrap(),
            FetchOutcome::AlreadyRegistered
        );
        assert_eq!(panel.state().len(), 1);
        assert_eq!(panel.state().get(&zip("10115")).unwrap().weather.main.temp, 5.0);
    }

    #[test]
    fn remove_saves_and_tolerates_absent() {
        let (mut panel, blobs) = panel();
        panel.complete_fetch(zip("10115"), Ok(payload("Berlin", 5.0))).unwrap();
        panel.complete_fetch(zip("80331"), Ok(payload("München", 7.0))).unwrap();

        assert!(panel.remove(&zip("10115")).unwrap());
        assert!(!panel.remove(&zip("10115")).unwrap());
        assert_eq!(stored_zips(&blobs), vec!["80331"]);
    }

    #[test]
    fn begin_refresh_empties_state_in_order() {
        let (mut panel, blobs) = panel();
        panel.complete_fetch(zip("80331"), Ok(payload("München", 7.0))).unwrap();
        panel.complete_fetch(zip("10115"), Ok(payload("Berlin", 5.0))).unwrap();

        let zips = panel.begin_refresh().unwrap();
        assert_eq!(zips, vec![zip("80331"), zip("10115")]);
        assert!(panel.state().is_empty());
        assert!(stored_zips(&blobs).is_empty());
    }

    /// Memory store whose `fail_on`-th `set` (1-based) fails.
    #[derive(Clone)]
    struct FlakyBlobStore {
        inner: MemoryBlobStore,
        sets: Arc<AtomicUsize>,
        fail_on: usize,
    }

    impl BlobStore for FlakyBlobStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.sets.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn begin_refresh_restores_state_when_save_fails() {
        let blobs = FlakyBlobStore {
            inner: MemoryBlobStore::new(),
            sets: Arc::new(AtomicUsize::new(0)),
            fail_on: 3,
        };
        let mut panel = WeatherPanel::open(PersistedStore::new(blobs.clone()), PanelSettings::default());
        panel.complete_fetch(zip("80331"), Ok(payload("München", 7.0))).unwrap();
        panel.complete_fetch(zip("10115"), Ok(payload("Berlin", 5.0))).unwrap();

        assert!(panel.begin_refresh().is_err());
        assert_eq!(panel.state().zip_codes(), vec![zip("80331"), zip("10115")]);
        assert_eq!(stored_zips(&blobs.inner), vec!["80331", "10115"]);
    }

    #[test]
    fn reopening_restores_locations() {
        let (mut panel, blobs) = panel();
        panel.complete_fetch(zip("20095"), Ok(payload("Hamburg", 9.0))).unwrap();
        drop(panel);

        let reopened = WeatherPanel::open(PersistedStore::new(blobs), PanelSettings::default());
        assert!(reopened.state().is_registered(&zip("20095")));
    }
}
