//! Persistence round trips against the file-backed blob store.

use zipwx_weather::{
    FileBlobStore, Location, LocationState, PersistedStore, WeatherPayload, ZipCode, STORAGE_KEY,
};

fn payload(name: &str, temp: f64) -> WeatherPayload {
    serde_json::from_value(serde_json::json!({
        "weather": [{ "description": "Nebel", "icon": "50n" }],
        "main": {
            "temp": temp, "feels_like": temp, "temp_min": temp,
            "temp_max": temp, "pressure": 1008, "humidity": 95
        },
        "wind": { "speed": 1.5 },
        "name": name,
        "dt": 1760870000
    }))
    .unwrap()
}

#[test]
fn test_save_snapshot_then_load_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = PersistedStore::new(FileBlobStore::new(dir.path()));

    let mut state = LocationState::new();
    for (zip, name) in [("20095", "Hamburg"), ("10115", "Berlin"), ("80331", "München")] {
        state.add(Location::new(ZipCode::parse(zip).unwrap(), payload(name, 7.5)));
    }

    store.save(&state.to_document()).unwrap();

    let reopened = PersistedStore::new(FileBlobStore::new(dir.path()));
    let loaded = reopened.load();
    assert_eq!(loaded.locations, state.snapshot());
    assert_eq!(loaded.locations[2].weather.extra["dt"], 1760870000);
}

#[test]
fn test_document_format_is_compatible() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(format!("{}.json", STORAGE_KEY)),
        r#"{"locations":[{"zipCode":"10115","weather":{"name":"Berlin","weather":[{"icon":"01d"}],"main":{"temp":5,"temp_min":4,"temp_max":6,"feels_like":3,"pressure":1020,"humidity":70},"wind":{"speed":2},"visibility":9000}}]}"#,
    )
    .unwrap();

    let store = PersistedStore::new(FileBlobStore::new(dir.path()));
    let state = LocationState::from_document(store.load());

    let berlin = state.get(&ZipCode::parse("10115").unwrap()).unwrap();
    assert_eq!(berlin.weather.name, "Berlin");
    assert_eq!(berlin.weather.visibility, Some(9000.0));
    assert!(berlin.fetched_at.is_none());
}

#[test]
fn test_corrupt_file_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", STORAGE_KEY)), "not json").unwrap();

    let store = PersistedStore::new(FileBlobStore::new(dir.path()));
    assert!(store.load().locations.is_empty());

    store.save(&LocationState::new().to_document()).unwrap();
    assert!(store.try_load().unwrap().is_some());
}
