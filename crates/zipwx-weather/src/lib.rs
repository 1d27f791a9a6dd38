//! Weather domain for zipwx
//!
//! Postal-code validation, the current-weather API client, the in-memory
//! location list and its persisted JSON document.

pub mod client;
pub mod state;
pub mod store;
pub mod types;
pub mod zipcode;

pub use client::{icon_url, ClientSettings, WeatherClient};
pub use state::LocationState;
pub use store::{BlobStore, FileBlobStore, MemoryBlobStore, PersistedStore, StoreError, STORAGE_KEY};
pub use types::*;
pub use zipcode::{validate_input, InputMessage, InputValidation, ZipCode, ZipCodeError, ZIP_LEN};
