//! Conversion of weather-crate errors into the application error hierarchy.

use zipwx_core::error::ReqwestErrorExt;
use zipwx_core::{AppError, FetchError, StorageError};
use zipwx_weather::{StoreError, WeatherError};

/// Extension trait for turning crate errors into [`AppError`].
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}

impl IntoAppError for WeatherError {
    fn into_app_error(self) -> AppError {
        let err = match self {
            WeatherError::Network(err) => err.into_fetch_error(),
            WeatherError::Status { status, message } => FetchError::from_status(status, message),
            WeatherError::Parse(s) => FetchError::BadPayload(s),
        };
        AppError::Fetch(err)
    }
}

impl IntoAppError for StoreError {
    fn into_app_error(self) -> AppError {
        let err = match self {
            StoreError::Corrupt(s) => StorageError::ReadFailed(s),
            other => StorageError::WriteFailed(other.to_string()),
        };
        AppError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_are_classified() {
        let err = WeatherError::Status {
            status: 401,
            message: "Invalid API key".into(),
        }
        .into_app_error();
        assert!(matches!(err, AppError::Fetch(FetchError::ApiKeyRejected)));

        let err = WeatherError::Status {
            status: 404,
            message: "city not found".into(),
        }
        .into_app_error();
        assert_eq!(err.user_message(), "Postal code not found. Check and try again.");
    }

    #[test]
    fn parse_errors_are_bad_payloads() {
        let err = WeatherError::Parse("missing field `main`".into()).into_app_error();
        assert_eq!(
            err.to_string(),
            "Weather fetch failed: unexpected payload: missing field `main`"
        );
    }

    #[test]
    fn store_errors_map_to_storage() {
        let err = StoreError::Corrupt("eof".into()).into_app_error();
        assert!(matches!(err, AppError::Storage(StorageError::ReadFailed(_))));

        let err = StoreError::Io(std::io::Error::other("disk full")).into_app_error();
        assert_eq!(err.user_message(), "Your locations could not be saved.");
    }
}
