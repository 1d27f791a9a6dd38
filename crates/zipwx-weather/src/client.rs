//! Current-weather API client (OpenWeatherMap `/weather` endpoint).

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use crate::types::{Units, WeatherError, WeatherPayload};
use crate::zipcode::ZipCode;

pub const DEFAULT_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5";
const ICON_BASE: &str = "http://openweathermap.org/img/wn";

/// URL of the 2x icon image for a condition icon code.
pub fn icon_url(icon: &str) -> String {
    format!("{}/{}@2x.png", ICON_BASE, icon)
}

/// Request parameters shared by every fetch
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub api_key: String,
    pub country: String,
    pub units: Units,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            country: "de".to_string(),
            units: Units::Metric,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Issues one GET per call. No retry, de-duplication or timeout.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Arc<Client>,
    settings: Arc<ClientSettings>,
}

impl WeatherClient {
    pub fn new(settings: ClientSettings) -> Result<Self, WeatherError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client: Arc::new(client),
            settings: Arc::new(settings),
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn weather_url(&self) -> String {
        format!("{}/weather", self.settings.endpoint.trim_end_matches('/'))
    }

    /// Fetch current weather for a postal code.
    #[instrument(skip(self, zip), fields(zip = %zip), level = "debug")]
    pub async fn fetch(&self, zip: &ZipCode) -> Result<WeatherPayload, WeatherError> {
        let settings = &self.settings;
        let zip_param = format!("{},{}", zip, settings.country);

        let response = self
            .client
            .get(self.weather_url())
            .query(&[
                ("zip", zip_param.as_str()),
                ("units", settings.units.as_query()),
                ("lang", settings.country.as_str()),
                ("appid", settings.api_key.as_str()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<WeatherPayload, WeatherError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            tracing::debug!("Weather API returned {}: {}", status, message);
            return Err(WeatherError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let payload: WeatherPayload =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        tracing::debug!("Loaded weather for {}", payload.name);
        Ok(payload)
    }
}
