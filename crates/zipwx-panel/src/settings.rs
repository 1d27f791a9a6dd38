use zipwx_core::{Config, Language};
use zipwx_weather::{ClientSettings, Units};

/// Presentation settings derived from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelSettings {
    pub language: Language,
    pub units: Units,
}

impl PanelSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            language: config.ui.language,
            units: units_from_config(config.api.units),
        }
    }
}

fn units_from_config(units: zipwx_core::Units) -> Units {
    match units {
        zipwx_core::Units::Metric => Units::Metric,
        zipwx_core::Units::Imperial => Units::Imperial,
        zipwx_core::Units::Standard => Units::Standard,
    }
}

/// Request parameters for [`zipwx_weather::WeatherClient`]. A missing API key
/// is left empty; the API then rejects every fetch and the panel logs it.
pub fn client_settings(config: &Config) -> ClientSettings {
    ClientSettings {
        endpoint: config.api.endpoint.clone(),
        api_key: config.api.effective_api_key().unwrap_or_default(),
        country: config.api.country.clone(),
        units: units_from_config(config.api.units),
    }
}
