//! Pure projection from panel state to a view description.
//!
//! Nothing here touches a surface; [`crate::ViewRenderer`] turns a
//! [`PanelView`] into nodes.

use chrono::{DateTime, TimeZone};
use zipwx_weather::{icon_url, InputValidation, Location, LocationState, ZipCode};

use crate::i18n::{self, FieldKind};
use crate::panel::Action;
use crate::renderer::ContainerState;
use crate::settings::PanelSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub input: InputView,
    /// Present iff at least one card is shown
    pub refresh: Option<RefreshView>,
    pub container: ContainerView,
}

impl PanelView {
    pub fn container_state(&self) -> ContainerState {
        match &self.container {
            ContainerView::Empty { .. } => ContainerState::Empty,
            ContainerView::Populated { .. } => ContainerState::Populated,
        }
    }

    pub fn cards(&self) -> &[CardView] {
        match &self.container {
            ContainerView::Empty { .. } => &[],
            ContainerView::Populated { cards } => cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub value: String,
    pub alerts: Vec<String>,
    pub submit_enabled: bool,
    pub submit_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshView {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContainerView {
    Empty { message: String },
    Populated { cards: Vec<CardView> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub key: String,
    pub zip: ZipCode,
    pub title: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub fields: Vec<FieldView>,
    pub timestamp: String,
    pub remove_label: String,
    pub remove: Action,
}

impl CardView {
    pub fn field(&self, key: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl FieldView {
    /// Value with its unit, e.g. "5 °C"
    pub fn display(&self) -> String {
        if self.unit.is_empty() {
            self.value.clone()
        } else {
            format!("{} {}", self.value, self.unit)
        }
    }
}

/// Identity of a card on the surface.
pub fn card_key(zip: &ZipCode) -> String {
    format!("item-{}", zip)
}

/// Identity of a card's remove control.
pub fn remove_key(zip: &ZipCode) -> String {
    format!("remove-{}", zip)
}

/// Numbers print the way the API sent them: `5`, `3.6`, never `5.0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

pub fn project<Tz: TimeZone>(
    state: &LocationState,
    input: &str,
    validation: &InputValidation,
    settings: &PanelSettings,
    now: &DateTime<Tz>,
) -> PanelView
where
    Tz::Offset: std::fmt::Display,
{
    let language = settings.language;

    let input = InputView {
        value: input.to_string(),
        alerts: validation
            .messages
            .iter()
            .map(|m| i18n::input_message(language, *m).to_string())
            .collect(),
        submit_enabled: validation.submit_enabled,
        submit_label: i18n::add_label(language).to_string(),
    };

    if state.is_empty() {
        return PanelView {
            input,
            refresh: None,
            container: ContainerView::Empty {
                message: i18n::empty_message(language).to_string(),
            },
        };
    }

    let cards = state
        .snapshot()
        .iter()
        .map(|location| card_view(location, settings, now))
        .collect();

    PanelView {
        input,
        refresh: Some(RefreshView {
            label: i18n::refresh_label(language).to_string(),
        }),
        container: ContainerView::Populated { cards },
    }
}

/// Card for one location. Locations stored without a fetch time show `now`.
pub fn card_view<Tz: TimeZone>(
    location: &Location,
    settings: &PanelSettings,
    now: &DateTime<Tz>,
) -> CardView
where
    Tz::Offset: std::fmt::Display,
{
    let language = settings.language;
    let weather = &location.weather;
    let main = &weather.main;

    let fields = FieldKind::ALL
        .iter()
        .map(|kind| {
            let (value, unit) = match kind {
                FieldKind::Current => (format_number(main.temp), settings.units.temperature_symbol()),
                FieldKind::Min => (format_number(main.temp_min), settings.units.temperature_symbol()),
                FieldKind::Max => (format_number(main.temp_max), settings.units.temperature_symbol()),
                FieldKind::FeelsLike => {
                    (format_number(main.feels_like), settings.units.temperature_symbol())
                }
                FieldKind::Wind => (format_number(weather.wind.speed), settings.units.speed_symbol()),
                FieldKind::Pressure => (format_number(main.pressure), "hPa"),
                FieldKind::Humidity => (format_number(main.humidity), "%"),
                FieldKind::Visibility => match weather.visibility {
                    Some(v) => (format_number(v), "m"),
                    None => (i18n::not_available(language).to_string(), ""),
                },
            };
            FieldView {
                key: kind.key(),
                label: kind.label(language),
                value,
                unit,
            }
        })
        .collect();

    let timestamp = match location.fetched_at {
        Some(at) => i18n::format_timestamp(&at.with_timezone(&now.timezone()), language),
        None => i18n::format_timestamp(now, language),
    };

    CardView {
        key: card_key(&location.zip_code),
        zip: location.zip_code.clone(),
        title: weather.name.clone(),
        description: weather.description().map(str::to_string),
        icon_url: weather.icon().map(icon_url),
        fields,
        timestamp,
        remove_label: i18n::remove_label(language).to_string(),
        remove: Action::Remove(location.zip_code.clone()),
    }
}
