//! UI texts. German is the default, matching the API's `lang` parameter.

use chrono::{DateTime, Locale, TimeZone};
use zipwx_core::Language;
use zipwx_weather::InputMessage;

/// The eight readings shown on every card, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Current,
    Min,
    Max,
    FeelsLike,
    Wind,
    Pressure,
    Humidity,
    Visibility,
}

impl FieldKind {
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Current,
        FieldKind::Min,
        FieldKind::Max,
        FieldKind::FeelsLike,
        FieldKind::Wind,
        FieldKind::Pressure,
        FieldKind::Humidity,
        FieldKind::Visibility,
    ];

    /// Stable class name of the field node
    pub fn key(&self) -> &'static str {
        match self {
            Self::Current => "temp",
            Self::Min => "temp_min",
            Self::Max => "temp_max",
            Self::FeelsLike => "feels_like",
            Self::Wind => "wind",
            Self::Pressure => "pressure",
            Self::Humidity => "humidity",
            Self::Visibility => "visibility",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::De, Self::Current) => "Aktuell",
            (Language::De, Self::Min) => "Minimal",
            (Language::De, Self::Max) => "Maximal",
            (Language::De, Self::FeelsLike) => "Gefühlt",
            (Language::De, Self::Wind) => "Windgeschwindigkeit",
            (Language::De, Self::Pressure) => "Luftdruck",
            (Language::De, Self::Humidity) => "Luftfeuchtigkeit",
            (Language::De, Self::Visibility) => "Sicht",
            (Language::En, Self::Current) => "Current",
            (Language::En, Self::Min) => "Minimum",
            (Language::En, Self::Max) => "Maximum",
            (Language::En, Self::FeelsLike) => "Feels like",
            (Language::En, Self::Wind) => "Wind speed",
            (Language::En, Self::Pressure) => "Pressure",
            (Language::En, Self::Humidity) => "Humidity",
            (Language::En, Self::Visibility) => "Visibility",
        }
    }
}

pub fn input_message(language: Language, message: InputMessage) -> &'static str {
    match (language, message) {
        (Language::De, InputMessage::TooFew) => "Zu wenige Zeichen",
        (Language::De, InputMessage::TooMany) => "Zu viele Zeichen",
        (Language::De, InputMessage::DigitsOnly) => "Bitte nur Zahlen eingeben",
        (Language::En, InputMessage::TooFew) => "Too few characters",
        (Language::En, InputMessage::TooMany) => "Too many characters",
        (Language::En, InputMessage::DigitsOnly) => "Please enter digits only",
    }
}

pub fn empty_message(language: Language) -> &'static str {
    match language {
        Language::De => "Du hast noch keine Locations angelegt",
        Language::En => "You have not added any locations yet",
    }
}

pub fn remove_label(language: Language) -> &'static str {
    match language {
        Language::De => "Entfernen",
        Language::En => "Remove",
    }
}

pub fn refresh_label(language: Language) -> &'static str {
    match language {
        Language::De => "Aktualisieren",
        Language::En => "Refresh",
    }
}

pub fn add_label(language: Language) -> &'static str {
    match language {
        Language::De => "Hinzufügen",
        Language::En => "Add",
    }
}

pub fn not_available(language: Language) -> &'static str {
    match language {
        Language::De => "k. A.",
        Language::En => "n/a",
    }
}

/// Long local date and time, e.g. "Montag, 19. Oktober 2026, 14:03:05 Uhr".
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>, language: Language) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match language {
        Language::De => at
            .format_localized("%A, %-d. %B %Y, %H:%M:%S Uhr", Locale::de_DE)
            .to_string(),
        Language::En => at.format("%A, %B %-d, %Y, %H:%M:%S").to_string(),
    }
}
