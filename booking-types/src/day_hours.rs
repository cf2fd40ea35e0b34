use chrono::Weekday;
use serde::Deserialize;

use crate::time_of_day::TimeOfDay;

/// One raw opening-hours row as served by the backend.
///
/// Deployments disagree on key casing (`heureOuvertureMatin` vs
/// `HeureOuvertureMatin`) and on the time representation (string vs
/// `{hour, minute}` object), so every field is tolerant. The engine's
/// normalizer turns this into a canonical per-day structure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DayHoursRow {
    #[serde(default)]
    pub day: Option<DayLabel>,
    #[serde(default, rename = "heureOuvertureMatin", alias = "HeureOuvertureMatin")]
    pub morning_open: Option<TimeRepr>,
    #[serde(default, rename = "heureFermetureMatin", alias = "HeureFermetureMatin")]
    pub morning_close: Option<TimeRepr>,
    #[serde(default, rename = "heureOuvertureMidi", alias = "HeureOuvertureMidi")]
    pub midday_open: Option<TimeRepr>,
    #[serde(default, rename = "heureFermetureMidi", alias = "HeureFermetureMidi")]
    pub midday_close: Option<TimeRepr>,
}

/// A weekday field that may arrive as a bare string or wrapped in an
/// object with a `name` key.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum DayLabel {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

impl DayLabel {
    /// Resolve the label to a weekday; unknown labels yield `None` and sort
    /// after Sunday in the normalized output.
    pub fn weekday(&self) -> Option<Weekday> {
        let name = match self {
            Self::Name(name) => name,
            Self::Object { name } => name.as_deref()?,
        };

        match name.trim().to_ascii_uppercase().as_str() {
            "MONDAY" => Some(Weekday::Mon),
            "TUESDAY" => Some(Weekday::Tue),
            "WEDNESDAY" => Some(Weekday::Wed),
            "THURSDAY" => Some(Weekday::Thu),
            "FRIDAY" => Some(Weekday::Fri),
            "SATURDAY" => Some(Weekday::Sat),
            "SUNDAY" => Some(Weekday::Sun),
            _ => None,
        }
    }
}

/// A time-of-day field that may arrive as `"HH:mm[:ss]"` or as an
/// `{hour, minute}` object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TimeRepr {
    Text(String),
    Parts {
        #[serde(alias = "H", alias = "h")]
        hour: u8,
        #[serde(alias = "M", alias = "m")]
        minute: u8,
    },
}

impl TimeRepr {
    /// Normalize to a [`TimeOfDay`]; malformed values contribute nothing.
    pub fn to_time(&self) -> Option<TimeOfDay> {
        match self {
            Self::Text(raw) => raw.parse().ok(),
            Self::Parts { hour, minute } => TimeOfDay::new(*hour, *minute),
        }
    }
}
