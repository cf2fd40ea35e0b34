use std::str::FromStr;

use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Calendar unit attached to a configured delay.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Month,
}

impl TimeUnit {
    /// Map a configuration label to a unit. Labels come from a backend that
    /// mixes English and French, singular and plural. Anything else is
    /// unrecognized and yields `None`.
    ///
    /// ```
    /// use booking_types::TimeUnit;
    ///
    /// assert_eq!(TimeUnit::from_label("HOUR"), Some(TimeUnit::Hour));
    /// assert_eq!(TimeUnit::from_label("heures"), Some(TimeUnit::Hour));
    /// assert_eq!(TimeUnit::from_label("JOURS"), Some(TimeUnit::Day));
    /// assert_eq!(TimeUnit::from_label("FORTNIGHT"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "MINUTE" | "MINUTES" => Some(Self::Minute),
            "HOUR" | "HOURS" | "HEURE" | "HEURES" => Some(Self::Hour),
            "DAY" | "DAYS" | "JOUR" | "JOURS" => Some(Self::Day),
            "MONTH" | "MONTHS" | "MOIS" => Some(Self::Month),
            _ => None,
        }
    }

    /// Shift `base` forward by `value` of this unit. Months use calendar
    /// arithmetic: the day of month is clamped rather than overflowed, so
    /// Jan 31 + 1 month lands on the last day of February.
    pub fn checked_add(self, base: NaiveDateTime, value: u32) -> Option<NaiveDateTime> {
        match self {
            Self::Minute => base.checked_add_signed(Duration::minutes(i64::from(value))),
            Self::Hour => base.checked_add_signed(Duration::hours(i64::from(value))),
            Self::Day => base.checked_add_signed(Duration::days(i64::from(value))),
            Self::Month => base.checked_add_months(Months::new(value)),
        }
    }

    /// Shift `base` backward by `value` of this unit.
    pub fn checked_sub(self, base: NaiveDateTime, value: u32) -> Option<NaiveDateTime> {
        match self {
            Self::Minute => base.checked_sub_signed(Duration::minutes(i64::from(value))),
            Self::Hour => base.checked_sub_signed(Duration::hours(i64::from(value))),
            Self::Day => base.checked_sub_signed(Duration::days(i64::from(value))),
            Self::Month => base.checked_sub_months(Months::new(value)),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| Error::UnknownUnit(s.to_string()))
    }
}

/// A configured `value + unit` delay from establishment settings.
///
/// The unit is kept as the raw label: whether an unrecognized label reads as
/// "no constraint" or as "deny" is a policy decision that differs between
/// the booking window and the cancellation window, so it is made at the
/// consuming site rather than during deserialization.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TimeOffset {
    #[serde(default)]
    pub value: Option<u32>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl TimeOffset {
    pub fn new(value: u32, unit: impl Into<String>) -> Self {
        Self { value: Some(value), unit: Some(unit.into()) }
    }

    /// No constraint configured: the value is zero or missing, or there is
    /// no unit label at all.
    pub fn is_unset(&self) -> bool {
        !matches!(self.value, Some(v) if v > 0) || self.unit.is_none()
    }

    /// The recognized unit, if the label maps to one.
    pub fn unit(&self) -> Option<TimeUnit> {
        self.unit.as_deref().and_then(TimeUnit::from_label)
    }

    /// Apply the offset forward from `base`. Returns `None` when the offset
    /// is unset or the unit label is unrecognized, which consumers read as
    /// "no constraint".
    ///
    /// ```
    /// use booking_types::TimeOffset;
    /// use chrono::NaiveDateTime;
    ///
    /// let base: NaiveDateTime = "2024-01-31T10:00:00".parse().unwrap();
    /// let offset = TimeOffset::new(1, "MONTH");
    ///
    /// assert_eq!(
    ///     offset.add_to(base),
    ///     Some("2024-02-29T10:00:00".parse().unwrap()),
    /// );
    ///
    /// assert_eq!(TimeOffset::default().add_to(base), None);
    /// ```
    pub fn add_to(&self, base: NaiveDateTime) -> Option<NaiveDateTime> {
        let value = self.value.filter(|v| *v > 0)?;
        self.unit()?.checked_add(base, value)
    }

    /// Apply the offset backward from `base`, with the same absent-offset
    /// semantics as [`TimeOffset::add_to`].
    pub fn sub_from(&self, base: NaiveDateTime) -> Option<NaiveDateTime> {
        let value = self.value.filter(|v| *v > 0)?;
        self.unit()?.checked_sub(base, value)
    }
}
