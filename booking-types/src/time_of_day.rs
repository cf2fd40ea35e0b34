use std::fmt::{Debug, Display};
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// A wall-clock slot time within a single day.
///
/// Ordering matches the lexicographic ordering of the zero-padded `HH:mm`
/// rendering, so a sorted slot list also reads chronologically.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Create a new time of day, this may return `None` if input values are
    /// out of range.
    ///
    /// ```
    /// use booking_types::TimeOfDay;
    ///
    /// assert!(TimeOfDay::new(18, 30).is_some());
    /// assert!(TimeOfDay::new(24, 0).is_none()); // hours are out of bound
    /// assert!(TimeOfDay::new(12, 60).is_none()); // minutes are out of bound
    /// ```
    #[inline]
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            None
        } else {
            Some(Self { hour, minute })
        }
    }

    #[inline]
    pub fn hour(self) -> u8 {
        self.hour
    }

    #[inline]
    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Get the total number of minutes from *00:00*.
    #[inline]
    pub fn mins_from_midnight(self) -> u16 {
        u16::from(self.minute) + 60 * u16::from(self.hour)
    }

    /// Add minutes, wrapping past midnight. The backend stores overnight
    /// reservation end times as a plain `HH:mm` on the same record.
    ///
    /// ```
    /// use booking_types::TimeOfDay;
    ///
    /// let start = TimeOfDay::new(23, 30).unwrap();
    /// assert_eq!(start.wrapping_add_minutes(45), TimeOfDay::new(0, 15).unwrap());
    /// ```
    #[inline]
    pub fn wrapping_add_minutes(self, minutes: u32) -> Self {
        let total = (u32::from(self.mins_from_midnight()) + minutes) % (24 * 60);

        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    /// Parse `"HH:mm"` or `"HH:mm:ss"`; seconds are discarded. Components
    /// may be unpadded.
    ///
    /// ```
    /// use booking_types::TimeOfDay;
    ///
    /// assert_eq!("18:30:00".parse::<TimeOfDay>().ok(), TimeOfDay::new(18, 30));
    /// assert_eq!("9:05".parse::<TimeOfDay>().ok(), TimeOfDay::new(9, 5));
    /// assert!("25:00".parse::<TimeOfDay>().is_err());
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidTimeOfDay(raw.to_string());
        let mut components = raw.trim().splitn(3, ':');

        let hour = components
            .next()
            .and_then(|hh| hh.parse().ok())
            .ok_or_else(invalid)?;

        let minute = components
            .next()
            .and_then(|mm| mm.parse().ok())
            .ok_or_else(invalid)?;

        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Debug for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{self}")
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Truncates seconds, matching the `HH:mm` granularity of slot
    /// comparisons.
    #[inline]
    fn from(time: NaiveTime) -> TimeOfDay {
        Self {
            hour: time.hour().try_into().expect("invalid NaiveTime"),
            minute: time.minute().try_into().expect("invalid NaiveTime"),
        }
    }
}

impl From<TimeOfDay> for NaiveTime {
    #[inline]
    fn from(time: TimeOfDay) -> NaiveTime {
        NaiveTime::from_hms_opt(time.hour.into(), time.minute.into(), 0)
            .expect("TimeOfDay out of bounds")
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
