mod session;

use booking_types::{TimeOfDay, TimeOffset};

use crate::config::{BookingCategory, EstablishmentConfig};

#[macro_export]
macro_rules! date {
    ( $date: expr ) => {{
        use chrono::NaiveDate;
        NaiveDate::parse_from_str($date, "%Y-%m-%d").expect("invalid date literal")
    }};
}

#[macro_export]
macro_rules! datetime {
    ( $date: expr ) => {{
        use chrono::NaiveDateTime;
        NaiveDateTime::parse_from_str($date, "%Y-%m-%d %H:%M").expect("invalid datetime literal")
    }};
}

pub(crate) fn slot(raw: &str) -> TimeOfDay {
    raw.parse().expect("invalid slot literal")
}

pub(crate) fn slot_list(raw: &[&str]) -> Vec<TimeOfDay> {
    raw.iter().map(|s| slot(s)).collect()
}

pub(crate) fn config(category: BookingCategory) -> EstablishmentConfig {
    EstablishmentConfig {
        id: 7,
        category,
        min_advance: TimeOffset::default(),
        max_advance: TimeOffset::default(),
        cancellation: TimeOffset::default(),
        slot_granularity: TimeOffset::default(),
        opening_hours: Vec::new(),
    }
}
