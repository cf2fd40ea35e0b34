//! Time-windowed business rules: how far ahead a booking may be placed,
//! and until when an existing reservation may still be cancelled or
//! modified.

use booking_types::TimeOffset;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::reservation::Reservation;

/// The range of calendar dates open for booking, derived from the
/// establishment's min/max advance rules. Recomputed whenever the
/// configuration or "now" changes, never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BookingWindow {
    pub min_date: NaiveDate,
    /// `None` means unbounded.
    pub max_date: Option<NaiveDate>,
}

impl BookingWindow {
    /// Whether a calendar day is selectable.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min_date && self.max_date.map_or(true, |max| date <= max)
    }

    /// Whether the month containing `date` holds at least one selectable
    /// day. Drives the calendar's previous/next month navigation: an arrow
    /// is disabled when the whole adjacent month is out of window.
    pub fn month_has_selectable_day(&self, date: NaiveDate) -> bool {
        let Some(first) = date.with_day(1) else {
            return false;
        };

        let Some(next_first) = first.checked_add_months(Months::new(1)) else {
            return first >= self.min_date || self.max_date.is_none();
        };

        let last = next_first.pred_opt().unwrap_or(first);
        last >= self.min_date && self.max_date.map_or(true, |max| first <= max)
    }
}

/// Compute the booking window from the configured advance rules.
///
/// The minimum never falls before today, whatever the configuration says;
/// an unset or unrecognized minimum rule also resolves to today. The
/// maximum is absent when no rule is configured, which the calendar reads
/// as unbounded. This permissive default is deliberate and asymmetric with
/// [`can_modify`].
pub fn compute_window(
    now: NaiveDateTime,
    min_advance: &TimeOffset,
    max_advance: &TimeOffset,
) -> BookingWindow {
    let today = now.date();

    let min_date = min_advance
        .add_to(now)
        .map(|earliest| earliest.date().max(today))
        .unwrap_or(today);

    BookingWindow {
        min_date,
        max_date: max_advance.add_to(now).map(|latest| latest.date()),
    }
}

/// Whether cancelling or modifying `reservation` is still permitted.
///
/// No configured rule means always permitted. A configured rule with an
/// unrecognized unit denies: ambiguous cancellation configuration is
/// treated as a hard restriction, not ignored. A reservation whose date or
/// start time is missing is likewise denied. Otherwise the cutoff is the
/// reservation start minus the configured delay, and modification is
/// permitted strictly before it.
pub fn can_modify(reservation: &Reservation, offset: &TimeOffset, now: NaiveDateTime) -> bool {
    if offset.is_unset() {
        return true;
    }

    let Some(unit) = offset.unit() else {
        return false;
    };

    let Some(start) = reservation.start_instant() else {
        return false;
    };

    let Some(cutoff) = unit.checked_sub(start, offset.value.unwrap_or(0)) else {
        return false;
    };

    now < cutoff
}
