//! Normalization of raw opening-hours rows into canonical per-day ranges.
//!
//! Rows describe up to two open intervals per day (a split lunch/dinner
//! schedule). The backend is inconsistent about which boundaries it fills
//! in, so composition tolerates half-filled pairs.

use booking_types::day_hours::DayHoursRow;
use booking_types::TimeOfDay;
use chrono::Weekday;

/// A day's canonical opening hours.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NormHours {
    /// `None` when the day label was missing or unknown.
    pub day: Option<Weekday>,
    pub morning_open: Option<TimeOfDay>,
    pub morning_close: Option<TimeOfDay>,
    pub midday_open: Option<TimeOfDay>,
    pub midday_close: Option<TimeOfDay>,
}

impl NormHours {
    fn from_row(row: &DayHoursRow) -> Self {
        Self {
            day: row.day.as_ref().and_then(|label| label.weekday()),
            morning_open: row.morning_open.as_ref().and_then(|t| t.to_time()),
            morning_close: row.morning_close.as_ref().and_then(|t| t.to_time()),
            midday_open: row.midday_open.as_ref().and_then(|t| t.to_time()),
            midday_close: row.midday_close.as_ref().and_then(|t| t.to_time()),
        }
    }

    /// Render the day's ranges for display, or `None` when no usable pair
    /// exists (callers show "closed").
    ///
    /// A row holding only a morning open and a midday close is one
    /// uninterrupted block. A boundary with no matching counterpart
    /// contributes nothing to its sub-range.
    pub fn compose_ranges(&self) -> Option<String> {
        let (mo, mc) = (self.morning_open, self.morning_close);
        let (eo, ec) = (self.midday_open, self.midday_close);

        if let (Some(open), None, None, Some(close)) = (mo, mc, eo, ec) {
            return Some(format!("{open}–{close}"));
        }

        let mut parts = Vec::new();

        if let (Some(open), Some(close)) = (mo, mc) {
            parts.push(format!("{open}–{close}"));
        }

        if let (Some(open), Some(close)) = (eo, ec) {
            parts.push(format!("{open}–{close}"));
        }

        if parts.is_empty() {
            let start = mo.or(eo)?;
            let end = ec.or(mc)?;
            return Some(format!("{start}–{end}"));
        }

        Some(parts.join(", "))
    }
}

/// Normalize raw rows and order them Monday→Sunday; rows with unknown or
/// missing day labels sort last.
pub fn normalize(rows: &[DayHoursRow]) -> Vec<NormHours> {
    let mut normalized: Vec<_> = rows.iter().map(NormHours::from_row).collect();

    normalized.sort_by_key(|row| {
        row.day
            .map(|day| day.num_days_from_monday())
            .unwrap_or(u32::MAX)
    });

    normalized
}
