use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::sorted_vec::UniqueSortedVec;
use crate::time_of_day::TimeOfDay;

/// Whole-establishment day availability, as returned by the dining flow's
/// availability endpoint.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentDay {
    #[serde(alias = "etablissementId")]
    pub establishment_id: i64,
    pub date: NaiveDate,
    pub open: bool,
    #[serde(default, deserialize_with = "lenient_slots")]
    pub slots: Vec<TimeOfDay>,
    /// Closure code such as `NON_WORKING_DAY` or `CLOSED`.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Per-service day availability: start times where at least one eligible
/// collaborator is free for the whole service duration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDay {
    #[serde(alias = "prestationId")]
    pub service_id: i64,
    #[serde(alias = "etablissementId")]
    pub establishment_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub step_minutes: Option<u32>,
    #[serde(default, deserialize_with = "lenient_slots")]
    pub slots: Vec<TimeOfDay>,
}

/// The legacy static slot map shipped with older establishment payloads,
/// keyed by calendar date. Kept as a fallback for non-dining bookings when
/// the per-service endpoint has nothing.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct LegacySlots(pub HashMap<NaiveDate, Vec<LegacySlotEntry>>);

#[derive(Clone, Debug, Deserialize)]
pub struct LegacySlotEntry {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub reserved_by: Option<String>,
}

impl LegacySlots {
    /// Valid, deduplicated, sorted times for one date. Entries that do not
    /// parse as `HH:mm` are skipped.
    pub fn for_date(&self, date: NaiveDate) -> Vec<TimeOfDay> {
        let times: Vec<TimeOfDay> = self
            .0
            .get(&date)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.time.as_deref()?.parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        UniqueSortedVec::from(times).into()
    }
}

/// Deserialize a slot list, skipping entries that do not parse as a time of
/// day instead of failing the whole response.
fn lenient_slots<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TimeOfDay>, D::Error> {
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    let mut slots = Vec::with_capacity(raw.len());

    for item in &raw {
        match item.parse() {
            Ok(slot) => slots.push(slot),
            Err(_err) => {
                #[cfg(feature = "log")]
                log::warn!(slot = item.as_str(); "skipping malformed slot in availability response");
            }
        }
    }

    Ok(slots)
}

#[cfg(test)]
mod test {
    use super::{EstablishmentDay, LegacySlots, ServiceDay};
    use crate::time_of_day::TimeOfDay;

    fn slot(raw: &str) -> TimeOfDay {
        raw.parse().unwrap()
    }

    #[test]
    fn establishment_day_truncates_seconds() {
        let day: EstablishmentDay = serde_json::from_str(
            r#"{
                "etablissementId": 7,
                "date": "2024-01-10",
                "open": true,
                "slots": ["19:00:00", "19:30:00"],
                "reason": null
            }"#,
        )
        .unwrap();

        assert_eq!(day.slots, vec![slot("19:00"), slot("19:30")]);
    }

    #[test]
    fn malformed_slots_are_skipped_not_fatal() {
        let day: ServiceDay = serde_json::from_str(
            r#"{
                "prestationId": 3,
                "etablissementId": 7,
                "date": "2024-01-10",
                "stepMinutes": 30,
                "slots": ["10:00", "oops", "11:00"]
            }"#,
        )
        .unwrap();

        assert_eq!(day.slots, vec![slot("10:00"), slot("11:00")]);
        assert_eq!(day.step_minutes, Some(30));
    }

    #[test]
    fn legacy_map_is_sorted_and_deduplicated() {
        let legacy: LegacySlots = serde_json::from_str(
            r#"{
                "2024-01-10": [
                    { "time": "14:00", "reserved_by": null },
                    { "time": "10:00:00", "reserved_by": "someone" },
                    { "time": "14:00", "reserved_by": null },
                    { "time": "not-a-time", "reserved_by": null }
                ]
            }"#,
        )
        .unwrap();

        let date = "2024-01-10".parse().unwrap();
        assert_eq!(legacy.for_date(date), vec![slot("10:00"), slot("14:00")]);
        assert!(legacy.for_date("2024-01-11".parse().unwrap()).is_empty());
    }
}
