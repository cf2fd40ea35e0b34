use booking_types::{TimeOfDay, UniqueSortedVec};
use chrono::{NaiveDate, NaiveDateTime};

use crate::config::BookingCategory;

/// Resolved candidate slots for the selected date.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SlotOutcome {
    /// Final list, deduplicated and ascending.
    pub slots: UniqueSortedVec<TimeOfDay>,
    /// The base schedule runs past 00:00. Display hint only: the stored
    /// calendar date never changes because of it.
    pub crosses_midnight: bool,
}

impl SlotOutcome {
    /// Gates whether the time-selection action is enabled.
    pub fn has_any(&self) -> bool {
        !self.slots.is_empty()
    }
}

/// Turn a base slot list into the final candidates for `selected_date`.
///
/// When the selected date is today, past times are removed. The base list
/// is scanned in its original order for a point where time regresses
/// between neighbors: slots after that point belong to the after-midnight
/// continuation of the schedule and are always kept. The scan assumes a
/// single regression point, which holds for a service running from dinner
/// into early morning.
///
/// For a non-dining establishment, `legacy_time` (the time stored on an
/// older reservation being edited) is appended when missing so the stored
/// value stays selectable; dining slots are authoritative and never
/// augmented.
pub fn finalize_slots(
    category: BookingCategory,
    base: &[TimeOfDay],
    selected_date: NaiveDate,
    legacy_time: Option<TimeOfDay>,
    now: NaiveDateTime,
) -> SlotOutcome {
    let crosses_midnight = match (base.first(), base.last()) {
        (Some(first), Some(last)) => last < first,
        _ => false,
    };

    let mut list = base.to_vec();

    if !category.is_dining() {
        if let Some(initial) = legacy_time {
            if !list.contains(&initial) {
                list.push(initial);
            }
        }
    }

    if selected_date == now.date() {
        let now_time = TimeOfDay::from(now.time());
        let wrap_index = list.windows(2).position(|pair| pair[0] > pair[1]);

        list = list
            .into_iter()
            .enumerate()
            .filter(|(index, slot)| match wrap_index {
                Some(wrap) if *index > wrap => true,
                _ => *slot >= now_time,
            })
            .map(|(_, slot)| slot)
            .collect();
    }

    SlotOutcome { slots: list.into(), crosses_midnight }
}
