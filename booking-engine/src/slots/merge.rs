use booking_types::availability::{EstablishmentDay, LegacySlots, ServiceDay};
use booking_types::TimeOfDay;
use chrono::NaiveDate;

use crate::config::BookingCategory;
use crate::provider::Fetch;

/// Raw slot sources at hand for one selected date.
///
/// Dining reads only the whole-establishment day; non-dining prefers the
/// per-service response and falls back to the legacy static map. The
/// sources are never merged with each other.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlotSources<'a> {
    pub establishment_day: Option<&'a EstablishmentDay>,
    pub service_day: Option<&'a ServiceDay>,
    pub legacy: Option<&'a LegacySlots>,
}

impl<'a> SlotSources<'a> {
    pub fn from_fetches(
        establishment_day: &'a Fetch<EstablishmentDay>,
        service_day: &'a Fetch<ServiceDay>,
        legacy: Option<&'a LegacySlots>,
    ) -> Self {
        Self {
            establishment_day: establishment_day.data(),
            service_day: service_day.data(),
            legacy,
        }
    }
}

/// Pick the base slot list for `date` from the right source.
///
/// Source order is preserved: a restaurant's slots arrive in service order
/// and may run past midnight, and the downstream filter relies on that
/// order to find the wrap point. Only the legacy map, which has no service
/// order, is pre-sorted.
///
/// A source whose echoed date does not match the selected date is ignored,
/// whatever it contains.
pub fn resolve_base_slots(
    category: BookingCategory,
    date: NaiveDate,
    sources: SlotSources<'_>,
) -> Vec<TimeOfDay> {
    match category {
        BookingCategory::Dining => sources
            .establishment_day
            .filter(|day| day.date == date && day.open)
            .map(|day| day.slots.clone())
            .unwrap_or_default(),

        BookingCategory::Service => {
            let from_service = sources
                .service_day
                .filter(|day| day.date == date && !day.slots.is_empty());

            if let Some(day) = from_service {
                return day.slots.clone();
            }

            sources
                .legacy
                .map(|legacy| legacy.for_date(date))
                .unwrap_or_default()
        }
    }
}
