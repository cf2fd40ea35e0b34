use booking_types::day_hours::DayHoursRow;
use booking_types::{TimeOffset, TimeUnit};
use serde::Deserialize;

/// Step used for per-service availability queries when the establishment
/// configures none, or configures one the engine cannot interpret.
const DEFAULT_STEP_MINUTES: u32 = 30;

/// The two booking flows: dining books the whole establishment with a party
/// size, everything else books a specific service with per-service
/// availability.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingCategory {
    #[serde(alias = "RESTAURANT")]
    Dining,
    #[serde(other)]
    Service,
}

impl BookingCategory {
    pub fn is_dining(self) -> bool {
        self == Self::Dining
    }
}

/// Read-only establishment settings consumed by the engine. Owned by the
/// backend; the engine never mutates or persists them.
#[derive(Clone, Debug, Deserialize)]
pub struct EstablishmentConfig {
    pub id: i64,
    pub category: BookingCategory,
    /// Earliest permissible booking, as a delay from now.
    #[serde(default)]
    pub min_advance: TimeOffset,
    /// Latest permissible booking, as a delay from now. Unset means
    /// unbounded.
    #[serde(default)]
    pub max_advance: TimeOffset,
    /// How long before a reservation starts that cancelling or modifying it
    /// closes.
    #[serde(default)]
    pub cancellation: TimeOffset,
    /// Granularity of bookable start times for per-service availability.
    #[serde(default)]
    pub slot_granularity: TimeOffset,
    #[serde(default)]
    pub opening_hours: Vec<DayHoursRow>,
}

impl EstablishmentConfig {
    /// Slot step in minutes for per-service availability queries.
    ///
    /// An unconfigured granularity falls back to 30 minutes; a configured
    /// value with no unit counts as minutes. A month-based or unrecognized
    /// unit also falls back to the default, as a bounded interpretation of
    /// configuration the step cannot express.
    pub fn step_minutes(&self) -> u32 {
        let value = self.slot_granularity.value.unwrap_or(DEFAULT_STEP_MINUTES);

        let unit = match self.slot_granularity.unit.as_deref() {
            None => TimeUnit::Minute,
            Some(label) => match TimeUnit::from_label(label) {
                Some(unit) => unit,
                None => return DEFAULT_STEP_MINUTES,
            },
        };

        match unit {
            TimeUnit::Minute => value,
            TimeUnit::Hour => value * 60,
            TimeUnit::Day => value * 24 * 60,
            TimeUnit::Month => DEFAULT_STEP_MINUTES,
        }
    }
}
