use booking_types::TimeOfDay;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Server-driven reservation lifecycle states. The engine only creates
/// `Pending` reservations and gates the client-cancel transition; every
/// other transition belongs to the provider side.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Refused,
    ClientCancelled,
}

/// A stored reservation as echoed by the backend. Fields the engine reads
/// are tolerant of absence: older records miss some of them.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    #[serde(alias = "etablissementId")]
    pub establishment_id: i64,
    pub client_id: i64,
    #[serde(default, alias = "prestationId")]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub party_size: Option<u8>,
    #[serde(default, alias = "dateReservation")]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "heureDebut")]
    pub start: Option<TimeOfDay>,
    #[serde(default, alias = "heureFin")]
    pub end: Option<TimeOfDay>,
    #[serde(default, alias = "prestationDuration")]
    pub duration_minutes: Option<u32>,
    #[serde(alias = "statut")]
    pub status: ReservationStatus,
}

impl Reservation {
    /// The instant the reservation starts, when both date and time are
    /// present.
    pub fn start_instant(&self) -> Option<NaiveDateTime> {
        Some(self.date?.and_time(self.start?.into()))
    }

    /// Whether the reservation lies wholly in the past. Prefers the stored
    /// end time, then start plus service duration, then the start itself.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        let Some(start) = self.start_instant() else {
            return false;
        };

        if let (Some(date), Some(end)) = (self.date, self.end) {
            return date.and_time(end.into()) < now;
        }

        if let Some(duration) = self.duration_minutes.filter(|d| *d > 0) {
            return start + Duration::minutes(i64::from(duration)) < now;
        }

        start < now
    }
}

/// Values handed to the persistence provider for a create or update call.
/// Computed entirely by the engine; transport lives elsewhere.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub client_id: i64,
    #[serde(rename = "prestationId", skip_serializing_if = "Option::is_none")]
    pub service_id: Option<i64>,
    #[serde(rename = "dateReservation")]
    pub date: NaiveDate,
    #[serde(rename = "heureDebut")]
    pub start: TimeOfDay,
    #[serde(rename = "heureFin", skip_serializing_if = "Option::is_none")]
    pub end: Option<TimeOfDay>,
    #[serde(rename = "statut")]
    pub status: ReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u8>,
}

impl ReservationRequest {
    /// End time from the start and a service duration, wrapping past
    /// midnight like the backend expects for overnight slots.
    pub fn end_from_duration(start: TimeOfDay, duration_minutes: Option<u32>) -> Option<TimeOfDay> {
        let duration = duration_minutes.filter(|d| *d > 0)?;
        Some(start.wrapping_add_minutes(duration))
    }
}
