//! Contracts for the external collaborators the engine consumes: identity,
//! availability lookups, and reservation persistence. Transport lives
//! behind these traits; the engine only computes the values that cross
//! them.

use async_trait::async_trait;
use booking_types::availability::{EstablishmentDay, ServiceDay};
use chrono::NaiveDate;

use crate::error::StoreError;
use crate::reservation::ReservationRequest;

/// Outcome of an availability fetch.
///
/// Transport failures are absorbed here instead of being thrown: the UI
/// renders both `Empty` and `TransportError` as "no availability" without
/// a retry state, while tests can still tell genuinely-empty from failed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Fetch<T> {
    Data(T),
    #[default]
    Empty,
    TransportError,
}

impl<T> Fetch<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Empty | Self::TransportError => None,
        }
    }
}

/// Responses that echo the calendar date they were computed for.
pub trait DatedResponse {
    fn date(&self) -> NaiveDate;
}

impl DatedResponse for EstablishmentDay {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl DatedResponse for ServiceDay {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl<T: DatedResponse> Fetch<T> {
    /// Enforce the date-echo invariant: a response computed for another
    /// date is stale or misrouted (for example, a superseded request
    /// completing after the user changed the selection) and must read as
    /// empty, never as data.
    pub fn check_date_echo(self, requested: NaiveDate) -> Fetch<T> {
        match self {
            Self::Data(data) if data.date() != requested => {
                #[cfg(feature = "log")]
                log::warn!(
                    requested:% = requested, echoed:% = data.date();
                    "discarding availability response for mismatched date"
                );

                let _ = data;
                Fetch::Empty
            }
            other => other,
        }
    }
}

/// Who is using the app. Token storage and profile caching are the
/// implementation's concern; the engine only reads.
#[async_trait]
pub trait IdentityProvider {
    async fn client_id(&self) -> Option<i64>;
    async fn is_authenticated(&self) -> bool;
}

/// Day-availability lookups, one endpoint per booking flow.
#[async_trait]
pub trait AvailabilityProvider {
    /// Whole-establishment availability for one day (dining flow).
    async fn establishment_day(
        &self,
        establishment_id: i64,
        date: NaiveDate,
    ) -> Fetch<EstablishmentDay>;

    /// Per-service availability for one day (non-dining flow), at the
    /// requested slot granularity.
    async fn service_day(
        &self,
        establishment_id: i64,
        service_id: i64,
        date: NaiveDate,
        step_minutes: u32,
    ) -> Fetch<ServiceDay>;
}

/// Reservation persistence. Create returns the new reservation id; update
/// and cancel report success through `Result`.
#[async_trait]
pub trait ReservationStore {
    async fn create(&self, request: &ReservationRequest) -> Result<i64, StoreError>;
    async fn update(&self, id: i64, request: &ReservationRequest) -> Result<(), StoreError>;
    async fn cancel(&self, id: i64, client_id: i64) -> Result<(), StoreError>;
}
