//! The reservation-editing session: one instance per editing screen,
//! owning the in-flight draft and the currently resolved slot list.
//!
//! State is single-writer and event-driven. Slot lists are only ever
//! replaced wholesale, and changing the date, the service or the
//! establishment context clears them before any refetch, so stale slots
//! are never shown under a new selection, even momentarily.

use booking_types::availability::LegacySlots;
use booking_types::TimeOfDay;
use chrono::{NaiveDate, NaiveDateTime};

use crate::config::{BookingCategory, EstablishmentConfig};
use crate::error::{CancelError, ConfirmError, PendingBooking};
use crate::policy::can_modify;
use crate::provider::{AvailabilityProvider, Fetch, IdentityProvider, ReservationStore};
use crate::reservation::{Reservation, ReservationRequest, ReservationStatus};
use crate::slots::{finalize_slots, resolve_base_slots, SlotOutcome, SlotSources};

/// Party size bounds for the dining flow.
const MIN_PARTY: u8 = 1;
const MAX_PARTY: u8 = 20;

/// In-flight, client-held reservation state. Created when the editing
/// screen mounts, destroyed on confirm, cancel or unmount.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReservationDraft {
    pub party_size: Option<u8>,
    pub date: NaiveDate,
    pub time: Option<TimeOfDay>,
    pub service: Option<ServiceSelection>,
}

/// The service picked for a non-dining booking. The duration feeds the
/// computed end time on the persisted reservation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ServiceSelection {
    pub id: i64,
    pub duration_minutes: Option<u32>,
}

/// One editing screen's worth of reservation state.
pub struct BookingSession {
    config: EstablishmentConfig,
    draft: ReservationDraft,
    /// Time stored on the reservation being edited, kept selectable for
    /// non-dining establishments even when the backend no longer offers it.
    initial_time: Option<TimeOfDay>,
    legacy_slots: LegacySlots,
    outcome: SlotOutcome,
    /// Set when editing an existing reservation; confirm becomes an update.
    existing_id: Option<i64>,
}

impl BookingSession {
    /// Start a fresh draft for a new reservation.
    pub fn new(config: EstablishmentConfig, date: NaiveDate, legacy_slots: LegacySlots) -> Self {
        let party_size = config.category.is_dining().then_some(2);

        Self {
            config,
            draft: ReservationDraft { party_size, date, time: None, service: None },
            initial_time: None,
            legacy_slots,
            outcome: SlotOutcome::default(),
            existing_id: None,
        }
    }

    /// Seed the draft from an existing reservation for editing. Confirming
    /// will update it in place.
    pub fn for_existing(
        config: EstablishmentConfig,
        reservation: &Reservation,
        legacy_slots: LegacySlots,
    ) -> Self {
        let mut session = Self::new(config, reservation.date.unwrap_or_default(), legacy_slots);

        if let Some(date) = reservation.date {
            session.draft.date = date;
        }

        if let Some(size) = reservation.party_size {
            session.draft.party_size = Some(size.clamp(MIN_PARTY, MAX_PARTY));
        }

        session.draft.service = reservation.service_id.map(|id| ServiceSelection {
            id,
            duration_minutes: reservation.duration_minutes,
        });

        session.initial_time = reservation.start;
        session.draft.time = reservation.start;
        session.existing_id = Some(reservation.id);
        session
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn config(&self) -> &EstablishmentConfig {
        &self.config
    }

    /// The current candidate slots. Empty until the first refresh, and
    /// cleared again by every selection change.
    pub fn slots(&self) -> &SlotOutcome {
        &self.outcome
    }

    /// Change the selected date. Clears the selected time and the slot
    /// list; the caller refreshes afterwards.
    pub fn select_date(&mut self, date: NaiveDate) {
        if date == self.draft.date {
            return;
        }

        self.draft.date = date;
        self.invalidate_slots();
    }

    /// Change or clear the selected service (non-dining flow). Clears the
    /// selected time and the slot list.
    pub fn select_service(&mut self, service: Option<ServiceSelection>) {
        self.draft.service = service;
        self.invalidate_slots();
    }

    /// Clamp and set the party size (dining flow).
    pub fn set_party_size(&mut self, size: u8) {
        if self.config.category.is_dining() {
            self.draft.party_size = Some(size.clamp(MIN_PARTY, MAX_PARTY));
        }
    }

    /// Pick a time from the current slot list. Times outside the list are
    /// refused so the draft can only hold a slot that was actually offered.
    pub fn select_time(&mut self, time: TimeOfDay) -> bool {
        if self.outcome.slots.contains(&time) {
            self.draft.time = Some(time);
            true
        } else {
            false
        }
    }

    fn invalidate_slots(&mut self) {
        self.draft.time = None;
        self.outcome = SlotOutcome::default();
    }

    /// Fetch availability for the current selection and resolve the slot
    /// list.
    ///
    /// The request parameters are captured before the fetch; a completion
    /// whose originating date no longer matches the draft (the user moved
    /// on while the request was in flight) is discarded and leaves the
    /// cleared list in place. Responses also pass the date-echo check, so
    /// a misrouted payload degrades to "closed, no slots".
    pub async fn refresh_slots<P>(&mut self, provider: &P, now: NaiveDateTime)
    where
        P: AvailabilityProvider + Sync,
    {
        let requested_date = self.draft.date;
        let requested_service = self.draft.service.map(|s| s.id);

        let (establishment_day, service_day) = match self.config.category {
            BookingCategory::Dining => {
                let fetched = provider
                    .establishment_day(self.config.id, requested_date)
                    .await
                    .check_date_echo(requested_date);

                (fetched, Fetch::Empty)
            }
            BookingCategory::Service => {
                let Some(service_id) = requested_service else {
                    // No service selected yet: nothing to fetch, and the
                    // legacy fallback stays hidden until one is picked.
                    self.outcome = SlotOutcome::default();
                    return;
                };

                let fetched = provider
                    .service_day(
                        self.config.id,
                        service_id,
                        requested_date,
                        self.config.step_minutes(),
                    )
                    .await
                    .check_date_echo(requested_date);

                (Fetch::Empty, fetched)
            }
        };

        // Still-relevant check: selection may have moved while awaiting.
        if self.draft.date != requested_date || self.draft.service.map(|s| s.id) != requested_service
        {
            #[cfg(feature = "log")]
            log::debug!(
                requested:% = requested_date;
                "dropping superseded availability result"
            );
            return;
        }

        let base = resolve_base_slots(
            self.config.category,
            requested_date,
            SlotSources::from_fetches(&establishment_day, &service_day, Some(&self.legacy_slots)),
        );

        self.outcome = finalize_slots(
            self.config.category,
            &base,
            requested_date,
            self.initial_time,
            now,
        );
    }

    /// The UI submit gate: a time is selected, and for non-dining a
    /// service as well. Requests that fail this never reach the network.
    pub fn can_submit(&self) -> bool {
        self.draft.time.is_some()
            && (self.config.category.is_dining() || self.draft.service.is_some())
    }

    /// Persist the draft. Hard-stops with [`ConfirmError::AuthRequired`]
    /// when unauthenticated, carrying the draft for replay after login.
    /// Returns the reservation id (existing or newly created).
    pub async fn confirm<I, S>(&self, identity: &I, store: &S) -> Result<i64, ConfirmError>
    where
        I: IdentityProvider + Sync,
        S: ReservationStore + Sync,
    {
        let Some(time) = self.draft.time else {
            return Err(ConfirmError::NoTimeSelected);
        };

        if !self.config.category.is_dining() && self.draft.service.is_none() {
            return Err(ConfirmError::NoServiceSelected);
        }

        let pending = || {
            ConfirmError::AuthRequired(PendingBooking {
                establishment_id: self.config.id,
                date: self.draft.date,
                time,
                service_id: self.draft.service.map(|s| s.id),
                party_size: self.draft.party_size,
            })
        };

        if !identity.is_authenticated().await {
            return Err(pending());
        }

        let client_id = identity.client_id().await.ok_or_else(pending)?;

        let request = ReservationRequest {
            client_id,
            service_id: self.draft.service.map(|s| s.id),
            date: self.draft.date,
            start: time,
            end: ReservationRequest::end_from_duration(
                time,
                self.draft.service.and_then(|s| s.duration_minutes),
            ),
            status: ReservationStatus::Pending,
            party_size: self
                .config
                .category
                .is_dining()
                .then(|| self.draft.party_size)
                .flatten(),
        };

        match self.existing_id {
            Some(id) => {
                store.update(id, &request).await?;
                Ok(id)
            }
            None => Ok(store.create(&request).await?),
        }
    }

    /// Cancel an existing reservation, gated by the establishment's
    /// cancellation rule. The same gate governs the modify action.
    pub async fn cancel<S>(
        &self,
        reservation: &Reservation,
        store: &S,
        now: NaiveDateTime,
    ) -> Result<(), CancelError>
    where
        S: ReservationStore + Sync,
    {
        if !can_modify(reservation, &self.config.cancellation, now) {
            return Err(CancelError::WindowClosed);
        }

        store.cancel(reservation.id, reservation.client_id).await?;
        Ok(())
    }
}
