use std::sync::Mutex;

use async_trait::async_trait;
use booking_types::availability::{EstablishmentDay, LegacySlots, ServiceDay};
use chrono::NaiveDate;

use super::{config, slot, slot_list};
use crate::config::BookingCategory;
use crate::error::{CancelError, ConfirmError, StoreError};
use crate::provider::{AvailabilityProvider, Fetch, IdentityProvider, ReservationStore};
use crate::reservation::{Reservation, ReservationRequest, ReservationStatus};
use crate::session::{BookingSession, ServiceSelection};
use crate::{date, datetime};

#[derive(Default)]
struct FakeAvailability {
    establishment: Option<EstablishmentDay>,
    service: Option<ServiceDay>,
    fail: bool,
}

#[async_trait]
impl AvailabilityProvider for FakeAvailability {
    async fn establishment_day(&self, _id: i64, _date: NaiveDate) -> Fetch<EstablishmentDay> {
        if self.fail {
            return Fetch::TransportError;
        }

        match &self.establishment {
            Some(day) => Fetch::Data(day.clone()),
            None => Fetch::Empty,
        }
    }

    async fn service_day(
        &self,
        _id: i64,
        _service_id: i64,
        _date: NaiveDate,
        _step_minutes: u32,
    ) -> Fetch<ServiceDay> {
        if self.fail {
            return Fetch::TransportError;
        }

        match &self.service {
            Some(day) => Fetch::Data(day.clone()),
            None => Fetch::Empty,
        }
    }
}

struct FakeIdentity {
    client_id: Option<i64>,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn client_id(&self) -> Option<i64> {
        self.client_id
    }

    async fn is_authenticated(&self) -> bool {
        self.client_id.is_some()
    }
}

#[derive(Default)]
struct FakeStore {
    created: Mutex<Vec<ReservationRequest>>,
    updated: Mutex<Vec<(i64, ReservationRequest)>>,
    cancelled: Mutex<Vec<(i64, i64)>>,
    fail: bool,
}

#[async_trait]
impl ReservationStore for FakeStore {
    async fn create(&self, request: &ReservationRequest) -> Result<i64, StoreError> {
        if self.fail {
            return Err(StoreError("boom".into()));
        }

        self.created.lock().unwrap().push(request.clone());
        Ok(101)
    }

    async fn update(&self, id: i64, request: &ReservationRequest) -> Result<(), StoreError> {
        self.updated.lock().unwrap().push((id, request.clone()));
        Ok(())
    }

    async fn cancel(&self, id: i64, client_id: i64) -> Result<(), StoreError> {
        self.cancelled.lock().unwrap().push((id, client_id));
        Ok(())
    }
}

fn open_day(date_raw: &str, slots: &[&str]) -> EstablishmentDay {
    EstablishmentDay {
        establishment_id: 7,
        date: date!(date_raw),
        open: true,
        slots: slot_list(slots),
        reason: None,
    }
}

fn service_day(date_raw: &str, slots: &[&str]) -> ServiceDay {
    ServiceDay {
        service_id: 3,
        establishment_id: 7,
        date: date!(date_raw),
        duration_minutes: Some(90),
        step_minutes: Some(30),
        slots: slot_list(slots),
    }
}

fn stored_reservation() -> Reservation {
    Reservation {
        id: 42,
        establishment_id: 7,
        client_id: 9,
        service_id: None,
        party_size: Some(4),
        date: Some(date!("2024-01-20")),
        start: Some(slot("19:30")),
        end: None,
        duration_minutes: None,
        status: ReservationStatus::Confirmed,
    }
}

#[tokio::test]
async fn dining_refresh_resolves_open_day_slots() {
    let provider = FakeAvailability {
        establishment: Some(open_day("2024-01-12", &["19:00", "19:30"])),
        ..Default::default()
    };

    let mut session = BookingSession::new(
        config(BookingCategory::Dining),
        date!("2024-01-12"),
        LegacySlots::default(),
    );

    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;

    assert!(session.config().category.is_dining());
    assert!(session.slots().has_any());
    assert_eq!(
        Vec::from(session.slots().slots.clone()),
        slot_list(&["19:00", "19:30"]),
    );
}

#[tokio::test]
async fn transport_failure_reads_as_no_availability() {
    let provider = FakeAvailability { fail: true, ..Default::default() };

    let mut session = BookingSession::new(
        config(BookingCategory::Dining),
        date!("2024-01-12"),
        LegacySlots::default(),
    );

    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    assert!(!session.slots().has_any());
}

#[tokio::test]
async fn stale_date_echo_reads_as_closed() {
    // Provider answers for the 12th while the 13th is selected.
    let provider = FakeAvailability {
        establishment: Some(open_day("2024-01-12", &["19:00"])),
        ..Default::default()
    };

    let mut session = BookingSession::new(
        config(BookingCategory::Dining),
        date!("2024-01-13"),
        LegacySlots::default(),
    );

    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    assert!(!session.slots().has_any());
}

#[tokio::test]
async fn service_flow_needs_a_selected_service() {
    let provider = FakeAvailability {
        service: Some(service_day("2024-01-12", &["10:00"])),
        ..Default::default()
    };

    let mut session = BookingSession::new(
        config(BookingCategory::Service),
        date!("2024-01-12"),
        LegacySlots::default(),
    );

    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    assert!(!session.slots().has_any());

    session.select_service(Some(ServiceSelection { id: 3, duration_minutes: Some(90) }));
    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    assert!(session.slots().has_any());
}

#[tokio::test]
async fn changing_date_clears_time_and_slots() {
    let provider = FakeAvailability {
        establishment: Some(open_day("2024-01-12", &["19:00", "19:30"])),
        ..Default::default()
    };

    let mut session = BookingSession::new(
        config(BookingCategory::Dining),
        date!("2024-01-12"),
        LegacySlots::default(),
    );

    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    assert!(session.select_time(slot("19:00")));

    session.select_date(date!("2024-01-13"));
    assert_eq!(session.draft().time, None);
    assert!(!session.slots().has_any());
}

#[tokio::test]
async fn time_outside_slot_list_is_refused() {
    let provider = FakeAvailability {
        establishment: Some(open_day("2024-01-12", &["19:00"])),
        ..Default::default()
    };

    let mut session = BookingSession::new(
        config(BookingCategory::Dining),
        date!("2024-01-12"),
        LegacySlots::default(),
    );

    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    assert!(!session.select_time(slot("03:00")));
    assert!(!session.can_submit());
}

#[tokio::test]
async fn unauthenticated_confirm_preserves_the_draft() {
    let provider = FakeAvailability {
        establishment: Some(open_day("2024-01-12", &["19:00"])),
        ..Default::default()
    };
    let store = FakeStore::default();

    let mut session = BookingSession::new(
        config(BookingCategory::Dining),
        date!("2024-01-12"),
        LegacySlots::default(),
    );
    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    session.set_party_size(3);
    assert!(session.select_time(slot("19:00")));

    let identity = FakeIdentity { client_id: None };
    let err = session.confirm(&identity, &store).await.unwrap_err();

    match err {
        ConfirmError::AuthRequired(pending) => {
            assert_eq!(pending.establishment_id, 7);
            assert_eq!(pending.date, date!("2024-01-12"));
            assert_eq!(pending.time, slot("19:00"));
            assert_eq!(pending.party_size, Some(3));
        }
        other => panic!("expected AuthRequired, got {other:?}"),
    }

    assert!(store.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn confirm_creates_a_pending_reservation() {
    let provider = FakeAvailability {
        service: Some(service_day("2024-01-12", &["10:00", "11:30"])),
        ..Default::default()
    };
    let store = FakeStore::default();
    let identity = FakeIdentity { client_id: Some(9) };

    let mut session = BookingSession::new(
        config(BookingCategory::Service),
        date!("2024-01-12"),
        LegacySlots::default(),
    );
    session.select_service(Some(ServiceSelection { id: 3, duration_minutes: Some(90) }));
    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    assert!(session.select_time(slot("11:30")));
    assert!(session.can_submit());

    let id = session.confirm(&identity, &store).await.unwrap();
    assert_eq!(id, 101);

    let created = store.created.lock().unwrap();
    let request = &created[0];
    assert_eq!(request.client_id, 9);
    assert_eq!(request.service_id, Some(3));
    assert_eq!(request.start, slot("11:30"));
    assert_eq!(request.end, Some(slot("13:00")));
    assert_eq!(request.status, ReservationStatus::Pending);
    // Party size belongs to the dining flow only.
    assert_eq!(request.party_size, None);
}

#[tokio::test]
async fn confirm_without_time_is_blocked() {
    let store = FakeStore::default();
    let identity = FakeIdentity { client_id: Some(9) };

    let session = BookingSession::new(
        config(BookingCategory::Dining),
        date!("2024-01-12"),
        LegacySlots::default(),
    );

    assert!(!session.can_submit());
    let err = session.confirm(&identity, &store).await.unwrap_err();
    assert_eq!(err, ConfirmError::NoTimeSelected);
}

#[tokio::test]
async fn editing_an_existing_reservation_updates_in_place() {
    let provider = FakeAvailability {
        establishment: Some(open_day("2024-01-20", &["19:00", "19:30", "20:00"])),
        ..Default::default()
    };
    let store = FakeStore::default();
    let identity = FakeIdentity { client_id: Some(9) };

    let mut session = BookingSession::for_existing(
        config(BookingCategory::Dining),
        &stored_reservation(),
        LegacySlots::default(),
    );
    assert_eq!(session.draft().time, Some(slot("19:30")));

    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    assert!(session.select_time(slot("20:00")));

    let id = session.confirm(&identity, &store).await.unwrap();
    assert_eq!(id, 42);

    let updated = store.updated.lock().unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].0, 42);
    assert_eq!(updated[0].1.start, slot("20:00"));
    assert_eq!(updated[0].1.party_size, Some(4));
}

#[tokio::test]
async fn cancel_respects_the_cutoff() {
    let store = FakeStore::default();

    let mut cfg = config(BookingCategory::Dining);
    cfg.cancellation = booking_types::TimeOffset::new(2, "HOUR");

    let session =
        BookingSession::new(cfg, date!("2024-01-20"), LegacySlots::default());
    let reservation = stored_reservation();

    // Reservation at 19:30 on the 20th; cutoff at 17:30.
    let err = session
        .cancel(&reservation, &store, datetime!("2024-01-20 18:00"))
        .await
        .unwrap_err();
    assert_eq!(err, CancelError::WindowClosed);
    assert!(store.cancelled.lock().unwrap().is_empty());

    session
        .cancel(&reservation, &store, datetime!("2024-01-20 12:00"))
        .await
        .unwrap();
    assert_eq!(*store.cancelled.lock().unwrap(), vec![(42, 9)]);
}

#[tokio::test]
async fn persistence_failure_propagates() {
    let provider = FakeAvailability {
        establishment: Some(open_day("2024-01-12", &["19:00"])),
        ..Default::default()
    };
    let store = FakeStore { fail: true, ..Default::default() };
    let identity = FakeIdentity { client_id: Some(9) };

    let mut session = BookingSession::new(
        config(BookingCategory::Dining),
        date!("2024-01-12"),
        LegacySlots::default(),
    );
    session.refresh_slots(&provider, datetime!("2024-01-10 09:00")).await;
    assert!(session.select_time(slot("19:00")));

    let err = session.confirm(&identity, &store).await.unwrap_err();
    assert_eq!(err, ConfirmError::Store(StoreError("boom".into())));
}
