use booking_types::TimeOfDay;
use chrono::NaiveDate;
use thiserror::Error;

/// A persistence-call failure reported by the reservation store. The only
/// transport condition that propagates to the calling screen.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("reservation store call failed: {0}")]
pub struct StoreError(pub String);

/// Draft snapshot preserved when confirmation hits the authentication
/// gate, so the booking can be replayed after login.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingBooking {
    pub establishment_id: i64,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub service_id: Option<i64>,
    pub party_size: Option<u8>,
}

/// Why a confirm attempt did not produce a reservation.
///
/// The validation variants mirror the UI submit gate: they are reachable
/// through the API but a screen driving [`can_submit`] never sees them.
///
/// [`can_submit`]: crate::session::BookingSession::can_submit
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfirmError {
    /// The user must sign in first; carries the draft for replay.
    #[error("authentication required before confirming")]
    AuthRequired(PendingBooking),
    #[error("no time slot selected")]
    NoTimeSelected,
    #[error("no service selected")]
    NoServiceSelected,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a cancel attempt was refused.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CancelError {
    /// The cancellation cutoff has passed, or the cancellation rule could
    /// not be interpreted (which denies by design).
    #[error("the cancellation window has closed")]
    WindowClosed,
    #[error(transparent)]
    Store(#[from] StoreError),
}
