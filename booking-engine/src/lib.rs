#![doc = include_str!("../../README.md")]

pub mod config;
pub mod error;
pub mod hours;
pub mod policy;
pub mod provider;
pub mod reservation;
pub mod session;
pub mod slots;

#[cfg(test)]
mod tests;

// Public re-exports
pub use crate::config::{BookingCategory, EstablishmentConfig};
pub use crate::error::{CancelError, ConfirmError, PendingBooking};
pub use crate::policy::{can_modify, compute_window, BookingWindow};
pub use crate::provider::{AvailabilityProvider, Fetch, IdentityProvider, ReservationStore};
pub use crate::reservation::{Reservation, ReservationRequest, ReservationStatus};
pub use crate::session::{BookingSession, ReservationDraft, ServiceSelection};
pub use crate::slots::{finalize_slots, resolve_base_slots, SlotOutcome};
pub use booking_types::{TimeOfDay, TimeOffset, TimeUnit};
