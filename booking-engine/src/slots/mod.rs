//! Resolution of the candidate slot list for one selected date: pick the
//! right raw source for the establishment's category, then filter out past
//! and invalid times.

mod filter;
mod merge;

pub use filter::{finalize_slots, SlotOutcome};
pub use merge::{resolve_base_slots, SlotSources};
