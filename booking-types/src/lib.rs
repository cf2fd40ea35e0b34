#![doc = include_str!("../README.md")]

pub mod availability;
pub mod day_hours;
pub mod error;
pub mod sorted_vec;
pub mod time_of_day;
pub mod time_offset;

pub use error::{Error, Result};
pub use sorted_vec::UniqueSortedVec;
pub use time_of_day::TimeOfDay;
pub use time_offset::{TimeOffset, TimeUnit};
