//! The UCI-facing search coordinator: time budgeting and the background
//! search-thread lifecycle, sitting between the protocol layer and the
//! [`crate::board::search`] internals.

pub mod controller;
pub mod time;

pub use controller::SearchJob;
pub use time::{compute_budget, TimeControl};
