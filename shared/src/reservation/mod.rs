//! Reservation lifecycle
//!
//! `status` holds the states and the single transition table;
//! `transition` layers the capability gate and menu actions on top.

pub mod status;
pub mod transition;

pub use status::ReservationStatus;
pub use transition::{MenuAction, TransitionError, check_transition};
