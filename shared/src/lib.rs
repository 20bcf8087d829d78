//! Shared types for the reservation board
//!
//! Data model, reservation lifecycle, service DTOs and the unified error
//! system used by `board-client` and `floor-board`.

pub mod client;
pub mod error;
pub mod models;
pub mod reservation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{DiningTable, Floor, Occasion, Reservation, TableShape};
pub use reservation::{MenuAction, ReservationStatus};
