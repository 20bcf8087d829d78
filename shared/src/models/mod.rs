//! Data models
//!
//! Read from the reservation service and shared by the client and the board.
//! All IDs are `i64`.

pub mod dining_table;
pub mod floor;
pub mod reservation;

// Re-exports
pub use dining_table::*;
pub use floor::*;
pub use reservation::*;
