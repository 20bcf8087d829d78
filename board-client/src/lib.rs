//! Board Client - HTTP client for the reservation service
//!
//! Provides the mutation, availability, capability and review-request
//! calls the reservation board depends on.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::ReservationApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared DTOs for convenience
pub use shared::client::{AvailabilityQuery, CapabilityQuery, ReservationPatch};
