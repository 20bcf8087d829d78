//! Request/response types for the reservation service
//!
//! The board is a pure consumer of these four operation shapes; the
//! service owning them lives elsewhere.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::reservation::ReservationStatus;

pub use crate::error::ApiResponse;

// =============================================================================
// Mutation endpoint
// =============================================================================

/// Patch body for `PATCH /reservations/{id}`
///
/// Exactly one field is set per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReservationPatch {
    Status { status: ReservationStatus },
    Tables { tables: Vec<i64> },
}

// =============================================================================
// Availability query
// =============================================================================

/// Availability lookup key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    #[serde(with = "hm_time")]
    pub time: NaiveTime,
    pub number_of_guests: i32,
}

mod hm_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Capability check
// =============================================================================

/// Body for the capability endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityQuery {
    pub resource: String,
    pub action: String,
}

impl CapabilityQuery {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// The only capability this subsystem consumes
    pub fn change_reservation() -> Self {
        Self::new("reservation", "change")
    }
}

/// Capability endpoint answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityResponse {
    pub can: bool,
}
