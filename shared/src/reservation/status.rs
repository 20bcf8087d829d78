//! Reservation lifecycle states and the transition table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Seated,
    NoShow,
    Canceled,
    Fulfilled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 6] = [
        Self::Pending,
        Self::Approved,
        Self::Seated,
        Self::NoShow,
        Self::Canceled,
        Self::Fulfilled,
    ];

    /// Statuses a user may move a reservation to from `self`
    ///
    /// This is the only transition table; every surface that offers status
    /// changes reads it. Terminal states have no outgoing transitions.
    pub const fn allowed_targets(&self) -> &'static [ReservationStatus] {
        match self {
            Self::Approved => &[Self::Seated, Self::Pending, Self::NoShow],
            Self::Pending => &[Self::Approved, Self::Canceled],
            Self::Seated => &[Self::Approved, Self::Pending],
            Self::NoShow | Self::Canceled | Self::Fulfilled => &[],
        }
    }

    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        self.allowed_targets().contains(&next)
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::NoShow | Self::Canceled | Self::Fulfilled)
    }

    /// Only confirmed, not-yet-seated reservations can be picked up
    pub const fn is_draggable(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Review requests are a side action on seated guests
    pub const fn can_request_review(&self) -> bool {
        matches!(self, Self::Seated)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Seated => "SEATED",
            Self::NoShow => "NO_SHOW",
            Self::Canceled => "CANCELED",
            Self::Fulfilled => "FULFILLED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
