//! Capability-gated status transitions and the menu actions built on them

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ReservationStatus;
use crate::error::{AppError, ErrorCode};

/// Why a requested transition was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("actor may not change reservations")]
    Forbidden,

    #[error("reservation is already {0}")]
    SameStatus(ReservationStatus),

    #[error("cannot move reservation from {from} to {to}")]
    NotAllowed {
        from: ReservationStatus,
        to: ReservationStatus,
    },
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Forbidden => AppError::new(ErrorCode::PermissionDenied),
            TransitionError::SameStatus(status) => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, err.to_string())
                    .with_detail("status", status.as_str())
            }
            TransitionError::NotAllowed { from, to } => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, err.to_string())
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
        }
    }
}

/// Pure decision: may an actor with `can_change` move `current` to `next`?
pub fn check_transition(
    current: ReservationStatus,
    next: ReservationStatus,
    can_change: bool,
) -> Result<(), TransitionError> {
    if !can_change {
        return Err(TransitionError::Forbidden);
    }
    if current == next {
        return Err(TransitionError::SameStatus(current));
    }
    if !current.can_transition_to(next) {
        return Err(TransitionError::NotAllowed {
            from: current,
            to: next,
        });
    }
    Ok(())
}

/// Items a contextual status menu can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    /// PENDING -> APPROVED
    Confirm,
    /// back to PENDING
    Unconfirm,
    /// APPROVED -> SEATED
    Seat,
    /// SEATED -> APPROVED
    Unseat,
    /// APPROVED -> NO_SHOW
    MarkNoShow,
    /// PENDING -> CANCELED
    Cancel,
    /// Side action on seated guests, not a status change
    RequestReview,
}

impl MenuAction {
    const ORDER: [MenuAction; 7] = [
        Self::Confirm,
        Self::Seat,
        Self::Unseat,
        Self::Unconfirm,
        Self::MarkNoShow,
        Self::Cancel,
        Self::RequestReview,
    ];

    /// Status the action moves to, `None` for side actions
    ///
    /// `Unconfirm` always targets PENDING, which the table allows from both
    /// APPROVED and SEATED.
    pub const fn target_status(&self) -> Option<ReservationStatus> {
        match self {
            Self::Confirm => Some(ReservationStatus::Approved),
            Self::Unconfirm => Some(ReservationStatus::Pending),
            Self::Seat => Some(ReservationStatus::Seated),
            Self::Unseat => Some(ReservationStatus::Approved),
            Self::MarkNoShow => Some(ReservationStatus::NoShow),
            Self::Cancel => Some(ReservationStatus::Canceled),
            Self::RequestReview => None,
        }
    }

    /// Whether the action applies to a reservation in `status`
    pub fn applies_to(&self, status: ReservationStatus) -> bool {
        match (self, self.target_status()) {
            (Self::RequestReview, _) => status.can_request_review(),
            // Confirm and Unseat share a target; keep them apart by origin
            (Self::Confirm, _) => status == ReservationStatus::Pending,
            (Self::Unseat, _) => status == ReservationStatus::Seated,
            (_, Some(target)) => status.can_transition_to(target),
            (_, None) => false,
        }
    }

    /// Every action available for `status`, in menu order
    pub fn available_for(status: ReservationStatus) -> Vec<MenuAction> {
        Self::ORDER
            .into_iter()
            .filter(|a| a.applies_to(status))
            .collect()
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Confirm => "Confirm",
            Self::Unconfirm => "Move to pending",
            Self::Seat => "Seat",
            Self::Unseat => "Unseat",
            Self::MarkNoShow => "No-show",
            Self::Cancel => "Cancel",
            Self::RequestReview => "Request review",
        }
    }
}
