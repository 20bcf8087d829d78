//! Board errors

use board_client::ClientError;
use shared::error::{AppError, ErrorCode};
use shared::reservation::{ReservationStatus, TransitionError};
use thiserror::Error;

/// Errors raised by the coordinator and the board facade
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    #[error("Review cannot be requested for a {0} reservation")]
    ReviewUnavailable(ReservationStatus),

    #[error("A {0} reservation cannot be moved")]
    NotMovable(ReservationStatus),

    /// `capacity` sums every table held after the move
    #[error("Moving to {table} leaves {capacity} seats for {guests} guests")]
    CapacityExceeded {
        table: String,
        capacity: i32,
        guests: i32,
    },

    #[error(transparent)]
    Api(#[from] ClientError),
}

impl BoardError {
    pub fn to_app_error(&self) -> AppError {
        match self {
            Self::Forbidden(msg) => AppError::permission_denied(msg.clone()),
            Self::InvalidTransition(e) => (*e).into(),
            Self::ReviewUnavailable(status) => {
                AppError::with_message(ErrorCode::ReviewUnavailable, self.to_string())
                    .with_detail("status", status.as_str())
            }
            Self::NotMovable(status) => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, self.to_string())
                    .with_detail("status", status.as_str())
            }
            Self::CapacityExceeded {
                table,
                capacity,
                guests,
            } => AppError::with_message(ErrorCode::TableCapacityExceeded, self.to_string())
                .with_detail("table", table.clone())
                .with_detail("capacity", *capacity)
                .with_detail("number_of_guests", *guests),
            Self::Api(e) => e.to_app_error(),
        }
    }
}

impl From<BoardError> for AppError {
    fn from(err: BoardError) -> Self {
        err.to_app_error()
    }
}

pub type BoardResult<T> = Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_details() {
        let err: AppError = BoardError::CapacityExceeded {
            table: "T3".to_string(),
            capacity: 2,
            guests: 6,
        }
        .into();
        assert_eq!(err.code, ErrorCode::TableCapacityExceeded);
        assert_eq!(err.message, "Moving to T3 leaves 2 seats for 6 guests");
        let details = err.details.unwrap();
        assert_eq!(details.get("capacity").unwrap(), 2);
        assert_eq!(details.get("number_of_guests").unwrap(), 6);
    }

    #[test]
    fn test_not_movable_maps_to_transition_code() {
        let err = BoardError::NotMovable(ReservationStatus::Canceled).to_app_error();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        assert_eq!(err.message, "A CANCELED reservation cannot be moved");
    }

    #[test]
    fn test_api_error_passes_through() {
        let inner = AppError::validation("bad");
        let err: AppError = BoardError::Api(ClientError::Api(inner.clone())).into();
        assert_eq!(err, inner);
    }
}
