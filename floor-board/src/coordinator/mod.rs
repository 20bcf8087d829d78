//! Assignment coordinator
//!
//! Sole path by which the board mutates reservations. Every mutation:
//!
//! 1. is dropped silently if another one for the same reservation is pending
//! 2. is validated locally (capability, transition table, capacity policy)
//!    before anything goes on the wire
//! 3. issues exactly one request (review requests retry on failure)
//! 4. on success marks the reservation as reconciling and calls `on_update`
//!    once so the owner refetches
//! 5. on failure raises a notification and leaves board state untouched
//!
//! The coordinator never edits a reservation locally; the owner's refetch
//! is the only source of the new state.

mod sync_state;
pub mod worker;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use board_client::{ClientResult, ReservationApi};
use serde::{Deserialize, Serialize};
use shared::client::ReservationPatch;
use shared::error::AppError;
use shared::models::Reservation;
use shared::reservation::{ReservationStatus, TransitionError, check_transition};

pub use sync_state::SyncPhase;
pub use worker::{AssignmentQueue, assignment_channel, spawn_assignment_worker};

use crate::capability::{CHANGE, CapabilityGate, RESERVATION};
use crate::drag::TableMove;
use crate::error::{BoardError, BoardResult};
use crate::notification::{Notification, Notifier};
use sync_state::{InFlightGuard, SyncTable};

/// Upper bound for the review retry backoff
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// What to do when a party is larger than the target table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Log a warning and submit anyway; the service decides
    #[default]
    Advisory,
    /// Reject before any request is made
    Enforce,
}

impl FromStr for CapacityPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advisory" => Ok(Self::Advisory),
            "enforce" => Ok(Self::Enforce),
            other => Err(AppError::config(format!(
                "Unknown capacity policy '{other}', expected 'advisory' or 'enforce'"
            ))),
        }
    }
}

impl fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Advisory => "advisory",
            Self::Enforce => "enforce",
        })
    }
}

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Retries after the first failed review request
    pub review_max_retries: u32,
    /// Delay before the first retry, doubled after each one
    pub review_retry_delay: Duration,
    pub capacity_policy: CapacityPolicy,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            review_max_retries: 3,
            review_retry_delay: Duration::from_millis(1000),
            capacity_policy: CapacityPolicy::Advisory,
        }
    }
}

/// Result of a mutation that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOutcome {
    /// Request accepted by the service, `on_update` was called
    Applied,
    /// Another mutation for the reservation was pending; nothing happened
    Ignored,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

pub struct AssignmentCoordinator {
    api: Arc<dyn ReservationApi>,
    capabilities: Arc<dyn CapabilityGate>,
    notifier: Arc<dyn Notifier>,
    config: CoordinatorConfig,
    sync: SyncTable,
}

impl AssignmentCoordinator {
    pub fn new(
        api: Arc<dyn ReservationApi>,
        capabilities: Arc<dyn CapabilityGate>,
        notifier: Arc<dyn Notifier>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            api,
            capabilities,
            notifier,
            config,
            sync: SyncTable::default(),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &Arc<dyn CapabilityGate> {
        &self.capabilities
    }

    pub fn sync_phase(&self, reservation_id: i64) -> SyncPhase {
        self.sync.phase(reservation_id)
    }

    /// A request for `reservation_id` is on the wire
    pub fn is_loading(&self, reservation_id: i64) -> bool {
        self.sync_phase(reservation_id) == SyncPhase::Pending
    }

    /// Owner finished refetching after a successful mutation
    pub fn settle(&self, reservation_id: i64) {
        self.sync.settle(reservation_id);
    }

    /// Move `reservation` to `next`
    pub async fn change_status<U>(
        &self,
        reservation: &Reservation,
        next: ReservationStatus,
        on_update: U,
    ) -> BoardResult<MutationOutcome>
    where
        U: FnOnce() + Send,
    {
        let Some(guard) = self.begin(reservation.id, "change_status") else {
            return Ok(MutationOutcome::Ignored);
        };

        let can_change = self.capabilities.can_change_reservation();
        if let Err(e) = check_transition(reservation.status, next, can_change) {
            let err = match e {
                TransitionError::Forbidden => forbidden(),
                other => other.into(),
            };
            return Err(self.reject(reservation.id, err));
        }

        tracing::info!(
            reservation_id = reservation.id,
            from = %reservation.status,
            to = %next,
            "Changing reservation status"
        );
        let patch = ReservationPatch::Status { status: next };
        let result = self.api.update_reservation(reservation.id, &patch).await;
        self.complete(reservation.id, guard, result, on_update)
    }

    /// Apply a drop: replace the origin table with the target table
    ///
    /// Only moves of approved reservations are sent.
    pub async fn reassign_table<U>(
        &self,
        request: &TableMove,
        on_update: U,
    ) -> BoardResult<MutationOutcome>
    where
        U: FnOnce() + Send,
    {
        let id = request.reservation_id;
        let Some(guard) = self.begin(id, "reassign_table") else {
            return Ok(MutationOutcome::Ignored);
        };

        if !self.capabilities.can_change_reservation() {
            return Err(self.reject(id, forbidden()));
        }
        if !request.status.is_draggable() {
            return Err(self.reject(id, BoardError::NotMovable(request.status)));
        }

        if request.exceeds_capacity() {
            let capacity = request.combined_capacity();
            match self.config.capacity_policy {
                CapacityPolicy::Advisory => tracing::warn!(
                    reservation_id = id,
                    table = %request.to_table_name,
                    capacity,
                    guests = request.number_of_guests,
                    "Party exceeds table capacity, submitting anyway"
                ),
                CapacityPolicy::Enforce => {
                    let err = BoardError::CapacityExceeded {
                        table: request.to_table_name.clone(),
                        capacity,
                        guests: request.number_of_guests,
                    };
                    return Err(self.reject(id, err));
                }
            }
        }

        let tables = request.next_tables();
        tracing::info!(
            reservation_id = id,
            from_table_id = ?request.from_table_id,
            to_table_id = request.to_table_id,
            tables = ?tables,
            "Reassigning reservation"
        );
        let patch = ReservationPatch::Tables { tables };
        let result = self.api.update_reservation(id, &patch).await;
        self.complete(id, guard, result, on_update)
    }

    /// Ask the service to send the review request email
    ///
    /// Only seated reservations qualify. Failed attempts are retried with a
    /// doubling delay before the error is surfaced. Success raises an info
    /// notification.
    pub async fn request_review<U>(
        &self,
        reservation: &Reservation,
        on_update: U,
    ) -> BoardResult<MutationOutcome>
    where
        U: FnOnce() + Send,
    {
        let Some(guard) = self.begin(reservation.id, "request_review") else {
            return Ok(MutationOutcome::Ignored);
        };

        if !self.capabilities.can_change_reservation() {
            return Err(self.reject(reservation.id, forbidden()));
        }
        if !reservation.status.can_request_review() {
            let err = BoardError::ReviewUnavailable(reservation.status);
            return Err(self.reject(reservation.id, err));
        }

        tracing::info!(reservation_id = reservation.id, "Requesting review");
        let result = self.request_review_with_retry(reservation.id).await;
        let outcome = self.complete(reservation.id, guard, result, on_update)?;
        // the email leaves no trace on the board, so confirm it
        self.notifier.notify(Notification::info(format!(
            "Review request sent to {}",
            reservation.full_name
        )));
        Ok(outcome)
    }

    async fn request_review_with_retry(&self, reservation_id: i64) -> ClientResult<()> {
        let max_retries = self.config.review_max_retries;
        let mut delay = self.config.review_retry_delay;
        let mut attempt = 0;

        loop {
            match self.api.request_review(reservation_id).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        reservation_id,
                        attempt,
                        max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Review request failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn begin(&self, reservation_id: i64, operation: &'static str) -> Option<InFlightGuard> {
        let guard = self.sync.try_begin(reservation_id);
        if guard.is_none() {
            tracing::debug!(
                reservation_id,
                operation,
                "Mutation already pending, ignoring"
            );
        }
        guard
    }

    /// Local validation failed; nothing was sent
    ///
    /// Capability denials are expected to be prevented by the UI and are not
    /// notified.
    fn reject(&self, reservation_id: i64, err: BoardError) -> BoardError {
        tracing::warn!(reservation_id, "Mutation rejected: {err}");
        if !matches!(err, BoardError::Forbidden(_)) {
            self.notifier
                .notify(Notification::from_error(&err.to_app_error()));
        }
        err
    }

    fn complete<U>(
        &self,
        reservation_id: i64,
        guard: InFlightGuard,
        result: ClientResult<()>,
        on_update: U,
    ) -> BoardResult<MutationOutcome>
    where
        U: FnOnce(),
    {
        match result {
            Ok(()) => {
                guard.succeed();
                on_update();
                Ok(MutationOutcome::Applied)
            }
            Err(e) => {
                drop(guard);
                let app_err = e.to_app_error();
                tracing::error!(
                    reservation_id,
                    code = %app_err.code,
                    "Mutation failed: {}",
                    app_err.message
                );
                self.notifier.notify(Notification::from_error(&app_err));
                Err(BoardError::Api(e))
            }
        }
    }
}

fn forbidden() -> BoardError {
    BoardError::Forbidden(format!("{RESERVATION}:{CHANGE}"))
}
