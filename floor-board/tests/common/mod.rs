//! In-memory reservation service for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use board_client::{ClientError, ClientResult, ReservationApi};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use floor_board::{
    AssignmentCoordinator, CapabilityGate, CapacityPolicy, CoordinatorConfig, NotificationLog,
    PermissionSet, ReservationBoard,
};
use parking_lot::Mutex;
use shared::client::{AvailabilityQuery, CapabilityQuery, ReservationPatch};
use shared::error::AppError;
use shared::models::{DiningTable, Reservation, TableShape};
use shared::reservation::ReservationStatus;
use tokio::sync::Notify;

#[derive(Default)]
pub struct MockApi {
    pub updates: Mutex<Vec<(i64, ReservationPatch)>>,
    pub availability_queries: Mutex<Vec<AvailabilityQuery>>,
    pub review_calls: AtomicUsize,
    pub available: Mutex<Vec<DiningTable>>,
    pub update_error: Mutex<Option<AppError>>,
    /// Review calls that fail before one succeeds
    pub review_failures: AtomicUsize,
    pub can_change: AtomicBool,
    /// When set, updates wait for a permit before answering
    pub gate: Option<Arc<Notify>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().len()
    }

    pub fn fail_updates_with(&self, err: AppError) {
        *self.update_error.lock() = Some(err);
    }
}

#[async_trait]
impl ReservationApi for MockApi {
    async fn update_reservation(
        &self,
        reservation_id: i64,
        patch: &ReservationPatch,
    ) -> ClientResult<()> {
        self.updates.lock().push((reservation_id, patch.clone()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.update_error.lock().clone() {
            Some(err) => Err(ClientError::Api(err)),
            None => Ok(()),
        }
    }

    async fn available_tables(&self, query: &AvailabilityQuery) -> ClientResult<Vec<DiningTable>> {
        self.availability_queries.lock().push(*query);
        Ok(self.available.lock().clone())
    }

    async fn check_capability(&self, query: &CapabilityQuery) -> ClientResult<bool> {
        Ok(query.resource == "reservation"
            && query.action == "change"
            && self.can_change.load(Ordering::SeqCst))
    }

    async fn request_review(&self, _reservation_id: i64) -> ClientResult<()> {
        self.review_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.review_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.review_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(ClientError::Api(AppError::network("mail relay unavailable")));
        }
        Ok(())
    }
}

pub struct Harness {
    pub api: Arc<MockApi>,
    pub notifications: Arc<NotificationLog>,
    pub coordinator: Arc<AssignmentCoordinator>,
    pub board: Arc<ReservationBoard>,
}

pub fn config(capacity_policy: CapacityPolicy) -> CoordinatorConfig {
    CoordinatorConfig {
        review_max_retries: 3,
        review_retry_delay: Duration::ZERO,
        capacity_policy,
    }
}

pub fn harness(api: MockApi, permissions: &[&str], config: CoordinatorConfig) -> Harness {
    let gate: Arc<dyn CapabilityGate> = Arc::new(PermissionSet::new(permissions.iter().copied()));
    harness_with_gate(api, gate, config)
}

pub fn harness_with_gate(
    api: MockApi,
    gate: Arc<dyn CapabilityGate>,
    config: CoordinatorConfig,
) -> Harness {
    let api = Arc::new(api);
    let notifications = Arc::new(NotificationLog::new());
    let coordinator = Arc::new(AssignmentCoordinator::new(
        api.clone(),
        gate,
        notifications.clone(),
        config,
    ));
    let board = Arc::new(ReservationBoard::new(coordinator.clone()));
    Harness {
        api,
        notifications,
        coordinator,
        board,
    }
}

pub fn reservation(id: i64, status: ReservationStatus, guests: i32) -> Reservation {
    Reservation {
        id,
        full_name: format!("Guest {id}"),
        email: Some(format!("guest{id}@example.com")),
        phone: None,
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        status,
        number_of_guests: guests,
        occasion: None,
        event: None,
        tables: Vec::new(),
        is_paid: None,
        amount: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 28, 9, 0, 0).unwrap(),
    }
}

pub fn table(id: i64, capacity: i32) -> DiningTable {
    DiningTable {
        id,
        name: format!("T{id}"),
        floor_id: 1,
        shape: TableShape::Rectangle,
        x: id as f64 * 100.0,
        y: 0.0,
        width: 80.0,
        height: 80.0,
        capacity,
    }
}

/// Yield until `cond` holds; panics after a bounded number of turns
pub async fn yield_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
