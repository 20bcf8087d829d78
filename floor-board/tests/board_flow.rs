//! Menu and drag flows through the board facade

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{MockApi, config, harness, reservation, table, yield_until};
use floor_board::{
    BoardError, CapacityPolicy, DragSource, DropTarget, MutationOutcome, SyncPhase,
    assignment_channel,
};
use serde_json::json;
use shared::client::ReservationPatch;
use shared::error::{AppError, ErrorCode};
use shared::reservation::{MenuAction, ReservationStatus, TransitionError};
use tokio::sync::Notify;

const CHANGE: &[&str] = &["reservation:change"];

#[tokio::test]
async fn test_confirm_from_menu() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    let r = reservation(42, ReservationStatus::Pending, 2);
    let refetches = AtomicUsize::new(0);

    assert!(h.board.open_menu(42));
    assert_eq!(
        h.board.menu_actions(&r),
        vec![MenuAction::Confirm, MenuAction::Cancel]
    );

    let outcome = h
        .board
        .choose_menu_action(&r, MenuAction::Confirm, || {
            refetches.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(
        *h.api.updates.lock(),
        vec![(
            42,
            ReservationPatch::Status {
                status: ReservationStatus::Approved
            }
        )]
    );
    assert_eq!(refetches.load(Ordering::SeqCst), 1);
    assert!(!h.board.is_menu_open(42));
    assert!(h.notifications.is_empty());

    assert_eq!(h.coordinator.sync_phase(42), SyncPhase::Reconciling);
    h.coordinator.settle(42);
    assert_eq!(h.coordinator.sync_phase(42), SyncPhase::Settled);
}

#[tokio::test]
async fn test_second_action_while_pending_is_ignored() {
    let gate = Arc::new(Notify::new());
    let h = harness(
        MockApi::gated(gate.clone()),
        CHANGE,
        config(CapacityPolicy::Advisory),
    );
    let r = reservation(5, ReservationStatus::Approved, 2);
    h.board.open_menu(5);

    let board = h.board.clone();
    let first_r = r.clone();
    let first = tokio::spawn(async move {
        board
            .choose_menu_action(&first_r, MenuAction::Seat, || {})
            .await
    });

    yield_until(|| h.coordinator.is_loading(5)).await;

    // menu stays open while the request is on the wire
    h.board.outside_click(5);
    assert!(h.board.is_menu_open(5));

    let second = h
        .board
        .choose_menu_action(&r, MenuAction::MarkNoShow, || {
            panic!("ignored call must not refetch")
        })
        .await
        .unwrap();
    assert_eq!(second, MutationOutcome::Ignored);
    assert_eq!(h.api.update_count(), 1);

    gate.notify_one();
    assert_eq!(first.await.unwrap().unwrap(), MutationOutcome::Applied);
    assert!(!h.coordinator.is_loading(5));
    assert_eq!(h.api.update_count(), 1);
    assert!(h.notifications.is_empty());
}

#[tokio::test]
async fn test_other_reservations_are_not_blocked() {
    let gate = Arc::new(Notify::new());
    let h = harness(
        MockApi::gated(gate.clone()),
        CHANGE,
        config(CapacityPolicy::Advisory),
    );
    let a = reservation(1, ReservationStatus::Pending, 2);
    let b = reservation(2, ReservationStatus::Pending, 2);

    let coordinator = h.coordinator.clone();
    let first = tokio::spawn(async move {
        coordinator
            .change_status(&a, ReservationStatus::Approved, || {})
            .await
    });
    yield_until(|| h.coordinator.is_loading(1)).await;

    let coordinator = h.coordinator.clone();
    let second = tokio::spawn(async move {
        coordinator
            .change_status(&b, ReservationStatus::Canceled, || {})
            .await
    });
    yield_until(|| h.coordinator.is_loading(2)).await;
    assert_eq!(h.api.update_count(), 2);

    gate.notify_one();
    gate.notify_one();
    assert!(first.await.unwrap().unwrap().is_applied());
    assert!(second.await.unwrap().unwrap().is_applied());
}

#[tokio::test]
async fn test_failed_update_notifies_and_keeps_state() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    h.api.fail_updates_with(
        AppError::with_message(ErrorCode::ValidationFailed, "Reservation could not be updated")
            .with_detail("status", json!(["slot is closed", "party too large"])),
    );
    let r = reservation(9, ReservationStatus::Approved, 4);
    h.board.open_menu(9);

    let err = h
        .board
        .choose_menu_action(&r, MenuAction::Seat, || panic!("no refetch on failure"))
        .await
        .unwrap_err();

    assert!(matches!(err, BoardError::Api(_)));
    assert!(h.board.is_menu_open(9));
    assert_eq!(h.coordinator.sync_phase(9), SyncPhase::Settled);

    let notifications = h.notifications.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].to_string(),
        "Reservation could not be updated\n• status: slot is closed\n• status: party too large"
    );

    // the flag was released, a retry goes out
    *h.api.update_error.lock() = None;
    let outcome = h
        .coordinator
        .change_status(&r, ReservationStatus::Seated, || {})
        .await
        .unwrap();
    assert!(outcome.is_applied());
    assert_eq!(h.api.update_count(), 2);
}

#[tokio::test]
async fn test_invalid_transition_rejected_locally() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    let r = reservation(3, ReservationStatus::Pending, 2);

    let err = h
        .coordinator
        .change_status(&r, ReservationStatus::Seated, || {})
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::InvalidTransition(TransitionError::NotAllowed { .. })
    ));

    let err = h
        .coordinator
        .change_status(&r, ReservationStatus::Pending, || {})
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::InvalidTransition(TransitionError::SameStatus(_))
    ));

    let fulfilled = reservation(4, ReservationStatus::Fulfilled, 2);
    assert!(
        h.coordinator
            .change_status(&fulfilled, ReservationStatus::Approved, || {})
            .await
            .is_err()
    );

    assert_eq!(h.api.update_count(), 0);
    assert_eq!(h.notifications.len(), 3);
    assert!(!h.coordinator.is_loading(3));
}

#[tokio::test]
async fn test_menu_action_must_match_status() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    let seated = reservation(3, ReservationStatus::Seated, 2);

    let err = h
        .board
        .choose_menu_action(&seated, MenuAction::Confirm, || {})
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::InvalidTransition(_)));
    assert_eq!(h.api.update_count(), 0);
}

#[tokio::test]
async fn test_without_capability_nothing_happens() {
    let h = harness(MockApi::new(), &[], config(CapacityPolicy::Advisory));
    let r = reservation(11, ReservationStatus::Approved, 2);

    assert!(h.board.menu_actions(&r).is_empty());
    assert!(!h.board.start_drag(DragSource::unassigned(&r)));

    let err = h
        .coordinator
        .change_status(&r, ReservationStatus::Seated, || {})
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::Forbidden(_)));
    assert_eq!(h.api.update_count(), 0);
    assert!(h.notifications.is_empty());
}

#[tokio::test]
async fn test_drop_onto_small_table_is_advisory() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    let origin = table(1, 6);
    let small = table(3, 2);
    let mut r = reservation(7, ReservationStatus::Approved, 6);
    r.tables = vec![origin.clone()];

    let (queue, mut rx) = assignment_channel();
    assert!(h.board.start_drag(DragSource::seated(&r, &origin)));
    assert!(h.board.is_dragging(7));

    let mut target = DropTarget::new(&small);
    assert!(h.board.drop_on_table(&mut target, &queue));
    assert!(!h.board.is_dragging(7));

    let request = rx.recv().await.unwrap();
    assert_eq!(request.reservation_id, 7);
    assert_eq!(request.from_table_id, Some(1));
    assert_eq!(request.to_table_id, 3);
    assert!(request.exceeds_capacity());

    let outcome = h
        .coordinator
        .reassign_table(&request, || {})
        .await
        .unwrap();
    assert!(outcome.is_applied());
    assert_eq!(
        *h.api.updates.lock(),
        vec![(7, ReservationPatch::Tables { tables: vec![3] })]
    );
    assert!(h.notifications.is_empty());
}

#[tokio::test]
async fn test_drop_onto_small_table_enforced() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Enforce));
    let small = table(3, 2);
    let r = reservation(7, ReservationStatus::Approved, 6);

    let (queue, mut rx) = assignment_channel();
    assert!(h.board.start_drag(DragSource::unassigned(&r)));
    assert!(h.board.drop_on_table(&mut DropTarget::new(&small), &queue));
    let request = rx.recv().await.unwrap();
    assert_eq!(request.from_table_id, None);

    let err = h
        .coordinator
        .reassign_table(&request, || {})
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::CapacityExceeded { capacity: 2, guests: 6, .. }));
    assert_eq!(h.api.update_count(), 0);

    let notifications = h.notifications.entries();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Moving to T3 leaves 2 seats for 6 guests");
}

#[tokio::test]
async fn test_drop_back_on_origin_submits_nothing() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    let origin = table(1, 4);
    let mut r = reservation(8, ReservationStatus::Approved, 2);
    r.tables = vec![origin.clone()];

    let (queue, mut rx) = assignment_channel();
    assert!(h.board.start_drag(DragSource::seated(&r, &origin)));
    assert!(!h.board.drop_on_table(&mut DropTarget::new(&origin), &queue));
    drop(queue);
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_menu_and_drag_exclude_each_other() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    let a = reservation(1, ReservationStatus::Approved, 2);
    let b = reservation(2, ReservationStatus::Approved, 2);

    // open menu blocks the drag
    assert!(h.board.open_menu(1));
    assert!(!h.board.start_drag(DragSource::unassigned(&a)));

    // a live drag blocks that reservation's menu
    assert!(h.board.start_drag(DragSource::unassigned(&b)));
    assert!(!h.board.open_menu(2));
    h.board.cancel_drag();
    assert!(!h.board.is_dragging(2));
    assert!(h.board.open_menu(2));
}

#[tokio::test]
async fn test_only_approved_reservations_drag() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    for status in ReservationStatus::ALL {
        let r = reservation(1, status, 2);
        let started = h.board.start_drag(DragSource::unassigned(&r));
        assert_eq!(started, status == ReservationStatus::Approved);
        h.board.cancel_drag();
    }
    assert_eq!(h.api.update_count(), 0);
}

#[tokio::test]
async fn test_enforced_capacity_counts_kept_tables() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Enforce));
    let t1 = table(1, 4);
    let t2 = table(2, 4);
    let small = table(3, 2);
    let mut r = reservation(12, ReservationStatus::Approved, 6);
    r.tables = vec![t1.clone(), t2.clone()];

    let (queue, mut rx) = assignment_channel();
    assert!(h.board.start_drag(DragSource::seated(&r, &t1)));
    assert!(h.board.drop_on_table(&mut DropTarget::new(&small), &queue));
    let request = rx.recv().await.unwrap();
    assert_eq!(request.combined_capacity(), 6);

    let outcome = h
        .coordinator
        .reassign_table(&request, || {})
        .await
        .unwrap();
    assert!(outcome.is_applied());
    assert_eq!(
        *h.api.updates.lock(),
        vec![(12, ReservationPatch::Tables { tables: vec![3, 2] })]
    );
    assert!(h.notifications.is_empty());
}

#[tokio::test]
async fn test_move_of_non_approved_reservation_is_rejected() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    let target = table(4, 4);
    let r = reservation(13, ReservationStatus::Approved, 2);

    let (queue, mut rx) = assignment_channel();
    assert!(h.board.start_drag(DragSource::unassigned(&r)));
    assert!(h.board.drop_on_table(&mut DropTarget::new(&target), &queue));
    let mut request = rx.recv().await.unwrap();
    assert_eq!(request.status, ReservationStatus::Approved);

    // a request that did not come from a live approved drag
    request.status = ReservationStatus::Canceled;
    let err = h
        .coordinator
        .reassign_table(&request, || panic!("nothing was sent"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BoardError::NotMovable(ReservationStatus::Canceled)
    ));
    assert_eq!(h.api.update_count(), 0);
    assert!(!h.coordinator.is_loading(13));
    let notifications = h.notifications.entries();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "A CANCELED reservation cannot be moved");
}

#[tokio::test]
async fn test_menu_action_ignored_while_move_pending() {
    let gate = Arc::new(Notify::new());
    let h = harness(
        MockApi::gated(gate.clone()),
        CHANGE,
        config(CapacityPolicy::Advisory),
    );
    let origin = table(1, 4);
    let target = table(2, 4);
    let mut r = reservation(7, ReservationStatus::Approved, 2);
    r.tables = vec![origin.clone()];

    let (queue, mut rx) = assignment_channel();
    assert!(h.board.start_drag(DragSource::seated(&r, &origin)));
    assert!(h.board.drop_on_table(&mut DropTarget::new(&target), &queue));
    let request = rx.recv().await.unwrap();

    let coordinator = h.coordinator.clone();
    let moving = tokio::spawn(async move { coordinator.reassign_table(&request, || {}).await });
    yield_until(|| h.coordinator.is_loading(7)).await;

    assert!(h.board.open_menu(7));
    let outcome = h
        .board
        .choose_menu_action(&r, MenuAction::Seat, || {
            panic!("ignored call must not refetch")
        })
        .await
        .unwrap();
    assert_eq!(outcome, MutationOutcome::Ignored);
    assert_eq!(h.api.update_count(), 1);
    assert!(h.board.is_menu_open(7));

    gate.notify_one();
    assert!(moving.await.unwrap().unwrap().is_applied());
    assert_eq!(
        *h.api.updates.lock(),
        vec![(7, ReservationPatch::Tables { tables: vec![2] })]
    );
}

#[tokio::test]
async fn test_drop_ignored_while_status_change_pending() {
    let gate = Arc::new(Notify::new());
    let h = harness(
        MockApi::gated(gate.clone()),
        CHANGE,
        config(CapacityPolicy::Advisory),
    );
    let target = table(2, 4);
    let r = reservation(8, ReservationStatus::Approved, 2);

    let coordinator = h.coordinator.clone();
    let pending_r = r.clone();
    let seating = tokio::spawn(async move {
        coordinator
            .change_status(&pending_r, ReservationStatus::Seated, || {})
            .await
    });
    yield_until(|| h.coordinator.is_loading(8)).await;

    let (queue, mut rx) = assignment_channel();
    assert!(h.board.start_drag(DragSource::unassigned(&r)));
    assert!(h.board.drop_on_table(&mut DropTarget::new(&target), &queue));
    let request = rx.recv().await.unwrap();

    let outcome = h
        .coordinator
        .reassign_table(&request, || panic!("ignored call must not refetch"))
        .await
        .unwrap();
    assert_eq!(outcome, MutationOutcome::Ignored);
    assert_eq!(h.api.update_count(), 1);

    gate.notify_one();
    assert!(seating.await.unwrap().unwrap().is_applied());
    assert_eq!(
        *h.api.updates.lock(),
        vec![(
            8,
            ReservationPatch::Status {
                status: ReservationStatus::Seated
            }
        )]
    );
    assert!(h.notifications.is_empty());
}

#[tokio::test]
async fn test_failure_while_reconciling_keeps_reconciling() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    let pending = reservation(14, ReservationStatus::Pending, 2);
    h.coordinator
        .change_status(&pending, ReservationStatus::Approved, || {})
        .await
        .unwrap();
    assert_eq!(h.coordinator.sync_phase(14), SyncPhase::Reconciling);

    // owner has not refetched yet when the next action fails
    h.api.fail_updates_with(AppError::validation("Table is closed"));
    let approved = reservation(14, ReservationStatus::Approved, 2);
    assert!(
        h.coordinator
            .change_status(&approved, ReservationStatus::Seated, || {})
            .await
            .is_err()
    );
    assert_eq!(h.coordinator.sync_phase(14), SyncPhase::Reconciling);

    h.coordinator.settle(14);
    assert_eq!(h.coordinator.sync_phase(14), SyncPhase::Settled);
}

#[tokio::test]
async fn test_closed_menus_are_forgotten() {
    let h = harness(MockApi::new(), CHANGE, config(CapacityPolicy::Advisory));
    let a = reservation(1, ReservationStatus::Pending, 2);
    let b = reservation(2, ReservationStatus::Approved, 2);

    assert!(h.board.open_menu(1));
    assert!(h.board.open_menu(2));
    assert_eq!(h.board.open_menu_count(), 2);

    h.board.outside_click(2);
    assert!(!h.board.is_menu_open(2));
    assert_eq!(h.board.open_menu_count(), 1);

    h.board
        .choose_menu_action(&a, MenuAction::Confirm, || {})
        .await
        .unwrap();
    assert_eq!(h.board.open_menu_count(), 0);

    // refused open leaves nothing behind
    assert!(h.board.start_drag(DragSource::unassigned(&b)));
    assert!(!h.board.open_menu(2));
    assert_eq!(h.board.open_menu_count(), 0);
}
