//! Board facade
//!
//! One board view: per-reservation menus, the drag controller, and the
//! coordinator behind them. All methods take `&self` so a view can share the
//! board with in-flight mutations.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use shared::models::Reservation;
use shared::reservation::{MenuAction, TransitionError};

use crate::coordinator::{AssignmentCoordinator, MutationOutcome};
use crate::drag::{AssignmentSink, DragContext, DragController, DragSource, DropTarget};
use crate::error::{BoardError, BoardResult};
use crate::menu::ContextMenu;

pub struct ReservationBoard {
    coordinator: Arc<AssignmentCoordinator>,
    /// Open menus only; closing one drops its entry
    menus: Mutex<HashMap<i64, ContextMenu>>,
    drag: Mutex<DragController>,
}

impl ReservationBoard {
    pub fn new(coordinator: Arc<AssignmentCoordinator>) -> Self {
        Self {
            coordinator,
            menus: Mutex::new(HashMap::new()),
            drag: Mutex::new(DragController::new()),
        }
    }

    pub fn coordinator(&self) -> &Arc<AssignmentCoordinator> {
        &self.coordinator
    }

    pub fn can_change(&self) -> bool {
        self.coordinator.capabilities().can_change_reservation()
    }

    pub fn is_menu_open(&self, reservation_id: i64) -> bool {
        self.menus
            .lock()
            .get(&reservation_id)
            .is_some_and(ContextMenu::is_open)
    }

    /// Open the reservation's menu; refused while it is being dragged
    pub fn open_menu(&self, reservation_id: i64) -> bool {
        let dragging = self.drag.lock().is_dragging(reservation_id);
        let mut menus = self.menus.lock();
        let mut menu = menus.get(&reservation_id).copied().unwrap_or_default();
        if !menu.open(dragging) {
            return false;
        }
        menus.insert(reservation_id, menu);
        true
    }

    /// Click outside the menu; ignored while a mutation is pending
    pub fn outside_click(&self, reservation_id: i64) {
        let loading = self.coordinator.is_loading(reservation_id);
        let mut menus = self.menus.lock();
        let closed = match menus.get_mut(&reservation_id) {
            Some(menu) => {
                menu.on_outside_click(loading);
                !menu.is_open()
            }
            None => return,
        };
        if closed {
            menus.remove(&reservation_id);
        }
    }

    /// Menus currently open on this board
    pub fn open_menu_count(&self) -> usize {
        self.menus.lock().len()
    }

    pub fn menu_actions(&self, reservation: &Reservation) -> Vec<MenuAction> {
        ContextMenu::actions(reservation.status, self.can_change())
    }

    /// Run a menu item through the coordinator; the menu closes once the
    /// service accepts it
    pub async fn choose_menu_action<U>(
        &self,
        reservation: &Reservation,
        action: MenuAction,
        on_update: U,
    ) -> BoardResult<MutationOutcome>
    where
        U: FnOnce() + Send,
    {
        let outcome = match action {
            MenuAction::RequestReview => {
                self.coordinator
                    .request_review(reservation, on_update)
                    .await?
            }
            other => {
                let next = match other.target_status() {
                    Some(next) if other.applies_to(reservation.status) => next,
                    target => {
                        return Err(BoardError::InvalidTransition(TransitionError::NotAllowed {
                            from: reservation.status,
                            to: target.unwrap_or(reservation.status),
                        }));
                    }
                };
                self.coordinator
                    .change_status(reservation, next, on_update)
                    .await?
            }
        };

        if outcome.is_applied() {
            self.menus.lock().remove(&reservation.id);
        }
        Ok(outcome)
    }

    /// Pick up `source`; gated on status, menu state and capability
    pub fn start_drag(&self, source: DragSource<'_>) -> bool {
        let ctx = DragContext::new(
            self.is_menu_open(source.reservation().id),
            self.can_change(),
        );
        self.drag.lock().try_start(source, &ctx)
    }

    pub fn is_dragging(&self, reservation_id: i64) -> bool {
        self.drag.lock().is_dragging(reservation_id)
    }

    /// Release over `target`; returns whether a move was submitted
    pub fn drop_on_table(&self, target: &mut DropTarget<'_>, sink: &dyn AssignmentSink) -> bool {
        self.drag.lock().drop_on(target, sink)
    }

    /// Release outside any table
    pub fn cancel_drag(&self) {
        self.drag.lock().cancel();
    }
}
