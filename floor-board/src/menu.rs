//! Contextual status menu
//!
//! One menu per reservation. Which actions it offers comes from
//! [`MenuAction::available_for`]; the menu itself only tracks open/closed.

use shared::reservation::{MenuAction, ReservationStatus};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenu {
    open: bool,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open unless the reservation is being dragged
    pub fn open(&mut self, dragging: bool) -> bool {
        if dragging {
            return false;
        }
        self.open = true;
        true
    }

    /// Click landed outside the menu
    ///
    /// Stays open while a mutation for the reservation is in flight so the
    /// pending state remains visible.
    pub fn on_outside_click(&mut self, loading: bool) {
        if !loading {
            self.open = false;
        }
    }

    /// Items to render; nothing without `reservation:change`
    pub fn actions(status: ReservationStatus, can_change: bool) -> Vec<MenuAction> {
        if !can_change {
            return Vec::new();
        }
        MenuAction::available_for(status)
    }
}
