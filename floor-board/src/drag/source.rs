//! Drag source and gesture recognition
//!
//! A gesture only starts through [`DragController::try_start`], which checks
//! [`DragSource::can_drag`] before any payload exists. A denied gesture
//! leaves no trace: no payload, no event.

use shared::models::{DiningTable, Reservation};

use super::payload::{DragKind, DragPayload};
use super::target::{AssignmentSink, DropTarget};

/// UI state consulted when a gesture starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragContext {
    /// The reservation's contextual menu is open
    pub menu_open: bool,
    /// Actor holds `reservation:change`
    pub can_change: bool,
}

impl DragContext {
    pub fn new(menu_open: bool, can_change: bool) -> Self {
        Self {
            menu_open,
            can_change,
        }
    }
}

/// Something the user can pick up
#[derive(Debug, Clone, Copy)]
pub enum DragSource<'a> {
    /// Sidebar item, not on a table yet
    Unassigned(&'a Reservation),
    /// Reservation drawn inside `table`
    Seated {
        reservation: &'a Reservation,
        table: &'a DiningTable,
    },
}

impl<'a> DragSource<'a> {
    pub fn unassigned(reservation: &'a Reservation) -> Self {
        Self::Unassigned(reservation)
    }

    pub fn seated(reservation: &'a Reservation, table: &'a DiningTable) -> Self {
        Self::Seated { reservation, table }
    }

    pub fn reservation(&self) -> &'a Reservation {
        match *self {
            Self::Unassigned(r) => r,
            Self::Seated { reservation, .. } => reservation,
        }
    }

    pub fn kind(&self) -> DragKind {
        match self {
            Self::Unassigned(_) => DragKind::Unassigned,
            Self::Seated { .. } => DragKind::Assigned,
        }
    }

    /// `status == APPROVED && !menu_open && can_change`
    pub fn can_drag(&self, ctx: &DragContext) -> bool {
        self.reservation().status.is_draggable() && !ctx.menu_open && ctx.can_change
    }

    /// Snapshot the reservation, or `None` when dragging is not allowed
    pub fn begin_drag(&self, ctx: &DragContext) -> Option<DragPayload> {
        if !self.can_drag(ctx) {
            return None;
        }
        Some(match self {
            Self::Unassigned(r) => DragPayload::unassigned(r),
            Self::Seated { reservation, table } => DragPayload::seated(reservation, table),
        })
    }
}

/// Holds the single live gesture
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragPayload>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture; refused while another one is live or when the
    /// source may not be dragged
    pub fn try_start(&mut self, source: DragSource<'_>, ctx: &DragContext) -> bool {
        if self.active.is_some() {
            tracing::debug!(
                reservation_id = source.reservation().id,
                "Drag refused, another gesture is live"
            );
            return false;
        }
        match source.begin_drag(ctx) {
            Some(payload) => {
                tracing::debug!(
                    reservation_id = payload.reservation_id(),
                    kind = payload.kind().transport_name(),
                    "Drag started"
                );
                self.active = Some(payload);
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> Option<&DragPayload> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `reservation_id` is the one being dragged, so its menu
    /// stays suppressed
    pub fn is_dragging(&self, reservation_id: i64) -> bool {
        self.active
            .as_ref()
            .is_some_and(|p| p.reservation_id() == reservation_id)
    }

    /// Release outside any target; the payload is discarded
    pub fn cancel(&mut self) -> Option<DragPayload> {
        let payload = self.active.take();
        if let Some(p) = &payload {
            tracing::debug!(reservation_id = p.reservation_id(), "Drag cancelled");
        }
        payload
    }

    /// Release over `target`; returns whether a move was submitted
    ///
    /// An incompatible target behaves like a cancel.
    pub fn drop_on(&mut self, target: &mut DropTarget<'_>, sink: &dyn AssignmentSink) -> bool {
        let Some(payload) = self.active.take() else {
            return false;
        };
        if !target.accepts(payload.kind()) {
            tracing::debug!(
                reservation_id = payload.reservation_id(),
                table_id = target.table().id,
                "Drop target does not accept payload"
            );
            return false;
        }
        target.on_drop(payload, sink)
    }
}
