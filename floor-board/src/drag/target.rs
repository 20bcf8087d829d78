//! Drop target
//!
//! A table on the floor plan. It turns a dropped payload into one
//! [`TableMove`] and hands it to an [`AssignmentSink`]; the mutation itself
//! happens in the coordinator.

use shared::models::DiningTable;
use shared::reservation::ReservationStatus;

use super::payload::{DragKind, DragPayload};

/// Request produced by a drop, consumed by the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMove {
    pub reservation_id: i64,
    /// Status when the gesture started
    pub status: ReservationStatus,
    /// `None` when the reservation came from the unassigned list
    pub from_table_id: Option<i64>,
    pub to_table_id: i64,
    pub to_table_name: String,
    /// Committed table ids when the gesture started
    pub current_tables: Vec<i64>,
    /// Seats per entry of `current_tables`, empty when unknown
    pub current_capacities: Vec<i32>,
    pub number_of_guests: i32,
    pub target_capacity: i32,
}

impl TableMove {
    /// Table ids to send after the move: `from` replaced by `to`, order
    /// kept, no duplicates
    pub fn next_tables(&self) -> Vec<i64> {
        let mut next: Vec<i64> = Vec::with_capacity(self.current_tables.len() + 1);
        for &id in &self.current_tables {
            let id = if Some(id) == self.from_table_id {
                self.to_table_id
            } else {
                id
            };
            if !next.contains(&id) {
                next.push(id);
            }
        }
        if !next.contains(&self.to_table_id) {
            next.push(self.to_table_id);
        }
        next
    }

    /// Seats across every table the reservation holds after the move
    ///
    /// Tables whose capacity was not carried count as zero.
    pub fn combined_capacity(&self) -> i32 {
        self.next_tables()
            .into_iter()
            .map(|id| {
                if id == self.to_table_id {
                    return self.target_capacity;
                }
                self.current_tables
                    .iter()
                    .position(|&t| t == id)
                    .and_then(|i| self.current_capacities.get(i).copied())
                    .unwrap_or(0)
            })
            .sum()
    }

    pub fn exceeds_capacity(&self) -> bool {
        self.number_of_guests > self.combined_capacity()
    }
}

/// Receives drop requests synchronously
pub trait AssignmentSink: Send + Sync {
    fn submit(&self, request: TableMove);
}

pub struct DropTarget<'a> {
    table: &'a DiningTable,
    eligible: bool,
}

impl<'a> DropTarget<'a> {
    pub fn new(table: &'a DiningTable) -> Self {
        Self {
            table,
            eligible: false,
        }
    }

    pub fn table(&self) -> &'a DiningTable {
        self.table
    }

    /// Tables take both sidebar items and reservations moved from another
    /// table
    pub fn accepts(&self, kind: DragKind) -> bool {
        matches!(kind, DragKind::Unassigned | DragKind::Assigned)
    }

    /// Pointer entered with a payload of `kind`
    pub fn hover(&mut self, kind: DragKind) {
        self.eligible = self.accepts(kind);
    }

    pub fn leave(&mut self) {
        self.eligible = false;
    }

    /// Highlight shown while a compatible payload hovers
    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    /// Forward the drop; returns whether a request was submitted
    ///
    /// Dropping an assigned reservation back on its own table is a no-op.
    pub fn on_drop(&mut self, payload: DragPayload, sink: &dyn AssignmentSink) -> bool {
        self.eligible = false;

        let from_table_id = payload.from_table_id();
        if from_table_id == Some(self.table.id) {
            tracing::debug!(
                reservation_id = payload.reservation_id(),
                table_id = self.table.id,
                "Dropped on origin table, nothing to do"
            );
            return false;
        }

        let request = TableMove {
            reservation_id: payload.reservation_id(),
            status: payload.status(),
            from_table_id,
            to_table_id: self.table.id,
            to_table_name: self.table.name.clone(),
            current_tables: payload.tables().to_vec(),
            current_capacities: payload.capacities().to_vec(),
            number_of_guests: payload.number_of_guests(),
            target_capacity: self.table.capacity,
        };
        tracing::debug!(
            reservation_id = request.reservation_id,
            from_table_id = ?request.from_table_id,
            to_table_id = request.to_table_id,
            "Drop forwarded"
        );
        sink.submit(request);
        true
    }
}
