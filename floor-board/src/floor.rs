//! Floor plan
//!
//! Holds every floor of the venue and which one is on screen. Tables are
//! looked up here when a drop lands or a preview needs placement hints.

use std::collections::HashMap;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, Floor, Reservation};

use crate::drag::DragSource;

#[derive(Debug, Clone)]
pub struct FloorPlan {
    floors: Vec<Floor>,
    active: Option<i64>,
    /// table id -> floor index
    index: HashMap<i64, usize>,
}

impl FloorPlan {
    /// Build a plan, checking that floors partition the tables
    ///
    /// The first floor becomes active.
    pub fn new(floors: Vec<Floor>) -> AppResult<Self> {
        let mut index = HashMap::new();
        for (i, floor) in floors.iter().enumerate() {
            for table in &floor.tables {
                if table.floor_id != floor.id {
                    return Err(AppError::with_message(
                        ErrorCode::FloorPartitionViolated,
                        format!(
                            "Table {} declares floor {} but is listed on floor {}",
                            table.id, table.floor_id, floor.id
                        ),
                    )
                    .with_detail("table_id", table.id));
                }
                if index.insert(table.id, i).is_some() {
                    return Err(AppError::with_message(
                        ErrorCode::FloorPartitionViolated,
                        format!("Table {} appears on more than one floor", table.id),
                    )
                    .with_detail("table_id", table.id));
                }
            }
        }

        let active = floors.first().map(|f| f.id);
        tracing::debug!(floors = floors.len(), tables = index.len(), "Floor plan loaded");
        Ok(Self {
            floors,
            active,
            index,
        })
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn select_floor(&mut self, floor_id: i64) -> AppResult<()> {
        if !self.floors.iter().any(|f| f.id == floor_id) {
            return Err(AppError::new(ErrorCode::FloorNotFound).with_detail("floor_id", floor_id));
        }
        self.active = Some(floor_id);
        Ok(())
    }

    pub fn active_floor(&self) -> Option<&Floor> {
        let id = self.active?;
        self.floors.iter().find(|f| f.id == id)
    }

    /// Table on any floor
    pub fn table(&self, table_id: i64) -> Option<&DiningTable> {
        let floor = self.floors.get(*self.index.get(&table_id)?)?;
        floor.table(table_id)
    }

    pub fn floor_of(&self, table_id: i64) -> Option<&Floor> {
        self.floors.get(*self.index.get(&table_id)?)
    }

    /// Hit test on the active floor only
    pub fn table_at(&self, x: f64, y: f64) -> Option<&DiningTable> {
        self.active_floor()?.table_at(x, y)
    }

    /// Reservations rendered inside a table
    pub fn reservations_at<'a>(
        &self,
        table_id: i64,
        reservations: &'a [Reservation],
    ) -> Vec<&'a Reservation> {
        reservations
            .iter()
            .filter(|r| r.is_assigned_to(table_id))
            .collect()
    }

    /// One seated drag source per reservation drawn inside the table
    ///
    /// Empty when the table is not on the plan.
    pub fn drag_sources_at<'a>(
        &'a self,
        table_id: i64,
        reservations: &'a [Reservation],
    ) -> Vec<DragSource<'a>> {
        let Some(table) = self.table(table_id) else {
            return Vec::new();
        };
        self.reservations_at(table_id, reservations)
            .into_iter()
            .map(|r| DragSource::seated(r, table))
            .collect()
    }
}
