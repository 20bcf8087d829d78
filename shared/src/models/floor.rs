//! Floor Model

use serde::{Deserialize, Serialize};

use super::DiningTable;

/// Floor entity (main room, terrace, private room...)
///
/// Floors partition tables: a table belongs to exactly one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub tables: Vec<DiningTable>,
}

impl Floor {
    /// Look up a table on this floor
    pub fn table(&self, table_id: i64) -> Option<&DiningTable> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    /// Table under a floor-plan point
    ///
    /// Later tables are drawn on top, so they win when outlines overlap.
    pub fn table_at(&self, x: f64, y: f64) -> Option<&DiningTable> {
        self.tables.iter().rev().find(|t| t.contains(x, y))
    }

    /// Total seats on this floor
    pub fn seats(&self) -> i32 {
        self.tables.iter().map(|t| t.capacity).sum()
    }
}
