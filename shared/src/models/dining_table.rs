//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table outline on the floor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableShape {
    #[default]
    Rectangle,
    Circle,
}

/// Dining table entity
///
/// Placement is in floor-plan units with the origin at the top-left corner
/// of the table's bounding box. Tables are owned by the floor editor; the
/// board only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub floor_id: i64,
    #[serde(default)]
    pub shape: TableShape,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub capacity: i32,
}

impl DiningTable {
    /// Center of the bounding box
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Hit test in floor-plan coordinates
    ///
    /// Circles use the ellipse inscribed in the bounding box so stretched
    /// round tables still hit-test by their drawn outline.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        match self.shape {
            TableShape::Rectangle => {
                px >= self.x
                    && px <= self.x + self.width
                    && py >= self.y
                    && py <= self.y + self.height
            }
            TableShape::Circle => {
                let (cx, cy) = self.center();
                let rx = self.width / 2.0;
                let ry = self.height / 2.0;
                let dx = (px - cx) / rx;
                let dy = (py - cy) / ry;
                dx * dx + dy * dy <= 1.0
            }
        }
    }

    /// Whether a party of `guests` fits
    pub fn fits(&self, guests: i32) -> bool {
        guests <= self.capacity
    }
}
