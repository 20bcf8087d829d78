//! Reservation Model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DiningTable;
use crate::reservation::ReservationStatus;

/// Occasion tag chosen by the guest at booking time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occasion {
    Birthday,
    Anniversary,
    Business,
    Date,
    Celebration,
    #[serde(other)]
    Other,
}

impl Occasion {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Birthday => "Birthday",
            Self::Anniversary => "Anniversary",
            Self::Business => "Business",
            Self::Date => "Date",
            Self::Celebration => "Celebration",
            Self::Other => "Other",
        }
    }
}

/// Reservation entity
///
/// Created by the booking flow. The board only ever changes `status` and
/// `tables`, and only through the reservation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: ReservationStatus,
    pub number_of_guests: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<Occasion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default)]
    pub tables: Vec<DiningTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Ids of the committed table assignment
    pub fn table_ids(&self) -> Vec<i64> {
        self.tables.iter().map(|t| t.id).collect()
    }

    pub fn is_assigned_to(&self, table_id: i64) -> bool {
        self.tables.iter().any(|t| t.id == table_id)
    }

    pub fn is_unassigned(&self) -> bool {
        self.tables.is_empty()
    }
}
