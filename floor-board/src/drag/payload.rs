//! Drag payload
//!
//! A read-only snapshot of a reservation taken when a gesture starts. It is
//! a separate type from [`Reservation`] so it can never stand in for the
//! live entity, has no setters, and is not `Clone`: a drop or cancel
//! consumes it.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, Occasion, Reservation, TableShape};
use shared::reservation::ReservationStatus;

/// Payload kinds, named as they travel through the browser drag transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragKind {
    /// Reservation without a table, dragged from the sidebar list
    #[serde(rename = "BOX")]
    Unassigned,
    /// Reservation rendered inside a table, being moved elsewhere
    #[serde(rename = "TABLE_RESERVATION")]
    Assigned,
}

impl DragKind {
    pub const fn transport_name(&self) -> &'static str {
        match self {
            Self::Unassigned => "BOX",
            Self::Assigned => "TABLE_RESERVATION",
        }
    }
}

impl FromStr for DragKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOX" => Ok(Self::Unassigned),
            "TABLE_RESERVATION" => Ok(Self::Assigned),
            other => Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Unknown drag kind: {other}"),
            )),
        }
    }
}

/// Placement hints carried by an assigned payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatedHints {
    pub from_table_id: i64,
    pub width: f64,
    pub height: f64,
    pub shape: TableShape,
    pub max_capacity: i32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    kind: DragKind,
    id: i64,
    full_name: String,
    date: NaiveDate,
    time: NaiveTime,
    status: ReservationStatus,
    number_of_guests: i32,
    occasion: Option<Occasion>,
    created_at: DateTime<Utc>,
    tables: Vec<i64>,
    /// Seats per entry of `tables`
    #[serde(default)]
    capacities: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seated: Option<SeatedHints>,
}

impl DragPayload {
    fn snapshot(kind: DragKind, reservation: &Reservation, seated: Option<SeatedHints>) -> Self {
        Self {
            kind,
            id: reservation.id,
            full_name: reservation.full_name.clone(),
            date: reservation.date,
            time: reservation.time,
            status: reservation.status,
            number_of_guests: reservation.number_of_guests,
            occasion: reservation.occasion,
            created_at: reservation.created_at,
            tables: reservation.table_ids(),
            capacities: reservation.tables.iter().map(|t| t.capacity).collect(),
            seated,
        }
    }

    pub(crate) fn unassigned(reservation: &Reservation) -> Self {
        Self::snapshot(DragKind::Unassigned, reservation, None)
    }

    pub(crate) fn seated(reservation: &Reservation, table: &DiningTable) -> Self {
        let hints = SeatedHints {
            from_table_id: table.id,
            width: table.width,
            height: table.height,
            shape: table.shape,
            max_capacity: table.capacity,
        };
        Self::snapshot(DragKind::Assigned, reservation, Some(hints))
    }

    pub fn kind(&self) -> DragKind {
        self.kind
    }

    pub fn reservation_id(&self) -> i64 {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn number_of_guests(&self) -> i32 {
        self.number_of_guests
    }

    pub fn occasion(&self) -> Option<Occasion> {
        self.occasion
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Committed table ids at the time the gesture started
    pub fn tables(&self) -> &[i64] {
        &self.tables
    }

    /// Seats of each committed table, aligned with [`Self::tables`]
    pub fn capacities(&self) -> &[i32] {
        &self.capacities
    }

    pub fn seated_hints(&self) -> Option<&SeatedHints> {
        self.seated.as_ref()
    }

    pub fn from_table_id(&self) -> Option<i64> {
        self.seated.map(|s| s.from_table_id)
    }

    /// Encode for the browser drag transport
    pub fn to_transport(&self) -> AppResult<String> {
        serde_json::to_string(self)
            .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e.to_string()))
    }

    /// Decode from the browser drag transport
    ///
    /// Applies the same gate as starting a drag: only approved reservations
    /// decode. Also rejects assigned payloads without placement hints and
    /// unassigned ones with them.
    pub fn from_transport(raw: &str) -> AppResult<Self> {
        let payload: Self = serde_json::from_str(raw)
            .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e.to_string()))?;
        if !payload.status.is_draggable() {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("A {} reservation cannot be moved", payload.status),
            )
            .with_detail("status", payload.status.as_str()));
        }
        if !payload.capacities.is_empty() && payload.capacities.len() != payload.tables.len() {
            return Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                "Table capacities do not match tables",
            ));
        }
        match (payload.kind, payload.seated.is_some()) {
            (DragKind::Assigned, true) | (DragKind::Unassigned, false) => Ok(payload),
            (kind, _) => Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Placement hints do not match drag kind {}", kind.transport_name()),
            )),
        }
    }
}
