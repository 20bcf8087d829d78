//! Drag preview
//!
//! Pure projection of an in-flight payload. Takes the payload by shared
//! reference and the theme by value; nothing else is read or written.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use shared::models::{Occasion, TableShape};

use super::payload::{DragKind, DragPayload};
use crate::theme::{Rgb, Theme};

/// Occasion badge on a list card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccasionChip {
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreviewNode {
    /// Reservation drawn as the table it is leaving
    TableShape {
        shape: TableShape,
        width: f64,
        height: f64,
        fill: Rgb,
        label: String,
        guests: i32,
        max_capacity: i32,
    },
    /// Sidebar card
    ListCard {
        time: NaiveTime,
        date: NaiveDate,
        guests: i32,
        occasion: Option<OccasionChip>,
        background: Rgb,
        foreground: Rgb,
    },
    /// Fallback for kinds this board cannot draw
    Label { text: String },
}

/// Default outline for an assigned payload that lost its hints
const FALLBACK_SIZE: f64 = 60.0;

pub fn render(kind: DragKind, payload: &DragPayload, theme: Theme) -> PreviewNode {
    match kind {
        DragKind::Assigned => {
            let (shape, width, height, max_capacity) = match payload.seated_hints() {
                Some(h) => (h.shape, h.width, h.height, h.max_capacity),
                None => (
                    TableShape::Rectangle,
                    FALLBACK_SIZE,
                    FALLBACK_SIZE,
                    payload.number_of_guests(),
                ),
            };
            PreviewNode::TableShape {
                shape,
                width,
                height,
                fill: theme.occasion_color(payload.occasion()),
                label: payload.full_name().to_string(),
                guests: payload.number_of_guests(),
                max_capacity,
            }
        }
        DragKind::Unassigned => PreviewNode::ListCard {
            time: payload.time(),
            date: payload.date(),
            guests: payload.number_of_guests(),
            occasion: payload.occasion().map(|o| chip(o, theme)),
            background: theme.surface(),
            foreground: theme.text(),
        },
    }
}

/// Render from a transport kind name; unknown names get a bare label
pub fn render_transport(kind: &str, payload: &DragPayload, theme: Theme) -> PreviewNode {
    match kind.parse::<DragKind>() {
        Ok(kind) => render(kind, payload, theme),
        Err(_) => PreviewNode::Label {
            text: payload.full_name().to_string(),
        },
    }
}

fn chip(occasion: Occasion, theme: Theme) -> OccasionChip {
    OccasionChip {
        label: occasion.label().to_string(),
        color: theme.occasion_color(Some(occasion)),
    }
}
