//! Drag-and-drop protocol
//!
//! - `source`: what can be picked up, and the gesture gate
//! - `payload`: the snapshot carried while dragging
//! - `target`: tables that turn drops into assignment requests
//! - `preview`: what is drawn under the pointer

pub mod payload;
pub mod preview;
pub mod source;
pub mod target;

pub use payload::{DragKind, DragPayload, SeatedHints};
pub use preview::{PreviewNode, render, render_transport};
pub use source::{DragContext, DragController, DragSource};
pub use target::{AssignmentSink, DropTarget, TableMove};
