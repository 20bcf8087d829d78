//! Floor Board - reservation to table assignment
//!
//! # Overview
//!
//! Host-stand view of a restaurant floor: reservations are dragged from the
//! unassigned list or between tables, and moved through their lifecycle via
//! a contextual menu. Every mutation goes through the
//! [`AssignmentCoordinator`], which validates locally, sends one request to
//! the reservation service and asks the owner to refetch.
//!
//! # Modules
//!
//! ```text
//! floor-board/src/
//! ├── board.rs          # facade for one board view
//! ├── coordinator/      # mutations, per-reservation mutex, drop queue
//! ├── drag/             # source, payload, target, preview
//! ├── availability.rs   # free tables for a slot
//! ├── floor.rs          # floors and table hit-testing
//! ├── capability.rs     # resource:action checks
//! ├── menu.rs           # contextual status menu
//! ├── notification.rs   # user-visible errors
//! ├── theme.rs          # colors
//! ├── config.rs         # environment configuration
//! ├── logger.rs         # tracing setup
//! └── error.rs
//! ```

pub mod availability;
pub mod board;
pub mod capability;
pub mod config;
pub mod coordinator;
pub mod drag;
pub mod error;
pub mod floor;
pub mod logger;
pub mod menu;
pub mod notification;
pub mod theme;

pub use availability::{AvailabilityResolver, merge_available};
pub use board::ReservationBoard;
pub use capability::{CapabilityGate, PermissionSet, RemoteCapabilities};
pub use config::BoardConfig;
pub use coordinator::{
    AssignmentCoordinator, AssignmentQueue, CapacityPolicy, CoordinatorConfig, MutationOutcome,
    SyncPhase, assignment_channel, spawn_assignment_worker,
};
pub use drag::{
    AssignmentSink, DragContext, DragController, DragKind, DragPayload, DragSource, DropTarget,
    PreviewNode, TableMove,
};
pub use error::{BoardError, BoardResult};
pub use floor::FloorPlan;
pub use logger::{init_logger, init_logger_with_file};
pub use menu::ContextMenu;
pub use notification::{Notification, NotificationLevel, NotificationLog, Notifier};
pub use theme::{Theme, ThemeMode};
