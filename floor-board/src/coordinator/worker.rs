//! Drop queue
//!
//! Drop targets submit synchronously from the pointer handler; the worker
//! drains the queue and runs each move through the coordinator on its own
//! task, so a move for one reservation never waits on another.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::AssignmentCoordinator;
use crate::drag::{AssignmentSink, TableMove};

/// Sending half handed to drop targets
#[derive(Debug, Clone)]
pub struct AssignmentQueue {
    tx: mpsc::UnboundedSender<TableMove>,
}

impl AssignmentSink for AssignmentQueue {
    fn submit(&self, request: TableMove) {
        let reservation_id = request.reservation_id;
        if self.tx.send(request).is_err() {
            tracing::warn!(reservation_id, "Assignment worker stopped, drop discarded");
        }
    }
}

pub fn assignment_channel() -> (AssignmentQueue, mpsc::UnboundedReceiver<TableMove>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (AssignmentQueue { tx }, rx)
}

/// Run queued moves until every [`AssignmentQueue`] is dropped
///
/// `on_update` receives the reservation id after each applied move.
pub fn spawn_assignment_worker(
    coordinator: Arc<AssignmentCoordinator>,
    mut rx: mpsc::UnboundedReceiver<TableMove>,
    on_update: Arc<dyn Fn(i64) + Send + Sync>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::debug!("Assignment worker started");
        let mut tasks = Vec::new();
        while let Some(request) = rx.recv().await {
            let coordinator = Arc::clone(&coordinator);
            let on_update = Arc::clone(&on_update);
            tasks.push(tokio::spawn(async move {
                let id = request.reservation_id;
                if let Err(e) = coordinator
                    .reassign_table(&request, move || on_update(id))
                    .await
                {
                    tracing::debug!(reservation_id = id, "Queued move failed: {e}");
                }
            }));
            tasks.retain(|t: &JoinHandle<()>| !t.is_finished());
        }
        for task in tasks {
            let _ = task.await;
        }
        tracing::debug!("Assignment worker stopped");
    })
}
