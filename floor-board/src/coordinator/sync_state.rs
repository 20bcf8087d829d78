//! Per-reservation sync phase
//!
//! `Pending` while a request is on the wire, `Reconciling` after success
//! until the owner reports its refetch done, `Settled` otherwise. Only
//! `Pending` blocks new mutations.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    #[default]
    Settled,
    Pending,
    Reconciling,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct SyncTable {
    phases: Arc<DashMap<i64, SyncPhase>>,
}

impl SyncTable {
    pub(crate) fn phase(&self, reservation_id: i64) -> SyncPhase {
        self.phases
            .get(&reservation_id)
            .map(|p| *p)
            .unwrap_or_default()
    }

    /// Mark `reservation_id` pending, or `None` if it already is
    pub(crate) fn try_begin(&self, reservation_id: i64) -> Option<InFlightGuard> {
        let restore = match self.phases.entry(reservation_id) {
            Entry::Occupied(mut e) => {
                if *e.get() == SyncPhase::Pending {
                    return None;
                }
                Some(e.insert(SyncPhase::Pending))
            }
            Entry::Vacant(e) => {
                e.insert(SyncPhase::Pending);
                None
            }
        };
        Some(InFlightGuard {
            phases: Arc::clone(&self.phases),
            reservation_id,
            restore,
            succeeded: false,
        })
    }

    /// Owner finished re-synchronizing
    pub(crate) fn settle(&self, reservation_id: i64) {
        self.phases
            .remove_if(&reservation_id, |_, p| *p == SyncPhase::Reconciling);
    }
}

/// Clears the pending flag on every exit path, including cancellation of
/// the owning future
///
/// A failed mutation puts back the phase it replaced, so a reservation that
/// was still reconciling keeps waiting for its refetch.
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    phases: Arc<DashMap<i64, SyncPhase>>,
    reservation_id: i64,
    restore: Option<SyncPhase>,
    succeeded: bool,
}

impl InFlightGuard {
    /// Request succeeded; the reservation now waits for reconciliation
    pub(crate) fn succeed(mut self) {
        self.succeeded = true;
        self.phases
            .insert(self.reservation_id, SyncPhase::Reconciling);
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.succeeded {
            return;
        }
        match self.restore {
            Some(previous) => {
                if let Some(mut phase) = self.phases.get_mut(&self.reservation_id)
                    && *phase == SyncPhase::Pending
                {
                    *phase = previous;
                }
            }
            None => {
                self.phases
                    .remove_if(&self.reservation_id, |_, p| *p == SyncPhase::Pending);
            }
        }
    }
}
