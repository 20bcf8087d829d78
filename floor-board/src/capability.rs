//! Capability checks
//!
//! Policy lives in the reservation service; the board only asks
//! "may this actor do X to Y" and caches the answer so drag gating and menu
//! rendering can read it synchronously.
//!
//! Permission strings use `resource:action`. `all` grants everything and
//! `resource:*` grants every action on one resource.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use board_client::{ClientResult, ReservationApi};
use shared::client::CapabilityQuery;

pub const RESERVATION: &str = "reservation";
pub const CHANGE: &str = "change";

/// Super permission
pub const ALL: &str = "all";

/// Synchronous capability gate
pub trait CapabilityGate: Send + Sync {
    fn allows(&self, resource: &str, action: &str) -> bool;

    /// `reservation:change`, the gate for every mutation on the board
    fn can_change_reservation(&self) -> bool {
        self.allows(RESERVATION, CHANGE)
    }
}

/// Granted permission strings
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    granted: HashSet<String>,
}

impl PermissionSet {
    pub fn new<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

impl CapabilityGate for PermissionSet {
    fn allows(&self, resource: &str, action: &str) -> bool {
        self.granted.contains(ALL)
            || self.granted.contains(&format!("{resource}:*"))
            || self.granted.contains(&format!("{resource}:{action}"))
    }
}

/// `reservation:change` answer fetched from the capability endpoint
///
/// Denies until [`RemoteCapabilities::refresh`] succeeds; a failed refresh
/// keeps the previous answer.
#[derive(Debug, Default)]
pub struct RemoteCapabilities {
    can_change: AtomicBool,
}

impl RemoteCapabilities {
    pub async fn load(api: &dyn ReservationApi) -> ClientResult<Self> {
        let caps = Self::default();
        caps.refresh(api).await?;
        Ok(caps)
    }

    pub async fn refresh(&self, api: &dyn ReservationApi) -> ClientResult<bool> {
        let can = api
            .check_capability(&CapabilityQuery::change_reservation())
            .await?;
        self.can_change.store(can, Ordering::Release);
        tracing::debug!(can_change = can, "Reservation capability refreshed");
        Ok(can)
    }
}

impl CapabilityGate for RemoteCapabilities {
    fn allows(&self, resource: &str, action: &str) -> bool {
        resource == RESERVATION && action == CHANGE && self.can_change.load(Ordering::Acquire)
    }
}
