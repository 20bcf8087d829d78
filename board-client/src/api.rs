//! Reservation service operations
//!
//! [`ReservationApi`] is the seam the board talks through; [`HttpClient`]
//! is the network implementation, tests substitute in-memory ones.

use async_trait::async_trait;
use shared::client::{AvailabilityQuery, CapabilityQuery, CapabilityResponse, ReservationPatch};
use shared::models::DiningTable;

use crate::{ClientError, ClientResult, HttpClient};

/// Operations the board consumes from the reservation service
#[async_trait]
pub trait ReservationApi: Send + Sync {
    /// Apply a `{status}` or `{tables}` patch to one reservation
    async fn update_reservation(&self, reservation_id: i64, patch: &ReservationPatch)
    -> ClientResult<()>;

    /// Tables free for the given slot and party size
    async fn available_tables(&self, query: &AvailabilityQuery) -> ClientResult<Vec<DiningTable>>;

    /// Ask whether the current actor may perform `action` on `resource`
    async fn check_capability(&self, query: &CapabilityQuery) -> ClientResult<bool>;

    /// Ask the guest for a review (side action, not a status change)
    async fn request_review(&self, reservation_id: i64) -> ClientResult<()>;
}

#[async_trait]
impl ReservationApi for HttpClient {
    async fn update_reservation(
        &self,
        reservation_id: i64,
        patch: &ReservationPatch,
    ) -> ClientResult<()> {
        tracing::debug!(reservation_id, ?patch, "PATCH reservation");
        self.patch::<serde_json::Value, _>(&format!("/api/reservations/{reservation_id}"), patch)
            .await?;
        Ok(())
    }

    async fn available_tables(&self, query: &AvailabilityQuery) -> ClientResult<Vec<DiningTable>> {
        self.get::<Vec<DiningTable>, _>("/api/tables/available", query)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse("Missing available tables".to_string()))
    }

    async fn check_capability(&self, query: &CapabilityQuery) -> ClientResult<bool> {
        self.post::<CapabilityResponse, _>("/api/permissions/check", query)
            .await?
            .map(|r| r.can)
            .ok_or_else(|| ClientError::InvalidResponse("Missing capability answer".to_string()))
    }

    async fn request_review(&self, reservation_id: i64) -> ClientResult<()> {
        self.post::<serde_json::Value, _>(
            &format!("/api/reservations/{reservation_id}/request-review"),
            &serde_json::json!({}),
        )
        .await?;
        Ok(())
    }
}
