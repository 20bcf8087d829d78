//! Availability resolver
//!
//! Asks the reservation service which tables are free for a slot and merges
//! the answer with the tables the edited reservation already holds, so a
//! table keeps showing as selectable for the reservation sitting at it.

use std::sync::Arc;

use board_client::{ClientResult, ReservationApi};
use shared::client::AvailabilityQuery;
use shared::models::DiningTable;

/// Service result first, then held tables it left out; unique by id
pub fn merge_available(available: &[DiningTable], assigned: &[DiningTable]) -> Vec<DiningTable> {
    let mut merged: Vec<DiningTable> = Vec::with_capacity(available.len() + assigned.len());
    for table in available.iter().chain(assigned) {
        if !merged.iter().any(|t| t.id == table.id) {
            merged.push(table.clone());
        }
    }
    merged
}

pub struct AvailabilityResolver {
    api: Arc<dyn ReservationApi>,
    last: Option<(AvailabilityQuery, Vec<DiningTable>)>,
}

impl AvailabilityResolver {
    pub fn new(api: Arc<dyn ReservationApi>) -> Self {
        Self { api, last: None }
    }

    /// Candidate tables for `query`
    ///
    /// The service is queried again only when date, time or party size
    /// changed since the last successful answer. A party of zero skips the
    /// network and yields the held tables.
    pub async fn resolve(
        &mut self,
        query: AvailabilityQuery,
        assigned: &[DiningTable],
    ) -> ClientResult<Vec<DiningTable>> {
        if query.number_of_guests <= 0 {
            return Ok(merge_available(&[], assigned));
        }

        let available = match &self.last {
            Some((last_query, tables)) if *last_query == query => tables.clone(),
            _ => {
                tracing::debug!(
                    date = %query.date,
                    time = %query.time,
                    guests = query.number_of_guests,
                    "Querying table availability"
                );
                let tables = self.api.available_tables(&query).await?;
                self.last = Some((query, tables.clone()));
                tables
            }
        };

        Ok(merge_available(&available, assigned))
    }

    /// Forget the cached answer
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn last_query(&self) -> Option<&AvailabilityQuery> {
        self.last.as_ref().map(|(q, _)| q)
    }
}
