//! Health events and the medical supplies they consume.

use shared::models::{HealthEvent, HealthEventCreate, SupplyOption};
use shared::{ListQuery, ListResponse};
use tracing::info;

use super::{HEALTH_EVENTS_PATH, MEDICAL_SUPPLIES_PATH, SchoolHealthApi};
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient + 'static> SchoolHealthApi<H> {
    pub async fn health_events(&self, query: &ListQuery) -> ClientResult<ListResponse<HealthEvent>> {
        self.list(HEALTH_EVENTS_PATH, query).await
    }

    pub async fn create_health_event(&self, payload: &HealthEventCreate) -> ClientResult<HealthEvent> {
        let event: HealthEvent = self.create(HEALTH_EVENTS_PATH, payload).await?;
        info!(
            id = %event.id,
            event_type = event.event_type.as_str(),
            supplies = payload.supplies.len(),
            "Health event recorded"
        );
        Ok(event)
    }

    /// Supplies in stock, for the supply pickers of the event form
    pub async fn medical_supplies(&self) -> ClientResult<Vec<SupplyOption>> {
        self.fetch(MEDICAL_SUPPLIES_PATH, &[]).await
    }
}
