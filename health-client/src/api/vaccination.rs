//! Vaccination consent.

use shared::models::{ConsentRecord, ConsentSubmit};
use tracing::info;

use super::{SchoolHealthApi, VACCINATION_CONSENTS_PATH};
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient + 'static> SchoolHealthApi<H> {
    /// Consent records of every student of a parent
    pub async fn vaccination_consents(&self, parent_id: &str) -> ClientResult<Vec<ConsentRecord>> {
        let query = [("parentId".to_string(), parent_id.to_string())];
        self.fetch(VACCINATION_CONSENTS_PATH, &query).await
    }

    pub async fn consent(&self, session_id: &str, student_id: &str) -> ClientResult<ConsentRecord> {
        let path = format!("{}/{}/{}", VACCINATION_CONSENTS_PATH, session_id, student_id);
        self.fetch(&path, &[]).await
    }

    pub async fn submit_consent(&self, payload: &ConsentSubmit) -> ClientResult<ConsentRecord> {
        let record: ConsentRecord = self.create(VACCINATION_CONSENTS_PATH, payload).await?;
        info!(
            session = %record.session_id,
            student = %record.student_id,
            decision = record.decision.as_str(),
            "Consent submitted"
        );
        Ok(record)
    }
}
