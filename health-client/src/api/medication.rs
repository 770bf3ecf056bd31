//! Medication supplementation requests.

use shared::models::{MedicationRequest, MedicationRequestCreate, MedicationReview};
use shared::{ListQuery, ListResponse};
use tracing::info;

use super::{MEDICATION_REQUESTS_PATH, SchoolHealthApi};
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient + 'static> SchoolHealthApi<H> {
    pub async fn medication_requests(
        &self,
        query: &ListQuery,
    ) -> ClientResult<ListResponse<MedicationRequest>> {
        self.list(MEDICATION_REQUESTS_PATH, query).await
    }

    /// Send medicine for a student
    pub async fn create_medication_request(
        &self,
        payload: &MedicationRequestCreate,
    ) -> ClientResult<MedicationRequest> {
        let request: MedicationRequest = self.create(MEDICATION_REQUESTS_PATH, payload).await?;
        info!(
            id = %request.id,
            student = %request.student_id,
            medicines = request.medicines.len(),
            "Medication request created"
        );
        Ok(request)
    }

    /// Approve or reject a pending request
    pub async fn review_medication_request(
        &self,
        id: &str,
        review: &MedicationReview,
    ) -> ClientResult<MedicationRequest> {
        let path = format!("{}/{}/review", MEDICATION_REQUESTS_PATH, id);
        let request: MedicationRequest = self.update(&path, review).await?;
        info!(id = %id, approved = review.approved, "Medication request reviewed");
        Ok(request)
    }
}
