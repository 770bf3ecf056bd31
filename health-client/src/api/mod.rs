//! Resource APIs of the school-health backend.
//!
//! Every mutation validates its payload before anything is sent and maps
//! `success: false` answers to [`ClientError::Business`].

mod health_events;
mod medication;
mod parents;
mod staff;
mod transfer;
mod users;
mod vaccination;

pub use parents::PARENTS_TRANSFER;
pub use staff::STAFF_TRANSFER;
pub use transfer::SpreadsheetTransfer;
pub use users::users_query;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::{ApiResponse, ListQuery, ListResponse};
use validator::Validate;

use crate::forms::validate_form;
use crate::http::HttpClient;
use crate::list::ListEndpoint;
use crate::{ClientError, ClientResult, NetworkHttpClient};

pub const USERS_PATH: &str = "api/users";
pub const STAFF_PATH: &str = "api/staff";
pub const PARENTS_PATH: &str = "api/parents";
pub const MEDICATION_REQUESTS_PATH: &str = "api/medication-requests";
pub const VACCINATION_CONSENTS_PATH: &str = "api/vaccination/consents";
pub const HEALTH_EVENTS_PATH: &str = "api/health-events";
pub const MEDICAL_SUPPLIES_PATH: &str = "api/medical-supplies";

/// Shown when the backend refuses without saying why
const REQUEST_REJECTED: &str = "The request was rejected by the server.";

/// Typed access to the backend resources
#[derive(Debug)]
pub struct SchoolHealthApi<H = NetworkHttpClient> {
    http: Arc<H>,
}

impl<H> Clone for SchoolHealthApi<H> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
        }
    }
}

impl<H: HttpClient + 'static> SchoolHealthApi<H> {
    pub fn new(http: H) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    pub fn from_shared(http: Arc<H>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &Arc<H> {
        &self.http
    }

    /// List endpoint at `path`, for a [`ListController`](crate::list::ListController)
    pub fn endpoint(&self, path: &str) -> ListEndpoint<H> {
        ListEndpoint::new(Arc::clone(&self.http), path)
    }

    async fn list<T>(&self, path: &str, query: &ListQuery) -> ClientResult<ListResponse<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.http.get(path, &query.to_query_pairs()).await
    }

    async fn fetch<T>(&self, path: &str, query: &[(String, String)]) -> ClientResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let response: ApiResponse<T> = self.http.get(path, query).await?;
        expect_data(response)
    }

    /// Validate `payload`, then `POST` it
    async fn create<T, B>(&self, path: &str, payload: &B) -> ClientResult<T>
    where
        T: DeserializeOwned + Send + 'static,
        B: Validate + serde::Serialize + Sync,
    {
        validate_form(payload)?;
        let response: ApiResponse<T> = self.http.post(path, payload).await?;
        expect_data(response)
    }

    /// Validate `payload`, then `PUT` it
    async fn update<T, B>(&self, path: &str, payload: &B) -> ClientResult<T>
    where
        T: DeserializeOwned + Send + 'static,
        B: Validate + serde::Serialize + Sync,
    {
        validate_form(payload)?;
        let response: ApiResponse<T> = self.http.put(path, payload).await?;
        expect_data(response)
    }

    /// `DELETE path/id`; returns the server's confirmation message
    async fn remove(&self, path: &str, id: &str) -> ClientResult<Option<String>> {
        let response: ApiResponse<serde_json::Value> =
            self.http.delete(&format!("{}/{}", path, id)).await?;
        let message = response.message.clone();
        expect_success(response)?;
        tracing::info!(path = %path, id = %id, "Record deleted");
        Ok(message)
    }
}

/// Turn `success: false` into a business error
pub(crate) fn expect_success<T>(response: ApiResponse<T>) -> ClientResult<Option<T>> {
    if response.success {
        Ok(response.data)
    } else {
        Err(ClientError::Business(
            response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| REQUEST_REJECTED.to_string()),
        ))
    }
}

/// Like [`expect_success`], but the payload is required
pub(crate) fn expect_data<T>(response: ApiResponse<T>) -> ClientResult<T> {
    expect_success(response)?
        .ok_or_else(|| ClientError::InvalidResponse("response has no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_false_is_business_error() {
        let response: ApiResponse<()> = ApiResponse::error("Email already registered");
        match expect_success(response) {
            Err(ClientError::Business(message)) => assert_eq!(message, "Email already registered"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_success_flag_is_rejected() {
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"data": 3}"#).unwrap();
        match expect_data(response) {
            Err(ClientError::Business(message)) => assert_eq!(message, REQUEST_REJECTED),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_data_is_invalid_response() {
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(
            expect_data(response),
            Err(ClientError::InvalidResponse(_))
        ));
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(expect_success(response).unwrap(), None);
    }
}
