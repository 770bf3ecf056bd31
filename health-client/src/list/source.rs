//! List endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::{ListQuery, ListResponse};

use crate::ClientResult;
use crate::http::HttpClient;

/// Anything that can serve one page of records
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<ListResponse<T>>;
}

/// A `GET` list endpoint of the backend
#[derive(Debug)]
pub struct ListEndpoint<H> {
    http: Arc<H>,
    path: String,
}

impl<H> Clone for ListEndpoint<H> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            path: self.path.clone(),
        }
    }
}

impl<H: HttpClient> ListEndpoint<H> {
    pub fn new(http: Arc<H>, path: impl Into<String>) -> Self {
        Self {
            http,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<T, H> ListSource<T> for ListEndpoint<H>
where
    T: DeserializeOwned + Send + 'static,
    H: HttpClient + 'static,
{
    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<ListResponse<T>> {
        self.http.get(&self.path, &query.to_query_pairs()).await
    }
}
