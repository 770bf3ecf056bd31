//! Parent management.

use shared::models::{ImportSummary, Parent, ParentCreate};
use shared::{ListQuery, ListResponse};
use tracing::info;

use super::{PARENTS_PATH, SchoolHealthApi, SpreadsheetTransfer};
use crate::ClientResult;
use crate::http::{DownloadedFile, HttpClient, UploadFile};

pub const PARENTS_TRANSFER: SpreadsheetTransfer = SpreadsheetTransfer::new(PARENTS_PATH, "parents");

impl<H: HttpClient + 'static> SchoolHealthApi<H> {
    pub async fn parents(&self, query: &ListQuery) -> ClientResult<ListResponse<Parent>> {
        self.list(PARENTS_PATH, query).await
    }

    pub async fn create_parent(&self, payload: &ParentCreate) -> ClientResult<Parent> {
        let parent: Parent = self.create(PARENTS_PATH, payload).await?;
        info!(id = %parent.id, "Parent created");
        Ok(parent)
    }

    pub async fn delete_parent(&self, id: &str) -> ClientResult<Option<String>> {
        self.remove(PARENTS_PATH, id).await
    }

    pub async fn parents_template(&self) -> ClientResult<DownloadedFile> {
        PARENTS_TRANSFER.template(self.http.as_ref()).await
    }

    pub async fn import_parents(&self, file: UploadFile) -> ClientResult<ImportSummary> {
        PARENTS_TRANSFER.import(self.http.as_ref(), file).await
    }

    pub async fn export_parents(&self, query: &ListQuery) -> ClientResult<DownloadedFile> {
        PARENTS_TRANSFER.export(self.http.as_ref(), query).await
    }
}
