//! Staff management.

use shared::models::{ImportSummary, Staff, StaffCreate};
use shared::{ListQuery, ListResponse};
use tracing::info;

use super::{STAFF_PATH, SchoolHealthApi, SpreadsheetTransfer};
use crate::ClientResult;
use crate::http::{DownloadedFile, HttpClient, UploadFile};

pub const STAFF_TRANSFER: SpreadsheetTransfer = SpreadsheetTransfer::new(STAFF_PATH, "staff");

impl<H: HttpClient + 'static> SchoolHealthApi<H> {
    pub async fn staff(&self, query: &ListQuery) -> ClientResult<ListResponse<Staff>> {
        self.list(STAFF_PATH, query).await
    }

    pub async fn create_staff(&self, payload: &StaffCreate) -> ClientResult<Staff> {
        let staff: Staff = self.create(STAFF_PATH, payload).await?;
        info!(id = %staff.id, role = %staff.role, "Staff created");
        Ok(staff)
    }

    pub async fn delete_staff(&self, id: &str) -> ClientResult<Option<String>> {
        self.remove(STAFF_PATH, id).await
    }

    pub async fn staff_template(&self) -> ClientResult<DownloadedFile> {
        STAFF_TRANSFER.template(self.http.as_ref()).await
    }

    pub async fn import_staff(&self, file: UploadFile) -> ClientResult<ImportSummary> {
        STAFF_TRANSFER.import(self.http.as_ref(), file).await
    }

    pub async fn export_staff(&self, query: &ListQuery) -> ClientResult<DownloadedFile> {
        STAFF_TRANSFER.export(self.http.as_ref(), query).await
    }
}
