//! Spreadsheet template, import and export.

use shared::models::ImportSummary;
use shared::{ApiResponse, ListQuery};
use tracing::info;

use super::expect_data;
use crate::ClientResult;
use crate::http::{DownloadedFile, HttpClient, UploadFile};

/// Template/import/export endpoints under one resource path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadsheetTransfer {
    base_path: &'static str,
    file_stem: &'static str,
}

impl SpreadsheetTransfer {
    pub const fn new(base_path: &'static str, file_stem: &'static str) -> Self {
        Self {
            base_path,
            file_stem,
        }
    }

    pub fn template_path(&self) -> String {
        format!("{}/template", self.base_path)
    }

    pub fn import_path(&self) -> String {
        format!("{}/import", self.base_path)
    }

    pub fn export_path(&self) -> String {
        format!("{}/export", self.base_path)
    }

    /// Empty workbook with the expected columns
    pub async fn template<H: HttpClient>(&self, http: &H) -> ClientResult<DownloadedFile> {
        let fallback = format!("{}_template.xlsx", self.file_stem);
        http.download(&self.template_path(), &[], &fallback).await
    }

    /// Upload a filled workbook. Rows are validated server-side; the
    /// summary says which ones were stored.
    pub async fn import<H: HttpClient>(
        &self,
        http: &H,
        file: UploadFile,
    ) -> ClientResult<ImportSummary> {
        let filename = file.filename.clone();
        let response: ApiResponse<ImportSummary> = http.upload(&self.import_path(), file).await?;
        let summary = expect_data(response)?;
        info!(
            file = %filename,
            total = summary.total_rows,
            success = summary.success_rows,
            errors = summary.error_rows,
            "Spreadsheet imported"
        );
        Ok(summary)
    }

    /// Export the records matching `query` (search, sort and filters;
    /// paging is ignored by the backend)
    pub async fn export<H: HttpClient>(
        &self,
        http: &H,
        query: &ListQuery,
    ) -> ClientResult<DownloadedFile> {
        let fallback = format!("{}_export.xlsx", self.file_stem);
        let pairs: Vec<_> = query
            .to_query_pairs()
            .into_iter()
            .filter(|(k, _)| k != "pageIndex" && k != "pageSize")
            .collect();
        http.download(&self.export_path(), &pairs, &fallback).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let transfer = SpreadsheetTransfer::new("api/staff", "staff");
        assert_eq!(transfer.template_path(), "api/staff/template");
        assert_eq!(transfer.import_path(), "api/staff/import");
        assert_eq!(transfer.export_path(), "api/staff/export");
    }
}
