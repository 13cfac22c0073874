// ==========================================
// BQC Generator - document generation API
// ==========================================
// Entry point for { data, format } requests:
// format check → pipeline → file name + content type
// Rule: read-and-render only, never touches persistence
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::procurement::ProcurementRecord;
use crate::domain::types::DocumentFormat;
use crate::engine::formatting::format_file_date;
use crate::engine::normalizer::text_or_na;
use crate::engine::pipeline::DocumentPipeline;
use crate::i18n::{t, t_with_args};
use crate::perf::PerfGuard;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

fn default_format() -> String {
    "docx".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDocumentRequest {
    pub data: ProcurementRecord,
    #[serde(default = "default_format")]
    pub format: String,
}

/// Rendered file plus the metadata the transport needs
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

// ==========================================
// DocumentApi
// ==========================================
pub struct DocumentApi {
    pipeline: DocumentPipeline,
}

impl Default for DocumentApi {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentApi {
    pub fn new() -> Self {
        Self {
            pipeline: DocumentPipeline::new(),
        }
    }

    pub fn with_pipeline(pipeline: DocumentPipeline) -> Self {
        Self { pipeline }
    }

    /// Generate using today's local date in the file name
    pub fn generate(&self, request: &GenerateDocumentRequest) -> ApiResult<GeneratedDocument> {
        self.generate_on(request, Local::now().date_naive())
    }

    /// # Arguments
    /// - request: record snapshot and requested format
    /// - date: generation date used in the file name
    ///
    /// # Returns
    /// - Err(ApiError::UnsupportedFormat) for anything but docx
    /// - Err(ApiError::RenderFailed) when assembly or serialization fails
    #[instrument(skip(self, request), fields(ref_number = %request.data.ref_number, format = %request.format))]
    pub fn generate_on(
        &self,
        request: &GenerateDocumentRequest,
        date: NaiveDate,
    ) -> ApiResult<GeneratedDocument> {
        let _perf = PerfGuard::new("generate_document");

        let format = DocumentFormat::parse(&request.format).ok_or_else(|| {
            ApiError::UnsupportedFormat(t_with_args(
                "document.unsupported_format",
                &[("format", request.format.trim())],
            ))
        })?;

        let bytes = self.pipeline.run(&request.data).map_err(|e| {
            tracing::error!(error = %e, "document generation failed");
            ApiError::RenderFailed(t("document.render_failed"))
        })?;

        Ok(GeneratedDocument {
            filename: document_filename(&request.data.ref_number, date, format),
            content_type: format.content_type(),
            bytes,
        })
    }
}

/// `BQC_<refNumber>_<dd-mm-yyyy>.<ext>` with filename-unsafe characters replaced by `_`
pub fn document_filename(ref_number: &str, date: NaiveDate, format: DocumentFormat) -> String {
    format!(
        "BQC_{}_{}.{}",
        sanitize_filename_part(&text_or_na(Some(ref_number))),
        format_file_date(date),
        format.extension()
    )
}

fn sanitize_filename_part(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 9).unwrap()
    }

    #[test]
    fn test_filename_sanitized() {
        assert_eq!(
            document_filename("MM/GDS:2024*17", date(), DocumentFormat::Docx),
            "BQC_MM_GDS_2024_17_09-07-2024.docx"
        );
        assert_eq!(
            document_filename("  ", date(), DocumentFormat::Docx),
            "BQC_N_A_09-07-2024.docx"
        );
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let api = DocumentApi::new();
        let request = GenerateDocumentRequest {
            data: ProcurementRecord::default(),
            format: "pdf".to_string(),
        };
        let err = api.generate_on(&request, date()).unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_request_format_defaults_to_docx() {
        let request: GenerateDocumentRequest =
            serde_json::from_str(r#"{ "data": { "refNumber": "R1" } }"#).unwrap();
        assert_eq!(request.format, "docx");
        assert_eq!(request.data.ref_number, "R1");
    }
}
