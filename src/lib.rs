// ==========================================
// BQC Generator - core library
// ==========================================
// Produces "Bid Qualification Criteria" documents for public
// procurement and keeps users' saved form submissions.
// Stack: axum + Rust + SQLite
// ==========================================

// i18n initialisation
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Engine layer - derived values and document assembly
pub mod engine;

// Document model and OOXML writer
pub mod document;

// Repository layer - data access
pub mod repository;

// Configuration
pub mod config;

// Database infrastructure (connection init, PRAGMAs, schema)
pub mod db;

// Logging
pub mod logging;

// Performance tracing
pub mod perf;

// i18n
pub mod i18n;

// API layer - use cases
pub mod api;

// Application layer - HTTP integration
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    ApprovalChain, Divisibility, DocumentFormat, EvaluationMethodology, ExplanatoryNote,
    LotRecord, ProcurementRecord, Signatory, SubmissionSummary, TenderType, UserRole,
};

pub use engine::{calculate, render_document, CalculatedValues, DocumentPipeline};

pub use document::{write_docx, Document, RenderError};

pub use api::{ApiError, ApiResult, DashboardApi, DocumentApi, ProcurementApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "BQC Generator";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
