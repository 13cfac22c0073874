// ==========================================
// BQC Generator - api layer
// ==========================================
// Responsibility: use-case facades returning ApiResult,
// called by the HTTP handlers in app::http_routes
// ==========================================

pub mod dashboard_api;
pub mod document_api;
pub mod error;
pub mod procurement_api;
pub mod validator;

pub use dashboard_api::DashboardApi;
pub use document_api::{document_filename, DocumentApi, GenerateDocumentRequest, GeneratedDocument};
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use procurement_api::ProcurementApi;
pub use validator::ProcurementValidator;
