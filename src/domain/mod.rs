// ==========================================
// BQC Generator - domain layer
// ==========================================
// Entities and types only: no data access, no business rules
// ==========================================

pub mod dashboard;
pub mod procurement;
pub mod types;

pub use dashboard::{CountBucket, DashboardStats, MonthlyCount, RecentSubmission};
pub use procurement::{
    ApprovalChain, ExplanatoryNote, LotRecord, ProcurementRecord, Signatory, SubmissionSummary,
};
pub use types::{DocumentFormat, Divisibility, EvaluationMethodology, TenderType, UserRole};
