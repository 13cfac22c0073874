// ==========================================
// BQC Generator - repository layer
// ==========================================
// Responsibility: data access only, no business rules
// Rule: every query is parameterised
// ==========================================

pub mod error;
pub mod procurement_repo;
pub mod procurement_store;
pub mod stats_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use procurement_repo::ProcurementRepository;
pub use procurement_store::ProcurementStore;
pub use stats_repo::StatsRepository;
