// ==========================================
// BQC Generator - ProcurementStore trait
// ==========================================
// Persistence collaborator seen by the api layer.
// Implementor: ProcurementRepository (rusqlite)
// Rule: every operation is scoped to the owning user
// ==========================================

use crate::domain::procurement::{ProcurementRecord, SubmissionSummary};
use crate::repository::error::RepositoryResult;

pub trait ProcurementStore: Send + Sync {
    /// Insert or update the submission keyed on (user_id, ref_number)
    ///
    /// # Returns
    /// - Ok(id): id of the inserted or updated row
    fn upsert(
        &self,
        user_id: &str,
        ref_number: &str,
        record: &ProcurementRecord,
    ) -> RepositoryResult<String>;

    /// Owner-scoped fetch; Ok(None) when missing or owned by someone else
    fn fetch(&self, user_id: &str, id: &str) -> RepositoryResult<Option<ProcurementRecord>>;

    /// Summaries of the user's submissions, newest first
    fn list(&self, user_id: &str) -> RepositoryResult<Vec<SubmissionSummary>>;

    /// true only when a row owned by the user was removed
    fn delete(&self, user_id: &str, id: &str) -> RepositoryResult<bool>;
}
