// ==========================================
// BQC Generator - procurement submission API
// ==========================================
// Save / list / get / delete for an authenticated user.
// The store is injected; nothing here holds ambient state.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::ProcurementValidator;
use crate::domain::procurement::{ProcurementRecord, SubmissionSummary};
use crate::i18n::t_with_args;
use crate::perf::PerfGuard;
use crate::repository::procurement_store::ProcurementStore;
use std::sync::Arc;
use tracing::instrument;

pub struct ProcurementApi {
    store: Arc<dyn ProcurementStore>,
    validator: ProcurementValidator,
}

impl ProcurementApi {
    pub fn new(store: Arc<dyn ProcurementStore>) -> Self {
        Self {
            store,
            validator: ProcurementValidator::new(),
        }
    }

    /// Validate then upsert on (user_id, ref_number)
    ///
    /// # Returns
    /// - Ok(id): id of the stored submission
    /// - Err(ApiError::ValidationError): payload rejected
    #[instrument(skip(self, record), fields(ref_number = %record.ref_number))]
    pub fn save(&self, user_id: &str, record: &ProcurementRecord) -> ApiResult<String> {
        let _perf = PerfGuard::new("save_submission");
        let user_id = require_user(user_id)?;
        self.validator.validate(record)?;

        let id = self
            .store
            .upsert(user_id, record.ref_number.trim(), record)?;
        tracing::info!(user_id, id = %id, "submission saved");
        Ok(id)
    }

    pub fn list(&self, user_id: &str) -> ApiResult<Vec<SubmissionSummary>> {
        let _perf = PerfGuard::new("list_submissions");
        let user_id = require_user(user_id)?;
        Ok(self.store.list(user_id)?)
    }

    pub fn get(&self, user_id: &str, id: &str) -> ApiResult<ProcurementRecord> {
        let _perf = PerfGuard::new("get_submission");
        let user_id = require_user(user_id)?;
        self.store
            .fetch(user_id, id)?
            .ok_or_else(|| not_found(id))
    }

    pub fn delete(&self, user_id: &str, id: &str) -> ApiResult<()> {
        let _perf = PerfGuard::new("delete_submission");
        let user_id = require_user(user_id)?;
        if self.store.delete(user_id, id)? {
            tracing::info!(user_id, id, "submission deleted");
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

fn require_user(user_id: &str) -> ApiResult<&str> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        Err(ApiError::Unauthenticated)
    } else {
        Ok(user_id)
    }
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(t_with_args("procurement.not_found", &[("id", id)]))
}
