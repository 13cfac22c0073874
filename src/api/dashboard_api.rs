// ==========================================
// BQC Generator - admin dashboard API
// ==========================================
// Aggregate statistics, admin role only
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::dashboard::DashboardStats;
use crate::domain::types::UserRole;
use crate::i18n::t;
use crate::perf::PerfGuard;
use crate::repository::stats_repo::StatsRepository;
use std::sync::Arc;

pub struct DashboardApi {
    stats_repo: Arc<StatsRepository>,
}

impl DashboardApi {
    pub fn new(stats_repo: Arc<StatsRepository>) -> Self {
        Self { stats_repo }
    }

    /// # Returns
    /// - Err(ApiError::Forbidden) unless the caller is an admin
    pub fn get_stats(&self, role: UserRole) -> ApiResult<DashboardStats> {
        if role != UserRole::Admin {
            return Err(ApiError::Forbidden(t("auth.admin_only")));
        }

        let _perf = PerfGuard::new("dashboard_stats");
        let stats = self.stats_repo.dashboard_stats()?;
        tracing::debug!(
            total_submissions = stats.total_submissions,
            total_users = stats.total_users,
            "dashboard stats loaded"
        );
        Ok(stats)
    }
}
