// ==========================================
// BQC Generator - admin dashboard model
// ==========================================

use serde::{Deserialize, Serialize};

/// One labelled count (tender type / methodology bucket)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountBucket {
    pub label: String,
    pub count: i64,
    /// Sum of CEC incl. GST in the bucket (Crore)
    pub total_cec_incl_gst: f64,
}

/// Submissions created in one calendar month (`YYYY-MM`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

/// Latest submissions across all users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmission {
    pub id: String,
    pub user_id: String,
    pub ref_number: String,
    pub description: Option<String>,
    pub tender_type: String,
    pub cec_incl_gst: f64,
    pub created_at: String,
}

/// Aggregate statistics for the admin dashboard
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_submissions: i64,
    pub total_users: i64,
    pub total_cec_incl_gst: f64,
    pub by_tender_type: Vec<CountBucket>,
    pub by_methodology: Vec<CountBucket>,
    pub monthly: Vec<MonthlyCount>,
    pub recent: Vec<RecentSubmission>,
}
