// ==========================================
// BQC Generator - application state
// ==========================================
// Responsibility: wire repositories and APIs over one shared
// SQLite connection; handed to the router as explicit state
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, DocumentApi, ProcurementApi};
use crate::config::AppConfig;
use crate::db::{init_schema, open_sqlite_connection};
use crate::perf::install_sqlite_tracing;
use crate::repository::procurement_store::ProcurementStore;
use crate::repository::{ProcurementRepository, StatsRepository};

/// Shared state, cheap to clone (every field is an Arc)
#[derive(Clone)]
pub struct AppState {
    /// Database path
    pub db_path: String,

    /// Submission save/list/get/delete
    pub procurement_api: Arc<ProcurementApi>,

    /// Document generation
    pub document_api: Arc<DocumentApi>,

    /// Admin statistics
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// Build the state from configuration
    ///
    /// # Arguments
    /// - config: db_path and SQL trace settings are used here
    ///
    /// # Returns
    /// - Ok(AppState)
    /// - Err(String): the database could not be opened or initialised
    pub fn new(config: &AppConfig) -> Result<Self, String> {
        tracing::info!(db_path = %config.db_path, "initialising AppState");

        let mut conn = open_sqlite_connection(&config.db_path)
            .map_err(|e| format!("cannot open database {}: {}", config.db_path, e))?;
        install_sqlite_tracing(&mut conn, config.sql_trace);
        init_schema(&conn).map_err(|e| format!("schema initialisation failed: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // repositories
        // ==========================================
        let store: Arc<dyn ProcurementStore> =
            Arc::new(ProcurementRepository::from_connection(conn.clone()));
        let stats_repo = Arc::new(StatsRepository::from_connection(conn));

        // ==========================================
        // APIs
        // ==========================================
        let state = Self {
            db_path: config.db_path.clone(),
            procurement_api: Arc::new(ProcurementApi::new(store)),
            document_api: Arc::new(DocumentApi::new()),
            dashboard_api: Arc::new(DashboardApi::new(stats_repo)),
        };

        tracing::info!("AppState ready");
        Ok(state)
    }
}
