// ==========================================
// BQC Generator - procurement submission repository
// ==========================================
// Table: procurement_submission
// Natural key: (user_id, ref_number), surrogate id: UUID v4
// Rule: the full record is kept as JSON; a few columns are
//       denormalised for listing and statistics
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::procurement::{ProcurementRecord, SubmissionSummary};
use crate::engine::calculator::total_cec_incl_gst;
use crate::perf::{install_sqlite_tracing, SqlTraceSettings};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::procurement_store::ProcurementStore;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Sortable UTC timestamp, microsecond precision
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

// ==========================================
// ProcurementRepository
// ==========================================
pub struct ProcurementRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProcurementRepository {
    /// Open (and if needed create) the database at `db_path`
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let mut conn = open_sqlite_connection(db_path)?;
        install_sqlite_tracing(&mut conn, SqlTraceSettings::from_env());
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Wrap a shared connection; the schema must already exist
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Upsert with an explicit clock (seeding and tests)
    pub fn upsert_at(
        &self,
        user_id: &str,
        ref_number: &str,
        record: &ProcurementRecord,
        now: DateTime<Utc>,
    ) -> RepositoryResult<String> {
        let ref_number = ref_number.trim();
        if ref_number.is_empty() {
            return Err(RepositoryError::ValidationError(
                "ref_number must not be empty".to_string(),
            ));
        }

        // bookkeeping lives in columns, not in the payload
        let mut payload = record.clone();
        payload.id = None;
        payload.user_id = None;
        payload.created_at = None;
        payload.updated_at = None;
        payload.ref_number = ref_number.to_string();
        let payload_json = serde_json::to_string(&payload)?;

        let stamp = timestamp(now);
        let conn = self.get_conn()?;
        let id: String = conn.query_row(
            r#"
            INSERT INTO procurement_submission (
                id, user_id, ref_number, description,
                tender_type, evaluation_methodology, cec_incl_gst,
                payload_json, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            ON CONFLICT (user_id, ref_number) DO UPDATE SET
                description = excluded.description,
                tender_type = excluded.tender_type,
                evaluation_methodology = excluded.evaluation_methodology,
                cec_incl_gst = excluded.cec_incl_gst,
                payload_json = excluded.payload_json,
                updated_at = excluded.updated_at
            RETURNING id
            "#,
            params![
                Uuid::new_v4().to_string(),
                user_id,
                ref_number,
                payload.description,
                payload.tender_type.to_db_str(),
                payload.evaluation_methodology.to_db_str(),
                total_cec_incl_gst(&payload),
                payload_json,
                stamp,
            ],
            |row| row.get(0),
        )?;

        tracing::debug!(user_id, ref_number, id = %id, "submission upserted");
        Ok(id)
    }

    /// Number of stored submissions across all users
    pub fn count_all(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM procurement_submission", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }
}

impl ProcurementStore for ProcurementRepository {
    fn upsert(
        &self,
        user_id: &str,
        ref_number: &str,
        record: &ProcurementRecord,
    ) -> RepositoryResult<String> {
        self.upsert_at(user_id, ref_number, record, Utc::now())
    }

    fn fetch(&self, user_id: &str, id: &str) -> RepositoryResult<Option<ProcurementRecord>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT id, user_id, payload_json, created_at, updated_at
                FROM procurement_submission
                WHERE id = ?1 AND user_id = ?2
                "#,
                params![id, user_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, owner, payload_json, created_at, updated_at)) = row else {
            return Ok(None);
        };

        let mut record: ProcurementRecord = serde_json::from_str(&payload_json)?;
        record.id = Some(id);
        record.user_id = Some(owner);
        record.created_at = Some(created_at);
        record.updated_at = Some(updated_at);
        Ok(Some(record))
    }

    fn list(&self, user_id: &str) -> RepositoryResult<Vec<SubmissionSummary>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, ref_number, description, created_at
            FROM procurement_submission
            WHERE user_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(SubmissionSummary {
                    id: row.get(0)?,
                    ref_number: row.get(1)?,
                    description: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }

    fn delete(&self, user_id: &str, id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM procurement_submission WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(affected > 0)
    }
}
