// ==========================================
// BQC Generator - dashboard statistics repository
// ==========================================
// Read-only aggregates over procurement_submission.
// Rule: aggregation is done in SQL, no business rules here
// ==========================================

use crate::domain::dashboard::{CountBucket, DashboardStats, MonthlyCount, RecentSubmission};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// Rows returned in `DashboardStats::recent`
pub const RECENT_LIMIT: i64 = 10;

pub struct StatsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StatsRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// All dashboard aggregates in one lock
    pub fn dashboard_stats(&self) -> RepositoryResult<DashboardStats> {
        let conn = self.get_conn()?;

        let (total_submissions, total_users, total_cec_incl_gst) = conn.query_row(
            r#"
            SELECT COUNT(*), COUNT(DISTINCT user_id), COALESCE(SUM(cec_incl_gst), 0)
            FROM procurement_submission
            "#,
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(DashboardStats {
            total_submissions,
            total_users,
            total_cec_incl_gst,
            by_tender_type: buckets(&conn, "tender_type")?,
            by_methodology: buckets(&conn, "evaluation_methodology")?,
            monthly: monthly(&conn)?,
            recent: recent(&conn, RECENT_LIMIT)?,
        })
    }
}

/// Group by one of the fixed classification columns
fn buckets(conn: &Connection, column: &'static str) -> RepositoryResult<Vec<CountBucket>> {
    // column is one of two compile-time names, never user input
    let sql = format!(
        r#"
        SELECT {col}, COUNT(*), COALESCE(SUM(cec_incl_gst), 0)
        FROM procurement_submission
        GROUP BY {col}
        ORDER BY COUNT(*) DESC, {col} ASC
        "#,
        col = column
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CountBucket {
                label: row.get(0)?,
                count: row.get(1)?,
                total_cec_incl_gst: row.get(2)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

fn monthly(conn: &Connection) -> RepositoryResult<Vec<MonthlyCount>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT substr(created_at, 1, 7) AS month, COUNT(*)
        FROM procurement_submission
        GROUP BY month
        ORDER BY month ASC
        "#,
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(MonthlyCount {
                month: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

fn recent(conn: &Connection, limit: i64) -> RepositoryResult<Vec<RecentSubmission>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, user_id, ref_number, description, tender_type, cec_incl_gst, created_at
        FROM procurement_submission
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?1
        "#,
    )?;
    let rows = stmt
        .query_map(params![limit], |row| {
            Ok(RecentSubmission {
                id: row.get(0)?,
                user_id: row.get(1)?,
                ref_number: row.get(2)?,
                description: row.get(3)?,
                tender_type: row.get(4)?,
                cec_incl_gst: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}
