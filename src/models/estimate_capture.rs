//! Estimate capture record
//!
//! One row of the capture history: where the envelope and photo files live,
//! when the capture happened, and whether it was submitted to the backend.
//! Records are append-only; the only mutation in normal operation is the
//! monotonic `is_submitted` flip on confirmed submission.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DbResult;

/// A persisted capture awaiting (or past) submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateCapture {
    pub session_id: Uuid,
    pub json_path: PathBuf,
    pub photo_path: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub is_submitted: bool,
    pub initial_weight: f64,
}

impl EstimateCapture {
    /// Create a fresh, unsubmitted capture record
    pub fn new(json_path: PathBuf, photo_path: PathBuf, initial_weight: f64) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            json_path,
            photo_path,
            timestamp: Utc::now(),
            is_submitted: false,
            initial_weight,
        }
    }

    /// Create an EstimateCapture from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let session_id: String = row.get("session_id")?;
        let timestamp: String = row.get("timestamp")?;
        Ok(Self {
            session_id: Uuid::parse_str(&session_id).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            json_path: PathBuf::from(row.get::<_, String>("json_path")?),
            photo_path: PathBuf::from(row.get::<_, String>("photo_path")?),
            timestamp: DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?
                .with_timezone(&Utc),
            is_submitted: row.get("is_submitted")?,
            initial_weight: row.get("initial_weight")?,
        })
    }

    /// Insert this capture into the history
    pub fn insert(conn: &Connection, capture: &EstimateCapture) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO captures (
                session_id, json_path, photo_path, timestamp, is_submitted, initial_weight
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                capture.session_id.to_string(),
                capture.json_path.to_string_lossy().into_owned(),
                capture.photo_path.to_string_lossy().into_owned(),
                capture.timestamp.to_rfc3339(),
                capture.is_submitted,
                capture.initial_weight,
            ],
        )?;
        Ok(())
    }

    /// Get a capture by session id
    pub fn get_by_session(conn: &Connection, session_id: Uuid) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM captures WHERE session_id = ?1")?;
        let result = stmt.query_row([session_id.to_string()], Self::from_row);
        match result {
            Ok(capture) => Ok(Some(capture)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List the whole capture history, newest first
    pub fn list_all(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM captures ORDER BY timestamp DESC")?;
        let captures = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(captures)
    }

    /// Update a capture keyed by session identity. Returns the number of
    /// affected rows (0 when the session is unknown).
    pub fn update(conn: &Connection, capture: &EstimateCapture) -> DbResult<usize> {
        let affected = conn.execute(
            r#"
            UPDATE captures
            SET json_path = ?2, photo_path = ?3, timestamp = ?4,
                is_submitted = ?5, initial_weight = ?6
            WHERE session_id = ?1
            "#,
            params![
                capture.session_id.to_string(),
                capture.json_path.to_string_lossy().into_owned(),
                capture.photo_path.to_string_lossy().into_owned(),
                capture.timestamp.to_rfc3339(),
                capture.is_submitted,
                capture.initial_weight,
            ],
        )?;
        Ok(affected)
    }

    /// Flip `is_submitted` to true in a single UPDATE, atomic relative to
    /// concurrent history reads. Returns the number of affected rows.
    pub fn mark_submitted(conn: &Connection, session_id: Uuid) -> DbResult<usize> {
        let affected = conn.execute(
            "UPDATE captures SET is_submitted = 1 WHERE session_id = ?1",
            [session_id.to_string()],
        )?;
        Ok(affected)
    }
}
