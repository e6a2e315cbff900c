use crate::db::DbPool;
use crate::errors::{Error, Result};
use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, info, instrument};

/// Records a new valid flag for a challenge.
///
/// No referential check happens here; callers are expected to verify the
/// challenge exists first. A challenge may accumulate any number of flags.
///
/// # Errors
///
/// Returns `Error::Database` if the database lock cannot be acquired, or
/// `Error::Rusqlite` if the insert fails.
#[instrument(skip(pool, flag))]
pub async fn add_flag(pool: &DbPool, flag: &str, challenge_id: &str) -> Result<()> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn
        .prepare_cached("INSERT INTO flags (flag, challenge_id, timestamp) VALUES (?1, ?2, ?3)")?;
    stmt.execute(params![flag, challenge_id, Utc::now()])?;
    info!("Added a flag for challenge '{}'", challenge_id);
    Ok(())
}

/// Deletes every flag attached to a challenge.
///
/// Deleting zero rows is success, not an error; the returned count is for
/// logging and verification.
///
/// # Errors
///
/// Returns `Error::Database` if the database lock cannot be acquired, or
/// `Error::Rusqlite` if the delete fails.
#[instrument(skip(pool))]
pub async fn remove_flags(pool: &DbPool, challenge_id: &str) -> Result<usize> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let rows_deleted = conn.execute(
        "DELETE FROM flags WHERE challenge_id = ?1",
        params![challenge_id],
    )?;
    info!(
        "Removed {} flag(s) for challenge '{}'",
        rows_deleted, challenge_id
    );
    Ok(rows_deleted)
}

/// Resolves a submitted flag to the challenge it belongs to.
///
/// Returns `Ok(None)` when no flag matches. If the same flag string was
/// registered for several challenges, the first matching row wins.
///
/// # Errors
///
/// Returns `Error::Database` if the database lock cannot be acquired, or
/// `Error::Rusqlite` if the query fails.
#[instrument(skip(pool, flag))]
pub async fn query_solve_target(pool: &DbPool, flag: &str) -> Result<Option<String>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached("SELECT challenge_id FROM flags WHERE flag = ?1")?;
    let challenge_id: Option<String> = stmt
        .query_row(params![flag], |row| row.get(0))
        .optional()?;
    debug!("Flag lookup resolved to challenge: {:?}", challenge_id);
    Ok(challenge_id)
}
