use crate::db::DbPool;
use crate::errors::{Error, Result};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, info, instrument};

/// Inserts a new challenge row.
///
/// There is no uniqueness guard on `challenge_id`: creating the same ID
/// twice produces two rows, and later lookups return the first match.
///
/// # Errors
///
/// Returns `Error::Database` if the database lock cannot be acquired, or
/// `Error::Rusqlite` if the insert fails.
#[instrument(skip(pool, description))]
pub async fn create_challenge(
    pool: &DbPool,
    challenge_id: &str,
    name: &str,
    category: &str,
    description: &str,
) -> Result<()> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO challenges (challenge_id, name, category, description)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![challenge_id, name, category, description])?;
    info!("Created challenge '{}' ('{}')", challenge_id, name);
    Ok(())
}

/// Looks up the display name of a challenge.
///
/// Returns `Ok(None)` when no challenge with that ID exists; the miss is a
/// normal outcome, not an error.
///
/// # Errors
///
/// Returns `Error::Database` if the database lock cannot be acquired, or
/// `Error::Rusqlite` if the query fails.
#[instrument(skip(pool))]
pub async fn get_challenge_name(pool: &DbPool, challenge_id: &str) -> Result<Option<String>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached("SELECT name FROM challenges WHERE challenge_id = ?1")?;
    let name: Option<String> = stmt
        .query_row(params![challenge_id], |row| row.get(0))
        .optional()?;
    debug!("Challenge name for '{}': {:?}", challenge_id, name);
    Ok(name)
}
