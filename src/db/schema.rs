use crate::errors::{Error, Result};
use rusqlite::Connection;
use tracing::{debug, info, instrument};

#[instrument(skip(conn))]
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    debug!("Executing CREATE TABLE statements if tables do not exist.");
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS flags (
            flag TEXT NOT NULL,
            challenge_id TEXT NOT NULL,
            timestamp DATETIME NOT NULL
        );

        CREATE TABLE IF NOT EXISTS challenges (
            challenge_id TEXT NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS solves (
            challenge_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            timestamp DATETIME NOT NULL
        );

        -- At most one solve per (challenge_id, user_id); solve insertion
        -- relies on this index for conflict detection.
        CREATE UNIQUE INDEX IF NOT EXISTS idx_unique_solve_per_user
            ON solves(challenge_id, user_id);

        COMMIT;",
    )
    .map_err(|e| Error::StorageInit(format!("Failed to create tables: {}", e)))?;
    info!("Database tables ensured (solve uniqueness enforced by index).");
    Ok(())
}
