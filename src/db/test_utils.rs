#![allow(dead_code)]
use crate::db::{DbPool, schema};
use crate::errors::{Error, Result};
use crate::models::{Challenge, FlagEntry, Solve};
use rusqlite::{Connection, params};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")), // Default to TRACE for tests if RUST_LOG is not set
        )
        .with_test_writer() // Crucial for `cargo test` output
        .try_init(); // Use try_init to avoid panic if already initialized
}

// Helper to create an in-memory DbPool for testing.
// Uses the real schema so constraint behavior matches production.
pub(crate) async fn setup_test_db() -> Result<DbPool> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::Database(format!("Test DB: Failed to open in-memory: {}", e)))?;
    schema::create_tables(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

// Fetch helpers below read rows back directly for test verification,
// bypassing the public operations under test.

pub(crate) fn get_flags_for_challenge_for_test(
    pool: &DbPool,
    challenge_id: &str,
) -> Result<Vec<FlagEntry>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Test DB: Failed to acquire lock".to_string()))?;
    let mut stmt = conn
        .prepare_cached("SELECT flag, challenge_id, timestamp FROM flags WHERE challenge_id = ?1")?;
    let rows = stmt.query_map(params![challenge_id], |row| {
        Ok(FlagEntry {
            flag: row.get(0)?,
            challenge_id: row.get(1)?,
            timestamp: row.get(2)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

pub(crate) fn get_solves_for_challenge_for_test(
    pool: &DbPool,
    challenge_id: &str,
) -> Result<Vec<Solve>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Test DB: Failed to acquire lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "SELECT challenge_id, user_id, timestamp FROM solves WHERE challenge_id = ?1",
    )?;
    let rows = stmt.query_map(params![challenge_id], |row| {
        Ok(Solve {
            challenge_id: row.get(0)?,
            user_id: row.get(1)?,
            timestamp: row.get(2)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

pub(crate) fn get_challenges_by_id_for_test(
    pool: &DbPool,
    challenge_id: &str,
) -> Result<Vec<Challenge>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Test DB: Failed to acquire lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "SELECT challenge_id, name, category, description FROM challenges WHERE challenge_id = ?1",
    )?;
    let rows = stmt.query_map(params![challenge_id], |row| {
        Ok(Challenge {
            challenge_id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            description: row.get(3)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

pub(crate) fn count_all_flags_for_test(pool: &DbPool) -> Result<i64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Test DB: Failed to acquire lock".to_string()))?;
    let count = conn.query_row("SELECT COUNT(*) FROM flags", [], |row| row.get(0))?;
    Ok(count)
}

pub(crate) fn count_all_solves_for_test(pool: &DbPool) -> Result<i64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Test DB: Failed to acquire lock".to_string()))?;
    let count = conn.query_row("SELECT COUNT(*) FROM solves", [], |row| row.get(0))?;
    Ok(count)
}
