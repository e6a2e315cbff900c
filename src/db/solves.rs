use crate::db::DbPool;
use crate::errors::{Error, Result};
use chrono::Utc;
use rusqlite::params;
use tracing::{info, instrument};

/// Outcome of recording a solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveAttempt {
    /// First solve of this challenge by this user; a row was inserted.
    Inserted,
    /// The (challenge, user) pair already had a solve on record.
    AlreadySolved,
}

/// Records that a user solved a challenge, at most once per
/// (challenge, user) pair.
///
/// The check and the insert are a single statement: the unique index on
/// `solves(challenge_id, user_id)` turns a duplicate into a no-op conflict,
/// so concurrent submissions of the same pair cannot both insert.
///
/// # Errors
///
/// Returns `Error::Database` if the database lock cannot be acquired, or
/// `Error::Rusqlite` if the insert fails for any reason other than the
/// duplicate conflict.
#[instrument(skip(pool))]
pub async fn add_solve(pool: &DbPool, challenge_id: &str, user_id: &str) -> Result<SolveAttempt> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO solves (challenge_id, user_id, timestamp) VALUES (?1, ?2, ?3)
         ON CONFLICT(challenge_id, user_id) DO NOTHING",
    )?;
    let rows_inserted = stmt.execute(params![challenge_id, user_id, Utc::now()])?;

    if rows_inserted == 0 {
        info!(
            "User {} already has a solve for challenge '{}'",
            user_id, challenge_id
        );
        Ok(SolveAttempt::AlreadySolved)
    } else {
        info!(
            "Recorded solve of challenge '{}' by user {}",
            challenge_id, user_id
        );
        Ok(SolveAttempt::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::{
        count_all_solves_for_test, get_solves_for_challenge_for_test, init_test_tracing,
        setup_test_db,
    };
    use crate::db::{add_flag, create_challenge, get_challenge_name, query_solve_target};
    use crate::errors::Result;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_solve_inserts_second_is_already_solved() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db().await?;

        let first = add_solve(&db_pool, "web1", "u1").await?;
        assert_eq!(first, SolveAttempt::Inserted);

        let second = add_solve(&db_pool, "web1", "u1").await?;
        assert_eq!(
            second,
            SolveAttempt::AlreadySolved,
            "A repeat submission must not insert a second row."
        );

        let solves = get_solves_for_challenge_for_test(&db_pool, "web1")?;
        assert_eq!(solves.len(), 1);
        assert_eq!(solves[0].user_id, "u1");
        Ok(())
    }

    #[tokio::test]
    async fn test_distinct_users_and_challenges_insert_independently() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db().await?;

        assert_eq!(
            add_solve(&db_pool, "web1", "u1").await?,
            SolveAttempt::Inserted
        );
        assert_eq!(
            add_solve(&db_pool, "web1", "u2").await?,
            SolveAttempt::Inserted,
            "Different users may each solve the same challenge once."
        );
        assert_eq!(
            add_solve(&db_pool, "crypto1", "u1").await?,
            SolveAttempt::Inserted,
            "The same user may solve different challenges."
        );

        assert_eq!(count_all_solves_for_test(&db_pool)?, 3);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_insert_exactly_once() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db().await?;

        let mut handles = Vec::new();
        for _ in 0..16 {
            let pool = Arc::clone(&db_pool);
            handles.push(tokio::spawn(async move {
                add_solve(&pool, "web1", "u1").await
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            let attempt = handle.await.expect("solve task panicked")?;
            if attempt == SolveAttempt::Inserted {
                inserted += 1;
            }
        }

        assert_eq!(
            inserted, 1,
            "Exactly one of the concurrent submissions may insert."
        );
        assert_eq!(
            count_all_solves_for_test(&db_pool)?,
            1,
            "Concurrent duplicates must not produce extra rows."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_solve_with_hostile_ids_round_trips_verbatim() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db().await?;

        let hostile_challenge = "web1'); DELETE FROM solves; --";
        let hostile_user = "u1' OR '1'='1";

        assert_eq!(
            add_solve(&db_pool, hostile_challenge, hostile_user).await?,
            SolveAttempt::Inserted
        );
        assert_eq!(
            add_solve(&db_pool, hostile_challenge, hostile_user).await?,
            SolveAttempt::AlreadySolved,
            "The conflict must match on the literal values."
        );

        let solves = get_solves_for_challenge_for_test(&db_pool, hostile_challenge)?;
        assert_eq!(solves.len(), 1);
        assert_eq!(solves[0].user_id, hostile_user);
        Ok(())
    }

    // End-to-end store flow behind /submit-flag: resolve the flag, record
    // the solve, and look up the name used in the announcement.
    #[tokio::test]
    async fn test_full_submission_flow_across_tables() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db().await?;

        create_challenge(&db_pool, "web1", "Warmup", "", "").await?;
        add_flag(&db_pool, "flag{abc}", "web1").await?;

        // u1 submits a valid flag for the first time.
        let challenge_id = query_solve_target(&db_pool, "flag{abc}")
            .await?
            .expect("the flag should be valid");
        assert_eq!(challenge_id, "web1");
        assert_eq!(
            add_solve(&db_pool, &challenge_id, "u1").await?,
            SolveAttempt::Inserted
        );
        assert_eq!(
            get_challenge_name(&db_pool, &challenge_id).await?,
            Some("Warmup".to_string()),
            "The announcement name should resolve."
        );

        // u1 resubmits: no new row, no second announcement.
        assert_eq!(
            add_solve(&db_pool, &challenge_id, "u1").await?,
            SolveAttempt::AlreadySolved
        );

        // u2 submits the same flag: independent first solve.
        assert_eq!(
            add_solve(&db_pool, &challenge_id, "u2").await?,
            SolveAttempt::Inserted
        );

        assert_eq!(count_all_solves_for_test(&db_pool)?, 2);

        // An invalid flag resolves to no challenge at all.
        assert!(query_solve_target(&db_pool, "flag{bogus}").await?.is_none());
        Ok(())
    }
}
