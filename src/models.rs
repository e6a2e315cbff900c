use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Row in the `challenges` table. The challenge_id is an opaque external
// identifier; nothing enforces its uniqueness at the schema level, and
// lookups use first-match semantics.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Challenge {
    pub challenge_id: String,
    pub name: String,
    pub category: String,    // Empty until the create flow collects it
    pub description: String, // Empty until the create flow collects it
}

// Row in the `flags` table. A challenge may carry any number of valid
// flags, and a flag string is not required to be unique across challenges.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FlagEntry {
    pub flag: String,
    pub challenge_id: String,
    pub timestamp: DateTime<Utc>,
}

// Row in the `solves` table. At most one row exists per
// (challenge_id, user_id) pair, enforced by a unique index.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Solve {
    pub challenge_id: String,
    pub user_id: String, // Discord user ID of the solver
    pub timestamp: DateTime<Utc>,
}
