pub mod challenges;
pub mod connection;
pub mod flags;
pub(crate) mod schema;
pub mod solves;
pub(crate) mod test_utils;

pub use challenges::{create_challenge, get_challenge_name};
pub use connection::{DbPool, init_db};
pub use flags::{add_flag, query_solve_target, remove_flags};
pub use solves::{SolveAttempt, add_solve};
