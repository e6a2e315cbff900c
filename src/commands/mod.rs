pub mod ctf;
mod general;

pub use ctf::{add_flag, create_challenge, remove_flag, submit_flag};
pub use general::ping;
