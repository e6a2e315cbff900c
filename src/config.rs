use crate::errors::{Error, Result};
use std::env;

/// Application configuration, built once at startup and injected into the
/// bot and database layers.
///
/// The Discord bot token is deliberately not part of this struct; it is read
/// from the environment directly before client construction and never stored.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Filesystem path of the SQLite database.
    pub database_path: String,
    /// Guild the slash commands are registered in.
    pub guild_id: u64,
    /// Role required to run the flag-management commands.
    pub admin_role_id: u64,
    /// Channel the flag-management commands must be invoked from.
    pub admin_channel_id: u64,
    /// Channel where first-time solves are announced.
    pub solve_channel_id: u64,
}

impl AppConfig {
    /// Builds the configuration from environment variables, typically after
    /// a `.env` file has been loaded.
    pub fn from_env() -> Result<Self> {
        tracing::debug!("Loading application configuration from the environment");
        Ok(AppConfig {
            database_path: required_var("DATABASE_PATH")?,
            guild_id: required_id("GUILD_ID")?,
            admin_role_id: required_id("ADMIN_ROLE_ID")?,
            admin_channel_id: required_id("ADMIN_CHANNEL_ID")?,
            solve_channel_id: required_id("SOLVE_CHANNEL_ID")?,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable {}", name)))
}

fn required_id(name: &str) -> Result<u64> {
    let raw = required_var(name)?;
    parse_id(name, &raw)
}

fn parse_id(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|e| {
        Error::Config(format!(
            "Failed to parse {} as a numeric Discord ID (got {:?}): {}",
            name, raw, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_snowflake() {
        let parsed = parse_id("GUILD_ID", "123456789012345678").expect("should parse");
        assert_eq!(parsed, 123_456_789_012_345_678);
    }

    #[test]
    fn test_parse_id_trims_whitespace() {
        let parsed = parse_id("ADMIN_ROLE_ID", " 42\n").expect("should parse");
        assert_eq!(parsed, 42);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let result = parse_id("SOLVE_CHANNEL_ID", "not-a-number");
        assert!(
            matches!(result, Err(Error::Config(_))),
            "Non-numeric IDs should produce a configuration error."
        );
    }

    #[test]
    fn test_required_var_missing_is_config_error() {
        let result = required_var("FLAGKEEPER_TEST_UNSET_VARIABLE");
        assert!(
            matches!(result, Err(Error::Config(_))),
            "A missing variable should produce a configuration error, not a panic."
        );
    }
}
