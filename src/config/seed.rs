//! Household and user seed data loaded from config.toml
//!
//! Users are not created through the HTTP API. Instead the households and people that
//! share a `MacroBuddy` instance are listed in a TOML file and seeded on start-up.
//! Seeding is idempotent, so the file can stay in place across restarts.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the seed file.
pub const DEFAULT_SEED_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct SeedConfig {
    /// Households to create
    #[serde(default)]
    pub houses: Vec<HouseConfig>,
    /// Users to create
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

/// Configuration for a single household
#[derive(Debug, Deserialize, Clone)]
pub struct HouseConfig {
    /// Name of the household
    pub name: String,
}

/// Configuration for a single user
#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    /// Display name of the user
    pub name: String,
    /// Name of the household the user belongs to, if any
    #[serde(default)]
    pub house: Option<String>,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_seed_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read seed file: {e}"),
    })?;

    parse_seed_config(&contents)
}

/// Parses seed configuration from TOML text.
pub fn parse_seed_config(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed file from `path` when it exists.
///
/// A missing file is not an error; it means there is nothing to seed.
pub fn load_optional_seed_config<P: AsRef<Path>>(path: P) -> Result<Option<SeedConfig>> {
    if path.as_ref().exists() {
        load_seed_config(path).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_seed_config() {
        let toml_str = r#"
            [[houses]]
            name = "Default House"

            [[users]]
            name = "Alex"
            house = "Default House"

            [[users]]
            name = "Sam"
        "#;

        let config = parse_seed_config(toml_str).unwrap();
        assert_eq!(config.houses.len(), 1);
        assert_eq!(config.houses[0].name, "Default House");
        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users[0].house.as_deref(), Some("Default House"));
        assert!(config.users[1].house.is_none());
    }

    #[test]
    fn test_parse_empty_seed_config() {
        let config = parse_seed_config("").unwrap();
        assert!(config.houses.is_empty());
        assert!(config.users.is_empty());
    }

    #[test]
    fn test_parse_invalid_seed_config() {
        let result = parse_seed_config("[[users]]\nhouse = 3");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_missing_seed_file_is_none() {
        let result = load_optional_seed_config("does/not/exist/config.toml").unwrap();
        assert!(result.is_none());
    }
}
