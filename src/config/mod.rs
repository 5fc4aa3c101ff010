/// Database configuration and connection management
pub mod database;

/// Household and user seed data loaded from config.toml
pub mod seed;

/// Server and AI provider settings from environment variables
pub mod settings;
