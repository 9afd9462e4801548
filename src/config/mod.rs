/// Database connection and table creation
pub mod database;

/// Server settings from `registry.toml` and the environment
pub mod settings;
