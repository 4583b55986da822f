/// Backing-file location from the environment
pub mod storage;

/// Seed restaurants loaded from config.toml
pub mod restaurants;
