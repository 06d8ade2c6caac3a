//! Configuration module
//!
//! Intake limits are fixed defaults that can be overridden from the
//! environment (`.env` files honored). The type whitelist is not
//! runtime-configurable.

use std::env;

use crate::validation::{default_type_rules, TypeRule};

const MAX_FILE_SIZE_MB: u64 = 10;
const MAX_TOTAL_SIZE_MB: u64 = 100;

/// Intake configuration: per-file cap, aggregate cap, and the type whitelist.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub max_file_size_bytes: u64,
    pub max_total_size_bytes: u64,
    pub allowed_types: Vec<TypeRule>,
}

impl IntakeConfig {
    /// Load the configuration, with `MAX_FILE_SIZE_MB` / `MAX_TOTAL_SIZE_MB`
    /// environment overrides.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let max_total_size_mb = env::var("MAX_TOTAL_SIZE_MB")
            .unwrap_or_else(|_| MAX_TOTAL_SIZE_MB.to_string())
            .parse()
            .unwrap_or(MAX_TOTAL_SIZE_MB);

        Self {
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_total_size_bytes: max_total_size_mb * 1024 * 1024,
            allowed_types: default_type_rules(),
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            max_total_size_bytes: MAX_TOTAL_SIZE_MB * 1024 * 1024,
            allowed_types: default_type_rules(),
        }
    }
}
