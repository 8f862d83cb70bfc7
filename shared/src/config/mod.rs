use std::env;

use crate::error::{Result, StoreError};

/// Table used when `DYNAMODB_TABLE` is not set
pub const DEFAULT_TABLE_NAME: &str = "user-table";

pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE";
pub const ENDPOINT_VAR: &str = "DYNAMODB_ENDPOINT";

/// Store settings read from the process environment at cold start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub table_name: String,
    /// Endpoint override, e.g. `http://localhost:8000` for DynamoDB local
    pub endpoint_url: Option<String>,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup, so tests don't have to touch the
    /// real process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = lookup(TABLE_NAME_VAR).unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        if table_name.trim().is_empty() {
            return Err(StoreError::Configuration(format!(
                "{} must not be empty",
                TABLE_NAME_VAR
            )));
        }

        let endpoint_url = lookup(ENDPOINT_VAR).filter(|url| !url.trim().is_empty());

        Ok(Self {
            table_name,
            endpoint_url,
        })
    }
}
