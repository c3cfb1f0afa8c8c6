//! YAML configuration for the generate command.
//!
//! Every field is optional; command-line flags take precedence over the
//! file, and the file over the environment.
//!
//! ```yaml
//! database: data/shop.duckdb
//! schema: main
//! direction: TB
//! include_all_columns: false
//! tables:
//!   - customers
//!   - orders
//! ```

use crate::erd::{DatabaseTarget, ErdRequest, DEFAULT_SCHEMA};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable naming the database when no flag or config does
pub const DATABASE_ENV: &str = "DATABASE_URL";

/// Complete YAML configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErdConfig {
    /// Database file (or `:memory:`)
    pub database: Option<String>,
    /// Namespace to introspect
    pub schema: Option<String>,
    /// Default layout direction
    pub direction: Option<String>,
    /// Default column policy
    pub include_all_columns: Option<bool>,
    /// Default table selection
    pub tables: Vec<String>,
}

impl ErdConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Request built from the config's defaults
    pub fn request(&self) -> ErdRequest {
        let defaults = ErdRequest::default();
        ErdRequest {
            table_names: self.tables.clone(),
            direction: self.direction.clone().unwrap_or(defaults.direction),
            include_all_columns: self.include_all_columns.unwrap_or(defaults.include_all_columns),
        }
    }

    /// Namespace to introspect
    pub fn schema(&self) -> &str {
        self.schema.as_deref().unwrap_or(DEFAULT_SCHEMA)
    }

    /// Resolve the database: explicit flag, then config, then `env`.
    ///
    /// `env` is the value of [`DATABASE_ENV`], if set.
    pub fn database_target(&self, flag: Option<&str>, env: Option<&str>) -> DatabaseTarget {
        flag.or(self.database.as_deref())
            .or(env)
            .map(DatabaseTarget::parse)
            .unwrap_or_default()
    }
}
