//! Error type for the extraction and rendering pipeline.

use std::fmt;
use thiserror::Error;

/// Boxed error raised by a schema catalog backend
pub type CatalogError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building or rendering a diagram.
///
/// Every variant names the phase that failed; the underlying backend error
/// is kept as the source.
#[derive(Debug, Error)]
pub enum ErdError {
    /// The data source could not be opened
    #[error("failed to open database {target}")]
    Connect {
        target: String,
        #[source]
        source: duckdb::Error,
    },

    /// Table listing failed
    #[error("failed to load tables")]
    ListTables(#[source] CatalogError),

    /// Column listing failed for one table
    #[error("failed to load columns for table {table}")]
    FetchColumns {
        table: String,
        #[source]
        source: CatalogError,
    },

    /// Foreign key listing failed
    #[error("failed to load foreign keys")]
    FetchForeignKeys(#[source] CatalogError),

    /// The output sink rejected the diagram text
    #[error("failed to render ER diagram")]
    Render(#[source] fmt::Error),
}

impl ErdError {
    /// Table the failure is tagged with, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            ErdError::FetchColumns { table, .. } => Some(table),
            _ => None,
        }
    }
}
