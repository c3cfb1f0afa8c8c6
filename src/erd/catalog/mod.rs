//! Schema introspection behind a backend-neutral interface.
//!
//! The extractor only ever talks to [`SchemaCatalog`]. Each of the four
//! operations can be answered differently per backend without touching the
//! extraction logic; [`DuckDbCatalog`] is the bundled implementation.

mod duckdb;
mod queries;

pub use self::duckdb::{DatabaseTarget, DuckDbCatalog, DEFAULT_SCHEMA};

use crate::erd::types::{Column, ForeignKeyEdge};

/// The four schema queries the extractor needs.
pub trait SchemaCatalog {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All table names in the catalog's default namespace, in a stable order
    fn list_tables(&self) -> Result<Vec<String>, Self::Error>;

    /// Every column of `table`, ordered by ordinal position
    fn list_all_columns(&self, table: &str) -> Result<Vec<Column>, Self::Error>;

    /// Columns of `table` that belong to a primary or foreign key, ordered
    /// by ordinal position, each column at most once
    fn list_key_columns(&self, table: &str) -> Result<Vec<Column>, Self::Error>;

    /// Foreign key column pairs whose constrained table or referenced table
    /// is in `tables`
    fn list_foreign_keys(&self, tables: &[String]) -> Result<Vec<ForeignKeyEdge>, Self::Error>;
}

impl<C: SchemaCatalog + ?Sized> SchemaCatalog for &C {
    type Error = C::Error;

    fn list_tables(&self) -> Result<Vec<String>, Self::Error> {
        (**self).list_tables()
    }

    fn list_all_columns(&self, table: &str) -> Result<Vec<Column>, Self::Error> {
        (**self).list_all_columns(table)
    }

    fn list_key_columns(&self, table: &str) -> Result<Vec<Column>, Self::Error> {
        (**self).list_key_columns(table)
    }

    fn list_foreign_keys(&self, tables: &[String]) -> Result<Vec<ForeignKeyEdge>, Self::Error> {
        (**self).list_foreign_keys(tables)
    }
}
