//! DuckDB-backed schema catalog.

use super::queries;
use super::SchemaCatalog;
use crate::erd::error::ErdError;
use crate::erd::types::{Column, ForeignKeyEdge};
use duckdb::{params, params_from_iter, Connection};
use std::fmt;
use std::path::{Path, PathBuf};

/// DuckDB's default namespace
pub const DEFAULT_SCHEMA: &str = "main";

const IN_MEMORY: &str = ":memory:";

/// Where the schema lives
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatabaseTarget {
    /// Fresh in-memory database
    #[default]
    InMemory,
    /// Database file on disk
    File(PathBuf),
}

impl DatabaseTarget {
    /// Parse a database location.
    ///
    /// Accepts a plain path, a `duckdb://` URL, or `:memory:` / an empty
    /// string for an in-memory database.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let s = s.strip_prefix("duckdb://").unwrap_or(s);
        if s.is_empty() || s == IN_MEMORY {
            DatabaseTarget::InMemory
        } else {
            DatabaseTarget::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseTarget::InMemory => write!(f, "{}", IN_MEMORY),
            DatabaseTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Schema catalog over a DuckDB connection
pub struct DuckDbCatalog {
    conn: Connection,
    schema: String,
    target: String,
}

impl DuckDbCatalog {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> Result<Self, ErdError> {
        let target = path.display().to_string();
        let conn = Connection::open(path).map_err(|source| ErdError::Connect {
            target: target.clone(),
            source,
        })?;
        Ok(Self::from_connection(conn).with_target(target))
    }

    /// Open an empty in-memory database
    pub fn open_in_memory() -> Result<Self, ErdError> {
        let conn = Connection::open_in_memory().map_err(|source| ErdError::Connect {
            target: IN_MEMORY.to_string(),
            source,
        })?;
        Ok(Self::from_connection(conn).with_target(IN_MEMORY))
    }

    pub fn connect(target: &DatabaseTarget) -> Result<Self, ErdError> {
        match target {
            DatabaseTarget::InMemory => Self::open_in_memory(),
            DatabaseTarget::File(path) => Self::open(path),
        }
    }

    /// Wrap a connection the caller already owns
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            schema: DEFAULT_SCHEMA.to_string(),
            target: "<connection>".to_string(),
        }
    }

    /// Introspect a namespace other than `main`
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Human-readable location of the database
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the underlying DuckDB connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Another handle on the same database, for use from another thread
    pub fn try_clone(&self) -> Result<Self, ErdError> {
        let conn = self.conn.try_clone().map_err(|source| ErdError::Connect {
            target: self.target.clone(),
            source,
        })?;
        Ok(Self {
            conn,
            schema: self.schema.clone(),
            target: self.target.clone(),
        })
    }

    fn query_columns(&self, sql: &str, args: &[&str], key: bool) -> duckdb::Result<Vec<Column>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(args), |row| {
            let name: String = row.get(0)?;
            let data_type: String = row.get(1)?;
            Ok(if key {
                Column::key(name, data_type)
            } else {
                Column::new(name, data_type)
            })
        })?;
        let columns = rows.collect::<duckdb::Result<Vec<_>>>()?;
        Ok(columns)
    }
}

impl fmt::Debug for DuckDbCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuckDbCatalog")
            .field("target", &self.target)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl SchemaCatalog for DuckDbCatalog {
    type Error = duckdb::Error;

    fn list_tables(&self) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self.conn.prepare(queries::TABLES)?;
        let rows = stmt.query_map(params![self.schema], |row| row.get::<_, String>(0))?;
        let tables = rows.collect::<duckdb::Result<Vec<_>>>()?;
        Ok(tables)
    }

    fn list_all_columns(&self, table: &str) -> Result<Vec<Column>, Self::Error> {
        self.query_columns(queries::ALL_COLUMNS, &[self.schema.as_str(), table], false)
    }

    fn list_key_columns(&self, table: &str) -> Result<Vec<Column>, Self::Error> {
        self.query_columns(
            queries::KEY_COLUMNS,
            &[self.schema.as_str(), table, self.schema.as_str(), table],
            true,
        )
    }

    fn list_foreign_keys(&self, tables: &[String]) -> Result<Vec<ForeignKeyEdge>, Self::Error> {
        if tables.is_empty() {
            return Ok(Vec::new());
        }

        let sql = queries::foreign_keys(tables.len());
        let args = std::iter::once(self.schema.as_str())
            .chain(tables.iter().map(String::as_str))
            .chain(tables.iter().map(String::as_str));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args), |row| {
            Ok(ForeignKeyEdge {
                table: row.get(0)?,
                column: row.get(1)?,
                foreign_table: row.get(2)?,
                foreign_column: row.get(3)?,
            })
        })?;
        let edges = rows.collect::<duckdb::Result<Vec<_>>>()?;
        Ok(edges)
    }
}
