//! Metadata snapshot types shared by extraction and rendering.

use serde::Serialize;

/// A column as reported by the schema catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Backend-reported type name, printed verbatim
    #[serde(rename = "type")]
    pub data_type: String,
    /// Fetched under the key-columns policy
    pub is_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_key: false,
        }
    }

    /// A column that participates in a primary or foreign key
    pub fn key(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            is_key: true,
            ..Self::new(name, data_type)
        }
    }
}

/// A table and its columns in ordinal order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// A foreign key relationship: `table.column` references
/// `foreign_table.foreign_column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ForeignKeyEdge {
    /// Constrained (child) table
    pub table: String,
    /// Constrained column
    pub column: String,
    /// Referenced (parent) table
    pub foreign_table: String,
    /// Referenced column
    pub foreign_column: String,
}

impl ForeignKeyEdge {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            foreign_table: foreign_table.into(),
            foreign_column: foreign_column.into(),
        }
    }
}

/// Everything needed to render one diagram.
///
/// Built once per request by the extractor and never mutated afterwards:
/// table names are unique and edges are deduplicated by full tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataSnapshot {
    direction: String,
    tables: Vec<Table>,
    foreign_keys: Vec<ForeignKeyEdge>,
}

impl MetadataSnapshot {
    pub(crate) fn new(
        direction: impl Into<String>,
        tables: Vec<Table>,
        foreign_keys: Vec<ForeignKeyEdge>,
    ) -> Self {
        Self {
            direction: direction.into(),
            tables,
            foreign_keys,
        }
    }

    /// Layout direction token, passed through as given
    pub fn direction(&self) -> &str {
        &self.direction
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn foreign_keys(&self) -> &[ForeignKeyEdge] {
        &self.foreign_keys
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.foreign_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
