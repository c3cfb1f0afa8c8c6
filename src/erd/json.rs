//! JSON format output for extracted metadata.

use crate::erd::types::{ForeignKeyEdge, MetadataSnapshot, Table};
use serde::Serialize;

/// JSON representation of a snapshot
#[derive(Debug, Serialize)]
pub struct ErdJson<'a> {
    pub direction: &'a str,
    pub tables: &'a [Table],
    pub relationships: &'a [ForeignKeyEdge],
    pub stats: ErdStats,
}

/// ERD statistics
#[derive(Debug, Serialize)]
pub struct ErdStats {
    pub table_count: usize,
    pub column_count: usize,
    pub relationship_count: usize,
}

/// Build the JSON structure
pub fn build_erd_json(snapshot: &MetadataSnapshot) -> ErdJson<'_> {
    ErdJson {
        direction: snapshot.direction(),
        tables: snapshot.tables(),
        relationships: snapshot.foreign_keys(),
        stats: ErdStats {
            table_count: snapshot.table_count(),
            column_count: snapshot.column_count(),
            relationship_count: snapshot.edge_count(),
        },
    }
}

/// Generate pretty-printed JSON from a snapshot
pub fn to_json(snapshot: &MetadataSnapshot) -> String {
    serde_json::to_string_pretty(&build_erd_json(snapshot)).unwrap_or_else(|_| "{}".to_string())
}
