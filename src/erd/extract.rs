//! Metadata extraction: resolve tables, fetch columns and relationships.

use crate::erd::catalog::SchemaCatalog;
use crate::erd::error::ErdError;
use crate::erd::types::{Column, ForeignKeyEdge, MetadataSnapshot, Table};
use ahash::AHashSet;

/// Builds a [`MetadataSnapshot`] from a schema catalog.
///
/// Queries are issued sequentially: one table listing, one column query per
/// resolved table, then at most one foreign key query. Any failure aborts
/// the whole extraction.
#[derive(Debug)]
pub struct Extractor<C> {
    catalog: C,
}

impl<C: SchemaCatalog> Extractor<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Extract a snapshot for `requested` tables (all tables when empty).
    pub fn extract(
        &self,
        requested: &[String],
        direction: &str,
        include_all_columns: bool,
    ) -> Result<MetadataSnapshot, ErdError> {
        let names = self.resolve_tables(requested)?;

        let mut tables = Vec::with_capacity(names.len());
        for name in &names {
            let columns = self.fetch_columns(name, include_all_columns)?;
            tables.push(Table {
                name: name.clone(),
                columns,
            });
        }

        let foreign_keys = if names.is_empty() {
            Vec::new()
        } else {
            self.fetch_foreign_keys(&names)?
        };

        Ok(MetadataSnapshot::new(direction, tables, foreign_keys))
    }

    /// Catalog tables that were requested, in catalog order. Unknown names
    /// are dropped; an empty request selects every table.
    pub fn resolve_tables(&self, requested: &[String]) -> Result<Vec<String>, ErdError> {
        let listed = self
            .catalog
            .list_tables()
            .map_err(|e| ErdError::ListTables(Box::new(e)))?;

        let wanted: Option<AHashSet<&str>> = if requested.is_empty() {
            None
        } else {
            Some(requested.iter().map(String::as_str).collect())
        };

        let mut seen = AHashSet::with_capacity(listed.len());
        Ok(listed
            .into_iter()
            .filter(|name| wanted.as_ref().map_or(true, |w| w.contains(name.as_str())))
            .filter(|name| seen.insert(name.clone()))
            .collect())
    }

    fn fetch_columns(&self, table: &str, include_all_columns: bool) -> Result<Vec<Column>, ErdError> {
        let result = if include_all_columns {
            self.catalog.list_all_columns(table)
        } else {
            self.catalog.list_key_columns(table)
        };
        result.map_err(|e| ErdError::FetchColumns {
            table: table.to_string(),
            source: Box::new(e),
        })
    }

    fn fetch_foreign_keys(&self, tables: &[String]) -> Result<Vec<ForeignKeyEdge>, ErdError> {
        let edges = self
            .catalog
            .list_foreign_keys(tables)
            .map_err(|e| ErdError::FetchForeignKeys(Box::new(e)))?;
        Ok(dedup_edges(edges))
    }
}

/// Drop repeated edges, keeping the first occurrence of each tuple.
fn dedup_edges(edges: Vec<ForeignKeyEdge>) -> Vec<ForeignKeyEdge> {
    let mut seen = AHashSet::with_capacity(edges.len());
    edges
        .into_iter()
        .filter(|edge| seen.insert(edge.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, thiserror::Error)]
    #[error("catalog unavailable")]
    struct Unavailable;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Fail {
        Tables,
        Columns(&'static str),
        ForeignKeys,
    }

    #[derive(Default)]
    struct FakeCatalog {
        tables: Vec<&'static str>,
        edges: Vec<ForeignKeyEdge>,
        fail: Option<Fail>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeCatalog {
        fn shop() -> Self {
            Self {
                tables: vec!["customers", "orders", "products"],
                edges: vec![
                    ForeignKeyEdge::new("orders", "customer_id", "customers", "id"),
                    ForeignKeyEdge::new("orders", "customer_id", "customers", "id"),
                    ForeignKeyEdge::new("reviews", "product_id", "products", "id"),
                ],
                ..Default::default()
            }
        }

        fn failing(fail: Fail) -> Self {
            Self {
                fail: Some(fail),
                ..Self::shop()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl SchemaCatalog for FakeCatalog {
        type Error = Unavailable;

        fn list_tables(&self) -> Result<Vec<String>, Unavailable> {
            self.calls.borrow_mut().push("tables".into());
            if self.fail == Some(Fail::Tables) {
                return Err(Unavailable);
            }
            Ok(self.tables.iter().map(|t| t.to_string()).collect())
        }

        fn list_all_columns(&self, table: &str) -> Result<Vec<Column>, Unavailable> {
            self.calls.borrow_mut().push(format!("all:{table}"));
            if matches!(self.fail, Some(Fail::Columns(t)) if t == table) {
                return Err(Unavailable);
            }
            Ok(vec![
                Column::new("id", "INTEGER"),
                Column::new("label", "VARCHAR"),
            ])
        }

        fn list_key_columns(&self, table: &str) -> Result<Vec<Column>, Unavailable> {
            self.calls.borrow_mut().push(format!("keys:{table}"));
            if matches!(self.fail, Some(Fail::Columns(t)) if t == table) {
                return Err(Unavailable);
            }
            Ok(vec![Column::key("id", "INTEGER")])
        }

        fn list_foreign_keys(&self, tables: &[String]) -> Result<Vec<ForeignKeyEdge>, Unavailable> {
            self.calls.borrow_mut().push(format!("fks:{}", tables.join(",")));
            if self.fail == Some(Fail::ForeignKeys) {
                return Err(Unavailable);
            }
            Ok(self
                .edges
                .iter()
                .filter(|e| tables.contains(&e.table) || tables.contains(&e.foreign_table))
                .cloned()
                .collect())
        }
    }

    fn names(snapshot: &MetadataSnapshot) -> Vec<&str> {
        snapshot.tables().iter().map(|t| t.name.as_str()).collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_request_selects_all_tables() {
        let extractor = Extractor::new(FakeCatalog::shop());
        let snapshot = extractor.extract(&[], "LR", false).unwrap();
        assert_eq!(names(&snapshot), vec!["customers", "orders", "products"]);
        assert_eq!(snapshot.direction(), "LR");
    }

    #[test]
    fn test_requested_tables_follow_catalog_order() {
        let extractor = Extractor::new(FakeCatalog::shop());
        let snapshot = extractor
            .extract(&strings(&["orders", "customers"]), "TB", false)
            .unwrap();
        assert_eq!(names(&snapshot), vec!["customers", "orders"]);
    }

    #[test]
    fn test_duplicate_and_unknown_names() {
        let extractor = Extractor::new(FakeCatalog::shop());
        let snapshot = extractor
            .extract(&strings(&["orders", "nope", "orders"]), "LR", false)
            .unwrap();
        assert_eq!(names(&snapshot), vec!["orders"]);
    }

    #[test]
    fn test_only_unknown_names_skip_relationship_query() {
        let catalog = FakeCatalog::shop();
        let extractor = Extractor::new(&catalog);
        let snapshot = extractor
            .extract(&strings(&["missing"]), "LR", false)
            .unwrap();

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.edge_count(), 0);
        assert_eq!(catalog.calls(), vec!["tables"]);
    }

    #[test]
    fn test_column_policy_selects_query() {
        let catalog = FakeCatalog::shop();
        let extractor = Extractor::new(&catalog);

        extractor.extract(&strings(&["orders"]), "LR", false).unwrap();
        extractor.extract(&strings(&["orders"]), "LR", true).unwrap();

        assert_eq!(
            catalog.calls(),
            vec![
                "tables",
                "keys:orders",
                "fks:orders",
                "tables",
                "all:orders",
                "fks:orders"
            ]
        );
    }

    #[test]
    fn test_key_columns_flagged() {
        let extractor = Extractor::new(FakeCatalog::shop());
        let snapshot = extractor.extract(&strings(&["orders"]), "LR", false).unwrap();
        let orders = snapshot.table("orders").unwrap();
        assert!(orders.columns.iter().all(|c| c.is_key));
    }

    #[test]
    fn test_edges_deduplicated_and_inclusive() {
        let extractor = Extractor::new(FakeCatalog::shop());
        let snapshot = extractor
            .extract(&strings(&["customers", "products"]), "LR", false)
            .unwrap();

        assert_eq!(
            snapshot.foreign_keys(),
            &[
                ForeignKeyEdge::new("orders", "customer_id", "customers", "id"),
                ForeignKeyEdge::new("reviews", "product_id", "products", "id"),
            ]
        );
    }

    #[test]
    fn test_table_listing_failure() {
        let extractor = Extractor::new(FakeCatalog::failing(Fail::Tables));
        let err = extractor.extract(&[], "LR", false).unwrap_err();
        assert!(matches!(err, ErdError::ListTables(_)));
    }

    #[test]
    fn test_column_failure_names_table() {
        let catalog = FakeCatalog::failing(Fail::Columns("orders"));
        let extractor = Extractor::new(&catalog);
        let err = extractor.extract(&[], "LR", true).unwrap_err();

        assert!(matches!(err, ErdError::FetchColumns { .. }));
        assert_eq!(err.table(), Some("orders"));
        assert_eq!(err.to_string(), "failed to load columns for table orders");
        // stops at the failing table
        assert!(!catalog.calls().iter().any(|c| c.starts_with("fks:")));
    }

    #[test]
    fn test_relationship_failure() {
        let extractor = Extractor::new(FakeCatalog::failing(Fail::ForeignKeys));
        let err = extractor.extract(&[], "LR", false).unwrap_err();
        assert!(matches!(err, ErdError::FetchForeignKeys(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let a = ForeignKeyEdge::new("a", "x", "b", "id");
        let c = ForeignKeyEdge::new("c", "y", "b", "id");
        let deduped = dedup_edges(vec![a.clone(), c.clone(), a.clone()]);
        assert_eq!(deduped, vec![a, c]);
    }
}
