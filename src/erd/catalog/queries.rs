//! Introspection SQL for DuckDB.
//!
//! All queries are scoped to `current_database()` and bind the namespace as
//! their first parameter.

/// Table names in a namespace
pub const TABLES: &str = "
    SELECT table_name
    FROM information_schema.tables
    WHERE table_catalog = current_database()
      AND table_schema = ?
    ORDER BY table_name";

/// Every column of one table. Params: schema, table.
pub const ALL_COLUMNS: &str = "
    SELECT column_name, data_type
    FROM information_schema.columns
    WHERE table_catalog = current_database()
      AND table_schema = ?
      AND table_name = ?
    ORDER BY ordinal_position";

/// Primary and foreign key columns of one table. Params: schema, table,
/// schema, table.
pub const KEY_COLUMNS: &str = "
    WITH key_columns AS (
      SELECT DISTINCT column_name
      FROM (
        SELECT unnest(constraint_column_names) AS column_name
        FROM duckdb_constraints()
        WHERE database_name = current_database()
          AND schema_name = ?
          AND table_name = ?
          AND constraint_type IN ('PRIMARY KEY', 'FOREIGN KEY')
      )
    )
    SELECT c.column_name, c.data_type
    FROM information_schema.columns c
    JOIN key_columns k ON k.column_name = c.column_name
    WHERE c.table_catalog = current_database()
      AND c.table_schema = ?
      AND c.table_name = ?
    ORDER BY c.ordinal_position";

/// Foreign keys touching a table set. The two `{tables}` slots are expanded
/// by [`foreign_keys`]; params: schema, then the set twice.
const FOREIGN_KEYS: &str = "
    SELECT DISTINCT table_name, column_name, foreign_table, foreign_column
    FROM (
      SELECT
        table_name,
        unnest(constraint_column_names) AS column_name,
        referenced_table AS foreign_table,
        unnest(referenced_column_names) AS foreign_column
      FROM duckdb_constraints()
      WHERE constraint_type = 'FOREIGN KEY'
        AND database_name = current_database()
        AND schema_name = ?
        AND (table_name IN ({tables}) OR referenced_table IN ({tables}))
    )
    ORDER BY table_name, column_name, foreign_table, foreign_column";

/// Build the foreign key query for a set of `count` tables.
///
/// `count` must be non-zero; `IN ()` is not valid SQL.
pub fn foreign_keys(count: usize) -> String {
    let placeholders = vec!["?"; count].join(", ");
    FOREIGN_KEYS.replace("{tables}", &placeholders)
}
