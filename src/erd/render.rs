//! Mermaid erDiagram serialization.
//!
//! The literal tokens here are read by downstream Mermaid renderers, so the
//! layout is fixed: tab indentation, one column per line (type then name),
//! and every relationship drawn as many-to-one.

use crate::erd::error::ErdError;
use crate::erd::types::MetadataSnapshot;
use std::fmt;

/// Diagram header line
pub const HEADER: &str = "erDiagram";

/// Crow's-foot token for a many-to-one relationship, "many" side first
pub const MANY_TO_ONE: &str = "}o--||";

/// Glyph between referencing and referenced column in edge labels
pub const ARROW: &str = "➝";

/// Display adapter that writes a snapshot as Mermaid markup
pub struct Diagram<'a>(pub &'a MetadataSnapshot);

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;

        writeln!(f, "{}", HEADER)?;
        writeln!(f, "\tdirection {}", snapshot.direction())?;

        for table in snapshot.tables() {
            writeln!(f, "\t{} {{", table.name)?;
            for col in &table.columns {
                writeln!(f, "\t\t{} {}", col.data_type, col.name)?;
            }
            writeln!(f, "\t}}")?;
        }

        for edge in snapshot.foreign_keys() {
            writeln!(
                f,
                "\t{} {} {} : \"{} {} {}\"",
                edge.table, MANY_TO_ONE, edge.foreign_table, edge.column, ARROW, edge.foreign_column
            )?;
        }

        Ok(())
    }
}

/// Render a snapshot to a string
pub fn render(snapshot: &MetadataSnapshot) -> String {
    Diagram(snapshot).to_string()
}

/// Write a snapshot into any formatter sink
pub fn write_diagram<W: fmt::Write>(snapshot: &MetadataSnapshot, out: &mut W) -> Result<(), ErdError> {
    write!(out, "{}", Diagram(snapshot)).map_err(ErdError::Render)
}
