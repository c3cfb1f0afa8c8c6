//! Request-level entry point: extract metadata, then render it.

use crate::erd::catalog::SchemaCatalog;
use crate::erd::error::ErdError;
use crate::erd::extract::Extractor;
use crate::erd::render::write_diagram;
use crate::erd::types::MetadataSnapshot;
use schemars::{schema_for, JsonSchema, Schema};
use serde::{Deserialize, Serialize};

/// Name under which the generator is registered as a tool
pub const TOOL_NAME: &str = "ERD Generator";

/// Tool description shown to callers
pub const TOOL_DESCRIPTION: &str = "Generate Mermaid erDiagram markup from a database schema";

/// Layout used when the request does not name one
pub const DEFAULT_DIRECTION: &str = "LR";

/// Layout tokens Mermaid understands
pub const DIRECTIONS: [&str; 4] = ["LR", "TB", "RL", "BT"];

/// Input parameters for diagram generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ErdRequest {
    /// List of tables to generate mermaid diagram for.
    pub table_names: Vec<String>,
    /// Direction of the diagram (LR, TB, RL, BT).
    pub direction: String,
    /// Include all columns in the diagram. By default, only key columns are included.
    pub include_all_columns: bool,
}

impl Default for ErdRequest {
    fn default() -> Self {
        Self {
            table_names: Vec::new(),
            direction: DEFAULT_DIRECTION.to_string(),
            include_all_columns: false,
        }
    }
}

impl ErdRequest {
    /// Whether the direction is one Mermaid understands. Unknown tokens are
    /// still passed through.
    pub fn has_known_direction(&self) -> bool {
        DIRECTIONS.contains(&self.direction.as_str())
    }
}

/// Tool metadata a transport needs to register the generator
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Schema,
}

/// Describe the generator tool and its input schema
pub fn tool_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME,
        description: TOOL_DESCRIPTION,
        input_schema: schema_for!(ErdRequest),
    }
}

/// Mermaid ERD generator over a schema catalog
#[derive(Debug)]
pub struct Generator<C> {
    extractor: Extractor<C>,
}

impl<C: SchemaCatalog> Generator<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            extractor: Extractor::new(catalog),
        }
    }

    pub fn extractor(&self) -> &Extractor<C> {
        &self.extractor
    }

    /// Extract the metadata a request asks for without rendering it
    pub fn snapshot(&self, request: &ErdRequest) -> Result<MetadataSnapshot, ErdError> {
        self.extractor.extract(
            &request.table_names,
            &request.direction,
            request.include_all_columns,
        )
    }

    /// Process a generation request and return the diagram text
    pub fn generate(&self, request: &ErdRequest) -> Result<String, ErdError> {
        let snapshot = self.snapshot(request)?;
        let mut out = String::new();
        write_diagram(&snapshot, &mut out)?;
        Ok(out)
    }
}
