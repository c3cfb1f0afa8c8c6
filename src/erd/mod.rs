//! ERD (Entity-Relationship Diagram) generation from a live schema.
//!
//! This module provides:
//! - A backend-neutral [`SchemaCatalog`] with a DuckDB implementation
//! - Metadata extraction under two column policies (keys only, all columns)
//! - Mermaid erDiagram rendering and a JSON dump of the extracted metadata
//!
//! # Example
//!
//! ```ignore
//! use schema_erd::erd::{DuckDbCatalog, ErdRequest, Generator};
//! use std::path::Path;
//!
//! let catalog = DuckDbCatalog::open(Path::new("shop.duckdb"))?;
//! let generator = Generator::new(catalog);
//! let request = ErdRequest {
//!     table_names: vec!["orders".into(), "customers".into()],
//!     direction: "TB".into(),
//!     ..Default::default()
//! };
//! println!("{}", generator.generate(&request)?);
//! ```

pub mod catalog;
pub mod error;
pub mod extract;
pub mod generator;
pub mod json;
pub mod render;
pub mod types;

pub use catalog::{DatabaseTarget, DuckDbCatalog, SchemaCatalog, DEFAULT_SCHEMA};
pub use error::{CatalogError, ErdError};
pub use extract::Extractor;
pub use generator::{
    tool_descriptor, ErdRequest, Generator, ToolDescriptor, DEFAULT_DIRECTION, DIRECTIONS,
    TOOL_DESCRIPTION, TOOL_NAME,
};
pub use json::to_json;
pub use render::{render, write_diagram, Diagram};
pub use types::{Column, ForeignKeyEdge, MetadataSnapshot, Table};
