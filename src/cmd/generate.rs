//! Generate command: extract a schema and print it as a Mermaid erDiagram.

use anyhow::{bail, Context, Result};
use clap::Args;
use log::{info, warn};
use schema_erd::config::{ErdConfig, DATABASE_ENV};
use schema_erd::erd::{
    to_json, write_diagram, DatabaseTarget, DuckDbCatalog, ErdRequest, Generator, DIRECTIONS,
};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Generate a Mermaid erDiagram from a DuckDB database schema
#[derive(Args, Debug)]
#[command(after_help = "Examples:
  schema-erd generate --database shop.duckdb
  schema-erd generate --database shop.duckdb -t orders,customers -d TB
  schema-erd generate --database shop.duckdb --all-columns -o shop.mmd
  echo '{\"table_names\": [\"orders\"]}' | schema-erd generate --database shop.duckdb --request -")]
pub struct GenerateArgs {
    /// DuckDB database file (defaults to $DATABASE_URL, else an empty in-memory database)
    #[arg(long, value_name = "PATH")]
    pub database: Option<String>,

    /// Schema (namespace) to introspect [default: main]
    #[arg(long, value_name = "NAME")]
    pub schema: Option<String>,

    /// Only include specific tables (comma-separated)
    #[arg(short, long, value_name = "TABLES", value_delimiter = ',')]
    pub tables: Option<Vec<String>>,

    /// Diagram direction: LR, TB, RL, BT [default: LR]
    #[arg(short, long)]
    pub direction: Option<String>,

    /// Include all columns, not only primary and foreign key columns
    #[arg(short, long)]
    pub all_columns: bool,

    /// Read a JSON request (table_names, direction, include_all_columns) from a file, or "-" for stdin
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// YAML config file with defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write output to file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output the extracted metadata as JSON instead of Mermaid
    #[arg(long)]
    pub json: bool,
}

/// Run the generate command
pub fn run(args: GenerateArgs) -> Result<()> {
    let config = match args.config {
        Some(ref path) => ErdConfig::load(path)?,
        None => ErdConfig::default(),
    };

    let mut request = match args.request {
        Some(ref path) => read_request(path)?,
        None => config.request(),
    };

    if let Some(tables) = args.tables {
        request.table_names = tables
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
    if let Some(direction) = args.direction {
        request.direction = direction;
    }
    if args.all_columns {
        request.include_all_columns = true;
    }

    if !request.has_known_direction() {
        warn!(
            "Unknown direction '{}' (expected one of {}), passing it through",
            request.direction,
            DIRECTIONS.join(", ")
        );
    }

    let env = std::env::var(DATABASE_ENV).ok();
    let target = config.database_target(args.database.as_deref(), env.as_deref());
    if let DatabaseTarget::File(ref path) = target {
        if !path.exists() {
            bail!("database file does not exist: {}", path.display());
        }
    }

    let schema = args.schema.as_deref().unwrap_or_else(|| config.schema());
    info!("Reading schema '{}' from {}", schema, target);

    let catalog = DuckDbCatalog::connect(&target)?.with_schema(schema);
    let generator = Generator::new(catalog);

    let snapshot = generator
        .snapshot(&request)
        .context("failed to generate metadata")?;

    let content = if args.json {
        let mut json = to_json(&snapshot);
        json.push('\n');
        json
    } else {
        let mut diagram = String::new();
        write_diagram(&snapshot, &mut diagram)?;
        diagram
    };

    if let Some(ref out_path) = args.output {
        fs::write(out_path, content.as_bytes())
            .with_context(|| format!("Cannot create output file: {}", out_path.display()))?;
        info!("ERD written to: {}", out_path.display());
    } else {
        print!("{}", content);
    }

    info!(
        "ERD: {} tables, {} columns, {} relationships",
        snapshot.table_count(),
        snapshot.column_count(),
        snapshot.edge_count()
    );

    Ok(())
}

/// Read a JSON request from a file, or stdin for "-"
fn read_request(path: &Path) -> Result<ErdRequest> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Cannot read request from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Cannot read request file: {}", path.display()))?
    };

    serde_json::from_str(&content).context("Invalid request JSON")
}
