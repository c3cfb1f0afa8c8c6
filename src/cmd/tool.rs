//! Tool command: print the generator's tool descriptor.

use anyhow::Result;
use schema_erd::erd::tool_descriptor;

/// Print name, description and input JSON Schema as pretty JSON
pub fn run() -> Result<()> {
    let json = serde_json::to_string_pretty(&tool_descriptor())?;
    println!("{}", json);
    Ok(())
}
