mod generate;
mod tool;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate as generate_completions, Shell};
use std::io;

pub use generate::GenerateArgs;

#[derive(Parser)]
#[command(name = "schema-erd")]
#[command(version)]
#[command(about = "Generate Mermaid entity-relationship diagrams from a database schema", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Mermaid erDiagram from a database schema
    Generate(GenerateArgs),

    /// Print the generator tool descriptor (name, description, input schema) as JSON
    Tool,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate(args) => generate::run(args),
        Commands::Tool => tool::run(),
        Commands::Completions { shell } => {
            generate_completions(shell, &mut Cli::command(), "schema-erd", &mut io::stdout());
            Ok(())
        }
    }
}
