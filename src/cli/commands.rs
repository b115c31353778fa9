use crate::spec::{build_operations, fail_if_issues, load_description, validate_description};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for sdkgen
///
/// Provides commands for generating client libraries from service
/// descriptions and for inspecting descriptions before generation.
#[derive(Parser)]
#[command(name = "sdkgen")]
#[command(about = "sdkgen CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for sdkgen
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a client library from a service description
    Generate {
        /// Path to the service description file (YAML or JSON)
        #[arg(short, long)]
        description: PathBuf,

        /// Output directory for the generated library (default: generated/{slug})
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing files without prompting
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
    /// Validate a service description
    ///
    /// Checks reference resolution, discriminator wiring, enum shape, and
    /// HTTP bindings without writing any files.
    Validate {
        /// Path to the service description file (YAML or JSON)
        #[arg(short, long)]
        description: PathBuf,
    },
    /// Print the operations resolved from a service description
    Inspect {
        /// Path to the service description file (YAML or JSON)
        #[arg(short, long)]
        description: PathBuf,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The service description cannot be loaded or parsed
/// - Code generation fails
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            description,
            output,
            force,
        } => {
            let base_dir = crate::generator::generate_client_from_description(
                description.as_path(),
                output.as_deref(),
                *force,
            )?;
            println!("✅ Generated client library at {base_dir:?}");
            Ok(())
        }
        Commands::Validate { description } => {
            let path = description
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in description path"))?;
            let (desc, _slug) = load_description(path)?;
            let issues = validate_description(&desc);
            if issues.is_empty() {
                println!("✅ Description is valid: {} model(s), {} enum(s), {} operation(s)",
                    desc.models.len(), desc.enums.len(), desc.operations.len());
            }
            fail_if_issues(issues);
            Ok(())
        }
        Commands::Inspect { description } => {
            let path = description
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in description path"))?;
            let (desc, _slug) = load_description(path)?;
            let operations = build_operations(&desc)?;
            for op in &operations {
                let traits = match (&op.pageable, op.long_running) {
                    (Some(_), _) => " [pageable]",
                    (None, true) => " [long-running]",
                    (None, false) => "",
                };
                println!("{} {} → {}{}", op.method, op.path, op.java_name, traits);
            }
            Ok(())
        }
    }
}
