//! # CLI Module
//!
//! Command-line interface for the sdkgen code generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate a complete client library from a service description:
//!
//! ```bash
//! sdkgen generate --description service.yaml --output my-client
//! ```
//!
//! Options:
//! - `--description <FILE>` - Path to the service description (YAML or JSON)
//! - `--output <DIR>` - Output directory (default: `generated/{slug}`)
//! - `--force` - Overwrite existing files without prompting
//!
//! ### `validate`
//!
//! Validate a service description without generating anything:
//!
//! ```bash
//! sdkgen validate --description service.yaml
//! ```
//!
//! ### `inspect`
//!
//! Print the operation table resolved from a description:
//!
//! ```bash
//! sdkgen inspect --description service.yaml
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
