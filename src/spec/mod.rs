//! # Service Description Module
//!
//! Parsing and preparation of the input service description that drives
//! generation. A description is a YAML or JSON document declaring the
//! service's info block, target Java package, API versions, named model and
//! enum schemas, and the operation list with HTTP bindings.
//!
//! Loading is a two step affair, mirroring how the rest of the crate
//! consumes it:
//!
//! 1. [`load_description`] parses the document into a typed
//!    [`ServiceDescription`] and derives the project slug from the title.
//! 2. [`build_operations`] resolves schema references eagerly, assigns
//!    collision-free Java method names, and collects validation issues.
//!
//! After step 2 every type reference points at a declared model or enum;
//! downstream code never has to handle a dangling reference.

mod build;
mod load;
mod types;

pub use build::*;
pub use load::*;
pub use types::*;
