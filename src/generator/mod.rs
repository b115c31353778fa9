//! # Generator Module
//!
//! The generator module turns a parsed service description into a complete
//! Java client library: model classes with accessors and token-stream JSON
//! serialization, fixed and expandable enums, a service client with one
//! method per operation, the public client interface, and the
//! service-version enum.
//!
//! ## Architecture
//!
//! ```text
//! Service Description → spec → Type Mapping → Method Templates → Askama Templates → Generated Code
//! ```
//!
//! 1. **Type mapping** (`types`, `schema`) - maps description schemas to
//!    Java types and classifies generic types against the framework's known
//!    base classes through an explicit registry
//! 2. **Naming** (`naming`) - derives accessor, constant, and identifier
//!    names (`is`-prefixed getters for booleans, fluent setters)
//! 3. **Method assembly** (`method`, `writer`) - immutable method
//!    templates built fluently, rendered into class bodies or
//!    signature-only interface declarations
//! 4. **Examples** (`example`) - typed example trees rendered into javadoc
//!    code samples
//! 5. **Emission** (`templates`, `project`) - Askama templates render
//!    each artifact and the driver writes the output tree
//!
//! ## Generated Structure
//!
//! A generated library has this structure:
//!
//! ```text
//! my-client/
//! └── src/main/java/com/example/petstore/
//!     ├── PetStoreClient.java          # Service client, one method per operation
//!     ├── PetStoreService.java         # Public operations contract
//!     ├── PetStoreServiceVersion.java  # API version enum
//!     └── models/
//!         ├── Pet.java                 # Model with accessors + toJson/fromJson
//!         ├── PetStatus.java           # Fixed enum
//!         └── ...
//! ```
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin sdkgen -- generate \
//!     --description service.yaml \
//!     --output my-client
//! ```

mod example;
mod method;
mod naming;
mod project;
mod schema;
mod templates;
mod types;
mod writer;

#[cfg(test)]
mod tests;

pub use example::*;
pub use method::*;
pub use naming::*;
pub use project::*;
pub use schema::*;
pub use templates::*;
pub use types::*;
pub use writer::*;
