//! # sdkgen
//!
//! **sdkgen** is a batch source-code generator that turns a structured
//! service description (REST operations, schemas, discriminated hierarchies,
//! enums, pagination metadata, API versions) into an idiomatic Java client
//! library.
//!
//! ## Overview
//!
//! A single `generate` run loads one description document, maps every schema
//! to a Java type, assembles method templates for accessors, serialization,
//! and per-operation client proxies, and renders the output tree through
//! Askama templates. There is no server, no wire protocol, and no runtime:
//! the generated code compiles against a fixed external contract (HTTP
//! pipeline, token-stream JSON reader/writer, paging iterator, poller) that
//! this crate only names in imports.
//!
//! ## Architecture
//!
//! The library is organized into three modules:
//!
//! - **[`spec`]** - service description parsing, validation, and operation
//!   resolution
//! - **[`generator`]** - type mapping, naming, method-template assembly,
//!   example trees, and file emission
//! - **[`cli`]** - the `sdkgen` command line (`generate`, `validate`,
//!   `inspect`)
//!
//! ### Generation Flow
//!
//! ```text
//! description.yaml
//!     │  spec::load_description / spec::build_operations
//!     ▼
//! ServiceDescription + Vec<OperationMeta>
//!     │  generator::schema  (JavaType mapping, model/enum definitions)
//!     │  generator::method  (MethodTemplate assembly)
//!     │  generator::example (example payload trees → javadoc samples)
//!     ▼
//! generator::templates + generator::project
//!     │
//!     ▼
//! src/main/java/<package>/  (client, interface, versions, models/)
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use sdkgen::generator::generate_client_from_description;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let out = generate_client_from_description(
//!     Path::new("service.yaml"),
//!     None,  // default output directory
//!     false, // keep existing files
//! )?;
//! println!("generated into {out:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Notes
//!
//! - Generic return types are classified against a closed registry of
//!   framework base classes ([`generator::TypeRegistry`]); unresolved names
//!   degrade to a non-matching classification with a warning, never an
//!   error.
//! - Method templates are immutable values built through a staged builder;
//!   the same template renders both the concrete client method and the
//!   signature-only interface declaration.
//! - Example payloads are never validated at tree-construction time;
//!   mismatches surface as per-example rendering errors and skip only that
//!   sample.

pub mod cli;
pub mod generator;
pub mod spec;

pub use generator::{
    build_example_tree, generate_client_from_description, getter_name, is_generic_subclass_of,
    render_example, setter_name, ExampleNode, GenericBase, JavaType, MethodTemplate,
    MethodTemplateBuilder, TypeRegistry, Visibility,
};
pub use spec::{
    build_operations, load_description, load_operations, OperationMeta, ParameterLocation,
    ServiceDescription, ValidationIssue,
};
