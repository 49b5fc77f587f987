//! # poseidon-schema: Manifest Schema Validation
//!
//! Runtime JSON Schema validation for `poseidon.json` module manifests.
//!
//! The schema documents live in the repository's `schemas/` directory and are
//! treated as an external, versioned resource: this crate loads them (or the
//! copies compiled into the binary), resolves their cross-document `$ref`s
//! locally, and compiles the module schema exactly once.
//!
//! - [`SchemaValidator::new`]: load every `*.schema.json` under a directory.
//! - [`SchemaValidator::bundled`]: use the schemas shipped with this crate.
//! - [`SchemaValidator::validate`]: check one parsed document.
//! - [`SchemaValidator::validate_file`]: read, parse and check a manifest file.
//!
//! ## Crate Policy
//!
//! - Depends on no other `poseidon-*` crate.
//! - Validation is all-or-nothing per document: every violation is reported
//!   with the instance path, the violated schema keyword, and a message.
//! - Schema `$id` URIs must never be changed without updating every `$ref`.

pub mod validate;

pub use validate::{
    SchemaValidationDetail, SchemaValidationError, SchemaValidator, MODULE_SCHEMA_FILE,
};
