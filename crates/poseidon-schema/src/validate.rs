//! # Runtime Schema Validation
//!
//! Validates manifest documents against JSON Schema (Draft 2020-12)
//! definitions. All schemas use `$id` URIs of the form
//! `https://schemas.poseidon-framework.org/poseidon/{filename}`; `$ref`s
//! between them are resolved from memory by [`LocalSchemaRetriever`] and
//! never over the network.
//!
//! ## Design
//!
//! [`SchemaValidator`] loads every schema document at construction, indexes
//! them by `$id`, and compiles the module schema once. The compiled validator
//! is immutable and `Send + Sync`, so one instance can be shared by every
//! thread that loads manifests. Format assertions (`"format": "email"`) are
//! switched on; Draft 2020-12 treats them as annotations by default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// One schema violation.
#[derive(Debug, Clone)]
pub struct SchemaValidationDetail {
    /// JSON Pointer to the offending field in the document (empty for the root).
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that was violated.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for SchemaValidationDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.instance_path.is_empty() {
            "(root)"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "{path}: {} [{}]", self.message, self.schema_path)
    }
}

/// Structural validation error.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// A schema file could not be read or parsed.
    #[error("failed to load schema {path}: {reason}")]
    SchemaLoadError {
        /// Path or identifier of the schema.
        path: String,
        /// Why it failed.
        reason: String,
    },

    /// The document could not be read, parsed, or mapped onto its typed model.
    #[error("failed to load document {path}: {reason}")]
    DocumentLoadError {
        /// Path to the document.
        path: String,
        /// Why it failed.
        reason: String,
    },

    /// A schema could not be compiled.
    #[error("failed to compile schema {schema_id}: {reason}")]
    SchemaCompileError {
        /// The schema `$id`.
        schema_id: String,
        /// Why it failed.
        reason: String,
    },

    /// The document does not conform to the schema.
    #[error("{count} validation error(s) in {document}: {}", format_details(details))]
    ValidationFailed {
        /// Path of the document, or `(in-memory document)`.
        document: String,
        /// Number of violations.
        count: usize,
        /// Every violation found.
        details: Vec<SchemaValidationDetail>,
    },

    /// The requested schema is not loaded.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// I/O error while scanning the schema directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaValidationError {
    /// The individual violations, if this is a validation failure.
    pub fn details(&self) -> &[SchemaValidationDetail] {
        match self {
            Self::ValidationFailed { details, .. } => details,
            _ => &[],
        }
    }
}

fn format_details(details: &[SchemaValidationDetail]) -> String {
    details
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Schema retriever for $ref resolution
// ---------------------------------------------------------------------------

/// URI prefix used by every Poseidon schema.
const SCHEMA_URI_PREFIX: &str = "https://schemas.poseidon-framework.org/poseidon/";

/// Filename of the manifest schema.
pub const MODULE_SCHEMA_FILE: &str = "poseidon-module.schema.json";

/// Label used for documents validated from memory.
const IN_MEMORY_DOCUMENT: &str = "(in-memory document)";

/// Schema documents compiled into the crate.
const BUNDLED_SCHEMAS: &[(&str, &str)] = &[
    (
        "genotype-data.schema.json",
        include_str!("../../../schemas/genotype-data.schema.json"),
    ),
    (
        MODULE_SCHEMA_FILE,
        include_str!("../../../schemas/poseidon-module.schema.json"),
    ),
];

/// Resolves `$ref` URIs from the schemas already loaded in memory.
struct LocalSchemaRetriever {
    /// Map from `$id` URI to parsed schema.
    schemas: HashMap<String, Value>,
}

impl jsonschema::Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        self.schemas
            .get(uri_str)
            .cloned()
            .ok_or_else(|| format!("schema not found for URI: {uri_str}").into())
    }
}

// ---------------------------------------------------------------------------
// SchemaValidator
// ---------------------------------------------------------------------------

/// Compiled validator for Poseidon module manifests.
pub struct SchemaValidator {
    /// Directory the schemas were read from; `None` for the bundled set.
    schema_dir: Option<PathBuf>,
    /// Schemas indexed by `$id`.
    schema_map: HashMap<String, Value>,
    /// Schema filename to `$id`.
    filename_to_id: HashMap<String, String>,
    /// `$id` of the module schema.
    module_schema_id: String,
    /// The module schema, compiled once.
    module_validator: jsonschema::Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_dir", &self.schema_dir)
            .field("schema_count", &self.schema_map.len())
            .field("module_schema_id", &self.module_schema_id)
            .finish()
    }
}

impl SchemaValidator {
    /// Load every `*.schema.json` under `schema_dir` (recursively) and compile
    /// the module schema.
    ///
    /// # Errors
    ///
    /// - [`SchemaValidationError::Io`] if the directory cannot be scanned.
    /// - [`SchemaValidationError::SchemaLoadError`] if a schema file cannot
    ///   be read or is not valid JSON.
    /// - [`SchemaValidationError::SchemaNotFound`] if the directory does not
    ///   contain [`MODULE_SCHEMA_FILE`].
    /// - [`SchemaValidationError::SchemaCompileError`] if the module schema
    ///   does not compile (including unresolvable `$ref`s).
    pub fn new(schema_dir: impl Into<PathBuf>) -> Result<Self, SchemaValidationError> {
        let schema_dir = schema_dir.into();
        let mut documents = Vec::new();

        for path in Self::glob_schemas(&schema_dir)? {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                SchemaValidationError::SchemaLoadError {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            let schema: Value = serde_json::from_str(&content).map_err(|e| {
                SchemaValidationError::SchemaLoadError {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            let relative = path
                .strip_prefix(&schema_dir)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            documents.push((relative, schema));
        }

        Self::from_documents(Some(schema_dir), documents)
    }

    /// Build a validator from the schema documents compiled into this crate.
    pub fn bundled() -> Result<Self, SchemaValidationError> {
        let mut documents = Vec::with_capacity(BUNDLED_SCHEMAS.len());
        for (filename, content) in BUNDLED_SCHEMAS {
            let schema: Value = serde_json::from_str(content).map_err(|e| {
                SchemaValidationError::SchemaLoadError {
                    path: (*filename).to_string(),
                    reason: e.to_string(),
                }
            })?;
            documents.push(((*filename).to_string(), schema));
        }
        Self::from_documents(None, documents)
    }

    /// Register `(relative path, schema)` pairs by `$id` and compile the
    /// module schema.
    fn from_documents(
        schema_dir: Option<PathBuf>,
        documents: Vec<(String, Value)>,
    ) -> Result<Self, SchemaValidationError> {
        let mut schema_map = HashMap::new();
        let mut filename_to_id = HashMap::new();

        for (relative, schema) in documents {
            let schema_id = match schema.get("$id").and_then(|v| v.as_str()) {
                Some(id) => id.to_string(),
                None => format!("{SCHEMA_URI_PREFIX}{relative}"),
            };
            let filename = relative.rsplit('/').next().unwrap_or(&relative).to_string();
            filename_to_id.insert(filename, schema_id.clone());
            schema_map.insert(schema_id, schema);
        }

        let module_schema_id = filename_to_id
            .get(MODULE_SCHEMA_FILE)
            .cloned()
            .ok_or_else(|| SchemaValidationError::SchemaNotFound(MODULE_SCHEMA_FILE.to_string()))?;
        let module_validator = Self::compile(&schema_map, &module_schema_id)?;

        Ok(Self {
            schema_dir,
            schema_map,
            filename_to_id,
            module_schema_id,
            module_validator,
        })
    }

    fn compile(
        schema_map: &HashMap<String, Value>,
        schema_id: &str,
    ) -> Result<jsonschema::Validator, SchemaValidationError> {
        let schema = schema_map
            .get(schema_id)
            .ok_or_else(|| SchemaValidationError::SchemaNotFound(schema_id.to_string()))?;

        let retriever = LocalSchemaRetriever {
            schemas: schema_map.clone(),
        };

        jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .should_validate_formats(true)
            .with_retriever(retriever)
            .build(schema)
            .map_err(|e| SchemaValidationError::SchemaCompileError {
                schema_id: schema_id.to_string(),
                reason: e.to_string(),
            })
    }

    /// Directory the schemas came from; `None` for [`SchemaValidator::bundled`].
    pub fn schema_dir(&self) -> Option<&Path> {
        self.schema_dir.as_deref()
    }

    /// Number of loaded schema documents.
    pub fn schema_count(&self) -> usize {
        self.schema_map.len()
    }

    /// All registered `$id` URIs, sorted.
    pub fn schema_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.schema_map.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// `$id` of the manifest schema.
    pub fn module_schema_id(&self) -> &str {
        &self.module_schema_id
    }

    /// Look up a schema by `$id`.
    pub fn get_schema(&self, schema_id: &str) -> Option<&Value> {
        self.schema_map.get(schema_id)
    }

    /// Look up a schema by filename (e.g. `genotype-data.schema.json`).
    pub fn get_schema_by_filename(&self, filename: &str) -> Option<&Value> {
        self.filename_to_id
            .get(filename)
            .and_then(|id| self.schema_map.get(id))
    }

    /// Validate a parsed manifest against the module schema.
    ///
    /// Returns [`SchemaValidationError::ValidationFailed`] carrying every
    /// violation if the document does not conform.
    pub fn validate(&self, document: &Value) -> Result<(), SchemaValidationError> {
        Self::check(&self.module_validator, document, IN_MEMORY_DOCUMENT)
    }

    /// Validate a value against any loaded schema, identified by filename.
    ///
    /// Compiles the schema on every call; use [`SchemaValidator::validate`]
    /// for manifests.
    pub fn validate_value_by_filename(
        &self,
        value: &Value,
        filename: &str,
    ) -> Result<(), SchemaValidationError> {
        let schema_id = self
            .filename_to_id
            .get(filename)
            .ok_or_else(|| SchemaValidationError::SchemaNotFound(filename.to_string()))?;
        let validator = Self::compile(&self.schema_map, schema_id)?;
        Self::check(&validator, value, IN_MEMORY_DOCUMENT)
    }

    /// Read a manifest file, parse it as JSON, and validate it.
    ///
    /// Returns the parsed document on success so the caller can map it onto
    /// a typed model without reading the file twice.
    pub fn validate_file(&self, path: &Path) -> Result<Value, SchemaValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("JSON parse error: {e}"),
            }
        })?;

        Self::check(&self.module_validator, &value, &path.display().to_string())?;
        Ok(value)
    }

    fn check(
        validator: &jsonschema::Validator,
        value: &Value,
        document: &str,
    ) -> Result<(), SchemaValidationError> {
        let details: Vec<SchemaValidationDetail> = validator
            .iter_errors(value)
            .map(|err| SchemaValidationDetail {
                instance_path: err.instance_path.to_string(),
                schema_path: err.schema_path.to_string(),
                message: err.to_string(),
            })
            .collect();

        if details.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                document: document.to_string(),
                count: details.len(),
                details,
            })
        }
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Recursively collect `*.schema.json` file paths, sorted.
    fn glob_schemas(dir: &Path) -> Result<Vec<PathBuf>, SchemaValidationError> {
        let mut results = Vec::new();
        Self::walk_for_schemas(dir, &mut results)?;
        results.sort();
        Ok(results)
    }

    fn walk_for_schemas(dir: &Path, acc: &mut Vec<PathBuf>) -> Result<(), SchemaValidationError> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                Self::walk_for_schemas(&path, acc)?;
            } else if let Some(name) = path.file_name().and_then(|f| f.to_str()) {
                if name.ends_with(".schema.json") {
                    acc.push(path);
                }
            }
        }
        Ok(())
    }
}
