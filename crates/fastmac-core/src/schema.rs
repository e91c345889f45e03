//! JSON Schema validation for catalog documents

use crate::error::{Error, Result};
use jsonschema::Validator;
use rust_embed::RustEmbed;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// Embedded schema files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/schemas/"]
#[prefix = ""]
struct EmbeddedSchemas;

/// Schema validator with pre-compiled schemas
#[derive(Debug)]
pub struct SchemaValidator {
    /// Compiled schemas by name
    schemas: HashMap<String, Validator>,
}

/// Global schema validator instance
static VALIDATOR: OnceLock<SchemaValidator> = OnceLock::new();

impl SchemaValidator {
    /// Create a new schema validator with embedded schemas
    pub fn new() -> Result<Self> {
        let mut schemas = HashMap::new();

        for file in EmbeddedSchemas::iter() {
            if !file.ends_with(".schema.json") {
                continue;
            }
            let name = file.trim_end_matches(".schema.json").to_string();
            debug!("Loading embedded schema: {}", name);

            if let Some(content) = EmbeddedSchemas::get(&file) {
                let json_str = std::str::from_utf8(&content.data).map_err(|_| {
                    Error::invalid_config(format!("Invalid UTF-8 in schema: {}", file))
                })?;

                let schema_value: Value = serde_json::from_str(json_str)?;
                let compiled = jsonschema::validator_for(&schema_value).map_err(|e| {
                    Error::invalid_config(format!("Failed to compile schema {}: {}", name, e))
                })?;

                schemas.insert(name, compiled);
            }
        }

        if schemas.is_empty() {
            return Err(Error::schema_not_found("no embedded schemas"));
        }

        Ok(Self { schemas })
    }

    /// Get the global validator instance, compiling the embedded schemas on first use
    pub fn global() -> Result<&'static SchemaValidator> {
        if let Some(validator) = VALIDATOR.get() {
            return Ok(validator);
        }
        let validator = SchemaValidator::new()?;
        Ok(VALIDATOR.get_or_init(|| validator))
    }

    /// Validate JSON value against a schema
    pub fn validate(&self, value: &Value, schema_name: &str) -> Result<()> {
        let schema = self
            .schemas
            .get(schema_name)
            .ok_or_else(|| Error::schema_not_found(schema_name))?;

        let errors: Vec<String> = schema
            .iter_errors(value)
            .map(|e| {
                let path = e.instance_path().to_string();
                if path.is_empty() {
                    format!("  - {}", e)
                } else {
                    format!("  - {}: {}", path, e)
                }
            })
            .collect();

        if !errors.is_empty() {
            return Err(Error::schema_validation(errors));
        }

        Ok(())
    }

    /// Validate YAML string against a schema
    pub fn validate_yaml(&self, yaml: &str, schema_name: &str) -> Result<()> {
        let value: Value = serde_yaml_ng::from_str(yaml)?;
        self.validate(&value, schema_name)
    }

    /// Check if a schema exists
    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }
}
