//! Structural validation of proof documents against the fixed JSON Schema
//! (Draft 2020-12).
//!
//! The schema pins the entire document tree: all fields required, no
//! additional properties anywhere, `version` limited to the constitution's
//! single value. Semantic checks (decodability, signatures, policy) belong
//! to later layers.

use {
    jsonschema::Validator,
    serde_json::Value,
    thiserror::Error,
};

/// The embedded proof document schema.
pub const PROOF_SCHEMA_JSON: &str = include_str!("proof.schema.json");

/// Failure to stand the validator up. This is an ERROR-class condition,
/// never an INVALID verdict: a verifier without a working schema compiler
/// cannot judge anything.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("embedded proof schema is invalid: {0}")]
    Compile(String),
}

/// First structural violation found in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer of the offending node.
    pub instance_path: String,
    pub message: String,
}

/// A compiled proof-document validator.
pub struct ProofSchema {
    validator: Validator,
}

impl ProofSchema {
    pub fn new() -> Result<Self, SchemaError> {
        let schema: Value = serde_json::from_str(PROOF_SCHEMA_JSON)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        let validator = jsonschema::draft202012::new(&schema)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;

        Ok(Self { validator })
    }

    /// Return the first violation, if any.
    pub fn first_violation(&self, document: &Value) -> Option<SchemaViolation> {
        self.validator
            .iter_errors(document)
            .next()
            .map(|e| SchemaViolation {
                instance_path: e.instance_path.to_string(),
                message: e.to_string(),
            })
    }
}
