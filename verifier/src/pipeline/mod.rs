//! Five-layer verification pipeline.
//!
//! Layers run in a fixed order — schema, canonical form, BLS, Merkle,
//! constitution — and the first non-VALID step is terminal. The order is
//! part of the contract: a non-canonical document may parse to an object
//! that would spuriously accept a signature over subtly different bytes,
//! so canonical-form validation must precede BLS.
//!
//! Given identical input bytes the emitted [`VerificationResult`] is
//! byte-identical except for `timestamp`, which is wall-clock and
//! explicitly non-authoritative.

use {
    crate::{
        bls,
        canonical::{self, CanonicalCheck},
        codec, merkle, policy,
        proof::{SecretRemovalProof, SignatureField},
        schema::{ProofSchema, SchemaError},
    },
    serde::Serialize,
    serde_json::{json, Map, Value},
    thiserror::Error,
};

/// Reason code attached to every BLS-layer rejection. Internal error text
/// stays in the diagnostic details.
pub const BLS_VERDICT_MISMATCH: &str = "BLS_VERDICT_MISMATCH";

/// Hex characters of the SHA-256 prefix identifying the input document.
const PROOF_HASH_LEN: usize = 16;

/// Verdict for a whole proof or a single layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Valid,
    Invalid,
    Error,
}

/// Outcome of one executed layer.
#[derive(Clone, Debug, Serialize)]
pub struct VerificationStep {
    pub name: &'static str,
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl VerificationStep {
    fn valid(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            status: Status::Valid,
            message: message.into(),
            details: None,
        }
    }

    fn invalid(name: &'static str, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            name,
            status: Status::Invalid,
            message: message.into(),
            details,
        }
    }
}

/// The structured, reproducible verification report.
#[derive(Clone, Debug, Serialize)]
pub struct VerificationResult {
    pub status: Status,
    /// One entry per layer executed; short-circuiting omits later layers.
    pub steps: Vec<VerificationStep>,
    /// First 16 hex chars of SHA-256 over the raw input bytes.
    pub proof_hash: String,
    /// Wall-clock seconds, for human-facing logs only. Never feeds any
    /// security decision and is excluded from determinism guarantees.
    pub timestamp: u64,
}

impl VerificationResult {
    /// A report for inputs that never reached the pipeline (unreadable
    /// file, broken ambient stack). ERROR, not INVALID: the verifier could
    /// not reach a judgement.
    pub fn error(step_name: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: Status::Error,
            steps: vec![VerificationStep {
                name: step_name,
                status: Status::Error,
                message,
                details: None,
            }],
            proof_hash: String::new(),
            timestamp: chrono::Utc::now().timestamp().max(0) as u64,
        }
    }
}

/// Construction-time failures: the ambient dependencies could not be stood
/// up, so no judgement is possible (ERROR, not INVALID).
#[derive(Debug, Error)]
pub enum VerifierError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("BLS backend failed its self-check")]
    BlsProbe,
}

/// The offline proof verifier. Construct once, verify many.
pub struct Verifier {
    schema: ProofSchema,
}

impl Verifier {
    /// Probe the ambient dependencies (schema compiler, BLS backend) and
    /// fail fast instead of misreporting INVALID on a broken stack.
    pub fn new() -> Result<Self, VerifierError> {
        if !bls::probe() {
            return Err(VerifierError::BlsProbe);
        }
        let schema = ProofSchema::new()?;

        Ok(Self { schema })
    }

    /// Run the full pipeline over raw proof bytes.
    pub fn verify_bytes(&self, raw: &[u8]) -> VerificationResult {
        let proof_hash = proof_hash(raw);
        let mut steps = Vec::new();

        let outcome = self.run_layers(raw, &mut steps);
        log::debug!(
            "proof {proof_hash}: {} after {} step(s)",
            label(outcome),
            steps.len()
        );

        VerificationResult {
            status: outcome,
            steps,
            proof_hash,
            timestamp: chrono::Utc::now().timestamp().max(0) as u64,
        }
    }

    fn run_layers(&self, raw: &[u8], steps: &mut Vec<VerificationStep>) -> Status {
        // Boundary: the bytes must be UTF-8 JSON before any layer can look
        // at them.
        let document: Value = match serde_json::from_slice(raw) {
            Ok(value) => value,
            Err(e) => {
                steps.push(VerificationStep::invalid(
                    "parse",
                    "input is not UTF-8 JSON",
                    Some(json!({ "detail": e.to_string() })),
                ));
                return Status::Invalid;
            }
        };
        steps.push(VerificationStep::valid("parse", "document parsed"));

        let layers: [fn(&Self, &[u8], &Value) -> VerificationStep; 5] = [
            Self::schema_layer,
            Self::canonical_layer,
            Self::bls_layer,
            Self::merkle_layer,
            Self::constitution_layer,
        ];
        for layer in layers {
            let step = layer(self, raw, &document);
            let status = step.status;
            steps.push(step);
            if status != Status::Valid {
                return status;
            }
        }

        Status::Valid
    }

    fn schema_layer(&self, _raw: &[u8], document: &Value) -> VerificationStep {
        match self.schema.first_violation(document) {
            None => VerificationStep::valid("schema", "document matches the proof schema"),
            Some(violation) => VerificationStep::invalid(
                "schema",
                "document does not match the proof schema",
                Some(json!({
                    "instance_path": violation.instance_path,
                    "detail": violation.message,
                })),
            ),
        }
    }

    fn canonical_layer(&self, raw: &[u8], _document: &Value) -> VerificationStep {
        match canonical::check(raw) {
            CanonicalCheck::Canonical => {
                VerificationStep::valid("canonical", "document is in canonical form")
            }
            CanonicalCheck::Malformed(detail) => VerificationStep::invalid(
                "canonical",
                "document is not canonical JSON",
                Some(json!({ "detail": detail })),
            ),
            CanonicalCheck::Divergent(divergence) => VerificationStep::invalid(
                "canonical",
                "document is not in canonical form",
                Some(json!({
                    "offset": divergence.offset,
                    "input_context": divergence.input_context,
                    "canonical_context": divergence.canonical_context,
                })),
            ),
        }
    }

    /// Verify the governance signature over the bytes actually signed: the
    /// document with `pog` removed, re-canonicalised. Trusting an embedded
    /// message field instead would let a producer sign one thing and claim
    /// another.
    fn bls_layer(&self, _raw: &[u8], document: &Value) -> VerificationStep {
        let proof = match typed_proof(document) {
            Ok(proof) => proof,
            Err(detail) => return bls_invalid("proof fields do not decode", detail),
        };

        let signed_bytes = signed_bytes(document);

        let mut public_keys = Vec::with_capacity(proof.pog.public_keys.len());
        for (i, key) in proof.pog.public_keys.iter().enumerate() {
            match codec::b64url_decode_exact(key, bls::PUBLIC_KEY_LEN) {
                Ok(bytes) => public_keys.push(bytes),
                Err(e) => {
                    return bls_invalid(
                        "public key does not decode",
                        format!("public key {i}: {e}"),
                    )
                }
            }
        }

        let signature =
            match codec::b64url_decode_exact(proof.pog.signature.payload(), bls::SIGNATURE_LEN) {
                Ok(bytes) => bytes,
                Err(e) => return bls_invalid("signature does not decode", e.to_string()),
            };

        let verified = match &proof.pog.signature {
            SignatureField::Single(_) | SignatureField::Corrupted(_) => public_keys
                .first()
                .is_some_and(|pk| bls::verify_single(pk, &signed_bytes, &signature)),
            SignatureField::Aggregate(_) => {
                bls::verify_aggregate(&public_keys, &signed_bytes, &signature)
            }
        };

        if verified {
            VerificationStep::valid(
                "bls",
                format!(
                    "{} signature verifies under {} key(s)",
                    proof.pog.signature.variant_name(),
                    public_keys.len()
                ),
            )
        } else {
            bls_invalid(
                "signature does not verify against the signed document bytes",
                bls::describe_failure(&public_keys, &signature),
            )
        }
    }

    fn merkle_layer(&self, _raw: &[u8], document: &Value) -> VerificationStep {
        let proof = match typed_proof(document) {
            Ok(proof) => proof,
            Err(detail) => {
                return VerificationStep::invalid(
                    "merkle",
                    "proof fields do not decode",
                    Some(json!({ "detail": detail })),
                )
            }
        };

        let leaf: [u8; merkle::HASH_LEN] =
            match codec::b64url_decode_array(&proof.merkle_proof.leaf_hash) {
                Ok(bytes) => bytes,
                Err(e) => {
                    return VerificationStep::invalid(
                        "merkle",
                        "leaf_hash does not decode",
                        Some(json!({ "detail": e.to_string() })),
                    )
                }
            };

        let mut path = Vec::with_capacity(proof.merkle_proof.path.len());
        for (i, node) in proof.merkle_proof.path.iter().enumerate() {
            match codec::b64url_decode_array(&node.sibling_hash) {
                Ok(sibling_hash) => path.push(merkle::PathNode {
                    sibling_hash,
                    is_left: node.is_left,
                }),
                Err(e) => {
                    return VerificationStep::invalid(
                        "merkle",
                        "path node does not decode",
                        Some(json!({ "index": i, "detail": e.to_string() })),
                    )
                }
            }
        }

        let root_before: [u8; merkle::HASH_LEN] =
            match codec::b64url_decode_array(&proof.root_before) {
                Ok(bytes) => bytes,
                Err(e) => {
                    return VerificationStep::invalid(
                        "merkle",
                        "root_before does not decode",
                        Some(json!({ "detail": e.to_string() })),
                    )
                }
            };

        let reconstructed = merkle::reconstruct_root(leaf, &path);
        if reconstructed == root_before {
            VerificationStep::valid(
                "merkle",
                format!(
                    "reconstructed root matches root_before over {} path node(s)",
                    path.len()
                ),
            )
        } else {
            VerificationStep::invalid(
                "merkle",
                "reconstructed root does not match root_before",
                Some(json!({
                    "computed": codec::b64url_encode(&reconstructed),
                    "expected": codec::b64url_encode(&root_before),
                })),
            )
        }
    }

    fn constitution_layer(&self, _raw: &[u8], document: &Value) -> VerificationStep {
        let proof = match typed_proof(document) {
            Ok(proof) => proof,
            Err(detail) => {
                return VerificationStep::invalid(
                    "constitution",
                    "proof fields do not decode",
                    Some(json!({ "detail": detail })),
                )
            }
        };

        match policy::validate(&proof) {
            Ok(()) => {
                VerificationStep::valid("constitution", "all constitutional rules satisfied")
            }
            Err(e) => VerificationStep::invalid("constitution", e.to_string(), None),
        }
    }
}

/// The bytes under governance signature: the document without its `pog`
/// field, in canonical form.
pub fn signed_bytes(document: &Value) -> Vec<u8> {
    let mut stripped: Map<String, Value> = match document.as_object() {
        Some(map) => map.clone(),
        None => Map::new(),
    };
    stripped.remove("pog");
    canonical::encode(&Value::Object(stripped))
}

/// First 16 hex chars of SHA-256 over the raw input.
pub fn proof_hash(raw: &[u8]) -> String {
    let mut digest = codec::sha256_hex(raw);
    digest.truncate(PROOF_HASH_LEN);
    digest
}

fn typed_proof(document: &Value) -> Result<SecretRemovalProof, String> {
    serde_json::from_value(document.clone()).map_err(|e| e.to_string())
}

fn bls_invalid(message: &str, detail: String) -> VerificationStep {
    VerificationStep::invalid(
        "bls",
        message.to_string(),
        Some(json!({ "code": BLS_VERDICT_MISMATCH, "detail": detail })),
    )
}

fn label(status: Status) -> &'static str {
    match status {
        Status::Valid => "VALID",
        Status::Invalid => "INVALID",
        Status::Error => "ERROR",
    }
}
