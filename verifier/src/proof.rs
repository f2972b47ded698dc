//! Wire types for Secret Removal Proof documents.
//!
//! Every byte-string field travels as unpadded base64url; decoding and
//! length checks happen in the verification layers, not here, so that a
//! malformed field produces a layer verdict instead of a parse error.
//!
//! Fields are declared in alphabetical order to mirror the canonical wire
//! layout, which sorts object keys.

use serde::{Deserialize, Serialize};

/// The single proof version named by constitution 1.0.
pub const PROOF_VERSION: &str = "1.0";

/// A complete Secret Removal Proof as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRemovalProof {
    pub merkle_proof: MerkleProof,
    /// base64url of the constitutional message for this removal.
    pub message: String,
    pub metadata: RemovalMetadata,
    pub pog: ProofOfGovernance,
    pub removal_timestamp: u64,
    pub root_after: String,
    pub root_before: String,
    pub secret_hash: String,
    /// base64url of SHA-256 over the (unrevealed) scope.
    pub secret_scope_hash: String,
    pub version: String,
}

/// Authentication path coupling the removed leaf to `root_before`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    pub leaf_hash: String,
    pub path: Vec<MerklePathNode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePathNode {
    /// True when the sibling is the left child at this level.
    pub is_left: bool,
    pub sibling_hash: String,
}

/// Multi-signature governance bundle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfGovernance {
    pub policy_id: String,
    /// Compressed G1 keys, base64url.
    pub public_keys: Vec<String>,
    pub signature: SignatureField,
}

/// The signature carried by a proof. Closed set: serde's external tagging
/// renders these as `{"single": …}`, `{"aggregate": …}` and
/// `{"corrupted": …}` on the wire.
///
/// `corrupted` only ever appears in negative test vectors; the verifier
/// still parses it and lets the BLS layer reject it, so damaged fixtures
/// fail as INVALID rather than as parse errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureField {
    Single(String),
    Aggregate(String),
    Corrupted(String),
}

impl SignatureField {
    /// The base64url signature payload, whichever variant carries it.
    pub fn payload(&self) -> &str {
        match self {
            SignatureField::Single(s)
            | SignatureField::Aggregate(s)
            | SignatureField::Corrupted(s) => s,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            SignatureField::Single(_) => "single",
            SignatureField::Aggregate(_) => "aggregate",
            SignatureField::Corrupted(_) => "corrupted",
        }
    }
}

/// One signer's contribution, as emitted by the producer-side signing
/// helper before aggregation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub pubkey: String,
    pub signature: String,
}

/// Opaque repository coordinates, carried end-to-end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalMetadata {
    pub branch: String,
    pub commit_after: String,
    pub commit_before: String,
    pub repo_id: String,
}
