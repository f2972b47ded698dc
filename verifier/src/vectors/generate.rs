//! The three vector category generators.
//!
//! Key material is deterministic: signer scalars are 31 zero bytes followed
//! by a single tag byte, so every conforming producer regenerates
//! bit-identical vectors.

use {
    super::{write_vector, VectorError},
    crate::{
        bls::{self, Signer},
        codec, merkle,
        message::{self, Action},
        pipeline,
        proof::SignatureRecord,
    },
    serde_json::{json, Value},
    std::path::Path,
};

fn signer(tag: u8) -> Result<Signer, VectorError> {
    let mut scalar = [0u8; 32];
    scalar[31] = tag;
    Ok(Signer::from_scalar_bytes(&scalar)?)
}

/// Canonical-form vectors: known canonical strings plus the same semantic
/// content spelled non-canonically.
pub(super) fn canonical_vectors(out_dir: &Path) -> Result<(), VectorError> {
    let vectors = [
        json!({
            "name": "valid_001_simple",
            "input": {"a": 1, "z": 2},
            "canonical": "{\"a\":1,\"z\":2}",
            "expected_verdict": "VALID",
        }),
        json!({
            "name": "valid_002_nested",
            "input": {"outer": {"a": 1, "z": 2}},
            "canonical": "{\"outer\":{\"a\":1,\"z\":2}}",
            "expected_verdict": "VALID",
        }),
        json!({
            "name": "valid_003_array",
            "input": {"items": [3, 1, 2]},
            "canonical": "{\"items\":[3,1,2]}",
            "expected_verdict": "VALID",
        }),
        json!({
            "name": "valid_004_empty",
            "input": {},
            "canonical": "{}",
            "expected_verdict": "VALID",
        }),
        json!({
            "name": "valid_005_unicode",
            "input": {"emoji": "🔐", "text": "NoctHub"},
            "canonical": "{\"emoji\":\"🔐\",\"text\":\"NoctHub\"}",
            "expected_verdict": "VALID",
        }),
        json!({
            "name": "invalid_001_whitespace",
            "input_non_canonical": "{ \"a\": 1 }",
            "canonical": "{\"a\":1}",
            "expected_verdict": "INVALID",
            "reason": "Contains whitespace",
        }),
        json!({
            "name": "invalid_002_wrong_order",
            "input_non_canonical": "{\"z\":1,\"a\":2}",
            "canonical": "{\"a\":2,\"z\":1}",
            "expected_verdict": "INVALID",
            "reason": "Wrong key order",
        }),
        json!({
            "name": "invalid_003_escaped",
            "input_non_canonical": "{\"key\":\"value\\u0041\"}",
            "canonical": "{\"key\":\"valueA\"}",
            "expected_verdict": "INVALID",
            "reason": "Unnecessary escape",
        }),
    ];

    for vector in &vectors {
        write_vector(out_dir, "canonical", name_of(vector)?, vector)?;
    }
    Ok(())
}

/// BLS vectors over the constitutional message: three valid shapes and the
/// three canonical ways a signature goes wrong.
pub(super) fn bls_vectors(out_dir: &Path) -> Result<(), VectorError> {
    struct Case {
        name: &'static str,
        description: &'static str,
        scope: &'static str,
        /// Scope actually signed, when it deliberately differs.
        sign_scope: Option<&'static str>,
        timestamp: u64,
        signer_tags: &'static [u8],
        /// Keys claimed in the vector, when they deliberately differ from
        /// the signers.
        claimed_tags: Option<&'static [u8]>,
        variant: &'static str,
        expected_verdict: &'static str,
        reason: Option<&'static str>,
    }

    let cases = [
        Case {
            name: "valid_001_single",
            description: "One signer over the constitutional message.",
            scope: "test-scope-1",
            sign_scope: None,
            timestamp: 1700000000,
            signer_tags: &[1],
            claimed_tags: None,
            variant: "single",
            expected_verdict: "VALID",
            reason: None,
        },
        Case {
            name: "valid_002_aggregate_2",
            description: "Two signers aggregated over the same message.",
            scope: "test-scope-2",
            sign_scope: None,
            timestamp: 1700000001,
            signer_tags: &[1, 2],
            claimed_tags: None,
            variant: "aggregate",
            expected_verdict: "VALID",
            reason: None,
        },
        Case {
            name: "valid_003_aggregate_3",
            description: "Three signers aggregated over the same message.",
            scope: "test-scope-3",
            sign_scope: None,
            timestamp: 1700000002,
            signer_tags: &[1, 2, 3],
            claimed_tags: None,
            variant: "aggregate",
            expected_verdict: "VALID",
            reason: None,
        },
        Case {
            name: "invalid_001_wrong_message",
            description: "Signer signed a different scope.",
            scope: "test-scope-1",
            sign_scope: Some("a-different-scope"),
            timestamp: 1700000000,
            signer_tags: &[1],
            claimed_tags: None,
            variant: "single",
            expected_verdict: "INVALID",
            reason: Some("Signature covers another scope"),
        },
        Case {
            name: "invalid_002_wrong_pubkey",
            description: "Claimed key differs from the actual signer.",
            scope: "test-scope-1",
            sign_scope: None,
            timestamp: 1700000000,
            signer_tags: &[1],
            claimed_tags: Some(&[0x99]),
            variant: "single",
            expected_verdict: "INVALID",
            reason: Some("Public key does not match the signer"),
        },
        Case {
            name: "invalid_003_corrupted",
            description: "First signature byte XORed with 0xFF.",
            scope: "test-scope-1",
            sign_scope: None,
            timestamp: 1700000000,
            signer_tags: &[1],
            claimed_tags: None,
            variant: "corrupted",
            expected_verdict: "INVALID",
            reason: Some("Signature bytes damaged"),
        },
    ];

    for case in &cases {
        let message_to_verify = message::build(Action::Forget, case.scope, case.timestamp);
        let message_to_sign = message::build(
            Action::Forget,
            case.sign_scope.unwrap_or(case.scope),
            case.timestamp,
        );

        let signers: Vec<Signer> = case
            .signer_tags
            .iter()
            .map(|tag| signer(*tag))
            .collect::<Result<_, _>>()?;
        let claimed: Vec<Signer> = match case.claimed_tags {
            Some(tags) => tags
                .iter()
                .map(|tag| signer(*tag))
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };
        let public_keys: Vec<String> = if claimed.is_empty() { &signers } else { &claimed }
            .iter()
            .map(|s| codec::b64url_encode(&s.public_key()))
            .collect();

        let signature = match case.variant {
            "single" => {
                json!({"single": codec::b64url_encode(&signers[0].sign(&message_to_sign))})
            }
            "aggregate" => {
                let sigs: Vec<[u8; bls::SIGNATURE_LEN]> =
                    signers.iter().map(|s| s.sign(&message_to_sign)).collect();
                json!({"aggregate": codec::b64url_encode(&bls::aggregate(&sigs)?)})
            }
            _ => {
                let mut damaged = signers[0].sign(&message_to_sign);
                damaged[0] ^= 0xFF;
                json!({"corrupted": codec::b64url_encode(&damaged)})
            }
        };

        let vector = json!({
            "name": case.name,
            "description": case.description,
            "message": codec::b64url_encode(&message_to_verify),
            "message_text": String::from_utf8_lossy(&message_to_verify),
            "public_keys": public_keys,
            "signature": signature,
            "expected_verdict": case.expected_verdict,
            "reason": case.reason,
        });
        write_vector(out_dir, "bls", case.name, &vector)?;
    }
    Ok(())
}

/// End-to-end proof vectors, built with the strip-sign-reinsert pattern:
/// the message under signature is the canonical form of the proof with
/// `pog` removed, and the freshly computed `pog` goes back under its
/// original key so the signed document stays schema-valid and canonical.
pub(super) fn integration_vectors(out_dir: &Path) -> Result<(), VectorError> {
    let valid = {
        let mut document = base_proof();
        attach_pog(&mut document, &[signer(1)?, signer(2)?])?;
        document
    };

    let tampered_scope = {
        let mut document = base_proof();
        attach_pog(&mut document, &[signer(1)?, signer(2)?])?;
        // Overwritten after signing: the canonical bytes under signature no
        // longer match the document.
        document["secret_scope_hash"] =
            json!(codec::b64url_encode(&message::scope_hash("tampered-scope")));
        document
    };

    let insufficient = {
        let mut document = base_proof();
        attach_pog(&mut document, &[signer(1)?])?;
        document
    };

    let merkle_mismatch = {
        let mut document = base_proof();
        attach_pog(&mut document, &[signer(1)?, signer(2)?])?;
        document["root_after"] =
            json!(codec::b64url_encode(&codec::sha256(b"corrupted-root-after")));
        document
    };

    let vectors = [
        ("valid_001_complete", valid, "VALID"),
        ("invalid_001_scope", tampered_scope, "INVALID"),
        ("invalid_002_insufficient_sigs", insufficient, "INVALID"),
        ("invalid_003_merkle", merkle_mismatch, "INVALID"),
    ];

    for (name, proof, expected_verdict) in vectors {
        let vector = json!({
            "name": name,
            "proof": proof,
            "expected_verdict": expected_verdict,
        });
        write_vector(out_dir, "integration", name, &vector)?;
    }
    Ok(())
}

const INTEGRATION_SCOPE: &str = "integration-scope";
const INTEGRATION_TIMESTAMP: u64 = 1700000000;

/// The shared proof body, without `pog`, over a real two-level Merkle path.
fn base_proof() -> Value {
    let leaf = codec::sha256(b"secret-leaf");
    let path = [
        merkle::PathNode {
            sibling_hash: codec::sha256(b"sibling-0"),
            is_left: false,
        },
        merkle::PathNode {
            sibling_hash: codec::sha256(b"sibling-1"),
            is_left: true,
        },
    ];
    let root_before = merkle::reconstruct_root(leaf, &path);

    json!({
        "merkle_proof": {
            "leaf_hash": codec::b64url_encode(&leaf),
            "path": [
                {"is_left": false, "sibling_hash": codec::b64url_encode(&path[0].sibling_hash)},
                {"is_left": true, "sibling_hash": codec::b64url_encode(&path[1].sibling_hash)},
            ],
        },
        "message": codec::b64url_encode(&message::build(
            Action::Forget,
            INTEGRATION_SCOPE,
            INTEGRATION_TIMESTAMP,
        )),
        "metadata": {
            "branch": "main",
            "commit_after": "commit-2",
            "commit_before": "commit-1",
            "repo_id": "repo-nocthub-core",
        },
        "removal_timestamp": INTEGRATION_TIMESTAMP,
        "root_after": codec::b64url_encode(&codec::sha256(b"root-after")),
        "root_before": codec::b64url_encode(&root_before),
        "secret_hash": codec::b64url_encode(&codec::sha256(b"secret-payload")),
        "secret_scope_hash": codec::b64url_encode(&message::scope_hash(INTEGRATION_SCOPE)),
        "version": "1.0",
    })
}

/// Sign the document as-is and insert the resulting `pog`.
///
/// One signer yields the `single` variant; several yield one `aggregate`
/// signature over the per-signer records.
fn attach_pog(document: &mut Value, signers: &[Signer]) -> Result<(), VectorError> {
    let to_sign = pipeline::signed_bytes(document);

    let records: Vec<SignatureRecord> = signers
        .iter()
        .map(|s| SignatureRecord {
            pubkey: codec::b64url_encode(&s.public_key()),
            signature: codec::b64url_encode(&s.sign(&to_sign)),
        })
        .collect();

    let signature = if records.len() == 1 {
        json!({"single": records[0].signature})
    } else {
        let mut sigs = Vec::with_capacity(records.len());
        for record in &records {
            sigs.push(codec::b64url_decode_array::<{ bls::SIGNATURE_LEN }>(
                &record.signature,
            )?);
        }
        json!({"aggregate": codec::b64url_encode(&bls::aggregate(&sigs)?)})
    };

    document["pog"] = json!({
        "policy_id": "policy-123",
        "public_keys": records.iter().map(|r| r.pubkey.clone()).collect::<Vec<_>>(),
        "signature": signature,
    });
    Ok(())
}

fn name_of(vector: &Value) -> Result<&str, VectorError> {
    vector
        .get("name")
        .and_then(Value::as_str)
        .ok_or(VectorError::Field("name"))
}
