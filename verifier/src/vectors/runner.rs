//! Manifest-driven golden-vector runner.
//!
//! Loads a manifest, re-hashes every file against it, then replays each
//! vector through the matching verification path and compares the outcome
//! with the recorded `expected_verdict`.

use {
    super::{Manifest, VectorError},
    crate::{
        bls, canonical,
        canonical::CanonicalCheck,
        codec,
        pipeline::{Status, Verifier},
    },
    serde_json::Value,
    std::{fs, path::Path},
};

/// Outcome of one full run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failures: Vec<RunFailure>,
}

impl RunReport {
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty() && self.passed == self.total
    }
}

#[derive(Clone, Debug)]
pub struct RunFailure {
    pub category: String,
    pub filename: String,
    pub reason: String,
}

/// Run every vector listed in the manifest under `dir`.
///
/// A manifest digest mismatch is a hard error, not a vector failure: the
/// manifest is the root of test-vector integrity and nothing below it can
/// be trusted once it disagrees with the files.
pub fn run(dir: &Path, verifier: &Verifier) -> Result<RunReport, VectorError> {
    let manifest = Manifest::load(dir)?;
    manifest.verify_files(dir)?;

    let mut report = RunReport {
        total: 0,
        passed: 0,
        failures: Vec::new(),
    };

    for (category, files) in &manifest.vectors {
        for filename in files.keys() {
            report.total += 1;
            let bytes = fs::read(dir.join(category).join(filename))?;
            let vector: Value = serde_json::from_slice(&bytes)?;

            let outcome = match category.as_str() {
                "canonical" => check_canonical_vector(&vector),
                "bls" => check_bls_vector(&vector),
                "integration" => check_integration_vector(&vector, verifier),
                other => Err(VectorError::UnknownCategory(other.to_string()).to_string()),
            };

            match outcome {
                Ok(()) => report.passed += 1,
                Err(reason) => report.failures.push(RunFailure {
                    category: category.clone(),
                    filename: filename.clone(),
                    reason,
                }),
            }
        }
    }

    Ok(report)
}

fn expect_str<'a>(vector: &'a Value, field: &'static str) -> Result<&'a str, String> {
    vector
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| VectorError::Field(field).to_string())
}

fn check_canonical_vector(vector: &Value) -> Result<(), String> {
    let expected_valid = expect_str(vector, "expected_verdict")? == "VALID";
    let canonical_text = expect_str(vector, "canonical")?;

    if expected_valid {
        let input = vector
            .get("input")
            .ok_or_else(|| VectorError::Field("input").to_string())?;
        let encoded = canonical::encode(input);
        if encoded == canonical_text.as_bytes() {
            Ok(())
        } else {
            Err("canonical representation mismatch".to_string())
        }
    } else {
        let input_text = expect_str(vector, "input_non_canonical")?;
        match canonical::check(input_text.as_bytes()) {
            CanonicalCheck::Canonical => {
                Err("non-canonical input was already canonical".to_string())
            }
            CanonicalCheck::Malformed(e) => {
                Err(format!("non-canonical input failed to parse: {e}"))
            }
            CanonicalCheck::Divergent(_) => Ok(()),
        }
    }
}

fn check_bls_vector(vector: &Value) -> Result<(), String> {
    let message = codec::b64url_decode(expect_str(vector, "message")?)
        .map_err(|e| format!("message does not decode: {e}"))?;

    let keys: Vec<Vec<u8>> = vector
        .get("public_keys")
        .and_then(Value::as_array)
        .ok_or_else(|| VectorError::Field("public_keys").to_string())?
        .iter()
        .map(|k| {
            k.as_str()
                .map(codec::b64url_decode)
                .and_then(Result::ok)
                .unwrap_or_default()
        })
        .collect();

    let signature = vector
        .get("signature")
        .and_then(Value::as_object)
        .ok_or_else(|| VectorError::Field("signature").to_string())?;

    // Decode failures count as a `false` crypto verdict, never as a runner
    // error: damaged fixtures are expected to fail verification.
    let crypto_verdict = if let Some(sig) = tagged_signature(signature, "single")
        .or_else(|| tagged_signature(signature, "corrupted"))
    {
        !keys.is_empty() && bls::verify_single(&keys[0], &message, &sig)
    } else if let Some(sig) = tagged_signature(signature, "aggregate") {
        bls::verify_aggregate(&keys, &message, &sig)
    } else {
        return Err(VectorError::Field("signature").to_string());
    };

    let expected_valid = expect_str(vector, "expected_verdict")? == "VALID";
    if crypto_verdict == expected_valid {
        Ok(())
    } else {
        Err(format!(
            "expected verdict '{}', crypto result was '{crypto_verdict}'",
            if expected_valid { "VALID" } else { "INVALID" },
        ))
    }
}

fn tagged_signature(
    signature: &serde_json::Map<String, Value>,
    variant: &str,
) -> Option<Vec<u8>> {
    signature
        .get(variant)
        .and_then(Value::as_str)
        .map(|s| codec::b64url_decode(s).unwrap_or_default())
}

fn check_integration_vector(vector: &Value, verifier: &Verifier) -> Result<(), String> {
    let proof = vector
        .get("proof")
        .ok_or_else(|| VectorError::Field("proof").to_string())?;

    let raw = canonical::encode(proof);
    let result = verifier.verify_bytes(&raw);

    let expected_valid = expect_str(vector, "expected_verdict")? == "VALID";
    match (expected_valid, result.status) {
        (true, Status::Valid) | (false, Status::Invalid) => Ok(()),
        (_, status) => {
            let last = result
                .steps
                .last()
                .map(|s| format!("{}: {}", s.name, s.message))
                .unwrap_or_default();
            Err(format!("pipeline returned {status:?} ({last})"))
        }
    }
}
