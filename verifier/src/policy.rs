//! Constitutional rules, applied after cryptography so that bad crypto is
//! never masked by a policy reject.

use {
    crate::{
        codec::{self, CodecError},
        merkle::HASH_LEN,
        message::{self, MessageError},
        proof::{SecretRemovalProof, PROOF_VERSION},
    },
    std::collections::HashSet,
    thiserror::Error,
};

/// Rule C3-Forget: FORGET is a consequential action and requires at least
/// this many distinct signers.
pub const MIN_FORGET_SIGNERS: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unsupported proof version '{0}', expected '{PROOF_VERSION}'")]
    Version(String),
    #[error("removal_timestamp must be positive")]
    ZeroTimestamp,
    #[error("FORGET requires at least {MIN_FORGET_SIGNERS} distinct signers, found {0}")]
    InsufficientSigners(usize),
    #[error("duplicate signer public key")]
    DuplicateSigner,
    #[error("policy_id must be a non-empty string")]
    EmptyPolicyId,
    #[error("message field is not valid base64url: {0}")]
    MessageEncoding(#[source] CodecError),
    #[error("message does not follow the constitutional grammar: {0}")]
    MessageGrammar(#[source] MessageError),
    #[error("secret_scope_hash is not a {HASH_LEN}-byte base64url digest")]
    ScopeHashEncoding,
    #[error("message scope hash does not match secret_scope_hash")]
    ScopeHashMismatch,
    #[error("message timestamp {in_message} does not match removal_timestamp {in_field}")]
    TimestampMismatch { in_message: u64, in_field: u64 },
}

/// Validate every constitutional rule against an already
/// cryptographically-verified proof.
pub fn validate(proof: &SecretRemovalProof) -> Result<(), PolicyError> {
    if proof.version != PROOF_VERSION {
        return Err(PolicyError::Version(proof.version.clone()));
    }

    if proof.removal_timestamp == 0 {
        return Err(PolicyError::ZeroTimestamp);
    }

    let keys = &proof.pog.public_keys;
    if keys.len() < MIN_FORGET_SIGNERS {
        return Err(PolicyError::InsufficientSigners(keys.len()));
    }
    let distinct: HashSet<&str> = keys.iter().map(String::as_str).collect();
    if distinct.len() != keys.len() {
        return Err(PolicyError::DuplicateSigner);
    }

    if proof.pog.policy_id.is_empty() {
        return Err(PolicyError::EmptyPolicyId);
    }

    validate_message_coupling(proof)
}

/// The embedded message must be a well-formed constitutional message whose
/// scope hash and timestamp agree with the rest of the record.
fn validate_message_coupling(proof: &SecretRemovalProof) -> Result<(), PolicyError> {
    let message_bytes =
        codec::b64url_decode(&proof.message).map_err(PolicyError::MessageEncoding)?;
    let parsed = message::parse(&message_bytes).map_err(PolicyError::MessageGrammar)?;

    let scope_hash = codec::b64url_decode_exact(&proof.secret_scope_hash, HASH_LEN)
        .map_err(|_| PolicyError::ScopeHashEncoding)?;
    let message_hash = codec::hex_decode_lower(&parsed.scope_hash_hex, HASH_LEN)
        .map_err(|_| PolicyError::ScopeHashEncoding)?;
    if scope_hash != message_hash {
        return Err(PolicyError::ScopeHashMismatch);
    }

    if parsed.timestamp != proof.removal_timestamp {
        return Err(PolicyError::TimestampMismatch {
            in_message: parsed.timestamp,
            in_field: proof.removal_timestamp,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::proof::{
            MerkleProof, ProofOfGovernance, RemovalMetadata, SignatureField,
        },
        assert_matches::assert_matches,
        crate::message::Action,
    };

    fn wellformed(scope: &str, timestamp: u64) -> SecretRemovalProof {
        SecretRemovalProof {
            merkle_proof: MerkleProof {
                leaf_hash: codec::b64url_encode(&[1u8; 32]),
                path: vec![],
            },
            message: codec::b64url_encode(&message::build(Action::Forget, scope, timestamp)),
            metadata: RemovalMetadata {
                branch: "main".to_string(),
                commit_after: "c2".to_string(),
                commit_before: "c1".to_string(),
                repo_id: "repo-1".to_string(),
            },
            pog: ProofOfGovernance {
                policy_id: "policy-123".to_string(),
                public_keys: vec!["cGsx".to_string(), "cGsy".to_string()],
                signature: SignatureField::Aggregate("c2ln".to_string()),
            },
            removal_timestamp: timestamp,
            root_after: codec::b64url_encode(&[2u8; 32]),
            root_before: codec::b64url_encode(&[3u8; 32]),
            secret_hash: codec::b64url_encode(&[4u8; 32]),
            secret_scope_hash: codec::b64url_encode(&message::scope_hash(scope)),
            version: "1.0".to_string(),
        }
    }

    #[test]
    fn wellformed_proof_passes() {
        assert_eq!(validate(&wellformed("scope", 1700000000)), Ok(()));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let mut proof = wellformed("scope", 1);
        proof.version = "1.1".to_string();
        assert_matches!(validate(&proof), Err(PolicyError::Version(_)));
    }

    #[test]
    fn zero_timestamp_is_rejected() {
        let mut proof = wellformed("scope", 1);
        proof.removal_timestamp = 0;
        // The message still says 1; the timestamp rule fires first.
        assert_matches!(validate(&proof), Err(PolicyError::ZeroTimestamp));
    }

    #[test]
    fn single_signer_is_rejected() {
        let mut proof = wellformed("scope", 1);
        proof.pog.public_keys.truncate(1);
        assert_matches!(validate(&proof), Err(PolicyError::InsufficientSigners(1)));
    }

    #[test]
    fn duplicate_signers_are_rejected() {
        let mut proof = wellformed("scope", 1);
        proof.pog.public_keys = vec!["cGsx".to_string(), "cGsx".to_string()];
        assert_matches!(validate(&proof), Err(PolicyError::DuplicateSigner));
    }

    #[test]
    fn empty_policy_id_is_rejected() {
        let mut proof = wellformed("scope", 1);
        proof.pog.policy_id.clear();
        assert_matches!(validate(&proof), Err(PolicyError::EmptyPolicyId));
    }

    #[test]
    fn garbled_message_is_rejected() {
        let mut proof = wellformed("scope", 1);
        proof.message = codec::b64url_encode(b"FORGET:tooshort:1");
        assert_matches!(validate(&proof), Err(PolicyError::MessageGrammar(_)));
    }

    #[test]
    fn scope_hash_mismatch_is_rejected() {
        let mut proof = wellformed("scope", 1);
        proof.secret_scope_hash = codec::b64url_encode(&message::scope_hash("other"));
        assert_matches!(validate(&proof), Err(PolicyError::ScopeHashMismatch));
    }

    #[test]
    fn timestamp_mismatch_is_rejected() {
        let mut proof = wellformed("scope", 1700000000);
        proof.removal_timestamp = 1700000001;
        assert_matches!(
            validate(&proof),
            Err(PolicyError::TimestampMismatch {
                in_message: 1700000000,
                in_field: 1700000001,
            })
        );
    }
}
