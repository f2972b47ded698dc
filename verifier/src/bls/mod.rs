//! BLS12-381 signature verification under the Augmented scheme.
//!
//! Minimal-pubkey variant: 48-byte compressed G1 public keys, 96-byte
//! compressed G2 signatures. The Augmented scheme binds each signature to
//! its signer by prepending the compressed public key to the message before
//! hash-to-curve, which is what defeats rogue-key aggregation.
//!
//! Verification failures of any kind (bad encodings, wrong subgroup, failed
//! pairing check) collapse to `false`; callers never see which one it was
//! through the verdict. [`describe_failure`] exists for diagnostics only.

use {
    blst::{
        min_pk::{AggregateSignature, PublicKey, SecretKey, Signature},
        BLST_ERROR,
    },
    thiserror::Error,
};

/// Domain separation tag fixed by the constitution. Signatures produced
/// under any other tag are unverifiable here, by design.
pub const DST: &[u8] = b"NOCTHUB_BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_";

/// Compressed G1 public key size.
pub const PUBLIC_KEY_LEN: usize = 48;

/// Compressed G2 signature size.
pub const SIGNATURE_LEN: usize = 96;

/// Producer-side errors. The verifying half of this module never errors,
/// it only answers `false`.
#[derive(Debug, Error)]
pub enum BlsError {
    #[error("invalid secret scalar")]
    InvalidSecretKey,
    #[error("invalid signature bytes")]
    InvalidSignature,
    #[error("nothing to aggregate")]
    EmptyAggregate,
}

/// Verify one signature over one message under one public key.
pub fn verify_single(pk_bytes: &[u8], msg: &[u8], sig_bytes: &[u8]) -> bool {
    let Ok(pk) = PublicKey::from_bytes(pk_bytes) else {
        return false;
    };
    let Ok(sig) = Signature::from_bytes(sig_bytes) else {
        return false;
    };

    sig.verify(true, msg, DST, pk_bytes, &pk, true) == BLST_ERROR::BLST_SUCCESS
}

/// Verify an aggregated signature attesting that every listed key signed
/// the same `msg`.
///
/// Augmentation makes the per-signer messages distinct (`pk_i || msg`), so
/// this is a plain aggregate verification over N messages.
pub fn verify_aggregate(pk_bytes_list: &[Vec<u8>], msg: &[u8], agg_sig_bytes: &[u8]) -> bool {
    if pk_bytes_list.is_empty() {
        return false;
    }

    let mut pks = Vec::with_capacity(pk_bytes_list.len());
    for pk_bytes in pk_bytes_list {
        let Ok(pk) = PublicKey::from_bytes(pk_bytes) else {
            return false;
        };
        pks.push(pk);
    }

    let Ok(sig) = Signature::from_bytes(agg_sig_bytes) else {
        return false;
    };

    let augmented: Vec<Vec<u8>> = pk_bytes_list
        .iter()
        .map(|pk_bytes| {
            let mut m = Vec::with_capacity(pk_bytes.len() + msg.len());
            m.extend_from_slice(pk_bytes);
            m.extend_from_slice(msg);
            m
        })
        .collect();
    let msg_refs: Vec<&[u8]> = augmented.iter().map(Vec::as_slice).collect();
    let pk_refs: Vec<&PublicKey> = pks.iter().collect();

    sig.aggregate_verify(true, &msg_refs, DST, &pk_refs, true) == BLST_ERROR::BLST_SUCCESS
}

/// Best-effort diagnostic for a failed verification. Never part of the
/// verdict surface.
pub fn describe_failure(pk_bytes_list: &[Vec<u8>], sig_bytes: &[u8]) -> String {
    for (i, pk_bytes) in pk_bytes_list.iter().enumerate() {
        if let Err(e) = PublicKey::from_bytes(pk_bytes) {
            return format!("public key {i} does not decode: {e:?}");
        }
    }
    if let Err(e) = Signature::from_bytes(sig_bytes) {
        return format!("signature does not decode: {e:?}");
    }
    "pairing check failed".to_string()
}

/// Self-check run at verifier startup: sign and verify over a fixed scalar
/// so that a broken or absent backend surfaces as ERROR up front instead of
/// misreporting INVALID later.
pub fn probe() -> bool {
    let mut scalar = [0u8; 32];
    scalar[31] = 1;
    let Ok(signer) = Signer::from_scalar_bytes(&scalar) else {
        return false;
    };
    let msg = b"nocthub.bls.probe";
    let sig = signer.sign(msg);
    verify_single(&signer.public_key(), msg, &sig)
}

/// A signing key pair, used by the golden-vector generator.
pub struct Signer {
    sk: SecretKey,
    pk_bytes: [u8; PUBLIC_KEY_LEN],
}

impl Signer {
    /// Construct from a 32-byte big-endian scalar. The scalar must be a
    /// valid nonzero field element.
    pub fn from_scalar_bytes(scalar: &[u8; 32]) -> Result<Self, BlsError> {
        let sk = SecretKey::from_bytes(scalar).map_err(|_| BlsError::InvalidSecretKey)?;
        let pk_bytes = sk.sk_to_pk().to_bytes();
        Ok(Self { sk, pk_bytes })
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.pk_bytes
    }

    /// Sign `msg` under the Augmented scheme.
    pub fn sign(&self, msg: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.sk.sign(msg, DST, &self.pk_bytes).to_bytes()
    }
}

/// Aggregate individual signatures into one 96-byte signature.
pub fn aggregate(signatures: &[[u8; SIGNATURE_LEN]]) -> Result<[u8; SIGNATURE_LEN], BlsError> {
    if signatures.is_empty() {
        return Err(BlsError::EmptyAggregate);
    }

    let mut parsed = Vec::with_capacity(signatures.len());
    for sig_bytes in signatures {
        parsed.push(Signature::from_bytes(sig_bytes).map_err(|_| BlsError::InvalidSignature)?);
    }
    let refs: Vec<&Signature> = parsed.iter().collect();

    let aggregated =
        AggregateSignature::aggregate(&refs, true).map_err(|_| BlsError::InvalidSignature)?;
    Ok(aggregated.to_signature().to_bytes())
}
