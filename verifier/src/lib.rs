//! Offline verifier for NoctHub Secret Removal Proofs.
//!
//! A Secret Removal Proof (SRP) is a compact attestation that a named
//! secret was irrevocably removed from a versioned repository under a
//! multi-signature governance policy. This crate judges such proofs with
//! five independent layers, run in a fixed order:
//!
//! 1. **schema** — structural validation against the fixed Draft 2020-12
//!    schema,
//! 2. **canonical** — the document must equal its own RFC 8785
//!    re-serialisation,
//! 3. **bls** — the governance signature must verify, under the Augmented
//!    BLS12-381 scheme, over the canonical document with `pog` removed,
//! 4. **merkle** — the authentication path must reconstruct `root_before`,
//! 5. **constitution** — policy rules (version, timestamp, signer quorum,
//!    message coupling).
//!
//! A proof is VALID only when all five agree; the first failing layer is
//! terminal and visible in the report. The pipeline is single-threaded,
//! CPU-bound and deterministic: identical input bytes produce identical
//! reports apart from the non-authoritative wall-clock timestamp.
//!
//! The producer-side counterparts live here too: the constitutional
//! message builder ([`message`]) and the golden-vector generator and
//! runner ([`vectors`]).

pub mod bls;
pub mod canonical;
pub mod codec;
pub mod merkle;
pub mod message;
pub mod pipeline;
pub mod policy;
pub mod proof;
pub mod schema;
pub mod vectors;

pub use pipeline::{
    Status, VerificationResult, VerificationStep, Verifier, VerifierError,
};
