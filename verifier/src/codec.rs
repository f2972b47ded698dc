//! Binary codecs and digests shared across the wire format.
//!
//! Every byte-string field of a proof document travels as base64url without
//! padding. Hex only appears inside the constitutional message, where it is
//! constrained to lowercase to stay in lockstep with producers.

use {
    base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _},
    sha2::{Digest as _, Sha256},
    thiserror::Error,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid base64url: {0}")]
    Base64(#[source] base64::DecodeError),
    #[error("decoded length {actual}, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[error("invalid lowercase hex digit at byte {0}")]
    HexDigit(usize),
    #[error("hex length {actual}, expected {expected}")]
    HexLength { expected: usize, actual: usize },
}

/// Encode bytes as unpadded URL-safe base64.
pub fn b64url_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode URL-safe base64, with or without `=` padding.
pub fn b64url_decode(s: &str) -> Result<Vec<u8>, CodecError> {
    URL_SAFE_NO_PAD
        .decode(s.trim_end_matches('='))
        .map_err(CodecError::Base64)
}

/// Decode URL-safe base64 and require an exact decoded length.
pub fn b64url_decode_exact(s: &str, expected_len: usize) -> Result<Vec<u8>, CodecError> {
    let bytes = b64url_decode(s)?;
    if bytes.len() != expected_len {
        return Err(CodecError::Length {
            expected: expected_len,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Decode URL-safe base64 into a fixed-size array.
pub fn b64url_decode_array<const N: usize>(s: &str) -> Result<[u8; N], CodecError> {
    let bytes = b64url_decode(s)?;
    bytes.try_into().map_err(|v: Vec<u8>| CodecError::Length {
        expected: N,
        actual: v.len(),
    })
}

/// Decode lowercase hex into `expected_len` bytes.
///
/// Uppercase digits are a validation failure, not an alternative spelling.
pub fn hex_decode_lower(s: &str, expected_len: usize) -> Result<Vec<u8>, CodecError> {
    if s.len() != expected_len * 2 {
        return Err(CodecError::HexLength {
            expected: expected_len * 2,
            actual: s.len(),
        });
    }
    for (i, b) in s.bytes().enumerate() {
        if !matches!(b, b'0'..=b'9' | b'a'..=b'f') {
            return Err(CodecError::HexDigit(i));
        }
    }
    hex::decode(s).map_err(|_| CodecError::HexLength {
        expected: expected_len * 2,
        actual: s.len(),
    })
}

/// Compute `sha256(data)` and return the raw 32-byte digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hex-encode `sha256(data)`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
