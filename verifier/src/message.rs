//! Canonical constitutional message format.
//!
//! The message is the authenticated surface of a removal: every bit of
//! flexibility in its grammar is a forgery avenue, so the grammar is
//! maximally tight. The byte layout is
//! `FORGET:<64 lowercase hex chars>:<decimal timestamp>` with no padding,
//! no leading zeros and exactly three colon-separated parts.

use {
    crate::codec,
    thiserror::Error,
};

/// Length of the hex-rendered scope hash inside a message.
pub const SCOPE_HASH_HEX_LEN: usize = 64;

/// Governance actions recognised by constitution version 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Forget,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Forget => "FORGET",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("message is not valid UTF-8")]
    NotUtf8,
    #[error("expected 3 colon-separated parts, found {0}")]
    PartCount(usize),
    #[error("invalid action prefix '{0}'")]
    Prefix(String),
    #[error("scope hash must be {SCOPE_HASH_HEX_LEN} lowercase hex characters")]
    ScopeHash,
    #[error("invalid decimal timestamp '{0}'")]
    Timestamp(String),
    #[error("leading zeros are not allowed in the timestamp")]
    LeadingZero,
}

/// A validated constitutional message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Scope hash as it appeared in the message (lowercase hex).
    pub scope_hash_hex: String,
    pub timestamp: u64,
}

/// SHA-256 of the scope's UTF-8 bytes.
pub fn scope_hash(scope: &str) -> [u8; 32] {
    codec::sha256(scope.as_bytes())
}

/// Build the canonical message bytes for `(action, scope, timestamp)`.
///
/// Byte-identical across conforming implementations: lowercase hex digest,
/// decimal timestamp without padding.
pub fn build(action: Action, scope: &str, timestamp: u64) -> Vec<u8> {
    format!(
        "{}:{}:{}",
        action.as_str(),
        hex::encode(scope_hash(scope)),
        timestamp
    )
    .into_bytes()
}

/// Parse and validate message bytes, returning the embedded scope hash and
/// timestamp.
pub fn parse(message: &[u8]) -> Result<ParsedMessage, MessageError> {
    let text = std::str::from_utf8(message).map_err(|_| MessageError::NotUtf8)?;

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 3 {
        return Err(MessageError::PartCount(parts.len()));
    }

    if parts[0] != Action::Forget.as_str() {
        return Err(MessageError::Prefix(parts[0].to_string()));
    }

    let scope_hash_hex = parts[1];
    if scope_hash_hex.len() != SCOPE_HASH_HEX_LEN
        || !scope_hash_hex
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        return Err(MessageError::ScopeHash);
    }

    let ts_text = parts[2];
    // A bare digit check first: u64 parsing would also admit a leading `+`.
    if ts_text.is_empty() || !ts_text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MessageError::Timestamp(ts_text.to_string()));
    }
    if ts_text.len() > 1 && ts_text.starts_with('0') {
        return Err(MessageError::LeadingZero);
    }
    let timestamp: u64 = ts_text
        .parse()
        .map_err(|_| MessageError::Timestamp(ts_text.to_string()))?;

    Ok(ParsedMessage {
        scope_hash_hex: scope_hash_hex.to_string(),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches, rstest::rstest};

    #[test]
    fn build_matches_reference_layout() {
        let message = build(Action::Forget, "test-scope-1", 1700000000);
        let expected = format!(
            "FORGET:{}:1700000000",
            codec::sha256_hex(b"test-scope-1")
        );
        assert_eq!(message, expected.into_bytes());
    }

    #[test]
    fn build_handles_unicode_scopes() {
        let message = build(Action::Forget, "api-key-🔐", 0);
        let text = String::from_utf8(message).unwrap();
        assert!(text.starts_with("FORGET:"));
        assert!(text.ends_with(":0"));
    }

    #[test]
    fn roundtrip_recovers_hash_and_timestamp() {
        let message = build(Action::Forget, "some-scope", 1700000123);
        let parsed = parse(&message).unwrap();
        assert_eq!(parsed.scope_hash_hex, codec::sha256_hex(b"some-scope"));
        assert_eq!(parsed.timestamp, 1700000123);
    }

    #[test]
    fn zero_timestamp_is_wellformed() {
        let message = build(Action::Forget, "s", 0);
        assert_eq!(parse(&message).unwrap().timestamp, 0);
    }

    #[rstest]
    #[case::two_parts(b"FORGET:abc".to_vec())]
    #[case::four_parts(b"FORGET:ab:1:extra".to_vec())]
    fn wrong_part_count_is_rejected(#[case] message: Vec<u8>) {
        assert_matches!(parse(&message), Err(MessageError::PartCount(_)));
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let mut message = build(Action::Forget, "s", 1);
        message[0] = b'f';
        assert_matches!(parse(&message), Err(MessageError::Prefix(_)));
    }

    #[test]
    fn uppercase_hash_is_rejected() {
        let hash = codec::sha256_hex(b"s").to_uppercase();
        let message = format!("FORGET:{hash}:1");
        assert_matches!(parse(message.as_bytes()), Err(MessageError::ScopeHash));
    }

    #[test]
    fn short_hash_is_rejected() {
        assert_matches!(
            parse(b"FORGET:abcd:1"),
            Err(MessageError::ScopeHash)
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::negative("-1")]
    #[case::plus_sign("+5")]
    #[case::not_decimal("12a")]
    #[case::overflow("99999999999999999999999")]
    fn bad_timestamps_are_rejected(#[case] ts: &str) {
        let hash = codec::sha256_hex(b"s");
        let message = format!("FORGET:{hash}:{ts}");
        assert_matches!(parse(message.as_bytes()), Err(MessageError::Timestamp(_)));
    }

    #[test]
    fn leading_zero_timestamp_is_rejected() {
        let hash = codec::sha256_hex(b"s");
        let message = format!("FORGET:{hash}:0700");
        assert_matches!(parse(message.as_bytes()), Err(MessageError::LeadingZero));
    }

    #[test]
    fn non_utf8_is_rejected() {
        assert_matches!(parse(&[0xFF, 0xFE, 0xFD]), Err(MessageError::NotUtf8));
    }
}
