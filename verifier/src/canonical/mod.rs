//! RFC 8785 (JSON Canonicalization Scheme) encoder and canonical-form check.
//!
//! Canonicalisation is the most forgery-prone layer of the verifier: the
//! bytes under a governance signature are defined as the canonical form of
//! the proof document with `pog` removed, so any serialisation divergence
//! changes what was signed.
//!
//! The canonical form is:
//! - object keys sorted by their UTF-16 code-unit sequence,
//! - no insignificant whitespace,
//! - integers without a decimal point, fractions in ECMAScript shortest
//!   round-trip form,
//! - strings with minimal escaping (the short escapes plus `\u00xx` for the
//!   remaining control characters, lowercase hex),
//! - UTF-8 output.
//!
//! [`check`] is bijective: input bytes are canonical iff re-serialising the
//! parsed value reproduces them exactly (one trailing newline is tolerated).

use {
    serde::Serialize,
    serde_json::Value,
    std::cmp::Ordering,
};

/// Context bytes reported on each side of the first diverging byte.
const CONTEXT_BYTES: usize = 10;

const HEX_LOWER: [u8; 16] = *b"0123456789abcdef";

/// Encode a JSON value to its RFC 8785 canonical byte form.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    emit(value, &mut out);
    out
}

/// Outcome of the canonical-form check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanonicalCheck {
    /// The input equals its own re-serialisation.
    Canonical,
    /// The input is not valid JSON at all.
    Malformed(String),
    /// The input parses but differs from its canonical form.
    Divergent(Divergence),
}

/// First point where the input differs from its canonical re-serialisation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Divergence {
    /// Byte offset of the first differing byte.
    pub offset: usize,
    /// Input bytes around the divergence (lossy UTF-8).
    pub input_context: String,
    /// Canonical bytes around the divergence (lossy UTF-8).
    pub canonical_context: String,
}

/// Decide whether `input` is in canonical form.
///
/// A single trailing newline is stripped before the comparison so that
/// editor-terminated files are not rejected for the newline alone.
pub fn check(input: &[u8]) -> CanonicalCheck {
    let trimmed = input.strip_suffix(b"\n").unwrap_or(input);

    let value: Value = match serde_json::from_slice(trimmed) {
        Ok(value) => value,
        Err(e) => return CanonicalCheck::Malformed(e.to_string()),
    };

    let canonical = encode(&value);

    if canonical == trimmed {
        CanonicalCheck::Canonical
    } else {
        CanonicalCheck::Divergent(divergence(trimmed, &canonical))
    }
}

fn divergence(input: &[u8], canonical: &[u8]) -> Divergence {
    let offset = input
        .iter()
        .zip(canonical.iter())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| input.len().min(canonical.len()));

    Divergence {
        offset,
        input_context: context_window(input, offset),
        canonical_context: context_window(canonical, offset),
    }
}

fn context_window(bytes: &[u8], offset: usize) -> String {
    let start = offset.saturating_sub(CONTEXT_BYTES);
    let end = (offset + CONTEXT_BYTES).min(bytes.len());
    String::from_utf8_lossy(&bytes[start..end]).into_owned()
}

fn emit(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => {
            // serde_json numbers are finite by construction; the integer
            // representations take priority so `1` never becomes `1.0`.
            if let Some(i) = n.as_i64() {
                out.extend_from_slice(i.to_string().as_bytes());
            } else if let Some(u) = n.as_u64() {
                out.extend_from_slice(u.to_string().as_bytes());
            } else if let Some(f) = n.as_f64() {
                out.extend_from_slice(es_number(f).as_bytes());
            }
        }
        Value::String(s) => emit_string(s, out),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit(item, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            // RFC 8785 §3.2.3 sorts keys by UTF-16 code units, which is not
            // the same as byte order once supplementary-plane characters are
            // involved.
            let mut pairs: Vec<(&String, &Value)> = map.iter().collect();
            pairs.sort_by(|(a, _), (b, _)| utf16_cmp(a, b));

            out.push(b'{');
            for (i, (key, val)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit_string(key, out);
                out.push(b':');
                emit(val, out);
            }
            out.push(b'}');
        }
    }
}

fn utf16_cmp(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// RFC 8785 §3.2.2.2 — minimal escaping, lowercase `\u00xx` for the control
/// characters without a short escape.
fn emit_string(s: &str, out: &mut Vec<u8>) {
    out.push(b'"');
    for ch in s.chars() {
        match ch {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\u{0008}' => out.extend_from_slice(b"\\b"),
            '\u{000C}' => out.extend_from_slice(b"\\f"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            '\u{0000}'..='\u{001F}' => {
                let b = ch as u8;
                out.extend_from_slice(b"\\u00");
                out.push(HEX_LOWER[(b >> 4) as usize]);
                out.push(HEX_LOWER[(b & 0xF) as usize]);
            }
            _ => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out.push(b'"');
}

/// Serialise a finite `f64` the way ECMAScript `Number::toString` does,
/// which is what RFC 8785 §3.2.2.3 requires for fractions.
///
/// Rust's `LowerExp` formatting already produces the shortest round-trip
/// digit sequence; this function only re-shapes it into the ECMAScript
/// plain/exponent forms (exponent form outside `[1e-6, 1e21)`).
fn es_number(f: f64) -> String {
    if f == 0.0 {
        // Covers -0.0: ECMAScript renders both as "0".
        return "0".to_string();
    }

    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some(parts) => parts,
        // LowerExp output always contains an exponent.
        None => (sci.as_str(), "0"),
    };
    let exp: i64 = exp.parse().unwrap_or(0);

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i64;
    // Value is 0.d1..dk * 10^n.
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        let mut s = digits;
        for _ in 0..(n - k) {
            s.push('0');
        }
        s
    } else if 0 < n && n <= 21 {
        let split = n as usize;
        format!("{}.{}", &digits[..split], &digits[split..])
    } else if -6 < n && n <= 0 {
        let zeros: String = "0".repeat((-n) as usize);
        format!("0.{zeros}{digits}")
    } else {
        let exp_part = n - 1;
        let sign = if exp_part >= 0 { "+" } else { "-" };
        let magnitude = exp_part.abs();
        if digits.len() == 1 {
            format!("{digits}e{sign}{magnitude}")
        } else {
            format!("{}.{}e{sign}{magnitude}", &digits[..1], &digits[1..])
        }
    };

    if f < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests;
