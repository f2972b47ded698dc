use {
    super::*,
    serde_json::json,
};

fn encode_str(value: &Value) -> String {
    String::from_utf8(encode(value)).unwrap()
}

#[test]
fn simple_object_is_canonical() {
    // The 13-byte reference vector: {"a":1,"z":2}
    let input = br#"{"a":1,"z":2}"#;
    assert_eq!(input.len(), 13);
    assert_eq!(check(input), CanonicalCheck::Canonical);
    assert_eq!(encode(&json!({"a": 1, "z": 2})), input);
}

#[test]
fn scrambled_keys_are_sorted() {
    let input = br#"{"z":1,"a":2}"#;
    let CanonicalCheck::Divergent(divergence) = check(input) else {
        panic!("wrong key order must diverge");
    };
    assert_eq!(divergence.offset, 2);

    let value: Value = serde_json::from_slice(input).unwrap();
    assert_eq!(encode_str(&value), r#"{"a":2,"z":1}"#);
}

#[test]
fn whitespace_is_not_canonical() {
    assert_ne!(check(br#"{ "a": 1 }"#), CanonicalCheck::Canonical);
}

#[test]
fn trailing_newline_is_tolerated() {
    assert_eq!(check(b"{\"a\":1}\n"), CanonicalCheck::Canonical);
    // Only a single one.
    assert_ne!(check(b"{\"a\":1}\n\n"), CanonicalCheck::Canonical);
}

#[test]
fn non_json_input_is_malformed() {
    assert!(matches!(check(b"not json"), CanonicalCheck::Malformed(_)));
    assert!(matches!(check(&[0xFF, 0xFE]), CanonicalCheck::Malformed(_)));
}

#[test]
fn nested_and_array_values() {
    assert_eq!(
        encode_str(&json!({"outer": {"z": 2, "a": 1}})),
        r#"{"outer":{"a":1,"z":2}}"#
    );
    // Arrays keep insertion order; only object keys are sorted.
    assert_eq!(encode_str(&json!({"items": [3, 1, 2]})), r#"{"items":[3,1,2]}"#);
    assert_eq!(encode_str(&json!({})), "{}");
}

#[test]
fn unicode_passes_through_unescaped() {
    assert_eq!(
        encode_str(&json!({"emoji": "🔐", "text": "NoctHub"})),
        "{\"emoji\":\"🔐\",\"text\":\"NoctHub\"}"
    );
}

#[test]
fn unnecessary_escapes_diverge() {
    // \u0041 is plain "A" canonically.
    let input = br#"{"key":"value\u0041"}"#;
    assert_ne!(check(input), CanonicalCheck::Canonical);

    let value: Value = serde_json::from_slice(input).unwrap();
    assert_eq!(encode_str(&value), r#"{"key":"valueA"}"#);
}

#[test]
fn control_characters_use_short_escapes() {
    assert_eq!(encode_str(&json!("a\nb\tc")), "\"a\\nb\\tc\"");
    assert_eq!(encode_str(&json!("\u{0000}")), "\"\\u0000\"");
    assert_eq!(encode_str(&json!("\u{001f}")), "\"\\u001f\"");
}

#[test]
fn keys_sort_by_utf16_code_units() {
    // U+1D306 (surrogate pair D834 DF06) sorts before U+FB00 (FB00) in
    // UTF-16 order, although its code point is higher.
    let value = json!({"\u{FB00}": 1, "\u{1D306}": 2});
    assert_eq!(
        encode_str(&value),
        "{\"\u{1D306}\":2,\"\u{FB00}\":1}"
    );
}

#[test]
fn integers_have_no_decimal_point() {
    assert_eq!(encode_str(&json!(1700000000)), "1700000000");
    assert_eq!(encode_str(&json!(-42)), "-42");
    assert_eq!(encode_str(&json!(0)), "0");
    assert_eq!(encode_str(&json!(u64::MAX)), "18446744073709551615");
}

#[test]
fn fractions_use_ecmascript_shortest_form() {
    assert_eq!(encode_str(&json!(0.5)), "0.5");
    assert_eq!(encode_str(&json!(1.5)), "1.5");
    assert_eq!(encode_str(&json!(-0.0)), "0");
    assert_eq!(encode_str(&json!(0.000001)), "0.000001");
    assert_eq!(encode_str(&json!(5e-7)), "5e-7");
    assert_eq!(encode_str(&json!(1e21)), "1e+21");
    assert_eq!(encode_str(&json!(1e20)), "100000000000000000000");
    assert_eq!(encode_str(&json!(-2.5e-8)), "-2.5e-8");
}

#[test]
fn duplicate_keys_never_survive_the_bijection() {
    // serde_json keeps the last duplicate; the re-encoding therefore cannot
    // reproduce the input.
    assert_ne!(check(br#"{"a":1,"a":2}"#), CanonicalCheck::Canonical);
}

#[test]
fn divergence_reports_offset_and_context() {
    let input = br#"{"z":1,"a":2}"#;
    let CanonicalCheck::Divergent(divergence) = check(input) else {
        panic!("expected divergence");
    };
    assert!(divergence.input_context.contains('z'));
    assert!(divergence.canonical_context.contains('a'));
}

#[test]
fn bijection_holds_for_canonical_vectors() {
    for canonical in [
        r#"{"a":1,"z":2}"#,
        r#"{"outer":{"a":1,"z":2}}"#,
        r#"{"items":[3,1,2]}"#,
        "{}",
        "{\"emoji\":\"🔐\",\"text\":\"NoctHub\"}",
    ] {
        assert_eq!(
            check(canonical.as_bytes()),
            CanonicalCheck::Canonical,
            "vector {canonical} must be canonical"
        );
    }
}
