use {
    super::*,
    crate::{canonical, canonical::CanonicalCheck, codec, pipeline::Verifier},
    assert_matches::assert_matches,
    std::fs,
};

#[test]
fn generation_covers_every_category() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = generate(dir.path()).unwrap();

    assert_eq!(manifest.vectors["canonical"].len(), 8);
    assert_eq!(manifest.vectors["bls"].len(), 6);
    assert_eq!(manifest.vectors["integration"].len(), 4);
    assert_eq!(manifest.file_count(), 18);
    assert!(dir.path().join(MANIFEST_FILE).is_file());
}

#[test]
fn every_emitted_file_is_canonical() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = generate(dir.path()).unwrap();

    for (category, files) in &manifest.vectors {
        for filename in files.keys() {
            let bytes = fs::read(dir.path().join(category).join(filename)).unwrap();
            assert_eq!(
                canonical::check(&bytes),
                CanonicalCheck::Canonical,
                "{category}/{filename} must be canonical on disk"
            );
        }
    }

    let manifest_bytes = fs::read(dir.path().join(MANIFEST_FILE)).unwrap();
    assert_eq!(canonical::check(&manifest_bytes), CanonicalCheck::Canonical);
}

#[test]
fn manifest_digests_match_the_files() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = generate(dir.path()).unwrap();

    manifest.verify_files(dir.path()).unwrap();
    assert_eq!(Manifest::load(dir.path()).unwrap(), manifest);
}

#[test]
fn generation_is_deterministic() {
    let first_dir = tempfile::tempdir().unwrap();
    let second_dir = tempfile::tempdir().unwrap();

    let first = generate(first_dir.path()).unwrap();
    let second = generate(second_dir.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn all_vectors_pass_their_own_verifier() {
    let dir = tempfile::tempdir().unwrap();
    generate(dir.path()).unwrap();

    let verifier = Verifier::new().unwrap();
    let report = run(dir.path(), &verifier).unwrap();

    assert!(
        report.all_passed(),
        "vector failures: {:?}",
        report.failures
    );
    assert_eq!(report.total, 18);
}

#[test]
fn tampered_vector_file_is_caught_by_the_manifest() {
    let dir = tempfile::tempdir().unwrap();
    generate(dir.path()).unwrap();

    let target = dir.path().join("canonical").join("valid_001_simple.json");
    let mut content = fs::read(&target).unwrap();
    content.push(b' ');
    fs::write(&target, content).unwrap();

    let verifier = Verifier::new().unwrap();
    assert_matches!(
        run(dir.path(), &verifier),
        Err(VectorError::DigestMismatch { .. })
    );
}

#[test]
fn aggregate_vector_embeds_the_expected_message() {
    let dir = tempfile::tempdir().unwrap();
    generate(dir.path()).unwrap();

    let bytes = fs::read(dir.path().join("bls").join("valid_002_aggregate_2.json")).unwrap();
    let vector: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let expected_text = format!(
        "FORGET:{}:1700000001",
        codec::sha256_hex(b"test-scope-2")
    );
    assert_eq!(vector["message_text"], expected_text);
    assert_eq!(
        vector["message"],
        codec::b64url_encode(expected_text.as_bytes())
    );
    assert_eq!(vector["public_keys"].as_array().unwrap().len(), 2);
}

#[test]
fn wrong_message_vector_verifies_false() {
    let dir = tempfile::tempdir().unwrap();
    generate(dir.path()).unwrap();

    let bytes = fs::read(
        dir.path()
            .join("bls")
            .join("invalid_001_wrong_message.json"),
    )
    .unwrap();
    let vector: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let message = codec::b64url_decode(vector["message"].as_str().unwrap()).unwrap();
    let pk = codec::b64url_decode(vector["public_keys"][0].as_str().unwrap()).unwrap();
    let sig = codec::b64url_decode(vector["signature"]["single"].as_str().unwrap()).unwrap();

    assert!(!crate::bls::verify_single(&pk, &message, &sig));
}

#[test]
fn missing_manifest_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let verifier = Verifier::new().unwrap();
    assert_matches!(run(dir.path(), &verifier), Err(VectorError::Io(_)));
}
