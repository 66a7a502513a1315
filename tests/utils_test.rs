use sporlsync::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let challenge = generate_code_challenge("test_verifier_123");

    // Same input produces the same challenge
    assert_eq!(challenge, generate_code_challenge("test_verifier_123"));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA-256 digest is 32 bytes, 43 chars in unpadded base64url
    assert_eq!(challenge.len(), 43);
    assert!(!challenge.contains('='));
    assert!(!challenge.contains('+'));
    assert!(!challenge.contains('/'));
}

#[test]
fn test_generate_code_challenge_known_vector() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_release_kinds_default() {
    let kinds = ReleaseKinds::default();
    assert_eq!(
        kinds.kinds(),
        &[
            ReleaseKind::Album,
            ReleaseKind::Single,
            ReleaseKind::AppearsOn
        ]
    );
    assert!(!kinds.contains(ReleaseKind::Compilation));
    assert_eq!(kinds.to_string(), "album,single,appears_on");
}

#[test]
fn test_release_kinds_new_deduplicates() {
    let kinds = ReleaseKinds::new(vec![
        ReleaseKind::Single,
        ReleaseKind::Album,
        ReleaseKind::Single,
    ]);
    assert_eq!(kinds.kinds(), &[ReleaseKind::Single, ReleaseKind::Album]);
    assert_eq!(kinds.to_string(), "single,album");
}

#[test]
fn test_parse_release_kinds_valid_inputs() {
    // Single kind
    let result = parse_release_kinds("album").unwrap();
    assert_eq!(result.kinds(), &[ReleaseKind::Album]);

    // Multiple kinds keep their order
    let result = parse_release_kinds("single,album").unwrap();
    assert_eq!(result.kinds(), &[ReleaseKind::Single, ReleaseKind::Album]);

    // "all" selects every group
    let result = parse_release_kinds("all").unwrap();
    assert_eq!(result.kinds().len(), 4);
    assert!(result.contains(ReleaseKind::Compilation));

    // Spaces and case are ignored
    let result = parse_release_kinds(" ALBUM , Appears_On ").unwrap();
    assert_eq!(result.kinds(), &[ReleaseKind::Album, ReleaseKind::AppearsOn]);

    // Duplicates collapse
    let result = parse_release_kinds("album,album,all").unwrap();
    assert_eq!(result.kinds().len(), 4);
    assert_eq!(result.kinds()[0], ReleaseKind::Album);
}

#[test]
fn test_parse_release_kinds_invalid_inputs() {
    let result = parse_release_kinds("");
    assert!(result.unwrap_err().contains("at least one"));

    let result = parse_release_kinds(" , ");
    assert!(result.unwrap_err().contains("at least one"));

    let result = parse_release_kinds("album,bootleg");
    assert!(result.unwrap_err().contains("'bootleg'"));
}
