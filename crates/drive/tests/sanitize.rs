use proptest::prelude::*;
use strata_drive::{TenantId, build_key, is_sanitized, sanitize};

#[test]
fn test_known_inputs() {
    assert_eq!(sanitize("café/déjà vu.txt"), "cafe/deja-vu.txt");
    assert_eq!(sanitize(""), "");
    assert_eq!(sanitize("日本"), "--");
    assert_eq!(sanitize("e\u{0301}"), "e");
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(raw in any::<String>()) {
        let once = sanitize(&raw);
        prop_assert_eq!(sanitize(&once), once.clone());
        prop_assert!(is_sanitized(&once));
    }

    #[test]
    fn sanitize_never_grows_ascii_input(raw in "[ -~]{0,64}") {
        prop_assert_eq!(sanitize(&raw).len(), raw.len());
    }

    #[test]
    fn keys_have_no_empty_components(
        segments in proptest::collection::vec("[a-z./ é]{0,12}", 0..5),
    ) {
        let tenant = TenantId::try_from("alice").unwrap();
        if let Ok(key) = build_key(&tenant, segments.iter().map(String::as_str)) {
            prop_assert!(!key.as_str().contains("//"));
            prop_assert!(!key.as_str().ends_with('/'));
            prop_assert!(key.as_str().starts_with("alice"));
            prop_assert!(key.as_str().split('/').all(|c| c != "." && c != ".."));
        }
    }
}
