use std::io::Write;

use super::*;

fn write_yaml(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write yaml");
    file
}

// -----------------------------------------------------------------------
// built-in packs
// -----------------------------------------------------------------------

#[test]
fn blossom_like_pack_is_compact() {
    let pack = get_query_pack(BLOSSOM_LIKE_FRANCE, &[]).unwrap();
    assert_eq!(pack.name, "blossom_like_france");
    assert_eq!(pack.searches.len(), 2);
    assert!(pack
        .searches
        .iter()
        .all(|s| s.employee_band_codes.as_deref() == Some("00,01,02,03,11")));
    assert!(pack
        .searches
        .iter()
        .all(|s| s.administrative_status.as_deref() == Some("A")));
}

#[test]
fn blossom_like_pack_never_sends_postal_code() {
    let pack = blossom_like_france();
    assert!(pack.searches.iter().all(|s| s.postal_code.is_none()));
}

#[test]
fn unknown_pack_is_an_error() {
    let err = get_query_pack("nope", &[]).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownQueryPack(ref n) if n == "nope"));
}

#[test]
fn loaded_pack_shadows_builtin_with_same_name() {
    let custom = QueryPack {
        name: BLOSSOM_LIKE_FRANCE.to_string(),
        description: String::new(),
        searches: vec![SearchRequest::new("custom")],
    };
    let pack = get_query_pack(BLOSSOM_LIKE_FRANCE, &[custom]).unwrap();
    assert_eq!(pack.searches.len(), 1);
    assert_eq!(pack.searches[0].term, "custom");
}

// -----------------------------------------------------------------------
// YAML loading
// -----------------------------------------------------------------------

#[test]
fn loads_packs_from_yaml() {
    let file = write_yaml(
        r#"
packs:
  - name: paris_fintech
    description: Young fintechs
    searches:
      - term: ""
        activity_code: "64.99Z"
        administrative_status: A
      - term: "paiement"
"#,
    );
    let packs = load_query_packs(file.path()).unwrap();
    assert_eq!(packs.len(), 1);
    assert_eq!(packs[0].name, "paris_fintech");
    assert_eq!(packs[0].searches.len(), 2);
    assert_eq!(packs[0].searches[0].activity_code.as_deref(), Some("64.99Z"));
    assert_eq!(packs[0].searches[1].term, "paiement");
}

#[test]
fn rejects_duplicate_pack_names() {
    let file = write_yaml(
        r#"
packs:
  - name: a
    searches: [{ term: x }]
  - name: a
    searches: [{ term: y }]
"#,
    );
    let err = load_query_packs(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
}

#[test]
fn rejects_pack_without_searches() {
    let file = write_yaml("packs:\n  - name: empty\n    searches: []\n");
    let err = load_query_packs(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("no searches")));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_query_packs(Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::PacksFileIo { .. }));
}

#[test]
fn malformed_yaml_is_parse_error() {
    let file = write_yaml("packs: [[[");
    let err = load_query_packs(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::PacksFileParse(_)));
}

// -----------------------------------------------------------------------
// activity code normalization
// -----------------------------------------------------------------------

#[test]
fn normalize_activity_codes_cleans_and_splits() {
    let (valid, invalid) = normalize_activity_codes(" 62.01z~, 58.29C ,bogus,, ");
    assert_eq!(valid, ["62.01Z", "58.29C"]);
    assert_eq!(invalid, ["BOGUS"]);
}

#[test]
fn normalize_activity_codes_empty_input() {
    let (valid, invalid) = normalize_activity_codes("   ");
    assert!(valid.is_empty());
    assert!(invalid.is_empty());
}

// -----------------------------------------------------------------------
// overrides
// -----------------------------------------------------------------------

#[test]
fn overrides_without_codes_keep_pack_variants() {
    let pack = blossom_like_france();
    let overrides = SearchOverrides {
        term: Some("saas".to_string()),
        administrative_status: Some("C".to_string()),
        ..SearchOverrides::default()
    };
    let searches = overrides.apply(&pack.searches);
    assert_eq!(searches.len(), 2);
    assert!(searches.iter().all(|s| s.term == "saas"));
    assert!(searches
        .iter()
        .all(|s| s.administrative_status.as_deref() == Some("C")));
    assert_eq!(searches[0].activity_code.as_deref(), Some("58.29C"));
    assert_eq!(
        searches[1].employee_band_codes.as_deref(),
        Some("00,01,02,03,11")
    );
}

#[test]
fn activity_code_override_replaces_variants() {
    let pack = blossom_like_france();
    let overrides = SearchOverrides {
        activity_codes: vec!["70.22Z".to_string(), "63.11Z".to_string(), "72.19Z".to_string()],
        ..SearchOverrides::default()
    };
    let searches = overrides.apply(&pack.searches);
    let codes: Vec<_> = searches
        .iter()
        .map(|s| s.activity_code.as_deref().unwrap())
        .collect();
    assert_eq!(codes, ["70.22Z", "63.11Z", "72.19Z"]);
    assert!(searches
        .iter()
        .all(|s| s.employee_band_codes.as_deref() == Some("00,01,02,03,11")));
}

#[test]
fn blank_term_override_is_ignored() {
    let searches = vec![SearchRequest::new("keep")];
    let overrides = SearchOverrides {
        term: Some("  ".to_string()),
        ..SearchOverrides::default()
    };
    assert_eq!(overrides.apply(&searches)[0].term, "keep");
}
