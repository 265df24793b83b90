use super::*;
use serde_json::json;
use std::io::Write;

fn v(value: f64) -> Version {
    Version::new(value).unwrap()
}

#[test]
fn test_all_mutes_every_version() {
    let map = MutedProblemMap::from_json(&json!({ "3": ["ALL"] })).unwrap();
    for current in crate::VersionRegistry::default().iter() {
        assert!(is_suppressed(ProblemKind(3), &map, current));
    }
    assert!(map.is_suppressed(ProblemKind(3), v(99.0)));
}

#[test]
fn test_concrete_version_requires_exact_match() {
    let map = MutedProblemMap::from_json(&json!({ "3": [8.1] })).unwrap();
    assert!(is_suppressed(ProblemKind(3), &map, v(8.1)));
    assert!(!is_suppressed(ProblemKind(3), &map, v(8.1000001)));
    assert!(!is_suppressed(ProblemKind(3), &map, v(8.0)));
}

#[test]
fn test_unlisted_kind_is_not_suppressed() {
    let map = MutedProblemMap::from_json(&json!({ "3": ["ALL"] })).unwrap();
    assert!(!is_suppressed(ProblemKind(4), &map, v(8.1)));
    assert!(!is_suppressed(ProblemKind(4), &MutedProblemMap::new(), v(8.1)));
}

#[test]
fn test_kind_with_no_versions_mutes_nothing() {
    let map = MutedProblemMap::from_json(&json!({ "5": [] })).unwrap();
    assert_eq!(map.len(), 1);
    assert!(!map.is_suppressed(ProblemKind(5), v(8.0)));
}

#[test]
fn test_entry_array_form() {
    let map = MutedProblemMap::from_json(&json!([
        { "kind": 3, "versions": ["ALL"] },
        { "kind": "7", "versions": [8.0, "8.1"] },
    ]))
    .unwrap();

    assert!(map.is_suppressed(ProblemKind(3), v(5.3)));
    assert!(map.is_suppressed(ProblemKind(7), v(8.0)));
    assert!(map.is_suppressed(ProblemKind(7), v(8.1)));
    assert!(!map.is_suppressed(ProblemKind(7), v(8.2)));
}

#[test]
fn test_repeated_kinds_merge() {
    let map = MutedProblemMap::from_json(&json!([
        { "kind": 7, "versions": [8.0] },
        { "kind": 7, "versions": [8.2] },
    ]))
    .unwrap();
    let specs = map.get(ProblemKind(7)).unwrap();
    assert_eq!(specs.len(), 2);
}

#[test]
fn test_malformed_definitions() {
    assert!(matches!(
        MutedProblemMap::from_json(&json!({ "three": ["ALL"] })),
        Err(MutedProblemsError::InvalidProblemKind(_))
    ));
    assert!(matches!(
        MutedProblemMap::from_json(&json!({ "3": ["SOME"] })),
        Err(MutedProblemsError::InvalidSpecifier(_))
    ));
    assert!(matches!(
        MutedProblemMap::from_json(&json!({ "3": "ALL" })),
        Err(MutedProblemsError::UnexpectedShape { .. })
    ));
    assert!(matches!(
        MutedProblemMap::from_json(&json!(42)),
        Err(MutedProblemsError::UnexpectedShape { .. })
    ));
    assert!(matches!(
        MutedProblemMap::from_json(&json!([{ "versions": ["ALL"] }])),
        Err(MutedProblemsError::UnexpectedShape { .. })
    ));
    assert!(matches!(
        MutedProblemMap::from_json_str("{"),
        Err(MutedProblemsError::Json(_))
    ));
}

#[test]
fn test_map_serializes_as_object() {
    let mut map = MutedProblemMap::new();
    map.insert(ProblemKind(3), VersionSpecifier::All);
    map.insert(ProblemKind(3), VersionSpecifier::Version(v(8.1)));

    let value = serde_json::to_value(&map).unwrap();
    assert_eq!(value, json!({ "3": ["ALL", 8.1] }));

    let back: MutedProblemMap = serde_json::from_value(value).unwrap();
    assert_eq!(back, map);
}

#[test]
fn test_catalog_by_element_name() {
    let catalog = MutedProblemCatalog::from_json_str(
        r#"{ "array_key_first": { "3": [7.2] }, "Foo\\bar": { "1": ["ALL"] } }"#,
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    let map = catalog.get("array_key_first").unwrap();
    assert!(map.is_suppressed(ProblemKind(3), v(7.2)));
    assert!(catalog.get("Foo\\bar").is_some());
    assert!(catalog.get("missing").is_none());

    assert!(MutedProblemCatalog::from_json_str("[]").is_err());
}

#[test]
fn test_catalog_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "strlen": {{ "2": ["ALL"] }} }}"#).unwrap();

    let catalog = MutedProblemCatalog::load(file.path()).unwrap();
    assert!(catalog.get("strlen").is_some());
}
