use super::*;

#[test]
fn test_doc_text_splits_verbatim() {
    let ty = CanonicalType::from_doc_text("int|string|null");
    assert_eq!(ty.names(), ["int", "string", "null"]);

    let ty = CanonicalType::from_doc_text("?Foo\\Bar");
    assert_eq!(ty.names(), ["?Foo\\Bar"]);
}

#[test]
fn test_empty_doc_text_is_no_information() {
    assert!(CanonicalType::from_doc_text("").is_empty());
}

#[test]
fn test_text_form_round_trips() {
    for text in ["int", "int|string|null", "?int", "array|false", "mixed"] {
        let ty = CanonicalType::from_doc_text(text);
        assert_eq!(ty.to_string(), text);
        assert_eq!(CanonicalType::from_doc_text(&ty.to_string()), ty);
    }
    let empty = CanonicalType::new();
    assert_eq!(CanonicalType::from_doc_text(&empty.to_string()), empty);
}

#[test]
fn test_order_is_significant() {
    let a: CanonicalType = ["int", "string"].into_iter().collect();
    let b: CanonicalType = ["string", "int"].into_iter().collect();
    assert_ne!(a, b);
}

#[test]
fn test_append_and_contains() {
    let mut ty = CanonicalType::single("int");
    ty.append(CanonicalType::from_doc_text("float|null"));
    ty.push("false");
    assert_eq!(ty.to_string(), "int|float|null|false");
    assert!(ty.contains("null"));
    assert!(!ty.contains("string"));
    assert_eq!(ty.len(), 4);
}

#[test]
fn test_serializes_as_list() {
    let ty = CanonicalType::from_doc_text("int|null");
    assert_eq!(serde_json::to_string(&ty).unwrap(), r#"["int","null"]"#);
}
