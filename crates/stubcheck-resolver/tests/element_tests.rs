use super::*;
use crate::versioned_types::{DEFAULT_SLOT, TypeMapKey};
use serde_json::json;
use stubcheck_common::VersionSpecifier;

fn v(value: f64) -> Version {
    Version::new(value).unwrap()
}

fn function(name: &str, return_type: TypeInfo) -> DeclaredElement {
    DeclaredElement::Function(FunctionElement {
        header: ElementHeader::new(name, None),
        return_type,
        params: Vec::new(),
    })
}

#[test]
fn test_catalog_key_includes_parent_for_members() {
    assert_eq!(ElementHeader::new("strlen", None).catalog_key(), "strlen");
    assert_eq!(
        ElementHeader::new("format", Some("DateTime".to_string())).catalog_key(),
        "DateTime::format"
    );
}

#[test]
fn test_record_error_keeps_first() {
    let mut header = ElementHeader::new("f", None);
    header.record_error(ResolveError::UnknownRangeBound("a".to_string()));
    header.record_error(ResolveError::UnknownRangeBound("b".to_string()));
    assert_eq!(
        header.parse_error,
        Some(ResolveError::UnknownRangeBound("a".to_string()))
    );
}

#[test]
fn test_effective_type_prefers_attribute_entry() {
    let mut from_attribute = VersionedTypeMap::new();
    from_attribute.insert(TypeMapKey::Version(v(8.0)), CanonicalType::from_doc_text("int|float"));
    from_attribute.insert(
        TypeMapKey::Named(DEFAULT_SLOT.to_string()),
        CanonicalType::from_doc_text("int"),
    );
    let info = TypeInfo {
        from_signature: CanonicalType::single("mixed"),
        from_attribute,
        from_doc: CanonicalType::new(),
    };

    assert_eq!(info.effective_for(v(8.0)).to_string(), "int|float");
    // No entry for 7.4: the default slot applies.
    assert_eq!(info.effective_for(v(7.4)).to_string(), "int");

    let plain = TypeInfo::from_signature(CanonicalType::single("string"));
    assert_eq!(plain.effective_for(v(7.4)).to_string(), "string");
}

#[test]
fn test_effective_type_uses_default_argument_under_any_name() {
    let mut from_attribute = VersionedTypeMap::new();
    from_attribute.insert(TypeMapKey::Version(v(8.0)), CanonicalType::single("never"));
    from_attribute.insert(
        TypeMapKey::Named("fallback".to_string()),
        CanonicalType::from_doc_text("string|false"),
    );
    let info = TypeInfo {
        from_signature: CanonicalType::single("mixed"),
        from_attribute,
        from_doc: CanonicalType::new(),
    };

    assert_eq!(info.effective_for(v(8.0)).to_string(), "never");
    assert_eq!(info.effective_for(v(7.4)).to_string(), "string|false");
}

#[test]
fn test_declared_type_only_for_typed_kinds() {
    let func = function("f", TypeInfo::from_signature(CanonicalType::single("int")));
    assert_eq!(func.kind(), ElementKind::Function);
    assert!(func.declared_type().is_some());
    assert!(func.kind().is_typed());

    let class = DeclaredElement::Class(ClassElement {
        header: ElementHeader::new("Foo", None),
        parent_class: None,
        interfaces: Vec::new(),
        is_final: false,
    });
    assert!(class.declared_type().is_none());
    assert!(class.params().is_empty());
    assert!(!class.kind().is_typed());

    let constant = DeclaredElement::Constant(ConstantElement {
        header: ElementHeader::new("PHP_EOL", None),
        value: Some("\"\\n\"".to_string()),
    });
    assert!(constant.declared_type().is_none());
    assert_eq!(constant.name(), "PHP_EOL");
}

#[test]
fn test_has_muted_problem_uses_current_version() {
    let mut func = function("f", TypeInfo::default());
    func.header_mut()
        .muted_problems
        .insert(ProblemKind(3), VersionSpecifier::Version(v(8.1)));
    func.header_mut()
        .muted_problems
        .insert(ProblemKind(5), VersionSpecifier::All);

    let ctx_81 = ResolverContext::default().with_current_version(v(8.1));
    let ctx_80 = ResolverContext::default().with_current_version(v(8.0));

    assert!(func.has_muted_problem(ProblemKind(3), &ctx_81));
    assert!(!func.has_muted_problem(ProblemKind(3), &ctx_80));
    assert!(func.has_muted_problem(ProblemKind(5), &ctx_80));
    assert!(!func.has_muted_problem(ProblemKind(9), &ctx_81));
}

#[test]
fn test_serialized_shape() {
    let mut func = function("strlen", TypeInfo::from_signature(CanonicalType::single("int")));
    func.header_mut().parse_error = Some(ResolveError::UnknownRangeBound("until".to_string()));
    func.header_mut().source_location = "standard/basic.php:12".to_string();

    let value = serde_json::to_value(&func).unwrap();
    assert_eq!(
        value,
        json!({
            "kind": "function",
            "header": {
                "name": "strlen",
                "parse_error": "unknown version range bound `until`",
                "muted_problems": {},
                "availability": null,
                "source_location": "standard/basic.php:12",
                "is_duplicate": false
            },
            "return_type": {"from_signature": ["int"]},
            "params": []
        })
    );
}
