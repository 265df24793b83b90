//! Type normalizers.
//!
//! Reflection descriptors and syntax annotations describe the same types in
//! different shapes. Both are reduced to a [`CanonicalType`] here so the diff
//! pipeline compares like with like.

use crate::canonical::{CanonicalType, MIXED, NULLABLE_PREFIX};
use crate::reflection::ReflectionType;
use crate::syntax::TypeNode;
use stubcheck_common::ResolverContext;

/// Normalize a reflected type.
///
/// A named type gets the `?` prefix when it allows null, except `mixed`,
/// which already includes null. Union members are emitted in declared order
/// without any prefix; their nullability is an explicit `null` member.
pub fn reflection_type_to_canonical(ty: Option<&ReflectionType>) -> CanonicalType {
    match ty {
        None => CanonicalType::new(),
        Some(ReflectionType::Named(named)) => {
            if named.allows_null && named.name != MIXED {
                CanonicalType::single(format!("{NULLABLE_PREFIX}{}", named.name))
            } else {
                CanonicalType::single(named.name.clone())
            }
        }
        Some(ReflectionType::Union { types }) => {
            types.iter().map(|member| member.name.clone()).collect()
        }
    }
}

/// Normalize a syntax-tree type annotation.
///
/// Unions are normalized member by member and concatenated; doc-comment text
/// is split on `|` as-is. Every other node becomes one name.
pub fn syntax_type_to_canonical(ty: Option<&TypeNode>, ctx: &ResolverContext) -> CanonicalType {
    match ty {
        None => CanonicalType::new(),
        Some(TypeNode::Union { types }) => {
            let mut result = CanonicalType::new();
            for member in types {
                result.append(syntax_type_to_canonical(Some(member), ctx));
            }
            result
        }
        Some(TypeNode::Doc { text }) => CanonicalType::from_doc_text(text),
        Some(other) => CanonicalType::single(single_type_name(other, ctx)),
    }
}

fn single_type_name(node: &TypeNode, ctx: &ResolverContext) -> String {
    let (nullable, node) = match node {
        TypeNode::Nullable { inner } => (true, inner.as_ref()),
        other => (false, other),
    };

    let name = match node {
        TypeNode::Identifier { name } => name.clone(),
        TypeNode::Name { parts } => parts.join(ctx.separator()),
        TypeNode::Text { value } => value.clone(),
        other => {
            tracing::warn!(inner = ?other, "nullable wrapper around a type with no single name");
            String::new()
        }
    };

    if nullable {
        format!("{NULLABLE_PREFIX}{name}")
    } else {
        name
    }
}

#[cfg(test)]
#[path = "../tests/normalize_tests.rs"]
mod tests;
