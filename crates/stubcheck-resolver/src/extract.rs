//! Extraction pass: syntax declarations and reflected objects to
//! [`DeclaredElement`]s.
//!
//! Marker failures never abort the pass. The first failure is stored on the
//! element header and the remaining markers and declarations are still
//! resolved.

use crate::availability::extract_availability_range;
use crate::canonical::CanonicalType;
use crate::element::{
    ClassElement, ConstantElement, DeclaredElement, ElementHeader, ElementKind, FunctionElement,
    MethodElement, Parameter, PropertyElement, TypeInfo,
};
use crate::normalize::{reflection_type_to_canonical, syntax_type_to_canonical};
use crate::qualified_name::qualified_name;
use crate::reflection::{ReflectionObject, ReflectionParam};
use crate::syntax::{AttributeGroup, DeclarationNode, ParamNode, TypeNode};
use crate::versioned_types::extract_versioned_types;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use stubcheck_common::{MutedProblemCatalog, ResolverContext, Version};

/// Leading version number of a `@since` / `@removed` tag body, e.g. `8.0`
/// in `8.0 Added the $flags parameter`.
static DOC_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("doc version pattern is valid"));

/// Resolve one syntax-tree declaration.
pub fn resolve_declaration(
    node: &DeclarationNode,
    ctx: &ResolverContext,
    muted: &MutedProblemCatalog,
) -> DeclaredElement {
    let name = qualified_name(&node.name, ctx);
    if name.is_empty() {
        tracing::warn!(kind = %node.kind, location = %node.location, "declaration has an empty qualified name");
    }

    let mut header = ElementHeader::new(name, node.parent.clone());
    header.source_location = node.location.clone();
    header.since = doc_versions(&node.since);
    header.removed = doc_versions(&node.removed);
    if let Some(problems) = muted.get(&header.catalog_key()) {
        header.muted_problems = problems.clone();
    }
    match extract_availability_range(&node.attr_groups, ctx) {
        Ok(range) => header.availability = range,
        Err(error) => header.record_error(error),
    }

    let element = match node.kind {
        ElementKind::Class => DeclaredElement::Class(ClassElement {
            parent_class: node.extends.as_ref().map(|name| name.join(ctx.separator())),
            interfaces: node
                .implements
                .iter()
                .map(|name| name.join(ctx.separator()))
                .collect(),
            is_final: node.is_final,
            header,
        }),
        ElementKind::Function => {
            let return_type = syntax_type_info(
                node.type_annotation.as_ref(),
                node.doc_type.as_deref(),
                &node.attr_groups,
                ctx,
                &mut header,
            );
            let params = syntax_params(&node.params, ctx, &mut header);
            DeclaredElement::Function(FunctionElement {
                header,
                return_type,
                params,
            })
        }
        ElementKind::Method => {
            let return_type = syntax_type_info(
                node.type_annotation.as_ref(),
                node.doc_type.as_deref(),
                &node.attr_groups,
                ctx,
                &mut header,
            );
            let params = syntax_params(&node.params, ctx, &mut header);
            DeclaredElement::Method(MethodElement {
                header,
                return_type,
                params,
                is_static: node.is_static,
                is_final: node.is_final,
            })
        }
        ElementKind::Property => {
            let ty = syntax_type_info(
                node.type_annotation.as_ref(),
                node.doc_type.as_deref(),
                &node.attr_groups,
                ctx,
                &mut header,
            );
            DeclaredElement::Property(PropertyElement {
                header,
                ty,
                is_static: node.is_static,
            })
        }
        ElementKind::Constant => DeclaredElement::Constant(ConstantElement {
            header,
            value: node.value.clone(),
        }),
    };

    tracing::trace!(kind = %element.kind(), name = element.name(), "resolved declaration");
    element
}

/// Resolve one reflected object. Reflection describes a single runtime, so
/// the result carries no availability range or doc tags.
pub fn resolve_reflection(object: &ReflectionObject, ctx: &ResolverContext) -> DeclaredElement {
    let mut header = ElementHeader::new(object.name.clone(), object.parent.clone());
    header.source_location = format!("reflection@{}", ctx.current_version());

    let ty = || TypeInfo::from_signature(reflection_type_to_canonical(object.ty.as_ref()));
    match object.kind {
        ElementKind::Class => DeclaredElement::Class(ClassElement {
            header,
            parent_class: object.parent_class.clone(),
            interfaces: object.interfaces.clone(),
            is_final: object.is_final,
        }),
        ElementKind::Function => DeclaredElement::Function(FunctionElement {
            header,
            return_type: ty(),
            params: reflection_params(&object.params),
        }),
        ElementKind::Method => DeclaredElement::Method(MethodElement {
            header,
            return_type: ty(),
            params: reflection_params(&object.params),
            is_static: object.is_static,
            is_final: object.is_final,
        }),
        ElementKind::Property => DeclaredElement::Property(PropertyElement {
            header,
            ty: ty(),
            is_static: object.is_static,
        }),
        ElementKind::Constant => DeclaredElement::Constant(ConstantElement {
            header,
            value: object.value.clone(),
        }),
    }
}

/// Flag every element whose (kind, parent, name) was already seen earlier in
/// `elements`. The first declaration stays unflagged. Returns how many were
/// flagged.
pub fn mark_duplicates(elements: &mut [DeclaredElement]) -> usize {
    let mut seen: FxHashSet<(ElementKind, Option<String>, String)> = FxHashSet::default();
    let mut flagged = 0;
    for element in elements.iter_mut() {
        let kind = element.kind();
        let header = element.header_mut();
        if !seen.insert((kind, header.parent.clone(), header.name.clone())) {
            header.is_duplicate = true;
            flagged += 1;
        }
    }
    if flagged > 0 {
        tracing::debug!(flagged, "marked duplicate declarations");
    }
    flagged
}

fn syntax_type_info(
    annotation: Option<&TypeNode>,
    doc_type: Option<&str>,
    groups: &[AttributeGroup],
    ctx: &ResolverContext,
    header: &mut ElementHeader,
) -> TypeInfo {
    let from_attribute = match extract_versioned_types(groups, ctx) {
        Ok(map) => map,
        Err(error) => {
            header.record_error(error);
            Default::default()
        }
    };
    TypeInfo {
        from_signature: syntax_type_to_canonical(annotation, ctx),
        from_attribute,
        from_doc: doc_type.map(CanonicalType::from_doc_text).unwrap_or_default(),
    }
}

fn syntax_params(
    params: &[ParamNode],
    ctx: &ResolverContext,
    header: &mut ElementHeader,
) -> Vec<Parameter> {
    params
        .iter()
        .map(|param| {
            let types = syntax_type_info(
                param.type_annotation.as_ref(),
                param.doc_type.as_deref(),
                &param.attr_groups,
                ctx,
                header,
            );
            let availability = match extract_availability_range(&param.attr_groups, ctx) {
                Ok(range) => range,
                Err(error) => {
                    header.record_error(error);
                    None
                }
            };
            Parameter {
                name: param.name.clone(),
                types,
                availability,
                is_optional: param.is_optional,
                is_variadic: param.is_variadic,
            }
        })
        .collect()
}

fn reflection_params(params: &[ReflectionParam]) -> Vec<Parameter> {
    params
        .iter()
        .map(|param| Parameter {
            name: param.name.clone(),
            types: TypeInfo::from_signature(reflection_type_to_canonical(param.ty.as_ref())),
            availability: None,
            is_optional: param.is_optional,
            is_variadic: param.is_variadic,
        })
        .collect()
}

/// Versions named by doc tags. Tags without a leading version are skipped.
fn doc_versions(tags: &[String]) -> Vec<Version> {
    tags.iter()
        .filter_map(|tag| {
            let captured = DOC_VERSION_RE.captures(tag)?.get(1)?;
            match Version::parse(captured.as_str()) {
                Ok(version) => Some(version),
                Err(error) => {
                    tracing::debug!(tag = %tag, %error, "skipping doc version tag");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/extract_tests.rs"]
mod tests;
