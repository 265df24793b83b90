//! Declared elements: the resolved record handed to the diff pipeline.
//!
//! Every element kind shares an [`ElementHeader`]; the variant payload carries
//! the per-kind facts. Elements are built once by the extraction pass and are
//! only touched afterwards by duplicate marking.

use crate::availability::VersionRange;
use crate::canonical::CanonicalType;
use crate::error::{ResolveError, serialize_error};
use crate::versioned_types::VersionedTypeMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use stubcheck_common::{MutedProblemMap, ProblemKind, ResolverContext, Version, is_suppressed};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Class,
    Function,
    Method,
    Property,
    Constant,
}

impl ElementKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::Method => "method",
            Self::Property => "property",
            Self::Constant => "constant",
        }
    }

    /// Kinds that carry a declared type.
    pub const fn is_typed(self) -> bool {
        matches!(self, Self::Function | Self::Method | Self::Property)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State shared by every element kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ElementHeader {
    pub name: String,
    /// Qualified name of the owning class, for members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// First marker failure seen while resolving this element.
    #[serde(serialize_with = "serialize_error")]
    pub parse_error: Option<ResolveError>,
    pub muted_problems: MutedProblemMap,
    pub availability: Option<VersionRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub since: Vec<Version>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<Version>,
    pub source_location: String,
    pub is_duplicate: bool,
}

impl ElementHeader {
    pub fn new(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent,
            ..Self::default()
        }
    }

    /// Key used for muted-problem lookups: `Parent::name` for members, the
    /// bare qualified name otherwise.
    pub fn catalog_key(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{parent}::{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Keep the first failure; later ones are only logged.
    pub fn record_error(&mut self, error: ResolveError) {
        tracing::warn!(element = %self.catalog_key(), %error, "failed to resolve metadata marker");
        if self.parse_error.is_none() {
            self.parse_error = Some(error);
        }
    }
}

/// Type information for one typed element or parameter, kept per source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    /// From the syntax annotation.
    pub from_signature: CanonicalType,
    /// From `LanguageLevelTypeAware`.
    #[serde(skip_serializing_if = "VersionedTypeMap::is_empty")]
    pub from_attribute: VersionedTypeMap,
    /// From the `@return` / `@var` / `@param` doc tag.
    #[serde(skip_serializing_if = "CanonicalType::is_empty")]
    pub from_doc: CanonicalType,
}

impl TypeInfo {
    pub fn from_signature(ty: CanonicalType) -> Self {
        Self {
            from_signature: ty,
            ..Self::default()
        }
    }

    /// The type to compare for `version`: the attribute entry for that
    /// version, else the attribute's default argument (whatever it was named),
    /// else the signature type.
    pub fn effective_for(&self, version: Version) -> &CanonicalType {
        self.from_attribute
            .get_version(version)
            .or_else(|| self.from_attribute.default_type())
            .unwrap_or(&self.from_signature)
    }

    pub fn is_empty(&self) -> bool {
        self.from_signature.is_empty() && self.from_attribute.is_empty() && self.from_doc.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub types: TypeInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<VersionRange>,
    pub is_optional: bool,
    pub is_variadic: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassElement {
    pub header: ElementHeader,
    pub parent_class: Option<String>,
    pub interfaces: Vec<String>,
    pub is_final: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionElement {
    pub header: ElementHeader,
    pub return_type: TypeInfo,
    pub params: Vec<Parameter>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MethodElement {
    pub header: ElementHeader,
    pub return_type: TypeInfo,
    pub params: Vec<Parameter>,
    pub is_static: bool,
    pub is_final: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyElement {
    pub header: ElementHeader,
    pub ty: TypeInfo,
    pub is_static: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConstantElement {
    pub header: ElementHeader,
    pub value: Option<String>,
}

/// A resolved declaration of any kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclaredElement {
    Class(ClassElement),
    Function(FunctionElement),
    Method(MethodElement),
    Property(PropertyElement),
    Constant(ConstantElement),
}

impl DeclaredElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Class(_) => ElementKind::Class,
            Self::Function(_) => ElementKind::Function,
            Self::Method(_) => ElementKind::Method,
            Self::Property(_) => ElementKind::Property,
            Self::Constant(_) => ElementKind::Constant,
        }
    }

    pub fn header(&self) -> &ElementHeader {
        match self {
            Self::Class(e) => &e.header,
            Self::Function(e) => &e.header,
            Self::Method(e) => &e.header,
            Self::Property(e) => &e.header,
            Self::Constant(e) => &e.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut ElementHeader {
        match self {
            Self::Class(e) => &mut e.header,
            Self::Function(e) => &mut e.header,
            Self::Method(e) => &mut e.header,
            Self::Property(e) => &mut e.header,
            Self::Constant(e) => &mut e.header,
        }
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    /// Return type for functions and methods, declared type for properties.
    pub fn declared_type(&self) -> Option<&TypeInfo> {
        match self {
            Self::Function(e) => Some(&e.return_type),
            Self::Method(e) => Some(&e.return_type),
            Self::Property(e) => Some(&e.ty),
            Self::Class(_) | Self::Constant(_) => None,
        }
    }

    pub fn params(&self) -> &[Parameter] {
        match self {
            Self::Function(e) => &e.params,
            Self::Method(e) => &e.params,
            _ => &[],
        }
    }

    pub fn availability(&self) -> Option<VersionRange> {
        self.header().availability
    }

    pub fn has_muted_problem(&self, kind: ProblemKind, ctx: &ResolverContext) -> bool {
        is_suppressed(kind, &self.header().muted_problems, ctx.current_version())
    }

    pub fn is_duplicate(&self) -> bool {
        self.header().is_duplicate
    }

    pub fn parse_error(&self) -> Option<&ResolveError> {
        self.header().parse_error.as_ref()
    }
}

#[cfg(test)]
#[path = "../tests/element_tests.rs"]
mod tests;
