//! Introspection input model, as dumped from the runtime's reflection API.

use crate::element::ElementKind;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    #[serde(default)]
    pub allows_null: bool,
}

impl NamedType {
    pub fn new(name: impl Into<String>, allows_null: bool) -> Self {
        Self {
            name: name.into(),
            allows_null,
        }
    }
}

/// A reflected type: one named type, or a union whose nullability is an
/// explicit `null` member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReflectionType {
    Named(NamedType),
    Union { types: Vec<NamedType> },
}

impl ReflectionType {
    pub fn named(name: impl Into<String>, allows_null: bool) -> Self {
        Self::Named(NamedType::new(name, allows_null))
    }

    pub fn union<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::Union {
            types: names
                .into_iter()
                .map(|name| NamedType::new(name, false))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionParam {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<ReflectionType>,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_variadic: bool,
}

/// One reflected entity. `name` is already fully qualified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionObject {
    pub kind: ElementKind,
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// Return type for functions and methods, declared type for properties.
    #[serde(default, rename = "type")]
    pub ty: Option<ReflectionType>,
    #[serde(default)]
    pub params: Vec<ReflectionParam>,
    #[serde(default)]
    pub parent_class: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub value: Option<String>,
}

impl ReflectionObject {
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            parent: None,
            ty: None,
            params: Vec::new(),
            parent_class: None,
            interfaces: Vec::new(),
            is_final: false,
            is_static: false,
            value: None,
        }
    }
}
