//! Syntax-tree input model.
//!
//! These types mirror what the stub parser hands over for each declaration:
//! names, type annotations, attribute (metadata marker) groups and the few
//! per-kind facts the resolver carries through. They are plain serde data so
//! a parser in any language can dump them as JSON.

use crate::element::ElementKind;
use serde::{Deserialize, Serialize};

/// A multi-part name, e.g. `Foo\Bar` as `["Foo", "Bar"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn join(&self, separator: &str) -> String {
        self.parts.join(separator)
    }

    pub fn last(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }
}

/// Node that names a declared construct.
///
/// Parsers fill whichever of the three shapes they have: a resolved
/// namespaced name, a direct `name`, or the node's own `parts`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameNode {
    pub namespaced_name: Option<Name>,
    pub name: Option<Name>,
    pub parts: Vec<String>,
}

impl NameNode {
    pub fn namespaced<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self {
            namespaced_name: Some(Name::new(parts)),
            ..Self::default()
        }
    }

    pub fn named<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: Some(Name::new(parts)),
            ..Self::default()
        }
    }

    pub fn path<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// A type annotation from the syntax tree or a doc comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    /// `?T`
    Nullable { inner: Box<TypeNode> },
    /// `A|B|C`
    Union { types: Vec<TypeNode> },
    /// Single short name such as `int`.
    Identifier { name: String },
    /// Multi-part class name.
    Name { parts: Vec<String> },
    /// Type text taken from a doc comment, e.g. `int|string|null`.
    Doc { text: String },
    /// A bare type string.
    Text { value: String },
}

impl TypeNode {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn name<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self::Name {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn nullable(inner: TypeNode) -> Self {
        Self::Nullable {
            inner: Box::new(inner),
        }
    }

    pub fn union(types: Vec<TypeNode>) -> Self {
        Self::Union { types }
    }

    pub fn doc(text: impl Into<String>) -> Self {
        Self::Doc { text: text.into() }
    }
}

/// Literal or constant expression used as an attribute argument.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    String { value: String },
    Number { value: f64 },
    Array { items: Vec<ArrayItem> },
    ConstFetch { name: Name },
    ClassConstFetch { class: Name, constant: String },
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    pub fn array(items: Vec<ArrayItem>) -> Self {
        Self::Array { items }
    }

    /// Short description used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::String { .. } => "a string literal",
            Self::Number { .. } => "a number literal",
            Self::Array { .. } => "an array literal",
            Self::ConstFetch { .. } => "a constant",
            Self::ClassConstFetch { .. } => "a class constant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayItem {
    #[serde(default)]
    pub key: Option<Expr>,
    pub value: Expr,
}

impl ArrayItem {
    pub fn keyed(key: Expr, value: Expr) -> Self {
        Self {
            key: Some(key),
            value,
        }
    }

    pub fn positional(value: Expr) -> Self {
        Self { key: None, value }
    }
}

/// Attribute argument, optionally named (`from: '7.4'`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    #[serde(default)]
    pub name: Option<String>,
    pub value: Expr,
}

impl Arg {
    pub fn positional(value: Expr) -> Self {
        Self { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

/// Metadata marker attached to a declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: Name,
    #[serde(default)]
    pub args: Vec<Arg>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub attrs: Vec<Attribute>,
}

/// Function or method parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamNode {
    pub name: String,
    #[serde(default)]
    pub type_annotation: Option<TypeNode>,
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub attr_groups: Vec<AttributeGroup>,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_variadic: bool,
}

/// One declaration from a stub file.
///
/// Fields that do not apply to `kind` are left at their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeclarationNode {
    pub kind: ElementKind,
    pub name: NameNode,
    /// Qualified name of the owning class, for members.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub attr_groups: Vec<AttributeGroup>,
    /// Return type for functions and methods, declared type for properties.
    #[serde(default)]
    pub type_annotation: Option<TypeNode>,
    /// `@return` / `@var` type text.
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamNode>,
    /// Versions from `@since` tags.
    #[serde(default)]
    pub since: Vec<String>,
    /// Versions from `@removed` tags.
    #[serde(default)]
    pub removed: Vec<String>,
    #[serde(default)]
    pub extends: Option<Name>,
    #[serde(default)]
    pub implements: Vec<Name>,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Source text of a constant's value.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub location: String,
}

impl DeclarationNode {
    pub fn new(kind: ElementKind, name: NameNode) -> Self {
        Self {
            kind,
            name,
            parent: None,
            attr_groups: Vec::new(),
            type_annotation: None,
            doc_type: None,
            params: Vec::new(),
            since: Vec::new(),
            removed: Vec::new(),
            extends: None,
            implements: Vec::new(),
            is_final: false,
            is_static: false,
            value: None,
            location: String::new(),
        }
    }
}
