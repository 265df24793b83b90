//! Metadata markers (attributes) the resolver understands.

use crate::error::ResolveError;
use crate::syntax::{Attribute, AttributeGroup, Expr, Name};
use stubcheck_common::Version;

/// Attribute kinds that carry version metadata.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `#[LanguageLevelTypeAware(['8.0' => 'int|false'], default: 'int')]`
    LanguageLevelTypeAware,
    /// `#[PhpStormStubsElementAvailable(from: '7.4', to: '8.0')]`
    ElementAvailable,
}

impl MarkerKind {
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::LanguageLevelTypeAware => "LanguageLevelTypeAware",
            Self::ElementAvailable => "PhpStormStubsElementAvailable",
        }
    }

    /// Namespace parts of the fully-qualified attribute class.
    pub const fn namespace(self) -> &'static [&'static str] {
        match self {
            Self::LanguageLevelTypeAware => &["JetBrains", "PhpStorm", "Internal"],
            Self::ElementAvailable => &["JetBrains", "PhpStorm", "Internal"],
        }
    }

    /// True for the fully-qualified attribute name or its bare short name.
    pub fn matches(self, name: &Name) -> bool {
        let Some((last, namespace)) = name.parts.split_last() else {
            return false;
        };
        if last != self.short_name() {
            return false;
        }
        namespace.is_empty()
            || (namespace.len() == self.namespace().len()
                && namespace.iter().zip(self.namespace()).all(|(a, b)| a == b))
    }
}

/// First attribute of `kind` across all groups. Declarations are expected to
/// carry at most one of each kind; any later ones are ignored.
pub fn find_marker(groups: &[AttributeGroup], kind: MarkerKind) -> Option<&Attribute> {
    groups
        .iter()
        .flat_map(|group| group.attrs.iter())
        .find(|attr| kind.matches(&attr.name))
}

/// Read a version from a string or number literal.
pub(crate) fn version_from_expr(
    expr: &Expr,
    marker: MarkerKind,
    position: &'static str,
) -> Result<Version, ResolveError> {
    match expr {
        Expr::String { value } => Ok(Version::parse(value)?),
        Expr::Number { value } => Ok(Version::new(*value)?),
        other => Err(ResolveError::UnexpectedValue {
            marker: marker.short_name(),
            position,
            expected: "a version literal",
            found: other.kind_name(),
        }),
    }
}

#[cfg(test)]
#[path = "../tests/markers_tests.rs"]
mod tests;
