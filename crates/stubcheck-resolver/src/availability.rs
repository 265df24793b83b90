//! Availability ranges from `PhpStormStubsElementAvailable`.
//!
//! The marker is written in three shapes, recognised in this order:
//!
//! ```php
//! #[PhpStormStubsElementAvailable(from: '7.0', to: '7.4')]   // both bounds
//! #[PhpStormStubsElementAvailable(['7.4'])]                 // lower bound only
//! #[PhpStormStubsElementAvailable('8.0')]                   // one bound, other from the registry
//! #[PhpStormStubsElementAvailable(to: '7.4')]
//! ```

use crate::error::ResolveError;
use crate::markers::{MarkerKind, find_marker, version_from_expr};
use crate::syntax::{Arg, ArrayItem, AttributeGroup, Expr};
use serde::Serialize;
use stubcheck_common::{ResolverContext, Version};

const KIND: MarkerKind = MarkerKind::ElementAvailable;

/// Inclusive version interval. `to` is absent only for the array-literal
/// shape, which records a lower bound alone.
///
/// Explicit `from`/`to` pairs are checked for order. A single bound that lies
/// beyond the registry (`'8.5'` against a registry ending at 8.4) keeps the
/// registry's edge as its other end and so may describe an empty interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionRange {
    pub from: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Version>,
}

impl VersionRange {
    pub fn new(from: Version, to: Version) -> Result<Self, ResolveError> {
        if from > to {
            return Err(ResolveError::InvertedRange { from, to });
        }
        Ok(Self { from, to: Some(to) })
    }

    pub fn from_only(from: Version) -> Self {
        Self { from, to: None }
    }

    pub fn contains(&self, version: Version) -> bool {
        version >= self.from && self.to.is_none_or(|to| version <= to)
    }
}

/// Argument shapes of the availability marker.
#[derive(Debug)]
enum AvailabilityPayload<'a> {
    /// Two named bounds.
    Bounds(&'a Arg, &'a Arg),
    /// A single array literal.
    List(&'a [ArrayItem]),
    /// A single scalar, optionally named.
    Scalar { name: Option<&'a str>, value: &'a Expr },
}

impl<'a> AvailabilityPayload<'a> {
    fn classify(args: &'a [Arg]) -> Result<Self, ResolveError> {
        match args {
            [first, second] => Ok(Self::Bounds(first, second)),
            [only] => match &only.value {
                Expr::Array { items } => Ok(Self::List(items)),
                value => Ok(Self::Scalar {
                    name: only.name.as_deref(),
                    value,
                }),
            },
            _ => Err(ResolveError::UnexpectedArgumentCount {
                marker: KIND.short_name(),
                count: args.len(),
            }),
        }
    }

    fn into_range(self, ctx: &ResolverContext) -> Result<VersionRange, ResolveError> {
        match self {
            Self::Bounds(first, second) => {
                let mut from = None;
                let mut to = None;
                for (index, arg) in [first, second].into_iter().enumerate() {
                    let name = arg.name.as_deref().ok_or(ResolveError::UnnamedArgument {
                        marker: KIND.short_name(),
                        index,
                    })?;
                    let slot = match name {
                        "from" => &mut from,
                        "to" => &mut to,
                        other => return Err(ResolveError::UnknownRangeBound(other.to_string())),
                    };
                    if slot.is_some() {
                        return Err(ResolveError::DuplicateRangeBound(name.to_string()));
                    }
                    *slot = Some(version_from_expr(&arg.value, KIND, "a range bound")?);
                }
                match (from, to) {
                    (Some(from), Some(to)) => VersionRange::new(from, to),
                    _ => Err(ResolveError::MissingArgument {
                        marker: KIND.short_name(),
                        index: 1,
                    }),
                }
            }
            Self::List(items) => {
                let first = items.first().ok_or(ResolveError::EmptyArray {
                    marker: KIND.short_name(),
                })?;
                match &first.value {
                    Expr::String { value } => Ok(VersionRange::from_only(Version::parse(value)?)),
                    other => Err(ResolveError::UnexpectedValue {
                        marker: KIND.short_name(),
                        position: "the first array element",
                        expected: "a string literal",
                        found: other.kind_name(),
                    }),
                }
            }
            Self::Scalar { name, value } => {
                let bound = version_from_expr(value, KIND, "the range bound")?;
                let registry = ctx.registry();
                let (from, to) = match name {
                    None | Some("from") => (bound, registry.latest()),
                    Some(_) => (registry.first(), bound),
                };
                if from > to {
                    tracing::debug!(%from, %to, "availability bound lies outside the registry");
                }
                Ok(VersionRange { from, to: Some(to) })
            }
        }
    }
}

/// Read the availability range from a declaration's attribute groups.
///
/// `Ok(None)` means there is no marker and the element is available across
/// the whole registry.
pub fn extract_availability_range(
    groups: &[AttributeGroup],
    ctx: &ResolverContext,
) -> Result<Option<VersionRange>, ResolveError> {
    let Some(marker) = find_marker(groups, KIND) else {
        return Ok(None);
    };
    let range = AvailabilityPayload::classify(&marker.args)?.into_range(ctx)?;
    tracing::debug!(from = %range.from, to = ?range.to.map(|v| v.to_string()), "resolved availability range");
    Ok(Some(range))
}

#[cfg(test)]
#[path = "../tests/availability_tests.rs"]
mod tests;
