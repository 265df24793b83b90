//! Whether an element exists in the targeted runtime version.

use crate::element::DeclaredElement;
use std::collections::BTreeSet;
use stubcheck_common::{ResolverContext, Version, VersionRegistry};

/// Source of the versions in which an element is declared.
///
/// The diff pipeline owns the real lookup; any
/// `Fn(&DeclaredElement) -> BTreeSet<Version>` closure works as one.
pub trait AvailabilityLookup {
    fn available_versions(&self, element: &DeclaredElement) -> BTreeSet<Version>;
}

impl<F> AvailabilityLookup for F
where
    F: Fn(&DeclaredElement) -> BTreeSet<Version>,
{
    fn available_versions(&self, element: &DeclaredElement) -> BTreeSet<Version> {
        self(element)
    }
}

/// Lookup computed from the element's own metadata.
///
/// Elements carrying a `parse_error` are never available: a marker that failed
/// to resolve must not read as "no restriction".
///
/// Lower bound: the greatest of the availability marker's `from` and every
/// `@since` tag, else the registry's first version. Upper bound: the least of
/// the marker's `to` and the version before the earliest `@removed` tag, else
/// the registry's latest version.
#[derive(Copy, Clone, Debug)]
pub struct RangeAvailability<'a> {
    registry: &'a VersionRegistry,
}

impl<'a> RangeAvailability<'a> {
    pub fn new(registry: &'a VersionRegistry) -> Self {
        Self { registry }
    }

    /// Inclusive bounds, or `None` when the element exists in no registry
    /// version. An element whose metadata failed to resolve exists in none.
    pub fn bounds(&self, element: &DeclaredElement) -> Option<(Version, Version)> {
        let header = element.header();
        if header.parse_error.is_some() {
            return None;
        }
        let range = header.availability;

        let from = range
            .map(|r| r.from)
            .into_iter()
            .chain(header.since.iter().copied())
            .max()
            .unwrap_or_else(|| self.registry.first());

        let removed_before = match header.removed.iter().min() {
            // Removed in or before the first known version: never available.
            Some(&removed) => Some(self.registry.predecessor(removed)?),
            None => None,
        };
        let to = range
            .and_then(|r| r.to)
            .into_iter()
            .chain(removed_before)
            .min()
            .unwrap_or_else(|| self.registry.latest());

        (from <= to).then_some((from, to))
    }
}

impl AvailabilityLookup for RangeAvailability<'_> {
    fn available_versions(&self, element: &DeclaredElement) -> BTreeSet<Version> {
        match self.bounds(element) {
            Some((from, to)) => self.registry.between(from, to).collect(),
            None => BTreeSet::new(),
        }
    }
}

/// True iff the context's current version is among the versions `lookup`
/// reports for `element`.
pub fn is_valid_for_current_version(
    element: &DeclaredElement,
    lookup: &impl AvailabilityLookup,
    ctx: &ResolverContext,
) -> bool {
    let valid = lookup
        .available_versions(element)
        .contains(&ctx.current_version());
    tracing::trace!(
        element = %element.header().catalog_key(),
        current = %ctx.current_version(),
        valid,
        "checked version compatibility"
    );
    valid
}

#[cfg(test)]
#[path = "../tests/compat_tests.rs"]
mod tests;
