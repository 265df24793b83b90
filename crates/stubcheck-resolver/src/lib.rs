//! Version-aware type and availability resolver.
//!
//! Takes syntax-tree declarations (as produced by an external stub parser) and
//! introspection objects (as dumped from the runtime) and resolves both into
//! [`DeclaredElement`]s that a diff pipeline can compare:
//!
//! - **Qualified names**: canonical namespaced name of a node
//! - **Canonical types**: source-agnostic type lists from reflection
//!   descriptors and syntax annotations
//! - **Versioned types**: per-version type overrides from `LanguageLevelTypeAware`
//! - **Availability**: version ranges from `PhpStormStubsElementAvailable`
//! - **Compatibility**: whether an element exists in the targeted runtime version
//!
//! Every entry point takes a [`ResolverContext`] explicitly.

pub mod availability;
pub mod canonical;
pub mod compat;
pub mod element;
mod error;
pub mod extract;
pub mod markers;
pub mod normalize;
pub mod qualified_name;
pub mod reflection;
pub mod syntax;
pub mod versioned_types;

pub use availability::{VersionRange, extract_availability_range};
pub use canonical::CanonicalType;
pub use compat::{AvailabilityLookup, RangeAvailability, is_valid_for_current_version};
pub use element::{
    ClassElement, ConstantElement, DeclaredElement, ElementHeader, ElementKind, FunctionElement,
    MethodElement, Parameter, PropertyElement, TypeInfo,
};
pub use error::ResolveError;
pub use extract::{mark_duplicates, resolve_declaration, resolve_reflection};
pub use markers::MarkerKind;
pub use normalize::{reflection_type_to_canonical, syntax_type_to_canonical};
pub use qualified_name::qualified_name;
pub use versioned_types::{TypeMapKey, VersionedTypeMap, extract_versioned_types};

pub use stubcheck_common::{ResolverContext, Version, VersionRegistry};
