use serde::Serializer;
use stubcheck_common::{Version, VersionError};

/// Per-declaration extraction failure.
///
/// Raised for metadata markers whose arguments do not have one of the
/// expected shapes. The failure is recorded on the element and extraction of
/// other declarations continues.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("`{marker}` has {count} arguments")]
    UnexpectedArgumentCount { marker: &'static str, count: usize },

    #[error("`{marker}` is missing argument #{index}")]
    MissingArgument { marker: &'static str, index: usize },

    #[error("`{marker}` argument #{index} must be named")]
    UnnamedArgument { marker: &'static str, index: usize },

    #[error("`{marker}` expects {expected} for {position}, found {found}")]
    UnexpectedValue {
        marker: &'static str,
        position: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{marker}` has an empty array literal")]
    EmptyArray { marker: &'static str },

    #[error("unknown version range bound `{0}`")]
    UnknownRangeBound(String),

    #[error("version range bound `{0}` given twice")]
    DuplicateRangeBound(String),

    #[error("version range {from}..{to} is inverted")]
    InvertedRange { from: Version, to: Version },

    #[error(transparent)]
    Version(#[from] VersionError),
}

pub(crate) fn serialize_error<S>(error: &Option<ResolveError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}
