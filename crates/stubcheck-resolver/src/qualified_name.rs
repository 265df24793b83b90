//! Qualified-name resolution for syntax-tree nodes.

use crate::syntax::NameNode;
use stubcheck_common::ResolverContext;

/// Derive the canonical qualified name of a node.
///
/// 1. A resolved namespaced name wins: its parts joined with the separator.
/// 2. Otherwise a direct `name` contributes only its first part.
/// 3. Otherwise the node's own parts are joined.
///
/// Trailing separators are stripped. Malformed nodes degrade to an empty or
/// partial name rather than failing.
pub fn qualified_name(node: &NameNode, ctx: &ResolverContext) -> String {
    let separator = ctx.separator();

    if let Some(namespaced) = &node.namespaced_name {
        return strip_trailing(namespaced.join(separator), separator);
    }

    if let Some(name) = &node.name {
        return name.parts.first().cloned().unwrap_or_default();
    }

    let mut joined = String::new();
    for part in &node.parts {
        joined.push_str(part);
        joined.push_str(separator);
    }
    strip_trailing(joined, separator)
}

fn strip_trailing(mut name: String, separator: &str) -> String {
    if separator.is_empty() {
        return name;
    }
    while name.ends_with(separator) {
        name.truncate(name.len() - separator.len());
    }
    name
}

#[cfg(test)]
#[path = "../tests/qualified_name_tests.rs"]
mod tests;
