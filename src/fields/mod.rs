//
//  teamcity-cli
//  fields/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Partial Response Field Selection
//!
//! TeamCity accepts a `fields` query parameter that tells the server which
//! attributes and nested objects to include in a response. This module models
//! that expression as an immutable tree.
//!
//! ## Grammar
//!
//! ```text
//! selection := node ("," node)*
//! node      := name | name "(" selection? ")"
//! ```
//!
//! ## Overview
//!
//! - [`Fields`]: an ordered top-level selection. The empty selection renders
//!   as `""`, which means "use the server's default projection".
//! - [`FieldNode`]: a single named field, optionally carrying a nested
//!   selection. A nested selection with no children renders as `name()`,
//!   which asks the server for the object with its own default sub-fields.
//! - [`fields!`](crate::fields!): literal syntax for selections.
//! - [`selectors`]: typed builders named after TeamCity's entities.
//!
//! ## Example
//!
//! ```rust
//! use teamcity_cli::fields;
//! use teamcity_cli::fields::Fields;
//!
//! let base = fields![id, name];
//! let detailed = base.with_nested("builds", fields![count]);
//!
//! assert_eq!(base.to_string(), "id,name");
//! assert_eq!(detailed.to_string(), "id,name,builds(count)");
//! assert_eq!(Fields::new().to_string(), "");
//! ```
//!
//! ## Notes
//!
//! - Names are never validated against a schema; unknown names pass through
//!   and the server decides whether to accept them.
//! - Every "add" operation returns a new selection. Nested selections sit
//!   behind an [`Arc`], so derived selections share their subtrees with the
//!   selection they were derived from.

pub mod selectors;

pub use selectors::*;

use std::fmt;
use std::sync::Arc;

/// A single named field, optionally with a nested sub-selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    name: String,
    selection: Option<Fields>,
}

impl FieldNode {
    /// Creates a field that is included as a bare name.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selection: None,
        }
    }

    /// Creates a field that carries a nested sub-selection.
    pub fn nested(name: impl Into<String>, selection: impl Into<Fields>) -> Self {
        Self {
            name: name.into(),
            selection: Some(selection.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The nested selection, or `None` for a scalar field.
    pub fn selection(&self) -> Option<&Fields> {
        self.selection.as_ref()
    }
}

impl fmt::Display for FieldNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selection {
            Some(selection) => write!(f, "{}({})", self.name, selection),
            None => f.write_str(&self.name),
        }
    }
}

/// An ordered, immutable field selection.
///
/// `Fields` is cheap to clone: the node list is reference counted and every
/// derived selection copies only the top-level list, sharing all nested
/// subtrees with its origin.
///
/// # Example
///
/// ```rust
/// use teamcity_cli::fields::Fields;
///
/// let base = Fields::new().with("id").with("href");
/// let with_name = base.with("name");
///
/// // The base selection is untouched.
/// assert_eq!(base.to_string(), "id,href");
/// assert_eq!(with_name.to_string(), "id,href,name");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    nodes: Arc<Vec<FieldNode>>,
}

impl Fields {
    /// Creates the empty selection (server default projection).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new selection that also includes `name` as a bare field.
    pub fn with(&self, name: impl Into<String>) -> Self {
        self.with_node(FieldNode::scalar(name))
    }

    /// Returns a new selection that includes `name` only when `include` is set.
    ///
    /// This is the boolean-flag form of [`Fields::with`]: `false` leaves the
    /// selection unchanged.
    pub fn with_if(&self, name: impl Into<String>, include: bool) -> Self {
        if include {
            self.with(name)
        } else {
            self.clone()
        }
    }

    /// Returns a new selection that includes `name(sub)`.
    pub fn with_nested(&self, name: impl Into<String>, sub: impl Into<Fields>) -> Self {
        self.with_node(FieldNode::nested(name, sub))
    }

    /// Returns a new selection with `node` appended.
    ///
    /// The node always goes last, even when a field of the same name is
    /// already selected: `serialize(with_node(n))` is `serialize(self)`
    /// followed by `,n`. Use [`Fields::without`] first to replace a field.
    pub fn with_node(&self, node: FieldNode) -> Self {
        let mut nodes: Vec<FieldNode> = self.nodes.as_ref().clone();
        nodes.push(node);
        Self {
            nodes: Arc::new(nodes),
        }
    }

    /// Returns a new selection without the field called `name`.
    pub fn without(&self, name: &str) -> Self {
        let nodes: Vec<FieldNode> = self
            .nodes
            .iter()
            .filter(|node| node.name != name)
            .cloned()
            .collect();
        Self {
            nodes: Arc::new(nodes),
        }
    }

    /// The first field called `name`.
    pub fn get(&self, name: &str) -> Option<&FieldNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The value for the `fields` query parameter, or `None` when the
    /// selection is empty and the parameter must be omitted.
    pub fn query_value(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }

    #[cfg(test)]
    pub(crate) fn shares_subtree_with(&self, other: &Fields) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl From<FieldNode> for Fields {
    fn from(node: FieldNode) -> Self {
        Fields::new().with_node(node)
    }
}

impl<S: Into<String>> FromIterator<S> for Fields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter().fold(Fields::new(), |acc, name| acc.with(name))
    }
}

/// Builds a [`Fields`] selection from literal field names.
///
/// Bare identifiers become scalar fields and `name(...)` becomes a nested
/// selection. `name()` is preserved as an explicitly empty sub-selection.
///
/// ```rust
/// use teamcity_cli::fields;
///
/// let selection = fields![id, buildType(id, name), builds(count), investigations()];
/// assert_eq!(
///     selection.to_string(),
///     "id,buildType(id,name),builds(count),investigations()"
/// );
/// assert!(fields![].is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::fields::Fields::new()
    };
    ($($tokens:tt)+) => {
        $crate::__fields_munch!($crate::fields::Fields::new(); $($tokens)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __fields_munch {
    ($acc:expr;) => {
        $acc
    };
    ($acc:expr; $name:ident ( $($inner:tt)* ) $(, $($rest:tt)*)?) => {
        $crate::__fields_munch!(
            $acc.with_nested(stringify!($name), $crate::fields!($($inner)*));
            $($($rest)*)?
        )
    };
    ($acc:expr; $name:ident $(, $($rest:tt)*)?) => {
        $crate::__fields_munch!($acc.with(stringify!($name)); $($($rest)*)?)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_renders_empty_string() {
        assert_eq!(Fields::new().to_string(), "");
        assert_eq!(Fields::new().query_value(), None);
    }

    #[test]
    fn test_nested_selection_format() {
        let fields = Fields::new()
            .with("id")
            .with_nested("builds", Fields::new().with("count"));
        assert_eq!(fields.to_string(), "id,builds(count)");
        assert_eq!(fields.query_value().as_deref(), Some("id,builds(count)"));
    }

    #[test]
    fn test_empty_nested_selection_keeps_parentheses() {
        let fields = Fields::new().with_nested("investigations", Fields::new());
        assert_eq!(fields.to_string(), "investigations()");
        assert_ne!(fields.to_string(), Fields::new().to_string());
    }

    #[test]
    fn test_adding_child_appends_to_serialization() {
        let sub = fields![count, href];
        let node = fields![id, name];
        let added = node.with_nested("builds", sub.clone());
        assert_eq!(added.to_string(), format!("{},builds({})", node, sub));

        let from_empty = Fields::new().with_nested("builds", sub.clone());
        assert_eq!(from_empty.to_string(), format!("builds({})", sub));
    }

    #[test]
    fn test_derived_selection_leaves_base_untouched() {
        let base = fields![id];
        let derived = base.with("name");
        assert_eq!(base.to_string(), "id");
        assert_eq!(derived.to_string(), "id,name");
    }

    #[test]
    fn test_derived_selection_shares_nested_subtrees() {
        let sub = fields![count];
        let base = Fields::new().with_nested("builds", sub.clone());
        let derived = base.with("id");

        let shared = derived.get("builds").and_then(FieldNode::selection).unwrap();
        assert!(shared.shares_subtree_with(&sub));
    }

    #[test]
    fn test_with_if_omits_false_flags() {
        let fields = Fields::new()
            .with_if("id", true)
            .with_if("name", false)
            .with_if("href", true);
        assert_eq!(fields.to_string(), "id,href");
    }

    #[test]
    fn test_readding_a_field_appends_it() {
        let node = fields![id, builds];
        let sub = fields![count];
        let added = node.with_nested("builds", sub.clone());
        assert_eq!(added.to_string(), format!("{},builds({})", node, sub));
        assert_eq!(added.to_string(), "id,builds,builds(count)");
        assert_eq!(added.len(), 3);
    }

    #[test]
    fn test_without_then_with_replaces_a_field() {
        let fields = fields![id, builds]
            .without("builds")
            .with_nested("builds", fields![count]);
        assert_eq!(fields.to_string(), "id,builds(count)");
    }

    #[test]
    fn test_without_removes_field() {
        let fields = fields![id, name, href].without("name");
        assert_eq!(fields.to_string(), "id,href");
    }

    #[test]
    fn test_macro_deep_nesting() {
        let fields = fields![build(id, buildType(id, project(name)))];
        assert_eq!(fields.to_string(), "build(id,buildType(id,project(name)))");
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let fields: Fields = ["definitelyNotAField", "id"].into_iter().collect();
        assert_eq!(fields.to_string(), "definitelyNotAField,id");
    }
}
