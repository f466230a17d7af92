// HED Rust - Hierarchical Event Descriptor validation
//
// Copyright (c) 2026 the hed-rust contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The parsed HED string model.
//!
//! A [`ParsedHedString`] is a forest of tags and groups with every tag
//! resolved (or marked unresolvable) against its schema. Groups are
//! classified at construction: whether a group is a definition or a temporal
//! (Onset/Offset/Inset) group never changes afterwards, so validators read
//! flags instead of re-walking children.

use crate::span::Span;
use hed_schema::{HedSchema, HedSchemas, TagIndex};
use std::fmt;

/// One node of the parsed forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedNode {
    Tag(ParsedTag),
    Group(ParsedGroup),
}

impl ParsedNode {
    pub fn span(&self) -> Span {
        match self {
            Self::Tag(tag) => tag.span(),
            Self::Group(group) => group.span(),
        }
    }
}

/// A single tag, resolved against its schema where possible.
///
/// An unresolvable tag (unknown name, unknown prefix, ambiguous short form)
/// stays in the forest with `entry` unset; the issue explaining why was
/// already reported at parse time, and validators skip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    /// The tag text as written, whitespace trimmed.
    pub(crate) text: String,
    pub(crate) span: Span,
    /// Schema namespace prefix, empty for the default schema.
    pub(crate) prefix: String,
    /// Long form, prefix included; falls back to the written text when the
    /// tag did not resolve.
    pub(crate) canonical: String,
    /// Lowercased canonical form, used for order- and case-insensitive
    /// comparison.
    pub(crate) formatted: String,
    pub(crate) entry: Option<TagIndex>,
    pub(crate) is_extension: bool,
    /// Value (takes-value nodes) or extension text, original casing.
    pub(crate) value: Option<String>,
    pub(crate) has_placeholder: bool,
}

impl ParsedTag {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The schema namespace prefix, empty for the default schema.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The canonical long form (prefix included), or the written text if
    /// the tag did not resolve.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Lowercased canonical form for comparisons.
    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    pub fn entry(&self) -> Option<TagIndex> {
        self.entry
    }

    pub fn is_resolved(&self) -> bool {
        self.entry.is_some()
    }

    pub fn is_extension(&self) -> bool {
        self.is_extension
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn has_placeholder(&self) -> bool {
        self.has_placeholder
    }

    /// The schema this tag resolved against.
    pub fn schema<'a>(&self, schemas: &'a HedSchemas) -> Option<&'a HedSchema> {
        schemas.get(&self.prefix)
    }

    /// Whether this tag's schema node sits at or below the node with the
    /// given short name.
    pub fn is_descendant_of(&self, schemas: &HedSchemas, ancestor_short: &str) -> bool {
        match (self.entry, self.schema(schemas)) {
            (Some(entry), Some(schema)) => schema.is_descendant_of(entry, ancestor_short),
            _ => false,
        }
    }
}

impl fmt::Display for ParsedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// A parenthesized group, classified at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGroup {
    pub(crate) span: Span,
    pub(crate) children: Vec<ParsedNode>,
    pub(crate) is_definition_group: bool,
    pub(crate) is_onset_group: bool,
    pub(crate) is_offset_group: bool,
    pub(crate) is_inset_group: bool,
    /// The declared name of the definition, for definition groups.
    pub(crate) definition_name: Option<String>,
    /// The definition declares a `#` placeholder.
    pub(crate) definition_takes_value: bool,
}

impl ParsedGroup {
    /// Build a group, classifying it from its immediate child tags.
    pub(crate) fn new(span: Span, children: Vec<ParsedNode>, schemas: &HedSchemas) -> Self {
        let mut is_definition_group = false;
        let mut is_onset_group = false;
        let mut is_offset_group = false;
        let mut is_inset_group = false;
        let mut definition_name = None;
        let mut definition_takes_value = false;
        for node in &children {
            let ParsedNode::Tag(tag) = node else {
                continue;
            };
            if tag.is_descendant_of(schemas, "Definition") {
                is_definition_group = true;
                definition_name = tag.value().map(str::to_string);
                definition_takes_value = tag.has_placeholder();
            } else if tag.is_descendant_of(schemas, "Onset") {
                is_onset_group = true;
            } else if tag.is_descendant_of(schemas, "Offset") {
                is_offset_group = true;
            } else if tag.is_descendant_of(schemas, "Inset") {
                is_inset_group = true;
            }
        }
        Self {
            span,
            children,
            is_definition_group,
            is_onset_group,
            is_offset_group,
            is_inset_group,
            definition_name,
            definition_takes_value,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[ParsedNode] {
        &self.children
    }

    /// Immediate child tags, in written order.
    pub fn child_tags(&self) -> impl Iterator<Item = &ParsedTag> {
        self.children.iter().filter_map(|node| match node {
            ParsedNode::Tag(tag) => Some(tag),
            ParsedNode::Group(_) => None,
        })
    }

    /// Immediate child groups, in written order.
    pub fn child_groups(&self) -> impl Iterator<Item = &ParsedGroup> {
        self.children.iter().filter_map(|node| match node {
            ParsedNode::Group(group) => Some(group),
            ParsedNode::Tag(_) => None,
        })
    }

    /// All descendant nodes, depth-first.
    pub fn iter_nodes(&self) -> NodeIter<'_> {
        NodeIter::new(&self.children)
    }

    /// All descendant tags, depth-first.
    pub fn iter_tags(&self) -> impl Iterator<Item = &ParsedTag> {
        self.iter_nodes().filter_map(|node| match node {
            ParsedNode::Tag(tag) => Some(tag),
            ParsedNode::Group(_) => None,
        })
    }

    pub fn is_definition_group(&self) -> bool {
        self.is_definition_group
    }

    pub fn is_onset_group(&self) -> bool {
        self.is_onset_group
    }

    pub fn is_offset_group(&self) -> bool {
        self.is_offset_group
    }

    pub fn is_inset_group(&self) -> bool {
        self.is_inset_group
    }

    /// An Onset, Offset, or Inset group.
    pub fn is_temporal_group(&self) -> bool {
        self.is_onset_group || self.is_offset_group || self.is_inset_group
    }

    pub fn definition_name(&self) -> Option<&str> {
        self.definition_name.as_deref()
    }

    pub fn definition_takes_value(&self) -> bool {
        self.definition_takes_value
    }
}

impl fmt::Display for ParsedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_nodes(f, &self.children)?;
        write!(f, ")")
    }
}

/// A fully parsed HED string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHedString {
    pub(crate) text: String,
    pub(crate) nodes: Vec<ParsedNode>,
}

impl ParsedHedString {
    /// The original input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn nodes(&self) -> &[ParsedNode] {
        &self.nodes
    }

    /// Tags at the top level only.
    pub fn top_level_tags(&self) -> impl Iterator<Item = &ParsedTag> {
        self.nodes.iter().filter_map(|node| match node {
            ParsedNode::Tag(tag) => Some(tag),
            ParsedNode::Group(_) => None,
        })
    }

    /// Groups at the top level only.
    pub fn top_level_groups(&self) -> impl Iterator<Item = &ParsedGroup> {
        self.nodes.iter().filter_map(|node| match node {
            ParsedNode::Group(group) => Some(group),
            ParsedNode::Tag(_) => None,
        })
    }

    /// All nodes at any depth, depth-first.
    pub fn iter_nodes(&self) -> NodeIter<'_> {
        NodeIter::new(&self.nodes)
    }

    /// All tags at any depth, depth-first.
    pub fn iter_tags(&self) -> impl Iterator<Item = &ParsedTag> {
        self.iter_nodes().filter_map(|node| match node {
            ParsedNode::Tag(tag) => Some(tag),
            ParsedNode::Group(_) => None,
        })
    }

    /// All groups at any depth, depth-first.
    pub fn iter_groups(&self) -> impl Iterator<Item = &ParsedGroup> {
        self.iter_nodes().filter_map(|node| match node {
            ParsedNode::Group(group) => Some(group),
            ParsedNode::Tag(_) => None,
        })
    }

    /// Top-level definition groups.
    pub fn definition_groups(&self) -> impl Iterator<Item = &ParsedGroup> {
        self.top_level_groups()
            .filter(|group| group.is_definition_group())
    }

    /// Number of `#` placeholders anywhere in the string.
    pub fn placeholder_count(&self) -> usize {
        self.iter_tags().filter(|tag| tag.has_placeholder()).count()
    }
}

impl fmt::Display for ParsedHedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes)
    }
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[ParsedNode]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        match node {
            ParsedNode::Tag(tag) => write!(f, "{tag}")?,
            ParsedNode::Group(group) => write!(f, "{group}")?,
        }
    }
    Ok(())
}

/// Depth-first iterator over a parsed forest.
#[derive(Debug)]
pub struct NodeIter<'a> {
    stack: Vec<&'a ParsedNode>,
}

impl<'a> NodeIter<'a> {
    fn new(nodes: &'a [ParsedNode]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a ParsedNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let ParsedNode::Group(group) = node {
            self.stack.extend(group.children.iter().rev());
        }
        Some(node)
    }
}
