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

//! Tag canonicalization: short or intermediate form to full long form.
//!
//! A HED long name is the slash-joined chain of short names from a root, so
//! short, intermediate, and long forms all resolve by the same walk: every
//! schema node whose short name matches the first path segment is a
//! candidate, and the remaining segments are consumed as child short names,
//! then as a value (on a takes-value node) or an extension (under an
//! extension-allowed node). The best outcome across candidates wins; a tie
//! between distinct candidates is ambiguous.
//!
//! Matching is ASCII-case-insensitive, but the canonical form is rebuilt
//! from the schema's own casing, with value and extension segments kept in
//! the writer's casing.

use crate::issue::{Issue, IssueKind};
use crate::span::Span;
use hed_schema::{HedSchema, TagIndex};

/// A tag resolved against one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTag {
    /// The full long-form string, value/extension/placeholder included.
    pub canonical: String,
    /// The deepest schema node the tag matched.
    pub entry: TagIndex,
    /// The tag extends the schema beneath `entry`.
    pub is_extension: bool,
    /// Value (for takes-value nodes) or extension text, original casing.
    pub value: Option<String>,
    /// The tag ends in a `#` placeholder.
    pub has_placeholder: bool,
}

/// How far one candidate walk got. Higher ranks win.
#[derive(Debug)]
enum Walk {
    /// Every segment matched a schema node.
    Full { entry: TagIndex },
    /// Segments matched down to a takes-value node; the rest is its value.
    Value {
        entry: TagIndex,
        value: Option<String>,
        placeholder: bool,
    },
    /// Segments matched down to an extension-allowed node.
    Extension { entry: TagIndex, extension: String },
    /// A `#` appeared where no value is taken.
    Placeholder { entry: TagIndex },
    /// A segment matched neither child, value, nor extension.
    Failed { entry: TagIndex, depth: usize },
}

impl Walk {
    fn rank(&self) -> u8 {
        match self {
            Self::Full { .. } => 4,
            Self::Value { .. } => 3,
            Self::Extension { .. } => 2,
            Self::Placeholder { .. } => 1,
            Self::Failed { .. } => 0,
        }
    }
}

/// Strip whitespace, wrapping quotes, and leading/trailing slashes.
pub fn format_tag(raw: &str) -> &str {
    let mut text = raw.trim();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        text = &text[1..text.len() - 1];
        text = text.trim();
    }
    text.trim_matches('/')
}

/// Canonicalize one tag against one schema.
///
/// On success the issue list may still carry a [`TagExtended`] warning (only
/// when `check_for_warnings` is set). On failure the tag is unresolvable and
/// exactly one error issue explains why.
///
/// [`TagExtended`]: IssueKind::TagExtended
pub fn canonicalize(
    raw: &str,
    schema: &HedSchema,
    check_for_warnings: bool,
    span: Span,
) -> (Option<CanonicalTag>, Vec<Issue>) {
    let formatted = format_tag(raw);
    let invalid = |issues: Vec<Issue>| (None, issues);

    if formatted.is_empty() || formatted.split('/').any(str::is_empty) {
        return invalid(vec![Issue::new(IssueKind::InvalidTag)
            .with_parameter("tag", raw.trim())
            .with_span(span)]);
    }

    // An exact long path is never ambiguous, even when its first segment
    // doubles as the short name of some other node.
    if let Some(entry) = schema.index_by_long_name(formatted) {
        return (
            Some(CanonicalTag {
                canonical: schema.entry(entry).long_name().to_string(),
                entry,
                is_extension: false,
                value: None,
                has_placeholder: false,
            }),
            Vec::new(),
        );
    }

    let segments: Vec<&str> = formatted.split('/').collect();
    let candidates = schema.indices_by_short_name(segments[0]);
    if candidates.is_empty() {
        return invalid(vec![Issue::new(IssueKind::InvalidTag)
            .with_parameter("tag", raw.trim())
            .with_span(span)]);
    }

    let walks: Vec<Walk> = candidates
        .iter()
        .map(|&start| walk_candidate(schema, start, &segments))
        .collect();
    let best = walks.iter().map(Walk::rank).max().unwrap_or(0);
    let winners: Vec<&Walk> = walks.iter().filter(|w| w.rank() == best).collect();

    if winners.len() > 1 && best >= 2 {
        let mut names: Vec<&str> = winners
            .iter()
            .map(|w| {
                let entry = match w {
                    Walk::Full { entry }
                    | Walk::Value { entry, .. }
                    | Walk::Extension { entry, .. }
                    | Walk::Placeholder { entry }
                    | Walk::Failed { entry, .. } => *entry,
                };
                schema.entry(entry).long_name()
            })
            .collect();
        names.sort_unstable();
        return invalid(vec![Issue::new(IssueKind::AmbiguousTag)
            .with_parameter("tag", raw.trim())
            .with_parameter("candidates", names.join(", "))
            .with_span(span)]);
    }

    let mut issues = Vec::new();
    let resolved = match winners[0] {
        Walk::Full { entry } => CanonicalTag {
            canonical: schema.entry(*entry).long_name().to_string(),
            entry: *entry,
            is_extension: false,
            value: None,
            has_placeholder: false,
        },
        Walk::Value {
            entry,
            value,
            placeholder,
        } => {
            let mut canonical = schema.entry(*entry).long_name().to_string();
            if let Some(value) = value {
                canonical.push('/');
                canonical.push_str(value);
            }
            if *placeholder {
                canonical.push_str("/#");
            }
            CanonicalTag {
                canonical,
                entry: *entry,
                is_extension: false,
                value: value.clone(),
                has_placeholder: *placeholder,
            }
        }
        Walk::Extension { entry, extension } => {
            if check_for_warnings {
                issues.push(
                    Issue::new(IssueKind::TagExtended)
                        .with_parameter("tag", raw.trim())
                        .with_parameter("parent", schema.entry(*entry).long_name())
                        .with_span(span),
                );
            }
            CanonicalTag {
                canonical: format!("{}/{}", schema.entry(*entry).long_name(), extension),
                entry: *entry,
                is_extension: true,
                value: Some(extension.clone()),
                has_placeholder: false,
            }
        }
        Walk::Placeholder { .. } => {
            return invalid(vec![Issue::new(IssueKind::InvalidPlaceholder)
                .with_parameter("tag", raw.trim())
                .with_span(span)]);
        }
        Walk::Failed { entry, .. } => {
            return invalid(vec![Issue::new(IssueKind::InvalidParentNode)
                .with_parameter("tag", raw.trim())
                .with_parameter("parent", schema.entry(*entry).long_name())
                .with_span(span)]);
        }
    };
    (Some(resolved), issues)
}

/// Walk the segments after the first from one candidate node.
fn walk_candidate(schema: &HedSchema, start: TagIndex, segments: &[&str]) -> Walk {
    let mut current = start;
    for (depth, segment) in segments[1..].iter().enumerate() {
        if schema.entry(current).takes_value() {
            return take_value(current, &segments[1 + depth..]);
        }
        if *segment == "#" {
            return Walk::Placeholder { entry: current };
        }
        match schema.child_by_short_name(current, segment) {
            Some(child) => current = child,
            None => {
                let remainder = segments[1 + depth..].join("/");
                let extendable = !schema.rules().extension_needs_attribute()
                    || schema.entry(current).extension_allowed();
                if !extendable {
                    return Walk::Failed {
                        entry: current,
                        depth,
                    };
                }
                if remainder.contains('#') {
                    return Walk::Placeholder { entry: current };
                }
                return Walk::Extension {
                    entry: current,
                    extension: remainder,
                };
            }
        }
    }
    // A bare takes-value node is a full match; whether a child or value is
    // mandatory is the require-child check's concern.
    Walk::Full { entry: current }
}

/// Interpret the remaining segments as the value of a takes-value node.
fn take_value(entry: TagIndex, rest: &[&str]) -> Walk {
    let remainder = rest.join("/");
    if remainder == "#" {
        return Walk::Value {
            entry,
            value: None,
            placeholder: true,
        };
    }
    if let Some(prefix) = remainder.strip_suffix("/#") {
        if prefix.contains('#') {
            return Walk::Placeholder { entry };
        }
        return Walk::Value {
            entry,
            value: Some(prefix.to_string()),
            placeholder: true,
        };
    }
    if remainder.contains('#') {
        return Walk::Placeholder { entry };
    }
    Walk::Value {
        entry,
        value: Some(remainder),
        placeholder: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hed_schema::{HedSchema, SchemaSpec, TagSpec};

    fn schema() -> HedSchema {
        let spec = SchemaSpec::new("8.3.0")
            .with_tag(TagSpec::new("Event"))
            .with_tag(
                TagSpec::new("Event/Duration")
                    .with_attribute("takesValue")
                    .with_value_attribute("unitClass", "time"),
            )
            .with_tag(TagSpec::new("Action").with_attribute("extensionAllowed"))
            .with_tag(TagSpec::new("Action/Move"))
            .with_tag(TagSpec::new("Item"))
            .with_tag(TagSpec::new("Item/Object"))
            .with_tag(TagSpec::new("Item/Object/Geometric-object"))
            .with_tag(TagSpec::new("Item/Object/Geometric-object/2D-shape"))
            .with_tag(TagSpec::new("Item/Object/Geometric-object/2D-shape/Square"))
            .with_tag(TagSpec::new("Item/Sound"))
            .with_tag(TagSpec::new("Item/Sound/Noise"))
            .with_tag(TagSpec::new("Action/Noise"))
            .with_tag(
                TagSpec::new("Definition")
                    .with_attribute("takesValue")
                    .with_attribute("requireChild"),
            );
        HedSchema::build(spec).unwrap()
    }

    fn resolve(raw: &str) -> (Option<CanonicalTag>, Vec<Issue>) {
        canonicalize(raw, &schema(), true, Span::new(0, raw.len()))
    }

    // ==================== Formatting tests ====================

    #[test]
    fn test_format_tag_trims_and_unquotes() {
        assert_eq!(format_tag("  Square  "), "Square");
        assert_eq!(format_tag("\"Square\""), "Square");
        assert_eq!(format_tag("/Item/Object/"), "Item/Object");
        assert_eq!(format_tag("\" Square \""), "Square");
    }

    // ==================== Resolution tests ====================

    #[test]
    fn test_short_form_resolves_to_long_form() {
        let (tag, issues) = resolve("Square");
        assert!(issues.is_empty());
        assert_eq!(
            tag.unwrap().canonical,
            "Item/Object/Geometric-object/2D-shape/Square"
        );
    }

    #[test]
    fn test_long_form_resolves_to_itself() {
        let (tag, _) = resolve("Item/Object/Geometric-object/2D-shape/Square");
        assert_eq!(
            tag.unwrap().canonical,
            "Item/Object/Geometric-object/2D-shape/Square"
        );
    }

    #[test]
    fn test_intermediate_form_resolves() {
        let (tag, _) = resolve("Object/Geometric-object/2D-shape/Square");
        assert_eq!(
            tag.unwrap().canonical,
            "Item/Object/Geometric-object/2D-shape/Square"
        );
    }

    #[test]
    fn test_resolution_is_case_insensitive_but_canonical_keeps_schema_case() {
        let (tag, _) = resolve("square");
        assert_eq!(
            tag.unwrap().canonical,
            "Item/Object/Geometric-object/2D-shape/Square"
        );
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        let (first, _) = resolve("duration/3 ms");
        let first = first.unwrap();
        let (second, _) = resolve(&first.canonical);
        assert_eq!(first.canonical, second.unwrap().canonical);
    }

    // ==================== Value tests ====================

    #[test]
    fn test_value_attaches_to_takes_value_node() {
        let (tag, issues) = resolve("Event/Duration/3 ms");
        assert!(issues.is_empty());
        let tag = tag.unwrap();
        assert_eq!(tag.canonical, "Event/Duration/3 ms");
        assert_eq!(tag.value.as_deref(), Some("3 ms"));
        assert!(!tag.is_extension);
    }

    #[test]
    fn test_value_keeps_writer_casing() {
        let (tag, _) = resolve("duration/3 MS");
        assert_eq!(tag.unwrap().canonical, "Event/Duration/3 MS");
    }

    #[test]
    fn test_multi_segment_value() {
        let (tag, _) = resolve("Definition/MyDef");
        let tag = tag.unwrap();
        assert_eq!(tag.canonical, "Definition/MyDef");
        assert_eq!(tag.value.as_deref(), Some("MyDef"));
    }

    #[test]
    fn test_placeholder_on_takes_value_node() {
        let (tag, issues) = resolve("Duration/#");
        assert!(issues.is_empty());
        let tag = tag.unwrap();
        assert_eq!(tag.canonical, "Event/Duration/#");
        assert!(tag.has_placeholder);
        assert!(tag.value.is_none());
    }

    #[test]
    fn test_placeholder_after_value_segment() {
        let (tag, _) = resolve("Definition/MyDef/#");
        let tag = tag.unwrap();
        assert_eq!(tag.canonical, "Definition/MyDef/#");
        assert!(tag.has_placeholder);
        assert_eq!(tag.value.as_deref(), Some("MyDef"));
    }

    #[test]
    fn test_placeholder_where_no_value_taken() {
        let (tag, issues) = resolve("Event/#");
        assert!(tag.is_none());
        assert_eq!(issues[0].kind(), IssueKind::InvalidPlaceholder);
    }

    // ==================== Extension tests ====================

    #[test]
    fn test_extension_under_extension_allowed_node() {
        let (tag, issues) = resolve("Action/Lift/Quickly");
        let tag = tag.unwrap();
        assert_eq!(tag.canonical, "Action/Lift/Quickly");
        assert!(tag.is_extension);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind(), IssueKind::TagExtended);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_extension_warning_suppressed_without_warnings() {
        let (tag, issues) = canonicalize("Action/Lift", &schema(), false, Span::point(0));
        assert!(tag.unwrap().is_extension);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_extension_not_allowed_without_attribute() {
        let (tag, issues) = resolve("Item/Widget");
        assert!(tag.is_none());
        let issue = &issues[0];
        assert_eq!(issue.kind(), IssueKind::InvalidParentNode);
        assert_eq!(issue.parameter("parent"), Some("Item"));
    }

    #[test]
    fn test_extension_allowed_is_inherited() {
        // Move sits under Action, which is extension-allowed.
        let (tag, _) = resolve("Move/Fast");
        let tag = tag.unwrap();
        assert_eq!(tag.canonical, "Action/Move/Fast");
        assert!(tag.is_extension);
    }

    #[test]
    fn test_placeholder_in_extension_rejected() {
        let (tag, issues) = resolve("Action/Lift/#");
        assert!(tag.is_none());
        assert_eq!(issues[0].kind(), IssueKind::InvalidPlaceholder);
    }

    // ==================== Failure tests ====================

    #[test]
    fn test_unknown_tag() {
        let (tag, issues) = resolve("Bogus");
        assert!(tag.is_none());
        assert_eq!(issues[0].kind(), IssueKind::InvalidTag);
    }

    #[test]
    fn test_empty_segment_is_invalid() {
        let (tag, issues) = resolve("Item//Object");
        assert!(tag.is_none());
        assert_eq!(issues[0].kind(), IssueKind::InvalidTag);
    }

    #[test]
    fn test_ambiguous_short_form() {
        // Noise exists under both Item/Sound and Action.
        let (tag, issues) = resolve("Noise");
        assert!(tag.is_none());
        let issue = &issues[0];
        assert_eq!(issue.kind(), IssueKind::AmbiguousTag);
        let candidates = issue.parameter("candidates").unwrap();
        assert!(candidates.contains("Action/Noise"));
        assert!(candidates.contains("Item/Sound/Noise"));
    }

    #[test]
    fn test_exact_long_path_beats_ambiguous_first_segment() {
        // "Event" is both a root and a short name under Sound, so the walk
        // alone would tie; the written-out long path settles it.
        let spec = SchemaSpec::new("8.3.0")
            .with_tag(TagSpec::new("Event"))
            .with_tag(TagSpec::new("Event/Duration").with_attribute("takesValue"))
            .with_tag(TagSpec::new("Sound"))
            .with_tag(TagSpec::new("Sound/Event"))
            .with_tag(TagSpec::new("Sound/Event/Duration"));
        let schema = HedSchema::build(spec).unwrap();
        let (tag, issues) = canonicalize("Event/Duration", &schema, true, Span::point(0));
        assert!(issues.is_empty());
        let tag = tag.unwrap();
        assert_eq!(tag.canonical, "Event/Duration");
        assert!(!tag.is_extension);
        let (tag, issues) = canonicalize("Sound/Event/Duration", &schema, true, Span::point(0));
        assert!(issues.is_empty());
        assert_eq!(tag.unwrap().canonical, "Sound/Event/Duration");
    }

    #[test]
    fn test_full_path_disambiguates() {
        let (tag, issues) = resolve("Sound/Noise");
        assert!(issues.is_empty());
        assert_eq!(tag.unwrap().canonical, "Item/Sound/Noise");
    }

    #[test]
    fn test_deeper_match_beats_failed_candidate() {
        // "Object" only matches under Item, so the single candidate wins.
        let (tag, _) = resolve("Object");
        assert_eq!(tag.unwrap().canonical, "Item/Object");
    }
}
