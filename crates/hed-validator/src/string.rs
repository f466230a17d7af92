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

//! Semantic validation of a single parsed string.
//!
//! All checks here need only the string and its schemas: per-tag checks
//! (required children, units), per-level duplicate detection, unique and
//! required tags, placement of the organizational tags, definition group
//! shape, temporal group shape, and placeholder counting. Checks that need
//! dataset context (definition references, onset/offset pairing) live in
//! [`crate::dataset`].
//!
//! Unresolved tags are skipped everywhere; the parse already reported why
//! they did not resolve.

use crate::definitions::normal_form;
use crate::options::ValidationOptions;
use crate::units::check_units;
use hed_core::{
    parse_hed_string, Issue, IssueKind, ParsedGroup, ParsedHedString, ParsedNode, ParsedTag,
};
use hed_schema::{attribute, HedSchemas};

/// Parse and validate one HED string.
///
/// The tree is absent when a lexical error made the string unsplittable;
/// semantic checks then did not run.
pub fn validate_hed_string(
    text: &str,
    schemas: &HedSchemas,
    options: &ValidationOptions,
) -> (Option<ParsedHedString>, Vec<Issue>) {
    let (parsed, mut issues) = parse_hed_string(text, schemas, &options.parse_options());
    if let Some(parsed) = &parsed {
        issues.extend(validate_parsed(parsed, schemas, options));
        if issues.len() > options.limits.max_issues {
            issues.truncate(options.limits.max_issues);
        }
    }
    (parsed, issues)
}

/// Run the string-level semantic checks on an already parsed string.
pub fn validate_parsed(
    parsed: &ParsedHedString,
    schemas: &HedSchemas,
    options: &ValidationOptions,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for tag in parsed.iter_tags() {
        check_tag(tag, schemas, options, &mut issues);
    }
    check_level_duplicates(parsed.nodes(), &mut issues);
    check_unique_tags(parsed, schemas, &mut issues);
    if options.check_for_warnings {
        check_required_tags(parsed, schemas, &mut issues);
    }
    check_special_placement(parsed, schemas, &mut issues);
    for group in parsed.top_level_groups() {
        if group.is_definition_group() {
            check_definition_group(group, schemas, &mut issues);
        } else if group.is_temporal_group() {
            check_temporal_group(group, schemas, &mut issues);
        }
    }
    check_placeholders(parsed, options, &mut issues);

    issues
}

fn check_tag(
    tag: &ParsedTag,
    schemas: &HedSchemas,
    options: &ValidationOptions,
    issues: &mut Vec<Issue>,
) {
    let Some(entry_index) = tag.entry() else {
        return;
    };
    let Some(schema) = tag.schema(schemas) else {
        return;
    };
    let entry = schema.entry(entry_index);
    if entry.require_child()
        && tag.value().is_none()
        && !tag.has_placeholder()
        && !tag.is_extension()
    {
        issues.push(
            Issue::new(IssueKind::ChildRequired)
                .with_parameter("tag", tag.text())
                .with_span(tag.span()),
        );
    }
    if entry.unit_class().is_some() && !tag.is_extension() {
        check_units(tag, schema, options, issues);
    }
}

/// Key a node for duplicate comparison: tags by formatted form, groups by
/// order-insensitive fingerprint.
fn level_key(node: &ParsedNode) -> String {
    match node {
        ParsedNode::Tag(tag) => tag.formatted().to_string(),
        ParsedNode::Group(group) => format!("({})", normal_form(group.children())),
    }
}

/// Report duplicates among the immediate children of each level. Every
/// occurrence of a duplicated form is reported, not just the later ones.
/// A bare `#` placeholder is exempt: value templates legitimately repeat it.
fn check_level_duplicates(nodes: &[ParsedNode], issues: &mut Vec<Issue>) {
    let keys: Vec<String> = nodes.iter().map(level_key).collect();
    for (i, key) in keys.iter().enumerate() {
        if key == "#" {
            continue;
        }
        let duplicated = keys
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && other == key);
        if duplicated {
            let span = nodes[i].span();
            let text = match &nodes[i] {
                ParsedNode::Tag(tag) => tag.text().to_string(),
                ParsedNode::Group(group) => group.to_string(),
            };
            issues.push(
                Issue::new(IssueKind::DuplicateTag)
                    .with_parameter("tag", text)
                    .with_parameter("index", span.start().to_string())
                    .with_span(span),
            );
        }
    }
    for node in nodes {
        if let ParsedNode::Group(group) = node {
            check_level_duplicates(group.children(), issues);
        }
    }
}

/// A `unique` tag may occur once per namespace; the same long name under
/// two prefixes names two different schema nodes.
fn check_unique_tags(parsed: &ParsedHedString, schemas: &HedSchemas, issues: &mut Vec<Issue>) {
    let mut seen: Vec<((&str, &str), usize)> = Vec::new();
    for tag in parsed.iter_tags() {
        let (Some(entry), Some(schema)) = (tag.entry(), tag.schema(schemas)) else {
            continue;
        };
        if !schema.entry(entry).unique() {
            continue;
        }
        let key = (tag.prefix(), schema.entry(entry).long_name());
        match seen.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => seen.push((key, 1)),
        }
    }
    for ((prefix, name), count) in seen {
        if count > 1 {
            let tag = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}:{name}")
            };
            issues.push(Issue::new(IssueKind::MultipleUniqueTags).with_parameter("tag", tag));
        }
    }
}

fn check_required_tags(parsed: &ParsedHedString, schemas: &HedSchemas, issues: &mut Vec<Issue>) {
    for (prefix, schema) in schemas.iter() {
        for (_, entry) in schema.iter_entries() {
            if !entry.required() {
                continue;
            }
            let mut base = if prefix.is_empty() {
                String::new()
            } else {
                format!("{prefix}:")
            };
            base.push_str(&entry.long_name().to_lowercase());
            let present = parsed
                .iter_tags()
                .any(|tag| tag.formatted() == base || tag.formatted().starts_with(&format!("{base}/")));
            if !present {
                issues.push(
                    Issue::new(IssueKind::MissingRequiredTag)
                        .with_parameter("tag", entry.long_name()),
                );
            }
        }
    }
}

fn has_attribute(tag: &ParsedTag, schemas: &HedSchemas, name: &str) -> bool {
    match (tag.entry(), tag.schema(schemas)) {
        (Some(entry), Some(schema)) => schema.entry(entry).attributes().has(name),
        _ => false,
    }
}

/// Tags carrying `topLevelTagGroup` may only appear as immediate children
/// of a top-level group; tags carrying `tagGroup` must be inside some group.
fn check_special_placement(
    parsed: &ParsedHedString,
    schemas: &HedSchemas,
    issues: &mut Vec<Issue>,
) {
    for tag in parsed.top_level_tags() {
        if has_attribute(tag, schemas, attribute::TOP_LEVEL_TAG_GROUP)
            || has_attribute(tag, schemas, attribute::TAG_GROUP)
        {
            issues.push(
                Issue::new(IssueKind::InvalidTopLevelTag)
                    .with_parameter("tag", tag.text())
                    .with_span(tag.span()),
            );
        }
    }
    for group in parsed.top_level_groups() {
        for inner in group.child_groups() {
            check_buried_special(inner, schemas, issues);
        }
    }
}

fn check_buried_special(group: &ParsedGroup, schemas: &HedSchemas, issues: &mut Vec<Issue>) {
    for tag in group.iter_tags() {
        if has_attribute(tag, schemas, attribute::TOP_LEVEL_TAG_GROUP) {
            issues.push(
                Issue::new(IssueKind::NestedTagGroupTag)
                    .with_parameter("tag", tag.text())
                    .with_span(tag.span()),
            );
        }
    }
}

fn check_definition_group(group: &ParsedGroup, schemas: &HedSchemas, issues: &mut Vec<Issue>) {
    let name = group.definition_name().unwrap_or("?").to_string();
    let malformed = |reason: &str| {
        Issue::new(IssueKind::InvalidDefinitionGroup)
            .with_parameter("definition", &name)
            .with_parameter("reason", reason)
            .with_span(group.span())
    };

    let mut definition_tags = 0usize;
    for tag in group.child_tags() {
        if tag.is_descendant_of(schemas, "Definition") {
            definition_tags += 1;
        } else {
            issues.push(malformed(
                "only the content group may appear beside the definition tag",
            ));
        }
    }
    if definition_tags > 1 {
        issues.push(malformed("more than one definition tag"));
    }

    let content: Vec<&ParsedGroup> = group.child_groups().collect();
    if content.len() > 1 {
        issues.push(malformed("more than one content group"));
    }

    let Some(content) = content.first() else {
        issues.push(malformed("missing the content group"));
        return;
    };

    for tag in content.iter_tags() {
        if tag.is_descendant_of(schemas, "Definition") {
            issues.push(
                Issue::new(IssueKind::NestedDefinition)
                    .with_parameter("definition", &name)
                    .with_span(tag.span()),
            );
        } else if tag.is_descendant_of(schemas, "Def")
            || tag.is_descendant_of(schemas, "Def-expand")
        {
            issues.push(
                Issue::new(IssueKind::IllegalDefinitionContext)
                    .with_parameter("tag", tag.text())
                    .with_parameter("definition", &name)
                    .with_span(tag.span()),
            );
        }
    }

    let found = content
        .iter_tags()
        .filter(|tag| tag.has_placeholder())
        .count();
    let expected = usize::from(group.definition_takes_value());
    if found != expected {
        issues.push(
            Issue::new(IssueKind::InvalidDefinitionPlaceholder)
                .with_parameter("definition", &name)
                .with_parameter("expected", expected.to_string())
                .with_parameter("found", found.to_string())
                .with_span(content.span()),
        );
    }
}

/// Shape of an Onset/Offset/Inset group: exactly one definition reference,
/// no stray tags, and at most one payload subgroup (none for Offset).
fn check_temporal_group(group: &ParsedGroup, schemas: &HedSchemas, issues: &mut Vec<Issue>) {
    let rendered = group.to_string();

    let mut anchors = 0usize;
    let mut def_references = 0usize;
    let mut stray_tags = 0usize;
    for tag in group.child_tags() {
        if tag.is_descendant_of(schemas, "Onset")
            || tag.is_descendant_of(schemas, "Offset")
            || tag.is_descendant_of(schemas, "Inset")
        {
            anchors += 1;
        } else if tag.is_descendant_of(schemas, "Def") {
            def_references += 1;
        } else {
            stray_tags += 1;
        }
    }

    let mut payload_groups = 0usize;
    for inner in group.child_groups() {
        let is_def_expand = inner
            .child_tags()
            .any(|tag| tag.is_descendant_of(schemas, "Def-expand"));
        if is_def_expand {
            def_references += 1;
        } else {
            payload_groups += 1;
        }
    }

    match def_references {
        0 => issues.push(
            Issue::new(IssueKind::TemporalWithoutDefinition)
                .with_parameter("tagGroup", &rendered)
                .with_span(group.span()),
        ),
        1 => {}
        _ => issues.push(
            Issue::new(IssueKind::TemporalWithMultipleDefinitions)
                .with_parameter("tagGroup", &rendered)
                .with_span(group.span()),
        ),
    }

    let allowed_payload = usize::from(!group.is_offset_group());
    if anchors > 1 || stray_tags > 0 || payload_groups > allowed_payload {
        issues.push(
            Issue::new(IssueKind::ExtraTagsInTemporal)
                .with_parameter("tagGroup", &rendered)
                .with_span(group.span()),
        );
    }
}

/// Placeholders are legal inside placeholder definitions (checked with the
/// definition group) and, for value templates, exactly once outside them.
fn check_placeholders(
    parsed: &ParsedHedString,
    options: &ValidationOptions,
    issues: &mut Vec<Issue>,
) {
    let outside: Vec<&ParsedTag> = parsed
        .top_level_tags()
        .chain(
            parsed
                .top_level_groups()
                .filter(|group| !group.is_definition_group())
                .flat_map(|group| group.iter_tags()),
        )
        .filter(|tag| tag.has_placeholder())
        .collect();

    if options.value_string {
        if outside.is_empty() {
            issues.push(
                Issue::new(IssueKind::MissingPlaceholder)
                    .with_parameter("string", parsed.text()),
            );
        } else {
            for tag in &outside[1..] {
                issues.push(
                    Issue::new(IssueKind::UnexpectedPlaceholder)
                        .with_parameter("tag", tag.text())
                        .with_span(tag.span()),
                );
            }
        }
    } else {
        for tag in outside {
            issues.push(
                Issue::new(IssueKind::UnexpectedPlaceholder)
                    .with_parameter("tag", tag.text())
                    .with_span(tag.span()),
            );
        }
    }
}
