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

//! String parsing: split, resolve, classify.
//!
//! Parsing runs the splitter and then canonicalizes every tag against the
//! schema its namespace prefix selects. Lexical errors abort with no tree;
//! conversion errors (unknown tag, unknown prefix, ambiguity) are reported
//! but leave an unresolved tag in the tree so group structure stays intact
//! for the semantic checks that do not need that tag.

use crate::canonical::canonicalize;
use crate::issue::Issue;
use crate::issue::IssueKind;
use crate::limits::Limits;
use crate::parsed::{ParsedGroup, ParsedHedString, ParsedNode, ParsedTag};
use crate::split::{split, RawNode};
use hed_schema::HedSchemas;

/// Options controlling a parse.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub limits: Limits,
    /// Also report warning-severity issues (extensions, substituted control
    /// characters are always reported; this gates optional advice).
    pub check_for_warnings: bool,
}

/// Parse one HED string against a set of loaded schemas.
///
/// Returns the parsed tree (absent when a lexical error made the string
/// unsplittable) and all issues found, capped at
/// [`Limits::max_issues`].
pub fn parse_hed_string(
    text: &str,
    schemas: &HedSchemas,
    options: &ParseOptions,
) -> (Option<ParsedHedString>, Vec<Issue>) {
    let result = split(text, 0, &options.limits);
    let mut issues = result.issues;

    let Some(raw_nodes) = result.nodes else {
        cap_issues(&mut issues, &options.limits);
        return (None, issues);
    };

    let normalized = result.text.as_ref();
    let nodes = build_nodes(
        &raw_nodes,
        normalized,
        schemas,
        options.check_for_warnings,
        &mut issues,
    );
    cap_issues(&mut issues, &options.limits);
    (
        Some(ParsedHedString {
            text: text.to_string(),
            nodes,
        }),
        issues,
    )
}

fn cap_issues(issues: &mut Vec<Issue>, limits: &Limits) {
    if issues.len() > limits.max_issues {
        issues.truncate(limits.max_issues);
    }
}

fn build_nodes(
    raw: &[RawNode],
    text: &str,
    schemas: &HedSchemas,
    check_for_warnings: bool,
    issues: &mut Vec<Issue>,
) -> Vec<ParsedNode> {
    raw.iter()
        .map(|node| match node {
            RawNode::Tag { span } => ParsedNode::Tag(build_tag(
                span.slice(text),
                *span,
                schemas,
                check_for_warnings,
                issues,
            )),
            RawNode::Group { span, children } => {
                let children = build_nodes(children, text, schemas, check_for_warnings, issues);
                ParsedNode::Group(ParsedGroup::new(*span, children, schemas))
            }
        })
        .collect()
}

fn build_tag(
    raw_text: &str,
    span: crate::span::Span,
    schemas: &HedSchemas,
    check_for_warnings: bool,
    issues: &mut Vec<Issue>,
) -> ParsedTag {
    let (prefix, rest) = split_prefix(raw_text);
    let prefix = prefix.unwrap_or("");

    let Some(schema) = schemas.get(prefix) else {
        issues.push(
            Issue::new(IssueKind::UnknownPrefix)
                .with_parameter("tag", raw_text)
                .with_parameter("prefix", prefix)
                .with_span(span),
        );
        return unresolved_tag(raw_text, span, prefix);
    };

    let (resolved, mut tag_issues) = canonicalize(rest, schema, check_for_warnings, span);
    issues.append(&mut tag_issues);
    let Some(resolved) = resolved else {
        return unresolved_tag(raw_text, span, prefix);
    };

    let canonical = if prefix.is_empty() {
        resolved.canonical
    } else {
        format!("{prefix}:{}", resolved.canonical)
    };
    ParsedTag {
        text: raw_text.to_string(),
        span,
        prefix: prefix.to_string(),
        formatted: canonical.to_lowercase(),
        canonical,
        entry: Some(resolved.entry),
        is_extension: resolved.is_extension,
        value: resolved.value,
        has_placeholder: resolved.has_placeholder,
    }
}

/// A tag that did not resolve; the issue explaining why was already
/// reported. It stays in the tree so group structure survives.
fn unresolved_tag(raw_text: &str, span: crate::span::Span, prefix: &str) -> ParsedTag {
    ParsedTag {
        text: raw_text.to_string(),
        span,
        prefix: prefix.to_string(),
        canonical: raw_text.to_string(),
        formatted: raw_text.to_lowercase(),
        entry: None,
        is_extension: false,
        value: None,
        has_placeholder: false,
    }
}

/// Split a leading schema namespace prefix off a tag.
///
/// A prefix is an alphanumeric name (starting with a letter) followed by a
/// colon that precedes any slash or whitespace; anything else, such as a
/// colon inside a time value, is tag text.
fn split_prefix(text: &str) -> (Option<&str>, &str) {
    let Some(colon) = text.find(':') else {
        return (None, text);
    };
    let candidate = &text[..colon];
    let mut chars = candidate.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric());
    if valid {
        (Some(candidate), &text[colon + 1..])
    } else {
        (None, text)
    }
}
