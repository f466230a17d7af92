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

//! Dataset-level validation: definition references and temporal scoping.
//!
//! The strings of a dataset are the event annotations in temporal order.
//! Definitions declared anywhere in the dataset are collected first; every
//! `Def`/`Def-expand` reference is then resolved against them, and
//! Onset/Offset/Inset groups are tracked as scopes keyed by definition name
//! plus value, so an Offset or Inset without a matching active Onset is
//! caught.
//!
//! Issues carry an `index` parameter with the position of the offending
//! string, so callers can map them back to file rows.

use crate::definitions::{Definition, DefinitionDict};
use crate::options::ValidationOptions;
use hed_core::{Issue, IssueKind, ParsedGroup, ParsedHedString, ParsedTag};
use hed_schema::HedSchemas;
use std::collections::BTreeMap;

/// Validate the dataset-level rules over parsed event strings.
///
/// Per-string checks are not repeated here; run
/// [`validate_parsed`](crate::validate_parsed) on each string separately.
pub fn validate_dataset(
    strings: &[ParsedHedString],
    schemas: &HedSchemas,
    options: &ValidationOptions,
) -> Vec<Issue> {
    let (definitions, mut issues) = DefinitionDict::from_strings(strings);

    // Scopes opened by Onset, keyed by lowercased "name" or "name/value".
    let mut active: BTreeMap<String, usize> = BTreeMap::new();

    for (index, string) in strings.iter().enumerate() {
        let at = |issue: Issue| {
            issue
                .with_parameter("index", index.to_string())
                .with_parameter("string", string.text())
        };

        for reference in collect_def_references(string, schemas) {
            if let Some(issue) = check_reference(&reference, &definitions) {
                issues.push(at(issue));
            }
        }

        for group in string.top_level_groups() {
            if !group.is_temporal_group() {
                continue;
            }
            let Some(reference) = temporal_reference(group, schemas) else {
                // Shape issues were already reported per string.
                continue;
            };
            let key = reference.scope_key();
            if group.is_onset_group() {
                // A second onset for the same scope replaces the first.
                active.insert(key, index);
            } else if group.is_offset_group() || group.is_inset_group() {
                if !active.contains_key(&key) {
                    let mut issue = Issue::new(IssueKind::InactiveTemporalScope)
                        .with_parameter(
                            "tag",
                            if group.is_offset_group() {
                                "Offset"
                            } else {
                                "Inset"
                            },
                        )
                        .with_parameter("definition", &reference.name)
                        .with_span(group.span());
                    if let Some(value) = &reference.value {
                        issue = issue.with_parameter("value", value.as_str());
                    }
                    issues.push(at(issue));
                }
                if group.is_offset_group() {
                    active.remove(&key);
                }
            }
        }
    }

    if issues.len() > options.limits.max_issues {
        issues.truncate(options.limits.max_issues);
    }
    issues
}

/// One `Def` or `Def-expand` use.
#[derive(Debug)]
struct DefReference {
    /// Definition name as written.
    name: String,
    /// Value supplied after the name, `#` for a template placeholder.
    value: Option<String>,
    text: String,
    span: hed_core::Span,
}

impl DefReference {
    fn from_tag(tag: &ParsedTag) -> Option<Self> {
        let raw = tag.value()?;
        let (name, value) = match raw.split_once('/') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (raw, None),
        };
        let value = if tag.has_placeholder() && value.is_none() {
            Some("#".to_string())
        } else {
            value
        };
        Some(Self {
            name: name.to_string(),
            value,
            text: tag.text().to_string(),
            span: tag.span(),
        })
    }

    fn scope_key(&self) -> String {
        match &self.value {
            Some(value) => format!("{}/{}", self.name.to_lowercase(), value.to_lowercase()),
            None => self.name.to_lowercase(),
        }
    }
}

/// All Def/Def-expand uses in a string, definition declarations excluded.
fn collect_def_references(string: &ParsedHedString, schemas: &HedSchemas) -> Vec<DefReference> {
    let mut references = Vec::new();
    let mut visit = |tag: &ParsedTag| {
        if tag.is_descendant_of(schemas, "Def") || tag.is_descendant_of(schemas, "Def-expand") {
            references.extend(DefReference::from_tag(tag));
        }
    };
    for tag in string.top_level_tags() {
        visit(tag);
    }
    for group in string.top_level_groups() {
        if group.is_definition_group() {
            continue;
        }
        for tag in group.iter_tags() {
            visit(tag);
        }
    }
    references
}

/// The definition reference anchoring a temporal group, if it has exactly
/// one.
fn temporal_reference(group: &ParsedGroup, schemas: &HedSchemas) -> Option<DefReference> {
    let mut references = Vec::new();
    for tag in group.child_tags() {
        if tag.is_descendant_of(schemas, "Def") {
            references.extend(DefReference::from_tag(tag));
        }
    }
    for inner in group.child_groups() {
        for tag in inner.child_tags() {
            if tag.is_descendant_of(schemas, "Def-expand") {
                references.extend(DefReference::from_tag(tag));
            }
        }
    }
    if references.len() == 1 {
        references.pop()
    } else {
        None
    }
}

/// Check one reference against the dictionary.
fn check_reference(reference: &DefReference, definitions: &DefinitionDict) -> Option<Issue> {
    let Some(definition) = definitions.get(&reference.name) else {
        return Some(
            Issue::new(IssueKind::MissingDefinition)
                .with_parameter("tag", &reference.text)
                .with_parameter("definition", &reference.name)
                .with_span(reference.span),
        );
    };
    if arity_matches(definition, reference) {
        None
    } else {
        Some(
            Issue::new(IssueKind::DefinitionValueMismatch)
                .with_parameter("tag", &reference.text)
                .with_parameter("definition", definition.name())
                .with_span(reference.span),
        )
    }
}

fn arity_matches(definition: &Definition, reference: &DefReference) -> bool {
    definition.takes_value() == reference.value.is_some()
}
