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

//! The dataset definition dictionary.
//!
//! Definitions are collected from top-level `(Definition/Name, (content))`
//! groups across a dataset. Names are case-insensitive. Declaring the same
//! name twice is fine when the two declarations are structurally equivalent
//! (same tags at the same nesting, order ignored); otherwise the duplicate
//! is an error and the first declaration stays in force.

use hed_core::{Issue, IssueKind, ParsedGroup, ParsedHedString, ParsedNode};
use std::collections::BTreeMap;

/// One declared definition.
#[derive(Debug, Clone)]
pub struct Definition {
    name: String,
    takes_value: bool,
    /// Order-insensitive fingerprint of the content group.
    normal_form: String,
}

impl Definition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The definition declares a `#` placeholder and each `Def` reference
    /// must supply a value.
    pub fn takes_value(&self) -> bool {
        self.takes_value
    }
}

/// All definitions declared in a dataset, keyed by lowercased name.
#[derive(Debug, Clone, Default)]
pub struct DefinitionDict {
    definitions: BTreeMap<String, Definition>,
}

impl DefinitionDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect definitions from the top-level definition groups of every
    /// string. Duplicate names with different content are reported; the
    /// first declaration wins.
    pub fn from_strings(strings: &[ParsedHedString]) -> (Self, Vec<Issue>) {
        let mut dict = Self::new();
        let mut issues = Vec::new();
        for (index, string) in strings.iter().enumerate() {
            for group in string.definition_groups() {
                if let Some(issue) = dict.add_definition(group) {
                    issues.push(issue.with_parameter("index", index.to_string()));
                }
            }
        }
        (dict, issues)
    }

    /// Add one definition group. Returns the issue for a conflicting
    /// duplicate, if any.
    pub fn add_definition(&mut self, group: &ParsedGroup) -> Option<Issue> {
        let name = group.definition_name()?.to_string();
        let definition = Definition {
            normal_form: normal_form(group.children()),
            takes_value: group.definition_takes_value(),
            name,
        };
        match self.definitions.get(&definition.name.to_lowercase()) {
            None => {
                self.definitions
                    .insert(definition.name.to_lowercase(), definition);
                None
            }
            Some(existing) => {
                if existing.normal_form == definition.normal_form
                    && existing.takes_value == definition.takes_value
                {
                    None
                } else {
                    Some(
                        Issue::new(IssueKind::DuplicateDefinition)
                            .with_parameter("definition", definition.name)
                            .with_span(group.span()),
                    )
                }
            }
        }
    }

    /// Look a definition up by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }
}

/// An order-insensitive fingerprint of a node list: each tag by its
/// formatted form, each group by the sorted fingerprints of its children.
pub(crate) fn normal_form(nodes: &[ParsedNode]) -> String {
    let mut parts: Vec<String> = nodes
        .iter()
        .map(|node| match node {
            ParsedNode::Tag(tag) => tag.formatted().to_string(),
            ParsedNode::Group(group) => format!("({})", normal_form(group.children())),
        })
        .collect();
    parts.sort_unstable();
    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hed_core::{parse_hed_string, ParseOptions};
    use hed_test::standard_test_schemas;

    fn parse(text: &str) -> ParsedHedString {
        let schemas = standard_test_schemas();
        let (parsed, issues) = parse_hed_string(text, &schemas, &ParseOptions::default());
        assert!(issues.is_empty(), "parse issues for {text:?}: {issues:?}");
        parsed.unwrap()
    }

    // ==================== Dictionary tests ====================

    #[test]
    fn test_collects_definitions() {
        let strings = vec![
            parse("(Definition/FixationTask, (Red, Square))"),
            parse("(Definition/Stimulus/#, (Duration/#))"),
        ];
        let (dict, issues) = DefinitionDict::from_strings(&strings);
        assert!(issues.is_empty());
        assert_eq!(dict.len(), 2);
        assert!(!dict.get("fixationtask").unwrap().takes_value());
        assert!(dict.get("Stimulus").unwrap().takes_value());
    }

    #[test]
    fn test_equivalent_redeclaration_is_silent() {
        let strings = vec![
            parse("(Definition/MyDef, (Red, Square))"),
            parse("(Definition/mydef, (Square, Red))"),
        ];
        let (dict, issues) = DefinitionDict::from_strings(&strings);
        assert!(issues.is_empty());
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_conflicting_redeclaration_reported() {
        let strings = vec![
            parse("(Definition/MyDef, (Red))"),
            parse("(Definition/MyDef, (Blue))"),
        ];
        let (dict, issues) = DefinitionDict::from_strings(&strings);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind(), IssueKind::DuplicateDefinition);
        assert_eq!(issues[0].parameter("index"), Some("1"));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_placeholder_arity_is_part_of_identity() {
        let strings = vec![
            parse("(Definition/MyDef, (Red))"),
            parse("(Definition/MyDef/#, (Red, Duration/#))"),
        ];
        let (_, issues) = DefinitionDict::from_strings(&strings);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind(), IssueKind::DuplicateDefinition);
    }

    // ==================== Normal form tests ====================

    #[test]
    fn test_normal_form_ignores_order_recursively() {
        let a = parse("(Definition/D, (Red, (Square, Blue)))");
        let b = parse("(Definition/D, ((Blue, Square), Red))");
        let a = a.top_level_groups().next().unwrap();
        let b = b.top_level_groups().next().unwrap();
        assert_eq!(normal_form(a.children()), normal_form(b.children()));
    }

    #[test]
    fn test_normal_form_distinguishes_nesting() {
        let a = parse("(Definition/D, (Red, Blue))");
        let b = parse("(Definition/D, (Red, (Blue)))");
        let a = a.top_level_groups().next().unwrap();
        let b = b.top_level_groups().next().unwrap();
        assert_ne!(normal_form(a.children()), normal_form(b.children()));
    }
}
