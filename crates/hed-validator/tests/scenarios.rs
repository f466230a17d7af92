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

//! Validation scenarios spanning string and dataset checks.

use hed_core::{has_errors, IssueKind, ParsedHedString};
use hed_test::standard_test_schemas;
use hed_validator::{validate_dataset, validate_hed_string, ValidationOptions};

fn parse_session(texts: &[&str]) -> (Vec<ParsedHedString>, Vec<IssueKind>) {
    let schemas = standard_test_schemas();
    let options = ValidationOptions::new();
    let mut parsed = Vec::new();
    let mut kinds = Vec::new();
    for text in texts {
        let (tree, issues) = validate_hed_string(text, &schemas, &options);
        kinds.extend(issues.iter().map(|issue| issue.kind()));
        parsed.extend(tree);
    }
    (parsed, kinds)
}

#[test]
fn test_clean_session() {
    let (parsed, string_kinds) = parse_session(&[
        "(Definition/Blink, (Action/Move, Event/Duration/150 ms))",
        "(Onset, Def/Blink), Event/Sensory-event",
        "(Offset, Def/Blink)",
    ]);
    assert!(string_kinds.is_empty());
    let schemas = standard_test_schemas();
    let dataset = validate_dataset(&parsed, &schemas, &ValidationOptions::new());
    assert!(dataset.is_empty(), "dataset issues: {dataset:?}");
}

#[test]
fn test_string_and_dataset_issues_do_not_overlap() {
    // The malformed onset group is a string-level issue; the dangling
    // offset is dataset-level. Each is reported exactly once.
    let (parsed, string_kinds) = parse_session(&[
        "(Definition/Blink, (Action/Move))",
        "(Onset, Def/Blink, Red)",
        "(Offset, Def/Blink)",
        "(Offset, Def/Blink)",
    ]);
    assert_eq!(string_kinds, vec![IssueKind::ExtraTagsInTemporal]);
    let schemas = standard_test_schemas();
    let dataset = validate_dataset(&parsed, &schemas, &ValidationOptions::new());
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset[0].kind(), IssueKind::InactiveTemporalScope);
    assert_eq!(dataset[0].parameter("index"), Some("3"));
}

#[test]
fn test_warning_only_session_has_no_errors() {
    let schemas = standard_test_schemas();
    let options = ValidationOptions::new().with_warnings();
    let (_, issues) = validate_hed_string("Event/Duration/5, Action/Wave", &schemas, &options);
    assert!(!issues.is_empty());
    assert!(!has_errors(&issues));
    let kinds: Vec<IssueKind> = issues.iter().map(|issue| issue.kind()).collect();
    assert!(kinds.contains(&IssueKind::DefaultUnitUsed));
    assert!(kinds.contains(&IssueKind::TagExtended));
}

#[test]
fn test_placeholder_definition_used_with_values() {
    let (parsed, string_kinds) = parse_session(&[
        "(Definition/Dim/#, (Event/Duration/#))",
        "(Onset, Def/Dim/1)",
        "(Onset, Def/Dim/2)",
        "(Offset, Def/Dim/1)",
        "(Offset, Def/Dim/2)",
    ]);
    assert!(string_kinds.is_empty());
    let schemas = standard_test_schemas();
    let dataset = validate_dataset(&parsed, &schemas, &ValidationOptions::new());
    assert!(dataset.is_empty(), "dataset issues: {dataset:?}");
}
