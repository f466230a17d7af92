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

//! Validation of HED (Hierarchical Event Descriptor) annotation strings.
//!
//! This facade re-exports the workspace crates and offers two entry points:
//! [`validate_string`] for one annotation and [`validate_dataset`] for the
//! event strings of a recording in temporal order.
//!
//! ```
//! use hed::{validate_string, ValidationOptions};
//! use hed_test::standard_test_schemas;
//!
//! let schemas = standard_test_schemas();
//! let result = validate_string("Event/Duration/3 ms, (Red, Square)", &schemas, &ValidationOptions::new());
//! assert!(result.is_valid());
//! assert_eq!(result.parsed.unwrap().nodes().len(), 2);
//! ```

pub use hed_core::{
    has_errors, parse_hed_string, Issue, IssueKind, Limits, ParseOptions, ParsedGroup,
    ParsedHedString, ParsedNode, ParsedTag, Severity, Span,
};
pub use hed_schema::{
    merge_partnered, Generation, HedError, HedErrorKind, HedResult, HedSchema, HedSchemas,
    SchemaSpec, SchemaVersionSpec, TagSpec,
};
pub use hed_validator::{
    validate_parsed, Definition, DefinitionDict, ValidationOptions,
};

/// The outcome of validating one string.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The parsed tree, absent when a lexical error aborted parsing.
    pub parsed: Option<ParsedHedString>,
    pub issues: Vec<Issue>,
}

impl ValidationResult {
    /// No error-severity issues (warnings may remain).
    pub fn is_valid(&self) -> bool {
        !has_errors(&self.issues)
    }
}

/// Parse and validate one HED string.
pub fn validate_string(
    text: &str,
    schemas: &HedSchemas,
    options: &ValidationOptions,
) -> ValidationResult {
    let (parsed, issues) = hed_validator::validate_hed_string(text, schemas, options);
    ValidationResult { parsed, issues }
}

/// The outcome of validating a dataset's event strings.
#[derive(Debug, Clone)]
pub struct DatasetResult {
    /// Per-string results, in input order.
    pub strings: Vec<ValidationResult>,
    /// Cross-string issues; each carries an `index` parameter naming the
    /// offending string.
    pub dataset_issues: Vec<Issue>,
}

impl DatasetResult {
    pub fn is_valid(&self) -> bool {
        self.strings.iter().all(ValidationResult::is_valid)
            && !has_errors(&self.dataset_issues)
    }

    /// All issues of every kind, per-string ones first.
    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.strings
            .iter()
            .flat_map(|result| result.issues.iter())
            .chain(self.dataset_issues.iter())
    }
}

/// Validate a dataset: every string on its own, then the cross-string
/// rules (definitions, Def references, onset/offset scoping) over the
/// strings that parsed.
pub fn validate_dataset(
    texts: &[&str],
    schemas: &HedSchemas,
    options: &ValidationOptions,
) -> DatasetResult {
    let strings: Vec<ValidationResult> = texts
        .iter()
        .map(|text| validate_string(text, schemas, options))
        .collect();
    // Unsplittable strings drop out of dataset checks; their lexical errors
    // already fail the dataset. Scope tracking still sees the rest in order.
    let mut parsed = Vec::new();
    let mut original_index = Vec::new();
    for (index, result) in strings.iter().enumerate() {
        if let Some(tree) = &result.parsed {
            parsed.push(tree.clone());
            original_index.push(index);
        }
    }
    let dataset_issues = hed_validator::validate_dataset(&parsed, schemas, options)
        .into_iter()
        .map(|issue| {
            // Dataset issues index the filtered list; map back to the
            // caller's positions.
            match issue.parameter("index").and_then(|i| i.parse::<usize>().ok()) {
                Some(i) => {
                    let original = original_index[i];
                    issue.with_parameter("index", original.to_string())
                }
                None => issue,
            }
        })
        .collect();
    DatasetResult {
        strings,
        dataset_issues,
    }
}
