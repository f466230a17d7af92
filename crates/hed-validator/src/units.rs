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

//! Unit class checks for takes-value tags.
//!
//! A value of a unit-classed tag is a number followed by an optional unit.
//! Symbol units ("s", "Hz") match exactly and may carry a symbol SI prefix
//! ("ms", "kHz") when the unit is an SI unit; word units ("second") match
//! case-insensitively, accept a plural `s`, and take word SI prefixes
//! ("milliseconds"). Whether symbol matching is case-sensitive depends on
//! the schema generation.

use crate::options::ValidationOptions;
use hed_core::{Issue, IssueKind, ParsedTag};
use hed_schema::{HedSchema, UnitClass};

/// Check the value and unit of one resolved takes-value tag.
pub(crate) fn check_units(
    tag: &ParsedTag,
    schema: &HedSchema,
    options: &ValidationOptions,
    issues: &mut Vec<Issue>,
) {
    let Some(entry) = tag.entry() else { return };
    let Some(class_name) = schema.entry(entry).unit_class() else {
        return;
    };
    // A unit class the schema never declared is a schema defect, not an
    // annotation issue.
    let Some(class) = schema.unit_class(class_name) else {
        return;
    };
    // Placeholder templates carry no concrete value to check.
    if tag.has_placeholder() {
        return;
    }
    let Some(value) = tag.value() else { return };

    let (number, unit) = match value.split_once(char::is_whitespace) {
        Some((number, unit)) => (number, Some(unit.trim())),
        None => (value, None),
    };

    if number.parse::<f64>().is_err() {
        issues.push(
            Issue::new(IssueKind::InvalidValue)
                .with_parameter("value", value)
                .with_parameter("tag", tag.text())
                .with_span(tag.span()),
        );
        return;
    }

    match unit {
        Some(unit) => {
            if !is_valid_unit(unit, class, schema) {
                issues.push(
                    Issue::new(IssueKind::InvalidUnit)
                        .with_parameter("tag", tag.text())
                        .with_parameter("units", class.unit_names().join(", "))
                        .with_span(tag.span()),
                );
            }
        }
        None => {
            if options.check_for_warnings {
                if let Some(default) = class.default_unit_name() {
                    issues.push(
                        Issue::new(IssueKind::DefaultUnitUsed)
                            .with_parameter("tag", tag.text())
                            .with_parameter("unit", default)
                            .with_span(tag.span()),
                    );
                }
            }
        }
    }
}

/// Whether `unit` is legal for the class, SI prefixes included.
fn is_valid_unit(unit: &str, class: &UnitClass, schema: &HedSchema) -> bool {
    let symbols_case_sensitive = schema.rules().symbol_units_case_sensitive();
    class.units().iter().any(|u| {
        if u.is_symbol() {
            let matches = |candidate: &str| {
                if symbols_case_sensitive {
                    candidate == u.name()
                } else {
                    candidate.eq_ignore_ascii_case(u.name())
                }
            };
            if matches(unit) {
                return true;
            }
            u.is_si_unit()
                && schema.unit_modifiers().iter().any(|m| {
                    m.is_symbol()
                        && unit
                            .strip_prefix(m.name())
                            .is_some_and(|rest| matches(rest))
                })
        } else {
            let matches = |candidate: &str| {
                candidate.eq_ignore_ascii_case(u.name())
                    || candidate
                        .strip_suffix(['s', 'S'])
                        .is_some_and(|singular| singular.eq_ignore_ascii_case(u.name()))
            };
            if matches(unit) {
                return true;
            }
            u.is_si_unit()
                && schema.unit_modifiers().iter().any(|m| {
                    !m.is_symbol()
                        && unit
                            .to_lowercase()
                            .strip_prefix(&m.name().to_lowercase())
                            .is_some_and(matches)
                })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hed_core::{parse_hed_string, ParseOptions, ParsedHedString};
    use hed_test::standard_test_schemas;

    fn checked(text: &str, warnings: bool) -> Vec<Issue> {
        let schemas = standard_test_schemas();
        let (parsed, issues) = parse_hed_string(text, &schemas, &ParseOptions::default());
        assert!(issues.is_empty(), "parse issues: {issues:?}");
        let parsed: ParsedHedString = parsed.unwrap();
        let mut options = ValidationOptions::new();
        options.check_for_warnings = warnings;
        let mut out = Vec::new();
        for tag in parsed.iter_tags() {
            let schema = tag.schema(&schemas).unwrap();
            check_units(tag, schema, &options, &mut out);
        }
        out
    }

    // ==================== Valid unit tests ====================

    #[test]
    fn test_word_unit_accepted() {
        assert!(checked("Duration/3 second", false).is_empty());
        assert!(checked("Duration/3 seconds", false).is_empty());
        assert!(checked("Duration/3 SECONDS", false).is_empty());
    }

    #[test]
    fn test_symbol_unit_accepted() {
        assert!(checked("Duration/3 s", false).is_empty());
    }

    #[test]
    fn test_si_prefixed_units_accepted() {
        assert!(checked("Duration/3 ms", false).is_empty());
        assert!(checked("Duration/3 milliseconds", false).is_empty());
        assert!(checked("Duration/0.5 ks", false).is_empty());
    }

    #[test]
    fn test_non_si_word_unit_plain() {
        assert!(checked("Duration/2 hours", false).is_empty());
    }

    // ==================== Invalid unit tests ====================

    #[test]
    fn test_invalid_unit_reported_once_with_legal_units() {
        let issues = checked("Duration/3 cm", false);
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.kind(), IssueKind::InvalidUnit);
        assert!(issue.parameter("units").unwrap().contains("second"));
    }

    #[test]
    fn test_symbol_units_are_case_sensitive() {
        let issues = checked("Duration/3 S", false);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind(), IssueKind::InvalidUnit);
    }

    #[test]
    fn test_si_prefix_on_non_si_unit_rejected() {
        let issues = checked("Duration/3 millihours", false);
        assert_eq!(issues[0].kind(), IssueKind::InvalidUnit);
    }

    #[test]
    fn test_non_numeric_value() {
        let issues = checked("Duration/fast", false);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind(), IssueKind::InvalidValue);
    }

    // ==================== Default unit tests ====================

    #[test]
    fn test_missing_unit_warns_when_asked() {
        let issues = checked("Duration/3", true);
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.kind(), IssueKind::DefaultUnitUsed);
        assert!(!issue.is_error());
        assert_eq!(issue.parameter("unit"), Some("second"));
    }

    #[test]
    fn test_missing_unit_silent_by_default() {
        assert!(checked("Duration/3", false).is_empty());
    }

    #[test]
    fn test_placeholder_skips_unit_check() {
        assert!(checked("Duration/#", true).is_empty());
    }
}
