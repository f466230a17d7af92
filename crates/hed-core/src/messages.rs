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

//! Default English messages for issue kinds.
//!
//! Issues carry a kind and a parameter map; rendering is a presentation
//! concern. This table backs the `Display` impl of
//! [`Issue`](crate::Issue) — external callers are free to substitute their
//! own catalog keyed on [`IssueKind::code`](crate::IssueKind::code).

use crate::issue::IssueKind;
use std::collections::BTreeMap;

fn get<'a>(parameters: &'a BTreeMap<String, String>, name: &str) -> &'a str {
    parameters.get(name).map(String::as_str).unwrap_or("?")
}

/// Render a human-readable message for an issue.
pub fn render(kind: IssueKind, parameters: &BTreeMap<String, String>) -> String {
    let p = |name: &str| get(parameters, name);
    match kind {
        IssueKind::InvalidCharacter => format!(
            "invalid character '{}' at index {} of string '{}'",
            p("character"),
            p("index"),
            p("string")
        ),
        IssueKind::ControlCharacter => format!(
            "control character at index {} of string '{}' was replaced with a space",
            p("index"),
            p("string")
        ),
        IssueKind::UnbalancedParentheses => format!(
            "{} opening and {} closing parentheses in string '{}'",
            p("opening"),
            p("closing"),
            p("string")
        ),
        IssueKind::ExtraDelimiter => format!(
            "extra delimiter at index {} of string '{}'",
            p("index"),
            p("string")
        ),
        IssueKind::MissingComma => format!("comma missing after tag '{}'", p("tag")),
        IssueKind::LimitExceeded => format!("{} limit of {} exceeded", p("limit"), p("maximum")),
        IssueKind::InvalidTag => format!("'{}' is not a valid HED tag", p("tag")),
        IssueKind::InvalidParentNode => format!(
            "'{}' appears as '{}' and cannot be used as an extension",
            p("tag"),
            p("parent")
        ),
        IssueKind::AmbiguousTag => format!(
            "'{}' is ambiguous; it could be any of: {}",
            p("tag"),
            p("candidates")
        ),
        IssueKind::UnknownPrefix => format!(
            "tag '{}' uses schema prefix '{}', which is not loaded",
            p("tag"),
            p("prefix")
        ),
        IssueKind::InvalidPlaceholder => {
            format!("'{}' has a '#' where no value is taken", p("tag"))
        }
        IssueKind::TagExtended => format!(
            "'{}' extends the schema beneath '{}'",
            p("tag"),
            p("parent")
        ),
        IssueKind::ChildRequired => {
            format!("'{}' requires a child tag or value", p("tag"))
        }
        IssueKind::InvalidValue => {
            format!("'{}' of tag '{}' is not a valid value", p("value"), p("tag"))
        }
        IssueKind::InvalidUnit => format!(
            "unit of '{}' is invalid; legal units are: {}",
            p("tag"),
            p("units")
        ),
        IssueKind::DefaultUnitUsed => format!(
            "no unit given for '{}'; assuming default unit '{}'",
            p("tag"),
            p("unit")
        ),
        IssueKind::DuplicateTag => {
            format!("duplicate tag '{}' at index {}", p("tag"), p("index"))
        }
        IssueKind::MultipleUniqueTags => {
            format!("multiple instances of unique tag '{}'", p("tag"))
        }
        IssueKind::MissingRequiredTag => {
            format!("required tag '{}' is missing", p("tag"))
        }
        IssueKind::InvalidDefinitionGroup => format!(
            "definition '{}' is malformed: {}",
            p("definition"),
            p("reason")
        ),
        IssueKind::NestedDefinition => {
            format!("definition '{}' contains another definition", p("definition"))
        }
        IssueKind::InvalidDefinitionPlaceholder => format!(
            "definition '{}' must contain exactly {} placeholder(s), found {}",
            p("definition"),
            p("expected"),
            p("found")
        ),
        IssueKind::IllegalDefinitionContext => format!(
            "'{}' may not appear inside definition '{}'",
            p("tag"),
            p("definition")
        ),
        IssueKind::InvalidTopLevelTag => format!(
            "'{}' is only permitted inside a top-level tag group",
            p("tag")
        ),
        IssueKind::NestedTagGroupTag => format!(
            "'{}' is nested too deeply to mark a top-level tag group",
            p("tag")
        ),
        IssueKind::TemporalWithoutDefinition => format!(
            "temporal group '{}' has no Def or Def-expand reference",
            p("tagGroup")
        ),
        IssueKind::TemporalWithMultipleDefinitions => format!(
            "temporal group '{}' references more than one definition",
            p("tagGroup")
        ),
        IssueKind::ExtraTagsInTemporal => format!(
            "temporal group '{}' carries extra content beside its definition reference",
            p("tagGroup")
        ),
        IssueKind::MissingPlaceholder => format!(
            "value string '{}' contains no '#' placeholder",
            p("string")
        ),
        IssueKind::UnexpectedPlaceholder => {
            format!("unexpected '#' placeholder in tag '{}'", p("tag"))
        }
        IssueKind::DuplicateDefinition => format!(
            "definition '{}' is declared twice with different content",
            p("definition")
        ),
        IssueKind::MissingDefinition => {
            format!("'{}' references undeclared definition '{}'", p("tag"), p("definition"))
        }
        IssueKind::DefinitionValueMismatch => format!(
            "'{}' disagrees with the placeholder arity of definition '{}'",
            p("tag"),
            p("definition")
        ),
        IssueKind::InactiveTemporalScope => format!(
            "'{}' for definition '{}' has no active onset",
            p("tag"),
            p("definition")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_extra_delimiter() {
        let msg = render(
            IssueKind::ExtraDelimiter,
            &params(&[("index", "2"), ("string", "A,,B")]),
        );
        assert_eq!(msg, "extra delimiter at index 2 of string 'A,,B'");
    }

    #[test]
    fn test_render_invalid_unit_lists_legal_units() {
        let msg = render(
            IssueKind::InvalidUnit,
            &params(&[("tag", "Event/Duration/3 cm"), ("units", "second, s")]),
        );
        assert!(msg.contains("second, s"));
    }

    #[test]
    fn test_render_missing_parameter_is_placeholder() {
        let msg = render(IssueKind::InvalidTag, &BTreeMap::new());
        assert!(msg.contains('?'));
    }

    #[test]
    fn test_render_parentheses_counts() {
        let msg = render(
            IssueKind::UnbalancedParentheses,
            &params(&[("opening", "2"), ("closing", "1"), ("string", "((A)")]),
        );
        assert!(msg.contains("2 opening"));
        assert!(msg.contains("1 closing"));
    }
}
