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

//! Validation issues.
//!
//! An [`Issue`] reports one problem with user annotation data: a stable
//! [`IssueKind`] code, a severity, a parameter map sufficient for an
//! external layer to render a localized message, and an optional source
//! span. Issues are collected, never thrown; internal defects use
//! [`hed_schema::HedError`] instead.

use crate::span::Span;
use std::collections::BTreeMap;
use std::fmt;

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// The annotation is accepted but questionable.
    Warning,
    /// The annotation does not conform to the schema.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The kind of validation issue.
///
/// Each kind carries a stable camel-case code via [`IssueKind::code`] so
/// callers can key message catalogs on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IssueKind {
    // Lexical issues: fatal to parsing the string.
    /// An illegal character (`{`, `}`, `[`, `]`, `~`, stray quote).
    InvalidCharacter,
    /// A NUL or tab was substituted with a space.
    ControlCharacter,
    /// Opening and closing parenthesis counts differ.
    UnbalancedParentheses,
    /// A doubled, leading, or trailing delimiter.
    ExtraDelimiter,
    /// Tag text runs into or out of a parenthesized group.
    MissingComma,
    /// A resource limit was exceeded.
    LimitExceeded,

    // Conversion issues: fatal to validating that tag only.
    /// The tag matches no schema node and is not a legal extension.
    InvalidTag,
    /// The tag's trailing path exists but under a different parent.
    InvalidParentNode,
    /// The short form matches several schema subtrees.
    AmbiguousTag,
    /// The tag names a schema namespace prefix that is not loaded.
    UnknownPrefix,
    /// A `#` placeholder on a node that does not take a value.
    InvalidPlaceholder,
    /// The tag extends the schema beneath an extension-allowed node.
    TagExtended,

    // Semantic issues: collected, non-fatal.
    /// A tag that requires a child was given without one.
    ChildRequired,
    /// The tag's value is not a number where its unit class expects one.
    InvalidValue,
    /// The tag's unit is not legal for its unit class.
    InvalidUnit,
    /// No unit was given; the unit class default is assumed.
    DefaultUnitUsed,
    /// Two entries at the same level share a canonical form.
    DuplicateTag,
    /// More than one instance of a unique tag.
    MultipleUniqueTags,
    /// A required tag is missing from the string.
    MissingRequiredTag,
    /// A definition group is malformed.
    InvalidDefinitionGroup,
    /// A definition nested inside another definition.
    NestedDefinition,
    /// A definition's placeholder count does not match its declaration.
    InvalidDefinitionPlaceholder,
    /// A `Def`/`Def-expand` used inside a definition's own content.
    IllegalDefinitionContext,
    /// A Definition/Onset/Offset/Inset tag outside a top-level group.
    InvalidTopLevelTag,
    /// A Definition/Onset/Offset/Inset tag buried below a top-level group.
    NestedTagGroupTag,
    /// A temporal group with no definition reference.
    TemporalWithoutDefinition,
    /// A temporal group with more than one definition reference.
    TemporalWithMultipleDefinitions,
    /// Bare tags beside a temporal group's definition reference.
    ExtraTagsInTemporal,
    /// A value string without its single required placeholder.
    MissingPlaceholder,
    /// A placeholder where none is permitted.
    UnexpectedPlaceholder,

    // Dataset-level issues.
    /// Two structurally different definitions share a name.
    DuplicateDefinition,
    /// A `Def` names a definition that was never declared.
    MissingDefinition,
    /// A `Def`'s value disagrees with the definition's placeholder arity.
    DefinitionValueMismatch,
    /// An Offset or Inset for a definition with no active onset.
    InactiveTemporalScope,
}

impl IssueKind {
    /// The stable identifier external message catalogs key on.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCharacter => "invalidCharacter",
            Self::ControlCharacter => "controlCharacter",
            Self::UnbalancedParentheses => "parentheses",
            Self::ExtraDelimiter => "extraDelimiter",
            Self::MissingComma => "commaMissing",
            Self::LimitExceeded => "limitExceeded",
            Self::InvalidTag => "invalidTag",
            Self::InvalidParentNode => "invalidParentNode",
            Self::AmbiguousTag => "ambiguousTag",
            Self::UnknownPrefix => "unknownPrefix",
            Self::InvalidPlaceholder => "invalidPlaceholder",
            Self::TagExtended => "tagExtended",
            Self::ChildRequired => "childRequired",
            Self::InvalidValue => "invalidValue",
            Self::InvalidUnit => "unitClassInvalidUnit",
            Self::DefaultUnitUsed => "unitClassDefaultUsed",
            Self::DuplicateTag => "duplicateTag",
            Self::MultipleUniqueTags => "multipleUniqueTags",
            Self::MissingRequiredTag => "requiredTagMissing",
            Self::InvalidDefinitionGroup => "invalidDefinitionGroup",
            Self::NestedDefinition => "nestedDefinition",
            Self::InvalidDefinitionPlaceholder => "invalidDefinitionPlaceholder",
            Self::IllegalDefinitionContext => "illegalDefinitionContext",
            Self::InvalidTopLevelTag => "invalidTopLevelTag",
            Self::NestedTagGroupTag => "nestedTagGroupTag",
            Self::TemporalWithoutDefinition => "temporalWithoutDefinition",
            Self::TemporalWithMultipleDefinitions => "temporalWithMultipleDefinitions",
            Self::ExtraTagsInTemporal => "extraTagsInTemporal",
            Self::MissingPlaceholder => "missingPlaceholder",
            Self::UnexpectedPlaceholder => "unexpectedPlaceholder",
            Self::DuplicateDefinition => "duplicateDefinition",
            Self::MissingDefinition => "missingDefinition",
            Self::DefinitionValueMismatch => "definitionValueMismatch",
            Self::InactiveTemporalScope => "inactiveOnset",
        }
    }

    /// The default severity of this kind.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::ControlCharacter
            | Self::TagExtended
            | Self::DefaultUnitUsed
            | Self::MissingRequiredTag => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether this kind is lexical and therefore fatal to parsing.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::InvalidCharacter
                | Self::UnbalancedParentheses
                | Self::ExtraDelimiter
                | Self::MissingComma
                | Self::LimitExceeded
        )
    }
}

/// One validation issue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Issue {
    kind: IssueKind,
    severity: Severity,
    parameters: BTreeMap<String, String>,
    span: Option<Span>,
}

impl Issue {
    /// Create an issue with the kind's default severity.
    pub fn new(kind: IssueKind) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            parameters: BTreeMap::new(),
            span: None,
        }
    }

    /// Attach a named parameter for message rendering.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Attach the source span the issue refers to.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Override the default severity (used when a caller escalates
    /// warnings to errors).
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Look up one parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.kind.code(),
            self.severity,
            crate::messages::render(self.kind, &self.parameters)
        )?;
        if let Some(span) = self.span {
            write!(f, " (at {span})")?;
        }
        Ok(())
    }
}

/// Whether an issue list contains any error-severity entry.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(Issue::is_error)
}
