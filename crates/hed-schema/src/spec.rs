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

//! Schema specification input types.
//!
//! A [`SchemaSpec`] is the boundary between this crate and the external
//! schema loader: the loader reads a schema file (bundled, local, or remote)
//! and hands the flattened definition over in this form. The crate itself
//! never performs I/O.
//!
//! Tags are listed by long path with parents before children, the order a
//! depth-first walk of the schema file produces naturally.

use crate::entries::{Unit, UnitClass, UnitModifier};
use crate::error::{HedError, HedResult};

/// One tag definition in a schema specification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagSpec {
    /// Fully-qualified path from the schema root, e.g. `Event/Duration`.
    pub long_name: String,
    /// Boolean attribute names.
    pub boolean_attributes: Vec<String>,
    /// Value attributes as (name, value) pairs.
    pub value_attributes: Vec<(String, String)>,
}

impl TagSpec {
    pub fn new(long_name: impl Into<String>) -> Self {
        Self {
            long_name: long_name.into(),
            boolean_attributes: Vec::new(),
            value_attributes: Vec::new(),
        }
    }

    /// Add a boolean attribute.
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.boolean_attributes.push(name.into());
        self
    }

    /// Add a value attribute.
    pub fn with_value_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.value_attributes.push((name.into(), value.into()));
        self
    }
}

/// A complete, flattened schema definition ready to build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaSpec {
    /// Schema version, e.g. `8.3.0`.
    pub version: String,
    /// Library name for library schemas, e.g. `score`.
    pub library: Option<String>,
    /// Standard-schema version a partnered library merges into.
    pub with_standard: Option<String>,
    /// Tag definitions, parents before children.
    pub tags: Vec<TagSpec>,
    /// Unit class definitions.
    pub unit_classes: Vec<UnitClass>,
    /// SI unit modifiers.
    pub unit_modifiers: Vec<UnitModifier>,
    /// Attribute names the schema itself declares as inherited by
    /// descendants. Empty means the generation's built-in set applies.
    pub inherited_attributes: Vec<String>,
}

impl SchemaSpec {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    pub fn with_standard(mut self, version: impl Into<String>) -> Self {
        self.with_standard = Some(version.into());
        self
    }

    pub fn with_tag(mut self, tag: TagSpec) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_unit_class(mut self, class: UnitClass) -> Self {
        self.unit_classes.push(class);
        self
    }

    pub fn with_unit_modifier(mut self, name: impl Into<String>, symbol: bool) -> Self {
        self.unit_modifiers.push(UnitModifier::new(name, symbol));
        self
    }

    pub fn with_unit(self, class: &str, unit: Unit) -> Self {
        let mut spec = self;
        if let Some(existing) = spec.unit_classes.iter_mut().find(|c| c.name() == class) {
            let mut units = existing.units().to_vec();
            let default = existing.default_unit_name().map(str::to_string);
            units.push(unit);
            *existing = UnitClass::new(class, units, default);
        } else {
            spec.unit_classes.push(UnitClass::new(class, vec![unit], None));
        }
        spec
    }

    /// Whether the specification describes a partnered library.
    pub fn is_partnered(&self) -> bool {
        self.library.is_some() && self.with_standard.is_some()
    }
}

/// One entry of a schema version specifier.
///
/// The textual forms accepted are those BIDS datasets use in
/// `dataset_description.json`:
///
/// - `8.3.0` — the standard schema, default (empty) prefix
/// - `score_2.0.0` — unprefixed library schema
/// - `sc:score_2.0.0` — library schema under the namespace prefix `sc`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaVersionSpec {
    /// Namespace prefix; empty for the default schema.
    pub prefix: String,
    /// Library name, if this entry names a library schema.
    pub library: Option<String>,
    /// The schema version.
    pub version: String,
}

impl SchemaVersionSpec {
    /// Parse a single version specifier entry.
    pub fn parse(text: &str) -> HedResult<Self> {
        let (prefix, rest) = match text.split_once(':') {
            Some((prefix, rest)) => (prefix, rest),
            None => ("", text),
        };
        if !prefix.is_empty() && !is_valid_prefix(prefix) {
            return Err(HedError::version(format!(
                "invalid schema namespace prefix '{prefix}'"
            )));
        }
        let (library, version) = match rest.split_once('_') {
            Some((library, version)) => (Some(library.to_string()), version),
            None => (None, rest),
        };
        if version.is_empty() || !version.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return Err(HedError::version(format!(
                "invalid schema version in specifier '{text}'"
            )));
        }
        if let Some(ref library) = library {
            if library.is_empty() || !library.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(HedError::version(format!(
                    "invalid library name in specifier '{text}'"
                )));
            }
        }
        Ok(Self {
            prefix: prefix.to_string(),
            library,
            version: version.to_string(),
        })
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && prefix.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== TagSpec tests ====================

    #[test]
    fn test_tag_spec_builder() {
        let tag = TagSpec::new("Event/Duration")
            .with_attribute("takesValue")
            .with_value_attribute("unitClass", "time");
        assert_eq!(tag.long_name, "Event/Duration");
        assert_eq!(tag.boolean_attributes, vec!["takesValue"]);
        assert_eq!(
            tag.value_attributes,
            vec![("unitClass".to_string(), "time".to_string())]
        );
    }

    // ==================== SchemaSpec tests ====================

    #[test]
    fn test_schema_spec_builder() {
        let spec = SchemaSpec::new("8.3.0")
            .with_tag(TagSpec::new("Event"))
            .with_unit_class(UnitClass::new("time", vec![], None))
            .with_unit_modifier("milli", false);
        assert_eq!(spec.version, "8.3.0");
        assert_eq!(spec.tags.len(), 1);
        assert_eq!(spec.unit_classes.len(), 1);
        assert_eq!(spec.unit_modifiers.len(), 1);
        assert!(!spec.is_partnered());
    }

    #[test]
    fn test_schema_spec_partnered() {
        let spec = SchemaSpec::new("1.0.0")
            .with_library("score")
            .with_standard("8.3.0");
        assert!(spec.is_partnered());
    }

    #[test]
    fn test_schema_spec_with_unit_appends() {
        let spec = SchemaSpec::new("8.3.0")
            .with_unit("time", Unit::new("second", false, true))
            .with_unit("time", Unit::new("s", true, true));
        assert_eq!(spec.unit_classes.len(), 1);
        assert_eq!(spec.unit_classes[0].units().len(), 2);
    }

    // ==================== SchemaVersionSpec tests ====================

    #[test]
    fn test_version_spec_standard() {
        let spec = SchemaVersionSpec::parse("8.3.0").unwrap();
        assert_eq!(spec.prefix, "");
        assert_eq!(spec.library, None);
        assert_eq!(spec.version, "8.3.0");
    }

    #[test]
    fn test_version_spec_library() {
        let spec = SchemaVersionSpec::parse("score_2.0.0").unwrap();
        assert_eq!(spec.prefix, "");
        assert_eq!(spec.library, Some("score".to_string()));
        assert_eq!(spec.version, "2.0.0");
    }

    #[test]
    fn test_version_spec_prefixed_library() {
        let spec = SchemaVersionSpec::parse("sc:score_2.0.0").unwrap();
        assert_eq!(spec.prefix, "sc");
        assert_eq!(spec.library, Some("score".to_string()));
        assert_eq!(spec.version, "2.0.0");
    }

    #[test]
    fn test_version_spec_bad_prefix() {
        assert!(SchemaVersionSpec::parse("9sc:score_2.0.0").is_err());
    }

    #[test]
    fn test_version_spec_bad_version() {
        assert!(SchemaVersionSpec::parse("score_").is_err());
        assert!(SchemaVersionSpec::parse("sc:").is_err());
    }

    #[test]
    fn test_version_spec_bad_library_name() {
        assert!(SchemaVersionSpec::parse("sco-re_2.0.0").is_err());
    }
}
