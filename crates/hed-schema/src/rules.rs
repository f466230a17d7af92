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

//! Generation-specific schema behavior.
//!
//! Third-generation (HED 8+) schemas and legacy second-generation schemas
//! differ in which attributes descendants inherit, how units compare, and
//! when a tag may be extended. The strategy is selected once per schema at
//! build time; the current generation is the canonical contract and the
//! legacy rules are a compatibility shim only.

use std::fmt;

/// Schema generation, derived from the version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Generation {
    /// Legacy schemas (versions before 8.0.0).
    Hed2,
    /// Current schemas (8.0.0 and later, including all library schemas).
    Hed3,
}

impl Generation {
    /// Determine the generation from a schema version string.
    ///
    /// Library schemas are always third-generation, so any schema carrying a
    /// library name or a `withStandard` base should pass `true` for
    /// `is_library`.
    pub fn from_version(version: &str, is_library: bool) -> Self {
        if is_library {
            return Self::Hed3;
        }
        let major = version
            .split('.')
            .next()
            .and_then(|m| m.parse::<u32>().ok())
            .unwrap_or(0);
        if major >= 8 {
            Self::Hed3
        } else {
            Self::Hed2
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hed2 => write!(f, "HED-2G"),
            Self::Hed3 => write!(f, "HED-3G"),
        }
    }
}

/// Generation-specific rule hooks, selected once per schema.
pub trait SchemaRules: fmt::Debug + Send + Sync {
    /// The generation these rules implement.
    fn generation(&self) -> Generation;

    /// Attributes inherited by every descendant of a flagged node when the
    /// schema specification does not declare its own inherited set.
    fn default_inherited_attributes(&self) -> &'static [&'static str];

    /// Whether symbol units compare case-sensitively. Legacy schemas
    /// compared all units case-insensitively.
    fn symbol_units_case_sensitive(&self) -> bool;

    /// Whether extending a tag requires the `extensionAllowed` attribute on
    /// an ancestor. Legacy schemas accepted extension beneath any leaf.
    fn extension_needs_attribute(&self) -> bool;
}

/// Rules for current (third-generation) schemas. Canonical contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hed3Rules;

impl SchemaRules for Hed3Rules {
    fn generation(&self) -> Generation {
        Generation::Hed3
    }

    fn default_inherited_attributes(&self) -> &'static [&'static str] {
        &[crate::entries::attribute::EXTENSION_ALLOWED]
    }

    fn symbol_units_case_sensitive(&self) -> bool {
        true
    }

    fn extension_needs_attribute(&self) -> bool {
        true
    }
}

/// Compatibility shim for legacy (second-generation) schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hed2Rules;

impl SchemaRules for Hed2Rules {
    fn generation(&self) -> Generation {
        Generation::Hed2
    }

    fn default_inherited_attributes(&self) -> &'static [&'static str] {
        &[
            crate::entries::attribute::EXTENSION_ALLOWED,
            crate::entries::attribute::REQUIRE_CHILD,
        ]
    }

    fn symbol_units_case_sensitive(&self) -> bool {
        false
    }

    fn extension_needs_attribute(&self) -> bool {
        false
    }
}

/// Select the rule strategy for a generation.
pub fn rules_for(generation: Generation) -> Box<dyn SchemaRules> {
    match generation {
        Generation::Hed2 => Box::new(Hed2Rules),
        Generation::Hed3 => Box::new(Hed3Rules),
    }
}
