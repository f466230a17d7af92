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

//! Schema entry types: tags, unit classes, units, and unit modifiers.
//!
//! A [`TagEntry`] is one node of the tag hierarchy. Entries live in the
//! schema's arena (`Vec<TagEntry>`) and refer to each other by index, so the
//! whole hierarchy is a plain, cycle-free value that can be shared across
//! threads once built.

use std::collections::{BTreeMap, BTreeSet};

/// Index of a tag entry within its schema's arena.
pub type TagIndex = usize;

/// Well-known schema attribute names.
///
/// Attribute names are compared case-sensitively; these constants match the
/// spelling used by published HED schemas.
pub mod attribute {
    /// The tag accepts a trailing value segment.
    pub const TAKES_VALUE: &str = "takesValue";
    /// Tags may be extended beneath this node.
    pub const EXTENSION_ALLOWED: &str = "extensionAllowed";
    /// The tag must be given with a child or value.
    pub const REQUIRE_CHILD: &str = "requireChild";
    /// At most one instance of the tag may appear in a string.
    pub const UNIQUE: &str = "unique";
    /// Every string must contain a descendant of the tag.
    pub const REQUIRED: &str = "required";
    /// The tag belongs to a library schema (copied on partnered merge).
    pub const IN_LIBRARY: &str = "inLibrary";
    /// The tag only makes sense inside a top-level tag group.
    pub const TOP_LEVEL_TAG_GROUP: &str = "topLevelTagGroup";
    /// The tag only makes sense inside a tag group.
    pub const TAG_GROUP: &str = "tagGroup";
    /// Value attribute: unit class of the tag's value.
    pub const UNIT_CLASS: &str = "unitClass";
    /// Value attribute: default units override for the tag's value.
    pub const DEFAULT_UNITS: &str = "defaultUnits";
    /// Value attribute: name of the standard-schema parent a library tag is
    /// grafted under on merge.
    pub const ROOTED: &str = "rooted";
}

/// The attributes applied to one tag entry.
///
/// Boolean attributes are a set of names; value attributes map a name to its
/// string value. After the propagation pass (see [`crate::HedSchema::build`])
/// inherited attributes are present on every descendant, so lookups never
/// walk the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSet {
    booleans: BTreeSet<String>,
    values: BTreeMap<String, String>,
}

impl AttributeSet {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean attribute.
    pub fn set(&mut self, name: impl Into<String>) {
        self.booleans.insert(name.into());
    }

    /// Set a value attribute.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Check a boolean attribute.
    pub fn has(&self, name: &str) -> bool {
        self.booleans.contains(name)
    }

    /// Look up a value attribute.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Iterate over the boolean attribute names.
    pub fn booleans(&self) -> impl Iterator<Item = &str> {
        self.booleans.iter().map(String::as_str)
    }

    /// Iterate over the value attributes.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One node of the schema tag hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagEntry {
    short_name: String,
    long_name: String,
    parent: Option<TagIndex>,
    children: Vec<TagIndex>,
    attributes: AttributeSet,
}

impl TagEntry {
    pub(crate) fn new(
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        parent: Option<TagIndex>,
        attributes: AttributeSet,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            long_name: long_name.into(),
            parent,
            children: Vec::new(),
            attributes,
        }
    }

    /// The leaf name of the tag.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// The fully-qualified path from the schema root.
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// The parent entry index, if any.
    pub fn parent(&self) -> Option<TagIndex> {
        self.parent
    }

    /// Indices of the direct children.
    pub fn children(&self) -> &[TagIndex] {
        &self.children
    }

    /// The entry's attributes (inherited attributes already applied).
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Whether the tag accepts a trailing value.
    pub fn takes_value(&self) -> bool {
        self.attributes.has(attribute::TAKES_VALUE)
    }

    /// Whether tags may be extended beneath this node.
    pub fn extension_allowed(&self) -> bool {
        self.attributes.has(attribute::EXTENSION_ALLOWED)
    }

    /// Whether the tag must be given with a child or value.
    pub fn require_child(&self) -> bool {
        self.attributes.has(attribute::REQUIRE_CHILD)
    }

    /// Whether at most one instance may appear per string.
    pub fn unique(&self) -> bool {
        self.attributes.has(attribute::UNIQUE)
    }

    /// Whether every string must contain a descendant of the tag.
    pub fn required(&self) -> bool {
        self.attributes.has(attribute::REQUIRED)
    }

    /// Whether the tag came from a library schema.
    pub fn in_library(&self) -> bool {
        self.attributes.has(attribute::IN_LIBRARY)
    }

    /// The unit class of the tag's value, if declared.
    pub fn unit_class(&self) -> Option<&str> {
        self.attributes.value(attribute::UNIT_CLASS)
    }

    /// The name of the standard-schema parent a rooted library tag grafts
    /// under, if declared.
    pub fn rooted(&self) -> Option<&str> {
        self.attributes.value(attribute::ROOTED)
    }

    pub(crate) fn add_child(&mut self, child: TagIndex) {
        self.children.push(child);
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attributes
    }
}

/// A single legal unit of a unit class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    name: String,
    symbol: bool,
    si_unit: bool,
}

impl Unit {
    /// Create a unit. Symbol units are case-sensitive and take no plural;
    /// SI units combine with the schema's unit modifiers.
    pub fn new(name: impl Into<String>, symbol: bool, si_unit: bool) -> Self {
        Self {
            name: name.into(),
            symbol,
            si_unit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Symbol units (`s`, `Hz`) compare case-sensitively and never take a
    /// plural `s`; word units (`second`) compare case-insensitively.
    pub fn is_symbol(&self) -> bool {
        self.symbol
    }

    /// SI units accept the schema's SI modifiers (`milli`/`m`, `kilo`/`k`).
    pub fn is_si_unit(&self) -> bool {
        self.si_unit
    }
}

/// A named set of legal units with an optional default.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitClass {
    name: String,
    units: Vec<Unit>,
    default_unit: Option<String>,
}

impl UnitClass {
    pub fn new(name: impl Into<String>, units: Vec<Unit>, default_unit: Option<String>) -> Self {
        Self {
            name: name.into(),
            units,
            default_unit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// The default unit, if the class declares one.
    pub fn default_unit(&self) -> Option<&Unit> {
        let name = self.default_unit.as_deref()?;
        self.units.iter().find(|u| u.name() == name)
    }

    /// The declared default unit name, if any.
    pub fn default_unit_name(&self) -> Option<&str> {
        self.default_unit.as_deref()
    }

    /// Legal unit names, for issue parameters.
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(Unit::name).collect()
    }
}

/// An SI prefix modifier.
///
/// Symbol modifiers (`m`, `k`) combine with symbol units; word modifiers
/// (`milli`, `kilo`) combine with word units.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitModifier {
    name: String,
    symbol: bool,
}

impl UnitModifier {
    pub fn new(name: impl Into<String>, symbol: bool) -> Self {
        Self {
            name: name.into(),
            symbol,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_symbol(&self) -> bool {
        self.symbol
    }
}
