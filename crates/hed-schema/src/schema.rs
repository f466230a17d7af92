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

//! The queryable schema model.
//!
//! [`HedSchema`] holds one vocabulary: a tag hierarchy in an index-based
//! arena with case-insensitive short- and long-name lookup maps, unit
//! classes, SI unit modifiers, and the generation rule strategy. It is built
//! once from a [`SchemaSpec`] and read-only afterwards, so any number of
//! concurrent validations may share it.
//!
//! [`HedSchemas`] maps namespace prefixes to schemas; the empty prefix is
//! the default (unprefixed) schema.

use crate::entries::{AttributeSet, TagEntry, TagIndex, UnitClass, UnitModifier};
use crate::error::{HedError, HedResult};
use crate::rules::{rules_for, Generation, SchemaRules};
use crate::spec::SchemaSpec;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// An immutable, queryable HED vocabulary.
#[derive(Debug)]
pub struct HedSchema {
    version: String,
    library: Option<String>,
    with_standard: Option<String>,
    prefix: String,
    generation: Generation,
    rules: Box<dyn SchemaRules>,
    entries: Vec<TagEntry>,
    long_name_map: HashMap<String, TagIndex>,
    short_name_map: HashMap<String, Vec<TagIndex>>,
    unit_classes: BTreeMap<String, UnitClass>,
    unit_modifiers: Vec<UnitModifier>,
    inherited_attributes: BTreeSet<String>,
}

impl HedSchema {
    /// Build a schema from its flattened specification.
    ///
    /// Tags must be listed parents-first; a tag whose parent path has not
    /// been defined, or whose long name repeats, is a schema error. After
    /// insertion, every attribute in the inherited set is propagated from
    /// flagged nodes onto all of their descendants so per-tag attribute
    /// lookups never walk the hierarchy.
    pub fn build(spec: SchemaSpec) -> HedResult<Self> {
        let generation = Generation::from_version(&spec.version, spec.library.is_some());
        let rules = rules_for(generation);
        let inherited_attributes: BTreeSet<String> = if spec.inherited_attributes.is_empty() {
            rules
                .default_inherited_attributes()
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            spec.inherited_attributes.iter().cloned().collect()
        };

        let mut schema = Self {
            version: spec.version,
            library: spec.library,
            with_standard: spec.with_standard,
            prefix: String::new(),
            generation,
            rules,
            entries: Vec::with_capacity(spec.tags.len()),
            long_name_map: HashMap::with_capacity(spec.tags.len()),
            short_name_map: HashMap::new(),
            unit_classes: BTreeMap::new(),
            unit_modifiers: spec.unit_modifiers,
            inherited_attributes,
        };

        for tag in &spec.tags {
            let long_name = tag.long_name.trim_matches('/');
            if long_name.is_empty() {
                return Err(HedError::schema("empty tag path in schema specification"));
            }
            let (parent_path, short_name) = match long_name.rsplit_once('/') {
                Some((parent, short)) => (Some(parent), short),
                None => (None, long_name),
            };
            let parent = match parent_path {
                Some(path) => Some(schema.index_by_long_name(path).ok_or_else(|| {
                    HedError::schema(format!(
                        "parent '{path}' of tag '{long_name}' is not defined"
                    ))
                })?),
                None => None,
            };
            let mut attributes = AttributeSet::new();
            for name in &tag.boolean_attributes {
                attributes.set(name.clone());
            }
            for (name, value) in &tag.value_attributes {
                attributes.set_value(name.clone(), value.clone());
            }
            schema.add_entry(short_name, long_name, parent, attributes)?;
        }

        for class in spec.unit_classes {
            if schema.unit_classes.contains_key(class.name()) {
                return Err(HedError::schema(format!(
                    "duplicate unit class '{}'",
                    class.name()
                )));
            }
            schema.unit_classes.insert(class.name().to_string(), class);
        }

        schema.propagate_inherited_attributes();
        Ok(schema)
    }

    /// Insert a single entry, updating the lookup maps and parent links.
    ///
    /// Used by the builder and by the partnered-library merge.
    pub(crate) fn add_entry(
        &mut self,
        short_name: &str,
        long_name: &str,
        parent: Option<TagIndex>,
        attributes: AttributeSet,
    ) -> HedResult<TagIndex> {
        let long_key = long_name.to_lowercase();
        if self.long_name_map.contains_key(&long_key) {
            return Err(HedError::schema(format!(
                "duplicate tag '{long_name}' in schema"
            )));
        }
        let index = self.entries.len();
        self.entries
            .push(TagEntry::new(short_name, long_name, parent, attributes));
        self.long_name_map.insert(long_key, index);
        self.short_name_map
            .entry(short_name.to_lowercase())
            .or_default()
            .push(index);
        if let Some(parent) = parent {
            self.entries[parent].add_child(index);
        }
        Ok(index)
    }

    /// Push every inherited attribute from flagged nodes onto all of their
    /// descendants. Entries are ordered parents-first, so one forward pass
    /// suffices.
    pub(crate) fn propagate_inherited_attributes(&mut self) {
        let inherited: Vec<String> = self.inherited_attributes.iter().cloned().collect();
        for index in 0..self.entries.len() {
            let Some(parent) = self.entries[index].parent() else {
                continue;
            };
            for name in &inherited {
                if self.entries[parent].attributes().has(name) {
                    self.entries[index].attributes_mut().set(name.clone());
                }
            }
        }
    }

    /// The schema version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The library name, for library schemas.
    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    /// The standard-schema version a partnered library merges into.
    pub fn with_standard(&self) -> Option<&str> {
        self.with_standard.as_deref()
    }

    /// The namespace prefix this schema is registered under.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.to_string();
    }

    /// The schema generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The generation rule strategy.
    pub fn rules(&self) -> &dyn SchemaRules {
        self.rules.as_ref()
    }

    /// Number of tag entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry lookup by arena index.
    ///
    /// # Panics
    ///
    /// Panics if the index did not come from this schema.
    pub fn entry(&self, index: TagIndex) -> &TagEntry {
        &self.entries[index]
    }

    /// Case-insensitive lookup by fully-qualified path.
    pub fn index_by_long_name(&self, long_name: &str) -> Option<TagIndex> {
        self.long_name_map.get(&long_name.to_lowercase()).copied()
    }

    /// Case-insensitive lookup by leaf name. Short names may be ambiguous;
    /// all matching entries are returned.
    pub fn indices_by_short_name(&self, short_name: &str) -> &[TagIndex] {
        self.short_name_map
            .get(&short_name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `index` is `ancestor_short` or one of its descendants,
    /// compared case-insensitively on short names.
    pub fn is_descendant_of(&self, index: TagIndex, ancestor_short: &str) -> bool {
        let mut current = Some(index);
        while let Some(i) = current {
            let entry = &self.entries[i];
            if entry.short_name().eq_ignore_ascii_case(ancestor_short) {
                return true;
            }
            current = entry.parent();
        }
        false
    }

    /// Find the child of `index` whose short name matches, case-insensitively.
    pub fn child_by_short_name(&self, index: TagIndex, short_name: &str) -> Option<TagIndex> {
        self.entries[index]
            .children()
            .iter()
            .copied()
            .find(|&c| self.entries[c].short_name().eq_ignore_ascii_case(short_name))
    }

    /// Unit class lookup by name.
    pub fn unit_class(&self, name: &str) -> Option<&UnitClass> {
        self.unit_classes.get(name)
    }

    /// The schema's SI unit modifiers.
    pub fn unit_modifiers(&self) -> &[UnitModifier] {
        &self.unit_modifiers
    }

    /// Iterate over unit classes in name order.
    pub fn iter_unit_classes(&self) -> impl Iterator<Item = &UnitClass> {
        self.unit_classes.values()
    }

    pub(crate) fn add_unit_modifier(&mut self, modifier: UnitModifier) {
        let exists = self
            .unit_modifiers
            .iter()
            .any(|m| m.name() == modifier.name() && m.is_symbol() == modifier.is_symbol());
        if !exists {
            self.unit_modifiers.push(modifier);
        }
    }

    /// Iterate over all entries with their indices.
    pub fn iter_entries(&self) -> impl Iterator<Item = (TagIndex, &TagEntry)> {
        self.entries.iter().enumerate()
    }

    pub(crate) fn add_unit_class(&mut self, class: UnitClass) -> HedResult<()> {
        if self.unit_classes.contains_key(class.name()) {
            return Err(HedError::merge(format!(
                "unit class '{}' already defined in destination schema",
                class.name()
            )));
        }
        self.unit_classes.insert(class.name().to_string(), class);
        Ok(())
    }
}

/// A collection of schemas keyed by namespace prefix.
///
/// Invariant: every schema's `prefix` field equals its key. The empty
/// prefix is the default schema used for unprefixed tags.
#[derive(Debug, Default)]
pub struct HedSchemas {
    schemas: BTreeMap<String, HedSchema>,
}

impl HedSchemas {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection holding one default (unprefixed) schema.
    pub fn from_schema(schema: HedSchema) -> Self {
        let mut schemas = Self::new();
        // The empty prefix is always a valid key.
        schemas
            .insert("", schema)
            .unwrap_or_else(|_| unreachable!("empty prefix insert cannot collide"));
        schemas
    }

    /// Register a schema under a prefix, setting the schema's own `prefix`
    /// field to maintain the collection invariant.
    pub fn insert(&mut self, prefix: &str, mut schema: HedSchema) -> HedResult<()> {
        if !prefix.is_empty()
            && !(prefix.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && prefix.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(HedError::version(format!(
                "invalid schema namespace prefix '{prefix}'"
            )));
        }
        if self.schemas.contains_key(prefix) {
            return Err(HedError::schema(format!(
                "a schema is already registered under prefix '{prefix}'"
            )));
        }
        schema.set_prefix(prefix);
        self.schemas.insert(prefix.to_string(), schema);
        Ok(())
    }

    /// Look up a schema by prefix.
    pub fn get(&self, prefix: &str) -> Option<&HedSchema> {
        self.schemas.get(prefix)
    }

    /// The default (unprefixed) schema, if registered.
    pub fn default_schema(&self) -> Option<&HedSchema> {
        self.schemas.get("")
    }

    /// Iterate over (prefix, schema) pairs in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HedSchema)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::attribute;
    use crate::spec::TagSpec;

    fn small_spec() -> SchemaSpec {
        SchemaSpec::new("8.3.0")
            .with_tag(TagSpec::new("Event"))
            .with_tag(
                TagSpec::new("Event/Duration")
                    .with_attribute(attribute::TAKES_VALUE)
                    .with_value_attribute(attribute::UNIT_CLASS, "time"),
            )
            .with_tag(TagSpec::new("Action").with_attribute(attribute::EXTENSION_ALLOWED))
            .with_tag(TagSpec::new("Action/Move"))
            .with_tag(TagSpec::new("Action/Move/Walk"))
    }

    // ==================== Build tests ====================

    #[test]
    fn test_build_small_schema() {
        let schema = HedSchema::build(small_spec()).unwrap();
        assert_eq!(schema.len(), 5);
        assert_eq!(schema.version(), "8.3.0");
        assert_eq!(schema.generation(), Generation::Hed3);
    }

    #[test]
    fn test_build_rejects_missing_parent() {
        let spec = SchemaSpec::new("8.3.0").with_tag(TagSpec::new("Event/Duration"));
        let err = HedSchema::build(spec).unwrap_err();
        assert!(err.message.contains("parent 'Event'"));
    }

    #[test]
    fn test_build_rejects_duplicate_long_name() {
        let spec = SchemaSpec::new("8.3.0")
            .with_tag(TagSpec::new("Event"))
            .with_tag(TagSpec::new("event"));
        assert!(HedSchema::build(spec).is_err());
    }

    #[test]
    fn test_build_rejects_duplicate_unit_class() {
        let spec = SchemaSpec::new("8.3.0")
            .with_unit_class(UnitClass::new("time", vec![], None))
            .with_unit_class(UnitClass::new("time", vec![], None));
        assert!(HedSchema::build(spec).is_err());
    }

    // ==================== Lookup tests ====================

    #[test]
    fn test_long_name_lookup_case_insensitive() {
        let schema = HedSchema::build(small_spec()).unwrap();
        let index = schema.index_by_long_name("event/duration").unwrap();
        assert_eq!(schema.entry(index).long_name(), "Event/Duration");
    }

    #[test]
    fn test_short_name_lookup() {
        let schema = HedSchema::build(small_spec()).unwrap();
        let matches = schema.indices_by_short_name("duration");
        assert_eq!(matches.len(), 1);
        assert_eq!(schema.entry(matches[0]).short_name(), "Duration");
    }

    #[test]
    fn test_short_name_lookup_missing() {
        let schema = HedSchema::build(small_spec()).unwrap();
        assert!(schema.indices_by_short_name("nonexistent").is_empty());
    }

    #[test]
    fn test_is_descendant_of() {
        let schema = HedSchema::build(small_spec()).unwrap();
        let walk = schema.index_by_long_name("Action/Move/Walk").unwrap();
        assert!(schema.is_descendant_of(walk, "action"));
        assert!(schema.is_descendant_of(walk, "Move"));
        assert!(schema.is_descendant_of(walk, "Walk"));
        assert!(!schema.is_descendant_of(walk, "Event"));
    }

    #[test]
    fn test_child_by_short_name() {
        let schema = HedSchema::build(small_spec()).unwrap();
        let action = schema.index_by_long_name("Action").unwrap();
        let moved = schema.child_by_short_name(action, "move").unwrap();
        assert_eq!(schema.entry(moved).long_name(), "Action/Move");
        assert!(schema.child_by_short_name(action, "jump").is_none());
    }

    // ==================== Attribute propagation tests ====================

    #[test]
    fn test_extension_allowed_propagates_to_descendants() {
        let schema = HedSchema::build(small_spec()).unwrap();
        let walk = schema.index_by_long_name("Action/Move/Walk").unwrap();
        assert!(schema.entry(walk).extension_allowed());
    }

    #[test]
    fn test_non_inherited_attribute_does_not_propagate() {
        let spec = SchemaSpec::new("8.3.0")
            .with_tag(TagSpec::new("Event").with_attribute(attribute::UNIQUE))
            .with_tag(TagSpec::new("Event/Duration"));
        let schema = HedSchema::build(spec).unwrap();
        let duration = schema.index_by_long_name("Event/Duration").unwrap();
        assert!(!schema.entry(duration).unique());
    }

    #[test]
    fn test_spec_declared_inherited_set_overrides_defaults() {
        let mut spec = SchemaSpec::new("8.3.0")
            .with_tag(TagSpec::new("Event").with_attribute(attribute::UNIQUE))
            .with_tag(TagSpec::new("Event/Duration"));
        spec.inherited_attributes = vec![attribute::UNIQUE.to_string()];
        let schema = HedSchema::build(spec).unwrap();
        let duration = schema.index_by_long_name("Event/Duration").unwrap();
        assert!(schema.entry(duration).unique());
    }

    // ==================== HedSchemas tests ====================

    #[test]
    fn test_schemas_prefix_invariant() {
        let mut schemas = HedSchemas::new();
        schemas
            .insert("ts", HedSchema::build(small_spec()).unwrap())
            .unwrap();
        assert_eq!(schemas.get("ts").unwrap().prefix(), "ts");
        assert!(schemas.default_schema().is_none());
    }

    #[test]
    fn test_schemas_from_schema_is_default() {
        let schemas = HedSchemas::from_schema(HedSchema::build(small_spec()).unwrap());
        assert!(schemas.default_schema().is_some());
        assert_eq!(schemas.default_schema().unwrap().prefix(), "");
    }

    #[test]
    fn test_schemas_duplicate_prefix_rejected() {
        let mut schemas = HedSchemas::from_schema(HedSchema::build(small_spec()).unwrap());
        let err = schemas
            .insert("", HedSchema::build(small_spec()).unwrap())
            .unwrap_err();
        assert_eq!(err.kind, crate::error::HedErrorKind::Schema);
    }

    #[test]
    fn test_schemas_invalid_prefix_rejected() {
        let mut schemas = HedSchemas::new();
        let err = schemas
            .insert("2bad", HedSchema::build(small_spec()).unwrap())
            .unwrap_err();
        assert_eq!(err.kind, crate::error::HedErrorKind::Version);
    }
}
