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

//! Partnered library schema merging.
//!
//! A partnered library declares `withStandard`: the version of the standard
//! schema its tags are meant to live inside. Merging copies every tag the
//! library marks `inLibrary` into the destination schema, grafting `rooted`
//! tags under the standard node they name. Tag-name collisions and missing
//! rooted parents abort the merge with an error. The merge mutates `dest`
//! in place, so on an error some library tags may already be grafted;
//! discard the destination schema when the merge fails.
//!
//! Non-partnered libraries are not merged at all; they coexist in a
//! [`HedSchemas`](crate::HedSchemas) collection under distinct prefixes.

use crate::error::{HedError, HedResult};
use crate::schema::HedSchema;
use std::collections::HashMap;

/// Merge the `inLibrary` tags of a partnered `source` schema into `dest`.
///
/// `dest` must be (or itself be partnered with) the standard-schema version
/// the library names in `withStandard`. On an error `dest` may hold a
/// partial merge and should be discarded.
pub fn merge_partnered(dest: &mut HedSchema, source: &HedSchema) -> HedResult<()> {
    let base = source.with_standard().ok_or_else(|| {
        HedError::merge("source schema is not partnered: it declares no withStandard version")
    })?;
    let dest_base = dest.with_standard().unwrap_or(dest.version()).to_string();
    if dest_base != base {
        return Err(HedError::merge(format!(
            "standard version mismatch: destination is based on {dest_base}, \
             library '{}' expects {base}",
            source.library().unwrap_or("?")
        )));
    }

    // Source indices of copied entries mapped to their destination indices.
    let mut copied: HashMap<usize, usize> = HashMap::new();

    for (source_index, entry) in source.iter_entries() {
        if !entry.in_library() {
            continue;
        }

        let parent = if let Some(rooted_name) = entry.rooted() {
            let candidates = dest.indices_by_short_name(rooted_name);
            match candidates {
                [] => {
                    return Err(HedError::rooted(format!(
                        "tag '{}' is rooted under '{rooted_name}', which does not exist \
                         in the destination schema",
                        entry.long_name()
                    )))
                }
                [single] => Some(*single),
                _ => {
                    return Err(HedError::rooted(format!(
                        "tag '{}' is rooted under '{rooted_name}', which is ambiguous \
                         in the destination schema",
                        entry.long_name()
                    )))
                }
            }
        } else if let Some(source_parent) = entry.parent() {
            if let Some(&mapped) = copied.get(&source_parent) {
                Some(mapped)
            } else {
                // The parent is one of the standard nodes the library file
                // repeats; locate it in the destination by long name.
                let parent_long = source.entry(source_parent).long_name();
                Some(dest.index_by_long_name(parent_long).ok_or_else(|| {
                    HedError::merge(format!(
                        "parent '{parent_long}' of library tag '{}' is not present \
                         in the destination schema",
                        entry.long_name()
                    ))
                })?)
            }
        } else {
            None
        };

        let long_name = match parent {
            Some(parent) => format!("{}/{}", dest.entry(parent).long_name(), entry.short_name()),
            None => entry.short_name().to_string(),
        };
        if dest.index_by_long_name(&long_name).is_some() {
            return Err(HedError::merge(format!(
                "tag '{long_name}' is already defined in the destination schema"
            )));
        }

        let index = dest.add_entry(
            entry.short_name(),
            &long_name,
            parent,
            entry.attributes().clone(),
        )?;
        copied.insert(source_index, index);
    }

    // Library unit classes and modifiers the standard lacks come along.
    for class in source.iter_unit_classes() {
        if dest.unit_class(class.name()).is_none() {
            dest.add_unit_class(class.clone())?;
        }
    }
    for modifier in source.unit_modifiers() {
        dest.add_unit_modifier(modifier.clone());
    }

    // Grafted tags inherit from their new ancestors.
    dest.propagate_inherited_attributes();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::{attribute, Unit, UnitClass};
    use crate::error::HedErrorKind;
    use crate::spec::{SchemaSpec, TagSpec};

    fn standard() -> HedSchema {
        HedSchema::build(
            SchemaSpec::new("8.3.0")
                .with_tag(TagSpec::new("Event"))
                .with_tag(TagSpec::new("Item").with_attribute(attribute::EXTENSION_ALLOWED))
                .with_tag(TagSpec::new("Item/Object")),
        )
        .unwrap()
    }

    fn library() -> HedSchema {
        HedSchema::build(
            SchemaSpec::new("1.1.0")
                .with_library("testlib")
                .with_standard("8.3.0")
                .with_tag(TagSpec::new("Apparatus").with_attribute(attribute::IN_LIBRARY))
                .with_tag(TagSpec::new("Apparatus/Sensor").with_attribute(attribute::IN_LIBRARY))
                .with_tag(
                    TagSpec::new("Probe")
                        .with_attribute(attribute::IN_LIBRARY)
                        .with_value_attribute(attribute::ROOTED, "Object"),
                )
                .with_unit_class(UnitClass::new(
                    "impedance",
                    vec![Unit::new("ohm", false, true)],
                    Some("ohm".to_string()),
                )),
        )
        .unwrap()
    }

    // ==================== Successful merge tests ====================

    #[test]
    fn test_merge_copies_library_tags() {
        let mut dest = standard();
        merge_partnered(&mut dest, &library()).unwrap();
        assert!(dest.index_by_long_name("Apparatus").is_some());
        assert!(dest.index_by_long_name("Apparatus/Sensor").is_some());
    }

    #[test]
    fn test_merge_grafts_rooted_tag() {
        let mut dest = standard();
        merge_partnered(&mut dest, &library()).unwrap();
        let probe = dest.index_by_long_name("Item/Object/Probe").unwrap();
        assert!(dest.is_descendant_of(probe, "Item"));
        // Inherited attributes of the new ancestor apply to the graft.
        assert!(dest.entry(probe).extension_allowed());
    }

    #[test]
    fn test_merge_copies_missing_unit_classes() {
        let mut dest = standard();
        merge_partnered(&mut dest, &library()).unwrap();
        assert!(dest.unit_class("impedance").is_some());
    }

    #[test]
    fn test_merge_preserves_in_library_marker() {
        let mut dest = standard();
        merge_partnered(&mut dest, &library()).unwrap();
        let apparatus = dest.index_by_long_name("Apparatus").unwrap();
        assert!(dest.entry(apparatus).in_library());
    }

    // ==================== Failing merge tests ====================

    #[test]
    fn test_merge_rejects_version_mismatch() {
        let mut dest = HedSchema::build(SchemaSpec::new("8.2.0").with_tag(TagSpec::new("Event")))
            .unwrap();
        let err = merge_partnered(&mut dest, &library()).unwrap_err();
        assert_eq!(err.kind, HedErrorKind::Merge);
        assert!(err.message.contains("8.2.0"));
    }

    #[test]
    fn test_merge_rejects_non_partnered_source() {
        let mut dest = standard();
        let plain = HedSchema::build(
            SchemaSpec::new("1.0.0")
                .with_library("plain")
                .with_tag(TagSpec::new("Apparatus").with_attribute(attribute::IN_LIBRARY)),
        )
        .unwrap();
        let err = merge_partnered(&mut dest, &plain).unwrap_err();
        assert!(err.message.contains("withStandard"));
    }

    #[test]
    fn test_merge_rejects_tag_collision() {
        let mut dest = standard();
        let colliding = HedSchema::build(
            SchemaSpec::new("1.0.0")
                .with_library("bad")
                .with_standard("8.3.0")
                .with_tag(TagSpec::new("Event").with_attribute(attribute::IN_LIBRARY)),
        )
        .unwrap();
        let err = merge_partnered(&mut dest, &colliding).unwrap_err();
        assert_eq!(err.kind, HedErrorKind::Merge);
        assert!(err.message.contains("already defined"));
    }

    #[test]
    fn test_merge_rejects_missing_rooted_parent() {
        let mut dest = standard();
        let orphan = HedSchema::build(
            SchemaSpec::new("1.0.0")
                .with_library("bad")
                .with_standard("8.3.0")
                .with_tag(
                    TagSpec::new("Probe")
                        .with_attribute(attribute::IN_LIBRARY)
                        .with_value_attribute(attribute::ROOTED, "Widget"),
                ),
        )
        .unwrap();
        let err = merge_partnered(&mut dest, &orphan).unwrap_err();
        assert_eq!(err.kind, HedErrorKind::Rooted);
    }

    #[test]
    fn test_merge_skips_non_library_tags() {
        let mut dest = standard();
        let lib = HedSchema::build(
            SchemaSpec::new("1.0.0")
                .with_library("testlib")
                .with_standard("8.3.0")
                // A copy of a standard node, not marked inLibrary.
                .with_tag(TagSpec::new("Item"))
                .with_tag(TagSpec::new("Item/Electrode").with_attribute(attribute::IN_LIBRARY)),
        )
        .unwrap();
        merge_partnered(&mut dest, &lib).unwrap();
        // 3 standard entries + 1 library entry; the repeated Item is not copied.
        assert_eq!(dest.len(), 4);
        assert!(dest.index_by_long_name("Item/Electrode").is_some());
    }
}
