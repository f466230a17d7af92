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

//! Shared schema fixtures for integration tests.
//!
//! The fixture schema is a small cut of the standard vocabulary: enough
//! hierarchy for short-form resolution, an ambiguous short name, takes-value
//! and extension-allowed nodes, the organizational tags (Definition, Def,
//! Def-expand, Onset, Offset, Inset), and a time unit class with SI
//! modifiers so unit checks are exercised end to end.

use hed_schema::{HedSchema, HedSchemas, SchemaSpec, TagSpec, Unit, UnitClass};

/// A small standard schema, version 8.3.0.
pub fn standard_schema() -> HedSchema {
    let spec = SchemaSpec::new("8.3.0")
        .with_tag(TagSpec::new("Event"))
        .with_tag(
            TagSpec::new("Event/Duration")
                .with_attribute("takesValue")
                .with_value_attribute("unitClass", "time"),
        )
        .with_tag(TagSpec::new("Event/Sensory-event"))
        .with_tag(TagSpec::new("Agent").with_attribute("requireChild"))
        .with_tag(TagSpec::new("Agent/Human"))
        .with_tag(TagSpec::new("Agent/Animal"))
        .with_tag(TagSpec::new("Action").with_attribute("extensionAllowed"))
        .with_tag(TagSpec::new("Action/Move"))
        .with_tag(TagSpec::new("Action/Move/Lift"))
        .with_tag(TagSpec::new("Action/Noise"))
        .with_tag(TagSpec::new("Item"))
        .with_tag(TagSpec::new("Item/Object"))
        .with_tag(TagSpec::new("Item/Object/Geometric-object"))
        .with_tag(TagSpec::new("Item/Object/Geometric-object/2D-shape"))
        .with_tag(TagSpec::new("Item/Object/Geometric-object/2D-shape/Square"))
        .with_tag(TagSpec::new(
            "Item/Object/Geometric-object/2D-shape/Triangle",
        ))
        .with_tag(TagSpec::new("Item/Sound"))
        .with_tag(TagSpec::new("Item/Sound/Noise"))
        .with_tag(TagSpec::new("Property").with_attribute("extensionAllowed"))
        .with_tag(TagSpec::new("Property/Sensory-property"))
        .with_tag(TagSpec::new("Property/Sensory-property/Color"))
        .with_tag(TagSpec::new("Property/Sensory-property/Color/Red"))
        .with_tag(TagSpec::new("Property/Sensory-property/Color/Green"))
        .with_tag(TagSpec::new("Property/Sensory-property/Color/Blue"))
        .with_tag(TagSpec::new("Property/Organizational-property"))
        .with_tag(
            TagSpec::new("Property/Organizational-property/Event-context")
                .with_attribute("unique"),
        )
        .with_tag(
            TagSpec::new("Property/Organizational-property/Definition")
                .with_attribute("takesValue")
                .with_attribute("requireChild")
                .with_attribute("topLevelTagGroup"),
        )
        .with_tag(
            TagSpec::new("Property/Organizational-property/Def")
                .with_attribute("takesValue")
                .with_attribute("requireChild"),
        )
        .with_tag(
            TagSpec::new("Property/Organizational-property/Def-expand")
                .with_attribute("takesValue")
                .with_attribute("requireChild")
                .with_attribute("tagGroup"),
        )
        .with_tag(
            TagSpec::new("Property/Organizational-property/Onset")
                .with_attribute("topLevelTagGroup"),
        )
        .with_tag(
            TagSpec::new("Property/Organizational-property/Offset")
                .with_attribute("topLevelTagGroup"),
        )
        .with_tag(
            TagSpec::new("Property/Organizational-property/Inset")
                .with_attribute("topLevelTagGroup"),
        )
        .with_unit_class(UnitClass::new(
            "time",
            vec![
                Unit::new("second", false, true),
                Unit::new("s", true, true),
                Unit::new("minute", false, false),
                Unit::new("hour", false, false),
                Unit::new("day", false, false),
            ],
            Some("second".to_string()),
        ))
        .with_unit_modifier("milli", false)
        .with_unit_modifier("m", true)
        .with_unit_modifier("centi", false)
        .with_unit_modifier("c", true)
        .with_unit_modifier("kilo", false)
        .with_unit_modifier("k", true)
        .with_unit_modifier("micro", false)
        .with_unit_modifier("u", true);
    HedSchema::build(spec).expect("fixture schema is well formed")
}

/// The standard fixture schema loaded as the default (unprefixed) schema.
pub fn standard_test_schemas() -> HedSchemas {
    HedSchemas::from_schema(standard_schema())
}

/// A small standalone library schema.
pub fn library_schema() -> HedSchema {
    let spec = SchemaSpec::new("testlib_1.0.0")
        .with_library("testlib")
        .with_tag(TagSpec::new("Sensor"))
        .with_tag(TagSpec::new("Sensor/Electrode"))
        .with_tag(
            TagSpec::new("Sensor/Impedance")
                .with_attribute("takesValue")
                .with_value_attribute("unitClass", "time"),
        );
    HedSchema::build(spec).expect("fixture library is well formed")
}

/// The standard fixture plus the library under the `ts` prefix.
pub fn schemas_with_library() -> HedSchemas {
    let mut schemas = standard_test_schemas();
    schemas
        .insert("ts", library_schema())
        .expect("fixture prefix is valid");
    schemas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_fixture_builds() {
        let schema = standard_schema();
        assert!(schema.index_by_long_name("Property/Sensory-property/Color/Red").is_some());
        assert_eq!(schema.indices_by_short_name("Noise").len(), 2);
        assert!(schema.unit_class("time").is_some());
    }

    #[test]
    fn test_library_fixture_registers_under_prefix() {
        let schemas = schemas_with_library();
        assert_eq!(schemas.len(), 2);
        assert!(schemas.get("ts").is_some());
    }
}
