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

//! In-memory HED schema model.
//!
//! This crate turns a flattened schema specification (produced by an
//! external loader; this crate does no I/O) into an immutable, queryable
//! vocabulary: a tag hierarchy with case-insensitive lookup, unit classes
//! with SI modifiers, attribute inheritance, and partnered-library merging.
//!
//! Once built, a [`HedSchema`] is read-only and can back any number of
//! concurrent validations.

mod entries;
mod error;
mod merge;
mod rules;
mod schema;
mod spec;

pub use entries::{attribute, AttributeSet, TagEntry, TagIndex, Unit, UnitClass, UnitModifier};
pub use error::{HedError, HedErrorKind, HedResult};
pub use merge::merge_partnered;
pub use rules::{rules_for, Generation, Hed2Rules, Hed3Rules, SchemaRules};
pub use schema::{HedSchema, HedSchemas};
pub use spec::{SchemaSpec, SchemaVersionSpec, TagSpec};
