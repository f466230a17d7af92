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

//! Semantic validation of HED annotation strings.
//!
//! String-level checks ([`validate_hed_string`], [`validate_parsed`]) need
//! only one string and its schemas. Dataset-level checks
//! ([`validate_dataset`]) run over the event strings of a whole recording
//! in temporal order: definitions are collected into a [`DefinitionDict`],
//! `Def` references are resolved against it, and Onset/Offset/Inset scopes
//! are paired up.
//!
//! ```
//! use hed_test::standard_test_schemas;
//! use hed_validator::{validate_hed_string, ValidationOptions};
//!
//! let schemas = standard_test_schemas();
//! let (parsed, issues) =
//!     validate_hed_string("Event/Duration/3 ms, (Red, Square)", &schemas, &ValidationOptions::new());
//! assert!(parsed.is_some());
//! assert!(issues.is_empty());
//! ```

pub mod dataset;
pub mod definitions;
pub mod options;
pub mod string;
mod units;

pub use dataset::validate_dataset;
pub use definitions::{Definition, DefinitionDict};
pub use options::ValidationOptions;
pub use string::{validate_hed_string, validate_parsed};
