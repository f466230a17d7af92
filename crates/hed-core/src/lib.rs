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

//! Core HED string parsing: splitting, canonicalization, and the parsed
//! string model.
//!
//! This crate turns raw annotation text into a [`ParsedHedString`]: the
//! splitter produces a forest of tag and group spans with exact byte
//! offsets into the original input, and each tag is then resolved to its
//! canonical long form against the schema its namespace prefix selects.
//!
//! Problems with annotation text are reported as [`Issue`] values and
//! collected, never thrown; `Result` errors are reserved for internal
//! defects and schema loading (see [`hed_schema::HedError`]).
//!
//! ```
//! use hed_core::{parse_hed_string, ParseOptions};
//! use hed_schema::{HedSchema, HedSchemas, SchemaSpec, TagSpec};
//!
//! let spec = SchemaSpec::new("8.3.0")
//!     .with_tag(TagSpec::new("Property"))
//!     .with_tag(TagSpec::new("Property/Color"))
//!     .with_tag(TagSpec::new("Property/Color/Red"));
//! let schemas = HedSchemas::from_schema(HedSchema::build(spec)?);
//!
//! let (parsed, issues) = parse_hed_string("Red", &schemas, &ParseOptions::default());
//! assert!(issues.is_empty());
//! assert_eq!(parsed.unwrap().to_string(), "Property/Color/Red");
//! # Ok::<(), hed_schema::HedError>(())
//! ```

pub mod canonical;
pub mod issue;
pub mod limits;
pub mod messages;
pub mod parse;
pub mod parsed;
pub mod span;
pub mod split;

pub use canonical::{canonicalize, format_tag, CanonicalTag};
pub use issue::{has_errors, Issue, IssueKind, Severity};
pub use limits::Limits;
pub use parse::{parse_hed_string, ParseOptions};
pub use parsed::{NodeIter, ParsedGroup, ParsedHedString, ParsedNode, ParsedTag};
pub use span::Span;
pub use split::{split, RawNode, SplitResult};
