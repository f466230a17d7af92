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

//! Error types for schema construction and internal defects.
//!
//! These errors are distinct from validation [issues]: they signal a
//! malformed schema specification, an illegal merge, or a broken internal
//! invariant, never a problem with user annotation data.
//!
//! [issues]: https://docs.rs/hed-core

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred while building or querying a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HedErrorKind {
    /// Malformed schema specification (duplicate tag, missing parent, etc).
    Schema,
    /// Unsupported or unparsable schema version specifier.
    Version,
    /// Illegal partnered-library merge (collision, base mismatch).
    Merge,
    /// A rooted library tag names a parent absent from the destination.
    Rooted,
    /// Broken internal invariant; indicates a defect, not bad input.
    Internal,
}

impl fmt::Display for HedErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "SchemaError"),
            Self::Version => write!(f, "VersionError"),
            Self::Merge => write!(f, "MergeError"),
            Self::Rooted => write!(f, "RootedError"),
            Self::Internal => write!(f, "InternalError"),
        }
    }
}

/// An error raised by the schema model or by an internal invariant check.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct HedError {
    /// The kind of error.
    pub kind: HedErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Additional context (e.g. "while merging library score").
    pub context: Option<String>,
}

impl HedError {
    /// Create a new error.
    pub fn new(kind: HedErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(HedErrorKind::Schema, message)
    }

    pub fn version(message: impl Into<String>) -> Self {
        Self::new(HedErrorKind::Version, message)
    }

    pub fn merge(message: impl Into<String>) -> Self {
        Self::new(HedErrorKind::Merge, message)
    }

    pub fn rooted(message: impl Into<String>) -> Self {
        Self::new(HedErrorKind::Rooted, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(HedErrorKind::Internal, message)
    }
}

/// Result type for schema operations.
pub type HedResult<T> = Result<T, HedError>;
