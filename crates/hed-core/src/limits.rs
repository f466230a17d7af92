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

//! Resource limits for parsing untrusted annotation strings.

/// Limits enforced while splitting and validating a single HED string.
///
/// Annotation strings come from user-supplied dataset files, so the parser
/// bounds input size, parenthesis nesting, and issue accumulation. Exceeding
/// a limit is reported as a lexical issue and parsing of that string stops.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Maximum input string length in bytes (default: 1 MB).
    pub max_string_length: usize,
    /// Maximum parenthesis nesting depth (default: 50).
    pub max_nesting_depth: usize,
    /// Maximum number of issues collected per validation call
    /// (default: 10,000).
    pub max_issues: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_string_length: 1024 * 1024,
            max_nesting_depth: 50,
            max_issues: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_string_length, 1024 * 1024);
        assert_eq!(limits.max_nesting_depth, 50);
        assert_eq!(limits.max_issues, 10_000);
    }

    #[test]
    fn test_limits_are_adjustable() {
        let limits = Limits {
            max_nesting_depth: 4,
            ..Limits::default()
        };
        assert_eq!(limits.max_nesting_depth, 4);
        assert_eq!(limits.max_string_length, 1024 * 1024);
    }
}
