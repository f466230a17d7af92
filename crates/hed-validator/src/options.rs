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

//! Validation options.

use hed_core::{Limits, ParseOptions};

/// Options controlling semantic validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Also report warning-severity issues (extensions, default units,
    /// missing required tags).
    pub check_for_warnings: bool,
    /// The string is a sidecar value template and must contain exactly one
    /// `#` placeholder outside definitions.
    pub value_string: bool,
    pub limits: Limits,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warnings(mut self) -> Self {
        self.check_for_warnings = true;
        self
    }

    pub fn as_value_string(mut self) -> Self {
        self.value_string = true;
        self
    }

    /// The matching parse options.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            limits: self.limits.clone(),
            check_for_warnings: self.check_for_warnings,
        }
    }
}
