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

//! The lexer/splitter: raw HED text to a forest of tag and group spans.
//!
//! Splitting is purely syntactic; no schema lookups happen here. The scan
//! walks the string once, tracking parenthesis depth, and recurses into each
//! `(...)` with offset-adjusted positions so every span indexes the
//! *original* string, never a substring.
//!
//! NUL and tab are substituted with spaces (reported as warnings) before any
//! delimiter scanning, since the substitution affects the character counts
//! later checks rely on. Any error-severity lexical issue aborts the split:
//! no forest is produced and the string must not be validated further.

use crate::issue::{has_errors, Issue, IssueKind};
use crate::limits::Limits;
use crate::span::Span;
use std::borrow::Cow;

/// Characters that may not appear anywhere in a HED string.
const ILLEGAL_CHARACTERS: [char; 5] = ['{', '}', '[', ']', '~'];

/// A node of the raw split forest: spans only, no schema resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNode {
    /// A single tag's span (trailing/leading whitespace excluded).
    Tag { span: Span },
    /// A parenthesized group; the span includes both parentheses.
    Group { span: Span, children: Vec<RawNode> },
}

impl RawNode {
    pub fn span(&self) -> Span {
        match self {
            Self::Tag { span } => *span,
            Self::Group { span, .. } => *span,
        }
    }
}

/// The outcome of splitting one string.
#[derive(Debug)]
pub struct SplitResult<'a> {
    /// The raw forest, or `None` if a lexical error aborted the split.
    pub nodes: Option<Vec<RawNode>>,
    /// The input with NUL/tab substituted by spaces. Spans index this text
    /// (byte positions are identical to the original input's).
    pub text: Cow<'a, str>,
    /// Lexical issues, warnings included.
    pub issues: Vec<Issue>,
}

/// Split raw HED text into a forest of tag and group spans.
///
/// `start_offset` shifts all reported spans, so a caller splitting a
/// substring of a larger source can keep positions in the outer string's
/// coordinates.
pub fn split<'a>(text: &'a str, start_offset: usize, limits: &Limits) -> SplitResult<'a> {
    let mut issues = Vec::new();

    if text.len() > limits.max_string_length {
        issues.push(
            Issue::new(IssueKind::LimitExceeded)
                .with_parameter("limit", "string length")
                .with_parameter("maximum", limits.max_string_length.to_string()),
        );
        return SplitResult {
            nodes: None,
            text: Cow::Borrowed(text),
            issues,
        };
    }

    // Character checks run over the raw input before any delimiter logic.
    let mut opening = 0usize;
    let mut closing = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '\0' | '\t' => {
                issues.push(
                    Issue::new(IssueKind::ControlCharacter)
                        .with_parameter("index", (start_offset + index).to_string())
                        .with_parameter("string", text)
                        .with_span(Span::new(start_offset + index, start_offset + index + 1)),
                );
            }
            '(' => opening += 1,
            ')' => closing += 1,
            c if ILLEGAL_CHARACTERS.contains(&c) => {
                issues.push(
                    Issue::new(IssueKind::InvalidCharacter)
                        .with_parameter("character", c.to_string())
                        .with_parameter("index", (start_offset + index).to_string())
                        .with_parameter("string", text)
                        .with_span(Span::new(
                            start_offset + index,
                            start_offset + index + c.len_utf8(),
                        )),
                );
            }
            _ => {}
        }
    }
    if opening != closing {
        issues.push(
            Issue::new(IssueKind::UnbalancedParentheses)
                .with_parameter("opening", opening.to_string())
                .with_parameter("closing", closing.to_string())
                .with_parameter("string", text),
        );
    }

    // Substitution changes content, never byte positions: NUL, tab, and
    // space are all one byte.
    let normalized: Cow<'a, str> = if text.contains(['\0', '\t']) {
        Cow::Owned(text.replace(['\0', '\t'], " "))
    } else {
        Cow::Borrowed(text)
    };

    if has_errors(&issues) {
        return SplitResult {
            nodes: None,
            text: normalized,
            issues,
        };
    }

    let mut scan = Scan {
        text: normalized.as_ref(),
        original: text,
        offset: start_offset,
        limits,
        issues,
    };
    let nodes = scan.split_level(0, normalized.len(), 0).ok();
    let issues = scan.issues;
    SplitResult {
        nodes,
        text: normalized,
        issues,
    }
}

/// What the scanner most recently passed at the current nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    LevelStart,
    Delimiter(usize),
    GroupClose(usize),
    TagChar,
}

struct Scan<'a, 'b> {
    text: &'a str,
    original: &'a str,
    offset: usize,
    limits: &'b Limits,
    issues: Vec<Issue>,
}

impl Scan<'_, '_> {
    /// Split one nesting level of `self.text[lo..hi]`. Positions are always
    /// absolute within the full text.
    fn split_level(&mut self, lo: usize, hi: usize, depth: usize) -> Result<Vec<RawNode>, ()> {
        let mut nodes = Vec::new();
        let mut token: Option<(usize, usize)> = None;
        let mut last = Last::LevelStart;
        let mut pos = lo;

        while pos < hi {
            let c = self.text[pos..hi]
                .chars()
                .next()
                .expect("position is on a character boundary");
            let next = pos + c.len_utf8();
            match c {
                ',' => {
                    if let Some((start, end)) = token.take() {
                        nodes.push(self.close_tag(start, end)?);
                    } else {
                        match last {
                            Last::LevelStart | Last::Delimiter(_) => {
                                self.extra_delimiter(pos);
                                return Err(());
                            }
                            Last::GroupClose(_) | Last::TagChar => {}
                        }
                    }
                    last = Last::Delimiter(pos);
                }
                '(' => {
                    if let Some((start, _)) = token {
                        self.missing_comma(start, next);
                        return Err(());
                    }
                    if let Last::GroupClose(group_start) = last {
                        self.missing_comma(group_start, next);
                        return Err(());
                    }
                    if depth + 1 > self.limits.max_nesting_depth {
                        self.issues.push(
                            Issue::new(IssueKind::LimitExceeded)
                                .with_parameter("limit", "nesting depth")
                                .with_parameter(
                                    "maximum",
                                    self.limits.max_nesting_depth.to_string(),
                                )
                                .with_span(Span::point(self.offset + pos)),
                        );
                        return Err(());
                    }
                    let close = match find_matching_close(self.text, pos, hi) {
                        Some(close) => close,
                        None => {
                            self.stray_parenthesis();
                            return Err(());
                        }
                    };
                    let children = self.split_level(next, close, depth + 1)?;
                    nodes.push(RawNode::Group {
                        span: Span::new(self.offset + pos, self.offset + close + 1),
                        children,
                    });
                    last = Last::GroupClose(pos);
                    pos = close + 1;
                    continue;
                }
                ')' => {
                    // A close with no matching open at this level; overall
                    // counts were balanced, so the structure is inverted.
                    self.stray_parenthesis();
                    return Err(());
                }
                c if c.is_whitespace() => {}
                _ => {
                    if let Last::GroupClose(group_start) = last {
                        self.missing_comma(group_start, next);
                        return Err(());
                    }
                    match &mut token {
                        Some((_, end)) => *end = next,
                        None => token = Some((pos, next)),
                    }
                    last = Last::TagChar;
                }
            }
            pos = next;
        }

        if let Some((start, end)) = token.take() {
            nodes.push(self.close_tag(start, end)?);
        } else if let Last::Delimiter(index) = last {
            self.extra_delimiter(index);
            return Err(());
        }
        Ok(nodes)
    }

    /// Finish a tag token, rejecting stray quotes. A quote pair wrapping the
    /// whole token is legal and stripped later by the canonicalizer.
    fn close_tag(&mut self, start: usize, end: usize) -> Result<RawNode, ()> {
        let token = &self.text[start..end];
        let quotes: Vec<usize> = token
            .char_indices()
            .filter(|&(_, c)| c == '"')
            .map(|(i, _)| i)
            .collect();
        let wrapping = quotes.len() == 2
            && token.starts_with('"')
            && token.ends_with('"')
            && token.len() >= 2;
        if !quotes.is_empty() && !wrapping {
            let index = start + quotes[0];
            self.issues.push(
                Issue::new(IssueKind::InvalidCharacter)
                    .with_parameter("character", "\"")
                    .with_parameter("index", (self.offset + index).to_string())
                    .with_parameter("string", self.original)
                    .with_span(Span::new(self.offset + index, self.offset + index + 1)),
            );
            return Err(());
        }
        Ok(RawNode::Tag {
            span: Span::new(self.offset + start, self.offset + end),
        })
    }

    fn extra_delimiter(&mut self, index: usize) {
        self.issues.push(
            Issue::new(IssueKind::ExtraDelimiter)
                .with_parameter("index", (self.offset + index).to_string())
                .with_parameter("string", self.original)
                .with_span(Span::new(self.offset + index, self.offset + index + 1)),
        );
    }

    fn missing_comma(&mut self, start: usize, end: usize) {
        self.issues.push(
            Issue::new(IssueKind::MissingComma)
                .with_parameter("tag", &self.text[start..end])
                .with_span(Span::new(self.offset + start, self.offset + end)),
        );
    }

    fn stray_parenthesis(&mut self) {
        self.issues.push(
            Issue::new(IssueKind::UnbalancedParentheses)
                .with_parameter("opening", "misplaced")
                .with_parameter("closing", "misplaced")
                .with_parameter("string", self.original),
        );
    }
}

/// Find the `)` matching the `(` at `open`, scanning within `[open, hi)`.
fn find_matching_close(text: &str, open: usize, hi: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..hi].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}
