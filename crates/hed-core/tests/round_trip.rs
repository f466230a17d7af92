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

//! Property tests for the splitter.

use hed_core::{has_errors, split, Limits, RawNode};
use proptest::prelude::*;

/// A well-formed tree rendered to text and split back.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Tag(String),
    Group(Vec<Node>),
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let tag = "[A-Za-z][A-Za-z0-9-]{0,8}(/[A-Za-z0-9 -]{1,8})?"
        .prop_map(|s| Node::Tag(s.trim().to_string()))
        .prop_filter("tag text must not end in whitespace", |node| {
            let Node::Tag(text) = node else { return true };
            !text.is_empty() && !text.ends_with(['/', ' '])
        });
    tag.prop_recursive(4, 32, 5, |inner| {
        prop::collection::vec(inner, 1..5).prop_map(Node::Group)
    })
}

fn render(nodes: &[Node], out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match node {
            Node::Tag(text) => out.push_str(text),
            Node::Group(children) => {
                out.push('(');
                render(children, out);
                out.push(')');
            }
        }
    }
}

fn collect(raw: &[RawNode], text: &str) -> Vec<Node> {
    raw.iter()
        .map(|node| match node {
            RawNode::Tag { span } => Node::Tag(span.slice(text).to_string()),
            RawNode::Group { children, .. } => Node::Group(collect(children, text)),
        })
        .collect()
}

proptest! {
    /// Rendering a tree and splitting it back yields the same tree, with
    /// every span slicing exactly its tag's text out of the original.
    #[test]
    fn split_round_trips_well_formed_trees(
        nodes in prop::collection::vec(node_strategy(), 1..6)
    ) {
        let mut text = String::new();
        render(&nodes, &mut text);
        let result = split(&text, 0, &Limits::default());
        prop_assert!(result.issues.is_empty(), "issues for {:?}: {:?}", text, result.issues);
        let raw = result.nodes.expect("well-formed input splits");
        prop_assert_eq!(collect(&raw, &text), nodes);
    }

    /// Splitting never panics, and a tree is produced exactly when no
    /// error-severity issue was reported.
    #[test]
    fn split_arbitrary_input_never_panics(text in any::<String>()) {
        let result = split(&text, 0, &Limits::default());
        prop_assert_eq!(result.nodes.is_some(), !has_errors(&result.issues));
    }
}
