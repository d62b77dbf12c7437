//! The finished syntax tree.

use std::fmt::Write as _;

use grove_common::diagnostics::Diagnostic;
use grove_scanner::{SyntaxKind, Token};
use serde_json::{Map, Value, json};

use super::node::{Node, NodeArena, NodeIndex, NodeKind, SyntaxElement};
use super::state::ParseDiagnostic;

/// A lossless syntax tree: every token of the source appears exactly once
/// as a leaf, in source order.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    file_name: String,
    source: String,
    tokens: Vec<Token>,
    arena: NodeArena,
    root: NodeIndex,
    diagnostics: Vec<ParseDiagnostic>,
}

impl SyntaxTree {
    pub(crate) fn new(
        file_name: String,
        source: String,
        tokens: Vec<Token>,
        arena: NodeArena,
        root: NodeIndex,
        diagnostics: Vec<ParseDiagnostic>,
    ) -> Self {
        Self {
            file_name,
            source,
            tokens,
            arena,
            root,
            diagnostics,
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// The `SourceFile` node.
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.category == grove_common::DiagnosticCategory::Error)
    }

    /// Diagnostics bound to this tree's file name.
    #[must_use]
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .map(|diag| {
                let diagnostic = Diagnostic {
                    file: self.file_name.clone(),
                    start: diag.start,
                    length: diag.length,
                    message_text: diag.message.clone(),
                    category: diag.category,
                    code: diag.code,
                    related_information: Vec::new(),
                };
                match &diag.related {
                    Some(related) => diagnostic.with_related(
                        self.file_name.clone(),
                        related.start,
                        related.length,
                        related.message.clone(),
                        related.code,
                    ),
                    None => diagnostic,
                }
            })
            .collect()
    }

    // =========================================================================
    // Node access
    // =========================================================================

    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.arena.get(index)
    }

    #[must_use]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.arena.get(index).map(|node| node.kind)
    }

    #[must_use]
    pub fn children(&self, index: NodeIndex) -> &[SyntaxElement] {
        self.arena
            .get(index)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    pub fn child_nodes(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.children(index).iter().filter_map(|child| match child {
            SyntaxElement::Node(node) => Some(*node),
            SyntaxElement::Token(_) => None,
        })
    }

    /// Kinds of the token children of `index`, in order.
    #[must_use]
    pub fn child_token_kinds(&self, index: NodeIndex) -> Vec<SyntaxKind> {
        self.children(index)
            .iter()
            .filter_map(|child| match child {
                SyntaxElement::Token(token) => self.token_kind(*token),
                SyntaxElement::Node(_) => None,
            })
            .collect()
    }

    /// First top-level node that is not an `Error`.
    #[must_use]
    pub fn expression(&self) -> Option<NodeIndex> {
        self.child_nodes(self.root)
            .find(|&child| self.kind(child) != Some(NodeKind::Error))
    }

    /// Every node in pre-order, starting at the root.
    #[must_use]
    pub fn descendants(&self) -> Vec<NodeIndex> {
        let mut out = Vec::with_capacity(self.arena.len());
        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            if index.is_none() {
                continue;
            }
            out.push(index);
            let children: Vec<NodeIndex> = self.child_nodes(index).collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    #[must_use]
    pub fn find_first(&self, kind: NodeKind) -> Option<NodeIndex> {
        self.descendants()
            .into_iter()
            .find(|&index| self.kind(index) == Some(kind))
    }

    // =========================================================================
    // Text
    // =========================================================================

    #[must_use]
    pub fn token_kind(&self, token: u32) -> Option<SyntaxKind> {
        self.tokens.get(token as usize).map(|token| token.kind)
    }

    #[must_use]
    pub fn token_text(&self, token: u32) -> &str {
        self.tokens
            .get(token as usize)
            .map_or("", |token| token.text(&self.source))
    }

    /// Byte range of a node. Zero-width nodes sit at the start of their next token.
    #[must_use]
    pub fn range(&self, index: NodeIndex) -> (u32, u32) {
        let Some(node) = self.arena.get(index) else {
            return (0, 0);
        };
        let at = |token: u32| {
            self.tokens
                .get(token as usize)
                .map_or_else(|| u32::try_from(self.source.len()).unwrap_or(u32::MAX), |t| t.start)
        };
        if node.token_start == node.token_end {
            let pos = at(node.token_start);
            return (pos, pos);
        }
        let end = self
            .tokens
            .get(node.token_end as usize - 1)
            .map_or(0, |token| token.end);
        (at(node.token_start), end)
    }

    /// Source text spanned by a node, including trivia between its tokens.
    #[must_use]
    pub fn text(&self, index: NodeIndex) -> &str {
        let (start, end) = self.range(index);
        self.source
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }

    /// Token indices of every leaf, in tree order.
    #[must_use]
    pub fn leaf_tokens(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.tokens.len());
        let mut stack: Vec<SyntaxElement> = vec![SyntaxElement::Node(self.root)];
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(token) => out.push(token),
                SyntaxElement::Node(index) => {
                    stack.extend(self.children(index).iter().rev().copied());
                }
            }
        }
        out
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Indented rendering of the whole tree, one node or token per line.
    #[must_use]
    pub fn dump(&self) -> String {
        self.dump_node(self.root)
    }

    #[must_use]
    pub fn dump_node(&self, index: NodeIndex) -> String {
        let mut out = String::new();
        let mut stack: Vec<(SyntaxElement, usize)> = vec![(SyntaxElement::Node(index), 0)];
        while let Some((element, depth)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match element {
                SyntaxElement::Token(token) => {
                    let kind = self.token_kind(token).unwrap_or(SyntaxKind::Unknown);
                    let _ = writeln!(out, "{indent}{kind:?} {:?}", self.token_text(token));
                }
                SyntaxElement::Node(node) => {
                    let Some(kind) = self.kind(node) else {
                        continue;
                    };
                    let _ = writeln!(out, "{indent}{kind:?}");
                    for child in self.children(node).iter().rev() {
                        stack.push((*child, depth + 1));
                    }
                }
            }
        }
        out
    }

    /// JSON rendering of the tree and its diagnostics.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("fileName".into(), Value::String(self.file_name.clone()));
        out.insert("root".into(), self.node_to_json(self.root));
        out.insert("diagnostics".into(), json!(self.diagnostics));
        Value::Object(out)
    }

    /// Iterative post-order walk; each finished node moves into its parent.
    fn node_to_json(&self, index: NodeIndex) -> Value {
        let mut stack = vec![JsonFrame::new(index)];
        loop {
            let Some(frame) = stack.last_mut() else {
                return Value::Null;
            };
            if let Some(child) = self.children(frame.index).get(frame.next_child).copied() {
                frame.next_child += 1;
                match child {
                    SyntaxElement::Token(token) => frame.children.push(self.token_to_json(token)),
                    SyntaxElement::Node(node) => stack.push(JsonFrame::new(node)),
                }
                continue;
            }

            let Some(frame) = stack.pop() else {
                return Value::Null;
            };
            let value = self.finish_json_node(frame);
            match stack.last_mut() {
                Some(parent) => parent.children.push(value),
                None => return value,
            }
        }
    }

    fn finish_json_node(&self, frame: JsonFrame) -> Value {
        let (start, end) = self.range(frame.index);
        let mut object = Map::new();
        object.insert("kind".into(), json!(self.kind(frame.index)));
        object.insert("start".into(), Value::from(start));
        object.insert("end".into(), Value::from(end));
        object.insert("children".into(), Value::Array(frame.children));
        Value::Object(object)
    }

    fn token_to_json(&self, token: u32) -> Value {
        let mut object = Map::new();
        object.insert("token".into(), json!(self.token_kind(token)));
        object.insert("text".into(), Value::from(self.token_text(token)));
        Value::Object(object)
    }
}

/// A node whose JSON children are still being collected.
struct JsonFrame {
    index: NodeIndex,
    next_child: usize,
    children: Vec<Value>,
}

impl JsonFrame {
    fn new(index: NodeIndex) -> Self {
        Self {
            index,
            next_child: 0,
            children: Vec::new(),
        }
    }
}
