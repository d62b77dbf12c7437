//! Parser state: token cursor, tree builder and diagnostic sink.
//!
//! Grammar methods are spread over `state_paths.rs`, `state_expressions.rs`
//! and `state_statements.rs`; they all work through the cursor primitives
//! defined here.

use grove_common::diagnostics::{
    DiagnosticCategory, diagnostic_codes, diagnostic_messages, format_message,
    get_diagnostic_category, get_message_template,
};
use grove_common::limits::MAX_EVENT_PREALLOC;
use grove_scanner::{ScannerState, SyntaxKind, Token, TokenSet};
use serde::Serialize;

use super::builder::{Marker, TreeBuilder};
use super::node::NodeKind;
use super::tree::SyntaxTree;
use crate::options::ParserOptions;

/// A diagnostic recorded while parsing. Offsets are bytes into the source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    /// A second location that explains the first, such as an unmatched opener.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<RelatedSpan>,
}

/// A location attached to a [`ParseDiagnostic`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelatedSpan {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

/// Outcome of one grammar production.
///
/// `Malformed` ends the current attempt only; whatever was built so far
/// stays in the tree and the caller keeps going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseResult {
    Success(NodeKind),
    Malformed,
}

impl ParseResult {
    #[must_use]
    pub const fn is_malformed(self) -> bool {
        matches!(self, ParseResult::Malformed)
    }

    #[must_use]
    pub const fn kind(self) -> Option<NodeKind> {
        match self {
            ParseResult::Success(kind) => Some(kind),
            ParseResult::Malformed => None,
        }
    }
}

pub struct ParserState {
    pub(crate) file_name: String,
    pub(crate) source: String,
    pub(crate) tokens: Vec<Token>,
    /// Index of the current token in `tokens`.
    pub(crate) pos: usize,
    pub(crate) builder: TreeBuilder,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    scanner_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) options: ParserOptions,
    pub(crate) recursion_depth: u32,
}

impl AsMut<TreeBuilder> for ParserState {
    fn as_mut(&mut self) -> &mut TreeBuilder {
        &mut self.builder
    }
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source_text: String) -> Self {
        Self::with_options(file_name, source_text, ParserOptions::default())
    }

    #[must_use]
    pub fn with_options(file_name: String, source_text: String, options: ParserOptions) -> Self {
        let mut scanner = ScannerState::new(source_text);
        let tokens = scanner.scan_all();
        let scanner_diagnostics = scanner
            .get_scanner_diagnostics()
            .iter()
            .map(|diag| ParseDiagnostic {
                start: u32_from_usize(diag.pos),
                length: u32_from_usize(diag.length),
                message: diag.message.to_string(),
                code: diag.code,
                category: DiagnosticCategory::Error,
                related: None,
            })
            .collect();
        // Roughly two events per token plus node starts and finishes.
        let capacity = (tokens.len() * 3).min(MAX_EVENT_PREALLOC);
        Self {
            file_name,
            source: scanner.into_text(),
            tokens,
            pos: 0,
            builder: TreeBuilder::with_capacity(capacity),
            parse_diagnostics: Vec::new(),
            scanner_diagnostics,
            options: options.clamped(),
            recursion_depth: 0,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    #[must_use]
    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    /// Kind of the current token. Past the end this is `EndOfFileToken`.
    #[inline]
    #[must_use]
    pub fn token(&self) -> SyntaxKind {
        self.nth(0)
    }

    #[inline]
    #[must_use]
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map_or(SyntaxKind::EndOfFileToken, |token| token.kind)
    }

    /// True if the next tokens are exactly `kinds`, in order.
    #[must_use]
    pub fn look_ahead(&self, kinds: &[SyntaxKind]) -> bool {
        kinds
            .iter()
            .enumerate()
            .all(|(n, &kind)| self.nth(n) == kind)
    }

    #[inline]
    #[must_use]
    pub fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    #[inline]
    #[must_use]
    pub fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.token())
    }

    /// Byte offset where the current token starts.
    #[must_use]
    pub fn token_pos(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .map_or_else(|| u32_from_usize(self.source.len()), |token| token.start)
    }

    #[must_use]
    pub fn token_end(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .map_or_else(|| u32_from_usize(self.source.len()), |token| token.end)
    }

    fn token_text(&self) -> &str {
        self.tokens
            .get(self.pos)
            .map_or("", |token| token.text(&self.source))
    }

    /// Consume the current token into the node under construction.
    pub fn next_token(&mut self) {
        if self.pos < self.tokens.len() {
            self.builder.token();
            self.pos += 1;
        }
    }

    pub fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub fn parse_optional_set(&mut self, set: TokenSet) -> bool {
        if self.at_set(set) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind`, or report `code` at the current token and consume nothing.
    pub fn parse_expected(&mut self, kind: SyntaxKind, code: u32) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error(code);
        false
    }

    /// `parse_expected` for a closing delimiter. When `open_token` is the
    /// index of the matching opener, the diagnostic points back at it.
    pub fn parse_expected_closing(
        &mut self,
        close: SyntaxKind,
        code: u32,
        open_token: Option<usize>,
    ) -> bool {
        if self.parse_optional(close) {
            return true;
        }
        let reported = self.parse_diagnostics.len();
        self.error(code);
        if self.parse_diagnostics.len() == reported {
            return false;
        }
        let Some(open) = open_token.and_then(|index| self.tokens.get(index)).copied() else {
            return false;
        };
        if let Some(close_text) = close.text() {
            let message = format_message(
                diagnostic_messages::MATCHING_DELIMITER_HERE,
                &[close_text, open.text(&self.source)],
            );
            if let Some(diag) = self.parse_diagnostics.last_mut() {
                diag.related = Some(RelatedSpan {
                    start: open.start,
                    length: open.end - open.start,
                    message,
                    code: diagnostic_codes::MATCHING_DELIMITER_HERE,
                });
            }
        }
        false
    }

    /// Index of the current token if it is `kind`.
    pub(crate) fn token_index_if(&self, kind: SyntaxKind) -> Option<usize> {
        self.is_token(kind).then_some(self.pos)
    }

    pub fn start_node(&mut self) -> Marker {
        self.builder.start()
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Record `code` against the current token without touching the tree.
    pub fn parse_error_at_current_token(&mut self, code: u32, args: &[&str]) {
        let start = self.token_pos();
        let length = self.token_end() - start;
        self.parse_error_at(start, length, code, args);
    }

    pub fn parse_error_at(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        // One diagnostic per position is enough; cascades add noise.
        if let Some(last) = self.parse_diagnostics.last()
            && last.start == start
            && last.code == code
        {
            return;
        }
        let template = get_message_template(code).unwrap_or("Syntax error.");
        let message = format_message(template, args);
        let category = get_diagnostic_category(code).unwrap_or(DiagnosticCategory::Error);
        tracing::debug!(code, start, length, %message, "parse diagnostic");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message,
            code,
            category,
            related: None,
        });
    }

    /// Report `code` and leave a zero-width `Error` node at the current position.
    pub fn error(&mut self, code: u32) {
        self.parse_error_at_current_token(code, &[]);
        self.builder.error();
    }

    /// Report `code` and wrap the current token in an `Error` node.
    pub fn error_and_skip(&mut self, code: u32) {
        let text = self.token_text().to_string();
        self.parse_error_at_current_token(code, &[&text]);
        let m = self.start_node();
        self.next_token();
        m.done(self, NodeKind::Error);
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Returns false, after reporting, once nesting reaches `maxRecursionDepth`.
    pub fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= self.options.max_recursion_depth {
            self.parse_error_at_current_token(diagnostic_codes::NESTING_TOO_DEEP, &[]);
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Finishing
    // =========================================================================

    /// Build the syntax tree from the recorded events.
    #[must_use]
    pub fn finish(mut self) -> SyntaxTree {
        debug_assert_eq!(
            self.builder.open_markers(),
            0,
            "every marker must be completed or dropped"
        );
        self.parse_diagnostics.append(&mut self.scanner_diagnostics);
        self.parse_diagnostics.sort_by_key(|diag| diag.start);
        let (arena, root) = self.builder.build();
        tracing::debug!(
            file = %self.file_name,
            nodes = arena.len(),
            tokens = self.tokens.len(),
            diagnostics = self.parse_diagnostics.len(),
            "built syntax tree"
        );
        SyntaxTree::new(
            self.file_name,
            self.source,
            self.tokens,
            arena,
            root,
            self.parse_diagnostics,
        )
    }
}

fn u32_from_usize(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
