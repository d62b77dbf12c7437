//! Parser state - source files, statement lists and closures

use grove_common::diagnostics::diagnostic_codes;
use grove_scanner::SyntaxKind;
use grove_scanner::token_set::BUILTIN_TYPES;

use super::node::NodeKind;
use super::state::{ParseResult, ParserState};
use super::tree::SyntaxTree;

/// How far ahead of `{` to look for the `->` of a closure parameter list.
const MAX_PARAMETER_LOOKAHEAD: usize = 64;

impl ParserState {
    // =========================================================================
    // Entry points
    // =========================================================================

    /// Parse a source file: statements separated by newlines or semicolons.
    #[must_use]
    pub fn parse_source_file(mut self) -> SyntaxTree {
        tracing::debug!(file = %self.file_name, tokens = self.tokens.len(), "parse_source_file");
        let root = self.start_node();
        self.parse_statement_list(SyntaxKind::EndOfFileToken);
        root.done(&mut self, NodeKind::SourceFile);
        self.finish()
    }

    /// Parse text holding exactly one expression.
    ///
    /// Tokens after the expression are wrapped in a single `Error` node.
    #[must_use]
    pub fn parse_single_expression(mut self) -> SyntaxTree {
        tracing::debug!(file = %self.file_name, tokens = self.tokens.len(), "parse_single_expression");
        let root = self.start_node();
        self.parse_optional(SyntaxKind::Newline);
        if self.parse_expression().is_malformed() {
            self.error(diagnostic_codes::EXPRESSION_EXPECTED);
        }
        self.parse_optional(SyntaxKind::Newline);
        if !self.is_token(SyntaxKind::EndOfFileToken) {
            let text = self
                .tokens
                .get(self.pos)
                .map_or("", |token| token.text(&self.source))
                .to_string();
            self.parse_error_at_current_token(diagnostic_codes::UNEXPECTED_TOKEN, &[&text]);
            let rest = self.start_node();
            while !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
            rest.done(&mut self, NodeKind::Error);
        }
        root.done(&mut self, NodeKind::SourceFile);
        self.finish()
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Statements up to, not including, `terminator`.
    pub(crate) fn parse_statement_list(&mut self, terminator: SyntaxKind) {
        loop {
            match self.token() {
                SyntaxKind::Newline | SyntaxKind::SemicolonToken => self.next_token(),
                SyntaxKind::EndOfFileToken => break,
                kind if kind == terminator => break,
                _ => self.parse_statement(),
            }
        }
    }

    fn parse_statement(&mut self) {
        let start = self.pos;
        self.parse_expression();
        if self.pos == start {
            self.error_and_skip(diagnostic_codes::UNEXPECTED_TOKEN);
        }
    }

    // =========================================================================
    // Closures
    // =========================================================================

    /// `{ params? -> statements }`
    pub fn parse_closable_block(&mut self) -> ParseResult {
        let m = self.start_node();
        let open_token = self.token_index_if(SyntaxKind::OpenBraceToken);
        self.parse_expected(SyntaxKind::OpenBraceToken, diagnostic_codes::OPEN_BRACE_EXPECTED);
        self.parse_optional(SyntaxKind::Newline);
        if self.is_closure_parameter_list_start() {
            self.parse_closure_parameters();
        }
        self.parse_statement_list(SyntaxKind::CloseBraceToken);
        self.parse_expected_closing(
            SyntaxKind::CloseBraceToken,
            diagnostic_codes::CLOSE_BRACE_EXPECTED,
            open_token,
        );
        m.done(self, NodeKind::ClosableBlock);
        ParseResult::Success(NodeKind::ClosableBlock)
    }

    /// `a, b ->`, `int a ->`, `String s, def t ->` or a bare `->`.
    fn is_closure_parameter_list_start(&self) -> bool {
        for n in 0..MAX_PARAMETER_LOOKAHEAD {
            match self.nth(n) {
                SyntaxKind::ArrowToken => return true,
                SyntaxKind::Identifier
                | SyntaxKind::CommaToken
                | SyntaxKind::DotToken
                | SyntaxKind::DefKeyword
                | SyntaxKind::FinalKeyword => {}
                kind if BUILTIN_TYPES.contains(kind) => {}
                _ => return false,
            }
        }
        false
    }

    fn parse_closure_parameters(&mut self) {
        let list = self.start_node();
        while !self.is_token(SyntaxKind::ArrowToken) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let parameter = self.start_node();
            while !matches!(
                self.token(),
                SyntaxKind::CommaToken | SyntaxKind::ArrowToken | SyntaxKind::EndOfFileToken
            ) {
                self.next_token();
            }
            parameter.done(self, NodeKind::Parameter);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        // Lookahead already saw the arrow.
        self.parse_optional(SyntaxKind::ArrowToken);
        list.done(self, NodeKind::ParameterList);
        self.parse_optional(SyntaxKind::Newline);
    }
}
