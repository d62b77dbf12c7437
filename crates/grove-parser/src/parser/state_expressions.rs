//! Parser state - primary expressions, argument lists and interpolated strings

use grove_common::diagnostics::diagnostic_codes;
use grove_scanner::SyntaxKind;
use grove_scanner::token_set::{KEYWORDS, STRING_LITERALS};

use super::node::NodeKind;
use super::state::{ParseResult, ParserState};

impl ParserState {
    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parse one expression. Operator precedence is out of scope, so an
    /// expression is exactly one path expression.
    pub fn parse_expression(&mut self) -> ParseResult {
        if !self.enter_recursion() {
            return self.skip_nested_expression();
        }
        let result = self.parse_path_expression();
        self.exit_recursion();
        result
    }

    /// Past the nesting limit: swallow the current token, or the whole
    /// bracketed group it opens, into one `Error` node.
    fn skip_nested_expression(&mut self) -> ParseResult {
        let m = self.start_node();
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.next_token();
            if depth == 0 {
                break;
            }
        }
        m.done(self, NodeKind::Error);
        ParseResult::Success(NodeKind::Error)
    }

    /// Identifiers, literals, strings, parenthesized expressions, list and
    /// map literals, and closures. Consumes nothing when it returns `Malformed`.
    pub fn parse_primary_expression(&mut self) -> ParseResult {
        match self.token() {
            SyntaxKind::Identifier | SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword => {
                self.parse_token_node(NodeKind::ReferenceExpression)
            }
            SyntaxKind::IntegerLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::GStringLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => self.parse_token_node(NodeKind::Literal),
            SyntaxKind::GStringBegin => self.parse_string_constructor(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_list_or_map_literal(),
            SyntaxKind::OpenBraceToken => self.parse_closable_block(),
            _ => ParseResult::Malformed,
        }
    }

    fn parse_token_node(&mut self, kind: NodeKind) -> ParseResult {
        let m = self.start_node();
        self.next_token();
        m.done(self, kind);
        ParseResult::Success(kind)
    }

    fn parse_parenthesized_expression(&mut self) -> ParseResult {
        let m = self.start_node();
        let open_token = Some(self.pos);
        self.next_token();
        self.parse_optional(SyntaxKind::Newline);
        if self.parse_expression().is_malformed() {
            self.error(diagnostic_codes::EXPRESSION_EXPECTED);
        }
        self.parse_optional(SyntaxKind::Newline);
        self.parse_expected_closing(
            SyntaxKind::CloseParenToken,
            diagnostic_codes::CLOSE_PAREN_EXPECTED,
            open_token,
        );
        m.done(self, NodeKind::ParenthesizedExpression);
        ParseResult::Success(NodeKind::ParenthesizedExpression)
    }

    /// `[]`, `[:]`, `[\n:]`, `[a, b]` and `[k: v]`.
    fn parse_list_or_map_literal(&mut self) -> ParseResult {
        let m = self.start_node();
        let open_token = Some(self.pos);
        self.next_token();
        self.parse_optional(SyntaxKind::Newline);
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_optional(SyntaxKind::Newline);
            self.parse_expected_closing(
                SyntaxKind::CloseBracketToken,
                diagnostic_codes::CLOSE_BRACKET_EXPECTED,
                open_token,
            );
        } else if !self.parse_optional(SyntaxKind::CloseBracketToken) {
            self.parse_argument_list(SyntaxKind::CloseBracketToken);
            self.parse_optional(SyntaxKind::Newline);
            self.parse_expected_closing(
                SyntaxKind::CloseBracketToken,
                diagnostic_codes::CLOSE_BRACKET_EXPECTED,
                open_token,
            );
        }
        m.done(self, NodeKind::ListOrMapLiteral);
        ParseResult::Success(NodeKind::ListOrMapLiteral)
    }

    // =========================================================================
    // Argument lists
    // =========================================================================

    /// Comma-separated arguments up to, not including, `terminator`.
    pub fn parse_argument_list(&mut self, terminator: SyntaxKind) {
        loop {
            self.parse_optional(SyntaxKind::Newline);
            if self.is_token(terminator) || self.is_token(SyntaxKind::EndOfFileToken) {
                break;
            }

            let start = self.pos;
            self.parse_argument();
            if self.pos == start {
                if self.is_argument_list_terminator() {
                    // Belongs to an enclosing construct.
                    self.error(diagnostic_codes::EXPRESSION_EXPECTED);
                    break;
                }
                self.error_and_skip(diagnostic_codes::EXPRESSION_EXPECTED);
            }

            self.parse_optional(SyntaxKind::Newline);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
    }

    fn is_argument_list_terminator(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::SemicolonToken
        )
    }

    fn parse_argument(&mut self) {
        if !self.is_named_argument_start() {
            self.parse_expression();
            return;
        }
        let m = self.start_node();
        self.next_token();
        self.next_token();
        self.parse_optional(SyntaxKind::Newline);
        if self.parse_expression().is_malformed() {
            self.error(diagnostic_codes::EXPRESSION_EXPECTED);
        }
        m.done(self, NodeKind::NamedArgument);
    }

    /// `name:` where the name is an identifier, a string or a keyword.
    fn is_named_argument_start(&self) -> bool {
        let name = self.token();
        (name == SyntaxKind::Identifier || STRING_LITERALS.contains(name) || KEYWORDS.contains(name))
            && self.nth(1) == SyntaxKind::ColonToken
    }

    // =========================================================================
    // Interpolated strings
    // =========================================================================

    /// `"text$name text${expr}text"`
    pub fn parse_string_constructor(&mut self) -> ParseResult {
        let m = self.start_node();
        self.next_token();

        loop {
            match self.token() {
                SyntaxKind::Identifier => {
                    self.parse_token_node(NodeKind::ReferenceExpression);
                }
                SyntaxKind::OpenBraceToken => self.parse_string_injection(),
                _ => {
                    self.error(diagnostic_codes::EXPRESSION_EXPECTED);
                    break;
                }
            }
            match self.token() {
                SyntaxKind::GStringContent => self.next_token(),
                SyntaxKind::GStringEnd => {
                    self.next_token();
                    break;
                }
                // The injection already reported its missing `}`.
                _ => break,
            }
        }

        m.done(self, NodeKind::StringConstructor);
        ParseResult::Success(NodeKind::StringConstructor)
    }

    /// `${ expr? }`
    fn parse_string_injection(&mut self) {
        let m = self.start_node();
        let open_token = Some(self.pos);
        self.next_token();
        self.parse_optional(SyntaxKind::Newline);
        if !self.is_token(SyntaxKind::CloseBraceToken) && self.parse_expression().is_malformed() {
            self.error(diagnostic_codes::EXPRESSION_EXPECTED);
        }
        self.parse_optional(SyntaxKind::Newline);
        self.parse_expected_closing(
            SyntaxKind::CloseBraceToken,
            diagnostic_codes::CLOSE_BRACE_EXPECTED,
            open_token,
        );
        m.done(self, NodeKind::StringInjection);
    }
}
