//! Parser state - path expressions
//!
//! A path expression is a primary followed by a chain of postfix elements:
//!
//! ```groovy
//! a.b().c[i] { it }
//! ```
//!
//! Each element wraps everything parsed before it, so the tree nests to the
//! left: `(((a.b).c()).d[i])`. The chain is driven by a loop over
//! [`ChainStep`]s instead of recursion, so its length does not grow the stack.

use grove_common::diagnostics::diagnostic_codes;
use grove_scanner::token_set::{KEYWORD_PROPERTY_NAMES, STRING_LITERALS};
use grove_scanner::{SyntaxKind, TokenSet};

use super::builder::{CompletedMarker, Marker};
use super::node::NodeKind;
use super::state::{ParseResult, ParserState};

/// Operators that select a property: `*.`, `?.`, `.&` and `.`.
pub(crate) const DOTS: TokenSet = TokenSet::new(&[
    SyntaxKind::SpreadDotToken,
    SyntaxKind::OptionalDotToken,
    SyntaxKind::MemberPointerToken,
    SyntaxKind::DotToken,
]);

const PATH_ELEMENT_START: TokenSet = DOTS.union(TokenSet::new(&[
    SyntaxKind::OpenBracketToken,
    SyntaxKind::OpenParenToken,
    SyntaxKind::OpenBraceToken,
]));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PathElement {
    PropertyReference,
    MethodCall,
    ClosureAppend,
    IndexProperty,
}

/// What one pass of the chain loop did with its marker.
enum ChainStep {
    /// The element was closed; a further element wraps it.
    Closed(CompletedMarker),
    /// A call or closure follows directly and joins the same element.
    Extend(Marker),
    /// The element was malformed and its marker dropped.
    Abort,
}

impl ParserState {
    /// Parse a primary expression and any path elements chained onto it.
    ///
    /// A primary with no chain is returned as-is. Otherwise the result is a
    /// `PathExpression` whose single child is the outermost element.
    pub fn parse_path_expression(&mut self) -> ParseResult {
        let path = self.start_node();
        let marker = self.start_node();

        let primary = self.parse_primary_expression();
        if primary.is_malformed() {
            marker.drop(self);
            path.drop(self);
            return ParseResult::Malformed;
        }
        if !self.is_path_element_start() {
            marker.drop(self);
            path.drop(self);
            return primary;
        }

        let element = marker.precede(self);
        marker.drop(self);

        let start = self.pos;
        self.parse_path_elements(element);
        if self.pos == start {
            // `a[:]` and `a\n{` pass the start test but no element accepts them.
            path.drop(self);
            return primary;
        }

        path.done(self, NodeKind::PathExpression);
        ParseResult::Success(NodeKind::PathExpression)
    }

    /// True if the upcoming tokens can begin a path element.
    ///
    /// `NLS {` passes, but unless `closureOnNextLine` is set no element
    /// accepts it and the block is left to the statement grammar.
    #[must_use]
    pub fn is_path_element_start(&self) -> bool {
        self.at_set(PATH_ELEMENT_START)
            || self.look_ahead(&[SyntaxKind::Newline, SyntaxKind::DotToken])
            || self.look_ahead(&[SyntaxKind::Newline, SyntaxKind::OpenBraceToken])
    }

    /// First match wins. The bracket exclusions keep `[:]` and `[\n:]` for map literals.
    pub(crate) fn classify_path_element(&self) -> Option<PathElement> {
        if self.at_set(DOTS) || self.look_ahead(&[SyntaxKind::Newline, SyntaxKind::DotToken]) {
            return Some(PathElement::PropertyReference);
        }
        if self.is_token(SyntaxKind::OpenParenToken) {
            return Some(PathElement::MethodCall);
        }
        if self.is_token(SyntaxKind::OpenBraceToken)
            || (self.options.closure_on_next_line
                && self.look_ahead(&[SyntaxKind::Newline, SyntaxKind::OpenBraceToken]))
        {
            return Some(PathElement::ClosureAppend);
        }
        if self.is_token(SyntaxKind::OpenBracketToken)
            && !self.look_ahead(&[SyntaxKind::OpenBracketToken, SyntaxKind::ColonToken])
            && !self.look_ahead(&[
                SyntaxKind::OpenBracketToken,
                SyntaxKind::Newline,
                SyntaxKind::ColonToken,
            ])
        {
            return Some(PathElement::IndexProperty);
        }
        None
    }

    /// `marker` wraps everything parsed so far. Returns the number of elements built.
    fn parse_path_elements(&mut self, mut marker: Marker) -> u32 {
        let max_length = self.options.max_path_chain_length;
        let mut length = 0u32;

        loop {
            let Some(element) = self.classify_path_element() else {
                marker.drop(self);
                break;
            };
            tracing::trace!(?element, pos = self.token_pos(), "path element");

            let step = match element {
                PathElement::PropertyReference => self.parse_property_reference(marker),
                PathElement::MethodCall => self.parse_method_call(marker),
                PathElement::ClosureAppend => ChainStep::Closed(self.parse_closure_append(marker)),
                PathElement::IndexProperty => ChainStep::Closed(self.parse_index_property(marker)),
            };

            match step {
                ChainStep::Extend(same) => marker = same,
                ChainStep::Abort => break,
                ChainStep::Closed(done) => {
                    length += 1;
                    if self.classify_path_element().is_none() {
                        break;
                    }
                    if length >= max_length {
                        self.parse_error_at_current_token(
                            diagnostic_codes::PATH_CHAIN_TOO_LONG,
                            &[&max_length.to_string()],
                        );
                        break;
                    }
                    marker = done.precede(self);
                }
            }
        }

        tracing::trace!(length, "path chain end");
        length
    }

    /// `NLS? dot NLS? name`
    fn parse_property_reference(&mut self, marker: Marker) -> ChainStep {
        self.parse_optional(SyntaxKind::Newline);
        self.parse_optional_set(DOTS);
        self.parse_optional(SyntaxKind::Newline);

        if !self.parse_name_part() {
            self.error(diagnostic_codes::PROPERTY_SELECTOR_EXPECTED);
            marker.drop(self);
            return ChainStep::Abort;
        }

        // `a.b()` and `a.b { }` are calls on the property, not a property followed by a call.
        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::OpenBraceToken) {
            return ChainStep::Extend(marker);
        }
        ChainStep::Closed(marker.done(self, NodeKind::PathPropertyReference))
    }

    fn parse_method_call(&mut self, marker: Marker) -> ChainStep {
        self.parse_call_arguments();
        if self.is_token(SyntaxKind::OpenBraceToken) {
            return ChainStep::Extend(marker);
        }
        ChainStep::Closed(marker.done(self, NodeKind::PathMethodCall))
    }

    /// A trailing closure is a block argument: the element is a method call.
    fn parse_closure_append(&mut self, marker: Marker) -> CompletedMarker {
        if self.parse_optional(SyntaxKind::Newline) {
            self.parse_error_at_current_token(diagnostic_codes::AMBIGUOUS_CODE_BLOCK, &[]);
        }
        self.parse_closable_block();
        marker.done(self, NodeKind::PathMethodCall)
    }

    fn parse_index_property(&mut self, marker: Marker) -> CompletedMarker {
        self.parse_index_arguments();
        marker.done(self, NodeKind::PathIndexProperty)
    }

    /// The name after a dot. Consumes nothing when it returns false.
    pub(crate) fn parse_name_part(&mut self) -> bool {
        if self.look_ahead(&[SyntaxKind::AtToken, SyntaxKind::Identifier]) {
            let m = self.start_node();
            self.next_token();
            self.next_token();
            m.done(self, NodeKind::PathProperty);
            return true;
        }
        if self.is_token(SyntaxKind::Identifier)
            || self.at_set(STRING_LITERALS)
            || self.at_set(KEYWORD_PROPERTY_NAMES)
        {
            let m = self.start_node();
            self.next_token();
            m.done(self, NodeKind::PathProperty);
            return true;
        }
        if self.is_token(SyntaxKind::GStringBegin) {
            self.parse_string_constructor();
            return true;
        }
        false
    }

    /// `( args? )`
    pub(crate) fn parse_call_arguments(&mut self) {
        self.parse_delimited_arguments(
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            diagnostic_codes::OPEN_PAREN_EXPECTED,
            diagnostic_codes::CLOSE_PAREN_EXPECTED,
        );
    }

    /// `[ args? ]`
    pub(crate) fn parse_index_arguments(&mut self) {
        self.parse_delimited_arguments(
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            diagnostic_codes::OPEN_BRACKET_EXPECTED,
            diagnostic_codes::CLOSE_BRACKET_EXPECTED,
        );
    }

    /// A missing opening delimiter is reported and parsing carries on as if it were there.
    fn parse_delimited_arguments(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
        open_code: u32,
        close_code: u32,
    ) {
        let open_token = self.token_index_if(open);
        self.parse_expected(open, open_code);
        self.parse_optional(SyntaxKind::Newline);
        if self.parse_optional(close) {
            return;
        }
        self.parse_argument_list(close);
        self.parse_optional(SyntaxKind::Newline);
        self.parse_expected_closing(close, close_code, open_token);
    }
}
