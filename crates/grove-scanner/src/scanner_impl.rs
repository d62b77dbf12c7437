//! Scanner state machine.
//!
//! Produces a flat vector of significant tokens. Whitespace and comments are
//! trivia and never become tokens; consecutive line breaks collapse into a
//! single `Newline` token because the grammar treats them as one separator.

use grove_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use serde::Serialize;

use crate::SyntaxKind;

/// A scanned token. Offsets are byte offsets into the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: SyntaxKind,
    pub start: u32,
    pub end: u32,
}

impl Token {
    #[must_use]
    pub const fn new(kind: SyntaxKind, start: u32, end: u32) -> Self {
        Self { kind, start, end }
    }

    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Source text covered by this token.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or_default()
    }
}

/// A lexical error found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanMode {
    Code,
    /// Resume the body of a double-quoted string after an injection.
    StringBody { triple: bool },
    /// An identifier injected with `$name`; the string body follows it.
    InjectedIdentifier { triple: bool },
}

#[derive(Clone, Copy, Debug)]
struct Injection {
    brace_depth: u32,
    triple: bool,
}

pub struct ScannerState {
    text: String,
    pos: usize,
    mode: ScanMode,
    injections: Vec<Injection>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
            mode: ScanMode::Code,
            injections: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    #[must_use]
    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    /// Scan the remaining text. The end-of-file token is not included.
    pub fn scan_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.text.len() / 3);
        loop {
            let token = self.scan();
            if token.kind == SyntaxKind::EndOfFileToken {
                break;
            }
            tokens.push(token);
        }
        tracing::trace!(
            tokens = tokens.len(),
            diagnostics = self.diagnostics.len(),
            "scan_all"
        );
        tokens
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> Token {
        match self.mode {
            ScanMode::StringBody { triple } => {
                let start = self.pos;
                return self.scan_string_body(start, false, triple);
            }
            ScanMode::InjectedIdentifier { triple } => {
                self.mode = ScanMode::StringBody { triple };
                let start = self.pos;
                self.eat_identifier_chars(false);
                return self.token(SyntaxKind::Identifier, start);
            }
            ScanMode::Code => {}
        }

        self.skip_trivia();
        let start = self.pos;
        let Some(ch) = self.current() else {
            return self.token(SyntaxKind::EndOfFileToken, start);
        };

        match ch {
            '\n' | '\r' => self.scan_newlines(start),
            '\'' => self.scan_single_quoted(start),
            '"' => self.scan_double_quoted(start),
            '0'..='9' => self.scan_number(start),
            c if is_identifier_start(c) => {
                self.eat_identifier_chars(true);
                let kind = self.text.get(start..self.pos).and_then(SyntaxKind::from_keyword);
                self.token(kind.unwrap_or(SyntaxKind::Identifier), start)
            }
            _ => self.scan_punctuation(start, ch),
        }
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    fn current(&self) -> Option<char> {
        self.text.get(self.pos..)?.chars().next()
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.text.get(self.pos..)?.chars().nth(n)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current() {
            self.pos += ch.len_utf8();
        }
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.text
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(prefix))
    }

    fn token(&self, kind: SyntaxKind, start: usize) -> Token {
        Token::new(kind, offset(start), offset(self.pos))
    }

    fn error(&mut self, start: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos: start,
            length: self.pos.saturating_sub(start),
            message,
            code,
        });
    }

    // =========================================================================
    // Trivia and separators
    // =========================================================================

    fn skip_trivia(&mut self) {
        loop {
            match self.current() {
                Some(' ' | '\t' | '\u{c}') => self.advance(),
                Some('\\') if matches!(self.peek(1), Some('\n')) => self.advance_by(2),
                Some('/') if self.peek(1) == Some('/') => {
                    while let Some(ch) = self.current() {
                        if ch == '\n' || ch == '\r' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek(1) == Some('*') => {
                    self.advance_by(2);
                    while self.current().is_some() && !self.starts_with("*/") {
                        self.advance();
                    }
                    self.advance_by(2);
                }
                _ => break,
            }
        }
    }

    /// One `Newline` token covering every line break up to the next significant character.
    fn scan_newlines(&mut self, start: usize) -> Token {
        let mut end = start;
        loop {
            match self.current() {
                Some('\n' | '\r') => {
                    self.advance();
                    end = self.pos;
                }
                _ => {
                    let before = self.pos;
                    self.skip_trivia();
                    if self.pos == before || !matches!(self.current(), Some('\n' | '\r')) {
                        break;
                    }
                }
            }
        }
        Token::new(SyntaxKind::Newline, offset(start), offset(end))
    }

    // =========================================================================
    // Literals
    // =========================================================================

    fn eat_identifier_chars(&mut self, allow_dollar: bool) {
        while let Some(ch) = self.current() {
            if ch.is_alphanumeric() || ch == '_' || (allow_dollar && ch == '$') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_number(&mut self, start: usize) -> Token {
        if self.starts_with("0x") || self.starts_with("0X") {
            self.advance_by(2);
            while self
                .current()
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '_')
            {
                self.advance();
            }
            self.eat_integer_suffix();
            return self.token(SyntaxKind::IntegerLiteral, start);
        }

        self.eat_digits();
        let mut kind = SyntaxKind::IntegerLiteral;
        if self.current() == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.eat_digits();
            kind = SyntaxKind::FloatLiteral;
        }
        if matches!(self.current(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek(1), Some('+' | '-')));
            if self.peek(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.advance_by(1 + sign);
                self.eat_digits();
                kind = SyntaxKind::FloatLiteral;
            }
        }
        match self.current() {
            Some('d' | 'D' | 'f' | 'F') => {
                self.advance();
                kind = SyntaxKind::FloatLiteral;
            }
            _ if kind == SyntaxKind::IntegerLiteral => self.eat_integer_suffix(),
            _ => {
                if matches!(self.current(), Some('g' | 'G')) {
                    self.advance();
                }
            }
        }
        self.token(kind, start)
    }

    fn eat_digits(&mut self) {
        while self.current().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.advance();
        }
    }

    fn eat_integer_suffix(&mut self) {
        if matches!(self.current(), Some('l' | 'L' | 'g' | 'G' | 'i' | 'I')) {
            self.advance();
        }
    }

    fn scan_single_quoted(&mut self, start: usize) -> Token {
        let triple = self.starts_with("'''");
        self.advance_by(if triple { 3 } else { 1 });
        loop {
            match self.current() {
                None => break self.unterminated(start, SyntaxKind::StringLiteral),
                Some('\n' | '\r') if !triple => {
                    break self.unterminated(start, SyntaxKind::StringLiteral);
                }
                Some('\\') => self.advance_by(2),
                Some('\'') if triple => {
                    if self.starts_with("'''") {
                        self.advance_by(3);
                        break self.token(SyntaxKind::StringLiteral, start);
                    }
                    self.advance();
                }
                Some('\'') => {
                    self.advance();
                    break self.token(SyntaxKind::StringLiteral, start);
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn scan_double_quoted(&mut self, start: usize) -> Token {
        let triple = self.starts_with("\"\"\"");
        self.advance_by(if triple { 3 } else { 1 });
        self.scan_string_body(start, true, triple)
    }

    /// Scan string text up to the closing quote or the next injection.
    ///
    /// `is_begin` is true when `start` is the opening quote: a string with no
    /// injection is a plain `GStringLiteral`, otherwise the first piece is a
    /// `GStringBegin`.
    fn scan_string_body(&mut self, start: usize, is_begin: bool, triple: bool) -> Token {
        self.mode = ScanMode::Code;
        let (closed_kind, open_kind) = if is_begin {
            (SyntaxKind::GStringLiteral, SyntaxKind::GStringBegin)
        } else {
            (SyntaxKind::GStringEnd, SyntaxKind::GStringContent)
        };

        loop {
            match self.current() {
                None => break self.unterminated(start, closed_kind),
                Some('\n' | '\r') if !triple => break self.unterminated(start, closed_kind),
                Some('\\') => self.advance_by(2),
                Some('"') if triple => {
                    if self.starts_with("\"\"\"") {
                        self.advance_by(3);
                        break self.token(closed_kind, start);
                    }
                    self.advance();
                }
                Some('"') => {
                    self.advance();
                    break self.token(closed_kind, start);
                }
                Some('$') => match self.peek(1) {
                    Some('{') => {
                        self.advance();
                        self.injections.push(Injection {
                            brace_depth: 0,
                            triple,
                        });
                        break self.token(open_kind, start);
                    }
                    Some(c) if c.is_alphabetic() || c == '_' => {
                        self.advance();
                        self.mode = ScanMode::InjectedIdentifier { triple };
                        break self.token(open_kind, start);
                    }
                    _ => self.advance(),
                },
                Some(_) => self.advance(),
            }
        }
    }

    fn unterminated(&mut self, start: usize, kind: SyntaxKind) -> Token {
        self.error(
            start,
            diagnostic_messages::UNTERMINATED_STRING_LITERAL,
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
        self.token(kind, start)
    }

    // =========================================================================
    // Punctuation
    // =========================================================================

    fn scan_punctuation(&mut self, start: usize, ch: char) -> Token {
        let (kind, width) = match (ch, self.peek(1)) {
            ('.', Some('&')) => (SyntaxKind::MemberPointerToken, 2),
            ('.', _) => (SyntaxKind::DotToken, 1),
            ('*', Some('.')) => (SyntaxKind::SpreadDotToken, 2),
            ('*', _) => (SyntaxKind::AsteriskToken, 1),
            ('?', Some('.')) => (SyntaxKind::OptionalDotToken, 2),
            ('?', _) => (SyntaxKind::QuestionToken, 1),
            ('-', Some('>')) => (SyntaxKind::ArrowToken, 2),
            ('-', _) => (SyntaxKind::MinusToken, 1),
            ('(', _) => (SyntaxKind::OpenParenToken, 1),
            (')', _) => (SyntaxKind::CloseParenToken, 1),
            ('[', _) => (SyntaxKind::OpenBracketToken, 1),
            (']', _) => (SyntaxKind::CloseBracketToken, 1),
            ('{', _) => (SyntaxKind::OpenBraceToken, 1),
            ('}', _) => (SyntaxKind::CloseBraceToken, 1),
            ('@', _) => (SyntaxKind::AtToken, 1),
            (',', _) => (SyntaxKind::CommaToken, 1),
            (':', _) => (SyntaxKind::ColonToken, 1),
            (';', _) => (SyntaxKind::SemicolonToken, 1),
            ('=', _) => (SyntaxKind::EqualsToken, 1),
            ('+', _) => (SyntaxKind::PlusToken, 1),
            ('/', _) => (SyntaxKind::SlashToken, 1),
            ('%', _) => (SyntaxKind::PercentToken, 1),
            ('!', _) => (SyntaxKind::ExclamationToken, 1),
            ('<', _) => (SyntaxKind::LessThanToken, 1),
            ('>', _) => (SyntaxKind::GreaterThanToken, 1),
            ('&', _) => (SyntaxKind::AmpersandToken, 1),
            ('|', _) => (SyntaxKind::BarToken, 1),
            _ => (SyntaxKind::Unknown, 1),
        };
        self.advance_by(width);

        match kind {
            SyntaxKind::OpenBraceToken => {
                if let Some(injection) = self.injections.last_mut() {
                    injection.brace_depth += 1;
                }
            }
            SyntaxKind::CloseBraceToken => {
                if let Some(injection) = self.injections.last_mut() {
                    injection.brace_depth = injection.brace_depth.saturating_sub(1);
                    if injection.brace_depth == 0 {
                        let triple = injection.triple;
                        self.injections.pop();
                        self.mode = ScanMode::StringBody { triple };
                    }
                }
            }
            SyntaxKind::Unknown => {
                self.error(
                    start,
                    diagnostic_messages::INVALID_CHARACTER,
                    diagnostic_codes::INVALID_CHARACTER,
                );
            }
            _ => {}
        }
        self.token(kind, start)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}
