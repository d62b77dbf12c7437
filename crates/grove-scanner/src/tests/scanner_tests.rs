use crate::{ScannerState, SyntaxKind};
use grove_common::diagnostics::diagnostic_codes;

fn kinds(source: &str) -> Vec<SyntaxKind> {
    ScannerState::new(source)
        .scan_all()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn scans_dot_family() {
    assert_eq!(
        kinds("a.b*.c?.d.&e"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::SpreadDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::OptionalDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::MemberPointerToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn collapses_blank_lines_and_comments_into_one_newline() {
    let source = "a\n\n  // comment\n\t\n.b";
    let tokens = ScannerState::new(source).scan_all();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::Newline,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
        ]
    );
    assert_eq!(tokens[1].start, 1);
    assert_eq!(tokens[1].end, 18);
}

#[test]
fn empty_map_lookahead_sees_newline_as_single_token() {
    assert_eq!(
        kinds("[\n\n:]"),
        vec![
            SyntaxKind::OpenBracketToken,
            SyntaxKind::Newline,
            SyntaxKind::ColonToken,
            SyntaxKind::CloseBracketToken,
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("class in foo int $x"),
        vec![
            SyntaxKind::ClassKeyword,
            SyntaxKind::InKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::IntKeyword,
            SyntaxKind::Identifier,
        ]
    );
    assert!(SyntaxKind::ClassKeyword.is_keyword());
    assert!(!SyntaxKind::Identifier.is_keyword());
}

#[test]
fn numbers() {
    assert_eq!(
        kinds("1 1.5 2e10 3L 0xFF 4d 1.b"),
        vec![
            SyntaxKind::IntegerLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::IntegerLiteral,
            SyntaxKind::IntegerLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::IntegerLiteral,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn plain_strings() {
    assert_eq!(
        kinds(r#"'a' "b" '''c''' "$ 1""#),
        vec![
            SyntaxKind::StringLiteral,
            SyntaxKind::GStringLiteral,
            SyntaxKind::StringLiteral,
            SyntaxKind::GStringLiteral,
        ]
    );
}

#[test]
fn interpolated_string_with_identifier_injection() {
    let source = r#""hello $name!""#;
    let tokens = ScannerState::new(source).scan_all();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::GStringBegin,
            SyntaxKind::Identifier,
            SyntaxKind::GStringEnd,
        ]
    );
    assert_eq!(tokens[0].text(source), "\"hello $");
    assert_eq!(tokens[1].text(source), "name");
    assert_eq!(tokens[2].text(source), "!\"");
}

#[test]
fn interpolated_string_with_nested_braces() {
    assert_eq!(
        kinds(r#""a${ m { 1 } }b$c""#),
        vec![
            SyntaxKind::GStringBegin,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::IntegerLiteral,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::GStringContent,
            SyntaxKind::Identifier,
            SyntaxKind::GStringEnd,
        ]
    );
}

#[test]
fn unterminated_string_reports_and_still_yields_token() {
    let mut scanner = ScannerState::new("'abc\nx");
    let tokens = scanner.scan_all();
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!(tokens[1].kind, SyntaxKind::Newline);
    let codes: Vec<u32> = scanner
        .get_scanner_diagnostics()
        .iter()
        .map(|d| d.code)
        .collect();
    assert_eq!(codes, vec![diagnostic_codes::UNTERMINATED_STRING_LITERAL]);
}

#[test]
fn invalid_character_becomes_unknown_token() {
    let mut scanner = ScannerState::new("a # b");
    let tokens = scanner.scan_all();
    assert_eq!(tokens[1].kind, SyntaxKind::Unknown);
    assert_eq!(
        scanner.get_scanner_diagnostics()[0].code,
        diagnostic_codes::INVALID_CHARACTER
    );
}

#[test]
fn closure_tokens() {
    assert_eq!(
        kinds("{ a, b -> }"),
        vec![
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::CommaToken,
            SyntaxKind::Identifier,
            SyntaxKind::ArrowToken,
            SyntaxKind::CloseBraceToken,
        ]
    );
}
