use grove_common::Diagnostic;
use grove_parser::{
    ParserOptions, parse_expression_text, parse_source_text, parse_source_text_with_options,
};

use super::reporter::Reporter;

#[test]
fn formats_location_code_and_snippet() {
    let tree = parse_expression_text("a(1");
    let mut reporter = Reporter::new(false);
    reporter.add_source(tree.file_name(), tree.source_text());

    let output = reporter.render(&tree.to_diagnostics());
    assert_eq!(
        output,
        "<expression>:1:4 - error GRV1004: ')' expected.\n    1   a(1\n           ~\n  Related: <expression>:1:2 - The parser expected to find a ')' to match the '(' token here."
    );
}

#[test]
fn underlines_the_whole_span_on_later_lines() {
    let source = "a.b\nc )";
    let tree = parse_source_text("build.groovy", source);
    let mut reporter = Reporter::new(false);
    reporter.add_source("build.groovy", source);

    let output = reporter.render(&tree.to_diagnostics());
    assert_eq!(
        output,
        "build.groovy:2:3 - error GRV1001: Unexpected token ')'.\n    2   c )\n          ~"
    );
}

#[test]
fn warnings_use_warning_category() {
    let source = "a\n{ }";
    let options = ParserOptions {
        closure_on_next_line: true,
        ..ParserOptions::default()
    };
    let tree = parse_source_text_with_options("w.groovy", source, options);
    let mut reporter = Reporter::new(false);
    reporter.add_source("w.groovy", source);

    let output = reporter.render(&tree.to_diagnostics());
    assert!(
        output.starts_with("w.groovy:2:1 - warning GRV1012: "),
        "unexpected output: {output}"
    );
}

#[test]
fn unclosed_block_names_its_opening_brace() {
    let source = "a.b {\n  c";
    let tree = parse_source_text("open.groovy", source);
    let mut reporter = Reporter::new(false);
    reporter.add_source("open.groovy", source);

    let output = reporter.render(&tree.to_diagnostics());
    let related: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with("  Related:"))
        .collect();
    assert_eq!(
        related,
        vec![
            "  Related: open.groovy:1:5 - The parser expected to find a '}' to match the '{' token here."
        ]
    );
}

#[test]
fn multiple_diagnostics_are_separated_by_newlines() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("x.groovy", "ab");
    let diagnostics = vec![
        Diagnostic::error("x.groovy".into(), 0, 1, "first".into(), 1001),
        Diagnostic::error("x.groovy".into(), 1, 1, "second".into(), 1001),
    ];

    let output = reporter.render(&diagnostics);
    let headers: Vec<&str> = output.lines().filter(|line| line.starts_with("x.groovy")).collect();
    assert_eq!(
        headers,
        vec![
            "x.groovy:1:1 - error GRV1001: first",
            "x.groovy:1:2 - error GRV1001: second"
        ]
    );
}

#[test]
fn unknown_file_falls_back_to_name() {
    let mut reporter = Reporter::new(false);
    let diagnostic = Diagnostic::error(
        "/definitely/not/here.groovy".into(),
        0,
        1,
        "boom".into(),
        1001,
    );
    assert_eq!(
        reporter.format_diagnostic(&diagnostic),
        "/definitely/not/here.groovy - error GRV1001: boom"
    );
}

#[test]
fn empty_file_name_is_unknown() {
    let mut reporter = Reporter::new(false);
    let diagnostic = Diagnostic::error(String::new(), 0, 0, "boom".into(), 0);
    assert_eq!(reporter.format_diagnostic(&diagnostic), "<unknown> - error: boom");
}

#[test]
fn color_mode_adds_escape_codes() {
    colored::control::set_override(true);
    let mut reporter = Reporter::new(true);
    reporter.add_source("c.groovy", "a)");
    let diagnostic = Diagnostic::error("c.groovy".into(), 1, 1, "bad".into(), 1001);
    let output = reporter.format_diagnostic(&diagnostic);
    colored::control::unset_override();
    assert!(output.contains("\u{1b}["), "expected ANSI codes in {output:?}");
    assert!(output.contains("GRV1001"));
}
