//! Long and deeply nested inputs stay within the parser's limits.

use grove_common::diagnostics::diagnostic_codes;
use grove_parser::{NodeKind, ParserOptions, parse_source_text, parse_source_text_with_options};

/// `a` followed by `elements` path elements. The order never lets a call
/// or closure join the element before it.
fn chain(elements: usize) -> String {
    let mut source = String::from("a");
    for i in 0..elements {
        match i % 4 {
            0 => source.push_str(".b"),
            1 => source.push_str("[0]"),
            2 => source.push_str(" { }"),
            _ => source.push_str("()"),
        }
    }
    source
}

#[test]
fn test_long_chain_within_limit_parses_without_recursion() {
    let source = chain(900);
    let tree = parse_source_text("long.groovy", &source);
    assert!(
        tree.diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        tree.diagnostics()
    );
    let path = tree.expression().unwrap();
    assert_eq!(tree.kind(path), Some(NodeKind::PathExpression));
    assert_eq!(tree.leaf_tokens().len(), tree.tokens().len());
}

#[test]
fn test_chain_past_default_limit_reports() {
    let source = chain(1_200);
    let tree = parse_source_text("long.groovy", &source);
    let too_long: Vec<_> = tree
        .diagnostics()
        .iter()
        .filter(|d| d.code == diagnostic_codes::PATH_CHAIN_TOO_LONG)
        .collect();
    assert_eq!(too_long.len(), 1);
    assert_eq!(
        too_long[0].message,
        "Path expression exceeds the maximum chain length of 1000."
    );
    assert_eq!(tree.leaf_tokens().len(), tree.tokens().len());
}

#[test]
fn test_chain_limit_is_configurable() {
    let options = ParserOptions {
        max_path_chain_length: 10,
        ..ParserOptions::default()
    };
    let tree = parse_source_text_with_options("short.groovy", &chain(11), options.clone());
    assert!(
        tree.diagnostics()
            .iter()
            .any(|d| d.code == diagnostic_codes::PATH_CHAIN_TOO_LONG)
    );

    let tree = parse_source_text_with_options("short.groovy", &chain(10), options);
    assert!(tree.diagnostics().is_empty());
}

#[test]
fn test_deep_closures_report_nesting() {
    let options = ParserOptions {
        max_recursion_depth: 16,
        ..ParserOptions::default()
    };
    let depth = 40;
    let source = format!("{}{}", "a { ".repeat(depth), "} ".repeat(depth));
    let tree = parse_source_text_with_options("deep.groovy", &source, options);
    assert!(
        tree.diagnostics()
            .iter()
            .any(|d| d.code == diagnostic_codes::NESTING_TOO_DEEP)
    );
    assert_eq!(tree.leaf_tokens().len(), tree.tokens().len());
}

#[test]
fn test_json_for_chain_at_limit() {
    // Writing nested values still recurses inside serde_json.
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let source = chain(1_000);
            let tree = parse_source_text("limit.groovy", &source);
            assert!(tree.diagnostics().is_empty());

            let json = tree.to_json();
            assert_eq!(json["fileName"], "limit.groovy");
            assert_eq!(json["root"]["kind"], "SourceFile");
            assert_eq!(json["root"]["children"][0]["kind"], "PathExpression");
            assert_eq!(json["root"]["end"], source.len());

            let text = serde_json::to_string(&json).unwrap();
            assert_eq!(text.matches("\"kind\":\"PathExpression\"").count(), 1);
            assert_eq!(text.matches("\"token\":").count(), tree.tokens().len());
        })
        .unwrap();
    handle.join().unwrap();
}

fn options_with_chain(max_path_chain_length: u32) -> ParserOptions {
    ParserOptions {
        max_path_chain_length,
        ..ParserOptions::default()
    }
}

#[test]
fn test_zero_chain_length_acts_as_one() {
    let tree = parse_source_text_with_options("zero.groovy", "a.b", options_with_chain(0));
    assert!(tree.diagnostics().is_empty());

    let tree = parse_source_text_with_options("zero.groovy", "a.b.c", options_with_chain(0));
    let too_long: Vec<_> = tree
        .diagnostics()
        .iter()
        .filter(|d| d.code == diagnostic_codes::PATH_CHAIN_TOO_LONG)
        .collect();
    assert_eq!(too_long.len(), 1);
    assert_eq!(
        too_long[0].message,
        "Path expression exceeds the maximum chain length of 1."
    );
}

#[test]
fn test_unbounded_depth_is_capped() {
    // Same stack as a main thread; the capped depth must fit in it.
    let handle = std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(|| {
            let options = ParserOptions {
                max_recursion_depth: u32::MAX,
                ..ParserOptions::default()
            };
            let depth = 5_000;
            let source = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
            let tree = parse_source_text_with_options("deep.groovy", &source, options);
            assert!(
                tree.diagnostics()
                    .iter()
                    .any(|d| d.code == diagnostic_codes::NESTING_TOO_DEEP)
            );
            assert_eq!(tree.leaf_tokens().len(), tree.tokens().len());
        })
        .unwrap();
    handle.join().unwrap();
}
