use clap::Parser;
use std::path::Path;

use super::args::{CliArgs, EmitFormat};
use super::driver::{Input, collect_inputs, load_parser_options, render_output, run};

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["grove"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("test args should parse")
}

#[test]
fn collects_files_then_expression() {
    let inputs = collect_inputs(&args(&["-e", "x.y", "a.groovy", "b.groovy"]));
    assert_eq!(
        inputs,
        vec![
            Input::File("a.groovy".into()),
            Input::File("b.groovy".into()),
            Input::Expression("x.y".into()),
        ]
    );
}

#[test]
fn no_inputs_is_a_usage_error() {
    let err = run(&args(&[]), Path::new(".")).expect_err("should fail");
    assert!(format!("{err:#}").contains("no input files"));
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let err = run(&args(&["missing.groovy"]), temp.path()).expect_err("should fail");
    assert!(format!("{err:#}").contains("failed to read"));
}

#[test]
fn parses_files_relative_to_cwd() {
    let temp = tempfile::tempdir().expect("temp dir");
    std::fs::write(temp.path().join("ok.groovy"), "a.b()\nc[0] { it }\n").expect("write");
    std::fs::write(temp.path().join("bad.groovy"), "a.").expect("write");

    let outcome = run(&args(&["ok.groovy", "bad.groovy"]), temp.path()).expect("run");
    assert_eq!(outcome.trees.len(), 2);
    assert_eq!(outcome.trees[0].file_name(), "ok.groovy");
    assert!(outcome.trees[0].diagnostics().is_empty());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].file, "bad.groovy");
    assert!(outcome.has_errors());
}

#[test]
fn warnings_alone_are_not_errors() {
    let outcome =
        run(&args(&["--closureOnNextLine", "-e", "a\n{ }"]), Path::new(".")).expect("run");
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(!outcome.has_errors());
}

#[test]
fn block_on_next_line_is_its_own_statement_by_default() {
    let outcome = run(&args(&["-e", "x\n{ y }"]), Path::new(".")).expect("run");
    assert!(outcome.diagnostics.is_empty());
    let tree = &outcome.trees[0];
    assert_eq!(tree.child_nodes(tree.root()).count(), 2);
}

#[test]
fn zero_chain_length_fails_before_parsing() {
    let err = run(&args(&["--maxPathChainLength", "0", "-e", "a.b"]), Path::new("."))
        .expect_err("should fail");
    assert!(format!("{err:#}").contains("maxPathChainLength"));
}

#[test]
fn project_file_and_flags_shape_options() {
    let temp = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        temp.path().join("grove.json"),
        r#"{ "parserOptions": { "maxPathChainLength": 2, "maxRecursionDepth": 7 } }"#,
    )
    .expect("write");

    let options =
        load_parser_options(&args(&["-p", ".", "--maxRecursionDepth", "9"]), temp.path())
            .expect("options");
    assert_eq!(options.max_path_chain_length, 2);
    assert_eq!(options.max_recursion_depth, 9);
    assert!(!options.closure_on_next_line);

    let outcome = run(&args(&["-p", ".", "-e", "a.b.c.d"]), temp.path()).expect("run");
    assert!(outcome.has_errors(), "chain of 3 exceeds a limit of 2");
}

#[test]
fn renders_tree_dump_and_json() {
    let outcome = run(&args(&["-e", "a.b"]), Path::new(".")).expect("run");

    let tree = render_output(&outcome.trees, EmitFormat::Tree, false)
        .expect("render")
        .expect("tree output");
    assert!(tree.starts_with("SourceFile\n  PathExpression\n"));

    let json = render_output(&outcome.trees, EmitFormat::Json, false)
        .expect("render")
        .expect("json output");
    let value: serde_json::Value = serde_json::from_str(json.trim()).expect("valid json");
    assert_eq!(value["fileName"], "<expression>");
    assert_eq!(value["root"]["children"][0]["kind"], "PathExpression");

    assert!(render_output(&outcome.trees, EmitFormat::None, false)
        .expect("render")
        .is_none());
}

#[test]
fn multiple_tree_dumps_get_headers() {
    let temp = tempfile::tempdir().expect("temp dir");
    std::fs::write(temp.path().join("one.groovy"), "a").expect("write");

    let outcome = run(&args(&["one.groovy", "-e", "b"]), temp.path()).expect("run");
    let output = render_output(&outcome.trees, EmitFormat::Tree, false)
        .expect("render")
        .expect("tree output");
    assert!(output.contains("== one.groovy ==\n"));
    assert!(output.contains("== <expression> ==\n"));
}
