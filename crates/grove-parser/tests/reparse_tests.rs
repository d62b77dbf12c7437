//! Re-parsing the text of a path node in isolation reproduces the same node.

use grove_parser::{NodeIndex, NodeKind, SyntaxTree, parse_expression_text, parse_source_text};

const SAMPLES: &[&str] = &[
    "a.b.c",
    "a().b",
    "a.b(1) { it }",
    "x[1][2].y?.z",
    "a*.b.&c",
    "f(a.b, k: g { x -> x.y })",
    "\"$a\".size().b",
    "[1, 2].collect { it }.sum()",
    "a\n.b\n.c()",
    "(a).b[0]",
    "this.@field.class",
    "a.'quoted'.\"${b.c}\"",
];

fn is_path_node(kind: NodeKind) -> bool {
    kind == NodeKind::PathExpression || kind.is_path_element()
}

/// The node that re-parsing `tree`'s text for `index` should reproduce.
fn reparsed_counterpart(kind: NodeKind, reparsed: &SyntaxTree) -> Option<NodeIndex> {
    let expr = reparsed.expression()?;
    if kind == NodeKind::PathExpression {
        return Some(expr);
    }
    // A lone element comes back wrapped in its own PathExpression.
    assert_eq!(reparsed.kind(expr), Some(NodeKind::PathExpression));
    reparsed.child_nodes(expr).next()
}

#[test]
fn test_path_nodes_reparse_to_identical_nodes() {
    for source in SAMPLES {
        let tree = parse_source_text("sample.groovy", source);
        assert!(tree.diagnostics().is_empty(), "sample {source:?} should parse cleanly");

        let mut checked = 0;
        for index in tree.descendants() {
            let kind = tree.kind(index).unwrap();
            if !is_path_node(kind) {
                continue;
            }
            let text = tree.text(index);
            let reparsed = parse_expression_text(text);
            assert!(
                reparsed.diagnostics().is_empty(),
                "re-parsing {text:?} from {source:?} reported {:?}",
                reparsed.diagnostics()
            );
            let counterpart = reparsed_counterpart(kind, &reparsed)
                .unwrap_or_else(|| panic!("no expression when re-parsing {text:?}"));
            assert_eq!(
                reparsed.dump_node(counterpart),
                tree.dump_node(index),
                "re-parsing {text:?} from {source:?} changed the tree"
            );
            checked += 1;
        }
        assert!(checked > 0, "sample {source:?} has no path nodes");
    }
}

#[test]
fn test_whole_file_reparses_statement_by_statement() {
    let source = "a.b()\nc[1] { it }\n\"$d\".e";
    let tree = parse_source_text("sample.groovy", source);
    let statements: Vec<NodeIndex> = tree.child_nodes(tree.root()).collect();
    assert_eq!(statements.len(), 3);
    for statement in statements {
        let reparsed = parse_expression_text(tree.text(statement));
        let expr = reparsed.expression().unwrap();
        assert_eq!(reparsed.dump_node(expr), tree.dump_node(statement));
    }
}
