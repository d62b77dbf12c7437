//! Parser module: event-based tree builder, syntax tree and grammar.
//!
//! Grammar methods live on [`ParserState`], split by area:
//! - `state_paths.rs` - path expressions and their elements
//! - `state_expressions.rs` - primaries, argument lists, interpolated strings
//! - `state_statements.rs` - source files, statement lists, closures

pub mod builder;
pub mod node;
pub mod state;
mod state_expressions;
mod state_paths;
mod state_statements;
pub mod tree;

pub use builder::{CompletedMarker, Marker, TreeBuilder};
pub use node::{Node, NodeArena, NodeIndex, NodeKind, SyntaxElement};
pub use state::{ParseDiagnostic, ParseResult, ParserState, RelatedSpan};
pub use tree::SyntaxTree;

use crate::options::ParserOptions;

/// Parse a whole source file with default options.
#[must_use]
pub fn parse_source_text(file_name: &str, source_text: &str) -> SyntaxTree {
    parse_source_text_with_options(file_name, source_text, ParserOptions::default())
}

#[must_use]
pub fn parse_source_text_with_options(
    file_name: &str,
    source_text: &str,
    options: ParserOptions,
) -> SyntaxTree {
    ParserState::with_options(file_name.to_string(), source_text.to_string(), options)
        .parse_source_file()
}

/// Parse text holding a single expression with default options.
#[must_use]
pub fn parse_expression_text(source_text: &str) -> SyntaxTree {
    parse_expression_text_with_options(source_text, ParserOptions::default())
}

#[must_use]
pub fn parse_expression_text_with_options(source_text: &str, options: ParserOptions) -> SyntaxTree {
    ParserState::with_options("<expression>".to_string(), source_text.to_string(), options)
        .parse_single_expression()
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod builder_tests;

#[cfg(test)]
#[path = "tests/path_expression_tests.rs"]
mod path_expression_tests;

#[cfg(test)]
#[path = "tests/collaborator_tests.rs"]
mod collaborator_tests;
