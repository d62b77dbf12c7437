//! grove: a Groovy path-expression parser with a command-line front end.
//!
//! The parsing itself lives in the workspace crates; this package adds the
//! pieces a runnable tool needs:
//! - `cli` - argument parsing, `grove.json` loading, driving and reporting
//! - `tracing_config` - opt-in tracing subscriber setup

pub use grove_common as common;
pub use grove_parser as parser;
pub use grove_scanner as scanner;

pub use grove_parser::{
    ParserOptions, SyntaxTree, parse_expression_text, parse_expression_text_with_options,
    parse_source_text, parse_source_text_with_options,
};

pub mod cli;

// Opt-in tracing (GROVE_LOG / GROVE_LOG_FORMAT)
pub mod tracing_config;
