//! Groovy path-expression parser and syntax tree for grove.
//!
//! The parser recognises chains of postfix operations applied to a primary
//! expression (`a.b().c[i] { ... }`) and records them in a lossless,
//! arena-backed syntax tree:
//! - `ParserState` - token cursor, tree builder and grammar methods
//! - `SyntaxTree` - the finished tree with its tokens and diagnostics
//! - `ParserOptions` - chain length, nesting and closure placement knobs

pub mod options;
pub use options::ParserOptions;

pub mod parser;
pub use parser::{
    NodeArena, NodeIndex, NodeKind, ParseDiagnostic, ParseResult, ParserState, RelatedSpan,
    SyntaxElement, SyntaxTree, parse_expression_text, parse_expression_text_with_options,
    parse_source_text, parse_source_text_with_options,
};
