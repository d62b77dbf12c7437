//! Groovy-flavoured scanner/tokenizer for the grove parser.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `TokenSet` - Constant bitsets over token types
//! - `ScannerState` - Tokenizer producing a flat token vector

mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod token_set;
pub use token_set::TokenSet;

mod scanner_impl;
pub use scanner_impl::{ScannerDiagnostic, ScannerState, Token};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
