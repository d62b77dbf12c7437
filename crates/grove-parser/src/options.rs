//! Parser configuration.

use grove_common::limits;
use serde::{Deserialize, Serialize};

/// Options controlling limits and newline handling of a parse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Maximum number of path elements chained onto one primary expression.
    pub max_path_chain_length: u32,
    /// Maximum nesting of expressions and closures.
    pub max_recursion_depth: u32,
    /// Whether a `{` on the line after a chain position is a closure argument.
    /// Off by default: such a block is a statement of its own.
    pub closure_on_next_line: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_path_chain_length: limits::MAX_PATH_CHAIN_LENGTH,
            max_recursion_depth: limits::MAX_PARSER_RECURSION_DEPTH,
            closure_on_next_line: false,
        }
    }
}

impl ParserOptions {
    /// The options a parse actually runs with: a chain allows at least one
    /// element and nesting is capped at
    /// [`limits::MAX_PARSER_RECURSION_DEPTH_CEILING`].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            max_path_chain_length: self.max_path_chain_length.max(1),
            max_recursion_depth: self
                .max_recursion_depth
                .min(limits::MAX_PARSER_RECURSION_DEPTH_CEILING),
            ..self
        }
    }
}
