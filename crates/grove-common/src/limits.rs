//! Centralized limits and thresholds for the parser.
//!
//! Shared constants for recursion depths and chain lengths. Both values are
//! defaults; `ParserOptions` lets a caller override them per parse.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for parser recursion.
///
/// Prevents stack overflow when parsing deeply nested source code. The
/// parser tracks its recursion depth and emits a `NESTING_TOO_DEEP`
/// diagnostic when this limit is exceeded. Used in `parser/state.rs`.
///
/// # Groovy example
///
/// ```groovy
/// // Deeply nested parenthesized expressions:
/// def x = ((((((((((((((((((((((((((((((1))))))))))))))))))))))))))))))
///
/// // Deeply nested closures and argument lists:
/// a { b { c(d { e([f { /* ... */ }]) }) } }
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 128;

/// Highest nesting limit a caller may configure.
///
/// `maxRecursionDepth` values above this are capped, since the parser
/// descends on the native stack for every nesting level.
pub const MAX_PARSER_RECURSION_DEPTH_CEILING: u32 = 256;

// =============================================================================
// Chain Length Limits
// =============================================================================

/// Maximum number of path elements in one path expression.
///
/// Path chains are classified by a loop, so a long chain does not grow the
/// parser's stack, but each element adds one level of nesting to the tree.
/// Downstream tree walkers are recursive, so the parser stops the chain
/// with `PATH_CHAIN_TOO_LONG` once this many elements have been built.
///
/// # Groovy example
///
/// ```groovy
/// a.b.c.d.e.f.g.h /* ... thousands of levels ... */
/// ```
pub const MAX_PATH_CHAIN_LENGTH: u32 = 1_000;

/// Maximum pre-allocation of parser events to avoid capacity overflow in huge files.
pub const MAX_EVENT_PREALLOC: usize = 1_000_000;
