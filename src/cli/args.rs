use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the grove binary.
#[derive(Parser, Debug)]
#[command(
    name = "grove",
    version,
    about = "Parse Groovy path expressions and print their syntax trees"
)]
pub struct CliArgs {
    /// Parse a single expression instead of (or in addition to) files.
    #[arg(short = 'e', long = "expression")]
    pub expression: Option<String>,

    /// What to print for each parsed input.
    #[arg(long, value_enum, default_value_t = EmitFormat::Tree, ignore_case = true)]
    pub emit: EmitFormat,

    /// Path to grove.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Maximum number of path elements chained onto one primary expression.
    #[arg(long = "maxPathChainLength", alias = "max-path-chain-length")]
    pub max_path_chain_length: Option<u32>,

    /// Maximum nesting of expressions and closures.
    #[arg(long = "maxRecursionDepth", alias = "max-recursion-depth")]
    pub max_recursion_depth: Option<u32>,

    /// Attach a `{` on the next line to the preceding path as a closure argument.
    #[arg(long = "closureOnNextLine", alias = "closure-on-next-line")]
    pub closure_on_next_line: bool,

    /// Enable color and formatting in output. Defaults to on for terminals.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub pretty: Option<bool>,

    /// Source files to parse.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EmitFormat {
    /// Indented tree dump.
    #[default]
    Tree,
    /// JSON rendering of the tree and its diagnostics.
    Json,
    /// Diagnostics only.
    None,
}

impl CliArgs {
    /// Whether any input was given.
    pub fn has_inputs(&self) -> bool {
        self.expression.is_some() || !self.files.is_empty()
    }
}
