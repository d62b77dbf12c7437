use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use grove_common::Diagnostic;
use grove_parser::{
    ParserOptions, SyntaxTree, parse_expression_text_with_options, parse_source_text_with_options,
};

use crate::cli::args::{CliArgs, EmitFormat};
use crate::cli::config::{load_config, resolve_parser_options, resolve_project_path};

/// One thing to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Expression(String),
}

#[derive(Debug)]
pub struct ParseOutcome {
    pub trees: Vec<SyntaxTree>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Files in command-line order, then the `-e` expression.
pub fn collect_inputs(args: &CliArgs) -> Vec<Input> {
    let mut inputs: Vec<Input> = args.files.iter().cloned().map(Input::File).collect();
    if let Some(expression) = &args.expression {
        inputs.push(Input::Expression(expression.clone()));
    }
    inputs
}

/// Parser options from `--project` (if any) overlaid with flags.
pub fn load_parser_options(args: &CliArgs, cwd: &Path) -> Result<ParserOptions> {
    let config = match &args.project {
        Some(project) => Some(load_config(&resolve_project_path(project, cwd))?),
        None => None,
    };
    resolve_parser_options(config.as_ref(), args)
}

/// Parse every input. Parse errors are diagnostics; only I/O, config and
/// usage problems are `Err`.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<ParseOutcome> {
    if !args.has_inputs() {
        bail!("no input files; pass FILES or --expression");
    }
    let options = load_parser_options(args, cwd)?;

    let mut trees = Vec::new();
    for input in collect_inputs(args) {
        trees.push(parse_input(&input, cwd, &options)?);
    }

    let diagnostics = trees.iter().flat_map(SyntaxTree::to_diagnostics).collect();
    Ok(ParseOutcome { trees, diagnostics })
}

pub fn parse_input(input: &Input, cwd: &Path, options: &ParserOptions) -> Result<SyntaxTree> {
    let tree = match input {
        Input::File(path) => {
            let full_path = if path.is_absolute() {
                path.clone()
            } else {
                cwd.join(path)
            };
            let text = std::fs::read_to_string(&full_path)
                .with_context(|| format!("failed to read {}", full_path.display()))?;
            parse_source_text_with_options(&path.display().to_string(), &text, options.clone())
        }
        Input::Expression(text) => parse_expression_text_with_options(text, options.clone()),
    };
    tracing::debug!(
        file = tree.file_name(),
        diagnostics = tree.diagnostics().len(),
        "parsed input"
    );
    Ok(tree)
}

/// The text printed to stdout for `trees`, or `None` for `--emit none`.
pub fn render_output(trees: &[SyntaxTree], emit: EmitFormat, pretty: bool) -> Result<Option<String>> {
    let mut out = String::new();
    match emit {
        EmitFormat::None => return Ok(None),
        EmitFormat::Tree => {
            for tree in trees {
                if trees.len() > 1 {
                    out.push_str(&format!("== {} ==\n", tree.file_name()));
                }
                out.push_str(&tree.dump());
            }
        }
        EmitFormat::Json => {
            for tree in trees {
                let json = tree.to_json();
                let text = if pretty {
                    serde_json::to_string_pretty(&json)
                } else {
                    serde_json::to_string(&json)
                }
                .context("failed to serialize syntax tree")?;
                out.push_str(&text);
                out.push('\n');
            }
        }
    }
    Ok(Some(out))
}
