use anyhow::{Context, Result, anyhow, bail};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use grove_common::limits;
use grove_parser::ParserOptions;

use crate::cli::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "grove.json";

/// Contents of a `grove.json` project file.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroveConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub parser_options: Option<ParserOptionsConfig>,
}

/// Parser options as written in a project file. Absent fields inherit.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParserOptionsConfig {
    #[serde(default)]
    pub max_path_chain_length: Option<u32>,
    #[serde(default)]
    pub max_recursion_depth: Option<u32>,
    #[serde(default)]
    pub closure_on_next_line: Option<bool>,
}

impl ParserOptionsConfig {
    fn merge(base: Self, child: Self) -> Self {
        Self {
            max_path_chain_length: child.max_path_chain_length.or(base.max_path_chain_length),
            max_recursion_depth: child.max_recursion_depth.or(base.max_recursion_depth),
            closure_on_next_line: child.closure_on_next_line.or(base.closure_on_next_line),
        }
    }
}

/// Parse `grove.json` text. Comments and trailing commas are accepted.
pub fn parse_config(source: &str) -> Result<GroveConfig> {
    let normalized = strip_jsonc(source);
    let config = serde_json::from_str(&normalized).context("failed to parse grove.json")?;
    Ok(config)
}

/// Load a project file, following `extends` chains.
pub fn load_config(path: &Path) -> Result<GroveConfig> {
    let mut visited = FxHashSet::default();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut FxHashSet<PathBuf>) -> Result<GroveConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("grove.json extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        let base = load_config_inner(&base_path, visited)?;
        config.parser_options = match (base.parser_options, config.parser_options.take()) {
            (Some(base), Some(child)) => Some(ParserOptionsConfig::merge(base, child)),
            (base, child) => child.or(base),
        };
    }

    visited.remove(&canonical);
    tracing::debug!(path = %path.display(), "loaded project config");
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("config has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }
    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

/// `--project` may name the file itself or a directory holding `grove.json`.
pub fn resolve_project_path(project: &Path, cwd: &Path) -> PathBuf {
    let path = if project.is_absolute() {
        project.to_path_buf()
    } else {
        cwd.join(project)
    };
    if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path
    }
}

/// Defaults, then the project file, then command-line flags.
///
/// A chain length of zero is rejected; a recursion depth above
/// [`limits::MAX_PARSER_RECURSION_DEPTH_CEILING`] is capped.
pub fn resolve_parser_options(
    config: Option<&GroveConfig>,
    args: &CliArgs,
) -> Result<ParserOptions> {
    let mut options = ParserOptions::default();

    if let Some(file) = config.and_then(|config| config.parser_options.as_ref()) {
        if let Some(max) = file.max_path_chain_length {
            options.max_path_chain_length = max;
        }
        if let Some(max) = file.max_recursion_depth {
            options.max_recursion_depth = max;
        }
        if let Some(on_next_line) = file.closure_on_next_line {
            options.closure_on_next_line = on_next_line;
        }
    }

    if let Some(max) = args.max_path_chain_length {
        options.max_path_chain_length = max;
    }
    if let Some(max) = args.max_recursion_depth {
        options.max_recursion_depth = max;
    }
    if args.closure_on_next_line {
        options.closure_on_next_line = true;
    }

    if options.max_path_chain_length == 0 {
        bail!("maxPathChainLength must be at least 1");
    }
    let ceiling = limits::MAX_PARSER_RECURSION_DEPTH_CEILING;
    if options.max_recursion_depth > ceiling {
        tracing::warn!(
            requested = options.max_recursion_depth,
            ceiling,
            "maxRecursionDepth capped"
        );
        options.max_recursion_depth = ceiling;
    }

    Ok(options)
}

/// Drop `//` and `/* */` comments and commas that directly precede `}` or `]`.
fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    // Index in `out` of a comma that may still turn out to be trailing.
    let mut pending_comma: Option<usize> = None;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
                continue;
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
                continue;
            }
            '}' | ']' => {
                if let Some(index) = pending_comma.take() {
                    out.replace_range(index..=index, " ");
                }
            }
            ',' => {
                out.push(ch);
                pending_comma = Some(out.len() - 1);
                continue;
            }
            '"' => in_string = true,
            _ => {}
        }

        if !ch.is_whitespace() {
            pending_comma = None;
        }
        out.push(ch);
    }

    out
}
