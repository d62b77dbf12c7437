#![allow(clippy::print_stderr, clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use grove::cli::args::CliArgs;
use grove::cli::{driver, reporter::Reporter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_PARSE_ERRORS: i32 = 1;
const EXIT_USAGE_OR_IO: i32 = 2;

fn main() {
    // Only installs a subscriber when GROVE_LOG or RUST_LOG is set.
    grove::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let code = match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_USAGE_OR_IO
        }
    };
    std::process::exit(code);
}

fn run(args: &CliArgs) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let outcome = driver::run(args, &cwd)?;

    let pretty = args.pretty.unwrap_or_else(|| std::io::stdout().is_terminal());
    if let Some(output) = driver::render_output(&outcome.trees, args.emit, pretty)? {
        print!("{output}");
    }

    if !outcome.diagnostics.is_empty() {
        let mut reporter = Reporter::new(pretty);
        for tree in &outcome.trees {
            reporter.add_source(tree.file_name(), tree.source_text());
        }
        eprintln!("{}", reporter.render(&outcome.diagnostics));
    }

    Ok(if outcome.has_errors() {
        EXIT_PARSE_ERRORS
    } else {
        EXIT_SUCCESS
    })
}
