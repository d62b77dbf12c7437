use colored::Colorize;
use rustc_hash::FxHashMap;
use std::path::Path;

use grove_common::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, LineMap};

/// Renders diagnostics as `file:line:col - category GRV<code>: message`
/// followed by the offending source line.
pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Register source text so it is not re-read from disk. Expressions
    /// given with `-e` only exist here.
    pub fn add_source(&mut self, file: impl Into<String>, text: impl Into<String>) {
        let file = file.into();
        self.line_maps.remove(&file);
        self.sources.insert(file, text.into());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let mut output = match self.format_location(&diagnostic.file, diagnostic.start) {
            Some(location) => location,
            None if !diagnostic.file.is_empty() => diagnostic.file.clone(),
            None => "<unknown>".to_string(),
        };

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        let code = self.format_code(diagnostic.code);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
        }

        output
    }

    /// The source line holding `start`, underlined from `start` for
    /// `length` bytes (at least one `~`):
    ///
    /// ```text
    ///     2   a.b(1
    ///              ~
    /// ```
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }

        let (line_num, column) = self.position_for(file, start)?;
        let line_map = self.line_maps.get(file)?;
        let source = self.sources.get(file)?;
        let line_start = line_map.line_start(line_num - 1)? as usize;
        let line_text = source
            .get(line_start..)?
            .split(['\n', '\r'])
            .next()
            .unwrap_or_default();

        let mut underline = String::new();
        let span_start = (column - 1) as usize;
        let span_end = span_start + length as usize;
        for (offset, ch) in line_text.char_indices() {
            if offset >= span_end {
                break;
            }
            let width = if ch == '\t' { 4 } else { 1 };
            let mark = if offset < span_start { ' ' } else { '~' };
            underline.extend(std::iter::repeat_n(mark, width));
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line_num:>3}   {line_text}\n        {underline}"))
    }

    fn format_related(&mut self, related: &DiagnosticRelatedInformation) -> String {
        let location = self
            .format_location(&related.file, related.start)
            .unwrap_or_else(|| related.file.clone());
        let prefix = if self.color {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };
        format!("{prefix}: {location} - {}", related.message_text)
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }
        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{file}:{line}:{column}"))
    }

    /// One-based line and column of `offset`.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        if !self.line_maps.contains_key(file) {
            let map = LineMap::build(self.sources.get(file)?);
            self.line_maps.insert(file.to_string(), map);
        }
        let position = self.line_maps.get(file)?.offset_to_position(offset);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }
        let label = format!("GRV{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
