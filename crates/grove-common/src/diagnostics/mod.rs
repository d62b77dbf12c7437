//! Diagnostic types and message lookup for the parser.
//!
//! Message data lives in `data.rs`.

use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 2,
}

impl DiagnosticCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Message => "message",
        }
    }
}

/// Related information for a diagnostic (e.g., "see also" locations).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A parse diagnostic bound to a file, with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Related information spans (e.g., where an unclosed delimiter was opened)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(
        mut self,
        file: String,
        start: u32,
        length: u32,
        message: String,
        code: u32,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file,
            start,
            length,
            message_text: message,
            category: get_diagnostic_category(code).unwrap_or(DiagnosticCategory::Message),
            code,
        });
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
///
/// Returns the template string with `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_has_a_unique_message() {
        for (i, a) in DIAGNOSTIC_MESSAGES.iter().enumerate() {
            for b in &DIAGNOSTIC_MESSAGES[i + 1..] {
                assert_ne!(a.code, b.code, "duplicate diagnostic code {}", a.code);
            }
        }
    }

    #[test]
    fn lookup_by_code() {
        let template = get_message_template(diagnostic_codes::PROPERTY_SELECTOR_EXPECTED);
        assert_eq!(template, Some(diagnostic_messages::PROPERTY_SELECTOR_EXPECTED));
        assert_eq!(
            get_diagnostic_category(diagnostic_codes::AMBIGUOUS_CODE_BLOCK),
            Some(DiagnosticCategory::Warning)
        );
        assert_eq!(
            get_diagnostic_category(diagnostic_codes::MATCHING_DELIMITER_HERE),
            Some(DiagnosticCategory::Message)
        );
        assert!(get_diagnostic_message(9999).is_none());
    }

    #[test]
    fn format_message_fills_placeholders() {
        assert_eq!(
            format_message(diagnostic_messages::UNEXPECTED_TOKEN, &["}"]),
            "Unexpected token '}'."
        );
    }

    #[test]
    fn with_related_takes_category_from_code() {
        let diag = Diagnostic::error("a.groovy".into(), 3, 0, "')' expected.".into(), 1004)
            .with_related(
                "a.groovy".into(),
                1,
                1,
                "here".into(),
                diagnostic_codes::MATCHING_DELIMITER_HERE,
            );
        assert_eq!(diag.related_information.len(), 1);
        let related = &diag.related_information[0];
        assert_eq!(related.category, DiagnosticCategory::Message);
        assert_eq!((related.start, related.length), (1, 1));
    }
}
