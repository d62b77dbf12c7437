use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const UNEXPECTED_TOKEN: u32 = 1001;
    pub const PROPERTY_SELECTOR_EXPECTED: u32 = 1002;
    pub const OPEN_PAREN_EXPECTED: u32 = 1003;
    pub const CLOSE_PAREN_EXPECTED: u32 = 1004;
    pub const OPEN_BRACKET_EXPECTED: u32 = 1005;
    pub const CLOSE_BRACKET_EXPECTED: u32 = 1006;
    pub const OPEN_BRACE_EXPECTED: u32 = 1007;
    pub const CLOSE_BRACE_EXPECTED: u32 = 1008;
    pub const EXPRESSION_EXPECTED: u32 = 1009;
    pub const PATH_CHAIN_TOO_LONG: u32 = 1010;
    pub const NESTING_TOO_DEEP: u32 = 1011;
    pub const AMBIGUOUS_CODE_BLOCK: u32 = 1012;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1013;
    pub const INVALID_CHARACTER: u32 = 1014;
    pub const MATCHING_DELIMITER_HERE: u32 = 1015;
}

pub mod diagnostic_messages {
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token '{0}'.";
    pub const PROPERTY_SELECTOR_EXPECTED: &str = "Property selector expected.";
    pub const OPEN_PAREN_EXPECTED: &str = "'(' expected.";
    pub const CLOSE_PAREN_EXPECTED: &str = "')' expected.";
    pub const OPEN_BRACKET_EXPECTED: &str = "'[' expected.";
    pub const CLOSE_BRACKET_EXPECTED: &str = "']' expected.";
    pub const OPEN_BRACE_EXPECTED: &str = "'{' expected.";
    pub const CLOSE_BRACE_EXPECTED: &str = "'}' expected.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const PATH_CHAIN_TOO_LONG: &str = "Path expression exceeds the maximum chain length of {0}.";
    pub const NESTING_TOO_DEEP: &str = "Expression is nested too deeply.";
    pub const AMBIGUOUS_CODE_BLOCK: &str =
        "Ambiguous code block: a block on the next line is parsed as a closure argument.";
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const MATCHING_DELIMITER_HERE: &str =
        "The parser expected to find a '{0}' to match the '{1}' token here.";
}

macro_rules! error {
    ($name:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::Error,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    error!(UNEXPECTED_TOKEN),
    error!(PROPERTY_SELECTOR_EXPECTED),
    error!(OPEN_PAREN_EXPECTED),
    error!(CLOSE_PAREN_EXPECTED),
    error!(OPEN_BRACKET_EXPECTED),
    error!(CLOSE_BRACKET_EXPECTED),
    error!(OPEN_BRACE_EXPECTED),
    error!(CLOSE_BRACE_EXPECTED),
    error!(EXPRESSION_EXPECTED),
    error!(PATH_CHAIN_TOO_LONG),
    error!(NESTING_TOO_DEEP),
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_CODE_BLOCK,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::AMBIGUOUS_CODE_BLOCK,
    },
    error!(UNTERMINATED_STRING_LITERAL),
    error!(INVALID_CHARACTER),
    DiagnosticMessage {
        code: diagnostic_codes::MATCHING_DELIMITER_HERE,
        category: DiagnosticCategory::Message,
        message: diagnostic_messages::MATCHING_DELIMITER_HERE,
    },
];
