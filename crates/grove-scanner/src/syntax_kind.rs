//! Token kinds produced by the scanner.

use serde::Serialize;

/// Kind of a scanned token.
///
/// The enumeration is closed and has fewer than 128 members so that a
/// [`TokenSet`](crate::TokenSet) fits in a single `u128`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,
    /// One or more line breaks, collapsed together with the trivia between them.
    Newline,

    // Identifiers and literals
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    /// `'text'` or `'''text'''`
    StringLiteral,
    /// `"text"` without interpolation
    GStringLiteral,
    /// `"text$` - opening quote through the first `$`
    GStringBegin,
    /// `text$` - text between two injections
    GStringContent,
    /// `text"` - text after the last injection through the closing quote
    GStringEnd,

    // Dot family
    DotToken,
    /// `*.`
    SpreadDotToken,
    /// `?.`
    OptionalDotToken,
    /// `.&`
    MemberPointerToken,

    // Delimiters
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    OpenBraceToken,
    CloseBraceToken,

    // Punctuation
    AtToken,
    CommaToken,
    ColonToken,
    SemicolonToken,
    ArrowToken,
    EqualsToken,

    // Operators the path grammar never consumes
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    ExclamationToken,
    LessThanToken,
    GreaterThanToken,
    QuestionToken,
    AmpersandToken,
    BarToken,

    // Keywords
    AsKeyword,
    AssertKeyword,
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ContinueKeyword,
    DefKeyword,
    DefaultKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinalKeyword,
    FinallyKeyword,
    ForKeyword,
    IfKeyword,
    ImplementsKeyword,
    ImportKeyword,
    InKeyword,
    InstanceofKeyword,
    InterfaceKeyword,
    NewKeyword,
    NullKeyword,
    PackageKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    ThrowsKeyword,
    TrueKeyword,
    TryKeyword,
    WhileKeyword,

    // Builtin type keywords
    BooleanKeyword,
    ByteKeyword,
    CharKeyword,
    ShortKeyword,
    IntKeyword,
    LongKeyword,
    FloatKeyword,
    DoubleKeyword,
    VoidKeyword,
}

impl SyntaxKind {
    /// Number of token kinds.
    pub const COUNT: usize = SyntaxKind::VoidKeyword as usize + 1;

    /// Keyword kind for a reserved word, if `text` is one.
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "as" => SyntaxKind::AsKeyword,
            "assert" => SyntaxKind::AssertKeyword,
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "catch" => SyntaxKind::CatchKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "def" => SyntaxKind::DefKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "do" => SyntaxKind::DoKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "enum" => SyntaxKind::EnumKeyword,
            "extends" => SyntaxKind::ExtendsKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "final" => SyntaxKind::FinalKeyword,
            "finally" => SyntaxKind::FinallyKeyword,
            "for" => SyntaxKind::ForKeyword,
            "if" => SyntaxKind::IfKeyword,
            "implements" => SyntaxKind::ImplementsKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "in" => SyntaxKind::InKeyword,
            "instanceof" => SyntaxKind::InstanceofKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "new" => SyntaxKind::NewKeyword,
            "null" => SyntaxKind::NullKeyword,
            "package" => SyntaxKind::PackageKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "super" => SyntaxKind::SuperKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "this" => SyntaxKind::ThisKeyword,
            "throw" => SyntaxKind::ThrowKeyword,
            "throws" => SyntaxKind::ThrowsKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "try" => SyntaxKind::TryKeyword,
            "while" => SyntaxKind::WhileKeyword,
            "boolean" => SyntaxKind::BooleanKeyword,
            "byte" => SyntaxKind::ByteKeyword,
            "char" => SyntaxKind::CharKeyword,
            "short" => SyntaxKind::ShortKeyword,
            "int" => SyntaxKind::IntKeyword,
            "long" => SyntaxKind::LongKeyword,
            "float" => SyntaxKind::FloatKeyword,
            "double" => SyntaxKind::DoubleKeyword,
            "void" => SyntaxKind::VoidKeyword,
            _ => return None,
        };
        Some(kind)
    }

    #[must_use]
    pub const fn is_keyword(self) -> bool {
        crate::token_set::KEYWORDS.contains(self)
    }

    /// Fixed source text of punctuation and keyword tokens.
    #[must_use]
    pub const fn text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::DotToken => ".",
            SyntaxKind::SpreadDotToken => "*.",
            SyntaxKind::OptionalDotToken => "?.",
            SyntaxKind::MemberPointerToken => ".&",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::AtToken => "@",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::ArrowToken => "->",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            _ => return None,
        };
        Some(text)
    }
}
