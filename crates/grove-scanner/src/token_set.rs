//! Constant bitsets over [`SyntaxKind`].

use crate::SyntaxKind;

/// A fixed set of token kinds, usable in `const` context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenSet(u128);

// Every kind must map to a distinct bit.
const _: () = assert!(SyntaxKind::COUNT <= 128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    #[must_use]
    pub const fn new(kinds: &[SyntaxKind]) -> TokenSet {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            bits |= mask(kinds[i]);
            i += 1;
        }
        TokenSet(bits)
    }

    #[must_use]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    #[must_use]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        self.0 & mask(kind) != 0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

const fn mask(kind: SyntaxKind) -> u128 {
    1u128 << (kind as u8)
}

/// Reserved words, including builtin type names.
pub const KEYWORDS: TokenSet = TokenSet::new(&[
    SyntaxKind::AsKeyword,
    SyntaxKind::AssertKeyword,
    SyntaxKind::BreakKeyword,
    SyntaxKind::CaseKeyword,
    SyntaxKind::CatchKeyword,
    SyntaxKind::ClassKeyword,
    SyntaxKind::ContinueKeyword,
    SyntaxKind::DefKeyword,
    SyntaxKind::DefaultKeyword,
    SyntaxKind::DoKeyword,
    SyntaxKind::ElseKeyword,
    SyntaxKind::EnumKeyword,
    SyntaxKind::ExtendsKeyword,
    SyntaxKind::FalseKeyword,
    SyntaxKind::FinalKeyword,
    SyntaxKind::FinallyKeyword,
    SyntaxKind::ForKeyword,
    SyntaxKind::IfKeyword,
    SyntaxKind::ImplementsKeyword,
    SyntaxKind::ImportKeyword,
    SyntaxKind::InKeyword,
    SyntaxKind::InstanceofKeyword,
    SyntaxKind::InterfaceKeyword,
    SyntaxKind::NewKeyword,
    SyntaxKind::NullKeyword,
    SyntaxKind::PackageKeyword,
    SyntaxKind::ReturnKeyword,
    SyntaxKind::SuperKeyword,
    SyntaxKind::SwitchKeyword,
    SyntaxKind::ThisKeyword,
    SyntaxKind::ThrowKeyword,
    SyntaxKind::ThrowsKeyword,
    SyntaxKind::TrueKeyword,
    SyntaxKind::TryKeyword,
    SyntaxKind::WhileKeyword,
])
.union(BUILTIN_TYPES);

pub const BUILTIN_TYPES: TokenSet = TokenSet::new(&[
    SyntaxKind::BooleanKeyword,
    SyntaxKind::ByteKeyword,
    SyntaxKind::CharKeyword,
    SyntaxKind::ShortKeyword,
    SyntaxKind::IntKeyword,
    SyntaxKind::LongKeyword,
    SyntaxKind::FloatKeyword,
    SyntaxKind::DoubleKeyword,
    SyntaxKind::VoidKeyword,
]);

/// Keywords that may still name a member after a dot, e.g. `obj.class` or `map.in`.
pub const KEYWORD_PROPERTY_NAMES: TokenSet = KEYWORDS;

pub const STRING_LITERALS: TokenSet =
    TokenSet::new(&[SyntaxKind::StringLiteral, SyntaxKind::GStringLiteral]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        const DOTS: TokenSet = TokenSet::new(&[SyntaxKind::DotToken, SyntaxKind::SpreadDotToken]);
        assert!(DOTS.contains(SyntaxKind::DotToken));
        assert!(DOTS.contains(SyntaxKind::SpreadDotToken));
        assert!(!DOTS.contains(SyntaxKind::OptionalDotToken));
        assert!(TokenSet::EMPTY.is_empty());
    }

    #[test]
    fn last_kind_fits() {
        let set = TokenSet::new(&[SyntaxKind::VoidKeyword]);
        assert!(set.contains(SyntaxKind::VoidKeyword));
        assert!(!set.contains(SyntaxKind::Unknown));
    }

    #[test]
    fn keywords_include_builtin_types() {
        assert!(KEYWORDS.contains(SyntaxKind::ClassKeyword));
        assert!(KEYWORDS.contains(SyntaxKind::IntKeyword));
        assert!(!KEYWORDS.contains(SyntaxKind::Identifier));
        assert!(KEYWORD_PROPERTY_NAMES.contains(SyntaxKind::InKeyword));
    }
}
