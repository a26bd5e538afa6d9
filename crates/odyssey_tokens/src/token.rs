//! A lexical token from a source file

use crate::location::{Located, Location};
use std::fmt::{Debug, Formatter};

/// A lexical token from a source file.
///
/// The lexeme borrows from the source the token was scanned from.
#[derive(Clone, Copy)]
pub struct Token<'s> {
    kind: TokenKind,
    lexeme: &'s str,
    location: Location,
}

impl<'s> Token<'s> {
    /// Creates a new token
    pub fn new(kind: TokenKind, lexeme: &'s str, location: Location) -> Self {
        Self {
            kind,
            lexeme,
            location,
        }
    }

    /// The token handed back by the parser when an expected token was missing
    pub fn error() -> Self {
        Self::new(TokenKind::Error, "ERROR", Location::default())
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact source text of this token
    pub fn lexeme(&self) -> &'s str {
        self.lexeme
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn start(&self) -> usize {
        self.location.start
    }

    pub fn end(&self) -> usize {
        self.location.end
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Debug for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.lexeme, self.location)
    }
}

impl Located for Token<'_> {
    fn location(&self) -> Location {
        self.location
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.lexeme == other.lexeme
    }
}

/// The kind for a token
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum TokenKind {
    /// The end of input, always the last token of a token sequence
    #[strum(to_string = "end of file")]
    Eof,
    /// Synthesized by the parser, never produced by the lexer
    #[strum(to_string = "<error>")]
    Error,

    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "/")]
    Slash,
    #[strum(to_string = "*")]
    Star,
    #[strum(to_string = "=")]
    Equal,
    #[strum(to_string = "==")]
    EqualEqual,
    #[strum(to_string = "!=")]
    BangEqual,
    #[strum(to_string = ">")]
    Greater,
    #[strum(to_string = "<")]
    Less,
    #[strum(to_string = "<=")]
    LessEqual,
    #[strum(to_string = ">=")]
    GreaterEqual,

    #[strum(to_string = "!")]
    Bang,

    #[strum(to_string = ":")]
    Colon,
    #[strum(to_string = ";")]
    Semicolon,
    #[strum(to_string = ",")]
    Comma,
    #[strum(to_string = "(")]
    LeftParen,
    #[strum(to_string = ")")]
    RightParen,
    #[strum(to_string = "left curly brace")]
    LeftCurly,
    #[strum(to_string = "right curly brace")]
    RightCurly,

    #[strum(to_string = "identifier")]
    Identifier,

    /// integer literal
    #[strum(to_string = "integer literal")]
    Int,
    /// floating point literal
    #[strum(to_string = "double literal")]
    Double,
    /// string literal, including its quotes
    #[strum(to_string = "string literal")]
    String,
    #[strum(to_string = "true")]
    True,
    #[strum(to_string = "false")]
    False,
    #[strum(to_string = "nil")]
    Nil,

    #[strum(to_string = "int")]
    IntType,
    #[strum(to_string = "double")]
    DoubleType,
    #[strum(to_string = "string")]
    StringType,
    #[strum(to_string = "bool")]
    BoolType,
    #[strum(to_string = "void")]
    VoidType,

    #[strum(to_string = "print")]
    Print,
    #[strum(to_string = "func")]
    Func,
    #[strum(to_string = "for")]
    For,
    #[strum(to_string = "while")]
    While,
    #[strum(to_string = "let")]
    Let,
    #[strum(to_string = "if")]
    If,
    #[strum(to_string = "else")]
    Else,
    #[strum(to_string = "elif")]
    Elif,
}

/// Reserved words of the language
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("func", TokenKind::Func),
    ("let", TokenKind::Let),
    ("print", TokenKind::Print),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("elif", TokenKind::Elif),
    ("for", TokenKind::For),
    ("while", TokenKind::While),
    ("int", TokenKind::IntType),
    ("double", TokenKind::DoubleType),
    ("void", TokenKind::VoidType),
    ("bool", TokenKind::BoolType),
    ("nil", TokenKind::Nil),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("string", TokenKind::StringType),
];

impl TokenKind {
    /// Looks up a word in the keyword table
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == word)
            .map(|&(_, kind)| kind)
    }

    /// Whether this kind is a literal value
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Double | TokenKind::String | TokenKind::True | TokenKind::False
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_keyword_table() {
        assert_eq!(TokenKind::keyword("let"), Some(TokenKind::Let));
        assert_eq!(TokenKind::keyword("string"), Some(TokenKind::StringType));
        assert_eq!(TokenKind::keyword("true"), Some(TokenKind::True));
        assert_eq!(TokenKind::keyword("lets"), None);
        assert_eq!(TokenKind::keyword("Let"), None);
    }

    #[test]
    fn test_every_keyword_displays_as_itself() {
        for (word, kind) in KEYWORDS {
            assert_eq!(&kind.to_string(), word);
        }
    }

    #[test]
    fn test_only_keywords_resolve() {
        let keywords = TokenKind::iter()
            .filter(|kind| TokenKind::keyword(&kind.to_string()) == Some(*kind))
            .count();
        assert_eq!(keywords, KEYWORDS.len());
    }

    #[test]
    fn test_tokens_compare_by_kind_and_text() {
        let a = Token::new(TokenKind::Identifier, "x", Location::new(1, 0, 1));
        let b = Token::new(TokenKind::Identifier, "x", Location::new(2, 4, 5));
        let c = Token::new(TokenKind::Identifier, "y", Location::new(1, 0, 1));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
