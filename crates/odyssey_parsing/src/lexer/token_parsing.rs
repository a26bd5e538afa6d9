use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while1};
use nom::character::complete::{alpha1, alphanumeric1, char, digit1};
use nom::combinator::{map, opt, recognize, value};
use nom::error::{context, VerboseError};
use nom::multi::many0_count;
use nom::sequence::{pair, preceded, tuple};
use nom::IResult;
use odyssey_tokens::TokenKind;

type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// What the scanner recognized at the head of the input
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Scanned {
    Token(TokenKind),
    /// an opening quote with no closing quote before the end of input
    UnterminatedString,
}

/// Scans exactly one token from the head of the input
pub(crate) fn scan_token(src: &str) -> Result<Scanned> {
    context(
        "token",
        alt((
            map(parse_operator, Scanned::Token),
            map(parse_punctuation, Scanned::Token),
            map(parse_number, Scanned::Token),
            map(parse_word, Scanned::Token),
            parse_string,
        )),
    )(src)
}

/// Whitespace, newlines and `#` comments running up to the end of their line
pub(crate) fn parse_insignificant(src: &str) -> Result<&str> {
    recognize(many0_count(alt((
        take_while1(|c: char| c == ' ' || c == '\t' || c == '\r' || c == '\n'),
        recognize(preceded(char('#'), take_till(|c: char| c == '\n'))),
    ))))(src)
}

fn parse_operator(src: &str) -> Result<TokenKind> {
    context(
        "operator",
        alt((
            value(TokenKind::EqualEqual, tag("==")),
            value(TokenKind::Equal, char('=')),
            value(TokenKind::BangEqual, tag("!=")),
            value(TokenKind::Bang, char('!')),
            value(TokenKind::GreaterEqual, tag(">=")),
            value(TokenKind::Greater, char('>')),
            value(TokenKind::LessEqual, tag("<=")),
            value(TokenKind::Less, char('<')),
            value(TokenKind::Plus, char('+')),
            value(TokenKind::Minus, char('-')),
            value(TokenKind::Slash, char('/')),
            value(TokenKind::Star, char('*')),
        )),
    )(src)
}

fn parse_punctuation(src: &str) -> Result<TokenKind> {
    context(
        "punctuation",
        alt((
            value(TokenKind::Colon, char(':')),
            value(TokenKind::Semicolon, char(';')),
            value(TokenKind::Comma, char(',')),
            value(TokenKind::LeftParen, char('(')),
            value(TokenKind::RightParen, char(')')),
            value(TokenKind::LeftCurly, char('{')),
            value(TokenKind::RightCurly, char('}')),
        )),
    )(src)
}

/// `digits` or `digits.digits`. A dot must be followed by a digit to be part of the number.
fn parse_number(src: &str) -> Result<TokenKind> {
    context(
        "number",
        alt((
            value(
                TokenKind::Double,
                recognize(tuple((digit1, char('.'), digit1))),
            ),
            value(TokenKind::Int, digit1),
        )),
    )(src)
}

fn parse_word(src: &str) -> Result<TokenKind> {
    context(
        "word",
        map(
            recognize(pair(
                alt((alpha1, tag("_"))),
                many0_count(alt((alphanumeric1, tag("_")))),
            )),
            |word: &str| TokenKind::keyword(word).unwrap_or(TokenKind::Identifier),
        ),
    )(src)
}

/// A string has no escapes and may span lines
fn parse_string(src: &str) -> Result<Scanned> {
    context(
        "string",
        map(
            tuple((char('"'), take_till(|c: char| c == '"'), opt(char('"')))),
            |(_, _, close)| match close {
                Some(_) => Scanned::Token(TokenKind::String),
                None => Scanned::UnterminatedString,
            },
        ),
    )(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_char_operators_win() {
        assert_eq!(
            scan_token(">=1"),
            Ok(("1", Scanned::Token(TokenKind::GreaterEqual)))
        );
        assert_eq!(scan_token("=1"), Ok(("1", Scanned::Token(TokenKind::Equal))));
        assert_eq!(scan_token("!x"), Ok(("x", Scanned::Token(TokenKind::Bang))));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(scan_token("12.5;"), Ok((";", Scanned::Token(TokenKind::Double))));
        assert_eq!(scan_token("12;"), Ok((";", Scanned::Token(TokenKind::Int))));
        assert_eq!(scan_token("1."), Ok((".", Scanned::Token(TokenKind::Int))));
    }

    #[test]
    fn test_words() {
        assert_eq!(scan_token("let x"), Ok((" x", Scanned::Token(TokenKind::Let))));
        assert_eq!(scan_token("letter"), Ok(("", Scanned::Token(TokenKind::Identifier))));
        assert_eq!(scan_token("_a1 "), Ok((" ", Scanned::Token(TokenKind::Identifier))));
    }

    #[test]
    fn test_strings() {
        assert_eq!(scan_token("\"hi\" x"), Ok((" x", Scanned::Token(TokenKind::String))));
        assert_eq!(scan_token("\"hi"), Ok(("", Scanned::UnterminatedString)));
    }

    #[test]
    fn test_insignificant() {
        assert_eq!(parse_insignificant("  # note\n\tx"), Ok(("x", "  # note\n\t")));
        assert_eq!(parse_insignificant("x"), Ok(("x", "")));
    }

    #[test]
    fn test_unknown_char_fails() {
        assert!(scan_token("$").is_err());
        assert!(scan_token(".5").is_err());
    }
}
