//! Turns source text into a token stream

use crate::lexer::token_parsing::{parse_insignificant, scan_token, Scanned};
use odyssey_tokens::{Diagnostic, Diagnostics, Location, Token, TokenKind};
use tracing::{debug, trace};

mod token_parsing;

/// Scans a source text into [Token]s.
///
/// Lines are 1-based and columns count characters from the start of the current line. A bad
/// character or an unterminated string is reported to the diagnostics and scanning continues.
/// The last token produced is always [TokenKind::Eof].
#[derive(Debug)]
pub struct Lexer<'s> {
    source: &'s str,
    rest: &'s str,
    line: usize,
    column: usize,
    diagnostics: Diagnostics,
    finished: bool,
}

/// The result of lexing a whole source
#[derive(Debug)]
pub struct Lexed<'s> {
    pub tokens: Vec<Token<'s>>,
    pub diagnostics: Diagnostics,
}

impl<'s> Lexer<'s> {
    /// Creates a new lexer over the given source
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            rest: source,
            line: 1,
            column: 0,
            diagnostics: Diagnostics::new(),
            finished: false,
        }
    }

    /// Lexes the entire source
    pub fn lex(mut self) -> Lexed<'s> {
        let tokens = self.by_ref().collect::<Vec<_>>();
        debug!(
            "lexed {} tokens with {} diagnostics",
            tokens.len(),
            self.diagnostics.len()
        );
        Lexed {
            tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Diagnostics recorded so far
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn next_token(&mut self) -> Option<Token<'s>> {
        loop {
            self.skip_insignificant();
            if self.rest.is_empty() {
                if self.finished {
                    return None;
                }
                self.finished = true;
                let end = self.source.len();
                return Some(Token::new(
                    TokenKind::Eof,
                    "",
                    Location::new(self.line, end, end),
                ));
            }

            let start = self.column;
            match scan_token(self.rest) {
                Ok((remaining, Scanned::Token(kind))) => {
                    let lexeme = self.take(remaining);
                    // strings keep counting columns across the lines they span
                    self.advance(lexeme, kind != TokenKind::String);
                    let token = Token::new(kind, lexeme, Location::new(self.line, start, self.column));
                    trace!(?token, "scanned");
                    return Some(token);
                }
                Ok((remaining, Scanned::UnterminatedString)) => {
                    let lexeme = self.take(remaining);
                    self.advance(lexeme, false);
                    self.diagnostics.push(
                        Diagnostic::lexical(
                            Location::new(self.line, start, self.column),
                            "unterminated string",
                        )
                        .until_eof(),
                    );
                }
                Err(_) => {
                    let rest = self.rest;
                    let bad = rest.chars().next().unwrap_or_default();
                    let (lexeme, remaining) = rest.split_at(bad.len_utf8());
                    self.rest = remaining;
                    self.advance(lexeme, true);
                    self.diagnostics.push(Diagnostic::lexical(
                        Location::new(self.line, start, self.column),
                        format!("unrecognized token in input: {bad}"),
                    ));
                }
            }
        }
    }

    /// Moves past everything that cannot start a token
    fn skip_insignificant(&mut self) {
        if let Ok((remaining, _)) = parse_insignificant(self.rest) {
            let skipped = self.take(remaining);
            self.advance(skipped, true);
        }
    }

    /// Splits off the text consumed since `remaining` was produced from the unscanned input
    fn take(&mut self, remaining: &'s str) -> &'s str {
        let rest = self.rest;
        let consumed = &rest[..rest.len() - remaining.len()];
        self.rest = remaining;
        consumed
    }

    fn advance(&mut self, text: &str, newline_resets_column: bool) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                if newline_resets_column {
                    self.column = 0;
                    continue;
                }
            }
            self.column += 1;
        }
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
