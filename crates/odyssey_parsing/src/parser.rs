//! Turns a token stream into a syntax tree.
//!
//! Expressions are parsed by precedence climbing over a [PrecedenceTable]. A program is a
//! sequence of `let` declarations:
//!
//! ```text
//! program     := declaration* EOF
//! declaration := "let" IDENT ( "=" statement | ";"? )
//! statement   := expression ";"
//! expression  := unary ( BINOP unary )*
//! unary       := ( "+" | "-" | "*" | "/" | "<" ) unary | primary
//! primary     := INT | DOUBLE | STRING | "true" | "false" | IDENT | "(" expression ")"
//! ```

use odyssey_ast::{Expr, Stmt};
use odyssey_tokens::{Diagnostic, Diagnostics, Located, Location, Token, TokenKind};
use tracing::{debug, trace};

mod precedence;

pub use precedence::PrecedenceTable;

/// Operators that may prefix an operand
const PREFIX_OPERATORS: &[TokenKind] = &[
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Less,
];

/// How deeply groupings and prefix operators may nest before parsing gives up
pub const MAX_NESTING: usize = 256;

/// Parses tokens into statements, reporting problems as [Diagnostic]s
///
/// Nesting of parentheses and prefix operators is capped at [MAX_NESTING], so deeply nested input
/// is reported as a diagnostic rather than exhausting the stack.
#[derive(Debug)]
pub struct Parser<'s> {
    tokens: Vec<Token<'s>>,
    current: usize,
    precedence: PrecedenceTable,
    diagnostics: Diagnostics,
    recover: bool,
    depth: usize,
}

impl<'s> Parser<'s> {
    /// Creates a new parser. An end of file token is appended if the tokens lack one.
    pub fn new(mut tokens: Vec<Token<'s>>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let location = tokens.last().map(|t| t.location()).unwrap_or_default();
            let end = Location::new(location.line, location.end, location.end);
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }
        Self {
            tokens,
            current: 0,
            precedence: PrecedenceTable::new(),
            diagnostics: Diagnostics::new(),
            recover: false,
            depth: 0,
        }
    }

    /// When enabled, a failed declaration is skipped up to the next `;` or `let` and parsing
    /// goes on, instead of stopping.
    pub fn with_recovery(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    /// Parses a whole program.
    ///
    /// Returns `None` as soon as a declaration fails, unless recovery is enabled, in which case
    /// the declarations that did parse are returned. Either way every problem is recorded in
    /// [diagnostics](Self::diagnostics).
    pub fn parse(&mut self) -> Option<Vec<Stmt>> {
        let mut statements = vec![];
        while !self.at_eof() {
            match self.declaration() {
                Some(stmt) => {
                    trace!(%stmt, "parsed declaration");
                    statements.push(stmt);
                }
                None if self.recover => self.synchronize(),
                None => {
                    debug!("parsing stopped after {} declarations", statements.len());
                    return None;
                }
            }
        }
        Some(statements)
    }

    /// Parses a single expression from the current position
    pub fn parse_expression(&mut self) -> Option<Expr> {
        self.expression()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    fn declaration(&mut self) -> Option<Stmt> {
        if self.matches(&[TokenKind::Let]) {
            return self.var_declaration();
        }
        self.report_error("unbound expression");
        None
    }

    fn var_declaration(&mut self) -> Option<Stmt> {
        let keyword = self.previous();
        let name = self.consume(
            TokenKind::Identifier,
            "expected an identifier representing the name of the variable",
        );
        if name.is(TokenKind::Error) {
            return None;
        }

        let initializer = if self.matches(&[TokenKind::Equal]) {
            let Some(initializer) = self.statement() else {
                self.report_error("expected expression following '=' after variable name");
                return None;
            };
            Some(initializer)
        } else {
            self.matches(&[TokenKind::Semicolon]);
            None
        };

        let location = keyword.location().join(name.location());
        Some(Stmt::variable(name.lexeme(), initializer, location))
    }

    fn statement(&mut self) -> Option<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "expect ';' to terminate expression");
        let location = expr.location();
        Some(Stmt::expression(expr, location))
    }

    fn expression(&mut self) -> Option<Expr> {
        let lhs = self.unary()?;
        self.binary(0, lhs)
    }

    /// Folds infix operators binding at least as tightly as `min_precedence` onto `lhs`
    fn binary(&mut self, min_precedence: i32, mut lhs: Expr) -> Option<Expr> {
        loop {
            let precedence = self.precedence.of(self.peek().kind());
            if precedence < min_precedence {
                return Some(lhs);
            }
            let op = self.advance();
            if op.is(TokenKind::Bang) {
                self.report_error_at(op, "illegal use of '!' as a binary operator");
            }

            let mut rhs = self.unary()?;
            if precedence < self.precedence.of(self.peek().kind()) {
                rhs = self.binary(precedence + 1, rhs)?;
            }
            let location = lhs.location().join(rhs.location());
            lhs = Expr::binary(op.kind(), lhs, rhs, location);
        }
    }

    fn unary(&mut self) -> Option<Expr> {
        if self.matches(PREFIX_OPERATORS) {
            let op = self.previous();
            let operand = self.nested(Self::unary)?;
            let location = op.location().join(operand.location());
            return Some(Expr::unary(op.kind(), operand, location));
        }
        if self.check(TokenKind::RightParen) {
            self.report_error("stray ')' in source");
            return None;
        }
        self.primary()
    }

    fn primary(&mut self) -> Option<Expr> {
        let token = self.peek();
        let location = token.location();
        let expr = match token.kind() {
            TokenKind::True | TokenKind::False => Expr::bool(token.is(TokenKind::True), location),
            TokenKind::Int => match token.lexeme().parse::<i32>() {
                Ok(value) => Expr::int(value, location),
                Err(_) => {
                    self.report_error_at(
                        token,
                        format!("integer literal '{}' does not fit in 32 bits", token.lexeme()),
                    );
                    return None;
                }
            },
            TokenKind::Double => match token.lexeme().parse::<f64>() {
                Ok(value) if value.is_finite() => Expr::double(value, location),
                Ok(_) => {
                    self.report_error_at(
                        token,
                        format!("double literal '{}' is out of range", token.lexeme()),
                    );
                    return None;
                }
                Err(_) => {
                    self.report_error_at(
                        token,
                        format!("malformed double literal '{}'", token.lexeme()),
                    );
                    return None;
                }
            },
            TokenKind::String => {
                let text = token.lexeme();
                let unquoted = text
                    .strip_prefix('"')
                    .and_then(|t| t.strip_suffix('"'))
                    .unwrap_or(text);
                Expr::string(unquoted, location)
            }
            TokenKind::Identifier => Expr::variable(token.lexeme(), location),
            TokenKind::LeftParen => return self.grouping(),
            TokenKind::Eof => {
                self.report_error("unexpected end of file, expected expression");
                return None;
            }
            _ => {
                self.report_error(format!(
                    "unexpected symbol '{}', expected expression",
                    token.lexeme()
                ));
                return None;
            }
        };
        self.advance();
        Some(expr)
    }

    fn grouping(&mut self) -> Option<Expr> {
        let open = self.advance();
        let Some(inner) = self.nested(Self::expression) else {
            self.report_error("expected expression inside parentheses");
            return None;
        };
        self.consume(TokenKind::RightParen, "expect ')' after expression");
        let location = open.location().join(self.previous().location());
        Some(Expr::grouping(inner, location))
    }

    /// Runs `parse` one nesting level deeper, failing once [MAX_NESTING] is exceeded
    fn nested(&mut self, parse: fn(&mut Self) -> Option<Expr>) -> Option<Expr> {
        if self.depth >= MAX_NESTING {
            self.report_error(format!("expression nests deeper than {MAX_NESTING} levels"));
            return None;
        }
        self.depth += 1;
        let expr = parse(self);
        self.depth -= 1;
        expr
    }

    /// Skips past the rest of a failed declaration. Always moves forward at least one token.
    fn synchronize(&mut self) {
        while !self.at_eof() {
            if self.advance().is(TokenKind::Semicolon) || self.check(TokenKind::Let) {
                return;
            }
        }
    }

    fn consume(&mut self, expected: TokenKind, message: &str) -> Token<'s> {
        if self.check(expected) {
            return self.advance();
        }
        self.report_error(message);
        Token::error()
    }

    fn report_error(&mut self, message: impl Into<String>) {
        let at = if self.at_eof() {
            self.previous()
        } else {
            self.peek()
        };
        self.report_error_at(at, message);
    }

    fn report_error_at(&mut self, token: Token<'s>, message: impl Into<String>) {
        let diagnostic = Diagnostic::syntactic(token, message);
        debug!(%diagnostic, "syntax error");
        self.diagnostics.push(diagnostic);
    }

    fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    fn at_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    fn advance(&mut self) -> Token<'s> {
        let token = self.peek();
        if !self.at_eof() {
            self.current += 1;
        }
        token
    }

    fn peek(&self) -> Token<'s> {
        self.tokens[self.current]
    }

    fn previous(&self) -> Token<'s> {
        self.tokens[self.current.saturating_sub(1)]
    }
}
