use odyssey_tokens::TokenKind;
use std::collections::HashMap;

/// Binding strength of infix operators. Anything missing from the table does not continue an
/// expression.
#[derive(Debug, Clone)]
pub struct PrecedenceTable {
    table: HashMap<TokenKind, i32>,
}

impl PrecedenceTable {
    /// The precedence given to tokens that are not infix operators
    pub const NONE: i32 = -1;

    pub fn new() -> Self {
        let table = [
            (TokenKind::EqualEqual, 10),
            (TokenKind::BangEqual, 10),
            (TokenKind::Greater, 20),
            (TokenKind::GreaterEqual, 20),
            (TokenKind::Less, 20),
            (TokenKind::LessEqual, 20),
            (TokenKind::Plus, 30),
            (TokenKind::Minus, 30),
            (TokenKind::Star, 40),
            (TokenKind::Slash, 40),
            // only present so a stray `!` is reported instead of ending the expression
            (TokenKind::Bang, 50),
        ]
        .into_iter()
        .collect();
        Self { table }
    }

    /// Gets the precedence of a token kind
    pub fn of(&self, kind: TokenKind) -> i32 {
        self.table.get(&kind).copied().unwrap_or(Self::NONE)
    }
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let table = PrecedenceTable::new();
        assert!(table.of(TokenKind::Star) > table.of(TokenKind::Plus));
        assert!(table.of(TokenKind::Plus) > table.of(TokenKind::Less));
        assert!(table.of(TokenKind::Less) > table.of(TokenKind::EqualEqual));
        assert_eq!(table.of(TokenKind::Semicolon), PrecedenceTable::NONE);
        assert_eq!(table.of(TokenKind::RightParen), PrecedenceTable::NONE);
    }
}
