//! Dispatch of AST nodes to a pass

use crate::expr::Expr;
use crate::stmt::Stmt;

/// A pass over the syntax tree.
///
/// Implementors match exhaustively over [Expr] and [Stmt], so adding a node kind is a compile
/// error in every pass until it is handled.
pub trait Visitor {
    type Output;

    fn visit_expr(&mut self, expr: &Expr) -> Self::Output;

    fn visit_stmt(&mut self, stmt: &Stmt) -> Self::Output;
}

impl Expr {
    /// Accepts a pass, producing whatever it produces for this node
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_expr(self)
    }
}

impl Stmt {
    /// Accepts a pass, producing whatever it produces for this node
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_stmt(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odyssey_tokens::{Location, TokenKind};

    /// Counts every node it sees
    struct NodeCounter;

    impl Visitor for NodeCounter {
        type Output = usize;

        fn visit_expr(&mut self, expr: &Expr) -> usize {
            1 + match expr {
                Expr::Int(_) | Expr::Double(_) | Expr::Bool(_) | Expr::String(_) | Expr::Variable(_) => 0,
                Expr::Unary(u) => u.operand.accept(self),
                Expr::Binary(b) => b.left.accept(self) + b.right.accept(self),
                Expr::Grouping(g) => g.inner.accept(self),
            }
        }

        fn visit_stmt(&mut self, stmt: &Stmt) -> usize {
            1 + match stmt {
                Stmt::Expression(e) => e.expr.accept(self),
                Stmt::Variable(v) => v.initializer.as_ref().map_or(0, |init| init.accept(self)),
            }
        }
    }

    #[test]
    fn test_accept_walks_children() {
        let loc = Location::default();
        let expr = Expr::binary(
            TokenKind::Star,
            Expr::int(2, loc),
            Expr::grouping(Expr::variable("x", loc), loc),
            loc,
        );
        let stmt = Stmt::variable("y", Some(Stmt::expression(expr, loc)), loc);
        assert_eq!(stmt.accept(&mut NodeCounter), 6);
    }
}
