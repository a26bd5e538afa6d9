//! Expression nodes

use derive_more::From;
use odyssey_tokens::{Located, Location, TokenKind};
use std::fmt::{Display, Formatter};

/// A literal of some primitive kind
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr<T> {
    pub value: T,
    pub location: Location,
}

impl<T> LiteralExpr<T> {
    pub fn new(value: T, location: Location) -> Self {
        Self { value, location }
    }
}

/// A primitive literal value, independent of its location
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    Double(f64),
    Bool(bool),
    String(String),
}

/// A reference to a named variable
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: String,
    pub location: Location,
}

/// A prefix operator applied to an operand
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: TokenKind,
    pub operand: Box<Expr>,
    pub location: Location,
}

/// An infix operator applied to two operands
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: TokenKind,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub location: Location,
}

/// A parenthesized expression
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub inner: Box<Expr>,
    pub location: Location,
}

/// An expression
#[derive(Debug, Clone, PartialEq, From)]
pub enum Expr {
    Int(LiteralExpr<i32>),
    Double(LiteralExpr<f64>),
    Bool(LiteralExpr<bool>),
    String(LiteralExpr<String>),
    Variable(VariableExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Grouping(GroupingExpr),
}

impl Expr {
    pub fn int(value: i32, location: Location) -> Self {
        Self::Int(LiteralExpr::new(value, location))
    }

    pub fn double(value: f64, location: Location) -> Self {
        Self::Double(LiteralExpr::new(value, location))
    }

    pub fn bool(value: bool, location: Location) -> Self {
        Self::Bool(LiteralExpr::new(value, location))
    }

    pub fn string(value: impl Into<String>, location: Location) -> Self {
        Self::String(LiteralExpr::new(value.into(), location))
    }

    pub fn variable(name: impl Into<String>, location: Location) -> Self {
        Self::Variable(VariableExpr {
            name: name.into(),
            location,
        })
    }

    pub fn unary(op: TokenKind, operand: Expr, location: Location) -> Self {
        Self::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            location,
        })
    }

    pub fn binary(op: TokenKind, left: Expr, right: Expr, location: Location) -> Self {
        Self::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        })
    }

    pub fn grouping(inner: Expr, location: Location) -> Self {
        Self::Grouping(GroupingExpr {
            inner: Box::new(inner),
            location,
        })
    }

    /// Gets the literal value of this expression, if it is a literal
    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Expr::Int(i) => Some(Literal::Int(i.value)),
            Expr::Double(d) => Some(Literal::Double(d.value)),
            Expr::Bool(b) => Some(Literal::Bool(b.value)),
            Expr::String(s) => Some(Literal::String(s.value.clone())),
            Expr::Variable(_) | Expr::Unary(_) | Expr::Binary(_) | Expr::Grouping(_) => None,
        }
    }
}

impl Located for Expr {
    fn location(&self) -> Location {
        match self {
            Expr::Int(e) => e.location,
            Expr::Double(e) => e.location,
            Expr::Bool(e) => e.location,
            Expr::String(e) => e.location,
            Expr::Variable(e) => e.location,
            Expr::Unary(e) => e.location,
            Expr::Binary(e) => e.location,
            Expr::Grouping(e) => e.location,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Int(i) => write!(f, "{}", i.value),
            Expr::Double(d) => write!(f, "{:?}", d.value),
            Expr::Bool(b) => write!(f, "{}", b.value),
            Expr::String(s) => write!(f, "{:?}", s.value),
            Expr::Variable(v) => write!(f, "{}", v.name),
            Expr::Unary(u) => write!(f, "({} {})", u.op, u.operand),
            Expr::Binary(b) => write!(f, "({} {} {})", b.op, b.left, b.right),
            Expr::Grouping(g) => write!(f, "(group {})", g.inner),
        }
    }
}
