//! Statement nodes

use crate::expr::Expr;
use derive_more::From;
use odyssey_tokens::{Located, Location};
use std::fmt::{Display, Formatter};

/// An expression evaluated for its value
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expr: Expr,
    pub location: Location,
}

/// `let name [= initializer]`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableStmt {
    pub name: String,
    pub initializer: Option<Box<Stmt>>,
    pub location: Location,
}

/// A statement
#[derive(Debug, Clone, PartialEq, From)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Variable(VariableStmt),
}

impl Stmt {
    pub fn expression(expr: Expr, location: Location) -> Self {
        Self::Expression(ExpressionStmt { expr, location })
    }

    pub fn variable(name: impl Into<String>, initializer: Option<Stmt>, location: Location) -> Self {
        Self::Variable(VariableStmt {
            name: name.into(),
            initializer: initializer.map(Box::new),
            location,
        })
    }
}

impl Located for Stmt {
    fn location(&self) -> Location {
        match self {
            Stmt::Expression(s) => s.location,
            Stmt::Variable(s) => s.location,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Expression(s) => write!(f, "{}", s.expr),
            Stmt::Variable(VariableStmt {
                name,
                initializer: Some(init),
                ..
            }) => write!(f, "(let {name} {init})"),
            Stmt::Variable(VariableStmt { name, .. }) => write!(f, "(let {name})"),
        }
    }
}
