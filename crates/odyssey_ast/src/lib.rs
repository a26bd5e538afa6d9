//! The abstract syntax tree produced by the parser and consumed by lowering.
//!
//! Both hierarchies are closed: [Expr] and [Stmt] are plain enums, and every consumer walks them
//! with an exhaustive `match`. A node owns its children outright.

pub mod expr;
pub mod stmt;
pub mod visitor;

pub use expr::{BinaryExpr, Expr, GroupingExpr, Literal, LiteralExpr, UnaryExpr, VariableExpr};
pub use stmt::{ExpressionStmt, Stmt, VariableStmt};
pub use visitor::Visitor;
