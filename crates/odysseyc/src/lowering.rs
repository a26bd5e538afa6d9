//! Lowering of the syntax tree into backend values.
//!
//! Lowering is best effort. A node that cannot be lowered is reported as a semantic
//! [Diagnostic] and yields no value, and the pass moves on to the next node.

use crate::backend::{ArithOp, Backend, ValueKind};
use crate::symbols::SymbolTable;
use odyssey_ast::{BinaryExpr, Expr, Stmt, UnaryExpr, Visitor};
use odyssey_tokens::{Diagnostic, Diagnostics, Located, Location, TokenKind};
use tracing::{debug, debug_span, trace};

/// Lowers statements and expressions through a [Backend], binding variables as it goes
pub struct Lowering<'b, B: Backend> {
    backend: &'b mut B,
    symbols: SymbolTable<B::Value>,
    diagnostics: Diagnostics,
    had_error: bool,
}

impl<'b, B: Backend> Lowering<'b, B> {
    /// Creates a lowering pass with an empty symbol table
    pub fn new(backend: &'b mut B) -> Self {
        Self {
            backend,
            symbols: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
            had_error: false,
        }
    }

    /// Lowers every statement in order, giving back the value of the last one that produced
    /// a value
    pub fn lower_program(&mut self, program: &[Stmt]) -> Option<B::Value> {
        let _span = debug_span!("lower", statements = program.len()).entered();
        program
            .iter()
            .fold(None, |last, stmt| self.lower_stmt(stmt).or(last))
    }

    pub fn lower_stmt(&mut self, stmt: &Stmt) -> Option<B::Value> {
        trace!(%stmt, "lowering statement");
        stmt.accept(self)
    }

    pub fn lower_expr(&mut self, expr: &Expr) -> Option<B::Value> {
        expr.accept(self)
    }

    /// Whether any node failed to lower
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn symbols(&self) -> &SymbolTable<B::Value> {
        &self.symbols
    }

    /// Ends the pass, giving back what it recorded
    pub fn into_parts(self) -> (Diagnostics, SymbolTable<B::Value>) {
        (self.diagnostics, self.symbols)
    }

    fn kind(&self, value: B::Value) -> ValueKind {
        self.backend.kind_of(self.backend.type_of(value))
    }

    fn unary(&mut self, unary: &UnaryExpr) -> Option<B::Value> {
        let operand = self.lower_expr(&unary.operand)?;
        let kind = self.kind(operand);
        if !kind.is_numeric() {
            self.report(unary.location, "illegal operand for unary minus");
            return None;
        }
        if unary.op != TokenKind::Minus {
            return Some(operand);
        }
        let zero = match kind {
            ValueKind::Double => self.backend.const_double(0.0),
            _ => self.backend.const_i32(0),
        };
        let negated = self.backend.arith(ArithOp::Sub, zero, operand);
        self.accept_backend(unary.location, negated)
    }

    fn binary(&mut self, binary: &BinaryExpr) -> Option<B::Value> {
        let lhs = self.lower_expr(&binary.left);
        let rhs = self.lower_expr(&binary.right);
        let (Some(lhs), Some(rhs)) = (lhs, rhs) else {
            self.report(
                binary.location,
                "could not resolve left and right hand sides in binary expression",
            );
            return None;
        };

        let ty = self.backend.type_of(lhs);
        if ty != self.backend.type_of(rhs) {
            self.report(
                binary.location,
                "arguments of different types provided to binary expression; implicit casts not allowed",
            );
            return None;
        }
        if !self.backend.kind_of(ty).is_numeric() {
            self.report(
                binary.location,
                "non-numerical operands not allowed in binary expressions",
            );
            return None;
        }

        let op = match binary.op {
            TokenKind::Plus => ArithOp::Add,
            TokenKind::Minus => ArithOp::Sub,
            TokenKind::Star => ArithOp::Mul,
            TokenKind::Slash => ArithOp::Div,
            TokenKind::Less => {
                // comparisons are widened so they can take part in arithmetic
                let compared = self.backend.less_than_unsigned(lhs, rhs);
                let compared = self.accept_backend(binary.location, compared)?;
                let widened = self.backend.bool_to_double(compared);
                return self.accept_backend(binary.location, widened);
            }
            other => {
                self.report(
                    binary.location,
                    format!("operator '{other}' is not implemented for operands of type {ty}"),
                );
                return None;
            }
        };
        let result = self.backend.arith(op, lhs, rhs);
        self.accept_backend(binary.location, result)
    }

    fn accept_backend(
        &mut self,
        location: Location,
        result: Result<B::Value, B::Error>,
    ) -> Option<B::Value> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.report(location, format!("backend rejected instruction: {error}"));
                None
            }
        }
    }

    fn report(&mut self, location: Location, message: impl Into<String>) {
        let diagnostic = Diagnostic::semantic(location, message);
        debug!(%diagnostic, "could not lower");
        self.diagnostics.push(diagnostic);
        self.had_error = true;
    }
}

impl<B: Backend> Visitor for Lowering<'_, B> {
    type Output = Option<B::Value>;

    fn visit_expr(&mut self, expr: &Expr) -> Self::Output {
        match expr {
            Expr::Int(int) => Some(self.backend.const_i32(int.value)),
            Expr::Double(double) => Some(self.backend.const_double(double.value)),
            Expr::Bool(boolean) => Some(self.backend.const_bool(boolean.value)),
            Expr::String(string) => Some(self.backend.global_string(&string.value)),
            Expr::Variable(variable) => {
                let value = self.symbols.lookup(&variable.name);
                if value.is_none() {
                    self.report(
                        variable.location,
                        "variable not given a value, but used in expression",
                    );
                }
                value
            }
            Expr::Unary(unary) => self.unary(unary),
            Expr::Binary(binary) => self.binary(binary),
            Expr::Grouping(grouping) => self.lower_expr(&grouping.inner),
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Self::Output {
        match stmt {
            Stmt::Expression(statement) => {
                let value = self.lower_expr(&statement.expr);
                if value.is_none() {
                    self.report(statement.expr.location(), "illegal expression");
                }
                value
            }
            Stmt::Variable(declaration) => {
                let value = declaration
                    .initializer
                    .as_deref()
                    .and_then(|initializer| self.lower_stmt(initializer));
                self.symbols.bind(declaration.name.as_str(), value);
                value
            }
        }
    }
}
