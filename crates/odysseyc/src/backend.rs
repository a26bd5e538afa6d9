//! The code generation interface lowering is written against

use odyssey_ir::{BlockRef, FunctionRef, IrBuilder, IrError, Opcode, Type, Value};
use std::fmt::{Debug, Display};

/// An arithmetic operation on two numeric operands of the same type
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// How lowering classifies a backend type
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Double,
    Bool,
    /// pointers to globals, which is how strings are represented
    Pointer,
    Void,
}

impl ValueKind {
    /// Whether arithmetic is defined on values of this kind
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Double)
    }
}

/// A code generator. Values are opaque handles only the backend interprets.
pub trait Backend {
    type Value: Copy + Debug;
    type Type: Copy + PartialEq + Display;
    type Function: Copy;
    type Block: Copy;
    type Error: std::error::Error;

    fn type_of(&self, value: Self::Value) -> Self::Type;

    fn kind_of(&self, ty: Self::Type) -> ValueKind;

    fn const_i32(&mut self, value: i32) -> Self::Value;

    fn const_double(&mut self, value: f64) -> Self::Value;

    fn const_bool(&mut self, value: bool) -> Self::Value;

    /// A pointer to a string constant
    fn global_string(&mut self, text: &str) -> Self::Value;

    /// Integer or floating arithmetic, chosen from the operand type
    fn arith(
        &mut self,
        op: ArithOp,
        lhs: Self::Value,
        rhs: Self::Value,
    ) -> Result<Self::Value, Self::Error>;

    /// Produces a boolean
    fn less_than_unsigned(
        &mut self,
        lhs: Self::Value,
        rhs: Self::Value,
    ) -> Result<Self::Value, Self::Error>;

    /// Widens a boolean to `0.0` or `1.0`
    fn bool_to_double(&mut self, value: Self::Value) -> Result<Self::Value, Self::Error>;

    fn get_or_declare_function(&mut self, name: &str) -> Self::Function;

    fn append_block(
        &mut self,
        function: Self::Function,
        label: &str,
    ) -> Result<Self::Block, Self::Error>;

    fn position_at_end(&mut self, block: Self::Block) -> Result<(), Self::Error>;

    /// Terminates the current block
    fn ret(&mut self, value: Option<Self::Value>) -> Result<(), Self::Error>;

    /// Renders everything generated so far as text
    fn render(&self) -> String;
}

impl Backend for IrBuilder {
    type Value = Value;
    type Type = Type;
    type Function = FunctionRef;
    type Block = BlockRef;
    type Error = IrError;

    fn type_of(&self, value: Value) -> Type {
        value.ty()
    }

    fn kind_of(&self, ty: Type) -> ValueKind {
        match ty {
            Type::I1 => ValueKind::Bool,
            Type::I32 => ValueKind::Int,
            Type::Double => ValueKind::Double,
            Type::Ptr => ValueKind::Pointer,
            Type::Void => ValueKind::Void,
        }
    }

    fn const_i32(&mut self, value: i32) -> Value {
        IrBuilder::const_i32(self, value)
    }

    fn const_double(&mut self, value: f64) -> Value {
        IrBuilder::const_double(self, value)
    }

    fn const_bool(&mut self, value: bool) -> Value {
        IrBuilder::const_bool(self, value)
    }

    fn global_string(&mut self, text: &str) -> Value {
        IrBuilder::global_string(self, text)
    }

    fn arith(&mut self, op: ArithOp, lhs: Value, rhs: Value) -> Result<Value, IrError> {
        let opcode = match (op, lhs.ty().is_floating()) {
            (ArithOp::Add, false) => Opcode::Add,
            (ArithOp::Sub, false) => Opcode::Sub,
            (ArithOp::Mul, false) => Opcode::Mul,
            (ArithOp::Div, false) => Opcode::SDiv,
            (ArithOp::Add, true) => Opcode::FAdd,
            (ArithOp::Sub, true) => Opcode::FSub,
            (ArithOp::Mul, true) => Opcode::FMul,
            (ArithOp::Div, true) => Opcode::FDiv,
        };
        IrBuilder::binary(self, opcode, lhs, rhs)
    }

    fn less_than_unsigned(&mut self, lhs: Value, rhs: Value) -> Result<Value, IrError> {
        IrBuilder::compare_ult(self, lhs, rhs)
    }

    fn bool_to_double(&mut self, value: Value) -> Result<Value, IrError> {
        IrBuilder::uitofp(self, value)
    }

    fn get_or_declare_function(&mut self, name: &str) -> FunctionRef {
        IrBuilder::get_or_declare_function(self, name)
    }

    fn append_block(&mut self, function: FunctionRef, label: &str) -> Result<BlockRef, IrError> {
        IrBuilder::append_block(self, function, label)
    }

    fn position_at_end(&mut self, block: BlockRef) -> Result<(), IrError> {
        IrBuilder::position_at_end(self, block)
    }

    fn ret(&mut self, value: Option<Value>) -> Result<(), IrError> {
        IrBuilder::ret(self, value)
    }

    fn render(&self) -> String {
        self.module().to_string()
    }
}
