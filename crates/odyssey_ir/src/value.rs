use crate::types::Type;
use derive_more::{Display, From};
use std::fmt::{Display as FmtDisplay, Formatter};

/// Names the result of an instruction within its function
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, From)]
#[display(fmt = "%{}", _0)]
pub struct ValueId(usize);

/// Names a global string constant within its module
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, From)]
#[display(fmt = "@.str.{}", _0)]
pub struct GlobalId(usize);

/// A typed operand. Constants are operands and never instructions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Value {
    ConstI32(i32),
    ConstDouble(f64),
    ConstBool(bool),
    /// A pointer to a global string
    Global(GlobalId),
    /// The result of an instruction
    Instruction(ValueId, Type),
}

impl Value {
    /// Gets the type of this value
    pub fn ty(&self) -> Type {
        match self {
            Value::ConstI32(_) => Type::I32,
            Value::ConstDouble(_) => Type::Double,
            Value::ConstBool(_) => Type::I1,
            Value::Global(_) => Type::Ptr,
            Value::Instruction(_, ty) => *ty,
        }
    }

    /// Displays this value prefixed by its type, as in `i32 %0`
    pub fn typed(&self) -> Typed<'_> {
        Typed(self)
    }
}

impl FmtDisplay for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::ConstI32(i) => write!(f, "{i}"),
            Value::ConstDouble(d) if d.is_finite() => write!(f, "{d:?}"),
            // infinities and NaN only have a hex spelling
            Value::ConstDouble(d) => write!(f, "0x{:016X}", d.to_bits()),
            Value::ConstBool(b) => write!(f, "{b}"),
            Value::Global(id) => write!(f, "{id}"),
            Value::Instruction(id, _) => write!(f, "{id}"),
        }
    }
}

/// See [Value::typed]
pub struct Typed<'a>(&'a Value);

impl FmtDisplay for Typed<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0.ty(), self.0)
    }
}
