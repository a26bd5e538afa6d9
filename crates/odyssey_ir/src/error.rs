use crate::opcode::Opcode;
use crate::types::Type;
use thiserror::Error;

/// Misuse of the [IrBuilder](crate::IrBuilder)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("no insertion point, position the builder at a block first")]
    NoInsertionPoint,
    #[error("block {0:?} already ends in a terminator")]
    BlockTerminated(String),
    #[error("operands of {opcode} must have the same type, got {lhs} and {rhs}")]
    OperandMismatch { opcode: Opcode, lhs: Type, rhs: Type },
    #[error("{opcode} does not accept operands of type {ty}")]
    IllegalOperand { opcode: Opcode, ty: Type },
    #[error("function {0:?} returns {1} but a return of {2} was emitted")]
    ReturnTypeMismatch(String, Type, Type),
    #[error("no function with index {0}")]
    UnknownFunction(usize),
    #[error("no block with index {1} in function with index {0}")]
    UnknownBlock(usize, usize),
}

pub type IrResult<T = ()> = Result<T, IrError>;
