//! Incremental construction of a [Module]

use crate::error::{IrError, IrResult};
use crate::module::{Block, Function, Instruction, Module};
use crate::opcode::Opcode;
use crate::types::Type;
use crate::value::{Value, ValueId};
use tracing::trace;

/// A handle to a function of the module being built
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FunctionRef(usize);

/// A handle to a block of a function of the module being built
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BlockRef {
    function: usize,
    block: usize,
}

impl BlockRef {
    pub fn function(&self) -> FunctionRef {
        FunctionRef(self.function)
    }
}

/// Builds a module one instruction at a time.
///
/// Instructions are appended to the end of the block the builder is positioned at. Every
/// instruction is type checked as it is added.
#[derive(Debug)]
pub struct IrBuilder {
    module: Module,
    insertion: Option<BlockRef>,
}

impl IrBuilder {
    /// Creates a new builder for an empty module
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module: Module::new(module_name),
            insertion: None,
        }
    }

    pub fn const_i32(&self, value: i32) -> Value {
        Value::ConstI32(value)
    }

    pub fn const_double(&self, value: f64) -> Value {
        Value::ConstDouble(value)
    }

    pub fn const_bool(&self, value: bool) -> Value {
        Value::ConstBool(value)
    }

    /// Adds a private string constant to the module, returning a pointer to it
    pub fn global_string(&mut self, text: impl Into<String>) -> Value {
        let id = self.module.add_global(text.into());
        trace!(%id, "added global string");
        Value::Global(id)
    }

    /// Emits a binary instruction. Both operands must have the type the opcode works on.
    pub fn binary(&mut self, opcode: Opcode, lhs: Value, rhs: Value) -> IrResult<Value> {
        let Some(expected) = opcode.operand_type() else {
            return Err(IrError::IllegalOperand {
                opcode,
                ty: lhs.ty(),
            });
        };
        if lhs.ty() != rhs.ty() {
            return Err(IrError::OperandMismatch {
                opcode,
                lhs: lhs.ty(),
                rhs: rhs.ty(),
            });
        }
        if lhs.ty() != expected {
            return Err(IrError::IllegalOperand {
                opcode,
                ty: lhs.ty(),
            });
        }
        let ty = opcode.result_type(expected);
        self.emit(ty, |result| Instruction::Binary {
            result,
            opcode,
            lhs,
            rhs,
        })
    }

    /// Emits an unsigned less-than comparison, choosing the integer or floating form from the
    /// operand type
    pub fn compare_ult(&mut self, lhs: Value, rhs: Value) -> IrResult<Value> {
        let opcode = if lhs.ty().is_floating() {
            Opcode::FCmpUlt
        } else {
            Opcode::ICmpUlt
        };
        self.binary(opcode, lhs, rhs)
    }

    /// Converts an unsigned integer (including a comparison result) to a double
    pub fn uitofp(&mut self, value: Value) -> IrResult<Value> {
        if !value.ty().is_integer() {
            return Err(IrError::IllegalOperand {
                opcode: Opcode::UiToFp,
                ty: value.ty(),
            });
        }
        self.emit(Type::Double, |result| Instruction::Cast {
            result,
            opcode: Opcode::UiToFp,
            value,
            to: Type::Double,
        })
    }

    /// Gets a function by name, declaring it if it does not exist yet
    pub fn get_or_declare_function(&mut self, name: &str) -> FunctionRef {
        FunctionRef(self.module.get_or_insert_function(name))
    }

    /// Appends a new, empty block to the end of a function
    pub fn append_block(&mut self, function: FunctionRef, label: &str) -> IrResult<BlockRef> {
        let block = self
            .module
            .function_mut(function.0)
            .ok_or(IrError::UnknownFunction(function.0))?
            .add_block(label);
        Ok(BlockRef {
            function: function.0,
            block,
        })
    }

    /// Makes new instructions go to the end of the given block
    pub fn position_at_end(&mut self, block: BlockRef) -> IrResult {
        self.resolve(block)?;
        self.insertion = Some(block);
        Ok(())
    }

    /// Terminates the current block with a return. The first return fixes the function's
    /// return type.
    pub fn ret(&mut self, value: Option<Value>) -> IrResult {
        let ty = value.map_or(Type::Void, |v| v.ty());
        let (function, at) = self.insertion_point()?;
        function
            .record_return(ty)
            .map_err(|expected| IrError::ReturnTypeMismatch(function.name().to_string(), expected, ty))?;
        let instruction = Instruction::Ret(value);
        trace!(%instruction, "emitted");
        function
            .block_mut(at.block)
            .ok_or(IrError::UnknownBlock(at.function, at.block))?
            .push(instruction);
        Ok(())
    }

    /// The module built so far
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Finishes building, giving back the module
    pub fn finish(self) -> Module {
        self.module
    }

    fn emit(
        &mut self,
        ty: Type,
        instruction: impl FnOnce(ValueId) -> Instruction,
    ) -> IrResult<Value> {
        let (function, at) = self.insertion_point()?;
        let result = function.next_value();
        let instruction = instruction(result);
        trace!(%instruction, "emitted");
        function
            .block_mut(at.block)
            .ok_or(IrError::UnknownBlock(at.function, at.block))?
            .push(instruction);
        Ok(Value::Instruction(result, ty))
    }

    /// The function and block index instructions are appended to, failing if the block is
    /// already terminated
    fn insertion_point(&mut self) -> IrResult<(&mut Function, BlockRef)> {
        let at = self.insertion.ok_or(IrError::NoInsertionPoint)?;
        let block = self.resolve(at)?;
        if block.is_terminated() {
            return Err(IrError::BlockTerminated(block.label().to_string()));
        }
        let function = self
            .module
            .function_mut(at.function)
            .ok_or(IrError::UnknownFunction(at.function))?;
        Ok((function, at))
    }

    fn resolve(&mut self, at: BlockRef) -> IrResult<&mut Block> {
        self.module
            .function_mut(at.function)
            .ok_or(IrError::UnknownFunction(at.function))?
            .block_mut(at.block)
            .ok_or(IrError::UnknownBlock(at.function, at.block))
    }
}
