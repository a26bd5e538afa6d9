//! An SSA-flavoured intermediate representation, modelled after LLVM's textual IR.
//!
//! Modules are built through an [IrBuilder], which validates every instruction as it is
//! emitted, and rendered with [Display](std::fmt::Display).

pub mod builder;
pub mod error;
pub mod module;
pub mod opcode;
pub mod types;
pub mod value;

pub use builder::{BlockRef, FunctionRef, IrBuilder};
pub use error::{IrError, IrResult};
pub use module::{Block, Function, GlobalString, Instruction, Module};
pub use opcode::Opcode;
pub use types::Type;
pub use value::{GlobalId, Value, ValueId};
