//! The containers of IR: modules, functions and basic blocks

use crate::opcode::Opcode;
use crate::types::Type;
use crate::value::{GlobalId, Value, ValueId};
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A single instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `result = opcode lhs, rhs`, covering arithmetic and comparisons
    Binary {
        result: ValueId,
        opcode: Opcode,
        lhs: Value,
        rhs: Value,
    },
    /// `result = opcode value to ty`
    Cast {
        result: ValueId,
        opcode: Opcode,
        value: Value,
        to: Type,
    },
    /// Returns from the function, terminating the block
    Ret(Option<Value>),
}

impl Instruction {
    pub fn is_terminator(&self) -> bool {
        matches!(self, Instruction::Ret(_))
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Binary {
                result,
                opcode,
                lhs,
                rhs,
            } => write!(f, "{result} = {opcode} {}, {rhs}", lhs.typed()),
            Instruction::Cast {
                result,
                opcode,
                value,
                to,
            } => write!(f, "{result} = {opcode} {} to {to}", value.typed()),
            Instruction::Ret(Some(value)) => write!(f, "ret {}", value.typed()),
            Instruction::Ret(None) => write!(f, "ret void"),
        }
    }
}

/// A straight-line sequence of instructions
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    label: String,
    instructions: Vec<Instruction>,
}

impl Block {
    pub(crate) fn new(label: String) -> Self {
        Self {
            label,
            instructions: vec![],
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Whether the last instruction of this block is a terminator
    pub fn is_terminated(&self) -> bool {
        self.instructions
            .last()
            .is_some_and(Instruction::is_terminator)
    }

    pub(crate) fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }
}

/// A function made of blocks, the first block being its entry
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    ret: Type,
    blocks: IndexMap<String, Block>,
    next_value: usize,
    returns: bool,
}

impl Function {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            ret: Type::Void,
            blocks: IndexMap::new(),
            next_value: 0,
            returns: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The return type, fixed by the first `ret` emitted into the function
    pub fn ret(&self) -> Type {
        self.ret
    }

    pub fn blocks(&self) -> &IndexMap<String, Block> {
        &self.blocks
    }

    /// Total number of instructions across all blocks
    pub fn instruction_count(&self) -> usize {
        self.blocks.values().map(|b| b.instructions.len()).sum()
    }

    /// Adds a block, suffixing the label with a number if it is already taken
    pub(crate) fn add_block(&mut self, label: &str) -> usize {
        let mut unique = label.to_string();
        let mut suffix = 1;
        while self.blocks.contains_key(&unique) {
            unique = format!("{label}{suffix}");
            suffix += 1;
        }
        let (index, _) = self.blocks.insert_full(unique.clone(), Block::new(unique));
        index
    }

    pub(crate) fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_index_mut(index).map(|(_, block)| block)
    }

    pub(crate) fn next_value(&mut self) -> ValueId {
        let id = ValueId::from(self.next_value);
        self.next_value += 1;
        id
    }

    /// Records a return of the given type, giving back the previously fixed type if it differs
    pub(crate) fn record_return(&mut self, ty: Type) -> Result<(), Type> {
        if self.returns && self.ret != ty {
            return Err(self.ret);
        }
        self.ret = ty;
        self.returns = true;
        Ok(())
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.blocks.is_empty() {
            return write!(f, "declare {} @{}()", self.ret, self.name);
        }
        writeln!(f, "define {} @{}() {{", self.ret, self.name)?;
        for block in self.blocks.values() {
            writeln!(f, "{}:", block.label)?;
            for instruction in &block.instructions {
                writeln!(f, "  {instruction}")?;
            }
        }
        write!(f, "}}")
    }
}

/// A private, NUL-terminated string constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalString {
    pub id: GlobalId,
    pub text: String,
}

impl Display for GlobalString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bytes = self.text.as_bytes();
        write!(
            f,
            "{} = private constant [{} x i8] c\"",
            self.id,
            bytes.len() + 1
        )?;
        for &byte in bytes {
            if byte.is_ascii_graphic() && byte != b'"' && byte != b'\\' || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\{byte:02X}")?;
            }
        }
        write!(f, "\\00\"")
    }
}

/// A translation unit
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    name: String,
    globals: Vec<GlobalString>,
    functions: IndexMap<String, Function>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            globals: vec![],
            functions: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn globals(&self) -> &[GlobalString] {
        &self.globals
    }

    pub fn functions(&self) -> &IndexMap<String, Function> {
        &self.functions
    }

    /// Gets a function by name
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Total number of instructions across all functions
    pub fn instruction_count(&self) -> usize {
        self.functions.values().map(Function::instruction_count).sum()
    }

    /// Renders just the instructions of this module, one per line
    pub fn listing(&self) -> String {
        self.functions
            .values()
            .flat_map(|function| function.blocks.values())
            .flat_map(|block| block.instructions.iter())
            .join("\n")
    }

    pub(crate) fn add_global(&mut self, text: String) -> GlobalId {
        let id = GlobalId::from(self.globals.len());
        self.globals.push(GlobalString { id, text });
        id
    }

    pub(crate) fn get_or_insert_function(&mut self, name: &str) -> usize {
        if let Some(index) = self.functions.get_index_of(name) {
            return index;
        }
        let (index, _) = self
            .functions
            .insert_full(name.to_string(), Function::new(name.to_string()));
        index
    }

    pub(crate) fn function_mut(&mut self, index: usize) -> Option<&mut Function> {
        self.functions.get_index_mut(index).map(|(_, function)| function)
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;
        for global in &self.globals {
            writeln!(f, "{global}")?;
        }
        for function in self.functions.values() {
            writeln!(f)?;
            writeln!(f, "{function}")?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_string_escapes() {
        let global = GlobalString {
            id: GlobalId::from(0),
            text: "say \"hi\"\n".to_string(),
        };
        assert_eq!(
            global.to_string(),
            r#"@.str.0 = private constant [10 x i8] c"say \22hi\22\0A\00""#
        );
    }

    #[test]
    fn test_duplicate_labels_are_suffixed() {
        let mut function = Function::new("f".to_string());
        function.add_block("entry");
        function.add_block("entry");
        function.add_block("entry");
        let labels = function.blocks().keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(labels, ["entry", "entry1", "entry2"]);
    }

    #[test]
    fn test_declaration_without_blocks() {
        let mut module = Module::new("m");
        module.get_or_insert_function("f");
        assert_eq!(module.to_string(), "; ModuleID = 'm'\n\ndeclare void @f()\n");
    }

    #[test]
    fn test_return_type_is_fixed_once() {
        let mut function = Function::new("f".to_string());
        assert_eq!(function.record_return(Type::I32), Ok(()));
        assert_eq!(function.record_return(Type::I32), Ok(()));
        assert_eq!(function.record_return(Type::Double), Err(Type::I32));
        assert_eq!(function.ret(), Type::I32);
    }
}
