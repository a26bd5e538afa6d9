use crate::types::Type;

/// The operation performed by a non-terminator instruction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    SDiv,
    FAdd,
    FSub,
    FMul,
    FDiv,
    /// unsigned less-than on integers
    #[strum(to_string = "icmp ult")]
    ICmpUlt,
    /// unordered less-than on floating point values
    #[strum(to_string = "fcmp ult")]
    FCmpUlt,
    /// unsigned integer to floating point
    UiToFp,
}

impl Opcode {
    /// The type both operands of this binary opcode must have, `None` for casts
    pub fn operand_type(&self) -> Option<Type> {
        match self {
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::SDiv | Opcode::ICmpUlt => {
                Some(Type::I32)
            }
            Opcode::FAdd | Opcode::FSub | Opcode::FMul | Opcode::FDiv | Opcode::FCmpUlt => {
                Some(Type::Double)
            }
            Opcode::UiToFp => None,
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, Opcode::ICmpUlt | Opcode::FCmpUlt)
    }

    pub fn is_cast(&self) -> bool {
        matches!(self, Opcode::UiToFp)
    }

    /// The type of the value produced from operands of type `operand`
    pub fn result_type(&self, operand: Type) -> Type {
        if self.is_comparison() {
            Type::I1
        } else if self.is_cast() {
            Type::Double
        } else {
            operand
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        let names = Opcode::iter().map(|o| o.to_string()).collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "add", "sub", "mul", "sdiv", "fadd", "fsub", "fmul", "fdiv", "icmp ult",
                "fcmp ult", "uitofp"
            ]
        );
    }

    #[test]
    fn test_result_types() {
        assert_eq!(Opcode::Add.result_type(Type::I32), Type::I32);
        assert_eq!(Opcode::FCmpUlt.result_type(Type::Double), Type::I1);
        assert_eq!(Opcode::UiToFp.result_type(Type::I1), Type::Double);
    }
}
