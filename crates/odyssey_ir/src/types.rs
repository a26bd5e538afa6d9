/// The type of an IR value
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Type {
    /// a single bit, the result of comparisons
    I1,
    I32,
    Double,
    /// pointer to a global
    Ptr,
    Void,
}

impl Type {
    /// Whether arithmetic is defined on this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::I32 | Type::Double)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::I1 | Type::I32)
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, Type::Double)
    }
}
