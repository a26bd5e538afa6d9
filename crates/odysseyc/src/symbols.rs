use std::collections::HashMap;

/// A flat map from variable name to the value it was last given.
///
/// There is no scoping. Declaring a name again replaces the previous binding. A name declared
/// without a value is bound to `None`.
#[derive(Debug, Clone)]
pub struct SymbolTable<V> {
    table: HashMap<String, Option<V>>,
}

impl<V: Copy> SymbolTable<V> {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Binds a name, returning the previous binding if there was one
    pub fn bind(&mut self, name: impl Into<String>, value: Option<V>) -> Option<Option<V>> {
        self.table.insert(name.into(), value)
    }

    /// Gets the value of a name, `None` if the name is unbound or was never given a value
    pub fn lookup(&self, name: &str) -> Option<V> {
        self.table.get(name).copied().flatten()
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<V: Copy> Default for SymbolTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeclaration_overwrites() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.bind("x", Some(1)), None);
        assert_eq!(symbols.bind("x", Some(2)), Some(Some(1)));
        assert_eq!(symbols.lookup("x"), Some(2));
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn test_declared_without_value() {
        let mut symbols = SymbolTable::<i32>::new();
        symbols.bind("y", None);
        assert!(symbols.is_declared("y"));
        assert_eq!(symbols.lookup("y"), None);
        assert!(!symbols.is_declared("z"));
    }
}
