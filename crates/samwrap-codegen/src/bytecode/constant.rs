//! Symbolic constant pool.
//!
//! Generated code never embeds names directly; operands index into a pool of
//! class, field and method references owned by the class (or file) being
//! emitted.

use std::fmt;

use rustc_hash::FxHashMap;

/// Number of entries a 16-bit operand can address.
pub const MAX_CONSTANTS: usize = u16::MAX as usize + 1;

/// A symbolic reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// Internal class name.
    Class(String),
    Field {
        owner: String,
        name: String,
        descriptor: String,
    },
    Method {
        owner: String,
        name: String,
        descriptor: String,
    },
}

impl Constant {
    pub fn class(name: impl Into<String>) -> Self {
        Constant::Class(name.into())
    }

    pub fn field(owner: impl Into<String>, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Constant::Field {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn method(owner: impl Into<String>, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Constant::Method {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Class(name) => write!(f, "class {name}"),
            Constant::Field {
                owner,
                name,
                descriptor,
            } => write!(f, "field {owner}.{name}:{descriptor}"),
            Constant::Method {
                owner,
                name,
                descriptor,
            } => write!(f, "method {owner}.{name}{descriptor}"),
        }
    }
}

/// Constant pool with deduplication.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    constants: Vec<Constant>,
    index: FxHashMap<Constant, u16>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constant, or return the index of an identical one.
    ///
    /// Returns `None` once the pool is full.
    pub fn add(&mut self, constant: Constant) -> Option<u16> {
        if let Some(&idx) = self.index.get(&constant) {
            return Some(idx);
        }
        let idx = u16::try_from(self.constants.len()).ok()?;
        self.constants.push(constant.clone());
        self.index.insert(constant, idx);
        Some(idx)
    }

    pub fn get(&self, index: u16) -> Option<&Constant> {
        self.constants.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constant> {
        self.constants.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates() {
        let mut pool = ConstantPool::new();
        let a = pool.add(Constant::class("A")).unwrap();
        let b = pool.add(Constant::class("B")).unwrap();
        let a_again = pool.add(Constant::class("A")).unwrap();
        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn lookup_by_index() {
        let mut pool = ConstantPool::new();
        let idx = pool
            .add(Constant::method("Fn", "invoke", "()Object"))
            .unwrap();
        assert_eq!(pool.get(idx).unwrap().to_string(), "method Fn.invoke()Object");
        assert!(pool.get(idx + 1).is_none());
    }

    #[test]
    fn field_and_method_with_same_name_are_distinct() {
        let mut pool = ConstantPool::new();
        let field = pool.add(Constant::field("A", "f", "T")).unwrap();
        let method = pool.add(Constant::method("A", "f", "T")).unwrap();
        assert_ne!(field, method);
    }
}
