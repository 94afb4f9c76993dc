//! Generated class definitions and the session's output artifact set.
//!
//! A [`ClassArtifact`] is the symbolic form of one emitted class. Turning it
//! into a binary class file is left to a later stage; this crate only cares
//! that each class is recorded once, under a unique name, in emission order.

use rustc_hash::FxHashMap;
use samwrap_core::CodegenError;

use crate::bytecode::{BytecodeChunk, ConstantPool};

bitflags::bitflags! {
    /// Access flags of a class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassFlags: u16 {
        const PUBLIC = 0x0001;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
    }
}

bitflags::bitflags! {
    /// Access flags of a field or method.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const FINAL = 0x0010;
        const SYNTHETIC = 0x1000;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub descriptor: String,
    pub flags: MemberFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub descriptor: String,
    pub flags: MemberFlags,
    pub code: BytecodeChunk,
}

/// One generated class.
#[derive(Debug, Clone)]
pub struct ClassArtifact {
    /// Internal name, e.g. `com/example/MainKt$sam$Producer$0`.
    pub name: String,
    pub flags: ClassFlags,
    pub super_class: String,
    pub interfaces: Vec<String>,
    /// File name recorded for stack traces.
    pub source_file: String,
    /// Class in which this one is declared as an inner class.
    pub outer_class: Option<String>,
    pub constants: ConstantPool,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
}

impl ClassArtifact {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// All classes emitted during one session, in emission order.
#[derive(Debug, Default)]
pub struct OutputArtifacts {
    classes: Vec<ClassArtifact>,
    by_name: FxHashMap<String, usize>,
}

impl OutputArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a class. Fails without recording anything if the name is taken.
    pub fn add(&mut self, class: ClassArtifact) -> Result<(), CodegenError> {
        if self.by_name.contains_key(&class.name) {
            return Err(CodegenError::DuplicateClass { name: class.name });
        }
        self.by_name.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ClassArtifact> {
        self.by_name.get(name).map(|&idx| &self.classes[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassArtifact> {
        self.classes.iter()
    }

    /// Names in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn into_classes(self) -> Vec<ClassArtifact> {
        self.classes
    }
}
