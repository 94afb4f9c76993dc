//! Bytecode operation codes.
//!
//! A small stack machine instruction set, just wide enough for wrapper
//! constructors, forwarding methods and instantiation sequences. Each opcode is
//! one byte; operands follow inline, big-endian.

use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum OpCode {
    /// Push the receiver.
    LoadThis = 0,
    /// Push an argument.
    /// Operand: u8 slot (1-based; slot 0 is the receiver)
    LoadArg,
    /// Pop receiver, push field value.
    /// Operand: u16 field constant
    GetField,
    /// Pop value and receiver, store field.
    /// Operand: u16 field constant
    PutField,
    /// Allocate an uninitialized instance.
    /// Operand: u16 class constant
    New,
    /// Duplicate top of stack.
    Dup,
    /// Pop top of stack.
    Pop,
    /// Check the top of stack against a class, leaving it in place.
    /// Operand: u16 class constant
    CheckCast,
    /// Call a constructor or private method without dispatch.
    /// Operand: u16 method constant
    InvokeSpecial,
    /// Call an interface method.
    /// Operands: u16 method constant, u8 argument count
    InvokeInterface,
    /// Push the function value of a lambda defined in the current file.
    /// Operand: u32 lambda index
    Lambda,
    /// Return without a value.
    Return,
    /// Return the top of stack.
    ReturnValue,
}

impl OpCode {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Size of this opcode's operands in bytes, not counting the opcode itself.
    pub fn operand_size(&self) -> usize {
        match self {
            OpCode::LoadThis
            | OpCode::Dup
            | OpCode::Pop
            | OpCode::Return
            | OpCode::ReturnValue => 0,

            OpCode::LoadArg => 1,

            OpCode::GetField
            | OpCode::PutField
            | OpCode::New
            | OpCode::CheckCast
            | OpCode::InvokeSpecial => 2,

            OpCode::InvokeInterface => 3,

            OpCode::Lambda => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OpCode::LoadThis => "LoadThis",
            OpCode::LoadArg => "LoadArg",
            OpCode::GetField => "GetField",
            OpCode::PutField => "PutField",
            OpCode::New => "New",
            OpCode::Dup => "Dup",
            OpCode::Pop => "Pop",
            OpCode::CheckCast => "CheckCast",
            OpCode::InvokeSpecial => "InvokeSpecial",
            OpCode::InvokeInterface => "InvokeInterface",
            OpCode::Lambda => "Lambda",
            OpCode::Return => "Return",
            OpCode::ReturnValue => "ReturnValue",
        }
    }
}
