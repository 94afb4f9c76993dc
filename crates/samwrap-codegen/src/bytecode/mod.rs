//! Bytecode types for generated code.
//!
//! - [`OpCode`] - the instruction set
//! - [`BytecodeChunk`] - encoded instructions for one method or call site
//! - [`Constant`] and [`ConstantPool`] - symbolic references used as operands

mod chunk;
mod constant;
mod opcode;

pub use chunk::BytecodeChunk;
pub use constant::{Constant, ConstantPool, MAX_CONSTANTS};
pub use opcode::OpCode;
