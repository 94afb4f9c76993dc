//! samwrap codegen
//!
//! Generation and per-session caching of SAM wrapper classes.
//!
//! ## Architecture
//!
//! - **Session**: [`GenerationState`] owns the configuration, the output
//!   artifacts and the wrapper cache for one compilation
//! - **Cache**: [`SamWrapperClasses`] maps `(SAM type, file, inline context)`
//!   to the wrapper generated for it, generating at most once per key
//! - **Lowering**: [`SamLowering`] finds conversion sites with the syntax
//!   visitor and requests wrappers from the session
//!
//! ## Modules
//!
//! - [`bytecode`]: Bytecode types (OpCode, BytecodeChunk, ConstantPool)
//! - [`class_file`]: Symbolic class artifacts and the session output
//! - [`config`]: Generation settings
//! - [`lowering`]: SAM conversion lowering and the interface table
//! - [`sam_wrappers`]: The wrapper cache
//! - [`state`]: Compilation session and caller context
//! - [`wrapper_codegen`]: Wrapper class emission

pub mod bytecode;
pub mod class_file;
pub mod config;
pub mod lowering;
pub mod sam_wrappers;
pub mod state;
pub mod wrapper_codegen;

pub use class_file::{ClassArtifact, ClassFlags, FieldDef, MemberFlags, MethodDef, OutputArtifacts};
pub use config::GenerationConfig;
pub use lowering::{
    FileLowering, LoweredConversion, SamInterfaceTable, SamLookup, SamLowering, lower_file,
    lower_file_with,
};
pub use sam_wrappers::{CacheStats, SamWrapperClasses, WrapperClass, WrapperKey};
pub use state::{CallerContext, DeclKind, EnclosingDecl, GenerationState};
pub use wrapper_codegen::{
    FUNCTION_FIELD, SamWrapperCodegen, WrapperGenerator, WrapperRequest, file_class_name,
    wrapper_name,
};

// Re-export error types from core for convenience
pub use samwrap_core::{CodegenError, LoweringError};
