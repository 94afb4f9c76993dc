//! samwrap
//!
//! SAM wrapper-class generation for a Kotlin-like compiler backend.
//!
//! Converting a lambda to a single-abstract-method interface needs a small
//! adapter class that implements the interface and forwards its method to the
//! function value. This crate generates those adapters and makes sure each one
//! is emitted at most once per `(interface, file, inline context)` in a
//! compilation session.
//!
//! ## Crates
//!
//! - [`samwrap_core`]: spans, file ids, SAM descriptors, errors
//! - [`samwrap_syntax`]: syntax tree, node set and visitor
//! - [`samwrap_codegen`]: session state, wrapper cache, lowering
//!
//! ## Example
//!
//! ```
//! use samwrap::prelude::*;
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let produce = b.interface_method("produce", &[], Some(b.ty("Any")), None);
//! let producer = b.interface(DeclModifiers::FUN, "Producer", &[produce]);
//! let lambda = b.lambda(&[], b.block(&[b.expr_stmt(b.int(1))]));
//! let main = b.function(
//!     DeclModifiers::empty(),
//!     "main",
//!     &[],
//!     None,
//!     Some(b.block(&[b.local_var("p", None, Some(b.sam_conversion("Producer", lambda)))])),
//! );
//! let file = b.file(FileId::new(0), "Main.kt", None, &[Item::Interface(producer), Item::Function(main)]);
//!
//! let mut state = GenerationState::new(GenerationConfig::default());
//! let lowered = samwrap::lower_files(&mut state, &[file], &SamInterfaceTable::new()).unwrap();
//!
//! assert_eq!(lowered[0].conversions[0].wrapper.name(), "MainKt$sam$Producer$0");
//! assert_eq!(state.output().len(), 1);
//! ```

pub use samwrap_codegen as codegen;
pub use samwrap_syntax as syntax;

pub use bumpalo::Bump;
pub use samwrap_codegen::{
    CacheStats, CallerContext, FileLowering, GenerationConfig, GenerationState, OutputArtifacts,
    SamInterfaceTable, SamWrapperCodegen, WrapperClass, WrapperGenerator, lower_file,
    lower_file_with,
};
pub use samwrap_core::{CodegenError, FileId, LoweringError, SamMethod, SamType, SamwrapError};

use samwrap_syntax::SourceFile;
use tracing::info;

pub mod prelude {
    pub use bumpalo::Bump;
    pub use samwrap_codegen::{
        CallerContext, ClassArtifact, ClassFlags, EnclosingDecl, FileLowering, GenerationConfig,
        GenerationState, OutputArtifacts, SamInterfaceTable, SamWrapperCodegen, WrapperClass,
        WrapperGenerator, WrapperRequest,
    };
    pub use samwrap_core::{
        CodegenError, FileId, LoweringError, SamMethod, SamType, SamwrapError, Span, VOID,
    };
    pub use samwrap_syntax::{AstBuilder, DeclModifiers, Expr, Item, Node, SourceFile, Stmt, Visitor};
}

/// Lower several files in one session.
///
/// Files are lowered in order and share the session's wrapper cache, so a
/// wrapper is never generated twice for the same file and inline context.
/// Lowering stops at the first file that fails; wrappers emitted for earlier
/// files stay in the session output.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn lower_files<'ast, G: WrapperGenerator>(
    state: &mut GenerationState<G>,
    files: &[&'ast SourceFile<'ast>],
    library: &SamInterfaceTable,
) -> Result<Vec<FileLowering>, SamwrapError> {
    let mut lowered = Vec::with_capacity(files.len());
    for &file in files {
        lowered.push(lower_file_with(state, file, library)?);
    }

    let stats = state.cache_stats();
    info!(
        files = files.len(),
        classes = state.output().len(),
        hits = stats.hits,
        misses = stats.misses,
        "lowered SAM conversions"
    );
    Ok(lowered)
}
