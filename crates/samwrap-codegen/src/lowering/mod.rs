//! Lowering of SAM conversions.
//!
//! [`SamLowering`] walks one file with the syntax visitor, keeps track of the
//! declarations enclosing the current node and, at every
//! `Interface { lambda }` conversion, asks the session for the wrapper class
//! and records the instantiation sequence for the site:
//!
//! ```text
//! New <wrapper>
//! Dup
//! Lambda <n>          ; the n-th converted lambda of the file
//! InvokeSpecial <wrapper>.<init>
//! ```

mod sam_table;

pub use sam_table::{SamInterfaceTable, SamLookup};

use samwrap_core::{CodegenError, FileId, LoweringError, Span};
use samwrap_syntax::{
    ClassDecl, FunctionDecl, LambdaExpr, Node, SamConversionExpr, SourceFile, Visitor, walk,
    walk_children,
};
use tracing::trace;

use crate::bytecode::{BytecodeChunk, Constant, ConstantPool, MAX_CONSTANTS, OpCode};
use crate::sam_wrappers::WrapperClass;
use crate::state::{CallerContext, EnclosingDecl, GenerationState};
use crate::wrapper_codegen::{WrapperGenerator, file_class_name};

const CONSTRUCTOR: &str = "<init>";

/// One lowered conversion site.
#[derive(Debug, Clone)]
pub struct LoweredConversion {
    pub span: Span,
    /// Internal name of the converted-to interface.
    pub interface: String,
    pub wrapper: WrapperClass,
    pub inline: bool,
    pub code: BytecodeChunk,
}

/// Result of lowering one file.
#[derive(Debug, Clone)]
pub struct FileLowering {
    pub file: FileId,
    pub file_class: String,
    /// Conversions in the order they were lowered (innermost lambdas first).
    pub conversions: Vec<LoweredConversion>,
    /// Constants referenced by the conversion code.
    pub constants: ConstantPool,
}

impl FileLowering {
    fn new(file: FileId) -> Self {
        Self {
            file,
            file_class: String::new(),
            conversions: Vec::new(),
            constants: ConstantPool::new(),
        }
    }

    fn constant(&mut self, constant: Constant) -> Result<u16, CodegenError> {
        self.constants
            .add(constant)
            .ok_or_else(|| CodegenError::ConstantPoolOverflow {
                class: self.file_class.clone(),
                limit: MAX_CONSTANTS,
            })
    }
}

/// Visitor that lowers the SAM conversions of one file.
pub struct SamLowering<'s, 'ast, G> {
    state: &'s mut GenerationState<G>,
    file: &'ast SourceFile<'ast>,
    interfaces: SamInterfaceTable,
    scope: Vec<EnclosingDecl<'ast>>,
}

impl<'s, 'ast, G: WrapperGenerator> SamLowering<'s, 'ast, G> {
    pub fn new(
        state: &'s mut GenerationState<G>,
        file: &'ast SourceFile<'ast>,
        interfaces: SamInterfaceTable,
    ) -> Self {
        Self {
            state,
            file,
            interfaces,
            scope: Vec::new(),
        }
    }

    fn scoped(
        &mut self,
        decl: EnclosingDecl<'ast>,
        node: Node<'ast>,
        data: &mut FileLowering,
    ) -> Result<(), LoweringError> {
        self.scope.push(decl);
        let result = walk_children(self, node, data);
        self.scope.pop();
        result
    }
}

impl<'s, 'ast, G: WrapperGenerator> Visitor<'ast, FileLowering> for SamLowering<'s, 'ast, G> {
    type Error = LoweringError;

    fn visit_file_header(
        &mut self,
        file: &'ast SourceFile<'ast>,
        data: &mut FileLowering,
    ) -> Result<(), LoweringError> {
        self.interfaces.register_file(file);
        data.file = file.id;
        data.file_class = file_class_name(file, &self.state.config().file_class_suffix);
        Ok(())
    }

    fn visit_function(
        &mut self,
        func: &'ast FunctionDecl<'ast>,
        data: &mut FileLowering,
    ) -> Result<(), LoweringError> {
        let decl = EnclosingDecl::function(func.name.name, func.is_inline());
        self.scoped(decl, Node::Function(func), data)
    }

    fn visit_class(
        &mut self,
        class: &'ast ClassDecl<'ast>,
        data: &mut FileLowering,
    ) -> Result<(), LoweringError> {
        self.scoped(EnclosingDecl::class(class.name.name), Node::Class(class), data)
    }

    fn visit_lambda(
        &mut self,
        lambda: &'ast LambdaExpr<'ast>,
        data: &mut FileLowering,
    ) -> Result<(), LoweringError> {
        self.scoped(EnclosingDecl::lambda(), Node::Lambda(lambda), data)
    }

    fn visit_sam_conversion(
        &mut self,
        conversion: &'ast SamConversionExpr<'ast>,
        data: &mut FileLowering,
    ) -> Result<(), LoweringError> {
        let sam = self
            .interfaces
            .resolve(conversion.interface.name, conversion.span)?;

        // The lambda body may itself contain conversions.
        self.visit_lambda(conversion.lambda, data)?;

        let caller = CallerContext::new(&self.scope);
        let inline = caller.is_inline();
        let wrapper = self.state.sam_wrapper_class(&sam, self.file, &caller)?;

        let line = conversion.span.line;
        let class = data.constant(Constant::class(wrapper.name()))?;
        let init = data.constant(Constant::method(
            wrapper.name(),
            CONSTRUCTOR,
            wrapper.constructor_descriptor(),
        ))?;
        // Plain lambdas are not counted, only converted ones.
        let lambda_index = data.conversions.len() as u32;

        let mut code = BytecodeChunk::new();
        code.emit_with_constant(OpCode::New, class, line);
        code.write_op(OpCode::Dup, line);
        code.write_op(OpCode::Lambda, line);
        code.write_u32(lambda_index, line);
        code.emit_with_constant(OpCode::InvokeSpecial, init, line);

        trace!(
            span = %conversion.span,
            interface = sam.interface(),
            wrapper = wrapper.name(),
            inline,
            "lowered SAM conversion"
        );

        data.conversions.push(LoweredConversion {
            span: conversion.span,
            interface: sam.interface().to_string(),
            wrapper,
            inline,
            code,
        });
        Ok(())
    }
}

/// Lower every SAM conversion in `file` using only the interfaces it declares.
pub fn lower_file<'ast, G: WrapperGenerator>(
    state: &mut GenerationState<G>,
    file: &'ast SourceFile<'ast>,
) -> Result<FileLowering, LoweringError> {
    lower_file_with(state, file, &SamInterfaceTable::new())
}

/// Lower every SAM conversion in `file`, resolving interfaces against the
/// file's own declarations and `library`.
///
/// The first error aborts the file. Wrappers generated before the error stay
/// in the session.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn lower_file_with<'ast, G: WrapperGenerator>(
    state: &mut GenerationState<G>,
    file: &'ast SourceFile<'ast>,
    library: &SamInterfaceTable,
) -> Result<FileLowering, LoweringError> {
    let mut lowering = SamLowering::new(state, file, library.clone());
    let mut data = FileLowering::new(file.id);
    walk(&mut lowering, Node::File(file), &mut data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use samwrap_syntax::{AstBuilder, DeclModifiers, Expr, Item};

    fn producer_interface<'ast>(b: &AstBuilder<'ast>) -> Item<'ast> {
        let produce = b.interface_method("produce", &[], Some(b.ty("Any")), None);
        Item::Interface(b.interface(DeclModifiers::FUN, "Producer", &[produce]))
    }

    fn conversion<'ast>(b: &AstBuilder<'ast>) -> Expr<'ast> {
        let lambda = b.lambda(&[], b.block(&[b.expr_stmt(b.int(1))]));
        b.sam_conversion("Producer", lambda)
    }

    #[test]
    fn file_without_conversions() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let file = b.file(FileId::new(7), "src/util.kt", Some("lib"), &[producer_interface(&b)]);

        let mut state = GenerationState::default();
        let lowered = lower_file(&mut state, file).unwrap();

        assert_eq!(lowered.file, FileId::new(7));
        assert_eq!(lowered.file_class, "lib/UtilKt");
        assert!(lowered.conversions.is_empty());
        assert!(lowered.constants.is_empty());
        assert!(state.output().is_empty());
    }

    #[test]
    fn conversion_site_code() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let iface = producer_interface(&b);
        let main = b.function(
            DeclModifiers::empty(),
            "main",
            &[],
            None,
            Some(b.block(&[b.local_var("p", None, Some(conversion(&b)))])),
        );
        let file = b.file(FileId::new(0), "Main.kt", None, &[iface, Item::Function(main)]);

        let mut state = GenerationState::default();
        let lowered = lower_file(&mut state, file).unwrap();

        assert_eq!(lowered.file_class, "MainKt");
        assert_eq!(lowered.conversions.len(), 1);
        let site = &lowered.conversions[0];
        assert_eq!(site.interface, "Producer");
        assert!(!site.inline);
        site.code.assert_opcodes(&[OpCode::New, OpCode::Dup, OpCode::Lambda, OpCode::InvokeSpecial]);
        assert_eq!(site.code.read_u32(5), Some(0));
        assert_eq!(lowered.constants.len(), 2);
        assert!(state.output().contains(site.wrapper.name()));
    }

    #[test]
    fn nested_conversions_are_lowered_inside_out() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let iface = producer_interface(&b);
        let inner = conversion(&b);
        let outer_lambda = b.lambda(&[], b.block(&[b.ret(Some(inner))]));
        let outer = b.sam_conversion("Producer", outer_lambda);
        let inline_fn = b.function(
            DeclModifiers::INLINE,
            "wrap",
            &[],
            None,
            Some(b.block(&[b.expr_stmt(outer)])),
        );
        let file = b.file(FileId::new(0), "Main.kt", None, &[iface, Item::Function(inline_fn)]);

        let mut state = GenerationState::default();
        let lowered = lower_file(&mut state, file).unwrap();

        assert_eq!(lowered.conversions.len(), 2);
        assert_eq!(lowered.conversions[0].span, inner.span());
        assert_eq!(lowered.conversions[1].span, outer.span());
        assert!(lowered.conversions.iter().all(|c| c.inline));
        assert_eq!(lowered.conversions[0].wrapper, lowered.conversions[1].wrapper);
        assert_eq!(lowered.conversions[1].code.read_u32(5), Some(1));
        assert_eq!(state.output().len(), 1);
    }

    #[test]
    fn unknown_interface_aborts_file() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let lambda = b.lambda(&[], b.block(&[]));
        let bad = b.sam_conversion("Missing", lambda);
        let main = b.function(
            DeclModifiers::empty(),
            "main",
            &[],
            None,
            Some(b.block(&[b.expr_stmt(bad)])),
        );
        let file = b.file(FileId::new(0), "Main.kt", None, &[Item::Function(main)]);

        let mut state = GenerationState::default();
        let err = lower_file(&mut state, file).unwrap_err();
        assert_eq!(err.span(), Some(bad.span()));
        assert!(state.output().is_empty());
    }
}
