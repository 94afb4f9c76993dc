//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use samwrap::prelude::*;

/// Generator that counts calls and can be told to fail.
#[derive(Default)]
pub struct RecordingGenerator {
    inner: SamWrapperCodegen,
    pub calls: usize,
    /// Number of upcoming calls that fail before touching the output.
    pub fail_next: usize,
    pub requests: Vec<(String, FileId, bool)>,
}

impl RecordingGenerator {
    pub fn failing(times: usize) -> Self {
        Self {
            fail_next: times,
            ..Self::default()
        }
    }
}

impl WrapperGenerator for RecordingGenerator {
    fn generate(
        &mut self,
        request: &WrapperRequest<'_>,
        config: &GenerationConfig,
        output: &mut OutputArtifacts,
    ) -> Result<WrapperClass, CodegenError> {
        self.calls += 1;
        self.requests
            .push((request.sam.interface().to_string(), request.file, request.inline));
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(CodegenError::malformed(request.sam.interface(), "injected failure"));
        }
        self.inner.generate(request, config, output)
    }
}

pub fn producer() -> SamType {
    SamType::new("Producer", SamMethod::new("produce", vec![], "java/lang/Object"))
}

pub fn runnable() -> SamType {
    SamType::new("java/lang/Runnable", SamMethod::new("run", vec![], VOID))
}

/// `fun interface Producer { fun produce(): Any }`
pub fn producer_interface<'ast>(b: &AstBuilder<'ast>) -> Item<'ast> {
    let produce = b.interface_method("produce", &[], Some(b.ty("Any")), None);
    Item::Interface(b.interface(DeclModifiers::FUN, "Producer", &[produce]))
}

/// `Producer { 42 }` as a statement.
pub fn producer_conversion<'ast>(b: &AstBuilder<'ast>) -> Stmt<'ast> {
    let lambda = b.lambda(&[], b.block(&[b.expr_stmt(b.int(42))]));
    b.expr_stmt(b.sam_conversion("Producer", lambda))
}

/// A function containing `body`.
pub fn function<'ast>(
    b: &AstBuilder<'ast>,
    name: &str,
    inline: bool,
    body: &[Stmt<'ast>],
) -> Item<'ast> {
    let modifiers = if inline {
        DeclModifiers::INLINE
    } else {
        DeclModifiers::empty()
    };
    Item::Function(b.function(modifiers, name, &[], None, Some(b.block(body))))
}
