//! The compilation session.
//!
//! [`GenerationState`] owns everything that lives for one backend run: the
//! configuration, the output artifacts, the SAM wrapper cache and the wrapper
//! generator. It is passed by `&mut` through lowering, which is how the
//! single-writer rule for the cache is enforced: there is no shared or static
//! table anywhere.

use samwrap_core::{CodegenError, SamType};
use samwrap_syntax::SourceFile;

use crate::class_file::OutputArtifacts;
use crate::config::GenerationConfig;
use crate::sam_wrappers::{CacheStats, SamWrapperClasses, WrapperClass, WrapperKey};
use crate::wrapper_codegen::{SamWrapperCodegen, WrapperGenerator, WrapperRequest, file_class_name};

/// What kind of declaration encloses a conversion site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    Class,
    Lambda,
}

/// One level of the declaration nesting around a conversion site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnclosingDecl<'a> {
    pub kind: DeclKind,
    pub name: &'a str,
    /// Set for functions declared `inline`.
    pub inline: bool,
}

impl<'a> EnclosingDecl<'a> {
    pub fn function(name: &'a str, inline: bool) -> Self {
        Self {
            kind: DeclKind::Function,
            name,
            inline,
        }
    }

    pub fn class(name: &'a str) -> Self {
        Self {
            kind: DeclKind::Class,
            name,
            inline: false,
        }
    }

    pub fn lambda() -> Self {
        Self {
            kind: DeclKind::Lambda,
            name: "",
            inline: false,
        }
    }
}

/// The declarations enclosing a conversion site, outermost first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerContext<'a> {
    enclosing: &'a [EnclosingDecl<'a>],
}

impl<'a> CallerContext<'a> {
    pub fn new(enclosing: &'a [EnclosingDecl<'a>]) -> Self {
        Self { enclosing }
    }

    /// A site directly at file level.
    pub fn top_level() -> Self {
        Self::default()
    }

    pub fn enclosing(&self) -> &'a [EnclosingDecl<'a>] {
        self.enclosing
    }

    /// True if the site is inside an inline function, at any depth.
    ///
    /// Classes and lambdas nested in an inline function are copied along with
    /// it, so they count as inline too.
    pub fn is_inline(&self) -> bool {
        self.enclosing
            .iter()
            .any(|decl| decl.kind == DeclKind::Function && decl.inline)
    }

    /// Internal name of the innermost enclosing class chain, or the file class
    /// for sites outside any class.
    pub fn outer_class(&self, file: &SourceFile<'_>, file_class: &str) -> String {
        let classes: Vec<&str> = self
            .enclosing
            .iter()
            .filter(|decl| decl.kind == DeclKind::Class)
            .map(|decl| decl.name)
            .collect();
        if classes.is_empty() {
            return file_class.to_string();
        }
        let chain = classes.join("$");
        match file.package {
            Some(package) if !package.is_empty() => format!("{package}/{chain}"),
            _ => chain,
        }
    }
}

/// State of one compilation session.
pub struct GenerationState<G = SamWrapperCodegen> {
    config: GenerationConfig,
    output: OutputArtifacts,
    sam_wrappers: SamWrapperClasses,
    generator: G,
}

impl GenerationState<SamWrapperCodegen> {
    pub fn new(config: GenerationConfig) -> Self {
        Self::with_generator(config, SamWrapperCodegen::new())
    }
}

impl Default for GenerationState<SamWrapperCodegen> {
    fn default() -> Self {
        Self::new(GenerationConfig::default())
    }
}

impl<G: WrapperGenerator> GenerationState<G> {
    pub fn with_generator(config: GenerationConfig, generator: G) -> Self {
        Self {
            config,
            output: OutputArtifacts::new(),
            sam_wrappers: SamWrapperClasses::new(),
            generator,
        }
    }

    /// The wrapper class for converting a lambda to `sam` at a site in `file`.
    ///
    /// The first request for a given `(sam, file, inline context)` emits the
    /// class into the session output; later requests return the same
    /// descriptor without emitting anything. A generation error is returned
    /// as is and nothing is cached for it.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn sam_wrapper_class(
        &mut self,
        sam: &SamType,
        file: &SourceFile<'_>,
        caller: &CallerContext<'_>,
    ) -> Result<WrapperClass, CodegenError> {
        let key = WrapperKey::new(sam.clone(), file.id, caller.is_inline());
        let Self {
            config,
            output,
            sam_wrappers,
            generator,
        } = self;

        sam_wrappers.get_or_create(key, |key| {
            let file_class = file_class_name(file, &config.file_class_suffix);
            let outer_class = caller.outer_class(file, &file_class);
            let source_file = file.path.rsplit(['/', '\\']).next().unwrap_or(file.path);
            let request = WrapperRequest {
                sam: &key.sam,
                file: key.file,
                file_class: &file_class,
                source_file,
                inline: key.inline,
                outer_class: &outer_class,
            };
            generator.generate(&request, config, output)
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn output(&self) -> &OutputArtifacts {
        &self.output
    }

    pub fn into_output(self) -> OutputArtifacts {
        self.output
    }

    pub fn sam_wrappers(&self) -> &SamWrapperClasses {
        &self.sam_wrappers
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.sam_wrappers.stats()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use samwrap_core::{FileId, SamMethod};
    use samwrap_syntax::AstBuilder;

    fn producer() -> SamType {
        SamType::new("Producer", SamMethod::new("produce", vec![], "Object"))
    }

    #[test]
    fn inline_detection_looks_through_nesting() {
        let plain = [EnclosingDecl::function("main", false), EnclosingDecl::lambda()];
        assert!(!CallerContext::new(&plain).is_inline());

        let nested = [
            EnclosingDecl::function("run", true),
            EnclosingDecl::class("Local"),
            EnclosingDecl::function("method", false),
            EnclosingDecl::lambda(),
        ];
        assert!(CallerContext::new(&nested).is_inline());
        assert!(!CallerContext::top_level().is_inline());
    }

    #[test]
    fn outer_class_uses_class_chain() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let file = b.file(FileId::new(0), "Main.kt", Some("app"), &[]);

        let in_class = [
            EnclosingDecl::class("Outer"),
            EnclosingDecl::class("Inner"),
            EnclosingDecl::function("f", false),
        ];
        assert_eq!(
            CallerContext::new(&in_class).outer_class(file, "app/MainKt"),
            "app/Outer$Inner"
        );
        assert_eq!(
            CallerContext::top_level().outer_class(file, "app/MainKt"),
            "app/MainKt"
        );
    }

    #[test]
    fn repeated_requests_share_one_class() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let file = b.file(FileId::new(0), "src/Main.kt", None, &[]);
        let mut state = GenerationState::default();
        let caller = CallerContext::top_level();

        let first = state.sam_wrapper_class(&producer(), file, &caller).unwrap();
        let second = state.sam_wrapper_class(&producer(), file, &caller).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.name(), "MainKt$sam$Producer$0");
        assert_eq!(state.output().len(), 1);
        assert_eq!(state.output().get(first.name()).unwrap().source_file, "Main.kt");
        assert_eq!(state.cache_stats().hits, 1);
        assert_eq!(state.generator().emitted(), 1);
    }

    #[test]
    fn outer_class_is_taken_from_first_request() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let file = b.file(FileId::new(0), "Main.kt", None, &[]);
        let mut state = GenerationState::default();

        let in_holder = [EnclosingDecl::class("Holder"), EnclosingDecl::function("f", false)];
        let wrapper = state
            .sam_wrapper_class(&producer(), file, &CallerContext::new(&in_holder))
            .unwrap();
        state
            .sam_wrapper_class(&producer(), file, &CallerContext::top_level())
            .unwrap();

        let class = state.output().get(wrapper.name()).unwrap();
        assert_eq!(class.outer_class.as_deref(), Some("Holder"));
        assert_eq!(state.output().len(), 1);
    }
}
