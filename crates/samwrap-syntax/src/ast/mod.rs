//! Abstract syntax tree for a Kotlin-like source language.
//!
//! This module provides:
//! - Node definitions for declarations, statements and expressions
//! - [`Node`], the closed set of node kinds used for generic traversal
//! - [`Visitor`] with `walk`/`walk_children` drivers
//! - [`AstBuilder`] for constructing trees in an arena

use std::fmt;

use samwrap_core::{FileId, Span};

pub mod builder;
pub mod decl;
pub mod expr;
pub mod node;
pub mod stmt;
pub mod visitor;

pub use builder::AstBuilder;
pub use decl::*;
pub use expr::*;
pub use node::{Node, NodeKind};
pub use stmt::*;
pub use visitor::{Visitor, walk, walk_children};

/// A name together with where it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A reference to a type by name, e.g. `Producer` or `String?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRef<'ast> {
    pub name: &'ast str,
    pub nullable: bool,
    pub span: Span,
}

bitflags::bitflags! {
    /// Modifiers written in front of a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeclModifiers: u8 {
        /// `inline`: the body is expanded at every call site.
        const INLINE = 0x01;
        const PRIVATE = 0x02;
        const ABSTRACT = 0x04;
        /// `fun interface`: explicitly declared convertible from lambdas.
        const FUN = 0x08;
    }
}

/// One compilation unit.
///
/// The file is allocated in the arena so that every node reached from it
/// borrows for the same `'ast`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceFile<'ast> {
    pub id: FileId,
    /// Path as given to the compiler, e.g. `src/main/Producer.kt`.
    pub path: &'ast str,
    /// Package in internal form (`com/example`), if declared.
    pub package: Option<&'ast str>,
    pub items: &'ast [Item<'ast>],
    pub span: Span,
}

impl<'ast> SourceFile<'ast> {
    pub fn items(&self) -> &'ast [Item<'ast>] {
        self.items
    }

    /// File name without directories or extension: `src/main/Producer.kt` -> `Producer`.
    pub fn stem(&self) -> &'ast str {
        let name = self
            .path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.path);
        name.split_once('.').map_or(name, |(stem, _)| stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file<'a>(path: &'a str) -> SourceFile<'a> {
        SourceFile {
            id: FileId::new(0),
            path,
            package: None,
            items: &[],
            span: Span::default(),
        }
    }

    #[test]
    fn stem_strips_directories_and_extension() {
        assert_eq!(file("src/main/Producer.kt").stem(), "Producer");
        assert_eq!(file("Main.kt").stem(), "Main");
        assert_eq!(file("dir\\Win.kt").stem(), "Win");
        assert_eq!(file("noext").stem(), "noext");
    }

    #[test]
    fn modifiers_default_empty() {
        assert!(DeclModifiers::default().is_empty());
        assert!((DeclModifiers::INLINE | DeclModifiers::PRIVATE).contains(DeclModifiers::INLINE));
    }
}
