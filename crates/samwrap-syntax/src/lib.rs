//! Syntax tree for the samwrap backend.
//!
//! Trees are allocated in a [`bumpalo::Bump`] arena and borrow from it for
//! `'ast`. They are built programmatically through [`AstBuilder`] and
//! traversed with the [`Visitor`] trait.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use samwrap_core::FileId;
//! use samwrap_syntax::{AstBuilder, DeclModifiers, Item};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let main = b.function(DeclModifiers::empty(), "main", &[], None, Some(b.block(&[])));
//! let file = b.file(FileId::new(0), "src/Main.kt", None, &[Item::Function(main)]);
//! assert_eq!(file.items().len(), 1);
//! ```

pub mod ast;

pub use ast::*;
