//! Declaration nodes: functions, classes, interfaces and properties.

use samwrap_core::Span;

use crate::ast::expr::Expr;
use crate::ast::stmt::Block;
use crate::ast::{DeclModifiers, Ident, TypeRef};

/// A declaration at file or class level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item<'ast> {
    Function(&'ast FunctionDecl<'ast>),
    Class(&'ast ClassDecl<'ast>),
    Interface(&'ast InterfaceDecl<'ast>),
    Property(&'ast PropertyDecl<'ast>),
}

impl<'ast> Item<'ast> {
    pub fn span(&self) -> Span {
        match self {
            Self::Function(d) => d.span,
            Self::Class(d) => d.span,
            Self::Interface(d) => d.span,
            Self::Property(d) => d.span,
        }
    }

    pub fn name(&self) -> &'ast str {
        match self {
            Self::Function(d) => d.name.name,
            Self::Class(d) => d.name.name,
            Self::Interface(d) => d.name.name,
            Self::Property(d) => d.name.name,
        }
    }
}

/// A function declaration, top-level, member or local.
///
/// Examples:
/// - `fun run(task: Runnable) { }`
/// - `inline fun <T> measure(block: () -> T): T { ... }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionDecl<'ast> {
    pub modifiers: DeclModifiers,
    pub name: Ident<'ast>,
    pub params: &'ast [Param<'ast>],
    pub return_type: Option<TypeRef<'ast>>,
    /// None for abstract or external declarations.
    pub body: Option<Block<'ast>>,
    pub span: Span,
}

impl FunctionDecl<'_> {
    pub fn is_inline(&self) -> bool {
        self.modifiers.contains(DeclModifiers::INLINE)
    }
}

/// A function or lambda parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param<'ast> {
    pub name: Ident<'ast>,
    pub ty: TypeRef<'ast>,
    pub span: Span,
}

/// A class declaration. Members may themselves be classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassDecl<'ast> {
    pub modifiers: DeclModifiers,
    pub name: Ident<'ast>,
    pub members: &'ast [Item<'ast>],
    pub span: Span,
}

/// An interface declaration.
///
/// ```kotlin
/// fun interface Producer {
///     fun produce(): Any
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceDecl<'ast> {
    pub modifiers: DeclModifiers,
    pub name: Ident<'ast>,
    pub methods: &'ast [InterfaceMethod<'ast>],
    pub span: Span,
}

impl<'ast> InterfaceDecl<'ast> {
    /// Methods without a default body.
    pub fn abstract_methods(&self) -> impl Iterator<Item = &'ast InterfaceMethod<'ast>> + use<'ast> {
        self.methods.iter().filter(|m| m.is_abstract())
    }
}

/// A method declared in an interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceMethod<'ast> {
    pub name: Ident<'ast>,
    pub params: &'ast [Param<'ast>],
    pub return_type: Option<TypeRef<'ast>>,
    /// Default implementation, if any.
    pub body: Option<Block<'ast>>,
    pub span: Span,
}

impl InterfaceMethod<'_> {
    pub fn is_abstract(&self) -> bool {
        self.body.is_none()
    }
}

/// A property: `val handler = Runnable { }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDecl<'ast> {
    pub name: Ident<'ast>,
    pub ty: Option<TypeRef<'ast>>,
    pub init: Option<Expr<'ast>>,
    pub span: Span,
}
