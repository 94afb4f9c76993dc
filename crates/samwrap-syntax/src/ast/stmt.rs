//! Statement nodes.

use samwrap_core::Span;

use crate::ast::decl::{ClassDecl, FunctionDecl};
use crate::ast::expr::Expr;
use crate::ast::{Ident, TypeRef};

/// A braced sequence of statements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    pub stmts: &'ast [Stmt<'ast>],
    pub span: Span,
}

/// A statement inside a function, lambda or block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    Expr(&'ast ExprStmt<'ast>),
    LocalVar(&'ast LocalVarStmt<'ast>),
    Return(&'ast ReturnStmt<'ast>),
    Block(&'ast Block<'ast>),
    /// A local function declaration.
    Function(&'ast FunctionDecl<'ast>),
    /// A local class declaration.
    Class(&'ast ClassDecl<'ast>),
}

impl Stmt<'_> {
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(s) => s.span,
            Self::LocalVar(s) => s.span,
            Self::Return(s) => s.span,
            Self::Block(s) => s.span,
            Self::Function(s) => s.span,
            Self::Class(s) => s.span,
        }
    }
}

/// An expression evaluated for its effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    pub expr: Expr<'ast>,
    pub span: Span,
}

/// `val name: Type = init`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalVarStmt<'ast> {
    pub name: Ident<'ast>,
    pub ty: Option<TypeRef<'ast>>,
    pub init: Option<Expr<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    pub value: Option<Expr<'ast>>,
    pub span: Span,
}
