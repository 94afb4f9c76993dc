//! Expression nodes.
//!
//! Only the shapes the backend needs to find conversion sites are modelled:
//! literals, names, calls, lambdas and explicit SAM conversions.

use samwrap_core::Span;

use crate::ast::decl::Param;
use crate::ast::stmt::Block;
use crate::ast::{Ident, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    Literal(&'ast LiteralExpr<'ast>),
    Ident(&'ast IdentExpr<'ast>),
    Call(&'ast CallExpr<'ast>),
    /// Function literal: `{ x -> x + 1 }`
    Lambda(&'ast LambdaExpr<'ast>),
    /// Function literal converted to an interface: `Producer { 42 }`
    SamConversion(&'ast SamConversionExpr<'ast>),
}

impl Expr<'_> {
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Ident(e) => e.span,
            Self::Call(e) => e.span,
            Self::Lambda(e) => e.span,
            Self::SamConversion(e) => e.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind<'ast> {
    Int(i64),
    Bool(bool),
    String(&'ast str),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr<'ast> {
    pub kind: LiteralKind<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentExpr<'ast> {
    pub ident: Ident<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    pub callee: Expr<'ast>,
    pub args: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambdaExpr<'ast> {
    pub params: &'ast [Param<'ast>],
    pub body: Block<'ast>,
    pub span: Span,
}

/// A lambda materialized as an instance of a SAM interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamConversionExpr<'ast> {
    pub interface: TypeRef<'ast>,
    pub lambda: &'ast LambdaExpr<'ast>,
    pub span: Span,
}
