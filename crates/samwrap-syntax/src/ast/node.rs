//! The closed set of node kinds and their structural children.
//!
//! [`Node`] is a borrowed view of any tree node. Generic traversal goes through
//! [`Node::for_each_child`], which is the single place that knows the shape of
//! the tree; the visitor's default behaviour is built on it.

use std::convert::Infallible;

use samwrap_core::Span;

use crate::ast::decl::*;
use crate::ast::expr::*;
use crate::ast::stmt::*;
use crate::ast::{SourceFile, TypeRef};

/// A reference to one syntax node of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'ast> {
    File(&'ast SourceFile<'ast>),
    Function(&'ast FunctionDecl<'ast>),
    Class(&'ast ClassDecl<'ast>),
    Interface(&'ast InterfaceDecl<'ast>),
    InterfaceMethod(&'ast InterfaceMethod<'ast>),
    Property(&'ast PropertyDecl<'ast>),
    Parameter(&'ast Param<'ast>),
    TypeRef(&'ast TypeRef<'ast>),
    Block(&'ast Block<'ast>),
    ExprStmt(&'ast ExprStmt<'ast>),
    LocalVar(&'ast LocalVarStmt<'ast>),
    Return(&'ast ReturnStmt<'ast>),
    Literal(&'ast LiteralExpr<'ast>),
    Ident(&'ast IdentExpr<'ast>),
    Call(&'ast CallExpr<'ast>),
    Lambda(&'ast LambdaExpr<'ast>),
    SamConversion(&'ast SamConversionExpr<'ast>),
}

/// Discriminant of a [`Node`], for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Function,
    Class,
    Interface,
    InterfaceMethod,
    Property,
    Parameter,
    TypeRef,
    Block,
    ExprStmt,
    LocalVar,
    Return,
    Literal,
    Ident,
    Call,
    Lambda,
    SamConversion,
}

impl<'ast> Node<'ast> {
    pub fn from_item(item: &'ast Item<'ast>) -> Self {
        match item {
            Item::Function(d) => Node::Function(d),
            Item::Class(d) => Node::Class(d),
            Item::Interface(d) => Node::Interface(d),
            Item::Property(d) => Node::Property(d),
        }
    }

    pub fn from_stmt(stmt: &'ast Stmt<'ast>) -> Self {
        match stmt {
            Stmt::Expr(s) => Node::ExprStmt(s),
            Stmt::LocalVar(s) => Node::LocalVar(s),
            Stmt::Return(s) => Node::Return(s),
            Stmt::Block(s) => Node::Block(s),
            Stmt::Function(s) => Node::Function(s),
            Stmt::Class(s) => Node::Class(s),
        }
    }

    pub fn from_expr(expr: &'ast Expr<'ast>) -> Self {
        match expr {
            Expr::Literal(e) => Node::Literal(e),
            Expr::Ident(e) => Node::Ident(e),
            Expr::Call(e) => Node::Call(e),
            Expr::Lambda(e) => Node::Lambda(e),
            Expr::SamConversion(e) => Node::SamConversion(e),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Function(_) => NodeKind::Function,
            Node::Class(_) => NodeKind::Class,
            Node::Interface(_) => NodeKind::Interface,
            Node::InterfaceMethod(_) => NodeKind::InterfaceMethod,
            Node::Property(_) => NodeKind::Property,
            Node::Parameter(_) => NodeKind::Parameter,
            Node::TypeRef(_) => NodeKind::TypeRef,
            Node::Block(_) => NodeKind::Block,
            Node::ExprStmt(_) => NodeKind::ExprStmt,
            Node::LocalVar(_) => NodeKind::LocalVar,
            Node::Return(_) => NodeKind::Return,
            Node::Literal(_) => NodeKind::Literal,
            Node::Ident(_) => NodeKind::Ident,
            Node::Call(_) => NodeKind::Call,
            Node::Lambda(_) => NodeKind::Lambda,
            Node::SamConversion(_) => NodeKind::SamConversion,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::File(n) => n.span,
            Node::Function(n) => n.span,
            Node::Class(n) => n.span,
            Node::Interface(n) => n.span,
            Node::InterfaceMethod(n) => n.span,
            Node::Property(n) => n.span,
            Node::Parameter(n) => n.span,
            Node::TypeRef(n) => n.span,
            Node::Block(n) => n.span,
            Node::ExprStmt(n) => n.span,
            Node::LocalVar(n) => n.span,
            Node::Return(n) => n.span,
            Node::Literal(n) => n.span,
            Node::Ident(n) => n.span,
            Node::Call(n) => n.span,
            Node::Lambda(n) => n.span,
            Node::SamConversion(n) => n.span,
        }
    }

    /// Call `f` on each direct child in source order, stopping at the first error.
    pub fn for_each_child<E>(
        self,
        mut f: impl FnMut(Node<'ast>) -> Result<(), E>,
    ) -> Result<(), E> {
        match self {
            Node::File(file) => {
                for item in file.items {
                    f(Node::from_item(item))?;
                }
            }
            Node::Function(func) => {
                for param in func.params {
                    f(Node::Parameter(param))?;
                }
                if let Some(ty) = &func.return_type {
                    f(Node::TypeRef(ty))?;
                }
                if let Some(body) = &func.body {
                    f(Node::Block(body))?;
                }
            }
            Node::Class(class) => {
                for member in class.members {
                    f(Node::from_item(member))?;
                }
            }
            Node::Interface(interface) => {
                for method in interface.methods {
                    f(Node::InterfaceMethod(method))?;
                }
            }
            Node::InterfaceMethod(method) => {
                for param in method.params {
                    f(Node::Parameter(param))?;
                }
                if let Some(ty) = &method.return_type {
                    f(Node::TypeRef(ty))?;
                }
                if let Some(body) = &method.body {
                    f(Node::Block(body))?;
                }
            }
            Node::Property(prop) => {
                if let Some(ty) = &prop.ty {
                    f(Node::TypeRef(ty))?;
                }
                if let Some(init) = &prop.init {
                    f(Node::from_expr(init))?;
                }
            }
            Node::Parameter(param) => f(Node::TypeRef(&param.ty))?,
            Node::Block(block) => {
                for stmt in block.stmts {
                    f(Node::from_stmt(stmt))?;
                }
            }
            Node::ExprStmt(stmt) => f(Node::from_expr(&stmt.expr))?,
            Node::LocalVar(var) => {
                if let Some(ty) = &var.ty {
                    f(Node::TypeRef(ty))?;
                }
                if let Some(init) = &var.init {
                    f(Node::from_expr(init))?;
                }
            }
            Node::Return(ret) => {
                if let Some(value) = &ret.value {
                    f(Node::from_expr(value))?;
                }
            }
            Node::Call(call) => {
                f(Node::from_expr(&call.callee))?;
                for arg in call.args {
                    f(Node::from_expr(arg))?;
                }
            }
            Node::Lambda(lambda) => {
                for param in lambda.params {
                    f(Node::Parameter(param))?;
                }
                f(Node::Block(&lambda.body))?;
            }
            Node::SamConversion(conv) => {
                f(Node::TypeRef(&conv.interface))?;
                f(Node::Lambda(conv.lambda))?;
            }
            // Leaf nodes
            Node::TypeRef(_) | Node::Literal(_) | Node::Ident(_) => {}
        }
        Ok(())
    }

    /// Direct children, collected. Prefer [`Node::for_each_child`] on hot paths.
    pub fn children(self) -> Vec<Node<'ast>> {
        let mut children = Vec::new();
        let Ok(()) = self.for_each_child::<Infallible>(|child| {
            children.push(child);
            Ok(())
        });
        children
    }
}
