//! Visitor pattern for traversing the syntax tree.
//!
//! Every `visit_*` method defaults to [`Visitor::visit_element`], whose default
//! in turn walks all structural children. A visitor therefore only overrides
//! the node kinds it cares about; an override decides for itself whether to
//! keep descending by calling [`walk_children`].
//!
//! Files are special: [`Visitor::visit_file`] first runs the unit hook
//! [`Visitor::visit_file_header`] to completion, and only then visits the
//! file's items. Visitors that accumulate per-file state rely on that order.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//!
//! use bumpalo::Bump;
//! use samwrap_core::FileId;
//! use samwrap_syntax::{AstBuilder, DeclModifiers, FunctionDecl, Item, Node, Visitor, walk, walk_children};
//!
//! struct FunctionCounter;
//!
//! impl<'ast> Visitor<'ast, usize> for FunctionCounter {
//!     type Error = Infallible;
//!
//!     fn visit_function(&mut self, func: &'ast FunctionDecl<'ast>, count: &mut usize) -> Result<(), Infallible> {
//!         *count += 1;
//!         walk_children(self, Node::Function(func), count)
//!     }
//! }
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let foo = b.function(DeclModifiers::empty(), "foo", &[], None, Some(b.block(&[])));
//! let bar = b.function(DeclModifiers::empty(), "bar", &[], None, Some(b.block(&[])));
//! let file = b.file(FileId::new(0), "A.kt", None, &[Item::Function(foo), Item::Function(bar)]);
//!
//! let mut count = 0;
//! walk(&mut FunctionCounter, Node::File(file), &mut count).unwrap();
//! assert_eq!(count, 2);
//! ```

use crate::ast::decl::*;
use crate::ast::expr::*;
use crate::ast::node::Node;
use crate::ast::stmt::*;
use crate::ast::{SourceFile, TypeRef};

/// Visitor over syntax nodes, threading caller data `D` through the walk.
///
/// The neutral result is `Ok(())`; the first `Err` stops the traversal and is
/// returned from [`walk`]. Visitors that cannot fail use
/// [`std::convert::Infallible`] as their error type.
pub trait Visitor<'ast, D>: Sized {
    type Error;

    /// Fallback for every node kind without a specific override.
    fn visit_element(&mut self, node: Node<'ast>, data: &mut D) -> Result<(), Self::Error> {
        walk_children(self, node, data)
    }

    // === Compilation unit ===

    /// Visit a file: the unit hook first, then each item.
    fn visit_file(&mut self, file: &'ast SourceFile<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_file_header(file, data)?;
        walk_children(self, Node::File(file), data)
    }

    /// Unit-level hook, run before any of the file's children are visited.
    fn visit_file_header(
        &mut self,
        _file: &'ast SourceFile<'ast>,
        _data: &mut D,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    // === Declarations ===

    /// Visit a function declaration.
    fn visit_function(&mut self, func: &'ast FunctionDecl<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Function(func), data)
    }

    /// Visit a class declaration.
    fn visit_class(&mut self, class: &'ast ClassDecl<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Class(class), data)
    }

    /// Visit an interface declaration.
    fn visit_interface(
        &mut self,
        interface: &'ast InterfaceDecl<'ast>,
        data: &mut D,
    ) -> Result<(), Self::Error> {
        self.visit_element(Node::Interface(interface), data)
    }

    /// Visit an interface method, abstract or with a default body.
    fn visit_interface_method(
        &mut self,
        method: &'ast InterfaceMethod<'ast>,
        data: &mut D,
    ) -> Result<(), Self::Error> {
        self.visit_element(Node::InterfaceMethod(method), data)
    }

    /// Visit a property declaration.
    fn visit_property(&mut self, prop: &'ast PropertyDecl<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Property(prop), data)
    }

    /// Visit a function, method or lambda parameter.
    fn visit_parameter(&mut self, param: &'ast Param<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Parameter(param), data)
    }

    /// Visit a type reference.
    fn visit_type_ref(&mut self, ty: &'ast TypeRef<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::TypeRef(ty), data)
    }

    // === Statements ===

    /// Visit a block of statements.
    fn visit_block(&mut self, block: &'ast Block<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Block(block), data)
    }

    /// Visit an expression statement.
    fn visit_expr_stmt(&mut self, stmt: &'ast ExprStmt<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::ExprStmt(stmt), data)
    }

    /// Visit a local variable declaration.
    fn visit_local_var(&mut self, var: &'ast LocalVarStmt<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::LocalVar(var), data)
    }

    /// Visit a return statement.
    fn visit_return(&mut self, stmt: &'ast ReturnStmt<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Return(stmt), data)
    }

    // === Expressions ===

    /// Visit a literal expression.
    fn visit_literal(&mut self, expr: &'ast LiteralExpr<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Literal(expr), data)
    }

    /// Visit an identifier expression.
    fn visit_ident(&mut self, expr: &'ast IdentExpr<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Ident(expr), data)
    }

    /// Visit a call expression.
    fn visit_call(&mut self, expr: &'ast CallExpr<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Call(expr), data)
    }

    /// Visit a lambda expression.
    fn visit_lambda(&mut self, expr: &'ast LambdaExpr<'ast>, data: &mut D) -> Result<(), Self::Error> {
        self.visit_element(Node::Lambda(expr), data)
    }

    /// Visit a lambda converted to a SAM interface.
    fn visit_sam_conversion(
        &mut self,
        expr: &'ast SamConversionExpr<'ast>,
        data: &mut D,
    ) -> Result<(), Self::Error> {
        self.visit_element(Node::SamConversion(expr), data)
    }
}

/// Dispatch `node` to the matching `visit_*` method.
pub fn walk<'ast, V, D>(visitor: &mut V, node: Node<'ast>, data: &mut D) -> Result<(), V::Error>
where
    V: Visitor<'ast, D>,
{
    match node {
        Node::File(n) => visitor.visit_file(n, data),
        Node::Function(n) => visitor.visit_function(n, data),
        Node::Class(n) => visitor.visit_class(n, data),
        Node::Interface(n) => visitor.visit_interface(n, data),
        Node::InterfaceMethod(n) => visitor.visit_interface_method(n, data),
        Node::Property(n) => visitor.visit_property(n, data),
        Node::Parameter(n) => visitor.visit_parameter(n, data),
        Node::TypeRef(n) => visitor.visit_type_ref(n, data),
        Node::Block(n) => visitor.visit_block(n, data),
        Node::ExprStmt(n) => visitor.visit_expr_stmt(n, data),
        Node::LocalVar(n) => visitor.visit_local_var(n, data),
        Node::Return(n) => visitor.visit_return(n, data),
        Node::Literal(n) => visitor.visit_literal(n, data),
        Node::Ident(n) => visitor.visit_ident(n, data),
        Node::Call(n) => visitor.visit_call(n, data),
        Node::Lambda(n) => visitor.visit_lambda(n, data),
        Node::SamConversion(n) => visitor.visit_sam_conversion(n, data),
    }
}

/// Visit every direct child of `node`, propagating the first error.
pub fn walk_children<'ast, V, D>(visitor: &mut V, node: Node<'ast>, data: &mut D) -> Result<(), V::Error>
where
    V: Visitor<'ast, D>,
{
    node.for_each_child(|child| walk(visitor, child, data))
}
