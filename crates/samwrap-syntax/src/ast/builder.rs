//! Arena-backed construction of syntax trees.
//!
//! The builder numbers nodes in creation order and gives each one its own
//! line (`Span::point(n, 1)`), so every node in a built tree has a distinct
//! span. Names and slices are copied into the arena.

use std::cell::Cell;

use bumpalo::Bump;
use samwrap_core::{FileId, Span};

use crate::ast::decl::*;
use crate::ast::expr::*;
use crate::ast::stmt::*;
use crate::ast::{DeclModifiers, Ident, SourceFile, TypeRef};

pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    next_line: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            next_line: Cell::new(1),
        }
    }

    /// Number of nodes created so far.
    pub fn nodes_created(&self) -> u32 {
        self.next_line.get() - 1
    }

    fn span(&self) -> Span {
        let line = self.next_line.get();
        self.next_line.set(line + 1);
        Span::point(line, 1)
    }

    fn str(&self, s: &str) -> &'ast str {
        self.arena.alloc_str(s)
    }

    fn slice<T: Copy>(&self, items: &[T]) -> &'ast [T] {
        self.arena.alloc_slice_copy(items)
    }

    fn ident(&self, name: &str, span: Span) -> Ident<'ast> {
        Ident::new(self.str(name), span)
    }

    // === Declarations ===

    pub fn file(
        &self,
        id: FileId,
        path: &str,
        package: Option<&str>,
        items: &[Item<'ast>],
    ) -> &'ast SourceFile<'ast> {
        self.arena.alloc(SourceFile {
            id,
            path: self.str(path),
            package: package.map(|p| self.str(p)),
            items: self.slice(items),
            span: self.span(),
        })
    }

    pub fn function(
        &self,
        modifiers: DeclModifiers,
        name: &str,
        params: &[Param<'ast>],
        return_type: Option<TypeRef<'ast>>,
        body: Option<Block<'ast>>,
    ) -> &'ast FunctionDecl<'ast> {
        let span = self.span();
        self.arena.alloc(FunctionDecl {
            modifiers,
            name: self.ident(name, span),
            params: self.slice(params),
            return_type,
            body,
            span,
        })
    }

    pub fn class(
        &self,
        modifiers: DeclModifiers,
        name: &str,
        members: &[Item<'ast>],
    ) -> &'ast ClassDecl<'ast> {
        let span = self.span();
        self.arena.alloc(ClassDecl {
            modifiers,
            name: self.ident(name, span),
            members: self.slice(members),
            span,
        })
    }

    pub fn interface(
        &self,
        modifiers: DeclModifiers,
        name: &str,
        methods: &[InterfaceMethod<'ast>],
    ) -> &'ast InterfaceDecl<'ast> {
        let span = self.span();
        self.arena.alloc(InterfaceDecl {
            modifiers,
            name: self.ident(name, span),
            methods: self.slice(methods),
            span,
        })
    }

    pub fn interface_method(
        &self,
        name: &str,
        params: &[Param<'ast>],
        return_type: Option<TypeRef<'ast>>,
        body: Option<Block<'ast>>,
    ) -> InterfaceMethod<'ast> {
        let span = self.span();
        InterfaceMethod {
            name: self.ident(name, span),
            params: self.slice(params),
            return_type,
            body,
            span,
        }
    }

    pub fn property(
        &self,
        name: &str,
        ty: Option<TypeRef<'ast>>,
        init: Option<Expr<'ast>>,
    ) -> &'ast PropertyDecl<'ast> {
        let span = self.span();
        self.arena.alloc(PropertyDecl {
            name: self.ident(name, span),
            ty,
            init,
            span,
        })
    }

    pub fn param(&self, name: &str, ty: TypeRef<'ast>) -> Param<'ast> {
        let span = self.span();
        Param {
            name: self.ident(name, span),
            ty,
            span,
        }
    }

    pub fn ty(&self, name: &str) -> TypeRef<'ast> {
        TypeRef {
            name: self.str(name),
            nullable: false,
            span: self.span(),
        }
    }

    pub fn nullable_ty(&self, name: &str) -> TypeRef<'ast> {
        TypeRef {
            nullable: true,
            ..self.ty(name)
        }
    }

    // === Statements ===

    pub fn block(&self, stmts: &[Stmt<'ast>]) -> Block<'ast> {
        Block {
            stmts: self.slice(stmts),
            span: self.span(),
        }
    }

    /// Wrap an already built block as a nested block statement.
    pub fn block_stmt(&self, block: Block<'ast>) -> Stmt<'ast> {
        Stmt::Block(self.arena.alloc(block))
    }

    pub fn expr_stmt(&self, expr: Expr<'ast>) -> Stmt<'ast> {
        Stmt::Expr(self.arena.alloc(ExprStmt {
            expr,
            span: self.span(),
        }))
    }

    pub fn local_var(
        &self,
        name: &str,
        ty: Option<TypeRef<'ast>>,
        init: Option<Expr<'ast>>,
    ) -> Stmt<'ast> {
        let span = self.span();
        Stmt::LocalVar(self.arena.alloc(LocalVarStmt {
            name: self.ident(name, span),
            ty,
            init,
            span,
        }))
    }

    pub fn ret(&self, value: Option<Expr<'ast>>) -> Stmt<'ast> {
        Stmt::Return(self.arena.alloc(ReturnStmt {
            value,
            span: self.span(),
        }))
    }

    // === Expressions ===

    fn literal(&self, kind: LiteralKind<'ast>) -> Expr<'ast> {
        Expr::Literal(self.arena.alloc(LiteralExpr {
            kind,
            span: self.span(),
        }))
    }

    pub fn int(&self, value: i64) -> Expr<'ast> {
        self.literal(LiteralKind::Int(value))
    }

    pub fn bool(&self, value: bool) -> Expr<'ast> {
        self.literal(LiteralKind::Bool(value))
    }

    pub fn string(&self, value: &str) -> Expr<'ast> {
        self.literal(LiteralKind::String(self.str(value)))
    }

    pub fn null(&self) -> Expr<'ast> {
        self.literal(LiteralKind::Null)
    }

    pub fn name(&self, name: &str) -> Expr<'ast> {
        let span = self.span();
        Expr::Ident(self.arena.alloc(IdentExpr {
            ident: self.ident(name, span),
            span,
        }))
    }

    pub fn call(&self, callee: Expr<'ast>, args: &[Expr<'ast>]) -> Expr<'ast> {
        Expr::Call(self.arena.alloc(CallExpr {
            callee,
            args: self.slice(args),
            span: self.span(),
        }))
    }

    pub fn lambda(&self, params: &[Param<'ast>], body: Block<'ast>) -> &'ast LambdaExpr<'ast> {
        self.arena.alloc(LambdaExpr {
            params: self.slice(params),
            body,
            span: self.span(),
        })
    }

    /// `interface { ... }`: a lambda converted to the named interface.
    pub fn sam_conversion(&self, interface: &str, lambda: &'ast LambdaExpr<'ast>) -> Expr<'ast> {
        let interface = self.ty(interface);
        Expr::SamConversion(self.arena.alloc(SamConversionExpr {
            interface,
            lambda,
            span: self.span(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_node_gets_its_own_line() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let a = b.int(1);
        let c = b.int(2);
        assert_eq!(a.span(), Span::point(1, 1));
        assert_eq!(c.span(), Span::point(2, 1));
        assert_eq!(b.nodes_created(), 2);
    }

    #[test]
    fn names_are_copied_into_the_arena() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let name = String::from("compute");
        let func = b.function(DeclModifiers::INLINE, &name, &[], None, None);
        drop(name);
        assert_eq!(func.name.name, "compute");
        assert!(func.is_inline());
    }

    #[test]
    fn sam_conversion_counts_interface_reference() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let body = b.block(&[]);
        let lambda = b.lambda(&[], body);
        let conv = b.sam_conversion("Runnable", lambda);
        // block, lambda, type ref, conversion
        assert_eq!(b.nodes_created(), 4);
        let Expr::SamConversion(conv) = conv else {
            panic!("expected a SAM conversion");
        };
        assert_eq!(conv.interface.name, "Runnable");
    }

    #[test]
    fn nullable_type() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let ty = b.nullable_ty("String");
        assert!(ty.nullable);
        assert_eq!(ty.name, "String");
    }
}
