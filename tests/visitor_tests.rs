//! Traversal through the public visitor API.

mod common;

use std::convert::Infallible;

use common::{function, producer_conversion, producer_interface};
use samwrap::prelude::*;
use samwrap::syntax::{LambdaExpr, NodeKind, SamConversionExpr, walk, walk_children};

#[derive(Default)]
struct Trace {
    events: Vec<String>,
}

/// Logs every node it enters, and the file header.
struct Logger;

impl<'ast> Visitor<'ast, Trace> for Logger {
    type Error = Infallible;

    fn visit_element(&mut self, node: Node<'ast>, trace: &mut Trace) -> Result<(), Infallible> {
        trace.events.push(format!("{:?}", node.kind()));
        walk_children(self, node, trace)
    }

    fn visit_file_header(&mut self, file: &'ast SourceFile<'ast>, trace: &mut Trace) -> Result<(), Infallible> {
        trace.events.push(format!("header {}", file.path));
        Ok(())
    }
}

fn sample<'ast>(b: &AstBuilder<'ast>) -> &'ast SourceFile<'ast> {
    b.file(
        FileId::new(0),
        "Sample.kt",
        None,
        &[
            producer_interface(b),
            function(b, "main", false, &[producer_conversion(b)]),
        ],
    )
}

#[test]
fn test_header_runs_before_any_child() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let file = sample(&b);

    let mut trace = Trace::default();
    walk(&mut Logger, Node::File(file), &mut trace).unwrap();

    assert_eq!(trace.events[0], "header Sample.kt");
    assert_eq!(trace.events[1], "Interface");
    assert!(!trace.events.iter().any(|e| e == "File"));
}

#[test]
fn test_default_walk_reaches_every_node_once() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let file = sample(&b);

    let mut trace = Trace::default();
    walk(&mut Logger, Node::File(file), &mut trace).unwrap();

    // The header stands in for the file node.
    let created = b.nodes_created() as usize;
    assert_eq!(trace.events.len(), created);
    assert_eq!(
        trace.events[1..],
        [
            "Interface",
            "InterfaceMethod",
            "TypeRef",
            "Function",
            "Block",
            "ExprStmt",
            "SamConversion",
            "TypeRef",
            "Lambda",
            "Block",
            "ExprStmt",
            "Literal",
        ]
    );
}

/// Counts conversions but never looks inside their lambdas.
struct ShallowConversions {
    lambdas: usize,
}

impl<'ast> Visitor<'ast, usize> for ShallowConversions {
    type Error = Infallible;

    fn visit_sam_conversion(&mut self, _expr: &'ast SamConversionExpr<'ast>, count: &mut usize) -> Result<(), Infallible> {
        *count += 1;
        Ok(())
    }

    fn visit_lambda(&mut self, lambda: &'ast LambdaExpr<'ast>, count: &mut usize) -> Result<(), Infallible> {
        self.lambdas += 1;
        walk_children(self, Node::Lambda(lambda), count)
    }
}

#[test]
fn test_override_without_walk_prunes_subtree() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let inner = producer_conversion(&b);
    let outer_lambda = b.lambda(&[], b.block(&[inner]));
    let outer = b.expr_stmt(b.sam_conversion("Producer", outer_lambda));
    let file = b.file(
        FileId::new(0),
        "Nested.kt",
        None,
        &[producer_interface(&b), function(&b, "main", false, &[outer])],
    );

    let mut visitor = ShallowConversions { lambdas: 0 };
    let mut count = 0;
    walk(&mut visitor, Node::File(file), &mut count).unwrap();

    assert_eq!(count, 1);
    assert_eq!(visitor.lambdas, 0);
}

#[test]
fn test_node_kinds_match_children() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let file = sample(&b);

    let kinds: Vec<NodeKind> = Node::File(file).children().iter().map(Node::kind).collect();
    assert_eq!(kinds, vec![NodeKind::Interface, NodeKind::Function]);
}
