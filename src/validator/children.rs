//! Uniform access to "one expression or a comma list of expressions".

use std::convert::Infallible;
use std::ops::ControlFlow;

use crate::ast::{NodeRef, Visit, VisitResult, accept};

#[derive(Default)]
struct ChildrenCollector<'t> {
    expressions: Vec<NodeRef<'t>>,
}

impl<'t> Visit<'t> for ChildrenCollector<'t> {
    type Break = Infallible;

    fn visit_node(&mut self, node: NodeRef<'t>) -> VisitResult<Infallible> {
        self.expressions.push(node);
        ControlFlow::Continue(())
    }

    fn visit_collection(&mut self, node: NodeRef<'t>) -> VisitResult<Infallible> {
        self.expressions.extend(node.children());
        ControlFlow::Continue(())
    }

    fn visit_null(&mut self, _node: NodeRef<'t>) -> VisitResult<Infallible> {
        ControlFlow::Continue(())
    }
}

/// Returns the elements of a comma list, `[node]` for any other node, and
/// nothing for a missing expression.
pub fn collect_children(node: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    let mut collector = ChildrenCollector::default();
    match accept(&mut collector, node) {
        ControlFlow::Continue(()) => collector.expressions,
        ControlFlow::Break(never) => match never {},
    }
}
