//! Detection of parenthesized comma lists such as `(a, b, c)`.

use std::ops::ControlFlow;

use crate::ast::{NodeRef, Visit, VisitResult, accept};

#[derive(Default)]
struct NestedArrayVisitor {
    in_sub_expression: bool,
}

impl<'t> Visit<'t> for NestedArrayVisitor {
    type Break = usize;

    fn visit_node(&mut self, _node: NodeRef<'t>) -> VisitResult<usize> {
        ControlFlow::Continue(())
    }

    fn visit_collection(&mut self, node: NodeRef<'t>) -> VisitResult<usize> {
        if self.in_sub_expression {
            ControlFlow::Break(node.child_count())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn visit_sub_expression(&mut self, node: NodeRef<'t>) -> VisitResult<usize> {
        if self.in_sub_expression {
            return ControlFlow::Continue(());
        }
        let Some(inner) = node.child(0) else {
            return ControlFlow::Continue(());
        };
        self.in_sub_expression = true;
        let flow = accept(self, inner);
        self.in_sub_expression = false;
        flow
    }
}

/// Returns the number of items when `node` is a parenthesized comma list.
///
/// Only the immediate inner expression counts: `((a, b))` is not a nested
/// array, and neither is a bare `a, b`.
pub fn nested_array_size(node: NodeRef<'_>) -> Option<usize> {
    match accept(&mut NestedArrayVisitor::default(), node) {
        ControlFlow::Break(size) => Some(size),
        ControlFlow::Continue(()) => None,
    }
}
