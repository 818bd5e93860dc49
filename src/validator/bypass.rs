//! Traversals that look through comma lists and parentheses.

use std::ops::ControlFlow;

use crate::ast::{NodeKind, NodeRef, Visit, VisitResult, accept, walk_parent};

use super::conformance::RuleChecker;

/// Checks every element of a comma list instead of the list itself.
pub(crate) struct CollectionBypass<'c, 'v> {
    checker: &'c mut RuleChecker<'v>,
}

impl<'c, 'v> CollectionBypass<'c, 'v> {
    pub(crate) fn new(checker: &'c mut RuleChecker<'v>) -> Self {
        Self { checker }
    }

    pub(crate) fn check(&mut self, node: NodeRef<'_>) -> bool {
        matches!(accept(self, node), ControlFlow::Break(true))
    }
}

impl<'t> Visit<'t> for CollectionBypass<'_, '_> {
    type Break = bool;

    fn visit_node(&mut self, node: NodeRef<'t>) -> VisitResult<bool> {
        ControlFlow::Break(self.checker.check(node))
    }

    fn visit_collection(&mut self, node: NodeRef<'t>) -> VisitResult<bool> {
        for child in node.children().filter(|child| !child.is_null()) {
            if !self.checker.check(child) {
                return ControlFlow::Break(false);
            }
        }
        ControlFlow::Break(true)
    }
}

/// Forwards the first ancestor that is not a parenthesized wrapper to the
/// wrapped visitor.
pub struct BypassParentSubExpression<'a, V: ?Sized> {
    visitor: &'a mut V,
}

impl<'a, V: ?Sized> BypassParentSubExpression<'a, V> {
    /// Wraps `visitor`.
    pub fn new(visitor: &'a mut V) -> Self {
        Self { visitor }
    }
}

impl<'t, V: Visit<'t> + ?Sized> Visit<'t> for BypassParentSubExpression<'_, V> {
    type Break = V::Break;

    fn visit_node(&mut self, node: NodeRef<'t>) -> VisitResult<V::Break> {
        accept(&mut *self.visitor, node)
    }

    fn visit_sub_expression(&mut self, node: NodeRef<'t>) -> VisitResult<V::Break> {
        match logical_parent(node) {
            Some(parent) => accept(&mut *self.visitor, parent),
            None => ControlFlow::Continue(()),
        }
    }
}

/// Returns the nearest ancestor of `node` that is not a sub-expression.
pub fn logical_parent(node: NodeRef<'_>) -> Option<NodeRef<'_>> {
    node.ancestors()
        .find(|ancestor| !matches!(ancestor.kind(), NodeKind::SubExpression))
}

/// Visits the logical parent of `node`, skipping parenthesized wrappers.
///
/// Continues without calling `visitor` when every ancestor is a wrapper.
pub fn visit_logical_parent<'t, V: Visit<'t> + ?Sized>(
    node: NodeRef<'t>,
    visitor: &mut V,
) -> VisitResult<V::Break> {
    walk_parent(&mut BypassParentSubExpression::new(visitor), node)
}
