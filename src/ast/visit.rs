//! Node visitor infrastructure.
//!
//! [`accept`] routes a node to the `visit_*` method matching its kind. Every
//! kind-specific method falls back to [`Visit::visit_node`], whose default
//! walks the children, so a policy only overrides the kinds it cares about.

use std::ops::ControlFlow;

use crate::ast::node::{
    BinaryOperator, ClauseKind, IdentificationVariable, LiteralKind, NodeKind, PathExpression,
    StatementKind,
};
use crate::ast::tree::NodeRef;

/// Shared type alias for visitor traversal methods.
pub type VisitResult<B> = ControlFlow<B>;

macro_rules! try_visit {
    ($expr:expr) => {
        match $expr {
            ControlFlow::Continue(()) => {}
            ControlFlow::Break(b) => return ControlFlow::Break(b),
        }
    };
}

pub(crate) use try_visit;

/// Visitor over expression tree nodes.
pub trait Visit<'t> {
    /// Early-exit payload produced when traversal stops.
    type Break;

    /// Fallback for every kind without its own override.
    fn visit_node(&mut self, node: NodeRef<'t>) -> VisitResult<Self::Break> {
        walk_children(self, node)
    }

    fn visit_binary(&mut self, node: NodeRef<'t>, _op: BinaryOperator) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_collection(&mut self, node: NodeRef<'t>) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_sub_expression(&mut self, node: NodeRef<'t>) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_path(
        &mut self,
        node: NodeRef<'t>,
        _path: &'t PathExpression,
    ) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_null(&mut self, node: NodeRef<'t>) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_bad(&mut self, node: NodeRef<'t>) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_unknown(&mut self, node: NodeRef<'t>, _text: &'t str) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_clause(&mut self, node: NodeRef<'t>, _kind: ClauseKind) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_statement(
        &mut self,
        node: NodeRef<'t>,
        _kind: StatementKind,
    ) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_literal(
        &mut self,
        node: NodeRef<'t>,
        _kind: LiteralKind,
        _text: &'t str,
    ) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_identification_variable(
        &mut self,
        node: NodeRef<'t>,
        _variable: &'t IdentificationVariable,
    ) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_abstract_schema_name(
        &mut self,
        node: NodeRef<'t>,
        _name: &'t str,
    ) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_result_variable(
        &mut self,
        node: NodeRef<'t>,
        _name: &'t str,
    ) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }

    fn visit_function(&mut self, node: NodeRef<'t>, _name: &'t str) -> VisitResult<Self::Break> {
        self.visit_node(node)
    }
}

/// Dispatches `node` to the visitor method for its kind.
pub fn accept<'t, V: Visit<'t> + ?Sized>(
    visitor: &mut V,
    node: NodeRef<'t>,
) -> VisitResult<V::Break> {
    match node.kind() {
        NodeKind::Binary(op) => visitor.visit_binary(node, *op),
        NodeKind::Collection => visitor.visit_collection(node),
        NodeKind::SubExpression => visitor.visit_sub_expression(node),
        NodeKind::Path(path) => visitor.visit_path(node, path),
        NodeKind::Null => visitor.visit_null(node),
        NodeKind::Bad => visitor.visit_bad(node),
        NodeKind::Unknown(text) => visitor.visit_unknown(node, text),
        NodeKind::Clause(kind) => visitor.visit_clause(node, *kind),
        NodeKind::Statement(kind) => visitor.visit_statement(node, *kind),
        NodeKind::Literal(kind, text) => visitor.visit_literal(node, *kind, text),
        NodeKind::IdentificationVariable(variable) => {
            visitor.visit_identification_variable(node, variable)
        }
        NodeKind::AbstractSchemaName(name) => visitor.visit_abstract_schema_name(node, name),
        NodeKind::ResultVariable(name) => visitor.visit_result_variable(node, name),
        NodeKind::Function(name) => visitor.visit_function(node, name),
    }
}

/// Visits every child of `node` in order, stopping at the first break.
pub fn walk_children<'t, V: Visit<'t> + ?Sized>(
    visitor: &mut V,
    node: NodeRef<'t>,
) -> VisitResult<V::Break> {
    for child in node.children() {
        try_visit!(accept(visitor, child));
    }
    ControlFlow::Continue(())
}

/// Visits the parent of `node`, or continues if `node` is the root.
pub fn walk_parent<'t, V: Visit<'t> + ?Sized>(
    visitor: &mut V,
    node: NodeRef<'t>,
) -> VisitResult<V::Break> {
    match node.parent() {
        Some(parent) => accept(visitor, parent),
        None => ControlFlow::Continue(()),
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;
    use crate::ast::tree::TreeBuilder;

    #[derive(Default)]
    struct KindCounter {
        literals: usize,
        others: usize,
    }

    impl<'t> Visit<'t> for KindCounter {
        type Break = ();

        fn visit_node(&mut self, node: NodeRef<'t>) -> VisitResult<()> {
            self.others += 1;
            walk_children(self, node)
        }

        fn visit_literal(
            &mut self,
            _node: NodeRef<'t>,
            _kind: LiteralKind,
            _text: &'t str,
        ) -> VisitResult<()> {
            self.literals += 1;
            ControlFlow::Continue(())
        }
    }

    struct FirstBad;

    impl<'t> Visit<'t> for FirstBad {
        type Break = usize;

        fn visit_bad(&mut self, node: NodeRef<'t>) -> VisitResult<usize> {
            ControlFlow::Break(node.offset())
        }
    }

    #[test]
    fn overrides_coexist_with_fallback() {
        let mut builder = TreeBuilder::new();
        let list = builder.push(None, NodeKind::Collection, "list", 0..4);
        builder.push(Some(list), NodeKind::Literal(LiteralKind::Numeric, "1".into()), "n", 0..1);
        builder.push(Some(list), NodeKind::Null, "n", 2..2);
        builder.push(Some(list), NodeKind::Literal(LiteralKind::Numeric, "2".into()), "n", 3..4);
        let tree = builder.finish();

        let mut counter = KindCounter::default();
        let flow = accept(&mut counter, tree.node(list));
        assert!(matches!(flow, ControlFlow::Continue(())));
        assert_eq!(counter.literals, 2);
        assert_eq!(counter.others, 2);
    }

    #[test]
    fn break_stops_the_walk() {
        let mut builder = TreeBuilder::new();
        let list = builder.push(None, NodeKind::Collection, "list", 0..9);
        builder.push(Some(list), NodeKind::Bad, "bad", 2..3);
        builder.push(Some(list), NodeKind::Bad, "bad", 6..7);
        let tree = builder.finish();

        assert_eq!(accept(&mut FirstBad, tree.node(list)), ControlFlow::Break(2));
    }

    #[test]
    fn walk_parent_stops_at_root() {
        let mut builder = TreeBuilder::new();
        let root = builder.push(None, NodeKind::Null, "n", 0..0);
        let tree = builder.finish();
        assert_eq!(walk_parent(&mut FirstBad, tree.node(root)), ControlFlow::Continue(()));
    }
}
