//! Arena-backed expression tree.
//!
//! Nodes live in a flat vector and refer to each other by [`NodeId`]. The
//! parent link is a plain index, so walking upward never takes ownership of
//! anything; children are owned by their parent's entry.

use std::fmt;

use crate::ast::Span;
use crate::ast::node::NodeKind;
use crate::grammar::RuleId;

/// Unique identifier for a node within one [`ExpressionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw index.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    rule: RuleId,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An immutable expression tree produced by a parser.
#[derive(Debug, Clone, Default)]
pub struct ExpressionTree {
    nodes: Vec<NodeData>,
}

impl ExpressionTree {
    /// Returns the first node that has no parent.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.nodes
            .iter()
            .position(|data| data.parent.is_none())
            .map(|index| NodeRef {
                tree: self,
                id: NodeId(index),
            })
    }

    /// Returns a cursor on the given node, if it belongs to this tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Returns a cursor on the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by the builder of this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "node {id} is not part of this tree");
        NodeRef { tree: self, id }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(move |index| NodeRef {
            tree: self,
            id: NodeId(index),
        })
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Incrementally assembles an [`ExpressionTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node, linking it as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not returned by this builder.
    pub fn push(
        &mut self,
        parent: Option<NodeId>,
        kind: NodeKind,
        rule: impl Into<RuleId>,
        span: Span,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = parent {
            let parent_data = self
                .nodes
                .get_mut(parent.0)
                .unwrap_or_else(|| panic!("parent {parent} was not created by this builder"));
            parent_data.children.push(id);
        }
        self.nodes.push(NodeData {
            kind,
            rule: rule.into(),
            span,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Finishes building.
    pub fn finish(self) -> ExpressionTree {
        ExpressionTree { nodes: self.nodes }
    }
}

/// A borrowed cursor on one node of an [`ExpressionTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t ExpressionTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    /// Returns this node's identifier.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Returns the tree this node belongs to.
    pub fn tree(self) -> &'t ExpressionTree {
        self.tree
    }

    /// Returns the node kind.
    pub fn kind(self) -> &'t NodeKind {
        &self.tree.data(self.id).kind
    }

    /// Returns the id of the grammar rule this node was parsed with.
    pub fn rule(self) -> &'t RuleId {
        &self.tree.data(self.id).rule
    }

    /// Returns the source span.
    pub fn span(self) -> Span {
        self.tree.data(self.id).span.clone()
    }

    /// Returns the source offset.
    pub fn offset(self) -> usize {
        self.tree.data(self.id).span.start
    }

    /// Returns the length in the source text.
    pub fn length(self) -> usize {
        self.tree.data(self.id).span.len()
    }

    /// Returns the parent node, if any.
    pub fn parent(self) -> Option<NodeRef<'t>> {
        self.tree.data(self.id).parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Iterates over the children in source order.
    pub fn children(self) -> impl ExactSizeIterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Returns the child at `index`.
    pub fn child(self, index: usize) -> Option<NodeRef<'t>> {
        self.tree
            .data(self.id)
            .children
            .get(index)
            .map(|&id| NodeRef {
                tree: self.tree,
                id,
            })
    }

    /// Returns the number of children.
    pub fn child_count(self) -> usize {
        self.tree.data(self.id).children.len()
    }

    /// Iterates from this node's parent up to the root.
    pub fn ancestors(self) -> Ancestors<'t> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Returns true for the missing-expression placeholder.
    pub fn is_null(self) -> bool {
        matches!(self.kind(), NodeKind::Null)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", self.kind())
            .field("rule", self.rule())
            .field("span", &self.span())
            .finish()
    }
}

/// Iterator over the ancestors of a node, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<'t> {
    next: Option<NodeRef<'t>>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::node::{BinaryOperator, ClauseKind, LiteralKind};

    fn sample() -> (ExpressionTree, NodeId, NodeId, NodeId) {
        let mut builder = TreeBuilder::new();
        let clause = builder.push(None, NodeKind::Clause(ClauseKind::Where), "where_clause", 0..11);
        let binary = builder.push(
            Some(clause),
            NodeKind::Binary(BinaryOperator::Add),
            "arithmetic_expression",
            6..11,
        );
        let left = builder.push(
            Some(binary),
            NodeKind::Literal(LiteralKind::Numeric, "1".into()),
            "numeric_literal",
            6..7,
        );
        builder.push(
            Some(binary),
            NodeKind::Literal(LiteralKind::Numeric, "2".into()),
            "numeric_literal",
            10..11,
        );
        (builder.finish(), clause, binary, left)
    }

    #[test]
    fn links_parents_and_children() {
        let (tree, clause, binary, left) = sample();
        assert_eq!(tree.len(), 4);

        let binary = tree.node(binary);
        assert_eq!(binary.parent().map(NodeRef::id), Some(clause));
        assert_eq!(binary.child_count(), 2);
        assert_eq!(binary.child(0).map(NodeRef::id), Some(left));
        assert!(binary.child(2).is_none());
    }

    #[test]
    fn root_is_first_parentless_node() {
        let (tree, clause, _, _) = sample();
        assert_eq!(tree.root().map(NodeRef::id), Some(clause));
        assert!(ExpressionTree::default().root().is_none());
    }

    #[test]
    fn ancestors_walk_to_root() {
        let (tree, clause, binary, left) = sample();
        let chain: Vec<_> = tree.node(left).ancestors().map(NodeRef::id).collect();
        assert_eq!(chain, vec![binary, clause]);
    }

    #[test]
    fn offsets_come_from_span() {
        let (tree, _, binary, _) = sample();
        let node = tree.node(binary);
        assert_eq!(node.offset(), 6);
        assert_eq!(node.length(), 5);
        assert_eq!(node.rule().as_str(), "arithmetic_expression");
    }

    #[test]
    fn get_rejects_foreign_ids() {
        let (tree, _, _, _) = sample();
        assert!(tree.get(NodeId(99)).is_none());
    }
}
