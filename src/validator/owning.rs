//! Resolution of the clause or statement that encloses an expression.
//!
//! Both walks start at the given node and move toward the root, stopping at
//! the first node of a matching kind. A clause or statement therefore owns
//! itself. The walks are loops over the ancestor chain, so tree depth does
//! not consume stack.

use std::ops::ControlFlow;

use crate::ast::{ClauseKind, NodeRef, StatementKind, Visit, VisitResult, accept};

/// The clause that owns an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwningClause<'t> {
    Delete(NodeRef<'t>),
    From(NodeRef<'t>),
    GroupBy(NodeRef<'t>),
    Having(NodeRef<'t>),
    OrderBy(NodeRef<'t>),
    Select(NodeRef<'t>),
    SimpleFrom(NodeRef<'t>),
    SimpleSelect(NodeRef<'t>),
    Update(NodeRef<'t>),
    Where(NodeRef<'t>),
    Union(NodeRef<'t>),
}

impl<'t> OwningClause<'t> {
    fn new(kind: ClauseKind, node: NodeRef<'t>) -> Self {
        match kind {
            ClauseKind::Delete => Self::Delete(node),
            ClauseKind::From => Self::From(node),
            ClauseKind::GroupBy => Self::GroupBy(node),
            ClauseKind::Having => Self::Having(node),
            ClauseKind::OrderBy => Self::OrderBy(node),
            ClauseKind::Select => Self::Select(node),
            ClauseKind::SimpleFrom => Self::SimpleFrom(node),
            ClauseKind::SimpleSelect => Self::SimpleSelect(node),
            ClauseKind::Update => Self::Update(node),
            ClauseKind::Where => Self::Where(node),
            ClauseKind::Union => Self::Union(node),
        }
    }

    /// Returns the clause node.
    pub fn node(self) -> NodeRef<'t> {
        match self {
            Self::Delete(node)
            | Self::From(node)
            | Self::GroupBy(node)
            | Self::Having(node)
            | Self::OrderBy(node)
            | Self::Select(node)
            | Self::SimpleFrom(node)
            | Self::SimpleSelect(node)
            | Self::Update(node)
            | Self::Where(node)
            | Self::Union(node) => node,
        }
    }

    /// Returns the clause kind.
    pub fn kind(self) -> ClauseKind {
        match self {
            Self::Delete(_) => ClauseKind::Delete,
            Self::From(_) => ClauseKind::From,
            Self::GroupBy(_) => ClauseKind::GroupBy,
            Self::Having(_) => ClauseKind::Having,
            Self::OrderBy(_) => ClauseKind::OrderBy,
            Self::Select(_) => ClauseKind::Select,
            Self::SimpleFrom(_) => ClauseKind::SimpleFrom,
            Self::SimpleSelect(_) => ClauseKind::SimpleSelect,
            Self::Update(_) => ClauseKind::Update,
            Self::Where(_) => ClauseKind::Where,
            Self::Union(_) => ClauseKind::Union,
        }
    }
}

/// The statement that owns an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwningStatement<'t> {
    Delete(NodeRef<'t>),
    Select(NodeRef<'t>),
    /// A subquery.
    SimpleSelect(NodeRef<'t>),
    Update(NodeRef<'t>),
}

impl<'t> OwningStatement<'t> {
    fn new(kind: StatementKind, node: NodeRef<'t>) -> Self {
        match kind {
            StatementKind::Delete => Self::Delete(node),
            StatementKind::Select => Self::Select(node),
            StatementKind::SimpleSelect => Self::SimpleSelect(node),
            StatementKind::Update => Self::Update(node),
        }
    }

    /// Returns the statement node.
    pub fn node(self) -> NodeRef<'t> {
        match self {
            Self::Delete(node)
            | Self::Select(node)
            | Self::SimpleSelect(node)
            | Self::Update(node) => node,
        }
    }

    /// Returns true for a subquery.
    pub fn is_subquery(self) -> bool {
        matches!(self, Self::SimpleSelect(_))
    }
}

struct OwningClauseVisitor;

impl<'t> Visit<'t> for OwningClauseVisitor {
    type Break = OwningClause<'t>;

    fn visit_node(&mut self, _node: NodeRef<'t>) -> VisitResult<OwningClause<'t>> {
        ControlFlow::Continue(())
    }

    fn visit_clause(
        &mut self,
        node: NodeRef<'t>,
        kind: ClauseKind,
    ) -> VisitResult<OwningClause<'t>> {
        ControlFlow::Break(OwningClause::new(kind, node))
    }
}

struct OwningStatementVisitor;

impl<'t> Visit<'t> for OwningStatementVisitor {
    type Break = OwningStatement<'t>;

    fn visit_node(&mut self, _node: NodeRef<'t>) -> VisitResult<OwningStatement<'t>> {
        ControlFlow::Continue(())
    }

    fn visit_statement(
        &mut self,
        node: NodeRef<'t>,
        kind: StatementKind,
    ) -> VisitResult<OwningStatement<'t>> {
        ControlFlow::Break(OwningStatement::new(kind, node))
    }
}

/// Finds the nearest clause at or above `node`.
pub fn owning_clause(node: NodeRef<'_>) -> Option<OwningClause<'_>> {
    self_and_ancestors(node)
        .find_map(|candidate| accept(&mut OwningClauseVisitor, candidate).break_value())
}

/// Finds the nearest statement at or above `node`.
pub fn owning_statement(node: NodeRef<'_>) -> Option<OwningStatement<'_>> {
    self_and_ancestors(node)
        .find_map(|candidate| accept(&mut OwningStatementVisitor, candidate).break_value())
}

fn self_and_ancestors(node: NodeRef<'_>) -> impl Iterator<Item = NodeRef<'_>> {
    std::iter::once(node).chain(node.ancestors())
}
