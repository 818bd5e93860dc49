//! Subquery detection.

use crate::ast::{NodeKind, NodeRef, StatementKind};

use super::owning::{OwningStatement, owning_statement};

/// Returns true if `node` is itself a subquery statement.
pub fn is_subquery(node: NodeRef<'_>) -> bool {
    matches!(node.kind(), NodeKind::Statement(StatementKind::SimpleSelect))
}

/// Returns true if the nearest statement at or above `node` is a subquery.
pub fn is_within_subquery(node: NodeRef<'_>) -> bool {
    owning_statement(node).is_some_and(OwningStatement::is_subquery)
}

/// Returns true if the nearest statement at or above `node` is a top-level
/// `SELECT`, `UPDATE` or `DELETE`.
pub fn is_within_top_level_query(node: NodeRef<'_>) -> bool {
    owning_statement(node).is_some_and(|statement| !statement.is_subquery())
}
