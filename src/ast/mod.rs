//! Expression tree model consumed by the validator.

pub mod node;
mod span;
pub mod tree;
pub mod visit;

pub use node::{
    BinaryOperator, ClauseKind, IdentificationVariable, LiteralKind, NodeKind, PathExpression,
    StatementKind,
};
pub use span::{Span, span_at};
pub use tree::{Ancestors, ExpressionTree, NodeId, NodeRef, TreeBuilder};
pub use visit::{Visit, VisitResult, accept, walk_children, walk_parent};
