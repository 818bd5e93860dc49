//! Grammar-conformance validation for JPQL expression trees.
//!
//! The crate checks nodes of an already-parsed query against a graph of
//! named grammar rules and records positioned problems. Parsing, SQL
//! generation and message localization live elsewhere.
//!
//! # Example
//!
//! ```
//! use jpql_validator::ast::{BinaryOperator, ClauseKind, NodeKind, PathExpression, TreeBuilder};
//! use jpql_validator::grammar::{GrammarInfo, GrammarRule, RuleRegistry};
//! use jpql_validator::validator::{OwningClause, Validator};
//!
//! let grammar = RuleRegistry::from_rules(
//!     GrammarInfo::new("EclipseLink", "2.7", "2.2"),
//!     [
//!         GrammarRule::new("conditional_expression").with_child("comparison_expression"),
//!         GrammarRule::new("comparison_expression"),
//!         GrammarRule::new("state_field_path"),
//!     ],
//! )
//! .unwrap();
//!
//! // WHERE e.age = e.level
//! let mut builder = TreeBuilder::new();
//! let clause = builder.push(None, NodeKind::Clause(ClauseKind::Where), "where_clause", 0..21);
//! let condition = builder.push(
//!     Some(clause),
//!     NodeKind::Binary(BinaryOperator::Equal),
//!     "comparison_expression",
//!     6..21,
//! );
//! let left = builder.push(
//!     Some(condition),
//!     NodeKind::Path(PathExpression::new(["e", "age"])),
//!     "state_field_path",
//!     6..11,
//! );
//! let tree = builder.finish();
//!
//! let mut validator = Validator::new(&grammar);
//! assert!(validator.is_valid(tree.node(condition), "conditional_expression"));
//! assert!(matches!(
//!     validator.owning_clause(tree.node(left)),
//!     Some(OwningClause::Where(_))
//! ));
//! ```

pub mod ast;
pub mod diag;
pub mod grammar;
pub mod validator;

pub use ast::{ExpressionTree, NodeId, NodeKind, NodeRef, Span, TreeBuilder};
pub use diag::{Diag, DiagSeverity, SourceFile, convert_problems_to_reports};
pub use grammar::{Grammar, GrammarInfo, GrammarRule, RuleId, RuleRegistry};
pub use validator::{Problem, ProblemSink, ValidationConfig, Validator};
