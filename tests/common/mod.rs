//! Common test utilities
//!
//! Shared grammar and tree fixtures for the integration tests.
//!
//! # Grammar
//! - [`fixture_grammar`] - A small JPQL rule graph with a cycle and a compound rule
//!
//! # Tree helpers
//! - [`numeric`], [`string`], [`path`] - Leaf constructors
//! - [`function`] - Arithmetic function node (`ABS`, `SQRT`, `MOD`)
//! - [`SubqueryScenario`] - Outer query with a subquery in its WHERE clause

#![allow(dead_code)]

use jpql_validator::ExpressionTree;
use jpql_validator::ast::{
    BinaryOperator, ClauseKind, LiteralKind, NodeId, NodeKind, PathExpression, StatementKind,
    TreeBuilder,
};
use jpql_validator::grammar::{GrammarInfo, GrammarRule, RuleRegistry};

// ============================================================================
// Grammar
// ============================================================================

/// Builds the grammar used across tests.
///
/// `arithmetic_primary` refers back to `arithmetic_expression`, and
/// `functions_returning_numerics` is compound.
pub fn fixture_grammar() -> RuleRegistry {
    let rules = [
        GrammarRule::new("conditional_expression")
            .with_children(["conditional_term", "comparison_expression"]),
        GrammarRule::new("conditional_term").with_child("comparison_expression"),
        GrammarRule::new("comparison_expression"),
        GrammarRule::new("scalar_expression")
            .with_children(["arithmetic_expression", "string_expression"]),
        GrammarRule::new("arithmetic_expression")
            .with_children(["arithmetic_term", "arithmetic_primary"]),
        GrammarRule::new("arithmetic_term").with_child("arithmetic_factor"),
        GrammarRule::new("arithmetic_factor").with_child("arithmetic_primary"),
        GrammarRule::new("arithmetic_primary").with_children([
            "numeric_literal",
            "state_field_path",
            "input_parameter",
            "functions_returning_numerics",
            "arithmetic_expression",
            "subquery",
        ]),
        GrammarRule::compound("functions_returning_numerics").with_children([
            "abs_expression",
            "sqrt_expression",
            "mod_expression",
        ]),
        GrammarRule::new("abs_expression"),
        GrammarRule::new("sqrt_expression"),
        GrammarRule::new("mod_expression"),
        GrammarRule::new("string_expression").with_children(["string_literal", "state_field_path"]),
        GrammarRule::new("in_item").with_children([
            "numeric_literal",
            "string_literal",
            "input_parameter",
        ]),
        GrammarRule::new("numeric_literal"),
        GrammarRule::new("string_literal"),
        GrammarRule::new("state_field_path"),
        GrammarRule::new("general_path"),
        GrammarRule::new("input_parameter"),
        GrammarRule::new("identification_variable"),
        GrammarRule::new("subquery"),
        GrammarRule::new("sub_expression"),
        GrammarRule::new("collection_expression"),
        GrammarRule::new("select_statement"),
        GrammarRule::new("select_clause"),
        GrammarRule::new("simple_select_clause"),
        GrammarRule::new("from_clause"),
        GrammarRule::new("where_clause"),
    ];
    let grammar = RuleRegistry::from_rules(GrammarInfo::new("EclipseLink", "2.7", "2.2"), rules)
        .expect("fixture grammar has unique ids");
    grammar
        .check_references()
        .expect("fixture grammar has no dangling references");
    grammar
}

// ============================================================================
// Tree helpers
// ============================================================================

pub fn numeric(
    builder: &mut TreeBuilder,
    parent: Option<NodeId>,
    text: &str,
    offset: usize,
) -> NodeId {
    builder.push(
        parent,
        NodeKind::Literal(LiteralKind::Numeric, text.into()),
        "numeric_literal",
        offset..offset + text.len(),
    )
}

pub fn string(
    builder: &mut TreeBuilder,
    parent: Option<NodeId>,
    text: &str,
    offset: usize,
) -> NodeId {
    builder.push(
        parent,
        NodeKind::Literal(LiteralKind::String, text.into()),
        "string_literal",
        offset..offset + text.len(),
    )
}

pub fn path(
    builder: &mut TreeBuilder,
    parent: Option<NodeId>,
    text: &str,
    offset: usize,
) -> NodeId {
    builder.push(
        parent,
        NodeKind::Path(PathExpression::new(text.split('.'))),
        "state_field_path",
        offset..offset + text.len(),
    )
}

/// Pushes `NAME(` ... `)` spanning `span_len` bytes; arguments are added by the caller.
pub fn function(
    builder: &mut TreeBuilder,
    parent: Option<NodeId>,
    name: &str,
    offset: usize,
    span_len: usize,
) -> NodeId {
    let rule = format!("{}_expression", name.to_ascii_lowercase());
    builder.push(
        parent,
        NodeKind::Function(name.into()),
        rule,
        offset..offset + span_len,
    )
}

pub fn collection(
    builder: &mut TreeBuilder,
    parent: Option<NodeId>,
    offset: usize,
    len: usize,
) -> NodeId {
    builder.push(
        parent,
        NodeKind::Collection,
        "collection_expression",
        offset..offset + len,
    )
}

pub fn parenthesized(
    builder: &mut TreeBuilder,
    parent: Option<NodeId>,
    offset: usize,
    len: usize,
) -> NodeId {
    builder.push(
        parent,
        NodeKind::SubExpression,
        "sub_expression",
        offset..offset + len,
    )
}

// ============================================================================
// Scenarios
// ============================================================================

/// `SELECT e FROM Employee e WHERE e.salary > (SELECT AVG(m.salary) FROM Manager m) AND e.age = 30`
pub struct SubqueryScenario {
    pub tree: ExpressionTree,
    pub outer_select: NodeId,
    pub where_clause: NodeId,
    pub outer_path: NodeId,
    pub age_path: NodeId,
    pub subquery: NodeId,
    pub inner_select_clause: NodeId,
    pub inner_path: NodeId,
    pub inner_from_clause: NodeId,
}

impl SubqueryScenario {
    pub fn build() -> Self {
        let mut builder = TreeBuilder::new();
        let outer_select = builder.push(
            None,
            NodeKind::Statement(StatementKind::Select),
            "select_statement",
            0..94,
        );
        let select_clause = builder.push(
            Some(outer_select),
            NodeKind::Clause(ClauseKind::Select),
            "select_clause",
            0..8,
        );
        builder.push(
            Some(select_clause),
            NodeKind::IdentificationVariable(jpql_validator::ast::IdentificationVariable::new("e")),
            "identification_variable",
            7..8,
        );
        let where_clause = builder.push(
            Some(outer_select),
            NodeKind::Clause(ClauseKind::Where),
            "where_clause",
            25..94,
        );
        let and = builder.push(
            Some(where_clause),
            NodeKind::Binary(BinaryOperator::And),
            "conditional_term",
            31..94,
        );
        let comparison = builder.push(
            Some(and),
            NodeKind::Binary(BinaryOperator::GreaterThan),
            "comparison_expression",
            31..79,
        );
        let outer_path = path(&mut builder, Some(comparison), "e.salary", 31);
        let subquery = builder.push(
            Some(comparison),
            NodeKind::Statement(StatementKind::SimpleSelect),
            "subquery",
            42..79,
        );
        let inner_select_clause = builder.push(
            Some(subquery),
            NodeKind::Clause(ClauseKind::SimpleSelect),
            "simple_select_clause",
            43..62,
        );
        let avg = function(&mut builder, Some(inner_select_clause), "AVG", 50, 13);
        let inner_path = path(&mut builder, Some(avg), "m.salary", 54);
        let inner_from_clause = builder.push(
            Some(subquery),
            NodeKind::Clause(ClauseKind::SimpleFrom),
            "from_clause",
            63..78,
        );
        let age = builder.push(
            Some(and),
            NodeKind::Binary(BinaryOperator::Equal),
            "comparison_expression",
            84..94,
        );
        let age_path = path(&mut builder, Some(age), "e.age", 84);
        numeric(&mut builder, Some(age), "30", 92);

        Self {
            tree: builder.finish(),
            outer_select,
            where_clause,
            outer_path,
            age_path,
            subquery,
            inner_select_clause,
            inner_path,
            inner_from_clause,
        }
    }
}
