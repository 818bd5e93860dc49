//! Expression node kinds for JPQL trees.
//!
//! The set of kinds is closed: every traversal policy matches exhaustively
//! over [`NodeKind`], so adding a kind forces every policy to decide how to
//! handle it.

use std::fmt;

use smol_str::SmolStr;

use crate::grammar::RuleId;

// ============================================================================
// NodeKind - Top-level node discriminant
// ============================================================================

/// The concrete kind of an expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Binary operator (`a + b`, `a AND b`, `a = b`, ...).
    Binary(BinaryOperator),

    /// Comma-separated list of sibling expressions.
    Collection,

    /// Parenthesized expression. Its only child, if any, is the inner expression.
    SubExpression,

    /// Dotted path expression (`e.address.city`).
    Path(PathExpression),

    /// Missing expression placeholder inserted by the parser.
    Null,

    /// Fragment the parser could not make sense of.
    Bad,

    /// Unrecognized text kept verbatim.
    Unknown(SmolStr),

    /// Clause marker (`WHERE`, `FROM`, ...).
    Clause(ClauseKind),

    /// Statement marker (`SELECT`, `UPDATE`, a subquery, ...).
    Statement(StatementKind),

    /// Literal value with its source text.
    Literal(LiteralKind, SmolStr),

    /// Identification variable (`e` in `FROM Employee e`).
    IdentificationVariable(IdentificationVariable),

    /// Entity name used as a range declaration root (`Employee`).
    AbstractSchemaName(SmolStr),

    /// `expr AS name`. The aliased expression is the first child.
    ResultVariable(SmolStr),

    /// Function invocation (`ABS`, `SQRT`, `MOD`, ...). Arguments are children.
    Function(SmolStr),
}

impl NodeKind {
    /// Returns a short human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Binary(_) => "binary expression",
            Self::Collection => "collection expression",
            Self::SubExpression => "sub-expression",
            Self::Path(_) => "path expression",
            Self::Null => "missing expression",
            Self::Bad => "bad expression",
            Self::Unknown(_) => "unknown expression",
            Self::Clause(_) => "clause",
            Self::Statement(_) => "statement",
            Self::Literal(_, _) => "literal",
            Self::IdentificationVariable(_) => "identification variable",
            Self::AbstractSchemaName(_) => "abstract schema name",
            Self::ResultVariable(_) => "result variable",
            Self::Function(_) => "function expression",
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    And,
    Or,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl BinaryOperator {
    /// Returns the operator as written in JPQL.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }

    /// Returns true for `+`, `-`, `*` and `/`.
    pub fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Subtract | Self::Multiply | Self::Divide)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Clauses and statements
// ============================================================================

/// Clause markers that can own an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Delete,
    From,
    GroupBy,
    Having,
    OrderBy,
    Select,
    /// `FROM` clause of a subquery.
    SimpleFrom,
    /// `SELECT` clause of a subquery.
    SimpleSelect,
    Update,
    Where,
    Union,
}

impl ClauseKind {
    /// Returns the clause identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "DELETE FROM",
            Self::From | Self::SimpleFrom => "FROM",
            Self::GroupBy => "GROUP BY",
            Self::Having => "HAVING",
            Self::OrderBy => "ORDER BY",
            Self::Select | Self::SimpleSelect => "SELECT",
            Self::Update => "UPDATE",
            Self::Where => "WHERE",
            Self::Union => "UNION",
        }
    }
}

/// Statement markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Delete,
    Select,
    /// Parenthesized subquery.
    SimpleSelect,
    Update,
}

// ============================================================================
// Leaves
// ============================================================================

/// Literal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Numeric,
    String,
    Boolean,
    /// Entity type literal, as in `TYPE(e) = Manager`.
    EntityType,
    /// Positional or named input parameter (`?1`, `:name`).
    InputParameter,
}

/// An identification variable, possibly generated by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentificationVariable {
    /// Variable name.
    pub name: SmolStr,
    /// True when the variable was not written in the query but implied.
    pub is_virtual: bool,
}

impl IdentificationVariable {
    /// Creates an explicitly written identification variable.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            is_virtual: false,
        }
    }

    /// Creates an implied identification variable.
    pub fn implied(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            is_virtual: true,
        }
    }
}

/// A dotted path such as `e.address.city`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    /// Path segments; the first one is the qualifier.
    pub segments: Vec<SmolStr>,

    /// Set when the qualifier was implied rather than written (`name` inside
    /// `UPDATE Employee SET name = ...`).
    pub virtual_qualifier: bool,

    /// Narrower rule the path conforms to once its implied qualifier is
    /// taken into account.
    pub qualified_rule: Option<RuleId>,
}

impl PathExpression {
    /// Creates a path whose qualifier was written explicitly.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            virtual_qualifier: false,
            qualified_rule: None,
        }
    }

    /// Marks the qualifier as implied and records the narrower rule.
    pub fn with_virtual_qualifier(mut self, qualified_rule: impl Into<RuleId>) -> Self {
        self.virtual_qualifier = true;
        self.qualified_rule = Some(qualified_rule.into());
        self
    }

    /// Returns the first segment.
    pub fn qualifier(&self) -> Option<&str> {
        self.segments.first().map(SmolStr::as_str)
    }

    /// Returns the last segment.
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(SmolStr::as_str)
    }

    /// Returns the full dotted text.
    pub fn full_path(&self) -> String {
        self.segments
            .iter()
            .map(SmolStr::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}
