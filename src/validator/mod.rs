//! Grammar-conformance validator.
//!
//! [`Validator`] answers questions about an expression tree against a rule
//! graph: does this node conform to that rule, which clause owns this
//! expression, is this a subquery. Violations are recorded as [`Problem`]s in
//! a caller-owned [`ProblemSink`].
//!
//! # Example
//!
//! ```
//! use jpql_validator::ast::{LiteralKind, NodeKind, TreeBuilder};
//! use jpql_validator::grammar::{GrammarInfo, GrammarRule, RuleRegistry};
//! use jpql_validator::validator::Validator;
//!
//! let grammar = RuleRegistry::from_rules(
//!     GrammarInfo::new("EclipseLink", "2.7", "2.2"),
//!     [
//!         GrammarRule::new("scalar_expression").with_child("numeric_literal"),
//!         GrammarRule::new("numeric_literal"),
//!     ],
//! )
//! .unwrap();
//!
//! let mut builder = TreeBuilder::new();
//! let one = builder.push(
//!     None,
//!     NodeKind::Literal(LiteralKind::Numeric, "1".into()),
//!     "numeric_literal",
//!     0..1,
//! );
//! let tree = builder.finish();
//!
//! let mut validator = Validator::new(&grammar);
//! assert!(validator.is_valid(tree.node(one), "scalar_expression"));
//! ```

mod bypass;
mod children;
mod conformance;
mod literal;
mod nested_array;
mod owning;
mod problem;
mod subquery;

use smol_str::SmolStr;
use tracing::debug;

use crate::ast::{NodeRef, Visit, VisitResult};
use crate::grammar::{Grammar, GrammarRule, RuleId};

pub use bypass::{BypassParentSubExpression, logical_parent, visit_logical_parent};
pub use children::collect_children;
pub use literal::{LiteralType, literal};
pub use nested_array::nested_array_size;
pub use owning::{OwningClause, OwningStatement, owning_clause, owning_statement};
pub use problem::{Problem, ProblemSink};
pub use subquery::{is_subquery, is_within_subquery, is_within_top_level_query};

use bypass::CollectionBypass;
use conformance::{ClosureCache, RuleChecker};

/// Configuration for a [`Validator`].
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Expand compound rules when computing rule closures.
    pub bypass_compound: bool,

    /// Memoize rule closures for the lifetime of the validator.
    pub cache_closures: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            bypass_compound: false,
            cache_closures: true,
        }
    }
}

/// Validator facade over one grammar and one problem sink.
///
/// Queries that consult the rule graph take `&mut self` because they fill
/// the closure cache; a validator therefore cannot be re-entered while a
/// check is running. Use one validator per thread.
pub struct Validator<'g, S = Vec<Problem>> {
    grammar: &'g dyn Grammar,
    config: ValidationConfig,
    sink: S,
    closures: ClosureCache,
}

impl<'g> Validator<'g, Vec<Problem>> {
    /// Creates a validator collecting problems into a fresh vector.
    pub fn new(grammar: &'g dyn Grammar) -> Self {
        Self::with_sink(grammar, Vec::new())
    }
}

impl<'g, S: ProblemSink> Validator<'g, S> {
    /// Creates a validator appending problems to `sink`.
    pub fn with_sink(grammar: &'g dyn Grammar, sink: S) -> Self {
        let config = ValidationConfig::default();
        Self {
            grammar,
            closures: ClosureCache::new(config.cache_closures),
            config,
            sink,
        }
    }

    /// Replaces the configuration. Cached closures are discarded.
    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.closures = ClosureCache::new(config.cache_closures);
        self.config = config;
        self
    }

    /// Sets the default compound-bypass flag used by [`Validator::is_valid`].
    pub fn with_bypass_compound(mut self, bypass: bool) -> Self {
        self.config.bypass_compound = bypass;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Grammar
    // ------------------------------------------------------------------

    /// Returns the grammar.
    pub fn grammar(&self) -> &'g dyn Grammar {
        self.grammar
    }

    /// Looks up a rule by id.
    pub fn rule(&self, id: &str) -> Option<&'g GrammarRule> {
        self.grammar.rule(id)
    }

    /// Returns the persistence provider named by the grammar.
    pub fn provider(&self) -> &'g str {
        &self.grammar.info().provider
    }

    /// Returns the provider version named by the grammar.
    pub fn provider_version(&self) -> &'g str {
        &self.grammar.info().provider_version
    }

    /// Returns the query language version named by the grammar.
    pub fn spec_version(&self) -> &'g str {
        &self.grammar.info().spec_version
    }

    /// Drops every memoized rule closure.
    pub fn clear_cache(&mut self) {
        self.closures.clear();
    }

    // ------------------------------------------------------------------
    // Problems
    // ------------------------------------------------------------------

    /// Returns the problem sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the problem sink mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Replaces the problem sink, returning the previous one.
    pub fn set_sink(&mut self, sink: S) -> S {
        std::mem::replace(&mut self.sink, sink)
    }

    /// Consumes the validator, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Returns the number of problems in the sink.
    pub fn problems_size(&self) -> usize {
        self.sink.problem_count()
    }

    /// Records a problem spanning the whole node.
    pub fn add_problem(&mut self, node: NodeRef<'_>, message_key: &str, arguments: &[&str]) {
        let start = node.offset();
        self.add_problem_from(node, start, message_key, arguments);
    }

    /// Records a problem from `start` to the end of the node.
    pub fn add_problem_from(
        &mut self,
        node: NodeRef<'_>,
        start: usize,
        message_key: &str,
        arguments: &[&str],
    ) {
        let end = node.offset() + node.length();
        self.add_problem_range(node, start, end, message_key, arguments);
    }

    /// Records a problem over an explicit range.
    pub fn add_problem_range(
        &mut self,
        node: NodeRef<'_>,
        start: usize,
        end: usize,
        message_key: &str,
        arguments: &[&str],
    ) {
        debug!(node = %node.id(), start, end, message_key, "grammar problem");
        self.sink.push_problem(Problem {
            node: node.id(),
            start,
            end,
            message_key: SmolStr::new(message_key),
            arguments: arguments.iter().copied().map(SmolStr::new).collect(),
        });
    }

    // ------------------------------------------------------------------
    // Conformance
    // ------------------------------------------------------------------

    /// Returns true if `node` conforms to the rule `rule_id`, using the
    /// configured compound-bypass flag.
    pub fn is_valid(&mut self, node: NodeRef<'_>, rule_id: &str) -> bool {
        let bypass = self.config.bypass_compound;
        self.is_valid_with(node, rule_id, bypass)
    }

    /// Returns true if `node` conforms to `rule_id` with an explicit
    /// compound-bypass flag.
    pub fn is_valid_with(
        &mut self,
        node: NodeRef<'_>,
        rule_id: &str,
        bypass_compound: bool,
    ) -> bool {
        let target = RuleId::new(rule_id);
        RuleChecker::new(self.grammar, &mut self.closures, &target, bypass_compound).check(node)
    }

    /// Returns true if `node` conforms to any of `rule_ids`.
    pub fn is_valid_any<'r, I>(&mut self, node: NodeRef<'_>, rule_ids: I) -> bool
    where
        I: IntoIterator<Item = &'r str>,
    {
        rule_ids
            .into_iter()
            .any(|rule_id| self.is_valid(node, rule_id))
    }

    /// Like [`Validator::is_valid`], except that a comma list is valid when
    /// each of its non-missing elements is.
    pub fn is_valid_with_child_collection_bypass(
        &mut self,
        node: NodeRef<'_>,
        rule_id: &str,
    ) -> bool {
        let target = RuleId::new(rule_id);
        let bypass = self.config.bypass_compound;
        let mut checker = RuleChecker::new(self.grammar, &mut self.closures, &target, bypass);
        CollectionBypass::new(&mut checker).check(node)
    }

    /// Checks `node` with collection bypass and records `message_key` over
    /// the node when it does not conform.
    pub fn expect_valid(&mut self, node: NodeRef<'_>, rule_id: &str, message_key: &str) -> bool {
        let valid = self.is_valid_with_child_collection_bypass(node, rule_id);
        if !valid {
            self.add_problem(node, message_key, &[]);
        }
        valid
    }

    // ------------------------------------------------------------------
    // Traversal policies
    // ------------------------------------------------------------------

    /// Returns the elements of a comma list, or `[node]`.
    pub fn children<'t>(&self, node: NodeRef<'t>) -> Vec<NodeRef<'t>> {
        collect_children(node)
    }

    /// Returns the item count when `node` is a parenthesized comma list.
    pub fn nested_array_size(&self, node: NodeRef<'_>) -> Option<usize> {
        nested_array_size(node)
    }

    /// Returns true when `node` is a parenthesized comma list.
    pub fn is_nested_array(&self, node: NodeRef<'_>) -> bool {
        nested_array_size(node).is_some()
    }

    /// Finds the clause that owns `node`.
    pub fn owning_clause<'t>(&self, node: NodeRef<'t>) -> Option<OwningClause<'t>> {
        owning_clause(node)
    }

    /// Finds the statement that owns `node`.
    pub fn owning_statement<'t>(&self, node: NodeRef<'t>) -> Option<OwningStatement<'t>> {
        owning_statement(node)
    }

    /// Returns true if `node` is a subquery.
    pub fn is_subquery(&self, node: NodeRef<'_>) -> bool {
        is_subquery(node)
    }

    /// Returns true if `node` is inside a subquery.
    pub fn is_within_subquery(&self, node: NodeRef<'_>) -> bool {
        is_within_subquery(node)
    }

    /// Returns true if `node` is inside a top-level statement.
    pub fn is_within_top_level_query(&self, node: NodeRef<'_>) -> bool {
        is_within_top_level_query(node)
    }

    /// Returns the text of `node` for a literal type.
    pub fn literal(&self, node: NodeRef<'_>, literal_type: LiteralType) -> Option<SmolStr> {
        literal(node, literal_type)
    }

    /// Returns the nearest ancestor that is not a sub-expression.
    pub fn logical_parent<'t>(&self, node: NodeRef<'t>) -> Option<NodeRef<'t>> {
        logical_parent(node)
    }

    /// Visits the logical parent of `node` with `visitor`.
    pub fn visit_logical_parent<'t, V: Visit<'t> + ?Sized>(
        &self,
        node: NodeRef<'t>,
        visitor: &mut V,
    ) -> VisitResult<V::Break> {
        visit_logical_parent(node, visitor)
    }
}
