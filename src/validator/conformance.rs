//! Rule-conformance checking.
//!
//! A node conforms to a target rule when the rule it was parsed with is the
//! target itself or is reachable from the target through the rule graph.

use std::collections::HashMap;
use std::ops::ControlFlow;

use tracing::trace;

use crate::ast::{NodeKind, NodeRef, PathExpression, Visit, VisitResult, accept};
use crate::grammar::{Grammar, RuleClosure, RuleId, rule_closure};

/// Memoized closures keyed by root rule and bypass flag.
#[derive(Debug, Default)]
pub(crate) struct ClosureCache {
    enabled: bool,
    entries: HashMap<(RuleId, bool), RuleClosure>,
}

impl ClosureCache {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: HashMap::new(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if `id` is in the closure of `root`.
    fn reaches(
        &mut self,
        grammar: &dyn Grammar,
        root: &RuleId,
        bypass_compound: bool,
        id: &RuleId,
    ) -> bool {
        if !self.enabled {
            return rule_closure(grammar, root, bypass_compound).contains(id.as_str());
        }
        self.entries
            .entry((root.clone(), bypass_compound))
            .or_insert_with(|| rule_closure(grammar, root, bypass_compound))
            .contains(id.as_str())
    }
}

/// Checks nodes against one target rule.
///
/// A checker is built for a single query and dropped afterwards, so no
/// validity flag survives from one call to the next.
pub(crate) struct RuleChecker<'v> {
    grammar: &'v dyn Grammar,
    closures: &'v mut ClosureCache,
    target: &'v RuleId,
    bypass_compound: bool,
}

impl<'v> RuleChecker<'v> {
    pub(crate) fn new(
        grammar: &'v dyn Grammar,
        closures: &'v mut ClosureCache,
        target: &'v RuleId,
        bypass_compound: bool,
    ) -> Self {
        Self {
            grammar,
            closures,
            target,
            bypass_compound,
        }
    }

    /// Returns true if `node` conforms to the target rule.
    pub(crate) fn check(&mut self, node: NodeRef<'_>) -> bool {
        matches!(accept(self, node), ControlFlow::Break(true))
    }

    fn validate(&mut self, own: &RuleId) -> bool {
        if own == self.target {
            return true;
        }
        let valid = self
            .closures
            .reaches(self.grammar, self.target, self.bypass_compound, own);
        trace!(target = %self.target, own = %own, valid, "closure lookup");
        valid
    }
}

impl<'t> Visit<'t> for RuleChecker<'_> {
    type Break = bool;

    fn visit_node(&mut self, node: NodeRef<'t>) -> VisitResult<bool> {
        ControlFlow::Break(self.validate(node.rule()))
    }

    // A list is checked child by child, never as a whole.
    fn visit_collection(&mut self, _node: NodeRef<'t>) -> VisitResult<bool> {
        ControlFlow::Break(false)
    }

    // Missing expressions are reported by the grammar checks of the caller.
    fn visit_null(&mut self, _node: NodeRef<'t>) -> VisitResult<bool> {
        ControlFlow::Break(true)
    }

    fn visit_bad(&mut self, _node: NodeRef<'t>) -> VisitResult<bool> {
        ControlFlow::Break(false)
    }

    fn visit_unknown(&mut self, _node: NodeRef<'t>, _text: &'t str) -> VisitResult<bool> {
        ControlFlow::Break(false)
    }

    fn visit_path(&mut self, node: NodeRef<'t>, path: &'t PathExpression) -> VisitResult<bool> {
        let own = match (&path.qualified_rule, path.virtual_qualifier) {
            (Some(qualified), true) => qualified,
            _ => node.rule(),
        };
        ControlFlow::Break(self.validate(own))
    }

    // Nested wrappers are unwrapped in a loop. Empty parentheses, with or
    // without a placeholder inside, never conform.
    fn visit_sub_expression(&mut self, node: NodeRef<'t>) -> VisitResult<bool> {
        let mut inner = node.child(0);
        while let Some(wrapped) = inner.filter(|n| matches!(n.kind(), NodeKind::SubExpression)) {
            inner = wrapped.child(0);
        }
        match inner {
            Some(inner) if !inner.is_null() => accept(self, inner),
            _ => ControlFlow::Break(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, LiteralKind, NodeKind, PathExpression, TreeBuilder};
    use crate::grammar::{GrammarInfo, GrammarRule, RuleRegistry};

    fn grammar() -> RuleRegistry {
        RuleRegistry::from_rules(
            GrammarInfo::default(),
            [
                GrammarRule::new("scalar_expression")
                    .with_children(["arithmetic_expression", "state_field_path"]),
                GrammarRule::new("arithmetic_expression").with_child("numeric_literal"),
                GrammarRule::new("numeric_literal"),
                GrammarRule::new("state_field_path"),
                GrammarRule::new("general_path"),
            ],
        )
        .expect("valid rules")
    }

    fn check(grammar: &RuleRegistry, node: NodeRef<'_>, target: &str) -> bool {
        let mut cache = ClosureCache::new(true);
        let target = RuleId::from(target);
        RuleChecker::new(grammar, &mut cache, &target, false).check(node)
    }

    #[test]
    fn own_rule_and_descendants_conform() {
        let grammar = grammar();
        let mut builder = TreeBuilder::new();
        let one = builder.push(
            None,
            NodeKind::Literal(LiteralKind::Numeric, "1".into()),
            "numeric_literal",
            0..1,
        );
        let tree = builder.finish();

        assert!(check(&grammar, tree.node(one), "numeric_literal"));
        assert!(check(&grammar, tree.node(one), "scalar_expression"));
        assert!(!check(&grammar, tree.node(one), "state_field_path"));
    }

    #[test]
    fn sub_expression_delegates_to_inner() {
        let grammar = grammar();
        let mut builder = TreeBuilder::new();
        let paren = builder.push(None, NodeKind::SubExpression, "sub_expression", 0..7);
        builder.push(
            Some(paren),
            NodeKind::Binary(BinaryOperator::Add),
            "arithmetic_expression",
            1..6,
        );
        let empty = builder.push(None, NodeKind::SubExpression, "sub_expression", 8..10);
        let tree = builder.finish();

        assert!(check(&grammar, tree.node(paren), "scalar_expression"));
        assert!(!check(&grammar, tree.node(paren), "sub_expression"));
        assert!(!check(&grammar, tree.node(empty), "sub_expression"));
    }

    #[test]
    fn virtual_qualifier_uses_qualified_rule() {
        let grammar = grammar();
        let mut builder = TreeBuilder::new();
        let implied = builder.push(
            None,
            NodeKind::Path(
                PathExpression::new(["name"]).with_virtual_qualifier("state_field_path"),
            ),
            "general_path",
            0..4,
        );
        let written = builder.push(
            None,
            NodeKind::Path(PathExpression::new(["e", "name"])),
            "general_path",
            5..11,
        );
        let tree = builder.finish();

        assert!(check(&grammar, tree.node(implied), "scalar_expression"));
        assert!(!check(&grammar, tree.node(written), "scalar_expression"));
        assert!(check(&grammar, tree.node(written), "general_path"));
    }

    #[test]
    fn cache_is_reused_across_checks() {
        let grammar = grammar();
        let mut builder = TreeBuilder::new();
        let one = builder.push(
            None,
            NodeKind::Literal(LiteralKind::Numeric, "1".into()),
            "numeric_literal",
            0..1,
        );
        let tree = builder.finish();

        let mut cache = ClosureCache::new(true);
        let target = RuleId::from("scalar_expression");
        for _ in 0..3 {
            assert!(RuleChecker::new(&grammar, &mut cache, &target, false).check(tree.node(one)));
        }
        assert_eq!(cache.len(), 1);

        let mut disabled = ClosureCache::new(false);
        assert!(RuleChecker::new(&grammar, &mut disabled, &target, false).check(tree.node(one)));
        assert_eq!(disabled.len(), 0);
    }
}
