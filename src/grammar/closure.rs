//! Transitive closure over the rule graph.

use std::collections::{HashSet, VecDeque};

use tracing::{trace, warn};

use super::{Grammar, RuleId};

/// The set of rule ids reachable from a root rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleClosure {
    order: Vec<RuleId>,
    members: HashSet<RuleId>,
}

impl RuleClosure {
    /// Returns true if `id` is reachable.
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Returns the reachable ids in discovery order, root first.
    pub fn ids(&self) -> &[RuleId] {
        &self.order
    }

    /// Returns the number of reachable ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the closure holds no ids.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, id: &RuleId) -> bool {
        if self.members.contains(id) {
            return false;
        }
        self.members.insert(id.clone());
        self.order.push(id.clone());
        true
    }
}

/// Computes the ids reachable from `root` through child links.
///
/// Each rule is expanded at most once, so cyclic grammars terminate. Compound
/// rules, including `root` itself, are recorded but not expanded unless
/// `bypass_compound` is set. Child ids missing from the grammar are recorded
/// without expansion.
pub fn rule_closure(grammar: &dyn Grammar, root: &RuleId, bypass_compound: bool) -> RuleClosure {
    let mut closure = RuleClosure::default();
    closure.insert(root);

    let mut pending = VecDeque::from([root.clone()]);
    while let Some(id) = pending.pop_front() {
        let Some(rule) = grammar.rule(id.as_str()) else {
            warn!(rule = %id, "rule is not registered in the grammar");
            continue;
        };

        if rule.compound && !bypass_compound {
            continue;
        }

        for child in &rule.children {
            if closure.insert(child) {
                pending.push_back(child.clone());
            }
        }
    }

    trace!(
        root = %root,
        bypass_compound,
        size = closure.len(),
        "computed rule closure"
    );
    closure
}
