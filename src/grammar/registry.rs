//! In-memory grammar registry.

use std::collections::HashMap;

use super::{Grammar, GrammarError, GrammarInfo, GrammarResult, GrammarRule, RuleId};

/// A [`Grammar`] backed by a hash map of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    info: GrammarInfo,
    rules: HashMap<RuleId, GrammarRule>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new(info: GrammarInfo) -> Self {
        Self {
            info,
            rules: HashMap::new(),
        }
    }

    /// Creates a registry holding `rules`.
    ///
    /// Fails on duplicate ids. Dangling child ids are allowed here; use
    /// [`RuleRegistry::check_references`] to detect them.
    pub fn from_rules<I>(info: GrammarInfo, rules: I) -> GrammarResult<Self>
    where
        I: IntoIterator<Item = GrammarRule>,
    {
        let mut registry = Self::new(info);
        for rule in rules {
            registry.insert(rule)?;
        }
        Ok(registry)
    }

    /// Registers a rule.
    pub fn insert(&mut self, rule: GrammarRule) -> GrammarResult<()> {
        if self.rules.contains_key(&rule.id) {
            return Err(GrammarError::DuplicateRule { rule: rule.id });
        }
        self.rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over registered rules in no particular order.
    pub fn rules(&self) -> impl Iterator<Item = &GrammarRule> {
        self.rules.values()
    }

    /// Verifies that every child id names a registered rule.
    ///
    /// Rules are checked in id order so the reported error is deterministic.
    pub fn check_references(&self) -> GrammarResult<()> {
        let mut ids: Vec<&RuleId> = self.rules.keys().collect();
        ids.sort();

        for id in ids {
            let rule = &self.rules[id];
            if let Some(child) = rule
                .children
                .iter()
                .find(|child| !self.rules.contains_key(*child))
            {
                return Err(GrammarError::UnknownChild {
                    rule: rule.id.clone(),
                    child: child.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Grammar for RuleRegistry {
    fn rule(&self, id: &str) -> Option<&GrammarRule> {
        self.rules.get(id)
    }

    fn info(&self) -> &GrammarInfo {
        &self.info
    }
}
