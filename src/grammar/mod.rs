//! Grammar rule graph.
//!
//! A grammar is a registry of named production rules ("BNF rules"). Each rule
//! lists the rules it expands to; a *compound* rule is an alternation with no
//! structure of its own. The validator only ever reads the graph.

mod closure;
mod registry;

use std::borrow::Borrow;
use std::fmt;

use smol_str::SmolStr;

pub use closure::{RuleClosure, rule_closure};
pub use registry::RuleRegistry;

/// Result type for grammar construction.
pub type GrammarResult<T> = Result<T, GrammarError>;

/// Errors raised while assembling a rule registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// Two rules were registered under the same id.
    DuplicateRule { rule: RuleId },

    /// A rule lists a child id that is not registered.
    UnknownChild { rule: RuleId, child: RuleId },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::DuplicateRule { rule } => {
                write!(f, "Rule '{}' is already registered", rule)
            }
            GrammarError::UnknownChild { rule, child } => {
                write!(f, "Rule '{}' refers to unknown rule '{}'", rule, child)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// Stable identifier of a grammar rule. Compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(SmolStr);

impl RuleId {
    /// Creates a rule id.
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    /// Returns the id text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<SmolStr> for RuleId {
    fn from(id: SmolStr) -> Self {
        Self(id)
    }
}

impl From<&RuleId> for RuleId {
    fn from(id: &RuleId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for RuleId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for RuleId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RuleId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A named production rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarRule {
    /// The rule id.
    pub id: RuleId,

    /// True when the rule is an alternation of other rules.
    pub compound: bool,

    /// Ids of the rules this rule expands to, in declaration order.
    pub children: Vec<RuleId>,
}

impl GrammarRule {
    /// Creates a non-compound rule without children.
    pub fn new(id: impl Into<RuleId>) -> Self {
        Self {
            id: id.into(),
            compound: false,
            children: Vec::new(),
        }
    }

    /// Creates a compound rule without children.
    pub fn compound(id: impl Into<RuleId>) -> Self {
        Self {
            compound: true,
            ..Self::new(id)
        }
    }

    /// Adds one child rule id.
    pub fn with_child(mut self, child: impl Into<RuleId>) -> Self {
        let child = child.into();
        if !self.children.contains(&child) {
            self.children.push(child);
        }
        self
    }

    /// Adds several child rule ids.
    pub fn with_children<I, R>(self, children: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleId>,
    {
        children
            .into_iter()
            .fold(self, |rule, child| rule.with_child(child))
    }
}

/// Descriptive metadata about a grammar.
///
/// The validator reports these values but never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrammarInfo {
    /// Persistence provider the grammar belongs to.
    pub provider: SmolStr,

    /// Version of that provider.
    pub provider_version: SmolStr,

    /// Version of the query language specification.
    pub spec_version: SmolStr,
}

impl GrammarInfo {
    /// Creates grammar metadata.
    pub fn new(
        provider: impl Into<SmolStr>,
        provider_version: impl Into<SmolStr>,
        spec_version: impl Into<SmolStr>,
    ) -> Self {
        Self {
            provider: provider.into(),
            provider_version: provider_version.into(),
            spec_version: spec_version.into(),
        }
    }
}

/// Read-only access to a grammar rule graph.
///
/// Implement this trait to plug an externally defined grammar into the
/// validator. [`RuleRegistry`] is an in-memory implementation.
pub trait Grammar {
    /// Looks up a rule by id.
    fn rule(&self, id: &str) -> Option<&GrammarRule>;

    /// Returns the grammar metadata.
    fn info(&self) -> &GrammarInfo;
}
