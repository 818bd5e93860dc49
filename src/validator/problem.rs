//! Positioned validation problems and the sink that collects them.

use smol_str::SmolStr;

use crate::ast::{NodeId, Span};
use crate::diag::Diag;

/// One grammar violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// The node the problem was reported on.
    pub node: NodeId,

    /// Start offset in the query text.
    pub start: usize,

    /// End offset in the query text.
    pub end: usize,

    /// Unlocalized message key.
    pub message_key: SmolStr,

    /// Arguments substituted into the localized message.
    pub arguments: Vec<SmolStr>,
}

impl Problem {
    /// Returns the reported range.
    pub fn span(&self) -> Span {
        self.start..self.end.max(self.start)
    }

    /// Converts this problem into a renderable diagnostic.
    pub fn to_diag(&self) -> Diag {
        Diag::from(self)
    }
}

/// Ordered collection receiving problems from a validator.
///
/// The sink belongs to the caller; the validator only appends to it.
pub trait ProblemSink {
    /// Appends one problem.
    fn push_problem(&mut self, problem: Problem);

    /// Returns the number of problems collected so far.
    fn problem_count(&self) -> usize;
}

impl ProblemSink for Vec<Problem> {
    fn push_problem(&mut self, problem: Problem) {
        self.push(problem);
    }

    fn problem_count(&self) -> usize {
        self.len()
    }
}

impl<S: ProblemSink + ?Sized> ProblemSink for &mut S {
    fn push_problem(&mut self, problem: Problem) {
        (**self).push_problem(problem);
    }

    fn problem_count(&self) -> usize {
        (**self).problem_count()
    }
}
