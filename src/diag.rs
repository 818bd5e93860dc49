//! Rendering model for validation problems.
//!
//! [`Problem`](crate::validator::Problem) records are deliberately bare: a
//! node, a range and an unlocalized message key. This module turns them into
//! [`Diag`] values and then into miette reports with source context.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, Report, Severity};

use crate::ast::Span;
use crate::validator::Problem;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagSeverity {
    /// The query does not conform to the grammar.
    Error,
    /// Suspicious but conforming.
    Warning,
    /// Informational.
    Note,
}

impl fmt::Display for DiagSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagSeverity::Error => write!(f, "error"),
            DiagSeverity::Warning => write!(f, "warning"),
            DiagSeverity::Note => write!(f, "note"),
        }
    }
}

/// A labeled span within a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagLabel {
    /// The span this label refers to.
    pub span: Span,
    /// The label text.
    pub message: String,
    /// Whether this is the main location of the diagnostic.
    pub primary: bool,
}

/// A structured diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    /// The severity level.
    pub severity: DiagSeverity,
    /// The main message.
    pub message: String,
    /// Labeled spans.
    pub labels: Vec<DiagLabel>,
    /// Additional notes.
    pub notes: Vec<String>,
    /// Diagnostic code; for validation problems this is the message key.
    pub code: Option<String>,
}

impl Diag {
    /// Creates a new diagnostic with the given severity and message.
    pub fn new(severity: DiagSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            code: None,
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Error, message)
    }

    /// Adds a primary label.
    pub fn with_primary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel {
            span,
            message: message.into(),
            primary: true,
        });
        self
    }

    /// Adds a secondary label.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel {
            span,
            message: message.into(),
            primary: false,
        });
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Sets the diagnostic code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl From<&Problem> for Diag {
    fn from(problem: &Problem) -> Self {
        let message = if problem.arguments.is_empty() {
            problem.message_key.to_string()
        } else {
            let arguments = problem
                .arguments
                .iter()
                .map(|arg| arg.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} ({})", problem.message_key, arguments)
        };

        Diag::error(message)
            .with_primary_label(problem.span(), "does not conform to the grammar")
            .with_code(problem.message_key.as_str())
    }
}

/// Query text used as source context when rendering.
#[derive(Debug, Clone)]
pub struct SourceFile {
    content: String,
    name: Option<String>,
}

impl SourceFile {
    /// Creates a new source from query text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: None,
        }
    }

    /// Creates a new named source, e.g. the named query it came from.
    pub fn with_name(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: Some(name.into()),
        }
    }

    /// Returns the source content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the source name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Clamps a span to valid bounds within this source.
    pub fn clamp_span(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }
}

/// Converts validation problems to miette reports.
pub fn convert_problems_to_reports(problems: &[Problem], source: &SourceFile) -> Vec<Report> {
    problems
        .iter()
        .map(|problem| convert_diag_to_report(&Diag::from(problem), source))
        .collect()
}

/// Converts a single diagnostic to a miette report. Out-of-range spans are
/// clamped to the source.
pub fn convert_diag_to_report(diag: &Diag, source: &SourceFile) -> Report {
    let report = Report::new(build_diagnostic(diag, source));
    match source.name() {
        Some(name) => {
            report.with_source_code(miette::NamedSource::new(name, source.content().to_string()))
        }
        None => report.with_source_code(source.content().to_string()),
    }
}

fn build_diagnostic(diag: &Diag, source: &SourceFile) -> BuiltDiagnostic {
    let labels = diag
        .labels
        .iter()
        .map(|label| {
            let span = source.clamp_span(&label.span);
            let span = (span.start, span.end - span.start);
            if label.primary {
                LabeledSpan::new_primary_with_span(Some(label.message.clone()), span)
            } else {
                LabeledSpan::new_with_span(Some(label.message.clone()), span)
            }
        })
        .collect();

    BuiltDiagnostic {
        message: diag.message.clone(),
        severity: match diag.severity {
            DiagSeverity::Error => Severity::Error,
            DiagSeverity::Warning => Severity::Warning,
            DiagSeverity::Note => Severity::Advice,
        },
        code: diag.code.clone(),
        help: (!diag.notes.is_empty()).then(|| diag.notes.join("\n")),
        labels,
    }
}

#[derive(Debug)]
struct BuiltDiagnostic {
    message: String,
    severity: Severity,
    code: Option<String>,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
}

impl fmt::Display for BuiltDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BuiltDiagnostic {}

impl Diagnostic for BuiltDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.clone().into_iter()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, TreeBuilder};

    fn problem(start: usize, end: usize, key: &str, arguments: &[&str]) -> Problem {
        let mut builder = TreeBuilder::new();
        let node = builder.push(None, NodeKind::Bad, "bad", start..end);
        Problem {
            node,
            start,
            end,
            message_key: key.into(),
            arguments: arguments.iter().map(|arg| (*arg).into()).collect(),
        }
    }

    #[test]
    fn problem_becomes_error_with_key_as_code() {
        let diag = Diag::from(&problem(7, 12, "WhereClause_InvalidConditionalExpression", &[]));
        assert_eq!(diag.severity, DiagSeverity::Error);
        assert_eq!(diag.message, "WhereClause_InvalidConditionalExpression");
        assert_eq!(
            diag.code.as_deref(),
            Some("WhereClause_InvalidConditionalExpression")
        );
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.labels[0].span, 7..12);
        assert!(diag.labels[0].primary);
    }

    #[test]
    fn problem_arguments_are_listed() {
        let diag = Diag::from(&problem(0, 3, "AbsExpression_InvalidExpression", &["ABS", "e"]));
        assert_eq!(diag.message, "AbsExpression_InvalidExpression (ABS, e)");
    }

    #[test]
    fn clamp_span_stays_in_bounds() {
        let src = SourceFile::new("SELECT");
        assert_eq!(src.clamp_span(&(0..10)), 0..6);
        assert_eq!(src.clamp_span(&(8..20)), 6..6);
        assert_eq!(src.clamp_span(&(1..3)), 1..3);
    }

    #[test]
    fn reports_keep_message_and_labels() {
        let source = SourceFile::with_name("SELECT e FROM Employee e WHERE ABS()", "q1");
        let problems = vec![problem(31, 36, "AbsExpression_MissingExpression", &[])];

        let reports = convert_problems_to_reports(&problems, &source);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].to_string(), "AbsExpression_MissingExpression");

        let built = build_diagnostic(&Diag::from(&problems[0]), &source);
        assert_eq!(built.labels.len(), 1);
        assert!(built.labels[0].primary());
        assert_eq!(built.severity, Severity::Error);
    }

    #[test]
    fn notes_render_as_help() {
        let source = SourceFile::new("x");
        let diag = Diag::error("bad")
            .with_secondary_label(0..100, "context")
            .with_note("first")
            .with_note("second");

        let built = build_diagnostic(&diag, &source);
        assert_eq!(built.help.as_deref(), Some("first\nsecond"));
        assert!(!built.labels[0].primary());
        assert_eq!(built.labels[0].len(), 1);
    }
}
