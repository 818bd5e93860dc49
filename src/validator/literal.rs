//! Extraction of identifier and literal text from a node.

use std::ops::ControlFlow;

use smol_str::SmolStr;

use crate::ast::{
    IdentificationVariable, LiteralKind, NodeRef, PathExpression, Visit, VisitResult, accept,
};

/// The kind of text to extract with [`literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralType {
    /// Entity name of a range declaration.
    AbstractSchemaName,
    /// Entity type literal.
    EntityType,
    /// Explicitly written identification variable.
    IdentificationVariable,
    /// Input parameter text (`?1`, `:name`).
    InputParameter,
    /// Whole dotted path.
    PathExpressionAllPath,
    /// Qualifier of a path, or a bare identification variable.
    PathExpressionIdentificationVariable,
    /// Last segment of a path.
    PathExpressionLastPath,
    /// Alias introduced with `AS`.
    ResultVariable,
    /// String literal text.
    StringLiteral,
}

struct LiteralVisitor {
    literal_type: LiteralType,
}

impl LiteralVisitor {
    fn found(text: impl Into<SmolStr>) -> VisitResult<SmolStr> {
        ControlFlow::Break(text.into())
    }
}

impl<'t> Visit<'t> for LiteralVisitor {
    type Break = SmolStr;

    fn visit_node(&mut self, _node: NodeRef<'t>) -> VisitResult<SmolStr> {
        ControlFlow::Continue(())
    }

    fn visit_abstract_schema_name(
        &mut self,
        _node: NodeRef<'t>,
        name: &'t str,
    ) -> VisitResult<SmolStr> {
        match self.literal_type {
            LiteralType::AbstractSchemaName => Self::found(name),
            _ => ControlFlow::Continue(()),
        }
    }

    fn visit_literal(
        &mut self,
        _node: NodeRef<'t>,
        kind: LiteralKind,
        text: &'t str,
    ) -> VisitResult<SmolStr> {
        match (self.literal_type, kind) {
            (LiteralType::EntityType, LiteralKind::EntityType)
            | (LiteralType::InputParameter, LiteralKind::InputParameter)
            | (LiteralType::StringLiteral, LiteralKind::String) => Self::found(text),
            _ => ControlFlow::Continue(()),
        }
    }

    fn visit_identification_variable(
        &mut self,
        _node: NodeRef<'t>,
        variable: &'t IdentificationVariable,
    ) -> VisitResult<SmolStr> {
        match self.literal_type {
            LiteralType::IdentificationVariable
            | LiteralType::PathExpressionIdentificationVariable
                if !variable.is_virtual =>
            {
                Self::found(variable.name.clone())
            }
            _ => ControlFlow::Continue(()),
        }
    }

    fn visit_path(&mut self, _node: NodeRef<'t>, path: &'t PathExpression) -> VisitResult<SmolStr> {
        let text = match self.literal_type {
            LiteralType::PathExpressionAllPath => Some(SmolStr::new(path.full_path())),
            LiteralType::PathExpressionIdentificationVariable if !path.virtual_qualifier => {
                path.qualifier().map(SmolStr::new)
            }
            LiteralType::PathExpressionLastPath => path.last_segment().map(SmolStr::new),
            _ => None,
        };
        match text {
            Some(text) => ControlFlow::Break(text),
            None => ControlFlow::Continue(()),
        }
    }

    fn visit_result_variable(&mut self, _node: NodeRef<'t>, name: &'t str) -> VisitResult<SmolStr> {
        match self.literal_type {
            LiteralType::ResultVariable => Self::found(name),
            _ => ControlFlow::Continue(()),
        }
    }
}

/// Returns the text of `node` for the requested literal type, or `None`
/// when the node does not carry that kind of text.
pub fn literal(node: NodeRef<'_>, literal_type: LiteralType) -> Option<SmolStr> {
    match accept(&mut LiteralVisitor { literal_type }, node) {
        ControlFlow::Break(text) => Some(text),
        ControlFlow::Continue(()) => None,
    }
}
