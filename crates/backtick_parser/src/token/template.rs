use backtick_ast::span::Span;
use ecow::EcoString;

/// Represents a template literal split into text pieces and hole pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Whole literal, delimiters included
    span: Span,

    /// Text between the delimiters
    body: Span,

    /// Original text of `body`
    raw: EcoString,

    /// Alternates `Text`, `Hole`, `Text`, ..., `Text`
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    /// Literal text. `cooked` has escape sequences resolved.
    Text { span: Span, cooked: EcoString },

    /// Expression source between `{` and `}`, braces excluded.
    Hole(Span),
}

impl Template {
    pub fn new(span: Span, body: Span, raw: EcoString, pieces: Vec<Piece>) -> Self {
        Self {
            span,
            body,
            raw,
            pieces,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn body(&self) -> Span {
        self.body
    }

    pub fn raw(&self) -> &EcoString {
        &self.raw
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn holes(&self) -> impl Iterator<Item = Span> + '_ {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Hole(span) => Some(*span),
            Piece::Text { .. } => None,
        })
    }
}

impl Piece {
    pub fn span(&self) -> Span {
        match self {
            Self::Text { span, .. } | Self::Hole(span) => *span,
        }
    }
}
