use ecow::EcoString;

use crate::{expr::Expr, span::Span, Node};

/// Represents a template literal: `` `text {expr} text` ``.
///
/// `quasis` and `exprs` interleave in source order, so there is always
/// exactly one more quasi than there are expressions. A quasi may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLit {
    span: Span,
    raw: EcoString,
    quasis: Vec<Quasi>,
    exprs: Vec<Expr>,
}

/// Literal text between the delimiters and holes of a template literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Quasi {
    span: Span,

    /// Text as written in the source
    raw: EcoString,

    /// Text with escape sequences resolved
    cooked: EcoString,
}

impl TemplateLit {
    /// Creates a template literal.
    ///
    /// Panics if `quasis.len() != exprs.len() + 1`; the parser upholds this.
    pub fn new(span: Span, raw: EcoString, quasis: Vec<Quasi>, exprs: Vec<Expr>) -> Self {
        assert_eq!(quasis.len(), exprs.len() + 1);
        Self {
            span,
            raw,
            quasis,
            exprs,
        }
    }

    /// Text between the opening and closing backticks, as written.
    pub fn raw(&self) -> &EcoString {
        &self.raw
    }

    pub fn quasis(&self) -> &[Quasi] {
        &self.quasis
    }

    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }
}

impl Node for TemplateLit {
    fn span(&self) -> Span {
        self.span
    }
}

impl Quasi {
    pub const fn new(span: Span, raw: EcoString, cooked: EcoString) -> Self {
        Self { span, raw, cooked }
    }

    pub const fn raw(&self) -> &EcoString {
        &self.raw
    }

    pub const fn cooked(&self) -> &EcoString {
        &self.cooked
    }
}

impl Node for Quasi {
    fn span(&self) -> Span {
        self.span
    }
}
