use crate::{span::Span, Node};

use ecow::EcoString;

/// Represents a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Num(Num),
    Str(Str),
    Bool(Bool),
    Null(Null),
}

/// Represents a numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Num {
    span: Span,
    val: f64,
    raw: EcoString,
}

/// Represents a string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Str {
    span: Span,
    val: EcoString,
    raw: EcoString,
}

/// Represents `true` or `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bool {
    span: Span,
    val: bool,
}

/// Represents a null literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Null {
    span: Span,
}

impl Node for Literal {
    fn span(&self) -> Span {
        match self {
            Self::Num(num) => num.span(),
            Self::Str(str) => str.span(),
            Self::Bool(b) => b.span(),
            Self::Null(null) => null.span(),
        }
    }
}

impl Node for Num {
    fn span(&self) -> Span {
        self.span
    }
}

impl Node for Str {
    fn span(&self) -> Span {
        self.span
    }
}

impl Node for Bool {
    fn span(&self) -> Span {
        self.span
    }
}

impl Node for Null {
    fn span(&self) -> Span {
        self.span
    }
}

impl Num {
    pub const fn new(span: Span, val: f64, raw: EcoString) -> Self {
        Self { span, val, raw }
    }

    pub const fn val(&self) -> f64 {
        self.val
    }

    pub const fn raw(&self) -> &EcoString {
        &self.raw
    }
}

impl Str {
    pub const fn new(span: Span, val: EcoString, raw: EcoString) -> Self {
        Self { span, val, raw }
    }

    /// Escaped string value
    pub const fn val(&self) -> &EcoString {
        &self.val
    }

    /// Original string literal
    pub const fn raw(&self) -> &EcoString {
        &self.raw
    }
}

impl Bool {
    pub const fn new(span: Span, val: bool) -> Self {
        Self { span, val }
    }

    pub const fn val(&self) -> bool {
        self.val
    }
}

impl Null {
    pub const fn new(span: Span) -> Self {
        Self { span }
    }
}

impl From<Num> for Literal {
    fn from(num: Num) -> Self {
        Self::Num(num)
    }
}

impl From<Str> for Literal {
    fn from(str: Str) -> Self {
        Self::Str(str)
    }
}

impl From<Bool> for Literal {
    fn from(b: Bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Null> for Literal {
    fn from(null: Null) -> Self {
        Self::Null(null)
    }
}
