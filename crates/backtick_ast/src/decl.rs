use crate::{expr::Expr, ident::Ident, span::Span, Node};

/// Represents a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    span: Span,
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    LexicalDecl(LexicalDecl),
}

/// `let bind = init;`
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalDecl {
    bind: Ident,
    init: Option<Expr>,
}

impl Decl {
    pub const fn new(span: Span, kind: Kind) -> Self {
        Self { span, kind }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }
}

impl Node for Decl {
    fn span(&self) -> Span {
        self.span
    }
}

impl LexicalDecl {
    pub const fn new(bind: Ident, init: Option<Expr>) -> Self {
        Self { bind, init }
    }

    pub fn bind(&self) -> &Ident {
        &self.bind
    }

    pub fn init(&self) -> Option<&Expr> {
        self.init.as_ref()
    }
}
