use crate::{
    bin::{BinOpExpr, UnaryExpr},
    ident::Ident,
    literal::Literal,
    span::Span,
    template::TemplateLit,
    Node,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Literal(Literal),
    BinOp(BinOpExpr),
    Unary(UnaryExpr),
    Member(MemberExpr),
    Index(IndexExpr),
    Call(CallExpr),
    List(ListExpr),
    Dict(DictExpr),
    Comprehension(ComprehensionExpr),
    Template(TemplateLit),
}

/// `object.prop`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    span: Span,
    object: Box<Expr>,
    prop: Ident,
}

/// `object[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    span: Span,
    object: Box<Expr>,
    index: Box<Expr>,
}

/// `callee(args...)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    span: Span,
    callee: Box<Expr>,
    args: Vec<Expr>,
}

/// `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpr {
    span: Span,
    elems: Vec<Expr>,
}

/// `{key: value, ...}`
#[derive(Debug, Clone, PartialEq)]
pub struct DictExpr {
    span: Span,
    entries: Vec<(Expr, Expr)>,
}

/// `[elem for binding in iter if cond]`
///
/// `binding` is only visible to `elem` and `cond`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComprehensionExpr {
    span: Span,
    elem: Box<Expr>,
    binding: Ident,
    iter: Box<Expr>,
    cond: Option<Box<Expr>>,
}

impl Node for Expr {
    fn span(&self) -> Span {
        match self {
            Self::Ident(ident) => ident.span(),
            Self::Literal(lit) => lit.span(),
            Self::BinOp(op) => op.span(),
            Self::Unary(op) => op.span(),
            Self::Member(expr) => expr.span,
            Self::Index(expr) => expr.span,
            Self::Call(expr) => expr.span,
            Self::List(expr) => expr.span,
            Self::Dict(expr) => expr.span,
            Self::Comprehension(expr) => expr.span,
            Self::Template(tmpl) => tmpl.span(),
        }
    }
}

impl MemberExpr {
    pub fn new(span: Span, object: Expr, prop: Ident) -> Self {
        Self {
            span,
            object: Box::new(object),
            prop,
        }
    }

    pub fn object(&self) -> &Expr {
        &self.object
    }

    pub fn prop(&self) -> &Ident {
        &self.prop
    }
}

impl IndexExpr {
    pub fn new(span: Span, object: Expr, index: Expr) -> Self {
        Self {
            span,
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    pub fn object(&self) -> &Expr {
        &self.object
    }

    pub fn index(&self) -> &Expr {
        &self.index
    }
}

impl CallExpr {
    pub fn new(span: Span, callee: Expr, args: Vec<Expr>) -> Self {
        Self {
            span,
            callee: Box::new(callee),
            args,
        }
    }

    pub fn callee(&self) -> &Expr {
        &self.callee
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

impl ListExpr {
    pub fn new(span: Span, elems: Vec<Expr>) -> Self {
        Self { span, elems }
    }

    pub fn elems(&self) -> &[Expr] {
        &self.elems
    }
}

impl DictExpr {
    pub fn new(span: Span, entries: Vec<(Expr, Expr)>) -> Self {
        Self { span, entries }
    }

    pub fn entries(&self) -> &[(Expr, Expr)] {
        &self.entries
    }
}

impl ComprehensionExpr {
    pub fn new(
        span: Span,
        elem: Expr,
        binding: Ident,
        iter: Expr,
        cond: Option<Expr>,
    ) -> Self {
        Self {
            span,
            elem: Box::new(elem),
            binding,
            iter: Box::new(iter),
            cond: cond.map(Box::new),
        }
    }

    pub fn elem(&self) -> &Expr {
        &self.elem
    }

    pub fn binding(&self) -> &Ident {
        &self.binding
    }

    pub fn iter(&self) -> &Expr {
        &self.iter
    }

    pub fn cond(&self) -> Option<&Expr> {
        self.cond.as_deref()
    }
}

impl Node for ComprehensionExpr {
    fn span(&self) -> Span {
        self.span
    }
}
