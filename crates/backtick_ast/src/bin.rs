use crate::{expr::Expr, span::Span, Node};

#[derive(Debug, Clone, PartialEq)]
pub struct BinOpExpr {
    op: BinOp,
    lhs: Box<Expr>,
    rhs: Box<Expr>,
    span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    op: UnaryOp,
    operand: Box<Expr>,
    span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl BinOpExpr {
    pub fn new(span: Span, op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Self {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        }
    }

    pub fn op(&self) -> BinOp {
        self.op
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }
}

impl Node for BinOpExpr {
    fn span(&self) -> Span {
        self.span
    }
}

impl UnaryExpr {
    pub fn new(span: Span, op: UnaryOp, operand: Expr) -> Self {
        Self {
            op,
            operand: Box::new(operand),
            span,
        }
    }

    pub fn op(&self) -> UnaryOp {
        self.op
    }

    pub fn operand(&self) -> &Expr {
        &self.operand
    }
}

impl Node for UnaryExpr {
    fn span(&self) -> Span {
        self.span
    }
}
