use crate::{decl::Decl, span::Span, stmt::Stmt, Node};

/// Represents a module: a sequence of declarations and statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    span: Span,
    children: Vec<ModuleItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleItem {
    Stmt(Stmt),
    Decl(Decl),
}

impl Module {
    pub const fn new(span: Span, children: Vec<ModuleItem>) -> Self {
        Self { span, children }
    }

    pub fn children(&self) -> &[ModuleItem] {
        &self.children
    }
}

impl Node for Module {
    fn span(&self) -> Span {
        self.span
    }
}
