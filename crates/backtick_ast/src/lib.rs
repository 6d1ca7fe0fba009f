use span::Span;

pub mod bin;
pub mod decl;
pub mod expr;
pub mod ident;
pub mod literal;
pub mod module;
pub mod span;
pub mod stmt;
pub mod template;

pub trait Node {
    fn span(&self) -> Span;
}
