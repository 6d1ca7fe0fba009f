//! Lexing and parsing of backtick template literals and the expressions
//! that appear inside their holes.

use backtick_ast::{expr::Expr, module::Module, template::TemplateLit};

use crate::{
    error::Error,
    lexer::{
        template::{lex_template, lex_template_body},
        Input, Lexer,
    },
    parser::Parser,
    source::Source,
};

pub mod error;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token;

/// Parses `source`, which must consist of exactly one template literal
/// (backticks included), and every expression hole inside it.
///
/// ```rust
/// use backtick_parser::{parse_template, source::{Source, SourceName}};
///
/// let src = Source::new(SourceName::Custom("doc".into()), "`hello {name}!`");
/// let tmpl = parse_template(&src).unwrap();
/// assert_eq!(tmpl.raw(), "hello {name}!");
/// assert_eq!(tmpl.exprs().len(), 1);
/// ```
pub fn parse_template(source: &Source) -> Result<TemplateLit, Error> {
    let tmpl = lex_template(&source.text)?;
    parser::template_lit(&source.text, &tmpl)
}

/// Like [`parse_template`], but `source` is the bare text between the
/// delimiters.
pub fn parse_template_body(source: &Source) -> Result<TemplateLit, Error> {
    let tmpl = lex_template_body(&source.text)?;
    parser::template_lit(&source.text, &tmpl)
}

/// Parses a single expression spanning all of `source`.
pub fn parse_expr(source: &Source) -> Result<Expr, Error> {
    let mut parser = Parser::new(Lexer::new(Input::from(source)));
    let expr = parser.parse_expr()?;
    parser.expect_end()?;
    Ok(expr)
}

/// Parses a module of `let` declarations and expression statements.
pub fn parse_module(source: &Source) -> Result<Module, Error> {
    Parser::new(Lexer::new(Input::from(source))).parse_module()
}
