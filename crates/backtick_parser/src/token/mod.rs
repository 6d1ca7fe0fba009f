use self::{ident::Ident, num::Num, op::Op, str::Str, template::Template};

pub mod ident;
pub mod num;
pub mod op;
pub mod str;
pub mod template;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(Ident),
    Num(Num),
    Str(Str),
    Template(Template),
    Op(Op),
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Colon,
    Semicolon,
    Assign,
}

/// Expands to the token (or token pattern) for a punctuator or operator.
#[macro_export]
macro_rules! t {
    ("(") => {
        $crate::token::Token::LParen
    };
    (")") => {
        $crate::token::Token::RParen
    };
    ("[") => {
        $crate::token::Token::LBracket
    };
    ("]") => {
        $crate::token::Token::RBracket
    };
    ("{") => {
        $crate::token::Token::LBrace
    };
    ("}") => {
        $crate::token::Token::RBrace
    };
    (",") => {
        $crate::token::Token::Comma
    };
    (".") => {
        $crate::token::Token::Dot
    };
    (":") => {
        $crate::token::Token::Colon
    };
    (";") => {
        $crate::token::Token::Semicolon
    };
    ("=") => {
        $crate::token::Token::Assign
    };
    ("+") => {
        $crate::token::Token::Op($crate::token::op::Op::Plus)
    };
    ("-") => {
        $crate::token::Token::Op($crate::token::op::Op::Minus)
    };
    ("*") => {
        $crate::token::Token::Op($crate::token::op::Op::Star)
    };
    ("/") => {
        $crate::token::Token::Op($crate::token::op::Op::Slash)
    };
    ("%") => {
        $crate::token::Token::Op($crate::token::op::Op::Percent)
    };
    ("==") => {
        $crate::token::Token::Op($crate::token::op::Op::EqEq)
    };
    ("!=") => {
        $crate::token::Token::Op($crate::token::op::Op::NotEq)
    };
    ("<") => {
        $crate::token::Token::Op($crate::token::op::Op::Lt)
    };
    ("<=") => {
        $crate::token::Token::Op($crate::token::op::Op::Le)
    };
    (">") => {
        $crate::token::Token::Op($crate::token::op::Op::Gt)
    };
    (">=") => {
        $crate::token::Token::Op($crate::token::op::Op::Ge)
    };
    ("&&") => {
        $crate::token::Token::Op($crate::token::op::Op::AndAnd)
    };
    ("||") => {
        $crate::token::Token::Op($crate::token::op::Op::OrOr)
    };
    ("!") => {
        $crate::token::Token::Op($crate::token::op::Op::Bang)
    };
}

pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
