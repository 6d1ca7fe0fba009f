use backtick_ast::{
    bin::{BinOp, BinOpExpr, UnaryExpr, UnaryOp},
    decl::{self, Decl, LexicalDecl},
    expr::{CallExpr, ComprehensionExpr, DictExpr, Expr, IndexExpr, ListExpr, MemberExpr},
    ident::Ident as Ident_,
    literal::{Bool, Null, Num, Str as Str_},
    module::{Module, ModuleItem},
    span::{Span, Spanned},
    stmt::{self, Stmt},
    template::{Quasi, TemplateLit},
    Node as _,
};

use crate::{
    error::{Error, SyntaxError},
    lexer::{Input, Lexer},
    t,
    token::{
        ident::{Ident, Keyword},
        num::Num as TokNum,
        str::Str,
        template::{Piece, Template},
        Token,
    },
};

/// Parser.
pub struct Parser<'a> {
    /// Lexical analyzer used in the parser.
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self { lexer }
    }

    pub fn parse_module(&mut self) -> Result<Module, Error> {
        let start = self.lexer.cur_pos();
        self.parse_stmt_list()
            .map(|children| Module::new(Span::new(start, self.lexer.cur_pos()), children))
    }

    fn parse_stmt_list(&mut self) -> Result<Vec<ModuleItem>, Error> {
        let mut children = vec![];

        while let Some(Spanned(span, tok)) = self.lexer.read()? {
            let item = match tok {
                t!(";") => ModuleItem::Stmt(Stmt::new(span, stmt::Kind::Empty)),
                Token::Ident(Ident::Keyword(Keyword::Let)) => {
                    ModuleItem::Decl(self.parse_lexical_decl(span)?)
                }
                _ => {
                    self.lexer.unread(Spanned(span, tok));
                    ModuleItem::Stmt(self.parse_expr_stmt()?)
                }
            };
            children.push(item);
        }

        Ok(children)
    }

    /// Parses the rest of `let name = init;`. The `let` has been consumed.
    fn parse_lexical_decl(&mut self, let_span: Span) -> Result<Decl, Error> {
        let bind = self.parse_binding_ident()?;
        let init = if self.eat(&t!("="))? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let end = init.as_ref().map_or(bind.span(), |init| init.span());
        self.expect_semicolon()?;
        Ok(Decl::new(
            let_span.to(end),
            decl::Kind::LexicalDecl(LexicalDecl::new(bind, init)),
        ))
    }

    fn parse_expr_stmt(&mut self) -> Result<Stmt, Error> {
        let expr = self.parse_expr()?;
        self.expect_semicolon()?;
        Ok(Stmt::new(expr.span(), stmt::Kind::Expr(expr)))
    }

    pub fn parse_expr(&mut self) -> Result<Expr, Error> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_and_expr()?;
        while self.eat(&Token::Ident(Keyword::Or.into()))? || self.eat(&t!("||"))? {
            let rhs = self.parse_and_expr()?;
            lhs = binop(BinOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_not_expr()?;
        while self.eat(&Token::Ident(Keyword::And.into()))? || self.eat(&t!("&&"))? {
            let rhs = self.parse_not_expr()?;
            lhs = binop(BinOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_not_expr(&mut self) -> Result<Expr, Error> {
        let start = self.lexer.cur_pos();
        if self.eat(&Token::Ident(Keyword::Not.into()))? || self.eat(&t!("!"))? {
            let operand = self.parse_not_expr()?;
            let span = Span::new(start, operand.span().end());
            return Ok(Expr::Unary(UnaryExpr::new(span, UnaryOp::Not, operand)));
        }
        self.parse_comparison_expr()
    }

    fn parse_comparison_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_additive_expr()?;
        loop {
            let op = match self.lexer.peek()? {
                Some(t!("==")) => BinOp::Eq,
                Some(t!("!=")) => BinOp::Ne,
                Some(t!("<")) => BinOp::Lt,
                Some(t!("<=")) => BinOp::Le,
                Some(t!(">")) => BinOp::Gt,
                Some(t!(">=")) => BinOp::Ge,
                _ => return Ok(lhs),
            };
            self.lexer.read()?;
            let rhs = self.parse_additive_expr()?;
            lhs = binop(op, lhs, rhs);
        }
    }

    fn parse_additive_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_multiplicative_expr()?;
        loop {
            let op = match self.lexer.peek()? {
                Some(t!("+")) => BinOp::Add,
                Some(t!("-")) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.lexer.read()?;
            let rhs = self.parse_multiplicative_expr()?;
            lhs = binop(op, lhs, rhs);
        }
    }

    fn parse_multiplicative_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_unary_expr()?;
        loop {
            let op = match self.lexer.peek()? {
                Some(t!("*")) => BinOp::Mul,
                Some(t!("/")) => BinOp::Div,
                Some(t!("%")) => BinOp::Mod,
                _ => return Ok(lhs),
            };
            self.lexer.read()?;
            let rhs = self.parse_unary_expr()?;
            lhs = binop(op, lhs, rhs);
        }
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, Error> {
        let start = self.lexer.cur_pos();
        if self.eat(&t!("-"))? {
            let operand = self.parse_unary_expr()?;
            let span = Span::new(start, operand.span().end());
            return Ok(Expr::Unary(UnaryExpr::new(span, UnaryOp::Neg, operand)));
        }
        self.parse_postfix_expr()
    }

    fn parse_postfix_expr(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_primary_expr()?;
        loop {
            let Some(Spanned(span, tok)) = self.lexer.read()? else {
                return Ok(expr);
            };
            let start = expr.span().start();
            expr = match tok {
                t!(".") => {
                    let prop = self.parse_binding_ident()?;
                    Expr::Member(MemberExpr::new(
                        Span::new(start, prop.span().end()),
                        expr,
                        prop,
                    ))
                }
                t!("[") => {
                    let index = self.parse_expr()?;
                    let end = self.expect(t!("]"))?.end();
                    Expr::Index(IndexExpr::new(Span::new(start, end), expr, index))
                }
                t!("(") => {
                    let (args, end) = self.parse_expr_list(t!(")"))?;
                    Expr::Call(CallExpr::new(Span::new(start, end), expr, args))
                }
                _ => {
                    self.lexer.unread(Spanned(span, tok));
                    return Ok(expr);
                }
            };
        }
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, Error> {
        let Some(Spanned(span, tok)) = self.lexer.read()? else {
            return Err(SyntaxError::UnexpectedEndOfInput(self.lexer.cur_pos()).into());
        };
        match tok {
            Token::Num(TokNum { val, raw }) => Ok(Expr::Literal(Num::new(span, val, raw).into())),
            Token::Str(Str { val, raw }) => Ok(Expr::Literal(Str_::new(span, val, raw).into())),
            Token::Ident(Ident::Keyword(Keyword::Null)) => Ok(Expr::Literal(Null::new(span).into())),
            Token::Ident(Ident::Keyword(Keyword::True)) => {
                Ok(Expr::Literal(Bool::new(span, true).into()))
            }
            Token::Ident(Ident::Keyword(Keyword::False)) => {
                Ok(Expr::Literal(Bool::new(span, false).into()))
            }
            Token::Ident(Ident::Ident(i)) => Ok(Expr::Ident(Ident_::new(span, i))),
            Token::Template(tmpl) => Ok(Expr::Template(template_lit(self.lexer.source(), &tmpl)?)),
            t!("(") => {
                let expr = self.parse_expr()?;
                self.expect(t!(")"))?;
                Ok(expr)
            }
            t!("[") => self.parse_list_or_comprehension(span.start()),
            t!("{") => self.parse_dict(span.start()),
            tok => Err(SyntaxError::UnexpectedToken(Spanned(span, tok)).into()),
        }
    }

    /// Parses the rest of `[a, b]` or `[elem for x in iter if cond]`.
    fn parse_list_or_comprehension(&mut self, start: usize) -> Result<Expr, Error> {
        if let Some(span) = self.eat_spanned(&t!("]"))? {
            return Ok(Expr::List(ListExpr::new(Span::new(start, span.end()), vec![])));
        }

        let first = self.parse_expr()?;
        if self.eat(&Token::Ident(Keyword::For.into()))? {
            let binding = self.parse_binding_ident()?;
            self.expect(Token::Ident(Keyword::In.into()))?;
            let iter = self.parse_or_expr()?;
            let cond = if self.eat(&Token::Ident(Keyword::If.into()))? {
                Some(self.parse_or_expr()?)
            } else {
                None
            };
            let end = self.expect(t!("]"))?.end();
            return Ok(Expr::Comprehension(ComprehensionExpr::new(
                Span::new(start, end),
                first,
                binding,
                iter,
                cond,
            )));
        }

        let mut elems = vec![first];
        let end = if self.eat(&t!(","))? {
            let (rest, end) = self.parse_expr_list(t!("]"))?;
            elems.extend(rest);
            end
        } else {
            self.expect(t!("]"))?.end()
        };
        Ok(Expr::List(ListExpr::new(Span::new(start, end), elems)))
    }

    /// Parses the rest of `{key: value, ...}`. Bare identifier keys are
    /// string keys.
    fn parse_dict(&mut self, start: usize) -> Result<Expr, Error> {
        let mut entries = vec![];
        loop {
            if let Some(span) = self.eat_spanned(&t!("}"))? {
                return Ok(Expr::Dict(DictExpr::new(Span::new(start, span.end()), entries)));
            }

            let key = match self.lexer.read()? {
                // A bare identifier is a string key only when `:` follows.
                Some(Spanned(span, Token::Ident(Ident::Ident(name)))) => {
                    if self.lexer.peek()? == Some(&t!(":")) {
                        Expr::Literal(Str_::new(span, name.clone(), name).into())
                    } else {
                        self.lexer
                            .unread(Spanned(span, Token::Ident(Ident::Ident(name))));
                        self.parse_expr()?
                    }
                }
                Some(tok) => {
                    self.lexer.unread(tok);
                    self.parse_expr()?
                }
                None => {
                    return Err(SyntaxError::UnexpectedEndOfInput(self.lexer.cur_pos()).into())
                }
            };
            self.expect(t!(":"))?;
            let value = self.parse_expr()?;
            entries.push((key, value));

            if !self.eat(&t!(","))? {
                let end = self.expect(t!("}"))?.end();
                return Ok(Expr::Dict(DictExpr::new(Span::new(start, end), entries)));
            }
        }
    }

    /// Parses comma-separated expressions up to `close`, allowing a trailing
    /// comma. Returns the expressions and the end offset of `close`.
    fn parse_expr_list(&mut self, close: Token) -> Result<(Vec<Expr>, usize), Error> {
        let mut exprs = vec![];
        loop {
            if let Some(span) = self.eat_spanned(&close)? {
                return Ok((exprs, span.end()));
            }
            exprs.push(self.parse_expr()?);
            if !self.eat(&t!(","))? {
                let end = self.expect(close)?.end();
                return Ok((exprs, end));
            }
        }
    }

    fn parse_binding_ident(&mut self) -> Result<Ident_, Error> {
        match self.lexer.read()? {
            Some(Spanned(span, Token::Ident(Ident::Ident(name)))) => Ok(Ident_::new(span, name)),
            Some(tok) => Err(SyntaxError::UnexpectedToken(tok).into()),
            None => Err(SyntaxError::UnexpectedEndOfInput(self.lexer.cur_pos()).into()),
        }
    }

    /// Consumes the next token if it is `tok`.
    fn eat(&mut self, tok: &Token) -> Result<bool, Error> {
        Ok(self.eat_spanned(tok)?.is_some())
    }

    fn eat_spanned(&mut self, tok: &Token) -> Result<Option<Span>, Error> {
        match self.lexer.read()? {
            Some(Spanned(span, t)) if &t == tok => Ok(Some(span)),
            Some(t) => {
                self.lexer.unread(t);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn expect(&mut self, tok: Token) -> Result<Span, Error> {
        match self.lexer.read()? {
            Some(Spanned(span, t)) if t == tok => Ok(span),
            Some(t) => Err(SyntaxError::UnexpectedToken(t).into()),
            None => Err(SyntaxError::UnexpectedEndOfInput(self.lexer.cur_pos()).into()),
        }
    }

    fn expect_semicolon(&mut self) -> Result<(), Error> {
        match self.lexer.read()? {
            Some(Spanned(_, t!(";"))) | None => Ok(()),
            Some(tok) => Err(SyntaxError::UnexpectedToken(tok).into()),
        }
    }

    /// Fails unless all input has been consumed.
    pub fn expect_end(&mut self) -> Result<(), Error> {
        match self.lexer.read()? {
            None => Ok(()),
            Some(tok) => Err(SyntaxError::UnexpectedToken(tok).into()),
        }
    }
}

fn binop(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::BinOp(BinOpExpr::new(
        Span::new(lhs.span().start(), rhs.span().end()),
        op,
        lhs,
        rhs,
    ))
}

/// Builds a template literal node from lexed pieces, parsing every hole.
/// `text` is the full source text the piece spans point into.
pub(crate) fn template_lit(text: &str, tmpl: &Template) -> Result<TemplateLit, Error> {
    let mut quasis = vec![];
    let mut exprs = vec![];
    for piece in tmpl.pieces() {
        match piece {
            Piece::Text { span, cooked } => {
                quasis.push(Quasi::new(*span, span.slice(text).into(), cooked.clone()))
            }
            Piece::Hole(span) => exprs.push(parse_hole(text, *span)?),
        }
    }
    Ok(TemplateLit::new(tmpl.span(), tmpl.raw().clone(), quasis, exprs))
}

fn parse_hole(text: &str, span: Span) -> Result<Expr, Error> {
    let mut parser = Parser::new(Lexer::new(Input::new(text, span)));
    let expr = parser.parse_expr()?;
    parser.expect_end()?;
    log::trace!("parsed hole {:?}", span.slice(text));
    Ok(expr)
}
