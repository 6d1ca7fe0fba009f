use std::str::Chars;

use backtick_ast::span::{Span, Spanned};
use ecow::EcoString;

use crate::{
    error::{Error, Malformed, MalformedTemplateError, SyntaxError},
    source::Source,
    t,
    token::{
        ident::{Ident, Keyword},
        is_ident_continue, is_ident_start,
        num::Num,
        op::Op,
        str::Str,
        Token,
    },
};

use self::template::TemplateScanner;

pub mod template;

/// Lexical analyzer for expressions.
pub struct Lexer<'a> {
    /// Input
    input: Input<'a>,

    /// Tokens pushed back by the parser
    buf: Vec<Spanned<Token>>,
}

pub struct Input<'a> {
    /// Source text
    source: &'a str,

    /// Iterator used to read each character in `source`
    chars: Chars<'a>,

    /// Current position in `source`
    pos_in_chars: usize,

    /// End position in `source`
    end: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer.
    pub fn new(input: Input<'a>) -> Self {
        Lexer { input, buf: vec![] }
    }

    pub fn source(&self) -> &'a str {
        self.input.source()
    }

    /// Position of the next unread character.
    pub fn cur_pos(&self) -> usize {
        self.buf
            .last()
            .map_or(self.input.pos(), |tok| tok.span().start())
    }

    /// Reads a token, preferring tokens pushed back by [`Lexer::unread`].
    pub fn read(&mut self) -> Result<Option<Spanned<Token>>, Error> {
        match self.buf.pop() {
            Some(tok) => Ok(Some(tok)),
            None => self.read_token(),
        }
    }

    pub fn unread(&mut self, tok: Spanned<Token>) {
        self.buf.push(tok);
    }

    pub fn peek(&mut self) -> Result<Option<&Token>, Error> {
        if self.buf.is_empty() {
            match self.read_token()? {
                Some(tok) => self.buf.push(tok),
                None => return Ok(None),
            }
        }
        Ok(self.buf.last().map(Spanned::inner_ref))
    }

    /// Reads a token from `input`, skipping whitespace.
    pub fn read_token(&mut self) -> Result<Option<Spanned<Token>>, Error> {
        self.input.take_while(|c| c.is_whitespace());
        let start = self.input.pos();

        let Some(c) = self.input.cur() else {
            return Ok(None);
        };

        let tok = match c {
            c if is_ident_start(c) => self.read_ident(),
            '0'..='9' => self.read_num()?,
            '"' | '\'' => self.read_str(c)?,
            '`' => self.read_template()?,
            _ => self.read_punctuator()?,
        };

        Ok(Some(Spanned(Span::new(start, self.input.pos()), tok)))
    }

    fn read_ident(&mut self) -> Token {
        let s = self.input.take_while(|&c| is_ident_continue(c));
        Token::Ident(
            Keyword::try_from(s.as_str())
                .map(Ident::from)
                .unwrap_or_else(|_| Ident::Ident(s)),
        )
    }

    fn read_num(&mut self) -> Result<Token, Error> {
        let start = self.input.pos();
        self.input.take_while(char::is_ascii_digit);
        if matches!(self.input.cur2(), Some(('.', c)) if c.is_ascii_digit()) {
            self.input.next();
            self.input.take_while(char::is_ascii_digit);
        }
        if matches!(self.input.cur(), Some('e' | 'E')) {
            self.input.next();
            if matches!(self.input.cur(), Some('+' | '-')) {
                self.input.next();
            }
            if self.input.take_while(char::is_ascii_digit).is_empty() {
                return Err(SyntaxError::InvalidNumber(start).into());
            }
        }
        let raw: EcoString = self.input.slice(start).into();
        let val = raw
            .parse::<f64>()
            .map_err(|_| SyntaxError::InvalidNumber(start))?;
        Ok(Token::Num(Num::new(val, raw)))
    }

    fn read_str(&mut self, quote: char) -> Result<Token, Error> {
        let start = self.input.pos();
        self.input.next();
        let mut val = EcoString::new();
        loop {
            let pos = self.input.pos();
            match self.input.next() {
                None => return Err(SyntaxError::UnterminatedString(start).into()),
                Some('\\') => {
                    let (c, len) = read_escape(self.input.rest())
                        .ok_or(SyntaxError::InvalidEscape(pos))?;
                    self.input.skip_to(self.input.pos() + len);
                    val.push(c);
                }
                Some(c) if c == quote => break,
                Some(c) => val.push(c),
            }
        }
        Ok(Token::Str(Str::new(val, self.input.slice(start).into())))
    }

    fn read_template(&mut self) -> Result<Token, Error> {
        let start = self.input.pos();
        let mut scanner = TemplateScanner::new(self.input.source(), start);
        let tmpl = scanner.scan_literal()?;
        if scanner.pos() > self.input.end() {
            return Err(MalformedTemplateError::new(Malformed::UnterminatedTemplate, start).into());
        }
        self.input.skip_to(scanner.pos());
        Ok(Token::Template(tmpl))
    }

    fn read_punctuator(&mut self) -> Result<Token, Error> {
        let start = self.input.pos();
        let Some(c) = self.input.next() else {
            return Err(SyntaxError::UnexpectedEndOfInput(start).into());
        };
        let followed_by_eq = self.input.cur() == Some('=');
        let tok = match c {
            '(' => t!("("),
            ')' => t!(")"),
            '[' => t!("["),
            ']' => t!("]"),
            '{' => t!("{"),
            '}' => t!("}"),
            ',' => t!(","),
            '.' => t!("."),
            ':' => t!(":"),
            ';' => t!(";"),
            '+' => t!("+"),
            '-' => t!("-"),
            '*' => t!("*"),
            '/' => t!("/"),
            '%' => t!("%"),
            '=' | '!' | '<' | '>' if followed_by_eq => {
                self.input.next();
                Token::Op(match c {
                    '=' => Op::EqEq,
                    '!' => Op::NotEq,
                    '<' => Op::Le,
                    _ => Op::Ge,
                })
            }
            '=' => t!("="),
            '!' => t!("!"),
            '<' => t!("<"),
            '>' => t!(">"),
            '&' | '|' if self.input.cur() == Some(c) => {
                self.input.next();
                if c == '&' {
                    t!("&&")
                } else {
                    t!("||")
                }
            }
            c => return Err(SyntaxError::UnexpectedCharacter(start, c).into()),
        };
        Ok(tok)
    }
}

impl<'a> Input<'a> {
    /// Creates an input that reads `span` of `source`.
    pub fn new(source: &'a str, span: Span) -> Self {
        Input {
            source,
            chars: span.slice(source).chars(),
            pos_in_chars: span.start(),
            end: span.end(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn pos(&self) -> usize {
        self.pos_in_chars
    }

    pub fn cur(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn cur2(&self) -> Option<(char, char)> {
        let mut chars = self.chars.clone();
        let c1 = chars.next()?;
        let c2 = chars.next()?;
        Some((c1, c2))
    }

    /// Unread text up to `end`.
    pub fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    /// Text from `start` up to the current position.
    pub fn slice(&self, start: usize) -> &'a str {
        &self.source[start..self.pos_in_chars]
    }

    pub fn take_while<F>(&mut self, mut pred: F) -> EcoString
    where
        F: FnMut(&char) -> bool,
    {
        let start_pos = self.pos_in_chars;
        while let Some(c) = self.cur() {
            if !pred(&c) {
                break;
            }
            self.next();
        }
        self.slice(start_pos).into()
    }

    pub fn next(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos_in_chars += c.len_utf8();
        Some(c)
    }

    /// Moves the cursor to `pos`, which must lie on a char boundary within
    /// the input.
    pub fn skip_to(&mut self, pos: usize) {
        let pos = pos.min(self.end);
        self.chars = self.source[pos..self.end].chars();
        self.pos_in_chars = pos;
    }
}

impl<'a> From<&'a Source> for Input<'a> {
    /// ```rust
    /// use backtick_parser::source::{Source, SourceName};
    /// use backtick_parser::lexer::Input;
    ///
    /// let _ = Input::from(&Source::new(
    ///     SourceName::FileName("test.bt".into()),
    ///     "let x = 1;",
    /// ));
    /// ```
    fn from(source: &'a Source) -> Self {
        Input::new(&source.text, Span::new(0, source.text.len()))
    }
}

/// Decodes the escape sequence at the start of `rest`, the text following a
/// backslash. Returns the character and the number of bytes consumed.
pub(crate) fn read_escape(rest: &str) -> Option<(char, usize)> {
    let c = rest.chars().next()?;
    let decoded = match c {
        '\\' | '`' | '{' | '}' | '\'' | '"' => c,
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        'u' => {
            let body = rest.strip_prefix("u{")?;
            let close = body.find('}')?;
            let hex = &body[..close];
            if hex.is_empty() || hex.len() > 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            let code = u32::from_str_radix(hex, 16).ok()?;
            return char::from_u32(code).map(|c| (c, "u{".len() + close + 1));
        }
        _ => return None,
    };
    Some((decoded, c.len_utf8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceName;

    fn tokens(text: &str) -> Vec<Token> {
        let source = Source::new(SourceName::FileName("test.bt".into()), text);
        let mut lexer = Lexer::new(Input::from(&source));
        let mut tokens = vec![];
        while let Ok(Some(token)) = lexer.read_token() {
            tokens.push(token.inner());
        }
        tokens
    }

    #[test]
    fn lex_empty() {
        let source = Source::new(SourceName::FileName("test.bt".into()), "");
        let mut lexer = Lexer::new(Input::from(&source));
        assert_eq!(lexer.read_token().unwrap(), None);
    }

    #[test]
    fn lex_hello() {
        assert_eq!(tokens("hello"), vec![Token::Ident(Ident::Ident("hello".into()))]);
    }

    #[test]
    fn lex_keywords() {
        assert_eq!(
            tokens("for x in xs if not true"),
            vec![
                Token::Ident(Keyword::For.into()),
                Token::Ident(Ident::Ident("x".into())),
                Token::Ident(Keyword::In.into()),
                Token::Ident(Ident::Ident("xs".into())),
                Token::Ident(Keyword::If.into()),
                Token::Ident(Keyword::Not.into()),
                Token::Ident(Keyword::True.into()),
            ]
        );
    }

    #[test]
    fn lex_nums() {
        assert_eq!(
            tokens("1 2.5 3e2 4.foo"),
            vec![
                Token::Num(Num::new(1.0, "1".into())),
                Token::Num(Num::new(2.5, "2.5".into())),
                Token::Num(Num::new(300.0, "3e2".into())),
                Token::Num(Num::new(4.0, "4".into())),
                t!("."),
                Token::Ident(Ident::Ident("foo".into())),
            ]
        );
    }

    #[test]
    fn lex_strings() {
        assert_eq!(
            tokens(r#""a\"b" 'c\n'"#),
            vec![
                Token::Str(Str::new("a\"b".into(), r#""a\"b""#.into())),
                Token::Str(Str::new("c\n".into(), r"'c\n'".into())),
            ]
        );
    }

    #[test]
    fn lex_punct() {
        assert_eq!(
            tokens("a+b<=c!=d&&!e||f"),
            vec![
                Token::Ident(Ident::Ident("a".into())),
                t!("+"),
                Token::Ident(Ident::Ident("b".into())),
                t!("<="),
                Token::Ident(Ident::Ident("c".into())),
                t!("!="),
                Token::Ident(Ident::Ident("d".into())),
                t!("&&"),
                t!("!"),
                Token::Ident(Ident::Ident("e".into())),
                t!("||"),
                Token::Ident(Ident::Ident("f".into())),
            ]
        );
    }

    #[test]
    fn lex_template_token() {
        let toks = tokens("f(`a{b}`)");
        assert_eq!(toks.len(), 4);
        let Token::Template(tmpl) = &toks[2] else {
            panic!("expected template, got {:?}", toks[2]);
        };
        assert_eq!(tmpl.span(), Span::new(2, 8));
        assert_eq!(tmpl.raw(), "a{b}");
    }

    #[test]
    fn lex_errors() {
        let source = Source::new(SourceName::Custom("test".into()), "a # b");
        let mut lexer = Lexer::new(Input::from(&source));
        lexer.read_token().unwrap();
        assert_eq!(
            lexer.read_token().unwrap_err(),
            Error::SyntaxError(SyntaxError::UnexpectedCharacter(2, '#'))
        );

        let source = Source::new(SourceName::Custom("test".into()), "'abc");
        let mut lexer = Lexer::new(Input::from(&source));
        assert_eq!(
            lexer.read_token().unwrap_err(),
            Error::SyntaxError(SyntaxError::UnterminatedString(0))
        );
    }

    #[test]
    fn lex_sub_span() {
        let text = "`{ x + 1 }`";
        let mut lexer = Lexer::new(Input::new(text, Span::new(2, 9)));
        let first = lexer.read().unwrap().unwrap();
        assert_eq!(first.span(), Span::new(3, 4));
        assert_eq!(lexer.cur_pos(), 4);
        lexer.unread(first);
        assert_eq!(lexer.cur_pos(), 3);
    }
}
