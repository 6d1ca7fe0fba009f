//! Splits a template literal into literal text and expression holes.
//!
//! Holes are found by tracking a stack of open delimiters, so braces that
//! belong to a dictionary literal, call or nested template inside a hole do
//! not end it. Quoted strings inside holes are skipped whole.

use backtick_ast::span::Span;
use ecow::EcoString;

use crate::{
    error::{Malformed, MalformedTemplateError},
    lexer::read_escape,
    token::template::{Piece, Template},
};

/// Lexes `text`, which must be exactly one template literal, backticks
/// included.
///
/// ```rust
/// use backtick_parser::lexer::template::lex_template;
///
/// let tmpl = lex_template("`a{b}c`").unwrap();
/// assert_eq!(tmpl.raw(), "a{b}c");
/// assert_eq!(tmpl.pieces().len(), 3);
/// ```
pub fn lex_template(text: &str) -> Result<Template, MalformedTemplateError> {
    let mut scanner = TemplateScanner::new(text, 0);
    let tmpl = scanner.scan_literal()?;
    if scanner.pos < text.len() {
        return Err(error(Malformed::TrailingCharacters, scanner.pos));
    }
    log::trace!("lexed template with {} hole(s)", tmpl.holes().count());
    Ok(tmpl)
}

/// Lexes `text` as the body of a template literal, i.e. the span between
/// the opening and closing backticks.
pub fn lex_template_body(text: &str) -> Result<Template, MalformedTemplateError> {
    let mut scanner = TemplateScanner::new(text, 0);
    let pieces = scanner.scan_pieces(None)?;
    let span = Span::new(0, text.len());
    Ok(Template::new(span, span, text.into(), pieces))
}

pub(crate) struct TemplateScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TemplateScanner<'a> {
    pub(crate) fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn cur(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.cur()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Scans a complete literal whose opening backtick is at the current
    /// position. Leaves the position just past the closing backtick.
    pub(crate) fn scan_literal(&mut self) -> Result<Template, MalformedTemplateError> {
        let start = self.pos;
        if self.cur() != Some('`') {
            return Err(error(Malformed::MissingOpeningDelimiter, start));
        }
        self.bump();

        let body_start = self.pos;
        let pieces = self.scan_pieces(Some(start))?;
        let body = Span::new(body_start, self.pos);
        self.bump();

        Ok(Template::new(
            Span::new(start, self.pos),
            body,
            body.slice(self.text).into(),
            pieces,
        ))
    }

    /// Scans text and holes up to the closing backtick (not consumed), or up
    /// to the end of input when `open` is `None`.
    fn scan_pieces(&mut self, open: Option<usize>) -> Result<Vec<Piece>, MalformedTemplateError> {
        let mut pieces = vec![];
        let mut text_start = self.pos;
        let mut cooked = EcoString::new();

        loop {
            let Some(c) = self.cur() else {
                return match open {
                    Some(open) => Err(error(Malformed::UnterminatedTemplate, open)),
                    None => {
                        pieces.push(text_piece(text_start, self.pos, cooked));
                        Ok(pieces)
                    }
                };
            };

            match c {
                '`' if open.is_some() => {
                    pieces.push(text_piece(text_start, self.pos, cooked));
                    return Ok(pieces);
                }
                '`' => return Err(error(Malformed::UnexpectedBacktick, self.pos)),
                '\\' => self.scan_escape(&mut cooked)?,
                '{' if self.peek() == Some('{') => {
                    self.pos += 2;
                    cooked.push('{');
                }
                '}' if self.peek() == Some('}') => {
                    self.pos += 2;
                    cooked.push('}');
                }
                '{' => {
                    pieces.push(text_piece(
                        text_start,
                        self.pos,
                        std::mem::take(&mut cooked),
                    ));
                    pieces.push(Piece::Hole(self.scan_hole()?));
                    text_start = self.pos;
                }
                '}' => return Err(error(Malformed::UnmatchedClosingBrace, self.pos)),
                c => {
                    self.bump();
                    cooked.push(c);
                }
            }
        }
    }

    fn scan_escape(&mut self, cooked: &mut EcoString) -> Result<(), MalformedTemplateError> {
        let start = self.pos;
        self.bump();
        let (c, len) = read_escape(&self.text[self.pos..])
            .ok_or_else(|| error(Malformed::InvalidEscape, start))?;
        self.pos += len;
        cooked.push(c);
        Ok(())
    }

    /// Scans a hole whose `{` is at the current position and returns the
    /// span of its contents. Leaves the position just past the closing `}`.
    fn scan_hole(&mut self) -> Result<Span, MalformedTemplateError> {
        let open = self.pos;
        self.bump();
        let start = self.pos;
        let mut closers = vec!['}'];

        while let Some(c) = self.cur() {
            match c {
                '{' => closers.push('}'),
                '(' => closers.push(')'),
                '[' => closers.push(']'),
                '}' | ')' | ']' => {
                    let expected = closers.pop().unwrap_or('}');
                    if expected != c {
                        return Err(error(
                            Malformed::MismatchedDelimiter { expected, found: c },
                            self.pos,
                        ));
                    }
                    if closers.is_empty() {
                        let span = Span::new(start, self.pos);
                        self.bump();
                        if span.slice(self.text).trim().is_empty() {
                            return Err(error(Malformed::EmptyHole, open));
                        }
                        return Ok(span);
                    }
                }
                '"' | '\'' => {
                    self.skip_string(c)?;
                    continue;
                }
                '`' => {
                    // A nested literal that runs off the end means this hole
                    // never closed either.
                    match self.scan_literal() {
                        Ok(_) => continue,
                        Err(err) if err.kind() == Malformed::UnterminatedTemplate => break,
                        Err(err) => return Err(err),
                    }
                }
                _ => {}
            }
            self.bump();
        }

        Err(error(Malformed::UnterminatedHole, open))
    }

    fn skip_string(&mut self, quote: char) -> Result<(), MalformedTemplateError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                None => return Err(error(Malformed::UnterminatedString, start)),
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }
}

fn text_piece(start: usize, end: usize, cooked: EcoString) -> Piece {
    Piece::Text {
        span: Span::new(start, end),
        cooked,
    }
}

fn error(kind: Malformed, offset: usize) -> MalformedTemplateError {
    MalformedTemplateError::new(kind, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders pieces as `"text"` / `{hole}` for compact assertions.
    fn render(src: &str, tmpl: &Template) -> String {
        tmpl.pieces()
            .iter()
            .map(|piece| match piece {
                Piece::Text { cooked, .. } => format!("{:?}", cooked.as_str()),
                Piece::Hole(span) => format!("{{{}}}", span.slice(src)),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn lex(src: &str) -> String {
        render(src, &lex_template(src).unwrap())
    }

    fn lex_err(src: &str) -> (Malformed, usize) {
        let err = lex_template(src).unwrap_err();
        (err.kind(), err.offset())
    }

    #[test]
    fn lex_no_holes() {
        insta::assert_snapshot!(lex("`foo`"), @r#""foo""#);
    }

    #[test]
    fn lex_empty() {
        let tmpl = lex_template("``").unwrap();
        assert_eq!(tmpl.raw(), "");
        assert_eq!(tmpl.body(), Span::new(1, 1));
        insta::assert_snapshot!(render("``", &tmpl), @r#""""#);
    }

    #[test]
    fn lex_single_hole() {
        insta::assert_snapshot!(lex("`{expr}`"), @r#""" {expr} """#);
    }

    #[test]
    fn lex_adjacent_holes() {
        insta::assert_snapshot!(lex("`{a}{b}`"), @r#""" {a} "" {b} """#);
    }

    #[test]
    fn lex_text_and_holes() {
        insta::assert_snapshot!(
            lex("`Hello, {user.name}! You have {len(items)} items.`"),
            @r#""Hello, " {user.name} "! You have " {len(items)} " items.""#
        );
    }

    #[test]
    fn lex_hole_spans_are_absolute() {
        let tmpl = lex_template("`ab{cd}`").unwrap();
        assert_eq!(tmpl.span(), Span::new(0, 8));
        assert_eq!(tmpl.holes().collect::<Vec<_>>(), vec![Span::new(4, 6)]);
        assert_eq!(tmpl.pieces()[0].span(), Span::new(1, 3));
        assert_eq!(tmpl.pieces()[2].span(), Span::new(7, 7));
    }

    #[test]
    fn lex_nested_braces_in_hole() {
        insta::assert_snapshot!(
            lex("`x{ {'a': {'b': 1}}['a'] }y`"),
            @r#""x" { {'a': {'b': 1}}['a'] } "y""#
        );
    }

    #[test]
    fn lex_brace_in_string_in_hole() {
        insta::assert_snapshot!(lex(r#"`{"}" + '{'}`"#), @r#""" {"}" + '{'} """#);
    }

    #[test]
    fn lex_nested_template_in_hole() {
        insta::assert_snapshot!(lex("`a{`b{c}`}d`"), @r#""a" {`b{c}`} "d""#);
    }

    #[test]
    fn lex_escaped_braces() {
        let src = "`{{literal}} {x}`";
        let tmpl = lex_template(src).unwrap();
        insta::assert_snapshot!(render(src, &tmpl), @r#""{literal} " {x} """#);
        assert_eq!(tmpl.pieces()[0].span().slice(src), "{{literal}} ");
    }

    #[test]
    fn lex_backslash_escapes() {
        insta::assert_snapshot!(
            lex(r"`a\`b\{c\}\n\t\\\u{1F600}`"),
            @r#""a`b{c}\n\t\\😀""#
        );
    }

    #[test]
    fn lex_multiline() {
        insta::assert_snapshot!(lex("`line1\n{x}\nline3`"), @r#""line1\n" {x} "\nline3""#);
    }

    #[test]
    fn lex_body() {
        let tmpl = lex_template_body("foo {bar} baz").unwrap();
        assert_eq!(tmpl.holes().collect::<Vec<_>>(), vec![Span::new(5, 8)]);
        assert_eq!(tmpl.pieces().len(), 3);
    }

    #[test]
    fn lex_body_unterminated_hole() {
        let err = lex_template_body("foo{bar").unwrap_err();
        assert_eq!((err.kind(), err.offset()), (Malformed::UnterminatedHole, 3));
    }

    #[test]
    fn lex_body_rejects_backtick() {
        let err = lex_template_body("a`b").unwrap_err();
        assert_eq!((err.kind(), err.offset()), (Malformed::UnexpectedBacktick, 1));
    }

    #[test]
    fn lex_unterminated_hole() {
        assert_eq!(lex_err("`foo{bar`"), (Malformed::UnterminatedHole, 4));
        assert_eq!(lex_err("`foo{bar"), (Malformed::UnterminatedHole, 4));
        assert_eq!(lex_err("`{(a}`"), (Malformed::MismatchedDelimiter { expected: ')', found: '}' }, 4));
    }

    #[test]
    fn lex_unterminated_template() {
        assert_eq!(lex_err("`foo"), (Malformed::UnterminatedTemplate, 0));
        assert_eq!(lex_err("`a{b}c"), (Malformed::UnterminatedTemplate, 0));
    }

    #[test]
    fn lex_unterminated_string_in_hole() {
        assert_eq!(lex_err(r#"`{"abc}`"#), (Malformed::UnterminatedString, 2));
    }

    #[test]
    fn lex_missing_and_trailing_delimiters() {
        assert_eq!(lex_err("foo"), (Malformed::MissingOpeningDelimiter, 0));
        assert_eq!(lex_err("`foo` bar"), (Malformed::TrailingCharacters, 5));
    }

    #[test]
    fn lex_empty_hole() {
        assert_eq!(lex_err("`a{}`"), (Malformed::EmptyHole, 2));
        assert_eq!(lex_err("`a{  }`"), (Malformed::EmptyHole, 2));
    }

    #[test]
    fn lex_lone_closing_brace() {
        assert_eq!(lex_err("`a}b`"), (Malformed::UnmatchedClosingBrace, 2));
    }

    #[test]
    fn lex_invalid_escape() {
        assert_eq!(lex_err(r"`a\qb`"), (Malformed::InvalidEscape, 2));
        assert_eq!(lex_err(r"`\u{110000}`"), (Malformed::InvalidEscape, 1));
    }
}
