use backtick_ast::span::Spanned;
use thiserror::Error as ThisError;

use crate::token::Token;

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] MalformedTemplateError),

    #[error("syntax error: {0}")]
    SyntaxError(#[from] SyntaxError),
}

/// The template literal itself could not be split into text and holes.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("malformed template: {kind} at offset {offset}")]
pub struct MalformedTemplateError {
    kind: Malformed,
    offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Malformed {
    #[error("missing opening backtick")]
    MissingOpeningDelimiter,

    #[error("unterminated template literal")]
    UnterminatedTemplate,

    #[error("unterminated expression hole")]
    UnterminatedHole,

    #[error("unterminated string literal in expression hole")]
    UnterminatedString,

    #[error("empty expression hole")]
    EmptyHole,

    #[error("single '}}' is not allowed in template text")]
    UnmatchedClosingBrace,

    #[error("expected '{expected}' but found '{found}'")]
    MismatchedDelimiter { expected: char, found: char },

    #[error("invalid escape sequence")]
    InvalidEscape,

    #[error("unexpected backtick in template body")]
    UnexpectedBacktick,

    #[error("unexpected characters after template literal")]
    TrailingCharacters,
}

/// An expression inside a hole (or a module) is not well-formed.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum SyntaxError {
    #[error("unexpected token {:?} at offset {}", .0.inner_ref(), .0.span().start())]
    UnexpectedToken(Spanned<Token>),

    #[error("unexpected end of input at offset {0}")]
    UnexpectedEndOfInput(usize),

    #[error("unexpected character {1:?} at offset {0}")]
    UnexpectedCharacter(usize, char),

    #[error("invalid number literal at offset {0}")]
    InvalidNumber(usize),

    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    #[error("unterminated string literal at offset {0}")]
    UnterminatedString(usize),
}

impl Error {
    /// Byte offset into the source text where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            Self::Malformed(err) => err.offset(),
            Self::SyntaxError(err) => err.offset(),
        }
    }
}

impl MalformedTemplateError {
    pub const fn new(kind: Malformed, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub const fn kind(&self) -> Malformed {
        self.kind
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl SyntaxError {
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken(tok) => tok.span().start(),
            Self::UnexpectedEndOfInput(offset)
            | Self::UnexpectedCharacter(offset, _)
            | Self::InvalidNumber(offset)
            | Self::InvalidEscape(offset)
            | Self::UnterminatedString(offset) => *offset,
        }
    }
}
