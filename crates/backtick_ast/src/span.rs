/// Represents a span of text.
/// Offsets are byte offsets into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T>(pub Span, pub T);

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the smallest span covering both `self` and `other`.
    pub fn to(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Slices `text` by this span.
    ///
    /// ```rust
    /// use backtick_ast::span::Span;
    ///
    /// assert_eq!(Span::new(1, 4).slice("`foo`"), "foo");
    /// ```
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

impl<T> Spanned<T> {
    pub fn span(&self) -> Span {
        self.0
    }

    pub fn inner_ref(&self) -> &T {
        &self.1
    }

    pub fn inner(self) -> T {
        self.1
    }
}
