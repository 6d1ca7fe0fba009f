use ecow::EcoString;

/// Represents a source.
#[derive(Debug, Clone)]
pub struct Source {
    pub name: SourceName,
    pub text: EcoString,
}

/// Represents a source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceName {
    /// File name
    FileName(String),

    /// Anything other than file name
    Custom(String),
}

impl Source {
    /// Creates a new source.
    ///
    /// ```rust
    /// use backtick_parser::source::{Source, SourceName};
    ///
    /// let _ = Source::new(SourceName::FileName("hello.bt".into()), "`hello {name}`");
    /// let _ = Source::new(SourceName::Custom("hello".into()), "`hello {name}`");
    /// ```
    pub fn new(name: SourceName, text: impl Into<EcoString>) -> Self {
        Self {
            name,
            text: text.into(),
        }
    }

    /// Converts a byte offset into a 1-based `(line, column)` pair.
    /// Columns count chars, not bytes. Offsets past the end map to the end.
    ///
    /// ```rust
    /// use backtick_parser::source::{Source, SourceName};
    ///
    /// let src = Source::new(SourceName::Custom("doc".into()), "`a\nb{`");
    /// assert_eq!(src.line_col(0), (1, 1));
    /// assert_eq!(src.line_col(4), (2, 2));
    /// ```
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;
        for (i, c) in self.text.char_indices() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

impl std::fmt::Display for SourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileName(name) | Self::Custom(name) => f.write_str(name),
        }
    }
}
