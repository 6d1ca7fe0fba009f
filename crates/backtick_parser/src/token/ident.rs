use ecow::EcoString;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ident {
    Keyword(Keyword),
    Ident(EcoString),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    And,
    False,
    For,
    If,
    In,
    Let,
    Not,
    Null,
    Or,
    True,
}

impl TryFrom<&str> for Keyword {
    type Error = ();

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(match s {
            "and" => Self::And,
            "false" => Self::False,
            "for" => Self::For,
            "if" => Self::If,
            "in" => Self::In,
            "let" => Self::Let,
            "not" => Self::Not,
            "null" => Self::Null,
            "or" => Self::Or,
            "true" => Self::True,
            _ => return Err(()),
        })
    }
}

impl From<Keyword> for Ident {
    fn from(kw: Keyword) -> Self {
        Self::Keyword(kw)
    }
}
