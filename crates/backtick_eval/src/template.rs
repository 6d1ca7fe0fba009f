use std::iter;

use ecow::EcoString;

use crate::value::Value;

/// The result of constructing a template literal.
///
/// Holds the raw template text and its segments in source order: literal
/// text and evaluated hole values strictly alternate, starting and ending
/// with a (possibly empty) literal. Nothing is escaped, formatted or joined;
/// a template never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    raw: EcoString,

    /// `values.len() + 1` entries
    strings: Vec<Literal>,

    values: Vec<Value>,
}

/// Literal text of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Text as written in the template
    raw: EcoString,

    /// Text with escape sequences resolved
    cooked: EcoString,
}

/// One entry of the alternating segment sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment<'a> {
    Literal(&'a Literal),
    Value(&'a Value),
}

/// A segment in tagged form: literal text travels as `Value::Str` holding
/// the cooked text, with the raw text alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    pub value: Value,
    pub is_literal: bool,

    /// Text as written; `None` for values
    pub raw: Option<EcoString>,
}

impl Template {
    pub(crate) fn new(raw: EcoString, strings: Vec<Literal>, values: Vec<Value>) -> Self {
        debug_assert_eq!(strings.len(), values.len() + 1);
        Self {
            raw,
            strings,
            values,
        }
    }

    /// Normalises a tagged segment list into a template.
    ///
    /// Adjacent literals are merged, and empty literals are inserted between
    /// adjacent values and at either end, so the result alternates. Literal
    /// entries that are not strings contribute their `Display` text. A literal
    /// entry without raw text uses its cooked text in its place.
    ///
    /// ```rust
    /// use backtick_eval::{Tagged, Template, Value};
    ///
    /// let tmpl = Template::from_tagged(
    ///     "{a}{b}",
    ///     [
    ///         Tagged::value(Value::Num(1.0)),
    ///         Tagged::value(Value::Num(2.0)),
    ///     ],
    /// );
    /// assert_eq!(tmpl.len(), 5);
    /// assert_eq!(tmpl.strings()[1].cooked(), "");
    /// ```
    pub fn from_tagged(raw: impl Into<EcoString>, entries: impl IntoIterator<Item = Tagged>) -> Self {
        let mut strings = vec![];
        let mut values = vec![];
        let mut raw_text = EcoString::new();
        let mut cooked = EcoString::new();

        for entry in entries {
            if entry.is_literal {
                let text = match entry.value {
                    Value::Str(s) => s,
                    value => value.to_string().into(),
                };
                raw_text.push_str(entry.raw.as_ref().unwrap_or(&text));
                cooked.push_str(&text);
            } else {
                strings.push(Literal::new(
                    std::mem::take(&mut raw_text),
                    std::mem::take(&mut cooked),
                ));
                values.push(entry.value);
            }
        }
        strings.push(Literal::new(raw_text, cooked));

        Self::new(raw.into(), strings, values)
    }

    /// Template text between the delimiters, exactly as written.
    pub fn raw(&self) -> &EcoString {
        &self.raw
    }

    pub fn strings(&self) -> &[Literal] {
        &self.strings
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of holes.
    pub fn hole_count(&self) -> usize {
        self.values.len()
    }

    /// Number of segments; always odd.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.strings.len() + self.values.len()
    }

    /// Literal, value, literal, ..., literal.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> + '_ {
        let values = self
            .values
            .iter()
            .map(|value| Some(Segment::Value(value)))
            .chain(iter::once(None));
        self.strings
            .iter()
            .map(Segment::Literal)
            .zip(values)
            .flat_map(|(lit, value)| iter::once(lit).chain(value))
    }

    /// Converts to tagged form. Literals carry both their raw and cooked
    /// text, so [`Template::from_tagged`] restores an equal template.
    pub fn to_tagged(&self) -> Vec<Tagged> {
        self.segments()
            .map(|segment| match segment {
                Segment::Literal(lit) => Tagged::from(lit),
                Segment::Value(value) => Tagged::value(value.clone()),
            })
            .collect()
    }
}

impl Literal {
    pub fn new(raw: impl Into<EcoString>, cooked: impl Into<EcoString>) -> Self {
        Self {
            raw: raw.into(),
            cooked: cooked.into(),
        }
    }

    pub fn raw(&self) -> &EcoString {
        &self.raw
    }

    pub fn cooked(&self) -> &EcoString {
        &self.cooked
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl Segment<'_> {
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl Tagged {
    /// Literal text without escapes; raw and cooked text are the same.
    pub fn literal(text: impl Into<EcoString>) -> Self {
        let text = text.into();
        Self {
            raw: Some(text.clone()),
            value: Value::Str(text),
            is_literal: true,
        }
    }

    pub fn value(value: Value) -> Self {
        Self {
            value,
            is_literal: false,
            raw: None,
        }
    }
}

impl From<&Literal> for Tagged {
    fn from(lit: &Literal) -> Self {
        Self {
            value: Value::Str(lit.cooked.clone()),
            is_literal: true,
            raw: Some(lit.raw.clone()),
        }
    }
}
