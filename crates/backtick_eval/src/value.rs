use std::{collections::BTreeMap, fmt, sync::Arc};

use ecow::EcoString;

use crate::{error::Error, template::Template};

/// A dynamically-typed value.
///
/// Compound values are shared behind `Arc`, so cloning is cheap and values
/// can cross threads.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(EcoString),
    List(Arc<Vec<Value>>),
    Dict(Arc<BTreeMap<EcoString, Value>>),
    Template(Arc<Template>),
    Function(NativeFunction),
}

type NativeFn = dyn Fn(&[Value]) -> Result<Value, Error> + Send + Sync;

/// A function implemented by the host.
#[derive(Clone)]
pub struct NativeFunction {
    name: EcoString,
    func: Arc<NativeFn>,
}

impl Value {
    pub fn str(s: impl Into<EcoString>) -> Self {
        Self::Str(s.into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(Arc::new(items.into_iter().collect()))
    }

    pub fn dict<K: Into<EcoString>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Dict(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn template(tmpl: Template) -> Self {
        Self::Template(Arc::new(tmpl))
    }

    /// Wraps a host closure as a callable value.
    ///
    /// ```rust
    /// use backtick_eval::Value;
    ///
    /// let double = Value::function("double", |args| match args {
    ///     [Value::Num(n)] => Ok(Value::Num(n * 2.0)),
    ///     _ => Ok(Value::Null),
    /// });
    /// assert_eq!(double.to_string(), "<function double>");
    /// ```
    pub fn function<F>(name: impl Into<EcoString>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Self::Function(NativeFunction {
            name: name.into(),
            func: Arc::new(func),
        })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Num(_) => "num",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
            Self::Template(_) => "template",
            Self::Function(_) => "function",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Num(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Dict(entries) => !entries.is_empty(),
            Self::Template(_) | Self::Function(_) => true,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_template(&self) -> Option<&Template> {
        match self {
            Self::Template(tmpl) => Some(tmpl),
            _ => None,
        }
    }
}

impl NativeFunction {
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, Error> {
        (self.func)(args)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Num(a), Self::Num(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Dict(a), Self::Dict(b)) => a == b,
            (Self::Template(a), Self::Template(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Arc::ptr_eq(&a.func, &b.func),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl From<EcoString> for Value {
    fn from(s: EcoString) -> Self {
        Self::Str(s)
    }
}

impl From<Template> for Value {
    fn from(tmpl: Template) -> Self {
        Self::template(tmpl)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "bool({b})"),
            Self::Num(n) => write!(f, "num({})", Num(*n)),
            Self::Str(s) => write!(f, "str({:?})", s.as_str()),
            Self::List(items) => f.debug_list().entries(items.iter()).finish(),
            Self::Dict(entries) => f.debug_map().entries(entries.iter()).finish(),
            Self::Template(tmpl) => fmt::Debug::fmt(tmpl, f),
            Self::Function(func) => write!(f, "function({})", func.name),
        }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function({})", self.name)
    }
}

/// Human-readable rendering, used by `str()` and the REPL.
///
/// Strings nested in lists and dicts are quoted; a template renders as its
/// raw source, since joining its segments is up to the consumer.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Num(n) => write!(f, "{}", Num(*n)),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", Nested(item))?;
                }
                f.write_str("]")
            }
            Self::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key.as_str(), Nested(value))?;
                }
                f.write_str("}")
            }
            Self::Template(tmpl) => write!(f, "`{}`", tmpl.raw()),
            Self::Function(func) => write!(f, "<function {}>", func.name),
        }
    }
}

/// Prints integral numbers without a fractional part.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 && self.0.abs() < 1e16 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

struct Nested<'a>(&'a Value);

impl fmt::Display for Nested<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            value => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Num(0.0).is_truthy());
        assert!(!Value::str("").is_truthy());
        assert!(!Value::list([]).is_truthy());
        assert!(Value::Num(-1.0).is_truthy());
        assert!(Value::str("x").is_truthy());
        assert!(Value::function("f", |_| Ok(Value::Null)).is_truthy());
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Num(42.0).to_string(), "42");
        assert_eq!(Value::Num(0.5).to_string(), "0.5");
        assert_eq!(Value::str("a").to_string(), "a");
        assert_eq!(
            Value::list([Value::str("a"), Value::Num(1.0), Value::Null]).to_string(),
            r#"["a", 1, null]"#
        );
        assert_eq!(
            Value::dict([("k", Value::str("v"))]).to_string(),
            r#"{"k": "v"}"#
        );
    }

    #[test]
    fn value_debug() {
        assert_eq!(format!("{:?}", Value::str("hello")), r#"str("hello")"#);
        assert_eq!(format!("{:?}", Value::Num(1.5)), "num(1.5)");
        assert_eq!(format!("{:?}", Value::Bool(true)), "bool(true)");
        assert_eq!(format!("{:?}", Value::Null), "null");
    }

    #[test]
    fn function_identity() {
        let f = Value::function("f", |_| Ok(Value::Null));
        let g = Value::function("f", |_| Ok(Value::Null));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }
}
