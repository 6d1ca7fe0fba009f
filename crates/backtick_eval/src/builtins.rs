//! Functions visible in every scope unless shadowed.

use std::sync::OnceLock;

use ecow::EcoString;
use rustc_hash::FxHashMap;

use crate::{error::Error, value::Value};

type Builtin = fn(&[Value]) -> Result<Value, Error>;

/// Longest list `range()` will build.
const MAX_RANGE_LEN: usize = 1 << 24;

const BUILTINS: &[(&str, Builtin)] = &[
    ("len", len),
    ("str", str),
    ("upper", upper),
    ("lower", lower),
    ("range", range),
    ("join", join),
    ("now", now),
    ("random", random),
];

pub fn lookup(name: &str) -> Option<Value> {
    static TABLE: OnceLock<FxHashMap<&'static str, Value>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            BUILTINS
                .iter()
                .map(|&(name, func)| (name, Value::function(name, func)))
                .collect()
        })
        .get(name)
        .cloned()
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

fn expect_args<'a, const N: usize>(name: &str, args: &'a [Value]) -> Result<&'a [Value; N], Error> {
    args.try_into().map_err(|_| {
        Error::type_error(format!(
            "{name}() takes {N} argument(s) but {} were given",
            args.len()
        ))
    })
}

fn expect_str<'a>(name: &str, value: &'a Value) -> Result<&'a EcoString, Error> {
    match value {
        Value::Str(s) => Ok(s),
        v => Err(Error::type_error(format!(
            "{name}() expects a str, not '{}'",
            v.type_name()
        ))),
    }
}

fn expect_int(name: &str, value: &Value) -> Result<i64, Error> {
    match value {
        Value::Num(n) if n.fract() == 0.0 => Ok(*n as i64),
        v => Err(Error::type_error(format!(
            "{name}() expects an integer, not '{v}'"
        ))),
    }
}

fn len(args: &[Value]) -> Result<Value, Error> {
    let [value] = expect_args::<1>("len", args)?;
    let len = match value {
        Value::Str(s) => s.chars().count(),
        Value::List(items) => items.len(),
        Value::Dict(entries) => entries.len(),
        v => {
            return Err(Error::type_error(format!(
                "object of type '{}' has no len()",
                v.type_name()
            )))
        }
    };
    Ok(Value::Num(len as f64))
}

fn str(args: &[Value]) -> Result<Value, Error> {
    let [value] = expect_args::<1>("str", args)?;
    Ok(match value {
        Value::Str(_) => value.clone(),
        v => Value::Str(v.to_string().into()),
    })
}

fn upper(args: &[Value]) -> Result<Value, Error> {
    let [value] = expect_args::<1>("upper", args)?;
    Ok(Value::str(expect_str("upper", value)?.to_uppercase()))
}

fn lower(args: &[Value]) -> Result<Value, Error> {
    let [value] = expect_args::<1>("lower", args)?;
    Ok(Value::str(expect_str("lower", value)?.to_lowercase()))
}

fn range(args: &[Value]) -> Result<Value, Error> {
    let (start, end) = match args {
        [end] => (0, expect_int("range", end)?),
        [start, end] => (expect_int("range", start)?, expect_int("range", end)?),
        _ => {
            return Err(Error::type_error(format!(
                "range() takes 1 or 2 arguments but {} were given",
                args.len()
            )))
        }
    };
    let len = usize::try_from(end.saturating_sub(start)).unwrap_or(0);
    if len > MAX_RANGE_LEN {
        return Err(Error::Native(format!(
            "range() too large: {len} items (at most {MAX_RANGE_LEN})"
        )));
    }
    Ok(Value::list((start..end).map(|i| Value::Num(i as f64))))
}

fn join(args: &[Value]) -> Result<Value, Error> {
    let [items, sep] = expect_args::<2>("join", args)?;
    let sep = expect_str("join", sep)?;
    let Value::List(items) = items else {
        return Err(Error::type_error(format!(
            "join() expects a list, not '{}'",
            items.type_name()
        )));
    };
    let mut out = EcoString::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(&item.to_string());
    }
    Ok(Value::Str(out))
}

fn now(args: &[Value]) -> Result<Value, Error> {
    let [] = expect_args::<0>("now", args)?;
    Ok(Value::str(chrono::Utc::now().to_rfc3339()))
}

fn random(args: &[Value]) -> Result<Value, Error> {
    let [] = expect_args::<0>("random", args)?;
    Ok(Value::Num(rand::random::<f64>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> Result<Value, Error> {
        let Some(Value::Function(func)) = lookup(name) else {
            panic!("{name} is not a builtin");
        };
        func.call(args)
    }

    #[test]
    fn builtin_len() {
        assert_eq!(call("len", &[Value::str("héllo")]), Ok(Value::Num(5.0)));
        assert_eq!(
            call("len", &[Value::list([Value::Null, Value::Null])]),
            Ok(Value::Num(2.0))
        );
        assert!(matches!(call("len", &[Value::Num(1.0)]), Err(Error::TypeError(_))));
        assert!(matches!(call("len", &[]), Err(Error::TypeError(_))));
    }

    #[test]
    fn builtin_strings() {
        assert_eq!(call("upper", &[Value::str("abc")]), Ok(Value::str("ABC")));
        assert_eq!(call("lower", &[Value::str("ABC")]), Ok(Value::str("abc")));
        assert_eq!(call("str", &[Value::Num(3.0)]), Ok(Value::str("3")));
        assert_eq!(
            call(
                "join",
                &[Value::list([Value::Num(1.0), Value::str("b")]), Value::str(", ")]
            ),
            Ok(Value::str("1, b"))
        );
    }

    #[test]
    fn builtin_range() {
        assert_eq!(
            call("range", &[Value::Num(3.0)]),
            Ok(Value::list([Value::Num(0.0), Value::Num(1.0), Value::Num(2.0)]))
        );
        assert_eq!(
            call("range", &[Value::Num(2.0), Value::Num(4.0)]),
            Ok(Value::list([Value::Num(2.0), Value::Num(3.0)]))
        );
        assert!(matches!(call("range", &[Value::Num(0.5)]), Err(Error::TypeError(_))));
        assert_eq!(call("range", &[Value::Num(3.0), Value::Num(1.0)]), Ok(Value::list([])));
        assert!(matches!(call("range", &[Value::Num(1e18)]), Err(Error::Native(_))));
        assert!(matches!(
            call("range", &[Value::Num(-1e18), Value::Num(1e18)]),
            Err(Error::Native(_))
        ));
    }

    #[test]
    fn builtin_nondeterministic() {
        let Ok(Value::Str(stamp)) = call("now", &[]) else {
            panic!("now() must return a string");
        };
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());

        let Ok(Value::Num(n)) = call("random", &[]) else {
            panic!("random() must return a number");
        };
        assert!((0.0..1.0).contains(&n));
    }

    #[test]
    fn every_builtin_resolves() {
        for name in names() {
            assert!(lookup(name).is_some(), "{name}");
        }
    }
}
