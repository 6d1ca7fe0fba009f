use backtick_eval::{Error, EvalCtx, Scope, Value};
use backtick_parser::{
    parse_module,
    source::{Source, SourceName},
};

fn eval(text: &str) -> Result<Value, Error> {
    let src = Source::new(SourceName::Custom("test".into()), text);
    let module = parse_module(&src)?;
    EvalCtx::new().eval_module(&module)
}

#[test]
fn num() {
    assert_eq!(eval("123"), Ok(Value::Num(123.0)));
}

#[test]
fn str() {
    let val = eval(r#""hello""#).unwrap();
    assert_eq!(format!("{val:?}"), r#"str("hello")"#);
}

#[test]
fn null() {
    assert_eq!(eval("null"), Ok(Value::Null));
    assert_eq!(eval(""), Ok(Value::Null));
    assert_eq!(eval("let x = 1;"), Ok(Value::Null));
}

#[test]
fn arith() {
    assert_eq!(eval("12345+19382-113*91/2"), Ok(Value::Num(26585.5)));
}

#[test]
fn let_binding() {
    assert_eq!(
        eval("let foo = 24; let bar = 18; foo + bar"),
        Ok(Value::Num(42.0))
    );
}

#[test]
fn last_statement_wins() {
    assert_eq!(eval("1; 2;; 'three'"), Ok(Value::str("three")));
}

#[test]
fn template_binding() {
    let val = eval("let who = 'world'; let t = `hello {who}`; t.values[0]").unwrap();
    assert_eq!(val, Value::str("world"));

    let Value::Template(tmpl) = eval("let n = 3; `{n} x {n * 2}`").unwrap() else {
        panic!("expected a template");
    };
    assert_eq!(tmpl.raw(), "{n} x {n * 2}");
    assert_eq!(tmpl.values(), &[Value::Num(3.0), Value::Num(6.0)]);
}

#[test]
fn globals_persist_across_modules() {
    let mut ctx = EvalCtx::new();
    for (text, expected) in [
        ("let count = 1;", Value::Null),
        ("let count = count + 1;", Value::Null),
        ("count", Value::Num(2.0)),
    ] {
        let src = Source::new(SourceName::Custom("repl".into()), text);
        let module = parse_module(&src).unwrap();
        assert_eq!(ctx.eval_module(&module), Ok(expected));
    }
}

#[test]
fn errors() {
    assert_eq!(eval("nope"), Err(Error::ReferenceError("nope".into())));
    assert!(matches!(eval("let = 1;"), Err(Error::Parse(_))));
    assert!(matches!(eval("`{1 +}`"), Err(Error::Parse(_))));
}

#[test]
fn host_globals() {
    let globals = Scope::new().with("site", Value::str("example.org"));
    let mut ctx = EvalCtx::with_globals(globals);
    ctx.globals_mut().declare(
        "shout",
        Value::function("shout", |args| match args {
            [Value::Str(s)] => Ok(Value::str(s.to_uppercase())),
            _ => Err(Error::type_error("shout() takes a str")),
        }),
    );

    let src = Source::new(SourceName::Custom("test".into()), "shout(site)");
    let module = parse_module(&src).unwrap();
    assert_eq!(ctx.eval_module(&module), Ok(Value::str("EXAMPLE.ORG")));
}
