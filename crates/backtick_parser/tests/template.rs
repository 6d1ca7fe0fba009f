use backtick_ast::{expr::Expr, span::Span, template::TemplateLit, Node};
use backtick_parser::{
    error::{Error, Malformed, SyntaxError},
    parse_template, parse_template_body,
    source::{Source, SourceName},
};

fn source(text: &str) -> Source {
    Source::new(SourceName::Custom("test".into()), text)
}

fn quasis(tmpl: &TemplateLit) -> String {
    tmpl.quasis()
        .iter()
        .map(|q| format!("{:?}/{:?}", q.raw().as_str(), q.cooked().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn template_with_holes() {
    let tmpl = parse_template(&source("`Hi {name}, you are {age + 1}!`")).unwrap();
    assert_eq!(tmpl.raw(), "Hi {name}, you are {age + 1}!");
    insta::assert_snapshot!(quasis(&tmpl), @r#""Hi "/"Hi " ", you are "/", you are " "!"/"!""#);

    let [Expr::Ident(name), Expr::BinOp(_)] = tmpl.exprs() else {
        panic!("unexpected holes: {:?}", tmpl.exprs());
    };
    assert_eq!(name.val(), "name");
    assert_eq!(name.span(), Span::new(5, 9));
}

#[test]
fn template_escapes() {
    let tmpl = parse_template(&source(r"`{{x}} \` \u{41}`")).unwrap();
    assert!(tmpl.exprs().is_empty());
    insta::assert_snapshot!(quasis(&tmpl), @r#""{{x}} \\` \\u{41}"/"{x} ` A""#);
}

#[test]
fn template_body() {
    let tmpl = parse_template_body(&source("a {x} b")).unwrap();
    assert_eq!(tmpl.raw(), "a {x} b");
    insta::assert_snapshot!(quasis(&tmpl), @r#""a "/"a " " b"/" b""#);
    assert_eq!(tmpl.exprs()[0].span(), Span::new(3, 4));
}

#[test]
fn hole_with_nested_braces() {
    let tmpl = parse_template(&source("`{ {'k': [1, '}']}.k }`")).unwrap();
    assert!(matches!(&tmpl.exprs()[..], [Expr::Member(_)]));
    insta::assert_snapshot!(quasis(&tmpl), @r#"""/"" ""/"""#);
}

#[test]
fn malformed_before_syntax() {
    // A malformed template is reported even when an earlier hole has a
    // syntax error, since lexing finishes before any hole is parsed.
    let err = parse_template(&source("`{1 +} {x`")).unwrap_err();
    assert!(matches!(err, Error::Malformed(ref err) if err.kind() == Malformed::UnterminatedHole));
    assert_eq!(err.offset(), 7);
}

#[test]
fn hole_syntax_error() {
    let err = parse_template(&source("`ok {1 +}`")).unwrap_err();
    assert_eq!(err, Error::SyntaxError(SyntaxError::UnexpectedEndOfInput(8)));
}
