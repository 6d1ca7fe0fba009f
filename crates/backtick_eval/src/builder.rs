use backtick_ast::template::TemplateLit;
use backtick_parser::{
    parse_template,
    source::{Source, SourceName},
};

use crate::{
    error::Error,
    eval::eval_expr,
    lexical_env::Scope,
    template::{Literal, Template},
};

/// Builds a [`Template`] from a parsed template literal.
///
/// Every hole is evaluated exactly once, left to right, in `scope`. Nothing
/// is cached: building the same literal twice evaluates its holes twice and
/// yields two independent templates. The first error raised by a hole is
/// returned unchanged and no template is produced.
pub fn build_template(lit: &TemplateLit, scope: &Scope<'_>) -> Result<Template, Error> {
    let values = lit
        .exprs()
        .iter()
        .enumerate()
        .map(|(i, expr)| {
            let value = eval_expr(expr, scope)?;
            log::trace!("hole #{i} = {value:?}");
            Ok(value)
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let strings = lit
        .quasis()
        .iter()
        .map(|quasi| Literal::new(quasi.raw().clone(), quasi.cooked().clone()))
        .collect();

    log::debug!("built template with {} hole(s)", values.len());
    Ok(Template::new(lit.raw().clone(), strings, values))
}

/// Parses `text`, a single template literal including its backticks, and
/// builds it in `scope`.
///
/// Parsing completes before any hole is evaluated, so a malformed template
/// never runs any of its expressions.
///
/// ```rust
/// use backtick_eval::{construct, Scope, Value};
///
/// let scope = Scope::new().with("name", Value::str("world"));
/// let tmpl = construct("`hello {name}!`", &scope).unwrap();
/// assert_eq!(tmpl.strings()[0].cooked(), "hello ");
/// assert_eq!(tmpl.values(), &[Value::str("world")]);
/// ```
pub fn construct(text: &str, scope: &Scope<'_>) -> Result<Template, Error> {
    let src = Source::new(SourceName::Custom("template".into()), text);
    let lit = parse_template(&src)?;
    build_template(&lit, scope)
}
