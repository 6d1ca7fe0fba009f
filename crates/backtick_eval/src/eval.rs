use std::{collections::BTreeMap, sync::Arc};

use backtick_ast::{
    bin::{BinOp, BinOpExpr, UnaryExpr, UnaryOp},
    decl::{self, Decl},
    expr::{CallExpr, ComprehensionExpr, DictExpr, Expr, IndexExpr, MemberExpr},
    ident::Ident,
    literal::Literal,
    module::{Module, ModuleItem},
    stmt::{self, Stmt},
};
use ecow::EcoString;

use crate::{
    builder::build_template, error::Error, lexical_env::Scope, template::Template, value::Value,
};

/// Evaluates modules against a global scope that persists between calls.
pub struct EvalCtx {
    globals: Scope<'static>,
}

impl EvalCtx {
    pub fn new() -> Self {
        Self::with_globals(Scope::new())
    }

    pub fn with_globals(globals: Scope<'static>) -> Self {
        Self { globals }
    }

    pub fn globals(&self) -> &Scope<'static> {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut Scope<'static> {
        &mut self.globals
    }

    /// Evaluates `module` and returns the value of its last expression
    /// statement, or `null` if there is none.
    pub fn eval_module(&mut self, module: &Module) -> Result<Value, Error> {
        let mut result = Value::Null;
        for item in module.children() {
            match item {
                ModuleItem::Stmt(stmt) => {
                    if let Some(value) = self.eval_stmt(stmt)? {
                        result = value;
                    }
                }
                ModuleItem::Decl(decl) => self.eval_decl(decl)?,
            }
        }
        Ok(result)
    }

    fn eval_decl(&mut self, decl: &Decl) -> Result<(), Error> {
        match decl.kind() {
            decl::Kind::LexicalDecl(decl) => {
                let init = match decl.init() {
                    Some(init) => eval_expr(init, &self.globals)?,
                    None => Value::Null,
                };
                log::trace!("let {} = {:?}", decl.bind().val(), init);
                self.globals.declare(decl.bind().val().clone(), init);
            }
        }
        Ok(())
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> Result<Option<Value>, Error> {
        match stmt.kind() {
            stmt::Kind::Expr(expr) => eval_expr(expr, &self.globals).map(Some),
            stmt::Kind::Empty => Ok(None),
        }
    }
}

impl Default for EvalCtx {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates `expr` in `scope`.
///
/// The value is returned as is: nothing is converted to text or escaped.
/// Errors raised while evaluating, including those from native functions,
/// are returned unchanged.
pub fn eval_expr(expr: &Expr, scope: &Scope<'_>) -> Result<Value, Error> {
    match expr {
        Expr::Ident(ident) => eval_ident(ident, scope),
        Expr::Literal(lit) => Ok(eval_literal(lit)),
        Expr::BinOp(op) => eval_binop(op, scope),
        Expr::Unary(op) => eval_unary(op, scope),
        Expr::Member(expr) => eval_member(expr, scope),
        Expr::Index(expr) => eval_index(expr, scope),
        Expr::Call(expr) => eval_call(expr, scope),
        Expr::List(list) => list
            .elems()
            .iter()
            .map(|elem| eval_expr(elem, scope))
            .collect::<Result<Vec<_>, _>>()
            .map(|items| Value::List(Arc::new(items))),
        Expr::Dict(dict) => eval_dict(dict, scope),
        Expr::Comprehension(comp) => eval_comprehension(comp, scope),
        Expr::Template(lit) => build_template(lit, scope).map(Value::template),
    }
}

fn eval_ident(ident: &Ident, scope: &Scope<'_>) -> Result<Value, Error> {
    scope
        .resolve(ident.val())
        .ok_or_else(|| Error::ReferenceError(ident.val().clone()))
}

fn eval_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Num(num) => Value::Num(num.val()),
        Literal::Str(str) => Value::Str(str.val().clone()),
        Literal::Bool(b) => Value::Bool(b.val()),
        Literal::Null(_) => Value::Null,
    }
}

fn eval_binop(expr: &BinOpExpr, scope: &Scope<'_>) -> Result<Value, Error> {
    let lhs = eval_expr(expr.lhs(), scope)?;

    // Short-circuit: the deciding operand is the result.
    match expr.op() {
        BinOp::And if !lhs.is_truthy() => return Ok(lhs),
        BinOp::Or if lhs.is_truthy() => return Ok(lhs),
        BinOp::And | BinOp::Or => return eval_expr(expr.rhs(), scope),
        _ => {}
    }

    let rhs = eval_expr(expr.rhs(), scope)?;
    match (expr.op(), &lhs, &rhs) {
        (BinOp::Eq, _, _) => Ok(Value::Bool(lhs == rhs)),
        (BinOp::Ne, _, _) => Ok(Value::Bool(lhs != rhs)),
        (BinOp::Add, Value::Str(a), Value::Str(b)) => {
            let mut s = a.clone();
            s.push_str(b);
            Ok(Value::Str(s))
        }
        (BinOp::Add, Value::List(a), Value::List(b)) => {
            Ok(Value::list(a.iter().chain(b.iter()).cloned()))
        }
        (op, Value::Num(a), Value::Num(b)) => arith(op, *a, *b),
        (op @ (BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge), Value::Str(a), Value::Str(b)) => {
            Ok(Value::Bool(compare(op, a.cmp(b))))
        }
        (op, _, _) => Err(Error::type_error(format!(
            "unsupported operand types for {}: '{}' and '{}'",
            op_symbol(op),
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}

fn arith(op: BinOp, a: f64, b: f64) -> Result<Value, Error> {
    Ok(match op {
        BinOp::Add => Value::Num(a + b),
        BinOp::Sub => Value::Num(a - b),
        BinOp::Mul => Value::Num(a * b),
        BinOp::Div | BinOp::Mod if b == 0.0 => return Err(Error::ZeroDivision),
        BinOp::Div => Value::Num(a / b),
        BinOp::Mod => Value::Num(a - b * (a / b).floor()),
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
            let Some(ord) = a.partial_cmp(&b) else {
                return Ok(Value::Bool(false));
            };
            Value::Bool(compare(op, ord))
        }
        BinOp::Eq | BinOp::Ne | BinOp::And | BinOp::Or => unreachable!("handled by eval_binop"),
    })
}

fn compare(op: BinOp, ord: std::cmp::Ordering) -> bool {
    match op {
        BinOp::Lt => ord.is_lt(),
        BinOp::Le => ord.is_le(),
        BinOp::Gt => ord.is_gt(),
        _ => ord.is_ge(),
    }
}

fn op_symbol(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::And => "and",
        BinOp::Or => "or",
    }
}

fn eval_unary(expr: &UnaryExpr, scope: &Scope<'_>) -> Result<Value, Error> {
    let operand = eval_expr(expr.operand(), scope)?;
    match (expr.op(), operand) {
        (UnaryOp::Not, operand) => Ok(Value::Bool(!operand.is_truthy())),
        (UnaryOp::Neg, Value::Num(n)) => Ok(Value::Num(-n)),
        (UnaryOp::Neg, operand) => Err(Error::type_error(format!(
            "bad operand type for unary -: '{}'",
            operand.type_name()
        ))),
    }
}

fn eval_member(expr: &MemberExpr, scope: &Scope<'_>) -> Result<Value, Error> {
    let object = eval_expr(expr.object(), scope)?;
    let prop = expr.prop().val();
    match &object {
        Value::Dict(entries) => entries
            .get(prop)
            .cloned()
            .ok_or_else(|| Error::KeyError(prop.clone())),
        Value::Template(tmpl) => template_attr(tmpl, prop),
        _ => Err(Error::type_error(format!(
            "'{}' has no attribute '{prop}'",
            object.type_name()
        ))),
    }
}

/// Exposes a template's parts to expressions, for consumers written in the
/// expression language itself.
fn template_attr(tmpl: &Template, prop: &EcoString) -> Result<Value, Error> {
    match prop.as_str() {
        "raw" => Ok(Value::Str(tmpl.raw().clone())),
        "strings" => Ok(Value::list(
            tmpl.strings().iter().map(|lit| Value::Str(lit.cooked().clone())),
        )),
        "values" => Ok(Value::list(tmpl.values().iter().cloned())),
        _ => Err(Error::type_error(format!(
            "'template' has no attribute '{prop}'"
        ))),
    }
}

fn eval_index(expr: &IndexExpr, scope: &Scope<'_>) -> Result<Value, Error> {
    let object = eval_expr(expr.object(), scope)?;
    let index = eval_expr(expr.index(), scope)?;
    match (&object, &index) {
        (Value::List(items), Value::Num(i)) => Ok(items[normalize_index(*i, items.len())?].clone()),
        (Value::Str(s), Value::Num(i)) => {
            let idx = normalize_index(*i, s.chars().count())?;
            Ok(s.chars()
                .nth(idx)
                .map_or(Value::Null, |c| Value::str(String::from(c))))
        }
        (Value::Dict(entries), Value::Str(key)) => entries
            .get(key)
            .cloned()
            .ok_or_else(|| Error::KeyError(key.clone())),
        _ => Err(Error::type_error(format!(
            "'{}' cannot be indexed by '{}'",
            object.type_name(),
            index.type_name()
        ))),
    }
}

/// Negative indices count from the end.
fn normalize_index(i: f64, len: usize) -> Result<usize, Error> {
    if i.fract() != 0.0 {
        return Err(Error::type_error(format!("index must be an integer, not {i}")));
    }
    let i = i as i64;
    let idx = if i < 0 { i + len as i64 } else { i };
    if idx < 0 || idx >= len as i64 {
        return Err(Error::IndexError(i));
    }
    Ok(idx as usize)
}

fn eval_call(expr: &CallExpr, scope: &Scope<'_>) -> Result<Value, Error> {
    let callee = eval_expr(expr.callee(), scope)?;
    let Value::Function(func) = callee else {
        return Err(Error::type_error(format!(
            "'{}' is not callable",
            callee.type_name()
        )));
    };
    let args = expr
        .args()
        .iter()
        .map(|arg| eval_expr(arg, scope))
        .collect::<Result<Vec<_>, _>>()?;
    log::trace!("call {}({} args)", func.name(), args.len());
    func.call(&args)
}

fn eval_dict(dict: &DictExpr, scope: &Scope<'_>) -> Result<Value, Error> {
    let mut entries = BTreeMap::new();
    for (key, value) in dict.entries() {
        let key = match eval_expr(key, scope)? {
            Value::Str(key) => key,
            key => {
                return Err(Error::type_error(format!(
                    "dict keys must be str, not '{}'",
                    key.type_name()
                )))
            }
        };
        entries.insert(key, eval_expr(value, scope)?);
    }
    Ok(Value::Dict(Arc::new(entries)))
}

fn eval_comprehension(comp: &ComprehensionExpr, scope: &Scope<'_>) -> Result<Value, Error> {
    let iter = eval_expr(comp.iter(), scope)?;
    let items: Vec<Value> = match &iter {
        Value::List(items) => items.to_vec(),
        Value::Str(s) => s.chars().map(|c| Value::str(String::from(c))).collect(),
        Value::Dict(entries) => entries.keys().cloned().map(Value::Str).collect(),
        _ => {
            return Err(Error::type_error(format!(
                "'{}' is not iterable",
                iter.type_name()
            )))
        }
    };

    let mut out = vec![];
    for item in items {
        let mut local = scope.child();
        local.declare(comp.binding().val().clone(), item);
        if let Some(cond) = comp.cond() {
            if !eval_expr(cond, &local)?.is_truthy() {
                continue;
            }
        }
        out.push(eval_expr(comp.elem(), &local)?);
    }
    Ok(Value::list(out))
}

#[cfg(test)]
mod tests {
    use backtick_parser::{
        parse_expr,
        source::{Source, SourceName},
    };

    use super::*;

    fn eval(text: &str, scope: &Scope<'_>) -> Result<Value, Error> {
        let src = Source::new(SourceName::Custom("test".into()), text);
        eval_expr(&parse_expr(&src)?, scope)
    }

    fn eval_global(text: &str) -> Result<Value, Error> {
        eval(text, &Scope::new())
    }

    #[test]
    fn arith() {
        assert_eq!(eval_global("12345+19382-113*91/2"), Ok(Value::Num(26585.5)));
        assert_eq!(eval_global("-7 % 3"), Ok(Value::Num(2.0)));
        assert_eq!(eval_global("1 / 0"), Err(Error::ZeroDivision));
    }

    #[test]
    fn strings_and_lists() {
        assert_eq!(eval_global("'a' + \"b\""), Ok(Value::str("ab")));
        assert_eq!(eval_global("[1] + [2]"), Ok(Value::list([Value::Num(1.0), Value::Num(2.0)])));
        assert_eq!(eval_global("'abc'[-1]"), Ok(Value::str("c")));
        assert_eq!(eval_global("[1, 2][5]"), Err(Error::IndexError(5)));
        assert!(matches!(eval_global("'a' + 1"), Err(Error::TypeError(_))));
    }

    #[test]
    fn logic_short_circuits() {
        let scope = Scope::new().with(
            "boom",
            Value::function("boom", |_| Err(Error::Native("boom".into()))),
        );
        assert_eq!(eval("false and boom()", &scope), Ok(Value::Bool(false)));
        assert_eq!(eval("'x' or boom()", &scope), Ok(Value::str("x")));
        assert_eq!(eval("null or 0", &scope), Ok(Value::Num(0.0)));
        assert_eq!(eval("not 1 < 2", &scope), Ok(Value::Bool(false)));
        assert_eq!(eval("true && boom()", &scope), Err(Error::Native("boom".into())));
    }

    #[test]
    fn member_and_dict() {
        let user = Value::dict([("name", Value::str("Ada")), ("age", Value::Num(36.0))]);
        let scope = Scope::new().with("user", user);
        assert_eq!(eval("user.name", &scope), Ok(Value::str("Ada")));
        assert_eq!(eval("user['age'] + 1", &scope), Ok(Value::Num(37.0)));
        assert_eq!(eval("user.email", &scope), Err(Error::KeyError("email".into())));
        assert_eq!(eval("{a: {b: 2}}.a.b", &scope), Ok(Value::Num(2.0)));
        assert!(matches!(eval("{1: 2}", &scope), Err(Error::TypeError(_))));
        assert_eq!(
            eval("{user.name + '!': 1}", &scope),
            Ok(Value::dict([("Ada!", Value::Num(1.0))]))
        );
    }

    #[test]
    fn reference_error() {
        assert_eq!(eval_global("missing + 1"), Err(Error::ReferenceError("missing".into())));
    }

    #[test]
    fn calls() {
        let scope = Scope::new().with(
            "add",
            Value::function("add", |args| match args {
                [Value::Num(a), Value::Num(b)] => Ok(Value::Num(a + b)),
                _ => Err(Error::type_error("add() takes two numbers")),
            }),
        );
        assert_eq!(eval("add(40, 2)", &scope), Ok(Value::Num(42.0)));
        assert_eq!(eval("upper('x') + str(len([1, 2]))", &scope), Ok(Value::str("X2")));
        assert!(matches!(eval("1()", &scope), Err(Error::TypeError(_))));
    }

    #[test]
    fn comprehension_scopes() {
        let scope = Scope::new()
            .with("xs", Value::list([Value::Num(1.0), Value::Num(2.0), Value::Num(3.0)]))
            .with("k", Value::Num(10.0));
        assert_eq!(
            eval("[x * k for x in xs if x != 2]", &scope),
            Ok(Value::list([Value::Num(10.0), Value::Num(30.0)]))
        );
        assert_eq!(eval("[c for c in 'ab']", &scope), Ok(Value::list([Value::str("a"), Value::str("b")])));
        // The binding does not leak out of the comprehension.
        assert_eq!(eval("[x for x in xs] + [x]", &scope), Err(Error::ReferenceError("x".into())));
    }

    #[test]
    fn let_binding() {
        let src = Source::new(
            SourceName::Custom("test".into()),
            "let foo = 24; let bar = 18; foo + bar",
        );
        let module = backtick_parser::parse_module(&src).unwrap();
        let mut ctx = EvalCtx::new();
        assert_eq!(ctx.eval_module(&module), Ok(Value::Num(42.0)));
        assert_eq!(ctx.globals().get("foo"), Some(&Value::Num(24.0)));
    }

    #[test]
    fn template_attributes() {
        let scope = Scope::new().with("n", Value::Num(1.0));
        assert_eq!(eval("`a{n}b`.raw", &scope), Ok(Value::str("a{n}b")));
        assert_eq!(
            eval("`a{n}b`.strings", &scope),
            Ok(Value::list([Value::str("a"), Value::str("b")]))
        );
        assert_eq!(eval("`a{n}b`.values", &scope), Ok(Value::list([Value::Num(1.0)])));
    }
}
