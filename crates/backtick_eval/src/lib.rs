//! Evaluation of backtick template literals.
//!
//! A template literal is parsed once into a [`TemplateLit`] and may then be
//! built any number of times. Each build evaluates every hole exactly once,
//! left to right, in the given [`Scope`], and yields a fresh, immutable
//! [`Template`] holding the raw text and the interleaved literal and value
//! segments. Nothing is escaped, formatted or joined here; that is left to
//! whoever consumes the [`Template`].
//!
//! [`TemplateLit`]: backtick_ast::template::TemplateLit

pub mod builder;
pub mod builtins;
pub mod error;
pub mod eval;
pub mod lexical_env;
pub mod template;
pub mod value;

pub use builder::{build_template, construct};
pub use error::Error;
pub use eval::{eval_expr, EvalCtx};
pub use lexical_env::Scope;
pub use template::{Literal, Segment, Tagged, Template};
pub use value::{NativeFunction, Value};
