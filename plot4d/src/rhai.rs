//! Rhai bindings for defining functions as script expressions
//!
//! A [`ScriptFunction`] compiles a single [Rhai](https://rhai.rs) expression in
//! the variables `x`, `y`, and `z`, then evaluates it once per sample point:
//!
//! ```
//! use plot4d::{Function, rhai::ScriptFunction};
//!
//! let f = ScriptFunction::new("x * y + sin(z)")?;
//! assert_eq!(f.eval(2.0, 3.0, 0.0), Ok(6.0));
//! # Ok::<(), plot4d::Error>(())
//! ```
//!
//! Rhai's standard math functions (`sin`, `sqrt`, `exp`, ...) are available,
//! along with `square(v)`.  Referring to any variable other than `x`, `y`, or
//! `z` is a parse error.
use crate::{Error, Function};
use rhai::{Dynamic, Scope};

/// A function of `(x, y, z)` defined by a Rhai expression
pub struct ScriptFunction {
    engine: rhai::Engine,
    ast: rhai::AST,
    source: String,
}

impl std::fmt::Debug for ScriptFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptFunction")
            .field("source", &self.source)
            .finish()
    }
}

impl ScriptFunction {
    /// Compiles an expression
    pub fn new(expr: &str) -> Result<Self, Error> {
        let mut engine = rhai::Engine::new();
        engine.set_strict_variables(true);
        engine.set_max_expr_depths(64, 32);
        engine.register_fn("square", |v: f64| v * v);

        let ast =
            engine.compile_expression_with_scope(&axes(0.0, 0.0, 0.0), expr)?;
        Ok(Self {
            engine,
            ast,
            source: expr.to_owned(),
        })
    }

    /// Returns the source expression
    pub fn source(&self) -> &str {
        &self.source
    }
}

fn axes(x: f64, y: f64, z: f64) -> Scope<'static> {
    let mut scope = Scope::new();
    scope.push("x", x).push("y", y).push("z", z);
    scope
}

impl Function for ScriptFunction {
    fn eval(&self, x: f64, y: f64, z: f64) -> Result<f64, String> {
        let mut scope = axes(x, y, z);
        let out: Dynamic = self
            .engine
            .eval_ast_with_scope(&mut scope, &self.ast)
            .map_err(|e| e.to_string())?;
        if let Ok(v) = out.as_float() {
            Ok(v)
        } else if let Ok(i) = out.as_int() {
            Ok(i as f64)
        } else {
            Err(format!("expected a number, got {}", out.type_name()))
        }
    }
}
