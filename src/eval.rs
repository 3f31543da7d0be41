//! The evaluator: statement tree + environment -> output bytes (spec §4.4).
//!
//! Grounded on `rhai::engine::Engine::eval_stmt`/`eval_expr`
//! (`examples/rhaiscript-lsp/rhai/src/engine.rs`): a recursive tree walk that threads a mutable
//! scope and short-circuits on the first error. Per design note §9, the `for`-loop's
//! push/pop is expressed with a scoped-acquisition guard (`ScopeBinding`) rather than manual
//! pop calls at every return point, so the "balanced environment" invariant (spec §8) holds on
//! both the success and failure exit paths.

use crate::Identifier;

use crate::ast::{BinOp, Expr, Stmt};
use crate::error::EvalError;
use crate::input::Position;
use crate::ops;
use crate::output::{io_err, OutputStream};
use crate::scope::Scope;
use crate::value::Value;

/// Render a statement tree against `scope`, writing bytes to `out`. On success or failure,
/// `scope` is left with exactly the bindings it had on entry (spec §5/§8).
pub fn render(stmts: &[Stmt], scope: &mut Scope, out: &mut dyn OutputStream) -> Result<(), EvalError> {
    eval_stmts(stmts, scope, out)
}

fn eval_stmts(stmts: &[Stmt], scope: &mut Scope, out: &mut dyn OutputStream) -> Result<(), EvalError> {
    for stmt in stmts {
        eval_stmt(stmt, scope, out)?;
    }
    Ok(())
}

fn eval_stmt(stmt: &Stmt, scope: &mut Scope, out: &mut dyn OutputStream) -> Result<(), EvalError> {
    match stmt {
        Stmt::Data(bytes) => out
            .write_bytes(bytes)
            .map_err(|e| EvalError::Failed(format!("output stream write failed: {e}"), data_pos())),
        Stmt::Expr(expr) => {
            let value = eval_expr(expr, scope)?;
            write_bytes(out, value.render_text().as_bytes(), expr.pos())
        }
        Stmt::If { cond, then_branch, else_branch } => {
            if eval_expr(cond, scope)?.is_truthy() {
                eval_stmts(then_branch, scope, out)
            } else if let Some(else_branch) = else_branch {
                eval_stmts(else_branch, scope, out)
            } else {
                Ok(())
            }
        }
        Stmt::For { iterable, var_name, body, pos } => eval_for(iterable, var_name, body, pos, scope, out),
    }
}

fn write_bytes(out: &mut dyn OutputStream, bytes: &[u8], pos: &Position) -> Result<(), EvalError> {
    out.write_bytes(bytes).map_err(|e| io_err(e, pos))
}

/// A data token's bytes carry no position of their own (only `If`/`For` exprs do per spec
/// §3's invariants); this is only ever built on the rare I/O-failure path.
fn data_pos() -> Position {
    Position::new(std::rc::Rc::from("<output>"), 0, 0)
}

fn eval_for(
    iterable: &Expr,
    var_name: &Identifier,
    body: &[Stmt],
    pos: &Position,
    scope: &mut Scope,
    out: &mut dyn OutputStream,
) -> Result<(), EvalError> {
    let value = eval_expr(iterable, scope)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(EvalError::IncompatibleSymbol(
                format!("cannot iterate over {}", other.render_text()),
                pos.clone(),
            ))
        }
    };

    for item in items.iter() {
        let mut binding = ScopeBinding::push(scope, var_name.clone(), item.clone());
        let result = eval_stmts(body, binding.scope(), out);
        binding.pop();
        result?;
    }
    Ok(())
}

fn eval_expr(expr: &Expr, scope: &Scope) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(v, _) => Ok(v.clone()),
        Expr::Symbol { name, indices, pos } => eval_symbol(name, indices, pos, scope),
        Expr::Unary { op, operand, pos } => {
            let v = eval_expr(operand, scope)?;
            ops::apply_unary(*op, v, pos.clone())
        }
        Expr::Binary { op: BinOp::And, lhs, rhs, .. } => {
            let l = eval_expr(lhs, scope)?;
            if !l.is_truthy() {
                return Ok(Value::Int(0));
            }
            let r = eval_expr(rhs, scope)?;
            Ok(Value::Int(r.is_truthy() as i64))
        }
        Expr::Binary { op: BinOp::Or, lhs, rhs, .. } => {
            let l = eval_expr(lhs, scope)?;
            if l.is_truthy() {
                return Ok(Value::Int(1));
            }
            let r = eval_expr(rhs, scope)?;
            Ok(Value::Int(r.is_truthy() as i64))
        }
        Expr::Binary { op, lhs, rhs, pos } => {
            let l = eval_expr(lhs, scope)?;
            let r = eval_expr(rhs, scope)?;
            ops::apply_binary(*op, l, r, pos.clone())
        }
    }
}

fn eval_symbol(name: &str, indices: &[Expr], pos: &Position, scope: &Scope) -> Result<Value, EvalError> {
    let mut value = scope
        .get(name)
        .cloned()
        .ok_or_else(|| EvalError::SymbolNotFound(name.to_string(), pos.clone()))?;

    for index_expr in indices {
        let index_value = eval_expr(index_expr, scope)?;
        let i = match index_value {
            Value::Int(i) => i,
            other => {
                return Err(EvalError::IncompatibleSymbol(
                    format!("index must be an integer, found {}", other.type_name()),
                    pos.clone(),
                ))
            }
        };
        let items = match &value {
            Value::Array(items) => items.clone(),
            other => {
                return Err(EvalError::IncompatibleSymbol(
                    format!("cannot index into a {}", other.type_name()),
                    pos.clone(),
                ))
            }
        };
        if i < 0 || (i as usize) >= items.len() {
            return Err(EvalError::IncompatibleSymbol(
                format!("index {} out of range (length {})", i, items.len()),
                pos.clone(),
            ));
        }
        value = items[i as usize].clone();
    }

    Ok(value)
}

/// Scoped push/pop for one `for`-loop iteration binding. The pop happens in [`Self::pop`],
/// called explicitly before propagating the loop body's result, so the scope is balanced
/// whether or not the body failed (design note §9).
struct ScopeBinding<'s> {
    scope: &'s mut Scope,
    name: Identifier,
    popped: bool,
}

impl<'s> ScopeBinding<'s> {
    fn push(scope: &'s mut Scope, name: Identifier, value: Value) -> Self {
        scope.push(name.clone(), value);
        Self { scope, name, popped: false }
    }

    fn scope(&mut self) -> &mut Scope {
        self.scope
    }

    fn pop(&mut self) {
        if !self.popped {
            self.scope.pop(&self.name);
            self.popped = true;
        }
    }
}

impl Drop for ScopeBinding<'_> {
    fn drop(&mut self) {
        self.pop();
    }
}
