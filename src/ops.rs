//! Operator semantics and type rules (spec §4.5).
//!
//! Grounded on the per-operator type-dispatch shape of `rhai::packages::arithmetic` /
//! `rhai::packages::logic` / `rhai::packages::array_basic`
//! (`examples/rhaiscript-lsp/rhai/src/packages/*.rs`): a flat match over operand tag pairs per
//! operator family, restricted here to the four `Value` tags and the exact promotion/error
//! rules spec.md §4.5 states (no operator-overload registry, no user functions).

use crate::ast::{BinOp, UnaryOp};
use crate::error::EvalError;
use crate::input::Position;
use crate::value::Value;

pub fn apply_unary(op: UnaryOp, v: Value, pos: Position) -> Result<Value, EvalError> {
    match (op, &v) {
        (UnaryOp::Plus, Value::Int(i)) => Ok(Value::Int(*i)),
        (UnaryOp::Plus, Value::Float(f)) => Ok(Value::Float(*f)),
        (UnaryOp::Minus, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| EvalError::Failed(format!("integer overflow negating {i}"), pos.clone())),
        (UnaryOp::Minus, Value::Float(f)) => Ok(Value::Float(-f)),
        (_, other) => Err(EvalError::Failed(
            format!("unary operator not applicable to {}", other.type_name()),
            pos,
        )),
    }
}

/// Apply a binary operator. `And`/`Or` are handled by the evaluator itself (short-circuiting
/// needs access to the unevaluated right-hand expression), so they never reach here.
pub fn apply_binary(op: BinOp, lhs: Value, rhs: Value, pos: Position) -> Result<Value, EvalError> {
    match op {
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => arith(op, lhs, rhs, pos),
        BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
            compare(op, lhs, rhs, pos)
        }
        BinOp::And | BinOp::Or => {
            unreachable!("And/Or are short-circuited by the evaluator before reaching apply_binary")
        }
    }
}

fn incompatible(op: BinOp, lhs: &Value, rhs: &Value, pos: Position) -> EvalError {
    EvalError::Failed(
        format!(
            "incompatible operands: {} {} {}",
            lhs.type_name(),
            op.symbol(),
            rhs.type_name()
        ),
        pos,
    )
}

fn arith(op: BinOp, lhs: Value, rhs: Value, pos: Position) -> Result<Value, EvalError> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => int_arith(op, *a, *b, pos),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_arith(op, *a, *b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(float_arith(op, *a as f64, *b))),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(float_arith(op, *a, *b as f64))),
        (Value::Str(a), Value::Str(b)) if op == BinOp::Add => {
            Ok(Value::str(format!("{a}{b}")))
        }
        (Value::Array(_), _) | (_, Value::Array(_)) if op == BinOp::Add => {
            Ok(array_concat(lhs, rhs))
        }
        _ => Err(incompatible(op, &lhs, &rhs, pos)),
    }
}

fn int_arith(op: BinOp, a: i64, b: i64, pos: Position) -> Result<Value, EvalError> {
    let result = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        BinOp::Mul => a.checked_mul(b),
        BinOp::Div => {
            if b == 0 {
                return Err(EvalError::Failed("division by zero".into(), pos));
            }
            a.checked_div(b)
        }
        BinOp::Rem => {
            if b == 0 {
                return Err(EvalError::Failed("division by zero".into(), pos));
            }
            a.checked_rem(b)
        }
        _ => unreachable!("int_arith only handles arithmetic operators"),
    };
    result
        .map(Value::Int)
        .ok_or_else(|| EvalError::Failed(format!("integer overflow: {a} {} {b}", op.symbol()), pos))
}

fn float_arith(op: BinOp, a: f64, b: f64) -> f64 {
    match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => a / b,
        BinOp::Rem => a % b,
        _ => unreachable!("float_arith only handles arithmetic operators"),
    }
}

fn array_concat(lhs: Value, rhs: Value) -> Value {
    match (lhs, rhs) {
        (Value::Array(a), Value::Array(b)) => {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend(a.iter().cloned());
            items.extend(b.iter().cloned());
            Value::array(items)
        }
        (Value::Array(a), scalar) => {
            let mut items = a.as_ref().clone();
            items.push(scalar);
            Value::array(items)
        }
        (scalar, Value::Array(b)) => {
            let mut items = Vec::with_capacity(b.len() + 1);
            items.push(scalar);
            items.extend(b.iter().cloned());
            Value::array(items)
        }
        (lhs, rhs) => unreachable!("array_concat called without an array operand: {lhs:?} {rhs:?}"),
    }
}

fn compare(op: BinOp, lhs: Value, rhs: Value, pos: Position) -> Result<Value, EvalError> {
    use std::cmp::Ordering;

    fn as_bool(b: bool) -> Value {
        Value::Int(b as i64)
    }

    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(as_bool(apply_ordering(op, a.cmp(b)))),
        (Value::Float(a), Value::Float(b)) => compare_floats(op, *a, *b, pos),
        (Value::Int(a), Value::Float(b)) => compare_floats(op, *a as f64, *b, pos),
        (Value::Float(a), Value::Int(b)) => compare_floats(op, *a, *b as f64, pos),
        (Value::Str(a), Value::Str(b)) => Ok(as_bool(apply_ordering(op, a.as_bytes().cmp(b.as_bytes())))),
        (Value::Array(a), Value::Array(b)) => match op {
            BinOp::Eq => Ok(as_bool(a.len() == b.len() && a.iter().eq(b.iter()))),
            BinOp::Ne => Ok(as_bool(a.len() != b.len() || !a.iter().eq(b.iter()))),
            _ => Err(EvalError::Failed(
                "array ordering comparisons are undefined".into(),
                pos,
            )),
        },
        _ => match op {
            BinOp::Eq => Ok(as_bool(false)),
            BinOp::Ne => Ok(as_bool(true)),
            _ => Err(incompatible(op, &lhs, &rhs, pos)),
        },
    }
}

fn compare_floats(op: BinOp, a: f64, b: f64, pos: Position) -> Result<Value, EvalError> {
    match op {
        BinOp::Eq => Ok(Value::Int((a == b) as i64)),
        BinOp::Ne => Ok(Value::Int((a != b) as i64)),
        _ => match a.partial_cmp(&b) {
            Some(ord) => Ok(Value::Int(apply_ordering(op, ord) as i64)),
            None => Err(EvalError::Failed("cannot order NaN".into(), pos)),
        },
    }
}

fn apply_ordering(op: BinOp, ord: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::*;
    match op {
        BinOp::Eq => ord == Equal,
        BinOp::Ne => ord != Equal,
        BinOp::Lt => ord == Less,
        BinOp::Le => ord != Greater,
        BinOp::Gt => ord == Greater,
        BinOp::Ge => ord != Less,
        _ => unreachable!("apply_ordering only handles comparison operators"),
    }
}
