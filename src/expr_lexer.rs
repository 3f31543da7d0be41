//! The expression lexer: input stream -> expression AST (spec §4.2).
//!
//! Grounded on the precedence-climbing binary-operator loop of
//! `rhai::parse::Engine::parse_binary_op` (`examples/rhaiscript-lsp/rhai/src/parse.rs`), which
//! the teacher itself already implements as precedence climbing rather than the flat-list
//! relex the original spec's design notes (§9) call out as a superseded legacy approach.

use crate::Identifier;

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::error::ExprError;
use crate::input::InputStream;
use crate::value::Value;

/// Parse one expression from `input`, stopping before the first character that is not part of
/// the expression (by default `}`). Does not consume the terminating character.
pub fn parse_expr(input: &mut InputStream) -> Result<Expr, ExprError> {
    parse_expr_bp(input, 0)
}

/// Parse one expression and additionally require that everything remaining in `input` is
/// whitespace or EOF ("lex all" mode, spec §4.2).
pub fn parse_expr_lex_all(input: &mut InputStream) -> Result<Expr, ExprError> {
    let expr = parse_expr(input)?;
    input.skip_blank();
    if !input.eof() {
        return Err(ExprError::Syntax(
            "trailing garbage after expression".into(),
            input.position(),
        ));
    }
    Ok(expr)
}

fn parse_expr_bp(input: &mut InputStream, min_bp: u8) -> Result<Expr, ExprError> {
    let mut lhs = parse_primary(input)?;
    loop {
        input.skip_blank();
        let Some((op, len)) = peek_operator(input) else {
            // No operator follows. If what comes next looks like the start of another
            // primary rather than a terminator (`)`, `]`, `}`, EOF), the two primaries are
            // adjacent with nothing joining them - spec §4.2's "missing operator" failure.
            if input.peek_char().is_some_and(starts_primary) {
                return Err(ExprError::MissingOperator(input.position()));
            }
            break;
        };
        let bp = op.precedence();
        if bp < min_bp {
            break;
        }
        input.skip(len);
        input.skip_blank();
        // Left-associative: the right-hand side only accepts strictly higher precedence,
        // so equal-precedence operators group to the left.
        let rhs = parse_expr_bp(input, bp + 1)?;
        let pos = lhs.pos().clone();
        lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), pos };
    }
    Ok(lhs)
}

/// Recognize a binary operator at the current position without consuming it. Longer operators
/// are tried first so `<=` isn't mistaken for `<`.
fn peek_operator(input: &InputStream) -> Option<(BinOp, usize)> {
    let two: String = input.peek_chars(2).iter().collect();
    match two.as_str() {
        "||" => return Some((BinOp::Or, 2)),
        "&&" => return Some((BinOp::And, 2)),
        "==" => return Some((BinOp::Eq, 2)),
        "!=" => return Some((BinOp::Ne, 2)),
        "<=" => return Some((BinOp::Le, 2)),
        ">=" => return Some((BinOp::Ge, 2)),
        _ => {}
    }
    match input.peek_char()? {
        '+' => Some((BinOp::Add, 1)),
        '-' => Some((BinOp::Sub, 1)),
        '*' => Some((BinOp::Mul, 1)),
        '/' => Some((BinOp::Div, 1)),
        '%' => Some((BinOp::Rem, 1)),
        '<' => Some((BinOp::Lt, 1)),
        '>' => Some((BinOp::Gt, 1)),
        _ => None,
    }
}

fn parse_primary(input: &mut InputStream) -> Result<Expr, ExprError> {
    input.skip_blank();
    let pos = input.position();

    match input.peek_char() {
        None => Err(ExprError::MissingOperand(pos)),
        Some('(') => {
            input.skip(1);
            let inner = parse_expr_bp(input, 0)?;
            input.skip_blank();
            if input.peek_char() != Some(')') {
                return Err(ExprError::Syntax("unbalanced parenthesis".into(), pos));
            }
            input.skip(1);
            Ok(inner)
        }
        Some('"') => {
            let s = input
                .read_string_literal()
                .map_err(|e| ExprError::Syntax(e.to_string(), pos.clone()))?;
            Ok(Expr::Literal(Value::str(s), pos))
        }
        Some('+') => {
            input.skip(1);
            let operand = parse_primary(input)?;
            Ok(Expr::Unary { op: UnaryOp::Plus, operand: Box::new(operand), pos })
        }
        Some('-') => {
            input.skip(1);
            let operand = parse_primary(input)?;
            Ok(Expr::Unary { op: UnaryOp::Minus, operand: Box::new(operand), pos })
        }
        Some(c) if c.is_ascii_digit() => {
            let v = input
                .read_number()
                .map_err(|e| ExprError::Syntax(e.to_string(), pos.clone()))?;
            Ok(Expr::Literal(v, pos))
        }
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            let name = input.read_symbol();
            match name.as_str() {
                "true" => Ok(Expr::Literal(Value::Int(1), pos)),
                "false" => Ok(Expr::Literal(Value::Int(0), pos)),
                "" => Err(ExprError::MissingOperand(pos)),
                _ => {
                    let indices = parse_index_chain(input)?;
                    Ok(Expr::Symbol { name: Identifier::from(name.as_str()), indices, pos })
                }
            }
        }
        // An operator, or a closer ('}', ')', ']') reached where an operand was expected -
        // whatever the enclosing context, this is always a missing operand.
        Some(c) if is_operator_char(c) || matches!(c, '}' | ')' | ']') => {
            Err(ExprError::MissingOperand(pos))
        }
        Some(_) => Err(ExprError::Syntax("unexpected character".into(), pos)),
    }
}

fn starts_primary(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_alphabetic() || c == '_' || c == '"' || c == '('
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '=' | '!' | '<' | '>' | '&' | '|')
}

fn parse_index_chain(input: &mut InputStream) -> Result<Vec<Expr>, ExprError> {
    let mut indices = Vec::new();
    loop {
        input.skip_blank();
        if input.peek_char() != Some('[') {
            break;
        }
        let open_pos = input.position();
        input.skip(1);
        let idx = parse_expr_bp(input, 0)?;
        input.skip_blank();
        if input.peek_char() != Some(']') {
            return Err(ExprError::Syntax("unterminated index".into(), open_pos));
        }
        input.skip(1);
        indices.push(idx);
    }
    Ok(indices)
}
