//! The environment description parser (spec §4.6/§6): `name = value ;` bindings, pushed into
//! a [`Scope`] in file order so later entries shadow earlier ones.
//!
//! Grounded on the same `InputStream` primitives the template lexer reuses
//! (`read_symbol`/`read_number`/`read_string_literal`/`skip_blank`), the way `rhai` reuses its
//! tokenizer primitives across script parsing and constant folding (`optimize.rs`). Errors are
//! their own `EnvParseError` domain, never folded into `LexError`.

use crate::error::EnvParseError;
use crate::input::InputStream;
use crate::scope::Scope;
use crate::value::Value;

/// Parse zero or more `name = value ;` bindings from `input`, pushing each into `scope`.
/// Whitespace and `#`-to-end-of-line comments are skipped between tokens.
pub fn parse_description(input: &mut InputStream, scope: &mut Scope) -> Result<(), EnvParseError> {
    loop {
        skip_ws_and_comments(input);
        if input.eof() {
            return Ok(());
        }

        let name_pos = input.position();
        let name = input.read_symbol();
        if name.is_empty() {
            return Err(EnvParseError::Syntax(
                "expected a binding name".into(),
                name_pos,
            ));
        }

        skip_ws_and_comments(input);
        let eq_pos = input.position();
        if input.peek_char() != Some('=') {
            return Err(EnvParseError::Syntax("expected '='".into(), eq_pos));
        }
        input.skip(1);
        skip_ws_and_comments(input);

        let value = parse_value(input)?;

        skip_ws_and_comments(input);
        let semi_pos = input.position();
        if input.peek_char() != Some(';') {
            return Err(EnvParseError::Syntax("expected ';'".into(), semi_pos));
        }
        input.skip(1);

        scope.push(name.as_str(), value);
    }
}

fn skip_ws_and_comments(input: &mut InputStream) {
    loop {
        input.skip_blank();
        if input.peek_char() == Some('#') {
            while !matches!(input.peek_char(), None | Some('\n')) {
                input.skip(1);
            }
        } else {
            break;
        }
    }
}

fn parse_value(input: &mut InputStream) -> Result<Value, EnvParseError> {
    skip_ws_and_comments(input);
    let pos = input.position();
    match input.peek_char() {
        Some('"') => {
            let s = input
                .read_string_literal()
                .map_err(|e| EnvParseError::Syntax(e.to_string(), pos))?;
            Ok(Value::str(s))
        }
        Some('[') => {
            input.skip(1);
            let mut items = Vec::new();
            skip_ws_and_comments(input);
            if input.peek_char() == Some(']') {
                input.skip(1);
                return Ok(Value::array(items));
            }
            loop {
                items.push(parse_value(input)?);
                skip_ws_and_comments(input);
                match input.peek_char() {
                    Some(',') => {
                        input.skip(1);
                        skip_ws_and_comments(input);
                    }
                    Some(']') => {
                        input.skip(1);
                        break;
                    }
                    _ => {
                        return Err(EnvParseError::Syntax(
                            "expected ',' or ']' in array literal".into(),
                            input.position(),
                        ))
                    }
                }
            }
            Ok(Value::array(items))
        }
        Some('-') => {
            input.skip(1);
            match parse_value(input)? {
                Value::Int(i) => Ok(Value::Int(-i)),
                Value::Float(f) => Ok(Value::Float(-f)),
                other => Err(EnvParseError::Syntax(
                    format!("unary '-' not applicable to a {}", other.type_name()),
                    pos,
                )),
            }
        }
        Some(c) if c.is_ascii_digit() => input
            .read_number()
            .map_err(|e| EnvParseError::Syntax(e.to_string(), pos)),
        _ => Err(EnvParseError::Syntax(
            "expected a number, string, or array literal".into(),
            pos,
        )),
    }
}
