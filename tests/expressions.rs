//! Expression-lexer-level properties: precedence, associativity, parentheses, indexing.

mod common;

use quill::{Scope, Value};

#[test]
fn precedence_multiply_binds_tighter_than_add() {
    let mut scope = Scope::new();
    scope.push("a", Value::Int(2));
    scope.push("b", Value::Int(3));
    scope.push("c", Value::Int(4));
    let explicit = common::render_ok("{a + (b * c)}", &mut scope);
    let implicit = common::render_ok("{a + b * c}", &mut scope);
    assert_eq!(explicit, implicit);
    assert_eq!(implicit, "14");
}

#[test]
fn parentheses_override_precedence() {
    let mut scope = Scope::new();
    scope.push("a", Value::Int(2));
    scope.push("b", Value::Int(3));
    scope.push("c", Value::Int(4));
    assert_eq!(common::render_ok("{(a + b) * c}", &mut scope), "20");
}

#[test]
fn subtraction_is_left_associative() {
    let mut scope = Scope::new();
    scope.push("a", Value::Int(10));
    scope.push("b", Value::Int(3));
    scope.push("c", Value::Int(2));
    let left_explicit = common::render_ok("{(a - b) - c}", &mut scope);
    let default = common::render_ok("{a - b - c}", &mut scope);
    assert_eq!(left_explicit, default);
    assert_eq!(default, "5");
}

#[test]
fn unary_minus_binds_tighter_than_binary_operators() {
    let mut scope = Scope::new();
    scope.push("a", Value::Int(5));
    assert_eq!(common::render_ok("{-a + 1}", &mut scope), "-4");
}

#[test]
fn unary_plus_is_identity() {
    let mut scope = Scope::new();
    scope.push("a", Value::Int(5));
    assert_eq!(common::render_ok("{+a}", &mut scope), "5");
}

#[test]
fn nested_index_chain() {
    let mut scope = Scope::new();
    let m = Value::array(vec![
        Value::array(vec![Value::Int(1), Value::Int(2)]),
        Value::array(vec![Value::Int(3), Value::Int(4)]),
    ]);
    scope.push("m", m);
    assert_eq!(common::render_ok("{m[1][0]}", &mut scope), "3");
}

#[test]
fn index_expression_may_itself_be_an_expression() {
    let mut scope = Scope::new();
    scope.push("xs", Value::array(vec![Value::Int(10), Value::Int(20), Value::Int(30)]));
    scope.push("i", Value::Int(0));
    assert_eq!(common::render_ok("{xs[i + 1]}", &mut scope), "20");
}

#[test]
fn true_and_false_are_integer_literals() {
    let mut scope = Scope::new();
    assert_eq!(common::render_ok("{true}", &mut scope), "1");
    assert_eq!(common::render_ok("{false}", &mut scope), "0");
}

#[test]
fn string_literal_with_escapes() {
    let mut scope = Scope::new();
    assert_eq!(common::render_ok(r#"{"a\"b\\c"}"#, &mut scope), "a\"b\\c");
}

#[test]
fn blanks_are_allowed_around_index_brackets() {
    let mut scope = Scope::new();
    scope.push("xs", Value::array(vec![Value::Int(7)]));
    assert_eq!(common::render_ok("{xs [ 0 ] }", &mut scope), "7");
}
