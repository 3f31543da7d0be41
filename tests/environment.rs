//! The environment (`Scope`) abstraction and the `name = value ;` description parser.

use quill::env_parse::parse_description;
use quill::{InputStream, Scope, Value};

#[test]
fn shadowing_within_a_scope_keeps_the_most_recent_push() {
    let mut scope = Scope::new();
    scope.push("x", Value::Int(1));
    scope.push("x", Value::Int(2));
    assert_eq!(scope.get("x"), Some(&Value::Int(2)));
}

#[test]
fn pop_of_an_absent_name_returns_none() {
    let mut scope = Scope::new();
    assert_eq!(scope.pop("nope"), None);
}

#[test]
fn lookup_of_an_absent_name_returns_none() {
    let scope = Scope::new();
    assert_eq!(scope.get("nope"), None);
}

#[test]
fn parse_description_basic_bindings() {
    let mut scope = Scope::new();
    let mut input = InputStream::new("env", r#"name = "World"; n = 3; pi = 3.5;"#);
    parse_description(&mut input, &mut scope).unwrap();
    assert_eq!(scope.get("name"), Some(&Value::str("World")));
    assert_eq!(scope.get("n"), Some(&Value::Int(3)));
    assert_eq!(scope.get("pi"), Some(&Value::Float(3.5)));
}

#[test]
fn parse_description_negative_numbers() {
    let mut scope = Scope::new();
    let mut input = InputStream::new("env", "n = -3; f = -1.5;");
    parse_description(&mut input, &mut scope).unwrap();
    assert_eq!(scope.get("n"), Some(&Value::Int(-3)));
    assert_eq!(scope.get("f"), Some(&Value::Float(-1.5)));
}

#[test]
fn parse_description_arrays_including_nested_and_empty() {
    let mut scope = Scope::new();
    let mut input = InputStream::new("env", "xs = [1, 2, 3]; m = [[1,2],[3,4]]; e = [];");
    parse_description(&mut input, &mut scope).unwrap();
    assert_eq!(
        scope.get("xs"),
        Some(&Value::array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
    );
    assert_eq!(
        scope.get("m"),
        Some(&Value::array(vec![
            Value::array(vec![Value::Int(1), Value::Int(2)]),
            Value::array(vec![Value::Int(3), Value::Int(4)]),
        ]))
    );
    assert_eq!(scope.get("e"), Some(&Value::array(vec![])));
}

#[test]
fn parse_description_skips_comments_and_whitespace() {
    let mut scope = Scope::new();
    let mut input = InputStream::new(
        "env",
        "# a leading comment\nname = \"World\"; # trailing comment\n\n n = 1;",
    );
    parse_description(&mut input, &mut scope).unwrap();
    assert_eq!(scope.get("name"), Some(&Value::str("World")));
    assert_eq!(scope.get("n"), Some(&Value::Int(1)));
}

#[test]
fn parse_description_later_bindings_shadow_earlier_ones() {
    let mut scope = Scope::new();
    let mut input = InputStream::new("env", "n = 1; n = 2;");
    parse_description(&mut input, &mut scope).unwrap();
    assert_eq!(scope.get("n"), Some(&Value::Int(2)));
}

#[test]
fn parse_description_missing_semicolon_is_a_syntax_error() {
    let mut scope = Scope::new();
    let mut input = InputStream::new("env", "n = 1");
    assert!(parse_description(&mut input, &mut scope).is_err());
}

#[test]
fn parse_description_missing_equals_is_a_syntax_error() {
    let mut scope = Scope::new();
    let mut input = InputStream::new("env", "n 1;");
    assert!(parse_description(&mut input, &mut scope).is_err());
}
