//! Operator semantics and type rules (arithmetic, comparison, boolean, short-circuit).

mod common;

use quill::{Scope, Value};

#[test]
fn int_division_truncates_and_rem_matches_c_semantics() {
    let mut scope = Scope::new();
    assert_eq!(common::render_ok("{7 / 2}", &mut scope), "3");
    assert_eq!(common::render_ok("{7 % 2}", &mut scope), "1");
    assert_eq!(common::render_ok("{-7 / 2}", &mut scope), "-3");
}

#[test]
fn division_by_zero_is_an_error_for_ints_only() {
    let mut scope = Scope::new();
    assert!(common::render("{1 / 0}", &mut scope).is_err());
    assert!(common::render("{1 % 0}", &mut scope).is_err());
    // Float division by zero is IEEE infinity, not an error.
    assert_eq!(common::render_ok("{1.0 / 0.0}", &mut scope), "inf");
}

#[test]
fn int_and_float_mix_promotes_to_float() {
    let mut scope = Scope::new();
    assert_eq!(common::render_ok("{1 + 1.5}", &mut scope), "2.5");
}

#[test]
fn float_rendering_keeps_whole_numbers_distinct_from_ints() {
    let mut scope = Scope::new();
    assert_eq!(common::render_ok("{3.0}", &mut scope), "3.0");
    assert_eq!(common::render_ok("{3}", &mut scope), "3");
}

#[test]
fn string_concatenation() {
    let mut scope = Scope::new();
    scope.push("s", Value::str("ab"));
    scope.push("t", Value::str("cd"));
    assert_eq!(common::render_ok("{s + t}", &mut scope), "abcd");
}

#[test]
fn array_plus_array_concatenates() {
    let mut scope = Scope::new();
    scope.push("xs", Value::array(vec![Value::Int(1), Value::Int(2)]));
    scope.push("ys", Value::array(vec![Value::Int(3)]));
    assert_eq!(common::render_ok("{xs + ys}", &mut scope), "[1, 2, 3]");
}

#[test]
fn array_plus_scalar_appends() {
    let mut scope = Scope::new();
    scope.push("xs", Value::array(vec![Value::Int(1)]));
    assert_eq!(common::render_ok("{xs + 2}", &mut scope), "[1, 2]");
}

#[test]
fn incompatible_operand_types_are_an_error() {
    let mut scope = Scope::new();
    scope.push("s", Value::str("a"));
    assert!(common::render("{s + 1}", &mut scope).is_err());
    assert!(common::render("{1 - \"a\"}", &mut scope).is_err());
}

#[test]
fn comparisons_numeric_with_promotion() {
    let mut scope = Scope::new();
    assert_eq!(common::render_ok("{1 < 2}", &mut scope), "1");
    assert_eq!(common::render_ok("{2 == 2.0}", &mut scope), "1");
    assert_eq!(common::render_ok("{1 >= 2}", &mut scope), "0");
}

#[test]
fn string_comparison_is_byte_lexicographic() {
    let mut scope = Scope::new();
    assert_eq!(common::render_ok(r#"{"abc" < "abd"}"#, &mut scope), "1");
    assert_eq!(common::render_ok(r#"{"abc" == "abc"}"#, &mut scope), "1");
}

#[test]
fn array_equality_is_elementwise_and_ordering_is_undefined() {
    let mut scope = Scope::new();
    scope.push("a", Value::array(vec![Value::Int(1), Value::Int(2)]));
    scope.push("b", Value::array(vec![Value::Int(1), Value::Int(2)]));
    scope.push("c", Value::array(vec![Value::Int(9)]));
    assert_eq!(common::render_ok("{a == b}", &mut scope), "1");
    assert_eq!(common::render_ok("{a == c}", &mut scope), "0");
    assert!(common::render("{a < b}", &mut scope).is_err());
}

#[test]
fn mixed_type_equality_is_false_inequality_is_true_ordering_errors() {
    let mut scope = Scope::new();
    scope.push("s", Value::str("1"));
    assert_eq!(common::render_ok("{s == 1}", &mut scope), "0");
    assert_eq!(common::render_ok("{s != 1}", &mut scope), "1");
    assert!(common::render("{s < 1}", &mut scope).is_err());
}

#[test]
fn short_circuit_and_or_skip_the_unevaluated_side() {
    let mut scope = Scope::new();
    // `missing` is never bound; these must succeed because the right side is never evaluated.
    assert_eq!(common::render_ok("{0 && missing}", &mut scope), "0");
    assert_eq!(common::render_ok("{1 || missing}", &mut scope), "1");
}

#[test]
fn and_or_evaluate_the_right_side_when_not_short_circuited() {
    let mut scope = Scope::new();
    scope.push("y", Value::Int(0));
    assert_eq!(common::render_ok("{1 && y}", &mut scope), "0");
    scope.push("z", Value::Int(5));
    assert_eq!(common::render_ok("{0 || z}", &mut scope), "1");
}

#[test]
fn truth_coercion_rules() {
    let mut scope = Scope::new();
    assert_eq!(common::render_ok("{if 0}t{else}f{end}", &mut scope), "f");
    assert_eq!(common::render_ok("{if 0.0}t{else}f{end}", &mut scope), "f");
    assert_eq!(common::render_ok(r#"{if ""}t{else}f{end}"#, &mut scope), "f");
    assert_eq!(common::render_ok("{if 1}t{else}f{end}", &mut scope), "t");
    assert_eq!(common::render_ok(r#"{if "x"}t{else}f{end}"#, &mut scope), "t");
}

#[test]
fn unary_minus_errors_on_non_numeric_operands() {
    let mut scope = Scope::new();
    scope.push("s", Value::str("x"));
    assert!(common::render("{-s}", &mut scope).is_err());
}
