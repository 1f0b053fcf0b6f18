//! Tests for literal and column rendering: integers, floats, strings,
//! booleans, NULL, identifiers and verbatim SQL.

mod common;
use common::*;

use relq_core::ast::Literal;
use relq_core::{CompileError, Expr};

#[test]
fn literal_integer() {
    assert_eq!(translate(&Expr::integer(42)), "42");
    assert_eq!(translate(&Expr::integer(-7)), "-7");
}

#[test]
fn literal_float_keeps_decimal_point() {
    assert_eq!(translate(&Expr::float(2.0)), "2.0");
    assert_eq!(translate(&Expr::float(9.75)), "9.75");
    assert_eq!(translate(&Expr::float(-0.5)), "-0.5");
    assert_eq!(translate(&Expr::float(1e10)), "10000000000.0");
}

#[test]
fn literal_integer_and_float_differ() {
    assert_ne!(
        translate(&Expr::integer(2)),
        translate(&Expr::float(2.0))
    );
}

#[test]
fn literal_non_finite_float_rejected() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            translate_err(&Expr::float(value)),
            CompileError::UnsupportedConstruct { .. }
        ));
    }
}

#[test]
fn literal_boolean() {
    assert_eq!(translate(&Expr::boolean(true)), "TRUE");
    assert_eq!(translate(&Expr::boolean(false)), "FALSE");
}

#[test]
fn literal_string_escapes_quotes() {
    assert_eq!(translate(&Expr::string("hello world")), "'hello world'");
    assert_eq!(translate(&Expr::string("it's")), "'it''s'");
    assert_eq!(translate(&Expr::string("")), "''");
}

#[test]
fn literal_null() {
    assert_eq!(translate(&Expr::null()), "NULL");
    assert_eq!(translate(&Expr::Literal(Literal::Null)), "NULL");
}

#[test]
fn column_quoting() {
    assert_eq!(translate(&Expr::column("x")), "\"x\"");
    assert_eq!(translate(&Expr::qualified_column("LHS", "x")), "\"LHS\".\"x\"");
    assert_eq!(translate(&Expr::column("a\"b")), "\"a\"\"b\"");
}

#[test]
fn list_of_values() {
    let list = Expr::list(vec![Expr::integer(1), Expr::string("a"), Expr::null()]);
    assert_eq!(translate(&list), "(1, 'a', NULL)");
}

#[test]
fn verbatim_sql() {
    assert_eq!(translate(&Expr::sql("CURRENT_DATE")), "CURRENT_DATE");
    assert_eq!(
        translate(&Expr::sql("CURRENT_DATE").gt(Expr::column("d"))),
        "CURRENT_DATE > \"d\""
    );
}
