//! Tests for join lowering: native joins, emulated RIGHT and FULL joins,
//! semi and anti joins and NULL key matching.

mod common;
use common::*;

use relq_core::{
    CompileError, Compiler, Expr, JoinKind, JoinSpec, NullEquality, Query, Relation,
};

fn spec(kind: JoinKind) -> JoinSpec {
    JoinSpec::new(
        kind,
        Relation::table("a", &["x", "y"]),
        Relation::table("b", &["x", "z"]),
    )
    .by("x")
}

fn emulated(kind: JoinKind) -> String {
    let profile = profile_of(NoOuterJoins);
    Compiler::new(&profile)
        .to_sql(&Query::join(spec(kind)))
        .unwrap()
        .sql
}

// ===================================================================
// Native joins
// ===================================================================

#[test]
fn inner_join() {
    assert_eq!(
        sql(&Query::join(spec(JoinKind::Inner))),
        "SELECT \"LHS\".\"x\" AS \"x\", \"LHS\".\"y\" AS \"y\", \"RHS\".\"z\" AS \"z\"\n\
         FROM \"a\" AS \"LHS\"\n\
         INNER JOIN \"b\" AS \"RHS\"\n  \
         ON (\"LHS\".\"x\" = \"RHS\".\"x\")"
    );
}

#[test]
fn left_join() {
    let out = sql(&Query::join(spec(JoinKind::Left)));
    assert!(out.contains("\nLEFT JOIN \"b\" AS \"RHS\"\n"));
    assert!(out.starts_with("SELECT \"LHS\".\"x\" AS \"x\""));
}

#[test]
fn right_join_native_takes_key_from_right() {
    let out = one_line(&sql(&Query::join(spec(JoinKind::Right))));
    assert_eq!(
        out,
        "SELECT \"RHS\".\"x\" AS \"x\", \"LHS\".\"y\" AS \"y\", \"RHS\".\"z\" AS \"z\" \
         FROM \"a\" AS \"LHS\" RIGHT JOIN \"b\" AS \"RHS\" ON (\"LHS\".\"x\" = \"RHS\".\"x\")"
    );
}

#[test]
fn full_join_native() {
    let out = one_line(&sql(&Query::join(spec(JoinKind::Full))));
    assert!(out.starts_with("SELECT COALESCE(\"LHS\".\"x\", \"RHS\".\"x\") AS \"x\""));
    assert!(out.contains(" FULL JOIN \"b\" AS \"RHS\" "));
    assert!(!out.contains("UNION"));
}

#[test]
fn multiple_keys_joined_with_and() {
    let spec = JoinSpec::new(
        JoinKind::Inner,
        Relation::table("a", &["k1", "k2", "v"]),
        Relation::table("b", &["k1", "k2", "w"]),
    )
    .by("k1")
    .by("k2");
    let out = sql(&Query::join(spec));
    assert!(out.ends_with(
        "  ON (\"LHS\".\"k1\" = \"RHS\".\"k1\" AND \"LHS\".\"k2\" = \"RHS\".\"k2\")"
    ));
}

#[test]
fn clashing_columns_get_suffixes() {
    let spec = JoinSpec::new(
        JoinKind::Inner,
        Relation::table("a", &["id", "v"]),
        Relation::table("b", &["id", "v"]),
    )
    .by("id");
    let out = sql(&Query::join(spec));
    assert!(out.starts_with(
        "SELECT \"LHS\".\"id\" AS \"id\", \"LHS\".\"v\" AS \"v.x\", \"RHS\".\"v\" AS \"v.y\"\n"
    ));
}

#[test]
fn custom_aliases() {
    let out = sql(&Query::join(spec(JoinKind::Inner).aliases("l", "r")));
    assert!(out.contains("FROM \"a\" AS \"l\"\n"));
    assert!(out.contains("ON (\"l\".\"x\" = \"r\".\"x\")"));
}

// ===================================================================
// NULL key matching
// ===================================================================

#[test]
fn self_join_matching_nulls() {
    let spec = JoinSpec::new(
        JoinKind::Inner,
        Relation::table("a", &["x"]),
        Relation::table("a", &["x"]),
    )
    .by("x")
    .null_equality(NullEquality::MatchNulls);
    let out = sql(&Query::join(spec));
    assert!(out.ends_with("  ON (\"LHS\".\"x\" IS \"RHS\".\"x\")"), "{out}");
    assert!(out.contains("FROM \"a\" AS \"LHS\"\nINNER JOIN \"a\" AS \"RHS\"\n"));
}

// ===================================================================
// Emulated outer joins
// ===================================================================

#[test]
fn right_join_emulated_swaps_operands() {
    let out = one_line(&emulated(JoinKind::Right));
    assert_eq!(
        out,
        "SELECT \"RHS\".\"x\" AS \"x\", \"LHS\".\"y\" AS \"y\", \"RHS\".\"z\" AS \"z\" \
         FROM \"b\" AS \"RHS\" LEFT JOIN \"a\" AS \"LHS\" ON (\"LHS\".\"x\" = \"RHS\".\"x\")"
    );
}

#[test]
fn right_join_emulated_keeps_column_order() {
    let native = one_line(&sql(&Query::join(spec(JoinKind::Right))));
    let emulated = one_line(&emulated(JoinKind::Right));
    let select = |s: &str| s.split(" FROM ").next().map(String::from);
    assert_eq!(select(&native), select(&emulated));
}

#[test]
fn full_join_emulated_is_union_of_left_joins() {
    let out = emulated(JoinKind::Full);
    let select = "SELECT COALESCE(\"LHS\".\"x\", \"RHS\".\"x\") AS \"x\", \"LHS\".\"y\" AS \"y\", \"RHS\".\"z\" AS \"z\"";

    assert!(out.starts_with("(\n"));
    assert!(out.contains("\n)\nUNION\n(\n"));
    assert!(!out.contains("UNION ALL"));
    assert!(!out.contains("FULL JOIN"));
    assert_eq!(
        one_line(&out),
        format!(
            "( {select} FROM \"a\" AS \"LHS\" LEFT JOIN \"b\" AS \"RHS\" ON (\"LHS\".\"x\" = \"RHS\".\"x\") ) \
             UNION \
             ( {select} FROM \"b\" AS \"RHS\" LEFT JOIN \"a\" AS \"LHS\" ON (\"LHS\".\"x\" = \"RHS\".\"x\") )"
        )
    );
}

#[test]
fn inner_and_left_stay_native_when_outer_emulated() {
    assert!(emulated(JoinKind::Inner).contains("\nINNER JOIN "));
    assert!(emulated(JoinKind::Left).contains("\nLEFT JOIN \"b\""));
}

#[test]
fn unsupported_join_kind() {
    use relq_core::ast::JoinSupport;
    use relq_core::Dialect;

    #[derive(Debug)]
    struct NoFull;

    impl Dialect for NoFull {
        fn name(&self) -> &'static str {
            "no-full"
        }

        fn join_support(&self, kind: JoinKind) -> JoinSupport {
            if kind == JoinKind::Full {
                JoinSupport::Unsupported
            } else {
                JoinSupport::Native
            }
        }
    }

    let profile = profile_of(NoFull);
    let err = Compiler::new(&profile)
        .to_sql(&Query::join(spec(JoinKind::Full)))
        .unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedConstruct { .. }));
}

// ===================================================================
// Semi and anti joins
// ===================================================================

#[test]
fn semi_join_uses_exists() {
    assert_eq!(
        sql(&Query::join(spec(JoinKind::Semi))),
        "SELECT \"LHS\".\"x\" AS \"x\", \"LHS\".\"y\" AS \"y\"\n\
         FROM \"a\" AS \"LHS\"\n\
         WHERE EXISTS (\n  \
         SELECT 1\n  \
         FROM \"b\" AS \"RHS\"\n  \
         WHERE (\"LHS\".\"x\" = \"RHS\".\"x\")\n\
         )"
    );
}

#[test]
fn anti_join_uses_not_exists() {
    let out = sql(&Query::join(spec(JoinKind::Anti)));
    assert!(out.contains("WHERE NOT EXISTS (\n"));
    assert!(!out.contains("\"z\""));
}

// ===================================================================
// Joins inside larger queries
// ===================================================================

#[test]
fn filtered_join_becomes_subquery() {
    let query = Query::join(spec(JoinKind::Inner)).filter(Expr::column("z").gt(Expr::integer(0)));
    let out = sql(&query);
    assert!(out.starts_with("SELECT *\nFROM (\n  SELECT \"LHS\".\"x\" AS \"x\""));
    assert!(out.contains("\n    ON (\"LHS\".\"x\" = \"RHS\".\"x\")\n) AS \"q01\"\n"));
    assert!(out.ends_with("WHERE (\"z\" > 0)"));
}

#[test]
fn join_of_subqueries() {
    let left = Relation::new(
        relq_core::Source::Query(Box::new(
            Query::table("a").filter(Expr::column("y").gt(Expr::integer(1))),
        )),
        vec![String::from("x"), String::from("y")],
    );
    let spec = JoinSpec::new(JoinKind::Inner, left, Relation::table("b", &["x", "z"])).by("x");
    let out = sql(&Query::join(spec));
    assert!(out.contains("FROM (\n  SELECT *\n  FROM \"a\"\n  WHERE (\"y\" > 1)\n) AS \"LHS\"\n"));
    assert!(!out.contains("q01"));
}

#[test]
fn missing_key_is_configuration_error() {
    let spec = spec(JoinKind::Inner).by("nope");
    assert!(matches!(
        compile_err(&Query::join(spec)),
        CompileError::Configuration(_)
    ));
}
