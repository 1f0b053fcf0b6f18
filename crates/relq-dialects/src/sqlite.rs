//! SQLite dialect.

use relq_core::ast::{JoinKind, JoinSupport};
use relq_core::dialect::{base_translator, Dialect};
use relq_core::translate::helpers::{cast, not_supported, prefix_variadic};
use relq_core::{DialectProfile, Result};

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn join_support(&self, kind: JoinKind) -> JoinSupport {
        match kind {
            JoinKind::Right | JoinKind::Full => JoinSupport::Emulated,
            _ => JoinSupport::Native,
        }
    }

    fn parenthesize_set_operands(&self) -> bool {
        false
    }

    fn explain(&self, sql: &str) -> Result<String> {
        Ok(format!("EXPLAIN QUERY PLAN {sql}"))
    }
}

/// Returns the SQLite profile.
#[must_use]
pub fn profile() -> DialectProfile {
    let mut builder = base_translator()
        .extend()
        // Multi-argument MIN and MAX are scalar in SQLite.
        .scalar("pmin", prefix_variadic("MIN"))
        .scalar("pmax", prefix_variadic("MAX"))
        .scalar("as_double", cast("REAL"))
        .scalar("as_numeric", cast("REAL"))
        .scalar("as_character", cast("TEXT"))
        .scalar("as_logical", cast("INTEGER"));
    for (name, construct) in [("sd", "STDDEV"), ("var", "VARIANCE"), ("median", "MEDIAN")] {
        builder = builder
            .aggregate(name, not_supported(construct))
            .window(name, not_supported(construct));
    }
    DialectProfile::new(SqliteDialect::new(), builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::{CompileError, Compiler, EvalMode, Expr, Query, SetOperator};

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert_eq!(dialect.identifier_quote(), ('"', '"'));
        assert_eq!(dialect.join_support(JoinKind::Right), JoinSupport::Emulated);
        assert_eq!(dialect.join_support(JoinKind::Left), JoinSupport::Native);
        assert_eq!(
            dialect.explain("SELECT 1").unwrap(),
            "EXPLAIN QUERY PLAN SELECT 1"
        );
    }

    #[test]
    fn test_statistics_not_supported() {
        let profile = profile();
        let compiler = Compiler::new(&profile);
        for name in ["sd", "var", "median"] {
            let expr = Expr::call(name, vec![Expr::column("x")]);
            assert!(matches!(
                compiler.translate(&expr, EvalMode::Aggregate),
                Err(CompileError::UnsupportedConstruct { .. })
            ));
        }
        let sum = Expr::call("sum", vec![Expr::column("x")]);
        assert_eq!(
            compiler.translate(&sum, EvalMode::Aggregate).unwrap(),
            "SUM(\"x\")"
        );
    }

    #[test]
    fn test_set_operands_bare() {
        let profile = profile();
        let out = Compiler::new(&profile)
            .set_operation(SetOperator::Union, &Query::table("a"), &Query::table("b"))
            .unwrap()
            .sql;
        assert_eq!(out, "SELECT *\nFROM \"a\"\nUNION\nSELECT *\nFROM \"b\"");
    }
}
