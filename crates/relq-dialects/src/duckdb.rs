//! DuckDB dialect.
//!
//! DuckDB follows PostgreSQL closely, so its tables inherit from the
//! PostgreSQL ones rather than from ANSI directly.

use relq_core::dialect::Dialect;
use relq_core::translate::helpers::{prefix, prefix_between, windowed};
use relq_core::DialectProfile;

use crate::postgres;

/// DuckDB dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct DuckDbDialect;

impl DuckDbDialect {
    /// Creates a new DuckDB dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for DuckDbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn null_safe_eq(&self, x: &str, y: &str) -> String {
        format!("{x} IS NOT DISTINCT FROM {y}")
    }
}

/// Returns the DuckDB profile.
#[must_use]
pub fn profile() -> DialectProfile {
    // ROUND(x, d) accepts doubles, so the NUMERIC cast is not needed.
    let translator = postgres::translator()
        .extend()
        .scalar("round", prefix_between("ROUND", 1, 2))
        .aggregate("median", prefix("MEDIAN", 1))
        .window("median", windowed(prefix("MEDIAN", 1)))
        .build();
    DialectProfile::new(DuckDbDialect::new(), translator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::translate::Namespace;
    use relq_core::{Compiler, EvalMode, Expr};

    #[test]
    fn test_duckdb_dialect() {
        let dialect = DuckDbDialect::new();
        assert_eq!(dialect.name(), "duckdb");
        assert!(dialect.table_alias_as());
    }

    #[test]
    fn test_three_level_chain() {
        let profile = profile();
        assert_eq!(profile.translator().table(Namespace::Scalar).depth(), 3);

        let compiler = Compiler::new(&profile);
        let round = Expr::call("round", vec![Expr::column("x"), Expr::integer(1)]);
        assert_eq!(
            compiler.translate(&round, EvalMode::Window).unwrap(),
            "ROUND(\"x\", 1)"
        );
        let text = Expr::call("as_character", vec![Expr::column("x")]);
        assert_eq!(
            compiler.translate(&text, EvalMode::Window).unwrap(),
            "CAST(\"x\" AS TEXT)"
        );
    }

    #[test]
    fn test_median() {
        let profile = profile();
        let median = Expr::call("median", vec![Expr::column("x")]);
        assert_eq!(
            Compiler::new(&profile)
                .translate(&median, EvalMode::Aggregate)
                .unwrap(),
            "MEDIAN(\"x\")"
        );
    }
}
