//! PostgreSQL dialect.

use relq_core::dialect::{base_translator, Dialect};
use relq_core::translate::helpers::cast;
use relq_core::translate::{positional, render_fn, RenderFn, SqlTranslator};
use relq_core::{CompileError, DialectProfile};

/// PostgreSQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn null_safe_eq(&self, x: &str, y: &str) -> String {
        format!("{x} IS NOT DISTINCT FROM {y}")
    }
}

/// `ROUND(x)`, or `ROUND(CAST(x AS NUMERIC), d)`: the two-argument form
/// only exists for NUMERIC.
fn round() -> RenderFn {
    render_fn(|_, args| match positional(args).as_slice() {
        [x] => Ok(format!("ROUND({})", x.sql)),
        [x, digits] => Ok(format!("ROUND(CAST({} AS NUMERIC), {})", x.sql, digits.sql)),
        other => Err(CompileError::arity("ROUND", "1..=2", other.len())),
    })
}

/// Translation tables shared with dialects built on PostgreSQL.
pub(crate) fn translator() -> SqlTranslator {
    base_translator()
        .extend()
        .scalar("round", round())
        .scalar("as_numeric", cast("NUMERIC"))
        .scalar("as_character", cast("TEXT"))
        .build()
}

/// Returns the PostgreSQL profile.
#[must_use]
pub fn profile() -> DialectProfile {
    DialectProfile::new(PostgresDialect::new(), translator())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::{Compiler, EvalMode, Expr};

    fn translate(expr: &Expr) -> String {
        Compiler::new(&profile())
            .translate(expr, EvalMode::Window)
            .unwrap()
    }

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.name(), "postgres");
        assert_eq!(dialect.identifier_quote(), ('"', '"'));
        assert_eq!(
            dialect.null_safe_eq("a", "b"),
            "a IS NOT DISTINCT FROM b"
        );
    }

    #[test]
    fn test_round_casts_to_numeric() {
        let x = Expr::column("x");
        assert_eq!(
            translate(&Expr::call("round", vec![x.clone(), Expr::integer(2)])),
            "ROUND(CAST(\"x\" AS NUMERIC), 2)"
        );
        assert_eq!(translate(&Expr::call("round", vec![x])), "ROUND(\"x\")");
    }

    #[test]
    fn test_inherits_base_entries() {
        assert_eq!(
            translate(&Expr::call("as_character", vec![Expr::column("x")])),
            "CAST(\"x\" AS TEXT)"
        );
        assert_eq!(
            translate(&Expr::call("abs", vec![Expr::column("x")])),
            "ABS(\"x\")"
        );
    }
}
