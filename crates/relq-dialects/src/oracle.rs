//! Oracle dialect.

use relq_core::dialect::{base_translator, Dialect, LimitSyntax};
use relq_core::translate::helpers::{cast, not_supported, prefix, windowed};
use relq_core::translate::{positional, render_fn, RenderFn};
use relq_core::{CompileError, DialectProfile, Result, SetOperator};

/// Oracle dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleDialect;

impl OracleDialect {
    /// Creates a new Oracle dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    // DECODE treats two NULLs as equal.
    fn null_safe_eq(&self, x: &str, y: &str) -> String {
        format!("DECODE({x}, {y}, 0, 1) = 0")
    }

    fn limit(&self, n: u64) -> LimitSyntax {
        LimitSyntax::Trailing {
            keyword: "FETCH FIRST",
            fragment: format!("{n} ROWS ONLY"),
        }
    }

    fn table_alias_as(&self) -> bool {
        false
    }

    fn set_operator(&self, op: SetOperator) -> &'static str {
        match op {
            SetOperator::Except => "MINUS",
            other => other.as_str(),
        }
    }

    fn explain(&self, sql: &str) -> Result<String> {
        Ok(format!("EXPLAIN PLAN FOR {sql}"))
    }

    fn analyze(&self, table: &str) -> Result<String> {
        Ok(format!("ANALYZE TABLE {table} COMPUTE STATISTICS"))
    }

    fn save_as(&self, table: &str, sql: &str, temporary: bool) -> Result<String> {
        if temporary {
            Ok(format!(
                "CREATE GLOBAL TEMPORARY TABLE {table}\nON COMMIT PRESERVE ROWS AS\n{sql}"
            ))
        } else {
            Ok(format!("CREATE TABLE {table} AS\n{sql}"))
        }
    }
}

/// `LOG(10, x)`.
fn log10() -> RenderFn {
    render_fn(|_, args| match positional(args).as_slice() {
        [x] => Ok(format!("LOG(10, {})", x.sql)),
        other => Err(CompileError::arity("LOG10", 1, other.len())),
    })
}

/// Returns the Oracle profile.
#[must_use]
pub fn profile() -> DialectProfile {
    let translator = base_translator()
        .extend()
        .scalar("%", prefix("MOD", 2))
        .scalar("log10", log10())
        .scalar("as_double", cast("BINARY_DOUBLE"))
        .scalar("as_numeric", cast("NUMBER"))
        .scalar("as_character", cast("VARCHAR2(4000)"))
        .scalar("as_logical", not_supported("BOOLEAN casts"))
        .aggregate("sd", prefix("STDDEV", 1))
        .aggregate("var", prefix("VARIANCE", 1))
        .aggregate("median", prefix("MEDIAN", 1))
        .window("sd", windowed(prefix("STDDEV", 1)))
        .window("var", windowed(prefix("VARIANCE", 1)))
        .window("median", windowed(prefix("MEDIAN", 1)))
        .build();
    DialectProfile::new(OracleDialect::new(), translator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::ast::InfixOp;
    use relq_core::{Compiler, EvalMode, Expr, Query, TableName};

    #[test]
    fn test_oracle_dialect() {
        let dialect = OracleDialect::new();
        assert_eq!(dialect.name(), "oracle");
        assert!(!dialect.table_alias_as());
        assert_eq!(dialect.set_operator(SetOperator::Except), "MINUS");
        assert_eq!(dialect.set_operator(SetOperator::UnionAll), "UNION ALL");
        assert_eq!(dialect.null_safe_eq("a", "b"), "DECODE(a, b, 0, 1) = 0");
    }

    #[test]
    fn test_fetch_first_and_alias() {
        let profile = profile();
        let query = Query::wrap(Query::table("t").limit(3)).limit(1);
        assert_eq!(
            Compiler::new(&profile).to_sql(&query).unwrap().sql,
            "SELECT *\nFROM (\n  SELECT *\n  FROM \"t\"\n  FETCH FIRST 3 ROWS ONLY\n) \"q01\"\nFETCH FIRST 1 ROWS ONLY"
        );
    }

    #[test]
    fn test_modulo_and_statistics() {
        let profile = profile();
        let compiler = Compiler::new(&profile);
        let modulo = Expr::column("x").infix(InfixOp::Mod, Expr::integer(2));
        assert_eq!(
            compiler.translate(&modulo, EvalMode::Window).unwrap(),
            "MOD(\"x\", 2)"
        );
        let sd = Expr::call("sd", vec![Expr::column("x")]);
        assert_eq!(
            compiler.translate(&sd, EvalMode::Aggregate).unwrap(),
            "STDDEV(\"x\")"
        );
    }

    #[test]
    fn test_statements() {
        let profile = profile();
        let compiler = Compiler::new(&profile);
        assert_eq!(
            compiler.explain(&Query::table("t")).unwrap().sql,
            "EXPLAIN PLAN FOR SELECT *\nFROM \"t\""
        );
        assert_eq!(
            compiler.analyze(&TableName::new("t")).unwrap(),
            "ANALYZE TABLE \"t\" COMPUTE STATISTICS"
        );
        assert!(compiler
            .save_as(&Query::table("t"), &TableName::new("tmp"), true)
            .unwrap()
            .sql
            .starts_with("CREATE GLOBAL TEMPORARY TABLE \"tmp\"\n"));
    }
}
