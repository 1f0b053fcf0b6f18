//! Microsoft SQL Server dialect.

use relq_core::dialect::{base_translator, Dialect, LimitSyntax};
use relq_core::translate::helpers::{cast, infix, not_supported, paste_infix, prefix, windowed};
use relq_core::{CompileError, DialectProfile, Result};

/// SQL Server dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsSqlDialect;

impl MsSqlDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MsSqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn identifier_quote(&self) -> (char, char) {
        ('[', ']')
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn null_safe_eq(&self, x: &str, y: &str) -> String {
        format!("({x} = {y} OR ({x} IS NULL AND {y} IS NULL))")
    }

    fn limit(&self, n: u64) -> LimitSyntax {
        LimitSyntax::Top(format!("TOP {n}"))
    }

    fn explain(&self, _sql: &str) -> Result<String> {
        Err(CompileError::unsupported(self.name(), "EXPLAIN"))
    }

    fn analyze(&self, table: &str) -> Result<String> {
        Ok(format!("UPDATE STATISTICS {table}"))
    }

    // Temporary tables always live in tempdb, so they take no schema.
    fn save_as(&self, table: &str, sql: &str, temporary: bool) -> Result<String> {
        if temporary && is_qualified(table) {
            return Err(CompileError::unsupported(
                self.name(),
                format!("schema-qualified temporary table {table}"),
            ));
        }
        let target = if temporary {
            table
                .strip_prefix('[')
                .map_or_else(|| format!("#{table}"), |rest| format!("[#{rest}"))
        } else {
            String::from(table)
        };
        Ok(format!("SELECT * INTO {target} FROM (\n{sql}\n) AS [q01]"))
    }
}

// Whether a quoted name has a `.` outside its brackets.
fn is_qualified(table: &str) -> bool {
    let mut chars = table.chars().peekable();
    let mut quoted = false;
    while let Some(c) = chars.next() {
        match c {
            '[' if !quoted => quoted = true,
            ']' if quoted => {
                if chars.peek() == Some(&']') {
                    chars.next();
                } else {
                    quoted = false;
                }
            }
            '.' if !quoted => return true,
            _ => {}
        }
    }
    false
}

fn to_varchar(sql: &str) -> String {
    format!("CAST({sql} AS VARCHAR(MAX))")
}

/// Returns the SQL Server profile.
#[must_use]
pub fn profile() -> DialectProfile {
    let translator = base_translator()
        .extend()
        .scalar("||", infix("+"))
        .scalar("paste", paste_infix(" ", "+", Some(to_varchar)))
        .scalar("paste0", paste_infix("", "+", Some(to_varchar)))
        .scalar("length", prefix("LEN", 1))
        .scalar("substr", prefix("SUBSTRING", 3))
        .scalar("ceiling", prefix("CEILING", 1))
        .scalar("ln", prefix("LOG", 1))
        .scalar("log", prefix("LOG", 1))
        .scalar("as_double", cast("FLOAT"))
        .scalar("as_numeric", cast("FLOAT"))
        .scalar("as_character", cast("VARCHAR(MAX)"))
        .scalar("as_logical", cast("BIT"))
        .aggregate("sd", prefix("STDEV", 1))
        .aggregate("var", prefix("VAR", 1))
        .aggregate("median", not_supported("PERCENTILE_CONT outside a window"))
        .window("sd", windowed(prefix("STDEV", 1)))
        .window("var", windowed(prefix("VAR", 1)))
        .build();
    DialectProfile::new(MsSqlDialect::new(), translator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::{Compiler, EvalMode, Expr, Query, TableName};

    fn translate(expr: &Expr, mode: EvalMode) -> String {
        Compiler::new(&profile()).translate(expr, mode).unwrap()
    }

    #[test]
    fn test_mssql_dialect() {
        let dialect = MsSqlDialect::new();
        assert_eq!(dialect.name(), "mssql");
        assert_eq!(dialect.quote_identifier("a]b"), "[a]]b]");
        assert_eq!(dialect.boolean_literal(true), "1");
        assert_eq!(dialect.limit(3), LimitSyntax::Top(String::from("TOP 3")));
        assert_eq!(
            dialect.null_safe_eq("a", "b"),
            "(a = b OR (a IS NULL AND b IS NULL))"
        );
    }

    #[test]
    fn test_paste_casts_to_varchar() {
        let paste = Expr::call("paste", vec![Expr::column("a"), Expr::integer(1)]);
        assert_eq!(
            translate(&paste, EvalMode::Window),
            "CAST([a] AS VARCHAR(MAX)) + ' ' + CAST(1 AS VARCHAR(MAX))"
        );
    }

    #[test]
    fn test_function_names() {
        let x = || Expr::column("x");
        assert_eq!(
            translate(&Expr::call("length", vec![x()]), EvalMode::Window),
            "LEN([x])"
        );
        assert_eq!(
            translate(&Expr::call("sd", vec![x()]), EvalMode::Aggregate),
            "STDEV([x])"
        );
        assert_eq!(
            translate(&Expr::call("var", vec![x()]), EvalMode::Window),
            "VAR([x]) OVER ()"
        );
    }

    #[test]
    fn test_top_and_statements() {
        let profile = profile();
        let compiler = Compiler::new(&profile);
        assert_eq!(
            compiler.to_sql(&Query::table("t").limit(5)).unwrap().sql,
            "SELECT TOP 5 *\nFROM [t]"
        );
        assert!(compiler.explain(&Query::table("t")).is_err());
        assert_eq!(
            compiler.analyze(&TableName::qualified("dbo", "t")).unwrap(),
            "UPDATE STATISTICS [dbo].[t]"
        );
        assert_eq!(
            compiler
                .save_as(&Query::table("t"), &TableName::new("tmp"), true)
                .unwrap()
                .sql,
            "SELECT * INTO [#tmp] FROM (\nSELECT *\nFROM [t]\n) AS [q01]"
        );
    }

    #[test]
    fn test_temporary_target_without_schema() {
        let profile = profile();
        let compiler = Compiler::new(&profile);
        assert!(matches!(
            compiler.save_as(&Query::table("t"), &TableName::qualified("dbo", "tmp"), true),
            Err(CompileError::UnsupportedConstruct { .. })
        ));
        assert!(compiler
            .save_as(&Query::table("t"), &TableName::qualified("dbo", "tmp"), false)
            .unwrap()
            .sql
            .starts_with("SELECT * INTO [dbo].[tmp] FROM (\n"));
        assert!(compiler
            .save_as(&Query::table("t"), &TableName::new("a.b"), true)
            .unwrap()
            .sql
            .starts_with("SELECT * INTO [#a.b] FROM (\n"));
    }

    #[test]
    fn test_qualified_names() {
        assert!(is_qualified("[dbo].[t]"));
        assert!(!is_qualified("[a.b]"));
        assert!(!is_qualified("[a]].b]"));
        assert!(is_qualified("[a]]].[b]"));
    }
}
