//! ANSI baseline dialect and translation tables.

use std::sync::OnceLock;

use crate::error::CompileError;
use crate::translate::helpers::{
    between, cast, count_distinct, count_star, cumulative, desc, in_list, infix, matches, minus,
    not_supported, ntile, offset, paste_infix, postfix, prefix, prefix_between, prefix_variadic,
    rank, unary, windowed,
};
use crate::translate::{case_when, if_else, positional, render_fn, switch, RenderFn, SqlTranslator};

use super::Dialect;

/// The ANSI SQL baseline used when no other dialect applies.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiDialect;

impl AnsiDialect {
    /// Creates a new ANSI dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }
}

fn median() -> RenderFn {
    render_fn(|_, args| {
        let pos = positional(args);
        if pos.len() != 1 {
            return Err(CompileError::arity("median", 1, pos.len()));
        }
        Ok(format!(
            "PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY {})",
            pos[0].sql
        ))
    })
}

/// Aggregates shared by the aggregate namespace and, wrapped in a
/// window, by the window namespace.
fn aggregates() -> Vec<(&'static str, RenderFn)> {
    vec![
        ("n", count_star()),
        ("sum", prefix("SUM", 1)),
        ("mean", prefix("AVG", 1)),
        ("min", prefix("MIN", 1)),
        ("max", prefix("MAX", 1)),
        ("sd", prefix("STDDEV_SAMP", 1)),
        ("var", prefix("VAR_SAMP", 1)),
        ("median", median()),
    ]
}

fn build() -> SqlTranslator {
    let mut builder = SqlTranslator::builder()
        // Operators
        .scalar("+", infix("+"))
        .scalar("-", minus())
        .scalar("*", infix("*"))
        .scalar("/", infix("/"))
        .scalar("%", infix("%"))
        .scalar("^", prefix("POWER", 2))
        .scalar("==", infix("="))
        .scalar("!=", infix("<>"))
        .scalar("<", infix("<"))
        .scalar("<=", infix("<="))
        .scalar(">", infix(">"))
        .scalar(">=", infix(">="))
        .scalar("&", infix("AND"))
        .scalar("|", infix("OR"))
        .scalar("||", infix("||"))
        .scalar("!", unary("NOT"))
        // Math
        .scalar("abs", prefix("ABS", 1))
        .scalar("sign", prefix("SIGN", 1))
        .scalar("sqrt", prefix("SQRT", 1))
        .scalar("exp", prefix("EXP", 1))
        .scalar("ln", prefix("LN", 1))
        .scalar("log", prefix("LN", 1))
        .scalar("log10", prefix("LOG10", 1))
        .scalar("floor", prefix("FLOOR", 1))
        .scalar("ceiling", prefix("CEIL", 1))
        .scalar("round", prefix_between("ROUND", 1, 2))
        // Strings
        .scalar("lower", prefix("LOWER", 1))
        .scalar("upper", prefix("UPPER", 1))
        .scalar("length", prefix("LENGTH", 1))
        .scalar("trim", prefix("TRIM", 1))
        .scalar("substr", prefix("SUBSTR", 3))
        .scalar("replace", prefix("REPLACE", 3))
        .scalar("like", infix("LIKE"))
        .scalar("paste", paste_infix(" ", "||", None))
        .scalar("paste0", paste_infix("", "||", None))
        // Nulls
        .scalar("is_null", postfix("IS NULL"))
        .scalar("is_not_null", postfix("IS NOT NULL"))
        .scalar("coalesce", prefix_variadic("COALESCE"))
        .scalar("nullif", prefix("NULLIF", 2))
        .scalar("pmin", prefix_variadic("LEAST"))
        .scalar("pmax", prefix_variadic("GREATEST"))
        .scalar("matches", matches())
        // Membership
        .scalar("in", in_list())
        .scalar("between", between())
        // Casts
        .scalar("as_integer", cast("INTEGER"))
        .scalar("as_double", cast("DOUBLE PRECISION"))
        .scalar("as_numeric", cast("DOUBLE PRECISION"))
        .scalar("as_character", cast("VARCHAR"))
        .scalar("as_logical", cast("BOOLEAN"))
        .scalar("as_date", cast("DATE"))
        // Conditionals
        .scalar("if_else", render_fn(if_else))
        .scalar("if", render_fn(if_else))
        .scalar("switch", render_fn(switch))
        .scalar("case_when", render_fn(case_when))
        // Ordering
        .scalar("desc", desc())
        // Aggregates
        .aggregate("n_distinct", count_distinct())
        // Windows
        .window("n_distinct", not_supported("COUNT(DISTINCT) over a window"))
        .window("cumsum", cumulative(prefix("SUM", 1)))
        .window("cummean", cumulative(prefix("AVG", 1)))
        .window("cummin", cumulative(prefix("MIN", 1)))
        .window("cummax", cumulative(prefix("MAX", 1)))
        .window("row_number", rank("ROW_NUMBER"))
        .window("rank", rank("RANK"))
        .window("min_rank", rank("RANK"))
        .window("dense_rank", rank("DENSE_RANK"))
        .window("percent_rank", rank("PERCENT_RANK"))
        .window("cume_dist", rank("CUME_DIST"))
        .window("ntile", ntile())
        .window("lead", offset("LEAD"))
        .window("lag", offset("LAG"))
        .window("first", windowed(prefix("FIRST_VALUE", 1)))
        .window("last", windowed(prefix("LAST_VALUE", 1)));

    for (name, render) in aggregates() {
        builder = builder
            .aggregate(name, render.clone())
            .window(name, windowed(render));
    }
    builder.build()
}

/// Returns the ANSI translation tables, built on first use.
///
/// Every other dialect's tables inherit from these.
pub fn base_translator() -> &'static SqlTranslator {
    static BASE: OnceLock<SqlTranslator> = OnceLock::new();
    BASE.get_or_init(build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::EvalMode;
    use crate::translate::Namespace;

    #[test]
    fn test_base_is_built_once() {
        assert!(std::ptr::eq(base_translator(), base_translator()));
    }

    #[test]
    fn test_aggregates_in_both_namespaces() {
        let base = base_translator();
        for name in ["n", "sum", "mean", "median"] {
            assert!(base.table(Namespace::Aggregate).contains(name), "{name}");
            assert!(base.table(Namespace::Window).contains(name), "{name}");
        }
        assert!(base.lookup("abs", EvalMode::Aggregate).is_some());
        assert!(base.lookup("cumsum", EvalMode::Aggregate).is_none());
    }
}
