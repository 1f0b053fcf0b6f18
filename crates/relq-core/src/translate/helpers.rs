//! Building blocks for translation table entries.
//!
//! Each helper returns a [`RenderFn`], so a dialect can replace any
//! single entry without touching the others.

use crate::ast::Expr;
use crate::error::{CompileError, Result};

use super::window::{window_aggregate, window_cumulative, window_ranked};
use super::{named, positional, render_fn, RenderFn, SqlArg};

fn expect_arity(name: &str, args: &[&SqlArg<'_>], arity: usize) -> Result<()> {
    if args.len() == arity {
        Ok(())
    } else {
        Err(CompileError::arity(name, arity, args.len()))
    }
}

fn expect_range(name: &str, args: &[&SqlArg<'_>], min: usize, max: usize) -> Result<()> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(CompileError::arity(name, format!("{min}..={max}"), args.len()))
    }
}

fn join_sql(args: &[&SqlArg<'_>]) -> String {
    args.iter()
        .map(|a| a.sql.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `a OP b`, with non-atomic operands parenthesized.
#[must_use]
pub fn infix(op: &'static str) -> RenderFn {
    render_fn(move |_, args| {
        let pos = positional(args);
        expect_arity(op, &pos, 2)?;
        Ok(format!("{} {op} {}", pos[0].operand(), pos[1].operand()))
    })
}

/// `-a` with one argument, `a - b` with two.
#[must_use]
pub fn minus() -> RenderFn {
    render_fn(|_, args| {
        let pos = positional(args);
        match pos.as_slice() {
            // `--` would start a line comment.
            [a] if a.sql.starts_with('-') => Ok(format!("-({})", a.sql)),
            [a] => Ok(format!("-{}", a.operand())),
            [a, b] => Ok(format!("{} - {}", a.operand(), b.operand())),
            _ => Err(CompileError::arity("-", "1..=2", pos.len())),
        }
    })
}

/// `OP a`, e.g. `NOT a`.
#[must_use]
pub fn unary(op: &'static str) -> RenderFn {
    render_fn(move |_, args| {
        let pos = positional(args);
        expect_arity(op, &pos, 1)?;
        Ok(format!("{op} {}", pos[0].operand()))
    })
}

/// `a OP`, e.g. `a IS NULL`.
#[must_use]
pub fn postfix(op: &'static str) -> RenderFn {
    render_fn(move |_, args| {
        let pos = positional(args);
        expect_arity(op, &pos, 1)?;
        Ok(format!("{} {op}", pos[0].operand()))
    })
}

/// `NAME(args...)` with exactly `arity` arguments.
#[must_use]
pub fn prefix(name: &'static str, arity: usize) -> RenderFn {
    render_fn(move |_, args| {
        let pos = positional(args);
        expect_arity(name, &pos, arity)?;
        Ok(format!("{name}({})", join_sql(&pos)))
    })
}

/// `NAME(args...)` with `min` to `max` arguments.
#[must_use]
pub fn prefix_between(name: &'static str, min: usize, max: usize) -> RenderFn {
    render_fn(move |_, args| {
        let pos = positional(args);
        expect_range(name, &pos, min, max)?;
        Ok(format!("{name}({})", join_sql(&pos)))
    })
}

/// `NAME(args...)` with at least one argument.
#[must_use]
pub fn prefix_variadic(name: &'static str) -> RenderFn {
    render_fn(move |_, args| {
        let pos = positional(args);
        if pos.is_empty() {
            return Err(CompileError::arity(name, "at least 1", 0));
        }
        Ok(format!("{name}({})", join_sql(&pos)))
    })
}

/// `CAST(a AS type)`.
#[must_use]
pub fn cast(sql_type: &'static str) -> RenderFn {
    render_fn(move |_, args| {
        let pos = positional(args);
        expect_arity("CAST", &pos, 1)?;
        Ok(format!("CAST({} AS {sql_type})", pos[0].sql))
    })
}

/// Chained concatenation through a binary operator.
///
/// The separator defaults to `default_sep` and can be overridden with a
/// named `sep` argument; an empty separator is left out. `wrap`, when
/// given, is applied to every argument first (typically a cast to a
/// string type).
#[must_use]
pub fn paste_infix(
    default_sep: &'static str,
    op: &'static str,
    wrap: Option<fn(&str) -> String>,
) -> RenderFn {
    render_fn(move |tr, args| {
        let pos = positional(args);
        if pos.is_empty() {
            return Err(CompileError::arity("paste", "at least 1", 0));
        }
        let empty = tr.dialect().quote_string("");
        let sep = named(args, "sep").map_or_else(
            || tr.dialect().quote_string(default_sep),
            |s| s.sql.clone(),
        );
        let parts: Vec<String> = pos
            .iter()
            .map(|a| wrap.map_or_else(|| a.operand(), |w| w(&a.sql)))
            .collect();
        let glue = if sep == empty {
            format!(" {op} ")
        } else {
            format!(" {op} {sep} {op} ")
        };
        Ok(parts.join(&glue))
    })
}

/// Concatenation through `CONCAT_WS(sep, ...)`, or `CONCAT(...)` when
/// the separator is empty.
#[must_use]
pub fn paste_concat_ws(default_sep: &'static str) -> RenderFn {
    render_fn(move |tr, args| {
        let pos = positional(args);
        if pos.is_empty() {
            return Err(CompileError::arity("paste", "at least 1", 0));
        }
        let sep = named(args, "sep").map_or_else(
            || tr.dialect().quote_string(default_sep),
            |s| s.sql.clone(),
        );
        if sep == tr.dialect().quote_string("") {
            Ok(format!("CONCAT({})", join_sql(&pos)))
        } else {
            Ok(format!("CONCAT_WS({sep}, {})", join_sql(&pos)))
        }
    })
}

/// `COUNT(*)`.
#[must_use]
pub fn count_star() -> RenderFn {
    render_fn(|_, args| {
        let pos = positional(args);
        expect_arity("n", &pos, 0)?;
        Ok(String::from("COUNT(*)"))
    })
}

/// `COUNT(DISTINCT a)`.
#[must_use]
pub fn count_distinct() -> RenderFn {
    render_fn(|_, args| {
        let pos = positional(args);
        expect_arity("n_distinct", &pos, 1)?;
        Ok(format!("COUNT(DISTINCT {})", pos[0].sql))
    })
}

/// Runs `inner` and appends the translator's window.
#[must_use]
pub fn windowed(inner: RenderFn) -> RenderFn {
    render_fn(move |tr, args| Ok(window_aggregate(tr, &inner(tr, args)?)))
}

/// Runs `inner` and appends a running-total window.
#[must_use]
pub fn cumulative(inner: RenderFn) -> RenderFn {
    render_fn(move |tr, args| Ok(window_cumulative(tr, &inner(tr, args)?)))
}

/// Ranking function `NAME()`. An optional argument becomes the window
/// ordering.
#[must_use]
pub fn rank(name: &'static str) -> RenderFn {
    render_fn(move |tr, args| {
        let pos = positional(args);
        expect_range(name, &pos, 0, 1)?;
        let order: Vec<String> = pos.iter().map(|a| a.sql.clone()).collect();
        let call = format!("{name}()");
        Ok(window_ranked(
            tr,
            &call,
            (!order.is_empty()).then_some(order.as_slice()),
        ))
    })
}

/// `LEAD`/`LAG(a[, n[, default]])` over the translator's ordering.
#[must_use]
pub fn offset(name: &'static str) -> RenderFn {
    render_fn(move |tr, args| {
        let pos = positional(args);
        expect_range(name, &pos, 1, 3)?;
        Ok(window_ranked(tr, &format!("{name}({})", join_sql(&pos)), None))
    })
}

/// `NTILE(n)` ordered by the first argument.
#[must_use]
pub fn ntile() -> RenderFn {
    render_fn(|tr, args| {
        let pos = positional(args);
        expect_arity("ntile", &pos, 2)?;
        let order = [pos[0].sql.clone()];
        Ok(window_ranked(
            tr,
            &format!("NTILE({})", pos[1].sql),
            Some(&order),
        ))
    })
}

/// `a IN (b, c)`. A single right-hand value is parenthesized.
#[must_use]
pub fn in_list() -> RenderFn {
    render_fn(|_, args| {
        let pos = positional(args);
        expect_arity("IN", &pos, 2)?;
        let list = if matches!(pos[1].expr, Expr::List(_)) {
            pos[1].sql.clone()
        } else {
            format!("({})", pos[1].sql)
        };
        Ok(format!("{} IN {list}", pos[0].operand()))
    })
}

/// `a BETWEEN low AND high`.
#[must_use]
pub fn between() -> RenderFn {
    render_fn(|_, args| {
        let pos = positional(args);
        expect_arity("BETWEEN", &pos, 3)?;
        Ok(format!(
            "{} BETWEEN {} AND {}",
            pos[0].operand(),
            pos[1].operand(),
            pos[2].operand()
        ))
    })
}

/// Null-safe equality through the dialect's hook.
#[must_use]
pub fn matches() -> RenderFn {
    render_fn(|tr, args| {
        let pos = positional(args);
        expect_arity("matches", &pos, 2)?;
        Ok(tr
            .dialect()
            .null_safe_eq(&pos[0].operand(), &pos[1].operand()))
    })
}

/// `a DESC`.
#[must_use]
pub fn desc() -> RenderFn {
    postfix("DESC")
}

/// An entry that always fails: the dialect has no equivalent.
#[must_use]
pub fn not_supported(construct: &'static str) -> RenderFn {
    render_fn(move |tr, _| {
        Err(CompileError::unsupported(tr.profile().name(), construct))
    })
}
