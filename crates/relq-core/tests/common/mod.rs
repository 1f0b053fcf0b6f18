#![allow(dead_code)]

use relq_core::ast::{JoinKind, JoinSupport};
use relq_core::dialect::{base_translator, LimitSyntax};
use relq_core::{
    CompileError, Compiler, Dialect, DialectProfile, EvalMode, Expr, Query, RenderOptions,
    Rendered, Translator,
};

pub fn ansi() -> DialectProfile {
    DialectProfile::ansi()
}

pub fn render(query: &Query) -> Rendered {
    Compiler::new(&ansi())
        .to_sql(query)
        .unwrap_or_else(|e| panic!("Failed to compile: {query:?}\nError: {e}"))
}

pub fn sql(query: &Query) -> String {
    render(query).sql
}

pub fn compile_err(query: &Query) -> CompileError {
    Compiler::new(&ansi())
        .to_sql(query)
        .expect_err(&format!("Expected compile error for: {query:?}"))
}

/// Joins the lines of a statement with single spaces.
pub fn one_line(sql: &str) -> String {
    sql.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

pub fn translate_in(profile: &DialectProfile, expr: &Expr, mode: EvalMode) -> String {
    Compiler::new(profile)
        .translate(expr, mode)
        .unwrap_or_else(|e| panic!("Failed to translate: {expr:?}\nError: {e}"))
}

pub fn translate(expr: &Expr) -> String {
    translate_in(&ansi(), expr, EvalMode::Window)
}

pub fn translate_agg(expr: &Expr) -> String {
    translate_in(&ansi(), expr, EvalMode::Aggregate)
}

pub fn translate_err(expr: &Expr) -> CompileError {
    Compiler::new(&ansi())
        .translate(expr, EvalMode::Window)
        .expect_err(&format!("Expected translation error for: {expr:?}"))
}

/// Translates with explicit options and nesting level.
pub fn translate_at(expr: &Expr, options: &RenderOptions, level: usize) -> String {
    let profile = ansi();
    Translator::new(&profile, options)
        .at_level(level)
        .translate(expr)
        .unwrap_or_else(|e| panic!("Failed to translate: {expr:?}\nError: {e}"))
}

/// ANSI hooks, except that RIGHT and FULL joins must be emulated.
#[derive(Debug, Clone, Copy)]
pub struct NoOuterJoins;

impl Dialect for NoOuterJoins {
    fn name(&self) -> &'static str {
        "no-outer-joins"
    }

    fn join_support(&self, kind: JoinKind) -> JoinSupport {
        match kind {
            JoinKind::Right | JoinKind::Full => JoinSupport::Emulated,
            _ => JoinSupport::Native,
        }
    }
}

/// ANSI hooks, except for `TOP n` row caps.
#[derive(Debug, Clone, Copy)]
pub struct TopDialect;

impl Dialect for TopDialect {
    fn name(&self) -> &'static str {
        "top"
    }

    fn limit(&self, n: u64) -> LimitSyntax {
        LimitSyntax::Top(format!("TOP {n}"))
    }
}

pub fn profile_of(dialect: impl Dialect + 'static) -> DialectProfile {
    DialectProfile::new(dialect, base_translator().clone())
}
