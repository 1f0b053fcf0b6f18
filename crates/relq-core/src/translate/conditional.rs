//! CASE expression compilation.
//!
//! The rendered CASE stays on one line while it fits the width limit at
//! the translator's level. Otherwise each WHEN/ELSE branch gets its own
//! line one level deeper and `END` returns to the translator's level.

use crate::error::{CompileError, Result};

use super::{named, positional, SqlArg, Translator};

/// Lays out a CASE expression from its rendered branches.
fn case_expr(tr: &Translator<'_>, subject: Option<&str>, branches: &[String]) -> String {
    let head = subject.map_or_else(|| String::from("CASE"), |s| format!("CASE {s}"));
    let line = format!("{head} {} END", branches.join(" "));
    if tr.options().fits(tr.level(), &line) {
        return line;
    }

    let options = tr.options();
    let inner = options.indent_for(tr.level() + 1);
    let mut sql = head;
    for branch in branches {
        sql.push('\n');
        sql.push_str(&inner);
        sql.push_str(branch);
    }
    sql.push('\n');
    sql.push_str(&options.indent_for(tr.level()));
    sql.push_str("END");
    sql
}

/// `if_else(condition, true, [false], [missing])`.
///
/// `missing` may also be passed by name. When it is absent it takes the
/// value of `false`, and a `false` equal to `missing` collapses into a
/// single ELSE branch. With only `true`, rows where the condition is not
/// true get NULL.
///
/// # Errors
///
/// Returns [`CompileError::ArityMismatch`] unless there are two to four
/// positional arguments.
pub fn if_else(tr: &Translator<'_>, args: &[SqlArg<'_>]) -> Result<String> {
    let pos = positional(args);
    if !(2..=4).contains(&pos.len()) {
        return Err(CompileError::arity("if_else", "2..=4", pos.len()));
    }
    let condition = pos[0];
    let yes = pos[1];
    let no = pos.get(2).copied();
    let missing = pos.get(3).copied().or_else(|| named(args, "missing"));

    let mut branches = vec![format!("WHEN {} THEN {}", condition.sql, yes.sql)];
    match (no, missing) {
        (None, None) => {}
        (Some(no), None) => branches.push(format!("ELSE {}", no.sql)),
        (Some(no), Some(missing)) if no.sql == missing.sql => {
            branches.push(format!("ELSE {}", no.sql));
        }
        (Some(no), Some(missing)) => {
            branches.push(format!("WHEN NOT {} THEN {}", condition.operand(), no.sql));
            branches.push(format!(
                "WHEN {} IS NULL THEN {}",
                condition.operand(),
                missing.sql
            ));
        }
        (None, Some(missing)) => branches.push(format!(
            "WHEN {} IS NULL THEN {}",
            condition.operand(),
            missing.sql
        )),
    }
    Ok(case_expr(tr, None, &branches))
}

/// `switch(key, label = result, ..., [fallback])`.
///
/// Labelled entries match the key against the label as a string. At
/// most one unlabelled entry is allowed; it becomes the ELSE branch.
///
/// # Errors
///
/// Returns [`CompileError::Configuration`] when there is no entry or
/// more than one unlabelled entry, and [`CompileError::ArityMismatch`]
/// when the key is missing.
pub fn switch(tr: &Translator<'_>, args: &[SqlArg<'_>]) -> Result<String> {
    let pos = positional(args);
    let Some(key) = pos.first() else {
        return Err(CompileError::arity("switch", "at least 1", 0));
    };
    if pos.len() > 2 {
        return Err(CompileError::Configuration(format!(
            "switch accepts at most one unlabelled branch, found {}",
            pos.len() - 1
        )));
    }

    let mut branches: Vec<String> = args
        .iter()
        .filter_map(|a| {
            a.name.map(|label| {
                format!(
                    "WHEN {} THEN {}",
                    tr.dialect().quote_string(label),
                    a.sql
                )
            })
        })
        .collect();
    if let Some(fallback) = pos.get(1) {
        branches.push(format!("ELSE {}", fallback.sql));
    }
    if branches.is_empty() {
        return Err(CompileError::Configuration(String::from(
            "switch needs at least one branch",
        )));
    }
    Ok(case_expr(tr, Some(&key.sql), &branches))
}

/// `case_when(cond1, value1, cond2, value2, ..., default = value)`.
///
/// # Errors
///
/// Returns [`CompileError::Configuration`] when the conditions and
/// values do not pair up or there is no pair at all.
pub fn case_when(tr: &Translator<'_>, args: &[SqlArg<'_>]) -> Result<String> {
    let pos = positional(args);
    if pos.is_empty() || pos.len() % 2 != 0 {
        return Err(CompileError::Configuration(format!(
            "case_when needs condition/value pairs, found {} argument(s)",
            pos.len()
        )));
    }
    let mut branches: Vec<String> = pos
        .chunks(2)
        .map(|pair| format!("WHEN {} THEN {}", pair[0].sql, pair[1].sql))
        .collect();
    if let Some(default) = named(args, "default") {
        branches.push(format!("ELSE {}", default.sql));
    }
    Ok(case_expr(tr, None, &branches))
}
