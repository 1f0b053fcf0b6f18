#![allow(dead_code)]

use duckdb::Connection;
use relq_core::ast::{JoinKind, JoinSupport};
use relq_core::{Compiler, Dialect, DialectProfile, JoinSpec, NullEquality, Query, Relation};

/// A joined row: key, left value, right value.
pub type JoinRow = (Option<i64>, Option<String>, Option<String>);

pub fn profile(name: &str) -> &'static DialectProfile {
    relq_dialects::registry()
        .get(name)
        .unwrap_or_else(|| panic!("Dialect not registered: {name}"))
}

pub fn sql_for(profile: &DialectProfile, query: &Query) -> String {
    Compiler::new(profile)
        .to_sql(query)
        .unwrap_or_else(|e| panic!("Failed to compile for {}: {e}", profile.name()))
        .sql
}

/// In-memory database with two small tables sharing the key `x`.
///
/// `a` and `b` overlap on key 2 and both hold a NULL key.
pub fn connection() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to open DuckDB");
    conn.execute_batch(
        "CREATE TABLE a (x INTEGER, y VARCHAR);
         CREATE TABLE b (x INTEGER, z VARCHAR);
         INSERT INTO a VALUES (1, 'a1'), (2, 'a2'), (NULL, 'an');
         INSERT INTO b VALUES (2, 'b2'), (3, 'b3'), (NULL, 'bn');
         CREATE TABLE m (g VARCHAR, v DOUBLE);
         INSERT INTO m VALUES ('p', 1.0), ('p', 2.0), ('p', 6.0), ('q', 4.0);",
    )
    .expect("Failed to seed tables");
    conn
}

/// Runs a three-column join query and returns its rows sorted.
pub fn join_rows(conn: &Connection, sql: &str) -> Vec<JoinRow> {
    let mut stmt = conn
        .prepare(sql)
        .unwrap_or_else(|e| panic!("Failed to prepare:\n{sql}\nError: {e}"));
    let mut rows: Vec<JoinRow> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .expect("Failed to run query")
        .collect::<Result<_, _>>()
        .expect("Failed to read rows");
    rows.sort();
    rows
}

pub fn join(kind: JoinKind, null_equality: NullEquality) -> Query {
    Query::join(
        JoinSpec::new(
            kind,
            Relation::table("a", &["x", "y"]),
            Relation::table("b", &["x", "z"]),
        )
        .by("x")
        .null_equality(null_equality),
    )
}

pub fn row(x: Option<i64>, y: Option<&str>, z: Option<&str>) -> JoinRow {
    (x, y.map(String::from), z.map(String::from))
}

/// ANSI hooks with RIGHT and FULL joins emulated and parenthesized set
/// operands.
#[derive(Debug, Clone, Copy)]
pub struct EmulatedOuterJoins;

impl Dialect for EmulatedOuterJoins {
    fn name(&self) -> &'static str {
        "emulated"
    }

    fn null_safe_eq(&self, x: &str, y: &str) -> String {
        format!("{x} IS NOT DISTINCT FROM {y}")
    }

    fn join_support(&self, kind: JoinKind) -> JoinSupport {
        match kind {
            JoinKind::Right | JoinKind::Full => JoinSupport::Emulated,
            _ => JoinSupport::Native,
        }
    }
}

pub fn emulated() -> DialectProfile {
    DialectProfile::new(
        EmulatedOuterJoins,
        relq_core::dialect::base_translator().clone(),
    )
}
