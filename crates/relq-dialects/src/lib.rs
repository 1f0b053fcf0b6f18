//! # relq-dialects
//!
//! Backend dialect profiles for `relq-core`.
//!
//! Every profile pairs a [`Dialect`](relq_core::Dialect) implementation
//! with translation tables that inherit from the ANSI baseline and only
//! override what the backend spells differently.
//!
//! # How the backends differ
//!
//! - **PostgreSQL**: null-safe equality is `IS NOT DISTINCT FROM`.
//!   Two-argument `ROUND` only exists for `NUMERIC`, so the value is
//!   cast first.
//! - **DuckDB**: inherits the PostgreSQL tables, restores the plain
//!   `ROUND` and adds `MEDIAN`.
//! - **MySQL**: backtick identifiers, backslash escapes in strings,
//!   `<=>` for null-safe equality, `CONCAT_WS` for pasting. No
//!   `FULL JOIN`, so it is emulated with a `UNION` of left joins.
//! - **SQLite**: no `RIGHT` or `FULL JOIN` (emulated), bare set
//!   operation operands, `EXPLAIN QUERY PLAN`, and no standard
//!   deviation, variance or median aggregates.
//! - **SQL Server**: bracket identifiers, `SELECT TOP n`, `1`/`0`
//!   booleans, `+` concatenation, `UPDATE STATISTICS` and
//!   `SELECT .. INTO` tables. There is no plain-text `EXPLAIN`.
//! - **Oracle**: `FETCH FIRST n ROWS ONLY`, no `AS` before table
//!   aliases, `MINUS` instead of `EXCEPT`, `DECODE` for null-safe
//!   equality and global temporary tables.
//!
//! ## Example
//!
//! ```rust
//! use relq_core::{Compiler, Expr, Query};
//!
//! let profile = relq_dialects::registry().resolve(Some("mysql"));
//! let query = Query::table("people")
//!     .filter(Expr::column("age").gt(Expr::integer(30)))
//!     .limit(10);
//! let sql = Compiler::new(profile).to_sql(&query).unwrap().sql;
//! assert_eq!(sql, "SELECT *\nFROM `people`\nWHERE (`age` > 30)\nLIMIT 10");
//! ```

use std::sync::OnceLock;

use relq_core::DialectRegistry;

pub mod duckdb;
pub mod mssql;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;

pub use self::duckdb::DuckDbDialect;
pub use self::mssql::MsSqlDialect;
pub use self::mysql::MySqlDialect;
pub use self::oracle::OracleDialect;
pub use self::postgres::PostgresDialect;
pub use self::sqlite::SqliteDialect;

/// Returns a registry holding the ANSI profile and every backend of
/// this crate.
///
/// The registry is built on first use. Concurrent first calls build it
/// exactly once.
#[must_use]
pub fn registry() -> &'static DialectRegistry {
    static REGISTRY: OnceLock<DialectRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        tracing::debug!("building dialect registry");
        DialectRegistry::new()
            .with(self::duckdb::profile())
            .with(mssql::profile())
            .with(mysql::profile())
            .with(oracle::profile())
            .with(postgres::profile())
            .with(sqlite::profile())
    })
}
