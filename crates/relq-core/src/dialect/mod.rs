//! SQL dialect support.
//!
//! A dialect is split in two parts. The [`Dialect`] trait carries the
//! clause-syntax hooks (quoting, limit syntax, alias policy, join
//! support, EXPLAIN and friends), each with an ANSI default so that a
//! dialect overrides only what differs. The function translations live
//! in a [`SqlTranslator`](crate::translate::SqlTranslator). A
//! [`DialectProfile`] binds the two together.

mod ansi;
mod profile;
mod registry;

pub use ansi::{base_translator, AnsiDialect};
pub use profile::DialectProfile;
pub use registry::DialectRegistry;

use crate::ast::{JoinKind, JoinSupport};
use crate::error::Result;
use crate::render::SetOperator;

/// How a dialect caps the number of returned rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitSyntax {
    /// A clause after ORDER BY, e.g. `LIMIT 10` or
    /// `FETCH FIRST 10 ROWS ONLY`.
    Trailing {
        /// Clause keyword.
        keyword: &'static str,
        /// Clause body.
        fragment: String,
    },
    /// A modifier after `SELECT [DISTINCT]`, e.g. `TOP 10`.
    Top(String),
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the opening and closing identifier quote characters.
    fn identifier_quote(&self) -> (char, char) {
        ('"', '"')
    }

    /// Quotes an identifier, doubling any embedded closing quote.
    fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.identifier_quote();
        let escaped = name.replace(close, &format!("{close}{close}"));
        format!("{open}{escaped}{close}")
    }

    /// Quotes a string literal, doubling embedded single quotes.
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Returns the spelling of a boolean literal.
    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Renders an equality under which NULL matches NULL.
    fn null_safe_eq(&self, x: &str, y: &str) -> String {
        format!("{x} IS {y}")
    }

    /// Returns the row-cap syntax for `n` rows.
    fn limit(&self, n: u64) -> LimitSyntax {
        LimitSyntax::Trailing {
            keyword: "LIMIT",
            fragment: n.to_string(),
        }
    }

    /// Returns whether a table or subquery alias takes `AS`.
    fn table_alias_as(&self) -> bool {
        true
    }

    /// Returns how a join kind is handled.
    fn join_support(&self, _kind: JoinKind) -> JoinSupport {
        JoinSupport::Native
    }

    /// Returns the keyword of a set operation.
    fn set_operator(&self, op: SetOperator) -> &'static str {
        op.as_str()
    }

    /// Returns whether set operation operands are wrapped in
    /// parentheses.
    fn parenthesize_set_operands(&self) -> bool {
        true
    }

    /// Wraps a statement in the dialect's EXPLAIN form.
    ///
    /// # Errors
    ///
    /// Fails when the dialect has no EXPLAIN statement.
    fn explain(&self, sql: &str) -> Result<String> {
        Ok(format!("EXPLAIN {sql}"))
    }

    /// Renders the statistics refresh statement for a quoted table.
    ///
    /// # Errors
    ///
    /// Fails when the dialect has no such statement.
    fn analyze(&self, table: &str) -> Result<String> {
        Ok(format!("ANALYZE {table}"))
    }

    /// Renders a statement that stores the result of `sql` in a quoted
    /// table.
    ///
    /// # Errors
    ///
    /// Fails when the dialect cannot create tables from a query.
    fn save_as(&self, table: &str, sql: &str, temporary: bool) -> Result<String> {
        let kind = if temporary { "TEMPORARY TABLE" } else { "TABLE" };
        Ok(format!("CREATE {kind} {table} AS\n{sql}"))
    }
}
