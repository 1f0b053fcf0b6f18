//! MySQL / MariaDB dialect.

use relq_core::ast::{JoinKind, JoinSupport};
use relq_core::dialect::{base_translator, Dialect};
use relq_core::translate::helpers::{cast, not_supported, paste_concat_ws, prefix};
use relq_core::{DialectProfile, Result};

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> (char, char) {
        ('`', '`')
    }

    // Backslash is an escape character in MySQL string literals.
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn null_safe_eq(&self, x: &str, y: &str) -> String {
        format!("{x} <=> {y}")
    }

    fn join_support(&self, kind: JoinKind) -> JoinSupport {
        match kind {
            JoinKind::Full => JoinSupport::Emulated,
            _ => JoinSupport::Native,
        }
    }

    fn analyze(&self, table: &str) -> Result<String> {
        Ok(format!("ANALYZE TABLE {table}"))
    }
}

/// Returns the MySQL profile.
#[must_use]
pub fn profile() -> DialectProfile {
    let translator = base_translator()
        .extend()
        // `||` means OR unless PIPES_AS_CONCAT is set.
        .scalar("||", prefix("CONCAT", 2))
        .scalar("paste", paste_concat_ws(" "))
        .scalar("paste0", paste_concat_ws(""))
        .scalar("as_integer", cast("SIGNED"))
        .scalar("as_double", cast("DOUBLE"))
        .scalar("as_numeric", cast("DOUBLE"))
        .scalar("as_character", cast("CHAR"))
        .scalar("as_logical", cast("UNSIGNED"))
        .aggregate("median", not_supported("MEDIAN"))
        .window("median", not_supported("MEDIAN"))
        .build();
    DialectProfile::new(MySqlDialect::new(), translator)
}
