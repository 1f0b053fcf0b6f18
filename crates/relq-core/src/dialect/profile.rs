//! A resolved dialect: hooks plus translation tables.

use std::fmt;
use std::sync::Arc;

use crate::ast::{NullEquality, TableName};
use crate::translate::SqlTranslator;

use super::{base_translator, AnsiDialect, Dialect};

/// One SQL dialect as seen by the compiler.
///
/// Profiles are built once and shared read-only afterwards; cloning
/// only bumps reference counts.
#[derive(Clone)]
pub struct DialectProfile {
    dialect: Arc<dyn Dialect>,
    translator: Arc<SqlTranslator>,
}

impl DialectProfile {
    /// Creates a profile from hooks and translation tables.
    #[must_use]
    pub fn new(dialect: impl Dialect + 'static, translator: SqlTranslator) -> Self {
        Self {
            dialect: Arc::new(dialect),
            translator: Arc::new(translator),
        }
    }

    /// Returns the ANSI baseline profile.
    #[must_use]
    pub fn ansi() -> Self {
        Self::new(AnsiDialect::new(), base_translator().clone())
    }

    /// Returns the dialect name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.dialect.name()
    }

    /// Returns the clause-syntax hooks.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the translation tables.
    #[must_use]
    pub fn translator(&self) -> &SqlTranslator {
        &self.translator
    }

    /// Quotes a possibly schema-qualified table name.
    #[must_use]
    pub fn table_name(&self, name: &TableName) -> String {
        match &name.schema {
            Some(schema) => format!(
                "{}.{}",
                self.dialect.quote_identifier(schema),
                self.dialect.quote_identifier(&name.name)
            ),
            None => self.dialect.quote_identifier(&name.name),
        }
    }

    /// Renders key equality `x = y` under a null-equality mode.
    #[must_use]
    pub fn matches(&self, x: &str, y: &str, mode: NullEquality) -> String {
        match mode {
            NullEquality::MatchNulls => self.dialect.null_safe_eq(x, y),
            NullEquality::NeverMatch => format!("{x} = {y}"),
        }
    }
}

impl Default for DialectProfile {
    fn default() -> Self {
        Self::ansi()
    }
}

impl fmt::Debug for DialectProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectProfile")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_modes() {
        let profile = DialectProfile::ansi();
        assert_eq!(
            profile.matches("a", "b", NullEquality::MatchNulls),
            "a IS b"
        );
        assert_eq!(
            profile.matches("a", "b", NullEquality::NeverMatch),
            "a = b"
        );
    }

    #[test]
    fn test_table_name_quoting() {
        let profile = DialectProfile::ansi();
        assert_eq!(profile.table_name(&TableName::new("t")), "\"t\"");
        assert_eq!(
            profile.table_name(&TableName::qualified("s", "t")),
            "\"s\".\"t\""
        );
    }

    #[test]
    fn test_ansi_profile() {
        let profile = DialectProfile::default();
        assert_eq!(profile.name(), "ansi");
        assert!(format!("{profile:?}").contains("ansi"));
    }
}
