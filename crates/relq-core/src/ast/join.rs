//! Join specification types.

use serde::{Deserialize, Serialize};

use super::query::{Source, TableName};

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    /// Rows with a match on both sides.
    Inner,
    /// All left rows.
    Left,
    /// All right rows.
    Right,
    /// All rows from both sides.
    Full,
    /// Left rows that have a match (projects left columns only).
    Semi,
    /// Left rows without a match (projects left columns only).
    Anti,
}

impl JoinKind {
    /// Returns the SQL join keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Semi => "SEMI JOIN",
            Self::Anti => "ANTI JOIN",
        }
    }
}

/// How NULL keys compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullEquality {
    /// NULL matches NULL.
    MatchNulls,
    /// NULL never matches anything (plain SQL `=`).
    #[default]
    NeverMatch,
}

/// How a dialect handles a join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSupport {
    /// The dialect has the join keyword.
    Native,
    /// Rewrite the join in terms of LEFT JOIN (and UNION).
    Emulated,
    /// The join cannot be expressed.
    Unsupported,
}

/// One side of a join: a row source and its column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Row source.
    pub source: Source,
    /// Column names in output order.
    pub columns: Vec<String>,
}

impl Relation {
    /// Creates a relation over a table.
    #[must_use]
    pub fn table(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            source: Source::Table(TableName::new(name)),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
        }
    }

    /// Creates a relation over an arbitrary source.
    #[must_use]
    pub fn new(source: Source, columns: Vec<String>) -> Self {
        Self { source, columns }
    }
}

/// A two-relation join request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    /// Left relation.
    pub left: Relation,
    /// Right relation.
    pub right: Relation,
    /// Join keys as (left column, right column) pairs.
    pub on: Vec<(String, String)>,
    /// Join kind.
    pub kind: JoinKind,
    /// NULL key comparison mode.
    #[serde(default)]
    pub null_equality: NullEquality,
    /// Suffixes for clashing non-key columns (left, right).
    #[serde(default = "default_suffix")]
    pub suffix: (String, String),
    /// Table aliases (left, right).
    #[serde(default = "default_aliases")]
    pub aliases: (String, String),
}

fn default_suffix() -> (String, String) {
    (String::from(".x"), String::from(".y"))
}

fn default_aliases() -> (String, String) {
    (String::from("LHS"), String::from("RHS"))
}

impl JoinSpec {
    /// Creates a join with no keys yet.
    #[must_use]
    pub fn new(kind: JoinKind, left: Relation, right: Relation) -> Self {
        Self {
            left,
            right,
            on: vec![],
            kind,
            null_equality: NullEquality::default(),
            suffix: default_suffix(),
            aliases: default_aliases(),
        }
    }

    /// Adds a key present under the same name on both sides.
    #[must_use]
    pub fn by(self, column: &str) -> Self {
        self.by_pair(column, column)
    }

    /// Adds a key with a different name on each side.
    #[must_use]
    pub fn by_pair(mut self, left: &str, right: &str) -> Self {
        self.on.push((String::from(left), String::from(right)));
        self
    }

    /// Sets the NULL key comparison mode.
    #[must_use]
    pub const fn null_equality(mut self, mode: NullEquality) -> Self {
        self.null_equality = mode;
        self
    }

    /// Sets the suffixes for clashing non-key columns.
    #[must_use]
    pub fn suffix(mut self, left: &str, right: &str) -> Self {
        self.suffix = (String::from(left), String::from(right));
        self
    }

    /// Sets the table aliases.
    #[must_use]
    pub fn aliases(mut self, left: &str, right: &str) -> Self {
        self.aliases = (String::from(left), String::from(right));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_spec_defaults() {
        let spec = JoinSpec::new(
            JoinKind::Left,
            Relation::table("a", &["x", "y"]),
            Relation::table("b", &["x", "z"]),
        )
        .by("x");

        assert_eq!(spec.on, vec![(String::from("x"), String::from("x"))]);
        assert_eq!(spec.null_equality, NullEquality::NeverMatch);
        assert_eq!(spec.suffix.0, ".x");
        assert_eq!(spec.aliases.1, "RHS");
    }
}
