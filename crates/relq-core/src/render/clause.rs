//! Clause formatting.
//!
//! A clause is printed on one line when it has a single fragment or
//! when the whole line, indentation included, fits the width limit.
//! Otherwise the keyword stands alone and each fragment gets its own
//! line one level deeper:
//!
//! ```text
//! SELECT
//!   "a",
//!   "b"
//! ```

use crate::options::RenderOptions;

/// One clause of a statement, e.g. `WHERE` and its predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlClause {
    keyword: String,
    fragments: Vec<String>,
    separator: String,
    parens: bool,
    level_offset: usize,
}

impl SqlClause {
    /// Creates a clause whose fragments are separated by commas.
    #[must_use]
    pub fn new(keyword: impl Into<String>, fragments: Vec<String>) -> Self {
        Self {
            keyword: keyword.into(),
            fragments,
            separator: String::from(","),
            parens: false,
            level_offset: 0,
        }
    }

    /// Sets the token printed between fragments, e.g. `" AND"`.
    #[must_use]
    pub fn separator(mut self, separator: &str) -> Self {
        self.separator = String::from(separator);
        self
    }

    /// Wraps the fragments in parentheses.
    #[must_use]
    pub const fn parenthesized(mut self) -> Self {
        self.parens = true;
        self
    }

    /// Renders the clause `offset` levels deeper than its statement.
    #[must_use]
    pub const fn nested(mut self, offset: usize) -> Self {
        self.level_offset = offset;
        self
    }

    /// Returns whether the clause has no fragment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns the one-line form, without indentation.
    #[must_use]
    pub fn one_line(&self) -> String {
        let body = self.fragments.join(&format!("{} ", self.separator));
        if self.parens {
            format!("{} ({body})", self.keyword)
        } else {
            format!("{} {body}", self.keyword)
        }
    }

    /// Formats the clause for a statement at `base_level`. Returns
    /// `None` for an empty clause.
    #[must_use]
    pub fn format(&self, base_level: usize, options: &RenderOptions) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let level = base_level + self.level_offset;
        let indent = options.indent_for(level);
        let line = self.one_line();
        if self.fragments.len() == 1 || options.fits(level, &line) {
            return Some(format!("{indent}{line}"));
        }

        let inner = options.indent_for(level + 1);
        let body = self
            .fragments
            .iter()
            .map(|f| format!("{inner}{f}"))
            .collect::<Vec<_>>()
            .join(&format!("{}\n", self.separator));
        if self.parens {
            Some(format!("{indent}{} (\n{body}\n{indent})", self.keyword))
        } else {
            Some(format!("{indent}{}\n{body}", self.keyword))
        }
    }
}

/// Formats clauses in order, one per line, skipping empty ones.
#[must_use]
pub fn format_clauses(clauses: &[SqlClause], base_level: usize, options: &RenderOptions) -> String {
    clauses
        .iter()
        .filter_map(|c| c.format(base_level, options))
        .collect::<Vec<_>>()
        .join("\n")
}
