//! Statement model and renderer.
//!
//! Statements hold already translated fragments. The renderer turns
//! them into clauses, applies the dialect's syntax hooks and lays out
//! nested subqueries one level deeper than their parent.

use std::fmt;

use tracing::warn;

use crate::ast::{JoinKind, TableName};
use crate::dialect::{DialectProfile, LimitSyntax};
use crate::error::{CompileError, Result};
use crate::options::RenderOptions;

use super::clause::{format_clauses, SqlClause};

/// Set operation keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    /// Distinct union.
    Union,
    /// Union keeping duplicates.
    UnionAll,
    /// Rows present in both operands.
    Intersect,
    /// Rows of the left operand missing from the right one.
    Except,
}

impl SetOperator {
    /// Returns the ANSI keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// A row source in a FROM or JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub enum FromSource {
    /// A table, optionally aliased.
    Table {
        /// Table name.
        name: TableName,
        /// Alias.
        alias: Option<String>,
    },
    /// A nested statement.
    Subquery {
        /// The statement.
        statement: Box<Statement>,
        /// Alias.
        alias: String,
    },
}

/// A JOIN clause following FROM.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// Join kind (inner, left, right or full).
    pub kind: JoinKind,
    /// The joined source.
    pub source: FromSource,
    /// Rendered key predicates, combined with AND.
    pub on: Vec<String>,
}

/// A WHERE predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A rendered condition.
    Sql(String),
    /// `[NOT] EXISTS (subquery)`.
    Exists {
        /// Whether the test is negated.
        negated: bool,
        /// The correlated subquery.
        statement: Box<Statement>,
    },
}

/// A SELECT statement made of rendered fragments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// Select list.
    pub select: Vec<String>,
    /// Whether DISTINCT applies.
    pub distinct: bool,
    /// Primary source.
    pub from: Option<FromSource>,
    /// Joins applied to the primary source.
    pub joins: Vec<JoinClause>,
    /// WHERE predicates, combined with AND.
    pub filter: Vec<Predicate>,
    /// GROUP BY expressions.
    pub group_by: Vec<String>,
    /// HAVING conditions, combined with AND.
    pub having: Vec<String>,
    /// ORDER BY keys.
    pub order_by: Vec<String>,
    /// Row cap.
    pub limit: Option<u64>,
}

impl SelectStatement {
    /// Creates a statement selecting `select` from `from`.
    #[must_use]
    pub fn new(select: Vec<String>, from: FromSource) -> Self {
        Self {
            select,
            from: Some(from),
            ..Self::default()
        }
    }
}

/// A complete statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A single SELECT.
    Select(Box<SelectStatement>),
    /// Two statements combined by a set operator.
    SetOperation {
        /// Operator.
        op: SetOperator,
        /// Left operand.
        left: Box<Statement>,
        /// Right operand.
        right: Box<Statement>,
    },
}

impl From<SelectStatement> for Statement {
    fn from(select: SelectStatement) -> Self {
        Self::Select(Box::new(select))
    }
}

/// A non-fatal event raised while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
    /// A subquery's ORDER BY was dropped because it had no LIMIT.
    DroppedSubqueryOrder {
        /// The dropped keys.
        order_by: Vec<String>,
    },
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DroppedSubqueryOrder { order_by } => write!(
                f,
                "ORDER BY {} ignored in subquery without LIMIT",
                order_by.join(", ")
            ),
        }
    }
}

/// Rendered SQL text and the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// SQL text.
    pub sql: String,
    /// Warnings in the order they were raised.
    pub warnings: Vec<CompileWarning>,
}

/// Turns statements into SQL text for one dialect.
#[derive(Debug)]
pub struct Renderer<'a> {
    profile: &'a DialectProfile,
    options: &'a RenderOptions,
    warnings: Vec<CompileWarning>,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer.
    #[must_use]
    pub const fn new(profile: &'a DialectProfile, options: &'a RenderOptions) -> Self {
        Self {
            profile,
            options,
            warnings: Vec::new(),
        }
    }

    /// Renders an outermost statement.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::EmptyProjection`] when any SELECT in the
    /// tree has an empty select list.
    pub fn render(mut self, statement: &Statement) -> Result<Rendered> {
        let sql = self.statement(statement, 0, false)?;
        Ok(Rendered {
            sql,
            warnings: self.warnings,
        })
    }

    fn statement(&mut self, statement: &Statement, level: usize, nested: bool) -> Result<String> {
        match statement {
            Statement::Select(select) => self.select(select, level, nested),
            Statement::SetOperation { op, left, right } => {
                let profile = self.profile;
                let dialect = profile.dialect();
                let indent = self.options.indent_for(level);
                let keyword = dialect.set_operator(*op);
                if dialect.parenthesize_set_operands() {
                    let left = self.statement(left, level + 1, true)?;
                    let right = self.statement(right, level + 1, true)?;
                    Ok(format!(
                        "{indent}(\n{left}\n{indent})\n{indent}{keyword}\n{indent}(\n{right}\n{indent})"
                    ))
                } else {
                    let left = self.statement(left, level, true)?;
                    let right = self.statement(right, level, true)?;
                    Ok(format!("{left}\n{indent}{keyword}\n{right}"))
                }
            }
        }
    }

    fn select(&mut self, select: &SelectStatement, level: usize, nested: bool) -> Result<String> {
        if select.select.is_empty() {
            return Err(CompileError::EmptyProjection);
        }
        let profile = self.profile;
        let dialect = profile.dialect();

        let mut keyword = String::from("SELECT");
        if select.distinct {
            keyword.push_str(" DISTINCT");
        }
        let mut trailing_limit = None;
        if let Some(n) = select.limit {
            match dialect.limit(n) {
                LimitSyntax::Top(top) => {
                    keyword.push(' ');
                    keyword.push_str(&top);
                }
                LimitSyntax::Trailing {
                    keyword: limit,
                    fragment,
                } => {
                    trailing_limit = Some(SqlClause::new(limit, vec![fragment]));
                }
            }
        }

        let mut clauses = vec![SqlClause::new(keyword, select.select.clone())];
        if let Some(from) = &select.from {
            let source = self.source(from, level)?;
            clauses.push(SqlClause::new("FROM", vec![source]));
        }
        for join in &select.joins {
            let source = self.source(&join.source, level)?;
            clauses.push(SqlClause::new(join.kind.as_str(), vec![source]));
            clauses.push(
                SqlClause::new("ON", join.on.clone())
                    .separator(" AND")
                    .parenthesized()
                    .nested(1),
            );
        }

        let mut filter = Vec::with_capacity(select.filter.len());
        for predicate in &select.filter {
            filter.push(self.predicate(predicate, level)?);
        }
        clauses.push(SqlClause::new("WHERE", filter).separator(" AND"));
        clauses.push(SqlClause::new("GROUP BY", select.group_by.clone()));
        clauses.push(
            SqlClause::new(
                "HAVING",
                select.having.iter().map(|h| format!("({h})")).collect(),
            )
            .separator(" AND"),
        );

        if nested && select.limit.is_none() && !select.order_by.is_empty() {
            warn!(
                order_by = %select.order_by.join(", "),
                "dropping ORDER BY from subquery without LIMIT"
            );
            self.warnings.push(CompileWarning::DroppedSubqueryOrder {
                order_by: select.order_by.clone(),
            });
        } else {
            clauses.push(SqlClause::new("ORDER BY", select.order_by.clone()));
        }
        clauses.extend(trailing_limit);

        Ok(format_clauses(&clauses, level, self.options))
    }

    fn source(&mut self, source: &FromSource, level: usize) -> Result<String> {
        match source {
            FromSource::Table { name, alias } => {
                let table = self.profile.table_name(name);
                Ok(match alias {
                    Some(alias) => self.aliased(&table, alias),
                    None => table,
                })
            }
            FromSource::Subquery { statement, alias } => {
                let inner = self.statement(statement, level + 1, true)?;
                let indent = self.options.indent_for(level);
                Ok(self.aliased(&format!("(\n{inner}\n{indent})"), alias))
            }
        }
    }

    fn predicate(&mut self, predicate: &Predicate, level: usize) -> Result<String> {
        match predicate {
            Predicate::Sql(sql) => Ok(format!("({sql})")),
            Predicate::Exists { negated, statement } => {
                let inner = self.statement(statement, level + 1, true)?;
                let indent = self.options.indent_for(level);
                let not = if *negated { "NOT " } else { "" };
                Ok(format!("{not}EXISTS (\n{inner}\n{indent})"))
            }
        }
    }

    fn aliased(&self, source: &str, alias: &str) -> String {
        let dialect = self.profile.dialect();
        let alias = dialect.quote_identifier(alias);
        if dialect.table_alias_as() {
            format!("{source} AS {alias}")
        } else {
            format!("{source} {alias}")
        }
    }
}
