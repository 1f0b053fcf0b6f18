//! Join lowering.
//!
//! Turns a [`JoinSpec`] into statements the target dialect can run.
//! Inner and left joins map directly. A right join without native
//! support becomes a left join with the operands swapped, keeping the
//! select list of the native form so column identity and order do not
//! change. A full join without native support becomes the UNION of two
//! left joins, one driven by each side. UNION and not UNION ALL: a key
//! matched on both sides shows up in both branches and must be counted
//! once.

use crate::ast::{JoinKind, JoinSpec, JoinSupport};
use crate::dialect::DialectProfile;
use crate::error::{CompileError, Result};
use crate::render::{
    FromSource, JoinClause, Predicate, SelectStatement, SetOperator, Statement,
};

/// One output column of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinColumn {
    /// Output name.
    pub name: String,
    /// Which side the value comes from.
    pub origin: ColumnOrigin,
}

/// Where a join output column comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOrigin {
    /// A key pair merged into one column.
    Key {
        /// Left key column.
        left: String,
        /// Right key column.
        right: String,
    },
    /// A non-key column of the left relation.
    Left(String),
    /// A non-key column of the right relation.
    Right(String),
}

/// Computes the output columns of a join, in order.
///
/// Left columns come first, with each key merged into a single column
/// under its left name. Right non-key columns follow. A non-key name
/// present on both sides gets the requested suffixes. Semi and anti joins
/// only keep the left columns.
///
/// # Errors
///
/// Returns [`CompileError::Configuration`] when there is no key or a key
/// is not a column of its relation.
pub fn join_columns(spec: &JoinSpec) -> Result<Vec<JoinColumn>> {
    if spec.on.is_empty() {
        return Err(CompileError::Configuration(String::from(
            "a join needs at least one key",
        )));
    }
    for (left, right) in &spec.on {
        if !spec.left.columns.contains(left) {
            return Err(CompileError::Configuration(format!(
                "join key '{left}' is not a column of the left relation"
            )));
        }
        if !spec.right.columns.contains(right) {
            return Err(CompileError::Configuration(format!(
                "join key '{right}' is not a column of the right relation"
            )));
        }
    }

    let left_key = |c: &String| spec.on.iter().find(|(l, _)| l == c);
    let right_is_key = |c: &String| spec.on.iter().any(|(_, r)| r == c);
    let right_rest: Vec<&String> = spec
        .right
        .columns
        .iter()
        .filter(|c| !right_is_key(c))
        .collect();

    let mut columns = Vec::new();
    for column in &spec.left.columns {
        if let Some((left, right)) = left_key(column) {
            columns.push(JoinColumn {
                name: left.clone(),
                origin: ColumnOrigin::Key {
                    left: left.clone(),
                    right: right.clone(),
                },
            });
        } else {
            let name = if right_rest.contains(&column) {
                format!("{column}{}", spec.suffix.0)
            } else {
                column.clone()
            };
            columns.push(JoinColumn {
                name,
                origin: ColumnOrigin::Left(column.clone()),
            });
        }
    }

    if matches!(spec.kind, JoinKind::Semi | JoinKind::Anti) {
        return Ok(columns);
    }

    for column in right_rest {
        let name = if spec.left.columns.contains(column) {
            format!("{column}{}", spec.suffix.1)
        } else {
            column.clone()
        };
        columns.push(JoinColumn {
            name,
            origin: ColumnOrigin::Right(column.clone()),
        });
    }
    Ok(columns)
}

/// Lowers a join into a statement.
///
/// `left` and `right` are the compiled sources of the two relations;
/// their aliases are replaced by the requested ones.
///
/// # Errors
///
/// Returns [`CompileError::UnsupportedConstruct`] when the dialect
/// cannot express the join kind at all, and the errors of
/// [`join_columns`].
pub fn lower_join(
    spec: &JoinSpec,
    profile: &DialectProfile,
    left: FromSource,
    right: FromSource,
) -> Result<Statement> {
    let columns = join_columns(spec)?;
    let lowering = Lowering {
        spec,
        profile,
        left: with_alias(left, &spec.aliases.0),
        right: with_alias(right, &spec.aliases.1),
    };

    match spec.kind {
        JoinKind::Semi => Ok(lowering.exists(&columns, false)),
        JoinKind::Anti => Ok(lowering.exists(&columns, true)),
        kind => match profile.dialect().join_support(kind) {
            JoinSupport::Unsupported => Err(CompileError::unsupported(
                profile.name(),
                kind.as_str(),
            )),
            JoinSupport::Emulated if kind == JoinKind::Right => {
                Ok(lowering.swapped_left(&columns, kind).into())
            }
            JoinSupport::Emulated if kind == JoinKind::Full => {
                Ok(Statement::SetOperation {
                    op: SetOperator::Union,
                    left: Box::new(lowering.native(&columns, JoinKind::Left, kind).into()),
                    right: Box::new(lowering.swapped_left(&columns, kind).into()),
                })
            }
            JoinSupport::Native | JoinSupport::Emulated => {
                Ok(lowering.native(&columns, kind, kind).into())
            }
        },
    }
}

fn with_alias(source: FromSource, new_alias: &str) -> FromSource {
    match source {
        FromSource::Table { name, .. } => FromSource::Table {
            name,
            alias: Some(String::from(new_alias)),
        },
        FromSource::Subquery { statement, .. } => FromSource::Subquery {
            statement,
            alias: String::from(new_alias),
        },
    }
}

struct Lowering<'a> {
    spec: &'a JoinSpec,
    profile: &'a DialectProfile,
    left: FromSource,
    right: FromSource,
}

impl Lowering<'_> {
    fn qualified(&self, alias: &str, column: &str) -> String {
        let dialect = self.profile.dialect();
        format!(
            "{}.{}",
            dialect.quote_identifier(alias),
            dialect.quote_identifier(column)
        )
    }

    fn left_col(&self, column: &str) -> String {
        self.qualified(&self.spec.aliases.0, column)
    }

    fn right_col(&self, column: &str) -> String {
        self.qualified(&self.spec.aliases.1, column)
    }

    /// Select list for the requested join kind. `kind` decides which
    /// side provides the merged key values.
    fn select_list(&self, columns: &[JoinColumn], kind: JoinKind) -> Vec<String> {
        let dialect = self.profile.dialect();
        columns
            .iter()
            .map(|column| {
                let expr = match &column.origin {
                    ColumnOrigin::Key { left, right } => match kind {
                        JoinKind::Right => self.right_col(right),
                        JoinKind::Full => format!(
                            "COALESCE({}, {})",
                            self.left_col(left),
                            self.right_col(right)
                        ),
                        _ => self.left_col(left),
                    },
                    ColumnOrigin::Left(c) => self.left_col(c),
                    ColumnOrigin::Right(c) => self.right_col(c),
                };
                format!("{expr} AS {}", dialect.quote_identifier(&column.name))
            })
            .collect()
    }

    fn key_predicates(&self) -> Vec<String> {
        self.spec
            .on
            .iter()
            .map(|(l, r)| {
                self.profile
                    .matches(&self.left_col(l), &self.right_col(r), self.spec.null_equality)
            })
            .collect()
    }

    /// `FROM left <join> right`, with the select list of `requested`.
    fn native(&self, columns: &[JoinColumn], join: JoinKind, requested: JoinKind) -> SelectStatement {
        SelectStatement {
            joins: vec![JoinClause {
                kind: join,
                source: self.right.clone(),
                on: self.key_predicates(),
            }],
            ..SelectStatement::new(self.select_list(columns, requested), self.left.clone())
        }
    }

    /// `FROM right LEFT JOIN left`, with the select list of `requested`.
    fn swapped_left(&self, columns: &[JoinColumn], requested: JoinKind) -> SelectStatement {
        SelectStatement {
            joins: vec![JoinClause {
                kind: JoinKind::Left,
                source: self.left.clone(),
                on: self.key_predicates(),
            }],
            ..SelectStatement::new(self.select_list(columns, requested), self.right.clone())
        }
    }

    /// `FROM left WHERE [NOT] EXISTS (SELECT 1 FROM right WHERE keys)`.
    fn exists(&self, columns: &[JoinColumn], negated: bool) -> Statement {
        let probe = SelectStatement {
            filter: self
                .key_predicates()
                .into_iter()
                .map(Predicate::Sql)
                .collect(),
            ..SelectStatement::new(vec![String::from("1")], self.right.clone())
        };
        SelectStatement {
            filter: vec![Predicate::Exists {
                negated,
                statement: Box::new(probe.into()),
            }],
            ..SelectStatement::new(
                self.select_list(columns, JoinKind::Left),
                self.left.clone(),
            )
        }
        .into()
    }
}
