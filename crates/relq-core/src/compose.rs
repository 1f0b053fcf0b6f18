//! Query composition: the compiler entry point.
//!
//! A [`Compiler`] is bound to one dialect profile and a set of render
//! options. It turns a logical [`Query`] into a [`Statement`], renders
//! statements to text and wraps them in the dialect's EXPLAIN, ANALYZE
//! and save-as forms. All state used while compiling (the subquery
//! alias counter among it) lives in the call, so one compiler can be
//! shared between threads.

use crate::ast::{EvalMode, Expr, JoinSpec, OrderKey, Projection, Query, Source, TableName};
use crate::dialect::DialectProfile;
use crate::error::Result;
use crate::join::lower_join;
use crate::options::RenderOptions;
use crate::render::{
    FromSource, Predicate, Rendered, Renderer, SelectStatement, SetOperator, Statement,
};
use crate::translate::{Translator, WindowContext};

/// Compiles queries for one dialect.
#[derive(Debug, Clone)]
pub struct Compiler<'a> {
    profile: &'a DialectProfile,
    options: RenderOptions,
}

impl<'a> Compiler<'a> {
    /// Creates a compiler with default render options.
    #[must_use]
    pub fn new(profile: &'a DialectProfile) -> Self {
        Self {
            profile,
            options: RenderOptions::default(),
        }
    }

    /// Replaces the render options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the dialect profile.
    #[must_use]
    pub const fn profile(&self) -> &'a DialectProfile {
        self.profile
    }

    /// Returns the render options.
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Translates a standalone expression.
    ///
    /// # Errors
    ///
    /// Returns the translation error, if any.
    pub fn translate(&self, expr: &Expr, mode: EvalMode) -> Result<String> {
        Translator::new(self.profile, &self.options)
            .with_mode(mode)
            .translate(expr)
    }

    /// Builds the statement for a query.
    ///
    /// # Errors
    ///
    /// Returns the first translation or join lowering error.
    pub fn compile(&self, query: &Query) -> Result<Statement> {
        self.composer().query(query, 0)
    }

    /// Lowers a join into a statement.
    ///
    /// # Errors
    ///
    /// See [`lower_join`].
    pub fn lower_join(&self, spec: &JoinSpec) -> Result<Statement> {
        self.composer().join(spec, 0)
    }

    /// Renders a statement.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::EmptyProjection`](crate::CompileError::EmptyProjection)
    /// for a SELECT without columns.
    pub fn render(&self, statement: &Statement) -> Result<Rendered> {
        Renderer::new(self.profile, &self.options).render(statement)
    }

    /// Compiles and renders a query.
    ///
    /// # Errors
    ///
    /// Returns any compile or render error.
    pub fn to_sql(&self, query: &Query) -> Result<Rendered> {
        self.render(&self.compile(query)?)
    }

    /// Combines two queries with a set operator.
    ///
    /// # Errors
    ///
    /// Returns any compile or render error.
    pub fn set_operation(&self, op: SetOperator, left: &Query, right: &Query) -> Result<Rendered> {
        let mut composer = self.composer();
        let statement = Statement::SetOperation {
            op,
            left: Box::new(composer.query(left, 1)?),
            right: Box::new(composer.query(right, 1)?),
        };
        self.render(&statement)
    }

    /// Renders the dialect's EXPLAIN statement for a query.
    ///
    /// # Errors
    ///
    /// Returns any compile or render error, or
    /// [`CompileError::UnsupportedConstruct`](crate::CompileError::UnsupportedConstruct)
    /// when the dialect cannot explain queries.
    pub fn explain(&self, query: &Query) -> Result<Rendered> {
        let rendered = self.to_sql(query)?;
        Ok(Rendered {
            sql: self.profile.dialect().explain(&rendered.sql)?,
            warnings: rendered.warnings,
        })
    }

    /// Renders the dialect's statistics refresh statement for a table.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnsupportedConstruct`](crate::CompileError::UnsupportedConstruct)
    /// when the dialect has none.
    pub fn analyze(&self, table: &TableName) -> Result<String> {
        self.profile
            .dialect()
            .analyze(&self.profile.table_name(table))
    }

    /// Renders a statement that stores the result of a query in a new
    /// table.
    ///
    /// # Errors
    ///
    /// Returns any compile or render error, or the dialect's refusal.
    pub fn save_as(&self, query: &Query, table: &TableName, temporary: bool) -> Result<Rendered> {
        let rendered = self.to_sql(query)?;
        Ok(Rendered {
            sql: self.profile.dialect().save_as(
                &self.profile.table_name(table),
                &rendered.sql,
                temporary,
            )?,
            warnings: rendered.warnings,
        })
    }

    const fn composer(&self) -> Composer<'_> {
        Composer {
            profile: self.profile,
            options: &self.options,
            aliases: 0,
        }
    }
}

/// State of one compilation call.
struct Composer<'a> {
    profile: &'a DialectProfile,
    options: &'a RenderOptions,
    aliases: usize,
}

impl Composer<'_> {
    fn next_alias(&mut self) -> String {
        self.aliases += 1;
        format!("q{:02}", self.aliases)
    }

    fn query(&mut self, query: &Query, depth: usize) -> Result<Statement> {
        if let Source::Join(spec) = &query.source {
            if query.is_passthrough() {
                return self.join(spec, depth);
            }
        }
        let from = self.source(&query.source, depth)?;

        let plain = Translator::new(self.profile, self.options).at_level(depth + 1);
        let rows = plain.clone().row_level();
        let group_by = query
            .group_by
            .iter()
            .map(|e| rows.translate(e))
            .collect::<Result<Vec<_>>>()?;
        let aggregate = query.mode == EvalMode::Aggregate;
        let window_order = if query.window_order.is_empty() && !aggregate {
            order_keys(&plain, &query.order_by)?
        } else {
            order_keys(&plain, &query.window_order)?
        };

        let tr = plain.clone().with_mode(query.mode).with_window(WindowContext {
            partition: if aggregate { vec![] } else { group_by.clone() },
            order: window_order,
            frame: query.window_frame,
        });
        // Summaries sort on their aggregates, not on windows over groups.
        let order_by = order_keys(if aggregate { &tr } else { &plain }, &query.order_by)?;

        let mut select = if aggregate { group_by.clone() } else { vec![] };
        match &query.projection {
            Projection::All if !aggregate => select.push(String::from("*")),
            Projection::All => {}
            Projection::Items(items) => {
                for item in items {
                    let sql = tr.translate(&item.expr)?;
                    select.push(match &item.alias {
                        Some(alias) if item.expr.as_bare_column() != Some(alias.as_str()) => {
                            format!(
                                "{sql} AS {}",
                                self.profile.dialect().quote_identifier(alias)
                            )
                        }
                        _ => sql,
                    });
                }
            }
        }

        let filter = query
            .filter
            .iter()
            .map(|e| rows.translate(e).map(Predicate::Sql))
            .collect::<Result<Vec<_>>>()?;
        let having = query
            .having
            .iter()
            .map(|e| tr.translate(e))
            .collect::<Result<Vec<_>>>()?;

        Ok(SelectStatement {
            select,
            distinct: query.distinct,
            from: Some(from),
            joins: vec![],
            filter,
            group_by: if aggregate { group_by } else { vec![] },
            having,
            order_by,
            limit: query.limit,
        }
        .into())
    }

    fn source(&mut self, source: &Source, depth: usize) -> Result<FromSource> {
        match source {
            Source::Table(name) => Ok(FromSource::Table {
                name: name.clone(),
                alias: None,
            }),
            Source::Query(inner) => Ok(FromSource::Subquery {
                statement: Box::new(self.query(inner, depth + 1)?),
                alias: self.next_alias(),
            }),
            Source::Join(spec) => Ok(FromSource::Subquery {
                statement: Box::new(self.join(spec, depth + 1)?),
                alias: self.next_alias(),
            }),
        }
    }

    // The lowered join replaces the relations' aliases, so nested
    // sources do not take a number from the counter.
    fn join(&mut self, spec: &JoinSpec, depth: usize) -> Result<Statement> {
        let left = self.relation(&spec.left.source, depth)?;
        let right = self.relation(&spec.right.source, depth)?;
        lower_join(spec, self.profile, left, right)
    }

    fn relation(&mut self, source: &Source, depth: usize) -> Result<FromSource> {
        match source {
            Source::Table(name) => Ok(FromSource::Table {
                name: name.clone(),
                alias: None,
            }),
            Source::Query(inner) => Ok(FromSource::Subquery {
                statement: Box::new(self.query(inner, depth + 1)?),
                alias: String::new(),
            }),
            Source::Join(spec) => Ok(FromSource::Subquery {
                statement: Box::new(self.join(spec, depth + 1)?),
                alias: String::new(),
            }),
        }
    }
}

fn order_keys(tr: &Translator<'_>, keys: &[OrderKey]) -> Result<Vec<String>> {
    keys.iter()
        .map(|key| {
            let sql = tr.translate(&key.expr)?;
            Ok(if key.descending {
                format!("{sql} DESC")
            } else {
                sql
            })
        })
        .collect()
}
