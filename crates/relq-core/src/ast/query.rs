//! Logical query types consumed by the query composer.

use serde::{Deserialize, Serialize};

use super::expression::Expr;
use super::join::JoinSpec;

/// Translation mode of a query's expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalMode {
    /// Summary context: aggregates collapse groups and GROUP BY is
    /// emitted.
    Aggregate,
    /// Row-wise context: aggregates become window functions partitioned
    /// by the grouping.
    #[default]
    Window,
}

/// A possibly schema-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableName {
    /// Schema name (optional).
    #[serde(default)]
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableName {
    /// Creates an unqualified table name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Creates a schema-qualified table name.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

/// An ORDER BY key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderKey {
    /// The expression to order by.
    pub expr: Expr,
    /// Whether the order is descending.
    #[serde(default)]
    pub descending: bool,
}

impl OrderKey {
    /// Ascending key.
    #[must_use]
    pub const fn asc(expr: Expr) -> Self {
        Self {
            expr,
            descending: false,
        }
    }

    /// Descending key.
    #[must_use]
    pub const fn desc(expr: Expr) -> Self {
        Self {
            expr,
            descending: true,
        }
    }
}

/// One bound of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameBound {
    /// UNBOUNDED PRECEDING.
    UnboundedPreceding,
    /// n PRECEDING.
    Preceding(u64),
    /// CURRENT ROW.
    CurrentRow,
    /// n FOLLOWING.
    Following(u64),
    /// UNBOUNDED FOLLOWING.
    UnboundedFollowing,
}

impl FrameBound {
    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::UnboundedPreceding => String::from("UNBOUNDED PRECEDING"),
            Self::Preceding(n) => format!("{n} PRECEDING"),
            Self::CurrentRow => String::from("CURRENT ROW"),
            Self::Following(n) => format!("{n} FOLLOWING"),
            Self::UnboundedFollowing => String::from("UNBOUNDED FOLLOWING"),
        }
    }
}

/// A ROWS window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Start of the frame.
    pub start: FrameBound,
    /// End of the frame.
    pub end: FrameBound,
}

impl Frame {
    /// All rows up to and including the current one.
    #[must_use]
    pub const fn cumulative() -> Self {
        Self {
            start: FrameBound::UnboundedPreceding,
            end: FrameBound::CurrentRow,
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!(
            "ROWS BETWEEN {} AND {}",
            self.start.to_sql(),
            self.end.to_sql()
        )
    }
}

/// A projected expression with an optional output name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    /// The expression.
    pub expr: Expr,
    /// Output column name.
    #[serde(default)]
    pub alias: Option<String>,
}

impl SelectItem {
    /// Creates an unaliased item.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates an aliased item.
    #[must_use]
    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// The select list of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// `SELECT *`.
    All,
    /// Explicit items. Must not be empty.
    Items(Vec<SelectItem>),
}

/// Where a query reads its rows from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// A named table.
    Table(TableName),
    /// A nested query, rendered as an aliased subquery.
    Query(Box<Query>),
    /// A two-table join, lowered before rendering.
    Join(Box<JoinSpec>),
}

/// A logical SELECT query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Row source.
    pub source: Source,
    /// Output columns.
    pub projection: Projection,
    /// Whether DISTINCT was requested.
    #[serde(default)]
    pub distinct: bool,
    /// Filter conditions, combined with AND.
    #[serde(default)]
    pub filter: Vec<Expr>,
    /// Grouping expressions.
    #[serde(default)]
    pub group_by: Vec<Expr>,
    /// Translation mode.
    #[serde(default)]
    pub mode: EvalMode,
    /// Group filter conditions, combined with AND.
    #[serde(default)]
    pub having: Vec<Expr>,
    /// Result ordering.
    #[serde(default)]
    pub order_by: Vec<OrderKey>,
    /// Ordering for window functions. Falls back to `order_by`.
    #[serde(default)]
    pub window_order: Vec<OrderKey>,
    /// Frame for window functions.
    #[serde(default)]
    pub window_frame: Option<Frame>,
    /// Row cap.
    #[serde(default)]
    pub limit: Option<u64>,
}

impl Query {
    /// Creates a `SELECT *` query over a source.
    #[must_use]
    pub const fn from_source(source: Source) -> Self {
        Self {
            source,
            projection: Projection::All,
            distinct: false,
            filter: vec![],
            group_by: vec![],
            mode: EvalMode::Window,
            having: vec![],
            order_by: vec![],
            window_order: vec![],
            window_frame: None,
            limit: None,
        }
    }

    /// Creates a `SELECT *` query over a table.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::from_source(Source::Table(TableName::new(name)))
    }

    /// Creates a `SELECT *` query over a nested query.
    #[must_use]
    pub fn wrap(inner: Self) -> Self {
        Self::from_source(Source::Query(Box::new(inner)))
    }

    /// Creates a `SELECT *` query over a join.
    #[must_use]
    pub fn join(spec: JoinSpec) -> Self {
        Self::from_source(Source::Join(Box::new(spec)))
    }

    /// Sets the projection to explicit items.
    #[must_use]
    pub fn select(mut self, items: Vec<SelectItem>) -> Self {
        self.projection = Projection::Items(items);
        self
    }

    /// Projects bare columns by name.
    #[must_use]
    pub fn select_columns(self, names: &[&str]) -> Self {
        self.select(
            names
                .iter()
                .map(|n| SelectItem::new(Expr::column(*n)))
                .collect(),
        )
    }

    /// Summarises the grouped rows into `items`.
    #[must_use]
    pub fn summarise(mut self, items: Vec<SelectItem>) -> Self {
        self.mode = EvalMode::Aggregate;
        self.projection = Projection::Items(items);
        self
    }

    /// Sets DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds a filter condition.
    #[must_use]
    pub fn filter(mut self, condition: Expr) -> Self {
        self.filter.push(condition);
        self
    }

    /// Sets the grouping expressions.
    #[must_use]
    pub fn group_by(mut self, exprs: Vec<Expr>) -> Self {
        self.group_by = exprs;
        self
    }

    /// Adds a HAVING condition.
    #[must_use]
    pub fn having(mut self, condition: Expr) -> Self {
        self.having.push(condition);
        self
    }

    /// Appends an ORDER BY key.
    #[must_use]
    pub fn order_by(mut self, key: OrderKey) -> Self {
        self.order_by.push(key);
        self
    }

    /// Sets the window ordering.
    #[must_use]
    pub fn window_order(mut self, keys: Vec<OrderKey>) -> Self {
        self.window_order = keys;
        self
    }

    /// Sets the window frame.
    #[must_use]
    pub const fn window_frame(mut self, frame: Frame) -> Self {
        self.window_frame = Some(frame);
        self
    }

    /// Sets the row cap.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Returns whether the query only forwards its source unchanged.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        matches!(self.projection, Projection::All)
            && !self.distinct
            && self.filter.is_empty()
            && self.having.is_empty()
            && self.order_by.is_empty()
            && self.limit.is_none()
            && (self.group_by.is_empty() || self.mode == EvalMode::Window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_sql() {
        assert_eq!(
            Frame::cumulative().to_sql(),
            "ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW"
        );
        let frame = Frame {
            start: FrameBound::Preceding(2),
            end: FrameBound::Following(1),
        };
        assert_eq!(frame.to_sql(), "ROWS BETWEEN 2 PRECEDING AND 1 FOLLOWING");
    }

    #[test]
    fn test_summarise_switches_mode() {
        let q = Query::table("t").summarise(vec![SelectItem::new(Expr::call("n", vec![]))]);
        assert_eq!(q.mode, EvalMode::Aggregate);
        assert!(!q.is_passthrough());
    }

    #[test]
    fn test_passthrough() {
        assert!(Query::table("t").is_passthrough());
        assert!(!Query::table("t").limit(1).is_passthrough());
        assert!(!Query::table("t").select_columns(&["a"]).is_passthrough());
    }
}
