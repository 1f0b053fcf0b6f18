//! Input types: expression trees, logical queries and join requests.

mod expression;
mod join;
mod query;

pub use expression::{Arg, Call, ColumnRef, Expr, InfixOp, Literal, PrefixOp};
pub use join::{JoinKind, JoinSpec, JoinSupport, NullEquality, Relation};
pub use query::{
    EvalMode, Frame, FrameBound, OrderKey, Projection, Query, SelectItem, Source, TableName,
};
