//! Clause formatting and statement rendering.

mod clause;
mod statement;

pub use clause::{format_clauses, SqlClause};
pub use statement::{
    CompileWarning, FromSource, JoinClause, Predicate, Rendered, Renderer, SelectStatement,
    SetOperator, Statement,
};
