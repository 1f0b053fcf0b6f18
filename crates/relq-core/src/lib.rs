//! # relq-core
//!
//! Compiles relational queries (projection, filter, join, aggregation,
//! window functions, set operations) into SQL text for a chosen dialect.
//!
//! This crate provides:
//! - An expression tree and logical query model, both serde-friendly
//! - Per-dialect translation tables with parent fallback, seeded from an
//!   ANSI baseline
//! - A CASE compiler for `if_else`, `switch` and `case_when`
//! - A clause formatter that wraps clauses wider than 80 columns
//! - Join lowering that emulates RIGHT and FULL joins where the dialect
//!   lacks them
//!
//! ## Example
//!
//! ```rust
//! use relq_core::{Compiler, DialectProfile, Expr, Query};
//!
//! let profile = DialectProfile::ansi();
//! let query = Query::table("df").filter(Expr::column("x").gt(Expr::float(2.0)));
//! let rendered = Compiler::new(&profile).to_sql(&query).unwrap();
//!
//! assert_eq!(rendered.sql, "SELECT *\nFROM \"df\"\nWHERE (\"x\" > 2.0)");
//! ```
//!
//! ## Unknown functions
//!
//! Calls that no translation table knows are emitted as written:
//!
//! ```rust
//! use relq_core::{Compiler, DialectProfile, EvalMode, Expr};
//!
//! let profile = DialectProfile::ansi();
//! let sql = Compiler::new(&profile)
//!     .translate(&Expr::call("my_udf", vec![Expr::column("a")]), EvalMode::Window)
//!     .unwrap();
//!
//! assert_eq!(sql, "my_udf(\"a\")");
//! ```

pub mod ast;
mod compose;
pub mod dialect;
mod error;
pub mod join;
mod options;
pub mod render;
pub mod translate;

pub use ast::{
    Call, EvalMode, Expr, JoinKind, JoinSpec, NullEquality, OrderKey, Query, Relation,
    SelectItem, Source, TableName,
};
pub use compose::Compiler;
pub use dialect::{Dialect, DialectProfile, DialectRegistry};
pub use error::{CompileError, Result};
pub use options::{RenderOptions, DEFAULT_WIDTH};
pub use render::{CompileWarning, Rendered, SetOperator, Statement};
pub use translate::{SqlTranslator, Translator};
