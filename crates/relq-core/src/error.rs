//! Error types for SQL compilation.

/// Errors that can occur while compiling a relational query to SQL.
///
/// All of them are raised before any SQL text is produced. Calls to
/// functions the active dialect does not know are not errors: they are
/// emitted verbatim and left for the backend to accept or reject.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A conditional construct is malformed (e.g. a switch with more
    /// than one unlabelled branch).
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A SELECT statement has no output columns.
    #[error("SELECT statement must project at least one column")]
    EmptyProjection,

    /// A translation received the wrong number of arguments.
    #[error("'{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        /// The function or operator being translated.
        name: String,
        /// The accepted argument count (e.g. `2` or `1..=2`).
        expected: String,
        /// The number of arguments supplied.
        found: usize,
    },

    /// The dialect has no way to express the requested construct.
    #[error("{construct} is not supported by the '{dialect}' dialect")]
    UnsupportedConstruct {
        /// Name of the active dialect.
        dialect: String,
        /// Description of the construct.
        construct: String,
    },
}

impl CompileError {
    /// Creates an [`CompileError::ArityMismatch`].
    #[must_use]
    pub fn arity(name: impl Into<String>, expected: impl ToString, found: usize) -> Self {
        Self::ArityMismatch {
            name: name.into(),
            expected: expected.to_string(),
            found,
        }
    }

    /// Creates an [`CompileError::UnsupportedConstruct`].
    #[must_use]
    pub fn unsupported(dialect: impl Into<String>, construct: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            dialect: dialect.into(),
            construct: construct.into(),
        }
    }
}

/// Result type for compile operations.
pub type Result<T> = std::result::Result<T, CompileError>;
