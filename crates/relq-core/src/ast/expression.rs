//! Expression tree types.
//!
//! Trees are built once by the caller and only borrowed by the
//! compiler.

use serde::{Deserialize, Serialize};

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    /// NULL literal.
    Null,
    /// Boolean literal.
    Boolean(bool),
    /// Exact integer literal, rendered without a decimal point.
    Integer(i64),
    /// Floating literal, always rendered with a decimal point.
    Float(f64),
    /// String literal.
    String(String),
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfixOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,
}

impl InfixOp {
    /// Returns the name the operator is registered under in a
    /// translation table.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&",
            Self::Or => "|",
            Self::Concat => "||",
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixOp {
    /// Arithmetic negation.
    Neg,
    /// Logical NOT.
    Not,
}

impl PrefixOp {
    /// Returns the name the operator is registered under in a
    /// translation table.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

/// A column reference, optionally qualified with a table alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Table alias (optional).
    #[serde(default)]
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

/// A call argument. Named arguments keep their position relative to
/// positional ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    /// Argument label, if any.
    #[serde(default)]
    pub name: Option<String>,
    /// Argument value.
    pub value: Expr,
}

impl Arg {
    /// Creates a positional argument.
    #[must_use]
    pub const fn positional(value: Expr) -> Self {
        Self { name: None, value }
    }

    /// Creates a named argument.
    #[must_use]
    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

/// A function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// The operation name, looked up in the dialect's translation table.
    pub name: String,
    /// Arguments in call order.
    #[serde(default)]
    pub args: Vec<Arg>,
}

impl Call {
    /// Creates a call with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: vec![],
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, value: Expr) -> Self {
        self.args.push(Arg::positional(value));
        self
    }

    /// Appends a named argument.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>, value: Expr) -> Self {
        self.args.push(Arg::named(name, value));
        self
    }

    /// Returns the positional arguments in order.
    pub fn positional(&self) -> impl Iterator<Item = &Expr> {
        self.args
            .iter()
            .filter(|a| a.name.is_none())
            .map(|a| &a.value)
    }

    /// Returns the named arguments in order.
    pub fn named_args(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.args
            .iter()
            .filter_map(|a| a.name.as_deref().map(|n| (n, &a.value)))
    }
}

impl From<Call> for Expr {
    fn from(call: Call) -> Self {
        Self::Call(call)
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference.
    Column(ColumnRef),

    /// A function call, translated through the dialect's tables.
    Call(Call),

    /// An infix operator application.
    Infix {
        /// Operator.
        op: InfixOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A prefix operator application.
    Prefix {
        /// Operator.
        op: PrefixOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A parenthesized list of values, e.g. the right side of IN.
    List(Vec<Expr>),

    /// SQL emitted verbatim.
    Sql(String),
}

impl Expr {
    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ColumnRef {
            table: None,
            name: name.into(),
        })
    }

    /// Creates a new qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column(ColumnRef {
            table: Some(table.into()),
            name: name.into(),
        })
    }

    /// Creates a new integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a new float literal.
    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self::Literal(Literal::Float(value))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a new boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Literal(Literal::Boolean(value))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Creates a verbatim SQL fragment.
    #[must_use]
    pub fn sql(sql: impl Into<String>) -> Self {
        Self::Sql(sql.into())
    }

    /// Creates a call with positional arguments.
    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call(Call {
            name: name.into(),
            args: args.into_iter().map(Arg::positional).collect(),
        })
    }

    /// Creates a list of values.
    #[must_use]
    pub const fn list(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    /// Creates an infix expression.
    #[must_use]
    pub fn infix(self, op: InfixOp, right: Self) -> Self {
        Self::Infix {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Creates an addition expression.
    #[must_use]
    pub fn add(self, right: Self) -> Self {
        self.infix(InfixOp::Add, right)
    }

    /// Creates a subtraction expression.
    #[must_use]
    pub fn sub(self, right: Self) -> Self {
        self.infix(InfixOp::Sub, right)
    }

    /// Creates a multiplication expression.
    #[must_use]
    pub fn mul(self, right: Self) -> Self {
        self.infix(InfixOp::Mul, right)
    }

    /// Creates a division expression.
    #[must_use]
    pub fn div(self, right: Self) -> Self {
        self.infix(InfixOp::Div, right)
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.infix(InfixOp::Eq, right)
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq(self, right: Self) -> Self {
        self.infix(InfixOp::NotEq, right)
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt(self, right: Self) -> Self {
        self.infix(InfixOp::Lt, right)
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn lt_eq(self, right: Self) -> Self {
        self.infix(InfixOp::LtEq, right)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: Self) -> Self {
        self.infix(InfixOp::Gt, right)
    }

    /// Creates a greater-than-or-equal expression.
    #[must_use]
    pub fn gt_eq(self, right: Self) -> Self {
        self.infix(InfixOp::GtEq, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.infix(InfixOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.infix(InfixOp::Or, right)
    }

    /// Creates a NOT expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Prefix {
            op: PrefixOp::Not,
            operand: Box::new(self),
        }
    }

    /// Creates a negation expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn neg(self) -> Self {
        Self::Prefix {
            op: PrefixOp::Neg,
            operand: Box::new(self),
        }
    }

    /// Returns the column name if this is an unqualified column.
    #[must_use]
    pub fn as_bare_column(&self) -> Option<&str> {
        match self {
            Self::Column(ColumnRef { table: None, name }) => Some(name),
            _ => None,
        }
    }
}
