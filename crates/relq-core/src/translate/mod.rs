//! Expression translation.
//!
//! A [`Translator`] turns an [`Expr`] into SQL text for one dialect
//! profile. Calls and operators are resolved through the profile's
//! [`SqlTranslator`]: the namespace of the current [`EvalMode`] first,
//! then the scalar namespace, each walking its parent chain. Names that
//! resolve nowhere are emitted verbatim as `name(args...)`.

mod conditional;
pub mod helpers;
mod table;
mod window;

use std::sync::Arc;

use tracing::trace;

use crate::ast::{Arg, ColumnRef, EvalMode, Expr, Frame, Literal};
use crate::dialect::{Dialect, DialectProfile};
use crate::error::{CompileError, Result};
use crate::options::RenderOptions;

pub use conditional::{case_when, if_else, switch};
pub use table::{Namespace, SqlTranslator, SqlTranslatorBuilder, TranslationTable};
pub use window::{over, window_aggregate, window_cumulative, window_ranked};

/// A rendering function stored in a translation table.
///
/// It receives the active translator and the already translated
/// arguments of the call.
pub type RenderFn = Arc<dyn Fn(&Translator<'_>, &[SqlArg<'_>]) -> Result<String> + Send + Sync>;

/// Wraps a closure as a [`RenderFn`].
pub fn render_fn<F>(f: F) -> RenderFn
where
    F: Fn(&Translator<'_>, &[SqlArg<'_>]) -> Result<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A translated call argument.
#[derive(Debug, Clone)]
pub struct SqlArg<'e> {
    /// Argument label, if any.
    pub name: Option<&'e str>,
    /// Translated SQL.
    pub sql: String,
    /// The source expression.
    pub expr: &'e Expr,
}

impl SqlArg<'_> {
    /// Returns whether the SQL can be used as an operand without
    /// parentheses.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        match self.expr {
            Expr::Literal(_) | Expr::Column(_) | Expr::List(_) => true,
            Expr::Infix { .. } | Expr::Prefix { .. } => false,
            Expr::Call(_) | Expr::Sql(_) => is_self_delimited(&self.sql),
        }
    }

    /// Returns the SQL, parenthesized unless atomic.
    #[must_use]
    pub fn operand(&self) -> String {
        if self.is_atomic() {
            self.sql.clone()
        } else {
            format!("({})", self.sql)
        }
    }
}

/// Returns the positional arguments.
#[must_use]
pub fn positional<'s, 'e>(args: &'s [SqlArg<'e>]) -> Vec<&'s SqlArg<'e>> {
    args.iter().filter(|a| a.name.is_none()).collect()
}

/// Returns the argument labelled `name`.
#[must_use]
pub fn named<'s, 'e>(args: &'s [SqlArg<'e>], name: &str) -> Option<&'s SqlArg<'e>> {
    args.iter().find(|a| a.name == Some(name))
}

// `f(...)`, `(...)` and `CASE ... END` need no extra parentheses.
fn is_self_delimited(sql: &str) -> bool {
    if sql.starts_with("CASE") && sql.ends_with("END") {
        return case_closes_at_end(sql);
    }
    let Some(open) = sql.find('(') else {
        return !sql.is_empty() && sql.chars().all(|c| c.is_alphanumeric() || c == '_');
    };
    if !sql[..open].chars().all(|c| c.is_alphanumeric() || c == '_') {
        return false;
    }
    let mut depth = 0usize;
    let mut quoted = false;
    for (i, c) in sql[open..].char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return open + i + 1 == sql.len();
                }
            }
            _ => {}
        }
    }
    false
}

// Whether the leading CASE is closed by the final END and not earlier.
// Keywords inside quoted strings or identifiers are ignored.
fn case_closes_at_end(sql: &str) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut word = String::new();
    let mut closed = false;
    for c in sql.chars().chain(std::iter::once(' ')) {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
            continue;
        }
        if closed && !word.is_empty() {
            return false;
        }
        match word.as_str() {
            "CASE" => depth += 1,
            "END" => {
                depth = depth.saturating_sub(1);
                closed = depth == 0;
            }
            _ => {}
        }
        word.clear();
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '[' => quote = Some(']'),
            c if closed && !c.is_whitespace() => return false,
            _ => {}
        }
    }
    closed
}

/// Window specification applied to window-mode translations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowContext {
    /// Translated PARTITION BY expressions.
    pub partition: Vec<String>,
    /// Translated ORDER BY keys.
    pub order: Vec<String>,
    /// Frame, emitted only when there is an ordering.
    pub frame: Option<Frame>,
}

/// Translates expressions for one dialect profile.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    profile: &'a DialectProfile,
    options: &'a RenderOptions,
    mode: EvalMode,
    window: WindowContext,
    level: usize,
    row_level: bool,
}

impl<'a> Translator<'a> {
    /// Creates a window-mode translator at nesting level 0.
    #[must_use]
    pub fn new(profile: &'a DialectProfile, options: &'a RenderOptions) -> Self {
        Self {
            profile,
            options,
            mode: EvalMode::Window,
            window: WindowContext::default(),
            level: 0,
            row_level: false,
        }
    }

    /// Sets the translation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the window specification.
    #[must_use]
    pub fn with_window(mut self, window: WindowContext) -> Self {
        self.window = window;
        self
    }

    /// Sets the nesting level used to lay out multi-line expressions.
    #[must_use]
    pub const fn at_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Restricts calls to the scalar namespace.
    ///
    /// Used for WHERE and GROUP BY, where SQL allows neither aggregate
    /// nor window functions. A call that only resolves to one of those
    /// fails instead of producing SQL the backend would reject.
    #[must_use]
    pub const fn row_level(mut self) -> Self {
        self.row_level = true;
        self
    }

    /// Returns the dialect profile.
    #[must_use]
    pub const fn profile(&self) -> &'a DialectProfile {
        self.profile
    }

    /// Returns the dialect hooks.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.profile.dialect()
    }

    /// Returns the layout options.
    #[must_use]
    pub const fn options(&self) -> &'a RenderOptions {
        self.options
    }

    /// Returns the translation mode.
    #[must_use]
    pub const fn mode(&self) -> EvalMode {
        self.mode
    }

    /// Returns the window specification.
    #[must_use]
    pub const fn window(&self) -> &WindowContext {
        &self.window
    }

    /// Returns the nesting level.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Translates an expression.
    ///
    /// # Errors
    ///
    /// Returns the error of any rendering function involved, or
    /// [`CompileError::UnsupportedConstruct`] for a non-finite float.
    pub fn translate(&self, expr: &Expr) -> Result<String> {
        match expr {
            Expr::Literal(lit) => self.literal(lit),
            Expr::Column(col) => Ok(self.column(col)),
            Expr::Call(call) => {
                let args = self.translate_args(&call.args)?;
                self.apply(&call.name, &args)
            }
            Expr::Infix { op, left, right } => {
                let args = vec![
                    self.translate_arg(None, left)?,
                    self.translate_arg(None, right)?,
                ];
                self.apply(op.symbol(), &args)
            }
            Expr::Prefix { op, operand } => {
                let args = vec![self.translate_arg(None, operand)?];
                self.apply(op.symbol(), &args)
            }
            Expr::List(items) => {
                let items = items
                    .iter()
                    .map(|item| self.translate(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("({})", items.join(", ")))
            }
            Expr::Sql(sql) => Ok(sql.clone()),
        }
    }

    /// Renders a literal.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnsupportedConstruct`] for NaN and
    /// infinite floats.
    pub fn literal(&self, lit: &Literal) -> Result<String> {
        match lit {
            Literal::Null => Ok(String::from("NULL")),
            Literal::Boolean(b) => Ok(String::from(self.dialect().boolean_literal(*b))),
            Literal::Integer(n) => Ok(n.to_string()),
            Literal::Float(f) if !f.is_finite() => Err(CompileError::unsupported(
                self.profile.name(),
                format!("non-finite literal {f}"),
            )),
            Literal::Float(f) => {
                let text = f.to_string();
                if text.contains('.') {
                    Ok(text)
                } else {
                    Ok(format!("{text}.0"))
                }
            }
            Literal::String(s) => Ok(self.dialect().quote_string(s)),
        }
    }

    /// Renders a column reference with dialect quoting.
    #[must_use]
    pub fn column(&self, col: &ColumnRef) -> String {
        let dialect = self.dialect();
        match &col.table {
            Some(table) => format!(
                "{}.{}",
                dialect.quote_identifier(table),
                dialect.quote_identifier(&col.name)
            ),
            None => dialect.quote_identifier(&col.name),
        }
    }

    /// Renders a call to `name` with translated arguments.
    ///
    /// # Errors
    ///
    /// Returns the error of the rendering function, or
    /// [`CompileError::UnsupportedConstruct`] when a row-level translator
    /// meets an aggregate or window function.
    pub fn apply(&self, name: &str, args: &[SqlArg<'_>]) -> Result<String> {
        let translator = self.profile.translator();
        if self.row_level {
            if let Some(render) = translator.table(Namespace::Scalar).get(name) {
                return render(self, args);
            }
            if translator.table(Namespace::Aggregate).contains(name)
                || translator.table(Namespace::Window).contains(name)
            {
                return Err(CompileError::unsupported(
                    self.profile.name(),
                    format!("aggregate or window function `{name}` in a row filter"),
                ));
            }
        } else if let Some(render) = translator.lookup(name, self.mode) {
            return render(self, args);
        }
        trace!(function = name, dialect = self.profile.name(), "passing unknown function through");
        // Labels are dropped: there is no portable named-argument syntax,
        // so every argument is emitted positionally in call order.
        let sql: Vec<&str> = args.iter().map(|a| a.sql.as_str()).collect();
        Ok(format!("{name}({})", sql.join(", ")))
    }

    fn translate_args<'e>(&self, args: &'e [Arg]) -> Result<Vec<SqlArg<'e>>> {
        args.iter()
            .map(|a| self.translate_arg(a.name.as_deref(), &a.value))
            .collect()
    }

    fn translate_arg<'e>(&self, name: Option<&'e str>, expr: &'e Expr) -> Result<SqlArg<'e>> {
        Ok(SqlArg {
            name,
            sql: self.translate(expr)?,
            expr,
        })
    }
}
