//! Translation tables with parent fallback.
//!
//! A dialect's table holds only the entries it changes and points at a
//! parent for everything else. Lookups walk the chain and stop at the
//! first match, so a child entry shadows its parent's.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ast::EvalMode;

use super::RenderFn;

/// The three namespaces a translator is partitioned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Functions valid in any context.
    Scalar,
    /// Functions that collapse a group.
    Aggregate,
    /// Functions evaluated over a window.
    Window,
}

impl Namespace {
    /// Returns the namespace searched first for a translation mode.
    #[must_use]
    pub const fn for_mode(mode: EvalMode) -> Self {
        match mode {
            EvalMode::Aggregate => Self::Aggregate,
            EvalMode::Window => Self::Window,
        }
    }
}

/// A mapping from operation name to rendering function, with an
/// optional parent table.
#[derive(Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, RenderFn>,
    parent: Option<Arc<TranslationTable>>,
}

impl TranslationTable {
    /// Creates an empty root table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table that falls back to `parent`.
    #[must_use]
    pub fn inheriting(parent: Arc<Self>) -> Self {
        Self {
            entries: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Adds or replaces an entry.
    #[must_use]
    pub fn with(mut self, name: &str, render: RenderFn) -> Self {
        self.insert(name, render);
        self
    }

    /// Adds or replaces an entry in place.
    pub fn insert(&mut self, name: &str, render: RenderFn) {
        self.entries.insert(String::from(name), render);
    }

    /// Finds the entry for `name`, walking up the parent chain.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RenderFn> {
        let mut table = self;
        loop {
            if let Some(render) = table.entries.get(name) {
                return Some(render);
            }
            table = table.parent.as_deref()?;
        }
    }

    /// Returns whether `name` resolves anywhere in the chain.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the parent table, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// Returns the length of the chain, this table included.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }

    /// Merges the chain into a single root table, child entries winning.
    #[must_use]
    pub fn flatten(&self) -> Self {
        let mut entries = self
            .parent
            .as_ref()
            .map(|p| p.flatten().entries)
            .unwrap_or_default();
        for (name, render) in &self.entries {
            entries.insert(name.clone(), Arc::clone(render));
        }
        Self {
            entries,
            parent: None,
        }
    }

    /// Returns every name reachable through the chain, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.flatten().entries.into_keys().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for TranslationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut own: Vec<&String> = self.entries.keys().collect();
        own.sort();
        f.debug_struct("TranslationTable")
            .field("entries", &own)
            .field("parent", &self.parent)
            .finish()
    }
}

/// The scalar, aggregate and window tables of one dialect.
#[derive(Debug, Clone)]
pub struct SqlTranslator {
    scalar: Arc<TranslationTable>,
    aggregate: Arc<TranslationTable>,
    window: Arc<TranslationTable>,
}

impl SqlTranslator {
    /// Starts a translator with empty root tables.
    #[must_use]
    pub fn builder() -> SqlTranslatorBuilder {
        SqlTranslatorBuilder {
            scalar: TranslationTable::new(),
            aggregate: TranslationTable::new(),
            window: TranslationTable::new(),
        }
    }

    /// Starts a translator whose tables inherit from this one's.
    #[must_use]
    pub fn extend(&self) -> SqlTranslatorBuilder {
        SqlTranslatorBuilder {
            scalar: TranslationTable::inheriting(Arc::clone(&self.scalar)),
            aggregate: TranslationTable::inheriting(Arc::clone(&self.aggregate)),
            window: TranslationTable::inheriting(Arc::clone(&self.window)),
        }
    }

    /// Returns the table of one namespace.
    #[must_use]
    pub fn table(&self, namespace: Namespace) -> &TranslationTable {
        match namespace {
            Namespace::Scalar => &self.scalar,
            Namespace::Aggregate => &self.aggregate,
            Namespace::Window => &self.window,
        }
    }

    /// Resolves `name` for a translation mode: the mode's namespace
    /// first, then the scalar one.
    #[must_use]
    pub fn lookup(&self, name: &str, mode: EvalMode) -> Option<&RenderFn> {
        self.table(Namespace::for_mode(mode))
            .get(name)
            .or_else(|| self.scalar.get(name))
    }

    /// Returns a copy with every chain merged into one table.
    #[must_use]
    pub fn flatten(&self) -> Self {
        Self {
            scalar: Arc::new(self.scalar.flatten()),
            aggregate: Arc::new(self.aggregate.flatten()),
            window: Arc::new(self.window.flatten()),
        }
    }
}

/// Builder for [`SqlTranslator`].
#[derive(Debug)]
pub struct SqlTranslatorBuilder {
    scalar: TranslationTable,
    aggregate: TranslationTable,
    window: TranslationTable,
}

impl SqlTranslatorBuilder {
    /// Adds a scalar entry.
    #[must_use]
    pub fn scalar(mut self, name: &str, render: RenderFn) -> Self {
        self.scalar.insert(name, render);
        self
    }

    /// Adds an aggregate entry.
    #[must_use]
    pub fn aggregate(mut self, name: &str, render: RenderFn) -> Self {
        self.aggregate.insert(name, render);
        self
    }

    /// Adds a window entry.
    #[must_use]
    pub fn window(mut self, name: &str, render: RenderFn) -> Self {
        self.window.insert(name, render);
        self
    }

    /// Freezes the tables.
    #[must_use]
    pub fn build(self) -> SqlTranslator {
        SqlTranslator {
            scalar: Arc::new(self.scalar),
            aggregate: Arc::new(self.aggregate),
            window: Arc::new(self.window),
        }
    }
}
