//! Rendering options.

use serde::{Deserialize, Serialize};

/// Default maximum width of a clause rendered on one line.
pub const DEFAULT_WIDTH: usize = 80;

/// Layout options shared by the clause formatter and the conditional
/// compiler.
///
/// Deserializes with defaults for missing fields, so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Maximum width (indentation included) of a one-line rendering.
    pub width: usize,
    /// Indentation unit for one nesting level.
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            indent: String::from("  "),
        }
    }
}

impl RenderOptions {
    /// Sets the line width threshold.
    #[must_use]
    pub const fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Returns the indentation for a nesting level.
    #[must_use]
    pub fn indent_for(&self, level: usize) -> String {
        self.indent.repeat(level)
    }

    /// Returns whether `text` fits on one line at `level`.
    #[must_use]
    pub fn fits(&self, level: usize, text: &str) -> bool {
        self.indent.chars().count() * level + text.chars().count() <= self.width
    }
}
