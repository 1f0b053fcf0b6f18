//! Dialect lookup by name.

use std::collections::HashMap;

use tracing::debug;

use super::DialectProfile;

/// An immutable set of dialect profiles keyed by name.
///
/// Build it once, then pass it (or the profile it resolves) to the
/// compiler. Lookups never lock.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    profiles: HashMap<String, DialectProfile>,
    fallback: DialectProfile,
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectRegistry {
    /// Creates a registry holding only the ANSI profile.
    #[must_use]
    pub fn new() -> Self {
        let fallback = DialectProfile::ansi();
        let mut profiles = HashMap::new();
        profiles.insert(String::from(fallback.name()), fallback.clone());
        Self { profiles, fallback }
    }

    /// Adds a profile under its dialect name, replacing any previous one.
    #[must_use]
    pub fn with(mut self, profile: DialectProfile) -> Self {
        let name = String::from(profile.name());
        if self.profiles.insert(name.clone(), profile).is_some() {
            debug!(dialect = %name, "replaced registered dialect profile");
        }
        self
    }

    /// Returns the profile registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DialectProfile> {
        self.profiles.get(name)
    }

    /// Returns the profile for `name`, or ANSI when the name is absent
    /// or unknown.
    #[must_use]
    pub fn resolve(&self, name: Option<&str>) -> &DialectProfile {
        match name {
            Some(name) => self.get(name).unwrap_or_else(|| {
                debug!(dialect = name, "unknown dialect, falling back to ansi");
                &self.fallback
            }),
            None => &self.fallback,
        }
    }

    /// Returns the ANSI profile.
    #[must_use]
    pub const fn ansi(&self) -> &DialectProfile {
        &self.fallback
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
