//! Named style registry of a destination document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Capability query used by table synthesis to decide whether a named style
/// can be applied.
pub trait StyleCatalog {
    /// Whether the destination document knows a style called `name`.
    fn style_exists(&self, name: &str) -> bool;
}

/// The set of style names a document defines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleRegistry {
    names: BTreeSet<String>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the styles shipped in a blank word-processor template.
    pub fn standard() -> Self {
        ["Normal", "Heading 1", "Heading 2", "Heading 3", "Table Grid"]
            .into_iter()
            .collect()
    }

    /// Register a style name.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Number of known styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no styles are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Known style names, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for StyleRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl StyleCatalog for StyleRegistry {
    fn style_exists(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
