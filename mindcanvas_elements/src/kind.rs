// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element kinds and their creation defaults.

use core::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::element::Style;

/// The kind of an element, deciding how the renderer draws it.
///
/// Serialized as its lowercase name (`"title"`, `"markdown"`, `"text"`);
/// any other name round-trips as [`ElementKind::Custom`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    /// A short heading, also used as a directory node.
    Title,
    /// A markdown document.
    Markdown,
    /// Plain text.
    Text,
    /// A host-defined kind registered in a [`KindRegistry`].
    Custom(String),
}

impl ElementKind {
    /// Returns the serialized name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ElementKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "title" => Self::Title,
            "markdown" => Self::Markdown,
            "text" => Self::Text,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for ElementKind {
    fn from(value: &str) -> Self {
        Self::from(String::from(value))
    }
}

impl From<ElementKind> for String {
    fn from(value: ElementKind) -> Self {
        match value {
            ElementKind::Custom(name) => name,
            other => other.as_str().into(),
        }
    }
}

/// Content and style given to a new element of some kind unless the caller
/// supplies its own.
#[derive(Clone, Debug, PartialEq)]
pub struct KindDefaults {
    /// Initial content.
    pub content: String,
    /// Initial style.
    pub style: Style,
}

/// Table of creation defaults keyed by [`ElementKind`].
///
/// [`KindRegistry::default`] knows the three built-in kinds. Adding a kind
/// only requires registering its defaults.
#[derive(Clone, Debug)]
pub struct KindRegistry {
    kinds: HashMap<ElementKind, KindDefaults>,
    order: Vec<ElementKind>,
}

impl Default for KindRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(
            ElementKind::Title,
            KindDefaults {
                content: "New title".into(),
                style: Style::new(16.0, "#333"),
            },
        );
        registry.register(
            ElementKind::Markdown,
            KindDefaults {
                content: "# New document".into(),
                style: Style::new(14.0, "#666"),
            },
        );
        registry.register(
            ElementKind::Text,
            KindDefaults {
                content: "New text".into(),
                style: Style::new(14.0, "#333"),
            },
        );
        registry
    }
}

impl KindRegistry {
    /// Creates a registry with no kinds at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registers (or replaces) the defaults for `kind`.
    pub fn register(&mut self, kind: ElementKind, defaults: KindDefaults) {
        if self.kinds.insert(kind.clone(), defaults).is_none() {
            self.order.push(kind);
        }
    }

    /// Returns the defaults for `kind`, if registered.
    #[must_use]
    pub fn get(&self, kind: &ElementKind) -> Option<&KindDefaults> {
        self.kinds.get(kind)
    }

    /// Returns `true` if `kind` is registered.
    #[must_use]
    pub fn contains(&self, kind: &ElementKind) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Iterates registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &ElementKind> + '_ {
        self.order.iter()
    }
}
