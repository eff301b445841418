//! # Key Capability Traits
//!
//! Pure key-derivation contracts that address everything the facade touches.
//! A category maps to a Firestore collection or a Cloud Storage bucket, an
//! identifier to a document or object within it. The facade does not validate
//! the strings; they must satisfy the backing service's own naming rules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Produces the category a key belongs to (collection name or bucket name).
pub trait Categorizer {
    fn category(&self) -> &str;
}

/// A [`Categorizer`] that also names one member of the category
/// (document name or object name).
pub trait Grouping: Categorizer {
    fn identifier(&self) -> &str;
}

/// A [`Grouping`] that additionally supplies a string-to-string metadata map,
/// consumed only by object metadata updates.
pub trait MetaGrouping: Grouping {
    fn meta(&self) -> HashMap<String, String>;
}

impl<T: Categorizer + ?Sized> Categorizer for &T {
    fn category(&self) -> &str {
        (**self).category()
    }
}

impl<T: Grouping + ?Sized> Grouping for &T {
    fn identifier(&self) -> &str {
        (**self).identifier()
    }
}

impl<T: MetaGrouping + ?Sized> MetaGrouping for &T {
    fn meta(&self) -> HashMap<String, String> {
        (**self).meta()
    }
}

/// Ready-made key for the common case of a plain category/identifier pair
///
/// # Examples
///
/// ```rust
/// use fireblob::{Categorizer, Grouping, Key};
///
/// let key = Key::new("invoices", "2024-0042");
/// assert_eq!(key.category(), "invoices");
/// assert_eq!(key.identifier(), "2024-0042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub category: String,
    pub identifier: String,
}

impl Key {
    pub fn new(category: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            identifier: identifier.into(),
        }
    }
}

impl Categorizer for Key {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Grouping for Key {
    fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// A [`Key`] bundled with the metadata map required by object metadata updates
///
/// # Examples
///
/// ```rust
/// use fireblob::{MetaGrouping, MetaKey};
///
/// let key = MetaKey::new("media", "cover.png")
///     .with_meta("owner", "billing")
///     .with_meta("retention", "90d");
/// assert_eq!(key.meta().get("owner").map(String::as_str), Some("billing"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaKey {
    pub key: Key,
    pub meta: HashMap<String, String>,
}

impl MetaKey {
    pub fn new(category: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            key: Key::new(category, identifier),
            meta: HashMap::new(),
        }
    }

    /// Add one metadata entry, builder style
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

impl From<Key> for MetaKey {
    fn from(key: Key) -> Self {
        Self {
            key,
            meta: HashMap::new(),
        }
    }
}

impl Categorizer for MetaKey {
    fn category(&self) -> &str {
        self.key.category()
    }
}

impl Grouping for MetaKey {
    fn identifier(&self) -> &str {
        self.key.identifier()
    }
}

impl MetaGrouping for MetaKey {
    fn meta(&self) -> HashMap<String, String> {
        self.meta.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_accessors() {
        let key = Key::new("users", "alice");
        assert_eq!(key.category(), "users");
        assert_eq!(key.identifier(), "alice");
    }

    #[test]
    fn test_reference_passthrough() {
        fn category_of(c: impl Categorizer) -> String {
            c.category().to_string()
        }

        let key = Key::new("users", "alice");
        assert_eq!(category_of(&key), "users");
        assert_eq!(category_of(&&key), "users");
    }

    #[test]
    fn test_meta_key_builder() {
        let key = MetaKey::new("media", "cover.png")
            .with_meta("owner", "billing")
            .with_meta("owner", "media-team");

        // last write wins within the builder
        assert_eq!(
            key.meta().get("owner").map(String::as_str),
            Some("media-team")
        );
        assert_eq!(key.category(), "media");
        assert_eq!(key.identifier(), "cover.png");
    }

    #[test]
    fn test_meta_key_from_key_is_empty() {
        let key: MetaKey = Key::new("media", "cover.png").into();
        assert!(key.meta().is_empty());
    }

    #[test]
    fn test_key_serde_round_trip() {
        let key = Key::new("users", "alice");
        let json = serde_json::to_string(&key).unwrap();
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }
}
