//! Field-name to document-key translation.
//!
//! A [`KeyMap`] declares, per model type, which fields are renamed in the
//! document representation. Unmapped fields use the field name itself as the
//! document key, so a key map only needs to list the exceptions.

use crate::{error::Result, Document, DocumentKey, Error, FieldName};
use std::collections::HashMap;

/// Ordered field-name → document-key overrides for one model type.
///
/// Pairs are kept in declaration order so that reverse-map construction and
/// collision reporting are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    pairs: Vec<(FieldName, DocumentKey)>,
}

impl KeyMap {
    /// Create an empty key map (every field maps to itself).
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builder-style method to map a field name to a document key.
    ///
    /// Document keys may contain dots (`"user.name"`); the codec treats them
    /// as paths into nested objects.
    pub fn with(mut self, field: impl Into<FieldName>, key: impl Into<DocumentKey>) -> Self {
        self.pairs.push((field.into(), key.into()));
        self
    }

    /// Number of explicit overrides.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check whether the map has no overrides.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Resolve the document key for a field name.
    ///
    /// Returns the mapped key if an override exists, else the field name
    /// unchanged. Total, never fails.
    pub fn document_key_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.pairs
            .iter()
            .find(|(f, _)| f == field)
            .map_or(field, |(_, k)| k.as_str())
    }

    /// Resolve the field name for a document key.
    ///
    /// Unmapped keys resolve to themselves (field name assumed equal to the
    /// document key). Fails with [`Error::KeyCollision`] if two fields map to
    /// the queried key.
    pub fn field_for<'a>(&'a self, key: &'a str) -> Result<&'a str> {
        let mut found: Option<&str> = None;
        for (field, mapped) in &self.pairs {
            if mapped == key {
                if let Some(first) = found {
                    return Err(Error::KeyCollision {
                        key: key.to_string(),
                        first: first.to_string(),
                        second: field.clone(),
                    });
                }
                found = Some(field);
            }
        }
        Ok(found.unwrap_or(key))
    }

    /// Build the full document-key → field-name reverse map.
    ///
    /// Fails with [`Error::KeyCollision`] on the first duplicate document key
    /// in declaration order. A silent last-writer-wins pick would make decode
    /// results depend on declaration accidents, so collisions are loud.
    pub fn reversed(&self) -> Result<HashMap<DocumentKey, FieldName>> {
        let mut reversed = HashMap::with_capacity(self.pairs.len());
        for (field, key) in &self.pairs {
            if let Some(first) = reversed.insert(key.clone(), field.clone()) {
                return Err(Error::KeyCollision {
                    key: key.clone(),
                    first,
                    second: field.clone(),
                });
            }
        }
        Ok(reversed)
    }

    /// Convert a field-name-keyed JSON map into a document-keyed one.
    ///
    /// Dotted document keys produce nested objects; siblings sharing a path
    /// prefix merge into the same nested object.
    pub fn rekey(&self, map: &serde_json::Map<String, Document>) -> serde_json::Map<String, Document> {
        let mut out = serde_json::Map::new();
        for (field, value) in map {
            insert_path(&mut out, self.document_key_for(field), value.clone());
        }
        out
    }
}

/// Insert `value` at a dotted `path`, creating intermediate objects.
///
/// An existing non-object intermediate is replaced by an object.
pub(crate) fn insert_path(map: &mut serde_json::Map<String, Document>, path: &str, value: Document) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Document::Object(serde_json::Map::new()));
            if !entry.is_object() {
                *entry = Document::Object(serde_json::Map::new());
            }
            if let Document::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}

/// Read the value at a dotted `path`.
///
/// Returns `None` when any path segment is missing or an intermediate value
/// is not an object; the codec treats both as nil.
pub(crate) fn lookup_path<'a>(
    map: &'a serde_json::Map<String, Document>,
    path: &str,
) -> Option<&'a Document> {
    match path.split_once('.') {
        None => map.get(path),
        Some((head, rest)) => match map.get(head) {
            Some(Document::Object(inner)) => lookup_path(inner, rest),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_map() -> KeyMap {
        KeyMap::new()
            .with("name", "user_name")
            .with("avatar_url", "avatar.url")
    }

    #[test]
    fn forward_translation() {
        let map = test_map();
        assert_eq!(map.document_key_for("name"), "user_name");
        assert_eq!(map.document_key_for("avatar_url"), "avatar.url");
        // Unmapped fields pass through unchanged
        assert_eq!(map.document_key_for("age"), "age");
    }

    #[test]
    fn reverse_translation() {
        let map = test_map();
        assert_eq!(map.field_for("user_name").unwrap(), "name");
        assert_eq!(map.field_for("avatar.url").unwrap(), "avatar_url");
        assert_eq!(map.field_for("age").unwrap(), "age");
    }

    #[test]
    fn reversed_map() {
        let map = test_map();
        let reversed = map.reversed().unwrap();
        assert_eq!(reversed.len(), 2);
        assert_eq!(reversed["user_name"], "name");
        assert_eq!(reversed["avatar.url"], "avatar_url");
    }

    #[test]
    fn collision_is_loud_and_deterministic() {
        let map = KeyMap::new()
            .with("id", "uid")
            .with("user_id", "uid")
            .with("account_id", "uid");

        let err = map.reversed().unwrap_err();
        assert_eq!(
            err,
            Error::KeyCollision {
                key: "uid".into(),
                first: "id".into(),
                second: "user_id".into(),
            }
        );

        let err = map.field_for("uid").unwrap_err();
        assert!(matches!(err, Error::KeyCollision { .. }));
    }

    #[test]
    fn rekey_builds_nested_objects() {
        let map = KeyMap::new()
            .with("street", "address.street")
            .with("city", "address.city");

        let input = json!({"street": "Main St", "city": "Lagos", "zip": "100001"});
        let rekeyed = map.rekey(input.as_object().unwrap());

        assert_eq!(
            Document::Object(rekeyed),
            json!({
                "address": {"street": "Main St", "city": "Lagos"},
                "zip": "100001"
            })
        );
    }

    #[test]
    fn lookup_missing_path_is_none() {
        let doc = json!({"a": {"b": 1}, "c": 2});
        let map = doc.as_object().unwrap();

        assert_eq!(lookup_path(map, "a.b"), Some(&json!(1)));
        assert_eq!(lookup_path(map, "a.x"), None);
        // Non-object intermediate reads as absent, not an error
        assert_eq!(lookup_path(map, "c.d"), None);
        assert_eq!(lookup_path(map, "missing.d"), None);
    }
}
