//! The [`Model`] trait: typed records convertible to and from documents.
//!
//! A model exposes its declared fields through a value channel carried as
//! [`Document`] values. The codec reads and writes fields exclusively through
//! this channel, so a model is free to store richer native types internally
//! (timestamps as `u64`, parsed URLs, byte blobs) as long as `get`/`set`
//! bridge them to a JSON representation.

use crate::{
    codec::{self, DecodeOptions},
    error::Result,
    Document, ModelSchema,
};

/// A typed record with a fixed, ordered set of named fields.
pub trait Model: Default {
    /// The static schema for this type: field list (inherited fields first),
    /// key map, and transformers.
    fn schema() -> &'static ModelSchema;

    /// Read a field's value in document form. A nil/unset field reads as
    /// [`Document::Null`]. Only fields named in the schema are queried.
    fn get(&self, field: &str) -> Document;

    /// Write a field's value from document form.
    ///
    /// [`Document::Null`] clears the field to its zero/empty representation.
    /// Unknown fields fail with [`Error::UnknownField`](crate::Error::UnknownField).
    fn set(&mut self, field: &str, value: Document) -> Result<()>;

    /// Hook invoked by the record cache after this model is deserialized
    /// from durable storage. No-op by default.
    fn after_load(&mut self) {}

    /// Assign a field directly from another instance, bypassing the
    /// document-value copy channel.
    ///
    /// Called by [`update_from`](Self::update_from) for fields declared
    /// [`by_assign`](crate::FieldDef::by_assign). The default goes through
    /// `get`/`set`; models whose fields hand out shared storage can override
    /// it to alias instead of copy.
    fn assign_field(&mut self, source: &Self, field: &str) -> Result<()> {
        self.set(field, source.get(field))
    }

    /// Construct a model from a document. Missing keys leave fields at their
    /// zero values (decode runs with `ignore_nil = false` on a fresh
    /// instance).
    fn from_document(document: &Document) -> Result<Self> {
        codec::from_document(document)
    }

    /// Decode a document into this instance, field by field.
    fn decode_from(&mut self, document: &Document, options: DecodeOptions) -> Result<()> {
        codec::decode(document, self, options)
    }

    /// Encode this model as a document, applying key renames and reverse
    /// transformers.
    fn to_document(&self) -> Result<Document> {
        codec::encode(self)
    }

    /// Encode this model as a document keyed by raw field names, with no key
    /// translation and no reverse transformers.
    fn to_field_document(&self) -> Document {
        codec::to_field_document(self)
    }

    /// Encode this model as canonical UTF-8 JSON text.
    fn to_json_bytes(&self) -> Result<Vec<u8>> {
        codec::encode_to_bytes(self)
    }

    /// Copy field values from another instance. `fields = None` copies every
    /// schema field.
    fn update_from(&mut self, source: &Self, fields: Option<&[&str]>) -> Result<()> {
        codec::update_fields(self, source, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, FieldDef, FieldType};
    use serde_json::json;
    use std::sync::LazyLock;

    #[derive(Debug, Default, PartialEq)]
    struct Note {
        title: String,
        pinned: bool,
    }

    static NOTE_SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
        ModelSchema::new()
            .with_field(FieldDef::new("title", FieldType::String))
            .with_field(FieldDef::new("pinned", FieldType::Bool))
    });

    impl Model for Note {
        fn schema() -> &'static ModelSchema {
            &NOTE_SCHEMA
        }

        fn get(&self, field: &str) -> Document {
            match field {
                "title" => json!(self.title),
                "pinned" => json!(self.pinned),
                _ => Document::Null,
            }
        }

        fn set(&mut self, field: &str, value: Document) -> Result<()> {
            match field {
                "title" => self.title = value.as_str().unwrap_or_default().to_string(),
                "pinned" => self.pinned = value.as_bool().unwrap_or_default(),
                _ => return Err(Error::UnknownField(field.to_string())),
            }
            Ok(())
        }
    }

    #[test]
    fn get_set_channel() {
        let mut note = Note::default();
        note.set("title", json!("groceries")).unwrap();
        note.set("pinned", json!(true)).unwrap();

        assert_eq!(note.get("title"), json!("groceries"));
        assert_eq!(note.get("pinned"), json!(true));
    }

    #[test]
    fn null_clears_to_zero() {
        let mut note = Note {
            title: "groceries".into(),
            pinned: true,
        };
        note.set("title", Document::Null).unwrap();
        note.set("pinned", Document::Null).unwrap();
        assert_eq!(note, Note::default());
    }

    #[test]
    fn unknown_field_rejected() {
        let mut note = Note::default();
        let result = note.set("color", json!("red"));
        assert!(matches!(result, Err(Error::UnknownField(f)) if f == "color"));
    }

    #[test]
    fn convenience_methods_round_trip() {
        let note = Note {
            title: "groceries".into(),
            pinned: true,
        };

        let doc = note.to_document().unwrap();
        assert_eq!(doc, json!({"title": "groceries", "pinned": true}));

        let restored = Note::from_document(&doc).unwrap();
        assert_eq!(restored, note);
    }

    #[test]
    fn default_assign_field_copies() {
        let source = Note {
            title: "groceries".into(),
            pinned: true,
        };
        let mut target = Note::default();
        target.assign_field(&source, "title").unwrap();
        assert_eq!(target.title, "groceries");
        assert!(!target.pinned);
    }
}
