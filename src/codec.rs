//! The document codec: decoding documents into models and back.
//!
//! Decoding walks the model's declared fields in order, resolves each field's
//! document key through the key map, applies the field's transformer if one
//! is bound, and assigns the result through the model's value channel.
//! Encoding runs the same pipeline in reverse. The first error aborts the
//! operation; a decode target may already be partially mutated up to the
//! failing field, and no rollback is attempted.

use crate::{
    error::Result,
    keymap::{insert_path, lookup_path},
    schema::{json_type_name, FieldDef},
    Document, Error, Model,
};

/// Options controlling decode behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Skip fields whose document value is missing or null, leaving the
    /// target's current value untouched.
    ///
    /// When false (the default), a missing or null value clears the field to
    /// its zero representation: a plain decode *erases* fields absent from
    /// the input. This mirrors the source-of-record semantics of a full
    /// document; pass `ignore_nil: true` for partial documents.
    pub ignore_nil: bool,
}

impl DecodeOptions {
    /// Options that preserve fields missing from the document.
    pub fn ignore_nil() -> Self {
        Self { ignore_nil: true }
    }
}

/// Decode a document into an existing model instance.
///
/// The document must be a JSON object, else [`Error::MalformedDocument`].
/// Fields are processed in declaration order, so the first error reported is
/// deterministic.
pub fn decode<M: Model>(document: &Document, target: &mut M, options: DecodeOptions) -> Result<()> {
    let map = document.as_object().ok_or_else(|| {
        Error::MalformedDocument(format!(
            "expected an object, got {}",
            json_type_name(document)
        ))
    })?;

    let schema = M::schema();
    for field in schema.fields() {
        let key = schema.key_map().document_key_for(&field.name);
        match lookup_path(map, key) {
            None | Some(Document::Null) => {
                if !options.ignore_nil {
                    target.set(&field.name, Document::Null)?;
                }
            }
            Some(raw) => {
                if let Some(transformer) = schema.transformer_for(&field.name) {
                    let native = transformer.forward(raw).map_err(|reason| Error::Transform {
                        field: field.name.clone(),
                        reason,
                    })?;
                    target.set(&field.name, native)?;
                } else {
                    if !field.field_type.accepts(raw) {
                        return Err(Error::TypeMismatch {
                            field: field.name.clone(),
                            expected: field.field_type.to_string(),
                            got: json_type_name(raw).to_string(),
                        });
                    }
                    target.set(&field.name, raw.clone())?;
                }
            }
        }
    }

    Ok(())
}

/// Encode a model as a document, applying key renames and reverse
/// transformers.
///
/// The output object holds one entry per declared field, inserted in
/// declaration order so the serialized form is stable run-to-run. Nil field
/// values encode as explicit nulls and never invoke a transformer. A non-nil
/// value in a field with a one-way transformer fails with
/// [`Error::UnsupportedReverseTransform`].
pub fn encode<M: Model>(model: &M) -> Result<Document> {
    let schema = M::schema();
    let mut out = serde_json::Map::new();

    for field in schema.fields() {
        let value = model.get(&field.name);
        let encoded = if value.is_null() {
            Document::Null
        } else {
            match schema.transformer_for(&field.name) {
                Some(transformer) => match transformer.reverse(&value) {
                    Some(result) => result.map_err(|reason| Error::Transform {
                        field: field.name.clone(),
                        reason,
                    })?,
                    None => return Err(Error::UnsupportedReverseTransform(field.name.clone())),
                },
                None => value,
            }
        };

        let key = schema.key_map().document_key_for(&field.name);
        insert_path(&mut out, key, encoded);
    }

    Ok(Document::Object(out))
}

/// Encode a model as canonical UTF-8 JSON text (RFC 8259).
pub fn encode_to_bytes<M: Model>(model: &M) -> Result<Vec<u8>> {
    let document = encode(model)?;
    serde_json::to_vec(&document).map_err(|e| Error::Encoding(e.to_string()))
}

/// Encode a model as a flat document keyed by raw field names, with no key
/// translation and no reverse transformers.
pub fn to_field_document<M: Model>(model: &M) -> Document {
    let schema = M::schema();
    let mut out = serde_json::Map::new();
    for field in schema.fields() {
        out.insert(field.name.clone(), model.get(&field.name));
    }
    Document::Object(out)
}

/// Construct a model from a document.
///
/// Equivalent to decoding into a fresh default instance with
/// `ignore_nil = false`: keys missing from the document leave the
/// corresponding fields at their zero values.
pub fn from_document<M: Model>(document: &Document) -> Result<M> {
    let mut model = M::default();
    decode(document, &mut model, DecodeOptions::default())?;
    Ok(model)
}

/// Construct one model per document, preserving element order.
///
/// Atomic: the first failing element aborts the whole batch and no models
/// are returned.
pub fn many_from_documents<M: Model>(documents: &[Document]) -> Result<Vec<M>> {
    documents.iter().map(from_document).collect()
}

/// Copy field values from `source` into `target`.
///
/// `fields = None` copies every schema field. Fields declared
/// [`by_assign`](crate::FieldDef::by_assign) route through
/// [`Model::assign_field`]; the rest copy through the document-value channel.
/// A name not declared in the schema fails with [`Error::UnknownField`].
pub fn update_fields<M: Model>(target: &mut M, source: &M, fields: Option<&[&str]>) -> Result<()> {
    let schema = M::schema();
    match fields {
        None => {
            for field in schema.fields() {
                copy_field(target, source, field)?;
            }
        }
        Some(names) => {
            for name in names {
                let field = schema
                    .field(name)
                    .ok_or_else(|| Error::UnknownField((*name).to_string()))?;
                copy_field(target, source, field)?;
            }
        }
    }
    Ok(())
}

fn copy_field<M: Model>(target: &mut M, source: &M, field: &FieldDef) -> Result<()> {
    if field.by_assign {
        target.assign_field(source, &field.name)
    } else {
        target.set(&field.name, source.get(&field.name))
    }
}
