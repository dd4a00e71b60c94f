//! Model schemas: declared field lists, key maps, and transformer registries.
//!
//! Rust has no runtime reflection, so each model type declares its fields
//! explicitly in a [`ModelSchema`]. The schema is the single source of truth
//! for field order (inherited fields first, via [`ModelSchema::extending`]),
//! document-key renames, and per-field transformers.

use crate::{keymap::KeyMap, transform::Transformer, Document, FieldName};
use std::collections::HashMap;
use std::sync::Arc;

/// Native field types a model can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
    Float,
    Bool,
    /// Milliseconds since epoch, carried as a JSON integer
    Timestamp,
    List,
    Map,
    /// Arbitrary nested JSON
    Json,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "String"),
            FieldType::Int => write!(f, "Int"),
            FieldType::Float => write!(f, "Float"),
            FieldType::Bool => write!(f, "Bool"),
            FieldType::Timestamp => write!(f, "Timestamp"),
            FieldType::List => write!(f, "List"),
            FieldType::Map => write!(f, "Map"),
            FieldType::Json => write!(f, "Json"),
        }
    }
}

impl FieldType {
    /// Check whether a raw document value is assignable to this type
    /// without a transformer.
    pub fn accepts(&self, value: &Document) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Int => value.is_i64() || value.is_u64(),
            FieldType::Float => value.is_f64() || value.is_i64() || value.is_u64(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Timestamp => value.is_u64() || value.is_i64(),
            FieldType::List => value.is_array(),
            FieldType::Map => value.is_object(),
            FieldType::Json => true, // Any JSON is valid
        }
    }
}

/// Name of a document value's JSON type, for error reporting.
pub(crate) fn json_type_name(value: &Document) -> &'static str {
    match value {
        Document::Null => "Null",
        Document::Bool(_) => "Bool",
        Document::Number(n) if n.is_i64() || n.is_u64() => "Int",
        Document::Number(_) => "Float",
        Document::String(_) => "String",
        Document::Array(_) => "Array",
        Document::Object(_) => "Object",
    }
}

/// Definition of a single model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name
    pub name: FieldName,
    /// Native type
    pub field_type: FieldType,
    /// Route updates through [`Model::assign_field`](crate::Model::assign_field)
    /// instead of the copy channel
    pub by_assign: bool,
}

impl FieldDef {
    /// Create a field definition.
    pub fn new(name: impl Into<FieldName>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            by_assign: false,
        }
    }

    /// Mark this field as assigned directly rather than deep-copied when
    /// updating one model from another.
    pub fn by_assign(mut self) -> Self {
        self.by_assign = true;
        self
    }
}

/// Schema for one model type.
///
/// Field order is declaration order; [`extending`](Self::extending) prepends
/// an ancestor's fields so inherited fields always come first, mirroring a
/// walk from the root of the type hierarchy down.
#[derive(Debug, Clone, Default)]
pub struct ModelSchema {
    fields: Vec<FieldDef>,
    key_map: KeyMap,
    transformers: HashMap<FieldName, Arc<Transformer>>,
}

impl ModelSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema that inherits an ancestor's fields, key map, and
    /// transformers. Fields added afterwards follow the inherited ones.
    pub fn extending(parent: &ModelSchema) -> Self {
        parent.clone()
    }

    /// Builder-style method to declare a field.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Builder-style method to rename a field in the document representation.
    pub fn with_key(mut self, field: impl Into<FieldName>, key: impl Into<String>) -> Self {
        self.key_map = self.key_map.with(field, key);
        self
    }

    /// Builder-style method to bind a transformer to a field. At most one
    /// transformer per field; a later binding replaces an earlier one.
    pub fn with_transformer(mut self, field: impl Into<FieldName>, transformer: Transformer) -> Self {
        self.transformers.insert(field.into(), Arc::new(transformer));
        self
    }

    /// All declared fields, in order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field definition by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The key map for this type.
    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// The transformer bound to a field, if any.
    pub fn transformer_for(&self, field: &str) -> Option<&Transformer> {
        self.transformers.get(field).map(Arc::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_schema() -> ModelSchema {
        ModelSchema::new()
            .with_field(FieldDef::new("name", FieldType::String))
            .with_field(FieldDef::new("age", FieldType::Int))
            .with_key("name", "user_name")
    }

    #[test]
    fn field_order_is_declaration_order() {
        let schema = user_schema();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age"]);
    }

    #[test]
    fn extending_prepends_ancestor_fields() {
        let base = ModelSchema::new()
            .with_field(FieldDef::new("id", FieldType::String))
            .with_key("id", "uid");

        let schema = ModelSchema::extending(&base)
            .with_field(FieldDef::new("name", FieldType::String));

        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name"]);
        // Inherited key map entries survive
        assert_eq!(schema.key_map().document_key_for("id"), "uid");
    }

    #[test]
    fn extending_inherits_transformers() {
        let base = ModelSchema::new()
            .with_field(FieldDef::new("tag", FieldType::String))
            .with_transformer(
                "tag",
                Transformer::one_way(|v| Ok(json!(format!("#{}", v.as_str().unwrap_or(""))))),
            );

        let schema = ModelSchema::extending(&base);
        let t = schema.transformer_for("tag").unwrap();
        assert_eq!(t.forward(&json!("rust")).unwrap(), json!("#rust"));
    }

    #[test]
    fn accepts_matches_json_types() {
        assert!(FieldType::String.accepts(&json!("a")));
        assert!(!FieldType::String.accepts(&json!(1)));
        assert!(FieldType::Int.accepts(&json!(1)));
        assert!(!FieldType::Int.accepts(&json!(1.5)));
        assert!(FieldType::Float.accepts(&json!(1)));
        assert!(FieldType::Float.accepts(&json!(1.5)));
        assert!(FieldType::Bool.accepts(&json!(true)));
        assert!(FieldType::List.accepts(&json!([1, 2])));
        assert!(FieldType::Map.accepts(&json!({"k": 1})));
        // Json accepts anything
        assert!(FieldType::Json.accepts(&json!(null)));
        assert!(FieldType::Json.accepts(&json!([{"k": 1}])));
    }

    #[test]
    fn by_assign_flag() {
        let field = FieldDef::new("blob", FieldType::Json).by_assign();
        assert!(field.by_assign);
        assert!(!FieldDef::new("name", FieldType::String).by_assign);
    }

    #[test]
    fn transformer_lookup_absent() {
        let schema = user_schema();
        assert!(schema.transformer_for("name").is_none());
        assert!(schema.field("missing").is_none());
    }
}
