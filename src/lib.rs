//! # Modelcast
//!
//! A schema-driven conversion engine between JSON documents and typed,
//! named-field models, plus a keyed, durable cache for converted records.
//!
//! ## Design Principles
//!
//! - **Schema-declared fields**: no runtime reflection; each model type
//!   declares its ordered field list, key renames, and transformers in a
//!   static [`ModelSchema`]
//! - **Two serialization paths**: the JSON codec converts field-by-field
//!   through the schema; the [`RecordCache`] serializes whole models with
//!   bincode and preserves native types the JSON path cannot express
//! - **Deterministic errors**: decode and encode walk fields in declaration
//!   order and abort on the first failure
//!
//! ## Core Concepts
//!
//! ### Models
//!
//! A [`Model`] is a typed record whose fields the codec reads and writes
//! through a JSON-valued channel ([`Model::get`] / [`Model::set`]). Setting
//! [`Document::Null`] clears a field to its zero value — note that a plain
//! decode therefore *erases* fields missing from the input document unless
//! [`DecodeOptions::ignore_nil`] is set.
//!
//! ### Key maps
//!
//! A [`KeyMap`] renames fields in the document representation
//! (`name` ↔ `user_name`) and supports dotted keys (`avatar.url`) that
//! traverse nested objects. The mapping is invertible; two fields claiming
//! one document key fail loudly with [`Error::KeyCollision`].
//!
//! ### Transformers
//!
//! A [`Transformer`] converts a raw document value into a richer native
//! value and (optionally) back. One-way transformers support decode only;
//! encoding a non-nil value through one fails with
//! [`Error::UnsupportedReverseTransform`].
//!
//! ### Record cache
//!
//! [`RecordCache`] persists whole models or ordered model sequences under
//! string keys in a pluggable [`ByteStore`] ([`MemoryStore`] or the atomic
//! file-per-key [`FileStore`]), invoking [`Model::after_load`] on retrieval.
//!
//! ## Quick Start
//!
//! ```rust
//! use modelcast::{
//!     Document, Error, FieldDef, FieldType, Model, ModelSchema, Result,
//! };
//! use serde_json::json;
//! use std::sync::LazyLock;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! static USER_SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
//!     ModelSchema::new()
//!         .with_field(FieldDef::new("name", FieldType::String))
//!         .with_field(FieldDef::new("age", FieldType::Int))
//!         .with_key("name", "user_name")
//! });
//!
//! impl Model for User {
//!     fn schema() -> &'static ModelSchema {
//!         &USER_SCHEMA
//!     }
//!
//!     fn get(&self, field: &str) -> Document {
//!         match field {
//!             "name" => json!(self.name),
//!             "age" => json!(self.age),
//!             _ => Document::Null,
//!         }
//!     }
//!
//!     fn set(&mut self, field: &str, value: Document) -> Result<()> {
//!         match field {
//!             "name" => self.name = value.as_str().unwrap_or_default().to_string(),
//!             "age" => self.age = value.as_i64().unwrap_or_default(),
//!             _ => return Err(Error::UnknownField(field.to_string())),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let doc = json!({"user_name": "amy", "age": 30});
//! let user = User::from_document(&doc).unwrap();
//! assert_eq!(user.name, "amy");
//! assert_eq!(user.age, 30);
//!
//! // Re-encoding restores the document keys
//! let encoded = user.to_document().unwrap();
//! assert_eq!(encoded, doc);
//! ```

pub mod cache;
pub mod codec;
pub mod error;
pub mod keymap;
pub mod model;
pub mod schema;
pub mod transform;

// Re-export main types at crate root
pub use cache::{ByteStore, FileStore, MemoryStore, RecordCache};
pub use codec::DecodeOptions;
pub use error::{Error, Result};
pub use keymap::KeyMap;
pub use model::Model;
pub use schema::{FieldDef, FieldType, ModelSchema};
pub use transform::{TransformFn, Transformer};

/// Type aliases for clarity
pub type Document = serde_json::Value;
pub type FieldName = String;
pub type DocumentKey = String;
