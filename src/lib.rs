//! # bulkrow
//!
//! Bulk-load APIs stream rows through a sequential row/column protocol
//! instead of accepting objects directly. This crate bridges the two: it
//! adapts any in-memory sequence of typed entities, plus an [`EntityMap`]
//! describing how entity properties bind to destination columns, into the
//! forward-only [`RecordRead`] contract — one row per advance, no table
//! materialized in between.
//!
//! ## Reading entities as rows
//! Implement [`Entity`] for the source type (a match on property names,
//! resolved once at reader construction), describe the destination with an
//! [`EntityMap`], and drive the reader:
//!
//! ```
//! use bulkrow::{
//!     Accessor, Entity, EntityMapBuilder, EntityReader, PropertyMap, ReaderResult, RecordRead,
//!     Value, ValueType,
//! };
//!
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//!
//! impl Entity for User {
//!     fn accessor(property: &str) -> Option<Accessor<Self>> {
//!         match property {
//!             "Id" => Some(|u| Value::Int32(u.id)),
//!             "Name" => Some(|u| Value::String(u.name.clone())),
//!             _ => None,
//!         }
//!     }
//!
//!     fn field_type(property: &str) -> Option<ValueType> {
//!         match property {
//!             "Id" => Some(ValueType::Int32),
//!             "Name" => Some(ValueType::String),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! fn copy_users(users: Vec<User>) -> ReaderResult<()> {
//!     // "id" is filled in by the database; the reader never reads it
//!     // from the entity.
//!     let map = EntityMapBuilder::with_table("users")
//!         .add_column(PropertyMap::generated("id", "Id"))
//!         .add_column(PropertyMap::new("name", "Name"))
//!         .build();
//!
//!     let mut reader = EntityReader::new(users, &map);
//!     let name_col = reader.ordinal("name")?;
//!     while reader.advance()? {
//!         let _name: String = reader.get(name_col)?;
//!         // hand the row to the bulk-load mechanism
//!     }
//!     reader.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Column order
//! Column positions are assigned by walking the mapping in reverse
//! declaration order: the last binding is column 0. See
//! [`EntityReader`] for the details; name-based access
//! ([`RecordRead::ordinal`], [`RecordRead::value_by_name`]) is unaffected
//! and ignores ASCII case.
//!
//! ## Serde support
//! With the `serde` feature flag enabled, [`EntityMap`], [`PropertyMap`],
//! [`Value`], and [`Decimal`] implement `Serialize` and `Deserialize`, so
//! mappings can be loaded from configuration.

pub(crate) mod entity;
pub(crate) mod error;
pub(crate) mod map;
pub(crate) mod read;
pub(crate) mod reader;
pub(crate) mod value;

pub use error::ReaderError;
pub use error::Result as ReaderResult;

pub use entity::*;
pub use map::*;
pub use read::*;
pub use reader::*;
pub use value::*;
