//! Schema-driven JSON encoding and binding.
//!
//! A [`Schema`] lists a record's fields with their on-wire names; a
//! [`Policy`] says how nulls, unknown keys and `is`-prefixed boolean names
//! are treated. Both are passed explicitly to every call:
//!
//! - [`encode`] / [`encode_to_text`] read a [`Record`] through its field
//!   accessor and produce a [`Value`] or canonical JSON text;
//! - [`parse`] / [`bind`] turn JSON text into a [`BoundRecord`].

pub mod bind;
pub mod encode;
pub mod error;
mod path;
pub mod policy;
pub mod record;
pub mod registry;
pub mod schema;
pub mod temporal;

pub use bind::{bind, bind_as, bind_list, bind_text, FromRecord};
pub use encode::{encode, encode_list, encode_list_to_text, encode_to_text};
pub use error::{Error, Result};
pub use policy::{BooleanNameResolution, Policy, UnknownFieldAction};
pub use record::{BoundField, BoundRecord, FieldRef, Record, Scalar};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use schema::{FieldKind, FieldSpec, KindCategory, ScalarType, Schema};

pub use json_bind_value::{parse, render, Map, Number, ParseError, Value};
