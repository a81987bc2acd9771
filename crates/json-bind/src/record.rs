//! Record: the two sides of a bound record.
//!
//! Encoding reads a caller type through the [`Record`] accessor, which hands
//! back borrowed [`FieldRef`]s. Binding produces an owned [`BoundRecord`],
//! which is itself a `Record` so bound values can be encoded again.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A scalar field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Variant name of an enum field.
    Enum(String),
    Instant(DateTime<Utc>),
    Date(NaiveDate),
    LocalDateTime(NaiveDateTime),
    LocalTime(NaiveTime),
}

impl Scalar {
    pub fn enumeration(variant: impl Into<String>) -> Self {
        Self::Enum(variant.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Enum(_) => "enum",
            Self::Instant(_) => "instant",
            Self::Date(_) => "date",
            Self::LocalDateTime(_) => "local date-time",
            Self::LocalTime(_) => "local time",
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant)
    }
}

impl From<NaiveDate> for Scalar {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(date_time: NaiveDateTime) -> Self {
        Self::LocalDateTime(date_time)
    }
}

impl From<NaiveTime> for Scalar {
    fn from(time: NaiveTime) -> Self {
        Self::LocalTime(time)
    }
}

/// A field as seen through a [`Record`] accessor.
pub enum FieldRef<'a> {
    /// Null or absent.
    Null,
    Scalar(Scalar),
    Nested(&'a dyn Record),
    Collection(Vec<FieldRef<'a>>),
}

impl<'a> FieldRef<'a> {
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Self::Scalar(value.into())
    }

    /// `Null` for `None`.
    pub fn optional<T: Into<Scalar>>(value: Option<T>) -> Self {
        value.map_or(Self::Null, |v| Self::Scalar(v.into()))
    }

    pub fn nested(record: &'a dyn Record) -> Self {
        Self::Nested(record)
    }

    pub fn collection<I>(items: I) -> Self
    where
        I: IntoIterator<Item = FieldRef<'a>>,
    {
        Self::Collection(items.into_iter().collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short description of the shape, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(scalar) => scalar.type_name(),
            Self::Nested(_) => "nested record",
            Self::Collection(_) => "collection",
        }
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            Self::Nested(_) => f.write_str("Nested(..)"),
            Self::Collection(items) => f.debug_tuple("Collection").field(items).finish(),
        }
    }
}

/// Field accessor injected by the caller.
///
/// The encoder asks for each schema field by its `json_name`; names the
/// record does not know should come back as [`FieldRef::Null`].
pub trait Record {
    fn field(&self, json_name: &str) -> FieldRef<'_>;
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, json_name: &str) -> FieldRef<'_> {
        (**self).field(json_name)
    }
}

/// One bound field value.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundField {
    Null,
    Scalar(Scalar),
    Record(BoundRecord),
    List(Vec<BoundField>),
}

impl BoundField {
    pub fn as_field_ref(&self) -> FieldRef<'_> {
        match self {
            Self::Null => FieldRef::Null,
            Self::Scalar(scalar) => FieldRef::Scalar(scalar.clone()),
            Self::Record(record) => FieldRef::Nested(record),
            Self::List(items) => FieldRef::collection(items.iter().map(Self::as_field_ref)),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(scalar) => scalar.type_name(),
            Self::Record(_) => "record",
            Self::List(_) => "list",
        }
    }
}

impl From<Scalar> for BoundField {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<BoundRecord> for BoundField {
    fn from(record: BoundRecord) -> Self {
        Self::Record(record)
    }
}

/// A record produced by binding: every schema field, in schema order, with
/// unresolved nullable fields present as [`BoundField::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoundRecord {
    record_type: String,
    fields: IndexMap<String, BoundField>,
}

impl BoundRecord {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, json_name: impl Into<String>, value: impl Into<BoundField>) -> Self {
        self.insert(json_name, value);
        self
    }

    pub fn insert(&mut self, json_name: impl Into<String>, value: impl Into<BoundField>) {
        self.fields.insert(json_name.into(), value.into());
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &BoundField)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, json_name: &str) -> Option<&BoundField> {
        self.fields.get(json_name)
    }

    /// True when the field is absent or bound to null.
    pub fn is_null(&self, json_name: &str) -> bool {
        matches!(self.get(json_name), None | Some(BoundField::Null))
    }

    /// The field's value, failing with `MissingRequiredField` when it is
    /// absent or null.
    pub fn require(&self, json_name: &str) -> Result<&BoundField> {
        match self.get(json_name) {
            None | Some(BoundField::Null) => Err(Error::MissingRequiredField {
                field_name: json_name.to_owned(),
            }),
            Some(field) => Ok(field),
        }
    }

    pub fn get_scalar(&self, json_name: &str) -> Result<&Scalar> {
        match self.require(json_name)? {
            BoundField::Scalar(scalar) => Ok(scalar),
            other => Err(mismatch(json_name, "scalar", other)),
        }
    }

    pub fn get_bool(&self, json_name: &str) -> Result<bool> {
        match self.require(json_name)? {
            BoundField::Scalar(Scalar::Bool(b)) => Ok(*b),
            other => Err(mismatch(json_name, "boolean", other)),
        }
    }

    pub fn get_i64(&self, json_name: &str) -> Result<i64> {
        match self.require(json_name)? {
            BoundField::Scalar(Scalar::Integer(n)) => Ok(*n),
            other => Err(mismatch(json_name, "integer", other)),
        }
    }

    /// Float fields, and integer fields widened to `f64`.
    pub fn get_f64(&self, json_name: &str) -> Result<f64> {
        match self.require(json_name)? {
            BoundField::Scalar(Scalar::Float(f)) => Ok(*f),
            BoundField::Scalar(Scalar::Integer(n)) => Ok(*n as f64),
            other => Err(mismatch(json_name, "number", other)),
        }
    }

    /// String fields and enum variant names.
    pub fn get_str(&self, json_name: &str) -> Result<&str> {
        match self.require(json_name)? {
            BoundField::Scalar(Scalar::String(s) | Scalar::Enum(s)) => Ok(s),
            other => Err(mismatch(json_name, "string", other)),
        }
    }

    pub fn get_record(&self, json_name: &str) -> Result<&BoundRecord> {
        match self.require(json_name)? {
            BoundField::Record(record) => Ok(record),
            other => Err(mismatch(json_name, "record", other)),
        }
    }

    pub fn get_list(&self, json_name: &str) -> Result<&[BoundField]> {
        match self.require(json_name)? {
            BoundField::List(items) => Ok(items),
            other => Err(mismatch(json_name, "list", other)),
        }
    }
}

fn mismatch(json_name: &str, expected: &str, found: &BoundField) -> Error {
    Error::TypeMismatch {
        path: json_name.to_owned(),
        expected: expected.to_owned(),
        found: found.kind_name(),
    }
}

impl Record for BoundRecord {
    fn field(&self, json_name: &str) -> FieldRef<'_> {
        self.get(json_name)
            .map_or(FieldRef::Null, BoundField::as_field_ref)
    }
}
