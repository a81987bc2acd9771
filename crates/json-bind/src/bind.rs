//! Binder: [`Value`] + [`Schema`] + [`Policy`] → [`BoundRecord`].
//!
//! The input tree is only read. Unknown keys are checked before any field
//! is resolved, so under `UnknownFieldAction::Error` an unexpected key is
//! reported even when a required field is also missing.

use json_bind_value::{parse, Number, Value};

use crate::error::{Error, Result};
use crate::path::Path;
use crate::policy::{Policy, UnknownFieldAction};
use crate::record::{BoundField, BoundRecord, Scalar};
use crate::schema::{FieldKind, ScalarType, Schema};
use crate::temporal;

/// Conversion from a bound record into an application type.
///
/// ```
/// use json_bind::{BoundRecord, FromRecord, Result};
///
/// struct Author {
///     name: String,
/// }
///
/// impl FromRecord for Author {
///     fn from_record(record: BoundRecord) -> Result<Self> {
///         Ok(Self {
///             name: record.get_str("name")?.to_owned(),
///         })
///     }
/// }
/// ```
pub trait FromRecord: Sized {
    fn from_record(record: BoundRecord) -> Result<Self>;
}

impl FromRecord for BoundRecord {
    fn from_record(record: BoundRecord) -> Result<Self> {
        Ok(record)
    }
}

/// Bind a JSON object to `schema`.
pub fn bind(value: &Value, schema: &Schema, policy: &Policy) -> Result<BoundRecord> {
    bind_record(value, schema, policy, &Path::Root)
}

/// [`parse`] then [`bind`].
pub fn bind_text(text: &str, schema: &Schema, policy: &Policy) -> Result<BoundRecord> {
    let value = parse(text)?;
    bind(&value, schema, policy)
}

/// Bind every element of a top-level JSON array to `schema`.
pub fn bind_list(value: &Value, schema: &Schema, policy: &Policy) -> Result<Vec<BoundRecord>> {
    let items = value.as_array().ok_or_else(|| {
        mismatch(
            &Path::Root,
            format!("array of object `{}`", schema.record_type()),
            value,
        )
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| bind_record(item, schema, policy, &Path::Index(&Path::Root, i)))
        .collect()
}

/// [`bind`], then convert with [`FromRecord`].
pub fn bind_as<T: FromRecord>(value: &Value, schema: &Schema, policy: &Policy) -> Result<T> {
    bind(value, schema, policy).and_then(T::from_record)
}

fn bind_record(
    value: &Value,
    schema: &Schema,
    policy: &Policy,
    path: &Path<'_>,
) -> Result<BoundRecord> {
    let members = value.as_object().ok_or_else(|| {
        mismatch(path, format!("object `{}`", schema.record_type()), value)
    })?;

    for key in members.keys() {
        if schema.claims_key(key, policy.boolean_names) {
            continue;
        }
        match policy.unknown_fields {
            UnknownFieldAction::Error => {
                return Err(Error::UnknownField {
                    key: Path::Field(path, key).to_string(),
                });
            }
            UnknownFieldAction::Ignore => {
                tracing::trace!(record_type = schema.record_type(), key = %key, "skipping unknown field");
            }
        }
    }

    let mut record = BoundRecord::new(schema.record_type());
    for spec in schema.fields() {
        let field_path = Path::Field(path, &spec.json_name);
        let found = policy
            .boolean_names
            .candidates(&spec.json_name, spec.bool_alias.as_deref())
            .into_iter()
            .flatten()
            .find_map(|key| members.get(key));
        let bound = match found {
            None | Some(Value::Null) if spec.nullable => BoundField::Null,
            None => {
                return Err(Error::MissingRequiredField {
                    field_name: field_path.to_string(),
                });
            }
            Some(value) => bind_field(value, &spec.kind, policy, &field_path)?,
        };
        record.insert(spec.json_name.clone(), bound);
    }
    Ok(record)
}

fn bind_field(
    value: &Value,
    kind: &FieldKind,
    policy: &Policy,
    path: &Path<'_>,
) -> Result<BoundField> {
    match kind {
        FieldKind::Scalar(ty) => bind_scalar(value, ty, path).map(BoundField::Scalar),
        FieldKind::Nested(schema) => bind_record(value, schema, policy, path).map(BoundField::Record),
        FieldKind::Collection(element) => {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(path, kind.describe(), value))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Null => Ok(BoundField::Null),
                    item => bind_field(item, element, policy, &Path::Index(path, i)),
                })
                .collect::<Result<Vec<_>>>()
                .map(BoundField::List)
        }
    }
}

fn bind_scalar(value: &Value, ty: &ScalarType, path: &Path<'_>) -> Result<Scalar> {
    let expected = || mismatch(path, ty.describe(), value);
    match ty {
        ScalarType::Bool => value.as_bool().map(Scalar::Bool).ok_or_else(expected),
        ScalarType::Integer => value
            .as_number()
            .and_then(integral)
            .map(Scalar::Integer)
            .ok_or_else(expected),
        ScalarType::Float => value
            .as_number()
            .and_then(Number::as_f64)
            .map(Scalar::Float)
            .ok_or_else(expected),
        ScalarType::String => value
            .as_str()
            .map(|s| Scalar::String(s.to_owned()))
            .ok_or_else(expected),
        ScalarType::Enum(variants) => value
            .as_str()
            .filter(|s| variants.iter().any(|v| v.as_str() == *s))
            .map(|s| Scalar::Enum(s.to_owned()))
            .ok_or_else(expected),
        ScalarType::Instant => value
            .as_number()
            .and_then(Number::as_i64)
            .and_then(temporal::instant_from_millis)
            .map(Scalar::Instant)
            .ok_or_else(expected),
        ScalarType::Date => value
            .as_str()
            .and_then(temporal::parse_date)
            .map(Scalar::Date)
            .ok_or_else(expected),
        ScalarType::LocalDateTime => value
            .as_str()
            .and_then(temporal::parse_local_date_time)
            .map(Scalar::LocalDateTime)
            .ok_or_else(expected),
        ScalarType::LocalTime => value
            .as_str()
            .and_then(temporal::parse_local_time)
            .map(Scalar::LocalTime)
            .ok_or_else(expected),
    }
}

/// Integers, and doubles with no fractional part that fit in `i64`.
fn integral(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn mismatch(path: &Path<'_>, expected: String, found: &Value) -> Error {
    Error::TypeMismatch {
        path: path.describe(),
        expected,
        found: found.kind_name(),
    }
}
