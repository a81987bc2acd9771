//! Encoder: [`Record`] + [`Schema`] + [`Policy`] → [`Value`].
//!
//! Fields are visited in schema order and emitted under their `json_name`;
//! boolean aliases only matter when binding. The only failure is a record
//! whose accessor returns a shape the schema does not declare.

use json_bind_value::{render, Map, Value};

use crate::error::{Error, Result};
use crate::path::Path;
use crate::policy::Policy;
use crate::record::{FieldRef, Record, Scalar};
use crate::schema::{FieldKind, ScalarType, Schema};
use crate::temporal;

/// Encode one record as a JSON object.
pub fn encode(record: &dyn Record, schema: &Schema, policy: &Policy) -> Result<Value> {
    encode_record(record, schema, policy, &Path::Root).map(Value::Object)
}

/// [`encode`], then render as canonical JSON text.
pub fn encode_to_text(record: &dyn Record, schema: &Schema, policy: &Policy) -> Result<String> {
    encode(record, schema, policy).map(|value| render(&value))
}

/// Encode a slice of records as a top-level JSON array.
pub fn encode_list<R: Record>(records: &[R], schema: &Schema, policy: &Policy) -> Result<Value> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            encode_record(record, schema, policy, &Path::Index(&Path::Root, i)).map(Value::Object)
        })
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

pub fn encode_list_to_text<R: Record>(
    records: &[R],
    schema: &Schema,
    policy: &Policy,
) -> Result<String> {
    encode_list(records, schema, policy).map(|value| render(&value))
}

fn encode_record(
    record: &dyn Record,
    schema: &Schema,
    policy: &Policy,
    path: &Path<'_>,
) -> Result<Map> {
    let mut members = Map::with_capacity(schema.fields().len());
    for spec in schema.fields() {
        let field = record.field(&spec.json_name);
        if field.is_null() {
            if policy.emit_nulls {
                members.insert(spec.json_name.clone(), Value::Null);
            }
            continue;
        }
        let value = encode_field(field, &spec.kind, policy, &Path::Field(path, &spec.json_name))?;
        members.insert(spec.json_name.clone(), value);
    }
    Ok(members)
}

fn encode_field(
    field: FieldRef<'_>,
    kind: &FieldKind,
    policy: &Policy,
    path: &Path<'_>,
) -> Result<Value> {
    match (kind, field) {
        // Only reachable for collection elements; null members are handled
        // by the caller.
        (_, FieldRef::Null) => Ok(Value::Null),
        (FieldKind::Scalar(ty), FieldRef::Scalar(scalar)) => encode_scalar(scalar, ty, path),
        (FieldKind::Nested(schema), FieldRef::Nested(record)) => {
            encode_record(record, schema, policy, path).map(Value::Object)
        }
        (FieldKind::Collection(element), FieldRef::Collection(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| encode_field(item, element, policy, &Path::Index(path, i)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        (kind, field) => Err(unsupported(
            path,
            format!(
                "declared {}, record supplied {}",
                kind.describe(),
                field.shape_name()
            ),
        )),
    }
}

fn encode_scalar(scalar: Scalar, ty: &ScalarType, path: &Path<'_>) -> Result<Value> {
    match (ty, scalar) {
        (ScalarType::Bool, Scalar::Bool(b)) => Ok(Value::Bool(b)),
        (ScalarType::Integer, Scalar::Integer(n)) => Ok(Value::integer(n)),
        (ScalarType::Float, Scalar::Float(f)) => {
            Value::float(f).ok_or_else(|| unsupported(path, format!("non-finite float {f}")))
        }
        (ScalarType::String, Scalar::String(s)) => Ok(Value::String(s)),
        (ScalarType::Enum(variants), Scalar::Enum(variant)) => {
            if variants.contains(&variant) {
                Ok(Value::String(variant))
            } else {
                Err(unsupported(
                    path,
                    format!("`{variant}` is not {}", ty.describe()),
                ))
            }
        }
        (ScalarType::Instant, Scalar::Instant(instant)) => {
            Ok(Value::integer(temporal::instant_to_millis(&instant)))
        }
        (ScalarType::Date, Scalar::Date(date)) => temporal::format_date(&date)
            .map(Value::String)
            .ok_or_else(|| unsupported(path, format!("year of {date} has no four-digit form"))),
        (ScalarType::LocalDateTime, Scalar::LocalDateTime(date_time)) => {
            temporal::format_local_date_time(&date_time)
                .map(Value::String)
                .ok_or_else(|| {
                    unsupported(path, format!("year of {date_time} has no four-digit form"))
                })
        }
        (ScalarType::LocalTime, Scalar::LocalTime(time)) => {
            Ok(Value::String(temporal::format_local_time(&time)))
        }
        (ty, scalar) => Err(unsupported(
            path,
            format!(
                "declared {}, record supplied {}",
                ty.describe(),
                scalar.type_name()
            ),
        )),
    }
}

fn unsupported(path: &Path<'_>, reason: String) -> Error {
    Error::UnsupportedFieldKind {
        field: path.describe(),
        reason,
    }
}
