//! Record schemas: the ordered list of fields a record exposes on the wire.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::policy::BooleanNameResolution;

/// Declared type of a scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    Integer,
    /// Accepts integer or fractional JSON numbers.
    Float,
    String,
    /// A string restricted to the listed variant names.
    Enum(Vec<String>),
    /// Absolute instant, on the wire as epoch milliseconds.
    Instant,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Local date-time, `YYYY-MM-DDTHH:mm:ss.nnn`.
    LocalDateTime,
    /// Local time, `HH:mm:ss.nnn`.
    LocalTime,
}

impl ScalarType {
    /// Build an `Enum` type from its variant names.
    pub fn enumeration<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(variants.into_iter().map(Into::into).collect())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Enum(_) => "enum",
            Self::Instant => "instant",
            Self::Date => "date",
            Self::LocalDateTime => "local_date_time",
            Self::LocalTime => "local_time",
        }
    }

    /// What a decoder expects on the wire for this type.
    pub fn describe(&self) -> String {
        match self {
            Self::Bool => "boolean".to_owned(),
            Self::Integer => "integer".to_owned(),
            Self::Float => "number".to_owned(),
            Self::String => "string".to_owned(),
            Self::Enum(variants) => format!("one of [{}]", variants.join(", ")),
            Self::Instant => "epoch milliseconds".to_owned(),
            Self::Date => "date (YYYY-MM-DD)".to_owned(),
            Self::LocalDateTime => "local date-time (YYYY-MM-DDTHH:mm:ss.nnn)".to_owned(),
            Self::LocalTime => "local time (HH:mm:ss.nnn)".to_owned(),
        }
    }
}

/// The three-way classification of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindCategory {
    Scalar,
    Nested,
    Collection,
}

/// Declared kind of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarType),
    /// A nested record described by an already registered schema.
    Nested(Arc<Schema>),
    /// An ordered list whose elements share one kind.
    Collection(Box<FieldKind>),
}

impl FieldKind {
    pub fn scalar(ty: ScalarType) -> Self {
        Self::Scalar(ty)
    }

    pub fn nested(schema: &Arc<Schema>) -> Self {
        Self::Nested(Arc::clone(schema))
    }

    pub fn list(element: FieldKind) -> Self {
        Self::Collection(Box::new(element))
    }

    pub fn category(&self) -> KindCategory {
        match self {
            Self::Scalar(_) => KindCategory::Scalar,
            Self::Nested(_) => KindCategory::Nested,
            Self::Collection(_) => KindCategory::Collection,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(ty) => ty.describe(),
            Self::Nested(schema) => format!("object `{}`", schema.record_type()),
            Self::Collection(element) => format!("array of {}", element.describe()),
        }
    }
}

impl From<ScalarType> for FieldKind {
    fn from(ty: ScalarType) -> Self {
        Self::Scalar(ty)
    }
}

/// One record field: its wire name, optional boolean alias, kind and
/// nullability.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub json_name: String,
    /// Alternative wire name for boolean fields (`isHot` for `hot`),
    /// consulted only while binding.
    pub bool_alias: Option<String>,
    pub kind: FieldKind,
    pub nullable: bool,
}

impl FieldSpec {
    /// A non-nullable field; binding fails if it cannot be resolved.
    pub fn required(json_name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            json_name: json_name.into(),
            bool_alias: None,
            kind: kind.into(),
            nullable: false,
        }
    }

    /// A nullable field; unresolved or `null` binds to `BoundField::Null`.
    pub fn optional(json_name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            nullable: true,
            ..Self::required(json_name, kind)
        }
    }

    pub fn with_bool_alias(mut self, alias: impl Into<String>) -> Self {
        self.bool_alias = Some(alias.into());
        self
    }
}

/// Ordered field list for one record type. Immutable once registered.
#[derive(Debug, PartialEq)]
pub struct Schema {
    record_type: String,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Validate and freeze a schema.
    ///
    /// Every `json_name` and `bool_alias` must be distinct within the
    /// schema, otherwise [`Error::DuplicateFieldName`] names the first clash.
    pub fn register(record_type: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Arc<Self>> {
        let record_type = record_type.into();
        let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());
        for field in &fields {
            let names = std::iter::once(&field.json_name).chain(field.bool_alias.as_ref());
            for name in names {
                if !seen.insert(name.as_str()) {
                    return Err(Error::DuplicateFieldName {
                        record_type,
                        name: name.clone(),
                    });
                }
            }
        }
        tracing::debug!(record_type = %record_type, fields = fields.len(), "schema registered");
        Ok(Arc::new(Self {
            record_type,
            fields,
        }))
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, json_name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.json_name == json_name)
    }

    /// Whether an input key is matched by some field, given how boolean
    /// aliases are resolved.
    pub fn claims_key(&self, key: &str, boolean_names: BooleanNameResolution) -> bool {
        self.fields.iter().any(|f| {
            f.json_name == key
                || (boolean_names.uses_alias() && f.bool_alias.as_deref() == Some(key))
        })
    }
}
