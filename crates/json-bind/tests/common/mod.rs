#![allow(dead_code)]

use std::sync::Arc;

use json_bind::{
    BooleanNameResolution, BoundRecord, FieldRef, FieldSpec, FromRecord, Policy, Record, Result,
    Scalar, ScalarType, Schema, UnknownFieldAction,
};

pub const STANDARD_BOOK_JSON: &str =
    r#"{"name":"nothing","type":"CULTURE","price":20.5,"hot":true,"optional":null,"popular":true}"#;

pub const BOOK_JSON_WITH_EXTRA_FIELD: &str = r#"{"name":"nothing","type":"CULTURE","price":20.5,"hot":true,"optional":null,"popular":true,"extra":"extra"}"#;

/// The extra-field document for books that predate `popular`.
pub const PLAIN_BOOK_JSON_WITH_EXTRA_FIELD: &str = r#"{"name":"nothing","type":"CULTURE","price":20.5,"hot":true,"optional":null,"extra":"extra"}"#;

pub fn policy(
    emit_nulls: bool,
    unknown_fields: UnknownFieldAction,
    boolean_names: BooleanNameResolution,
) -> Policy {
    Policy::new(emit_nulls, unknown_fields, boolean_names)
}

pub fn lenient() -> Policy {
    policy(
        false,
        UnknownFieldAction::Ignore,
        BooleanNameResolution::ExactOnly,
    )
}

pub fn strict() -> Policy {
    lenient().with_unknown_fields(UnknownFieldAction::Error)
}

pub fn book_schema() -> Arc<Schema> {
    Schema::register(
        "Book",
        vec![
            FieldSpec::required("name", ScalarType::String),
            FieldSpec::required(
                "type",
                ScalarType::enumeration(BookType::ALL.iter().map(|t| t.as_str())),
            ),
            FieldSpec::required("price", ScalarType::Float),
            FieldSpec::required("hot", ScalarType::Bool).with_bool_alias("isHot"),
            FieldSpec::optional("optional", ScalarType::String),
            FieldSpec::required("popular", ScalarType::Bool).with_bool_alias("isPopular"),
        ],
    )
    .unwrap()
}

/// [`book_schema`] without the `popular` field.
pub fn plain_book_schema() -> Arc<Schema> {
    let fields = book_schema()
        .fields()
        .iter()
        .filter(|spec| spec.json_name != "popular")
        .cloned()
        .collect();
    Schema::register("PlainBook", fields).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookType {
    Culture,
    Science,
}

impl BookType {
    pub const ALL: [BookType; 2] = [BookType::Culture, BookType::Science];

    pub fn as_str(self) -> &'static str {
        match self {
            BookType::Culture => "CULTURE",
            BookType::Science => "SCIENCE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub name: String,
    pub book_type: BookType,
    pub price: f64,
    pub hot: bool,
    pub optional: Option<String>,
    pub popular: bool,
}

impl Book {
    pub fn nothing() -> Self {
        Self {
            name: "nothing".to_owned(),
            book_type: BookType::Culture,
            price: 20.5,
            hot: true,
            optional: None,
            popular: true,
        }
    }
}

impl Record for Book {
    fn field(&self, json_name: &str) -> FieldRef<'_> {
        match json_name {
            "name" => FieldRef::scalar(self.name.as_str()),
            "type" => FieldRef::Scalar(Scalar::enumeration(self.book_type.as_str())),
            "price" => FieldRef::scalar(self.price),
            "hot" => FieldRef::scalar(self.hot),
            "optional" => FieldRef::optional(self.optional.as_deref()),
            "popular" => FieldRef::scalar(self.popular),
            _ => FieldRef::Null,
        }
    }
}

impl FromRecord for Book {
    fn from_record(record: BoundRecord) -> Result<Self> {
        let type_name = record.get_str("type")?;
        let book_type = BookType::from_name(type_name).ok_or_else(|| json_bind::Error::TypeMismatch {
            path: "type".to_owned(),
            expected: "book type".to_owned(),
            found: "string",
        })?;
        Ok(Self {
            name: record.get_str("name")?.to_owned(),
            book_type,
            price: record.get_f64("price")?,
            hot: record.get_bool("hot")?,
            optional: if record.is_null("optional") {
                None
            } else {
                Some(record.get_str("optional")?.to_owned())
            },
            popular: record.get_bool("popular")?,
        })
    }
}
