//! Book documents: unknown keys, `is`-prefixed booleans, null emission and
//! top-level lists.

mod common;

use common::{
    book_schema, lenient, plain_book_schema, policy, strict, Book, BookType,
    BOOK_JSON_WITH_EXTRA_FIELD, PLAIN_BOOK_JSON_WITH_EXTRA_FIELD, STANDARD_BOOK_JSON,
};
use json_bind::{
    bind, bind_as, bind_list, bind_text, encode, encode_list_to_text, encode_to_text, parse,
    BooleanNameResolution, BoundField, Error, FromRecord, Scalar, UnknownFieldAction, Value,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// binding
// ---------------------------------------------------------------------------

#[test]
fn standard_book_binds_every_field() {
    let record = bind_text(STANDARD_BOOK_JSON, &book_schema(), &strict()).unwrap();
    assert_eq!(record.record_type(), "Book");
    assert_eq!(record.get_str("name").unwrap(), "nothing");
    assert_eq!(
        record.get_scalar("type").unwrap(),
        &Scalar::enumeration("CULTURE")
    );
    assert_eq!(record.get_f64("price").unwrap(), 20.5);
    assert!(record.get_bool("hot").unwrap());
    assert!(record.get_bool("popular").unwrap());
    assert_eq!(record.get("optional"), Some(&BoundField::Null));
}

#[test]
fn bound_fields_follow_schema_order() {
    let record = bind_text(STANDARD_BOOK_JSON, &book_schema(), &strict()).unwrap();
    let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
    assert_eq!(names, ["name", "type", "price", "hot", "optional", "popular"]);
}

#[test]
fn bind_as_converts_into_application_type() {
    let value = parse(STANDARD_BOOK_JSON).unwrap();
    let book: Book = bind_as(&value, &book_schema(), &strict()).unwrap();
    assert_eq!(book, Book::nothing());
}

#[test]
fn bind_as_propagates_binding_errors() {
    let value = parse(r#"{"name":"nothing"}"#).unwrap();
    let err = bind_as::<Book>(&value, &book_schema(), &lenient()).unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField { .. }));
}

// ---------------------------------------------------------------------------
// unknown fields
// ---------------------------------------------------------------------------

#[test]
fn extra_field_is_ignored_when_policy_ignores() {
    let record = bind_text(BOOK_JSON_WITH_EXTRA_FIELD, &book_schema(), &lenient()).unwrap();
    assert!(record.get("extra").is_none());
    let expected = bind_text(STANDARD_BOOK_JSON, &book_schema(), &lenient()).unwrap();
    assert_eq!(record, expected);
}

#[test]
fn extra_field_is_rejected_when_policy_errors() {
    let err = bind_text(BOOK_JSON_WITH_EXTRA_FIELD, &book_schema(), &strict()).unwrap_err();
    assert_eq!(
        err,
        Error::UnknownField {
            key: "extra".into()
        }
    );
}

#[test]
fn plain_book_with_extra_field_follows_policy() {
    let schema = plain_book_schema();
    let record = bind_text(PLAIN_BOOK_JSON_WITH_EXTRA_FIELD, &schema, &lenient()).unwrap();
    assert_eq!(record.record_type(), "PlainBook");
    assert_eq!(record.get_str("name").unwrap(), "nothing");
    assert_eq!(record.get_f64("price").unwrap(), 20.5);
    assert!(record.get_bool("hot").unwrap());
    assert_eq!(record.get("optional"), Some(&BoundField::Null));
    assert!(record.get("extra").is_none());
    assert_eq!(record.len(), 5);

    let err = bind_text(PLAIN_BOOK_JSON_WITH_EXTRA_FIELD, &schema, &strict()).unwrap_err();
    assert_eq!(
        err,
        Error::UnknownField {
            key: "extra".into()
        }
    );
}

#[test]
fn alias_key_is_unknown_under_exact_only() {
    let text = r#"{"name":"n","type":"CULTURE","price":1,"hot":true,"isHot":false,"popular":true}"#;
    let err = bind_text(text, &book_schema(), &strict()).unwrap_err();
    assert_eq!(
        err,
        Error::UnknownField {
            key: "isHot".into()
        }
    );
    let relaxed = strict().with_boolean_names(BooleanNameResolution::PreferBareThenIs);
    assert!(bind_text(text, &book_schema(), &relaxed).is_ok());
}

// ---------------------------------------------------------------------------
// boolean name resolution
// ---------------------------------------------------------------------------

fn bind_hot(members: serde_json::Value, mode: BooleanNameResolution) -> json_bind::Result<bool> {
    let mut doc = json!({
        "name": "nothing",
        "type": "CULTURE",
        "price": 20.5,
        "popular": true,
    });
    if let (Some(doc), Some(members)) = (doc.as_object_mut(), members.as_object()) {
        doc.extend(members.clone());
    }
    let p = policy(false, UnknownFieldAction::Ignore, mode);
    bind(&Value::from(doc), &book_schema(), &p)?.get_bool("hot")
}

#[test]
fn exact_only_reads_bare_name() {
    let mode = BooleanNameResolution::ExactOnly;
    assert!(bind_hot(json!({"hot": true}), mode).unwrap());
    assert!(bind_hot(json!({"hot": true, "isHot": false}), mode).unwrap());
    assert_eq!(
        bind_hot(json!({"isHot": true}), mode).unwrap_err(),
        Error::MissingRequiredField {
            field_name: "hot".into()
        }
    );
}

#[test]
fn prefer_bare_then_is() {
    let mode = BooleanNameResolution::PreferBareThenIs;
    assert!(bind_hot(json!({"hot": true, "isHot": false}), mode).unwrap());
    assert!(!bind_hot(json!({"isHot": false}), mode).unwrap());
    assert!(bind_hot(json!({"hot": true}), mode).unwrap());
}

#[test]
fn prefer_is_then_bare() {
    let mode = BooleanNameResolution::PreferIsThenBare;
    assert!(!bind_hot(json!({"hot": true, "isHot": false}), mode).unwrap());
    assert!(bind_hot(json!({"isHot": true}), mode).unwrap());
    assert!(bind_hot(json!({"hot": true}), mode).unwrap());
}

#[test]
fn alias_resolution_does_not_depend_on_key_order() {
    let mode = BooleanNameResolution::PreferIsThenBare;
    let a = bind_hot(json!({"isHot": false, "hot": true}), mode).unwrap();
    let b = bind_hot(json!({"hot": true, "isHot": false}), mode).unwrap();
    assert_eq!(a, b);
}

#[test]
fn alias_bound_under_declared_name() {
    let p = policy(
        false,
        UnknownFieldAction::Error,
        BooleanNameResolution::PreferIsThenBare,
    );
    let text = r#"{"name":"n","type":"SCIENCE","price":3,"isHot":true,"isPopular":false}"#;
    let record = bind_text(text, &book_schema(), &p).unwrap();
    assert!(record.get("isHot").is_none());
    assert!(record.get_bool("hot").unwrap());
    assert!(!record.get_bool("popular").unwrap());
    assert_eq!(record.get_str("type").unwrap(), BookType::Science.as_str());
}

// ---------------------------------------------------------------------------
// encoding
// ---------------------------------------------------------------------------

#[test]
fn null_fields_are_omitted_when_disabled() {
    let text = encode_to_text(&Book::nothing(), &book_schema(), &lenient()).unwrap();
    assert_eq!(
        text,
        r#"{"name":"nothing","type":"CULTURE","price":20.5,"hot":true,"popular":true}"#
    );
}

#[test]
fn null_fields_are_emitted_when_enabled() {
    let text = encode_to_text(
        &Book::nothing(),
        &book_schema(),
        &lenient().with_emit_nulls(true),
    )
    .unwrap();
    assert_eq!(text, STANDARD_BOOK_JSON);
}

#[test]
fn encoded_value_matches_serde_json_tree() {
    let value = encode(&Book::nothing(), &book_schema(), &lenient()).unwrap();
    assert_eq!(
        serde_json::Value::from(value),
        json!({"name": "nothing", "type": "CULTURE", "price": 20.5, "hot": true, "popular": true})
    );
}

#[test]
fn integral_price_round_trips_as_float() {
    let book = Book {
        price: 3.0,
        ..Book::nothing()
    };
    let text = encode_to_text(&book, &book_schema(), &lenient()).unwrap();
    assert!(text.contains(r#""price":3,"#), "{text}");
    let record = bind_text(&text, &book_schema(), &lenient()).unwrap();
    assert_eq!(record.get_scalar("price").unwrap(), &Scalar::Float(3.0));
    assert_eq!(bind_as::<Book>(&parse(&text).unwrap(), &book_schema(), &lenient()).unwrap(), book);
}

#[test]
fn integer_scalar_is_not_encoded_into_float_field() {
    let record = bind_text(STANDARD_BOOK_JSON, &book_schema(), &lenient())
        .unwrap()
        .with("price", Scalar::Integer(3));
    let err = encode(&record, &book_schema(), &lenient()).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedFieldKind {
            field: "price".into(),
            reason: "declared number, record supplied integer".into()
        }
    );
}

#[test]
fn boolean_policy_never_renames_output() {
    for mode in [
        BooleanNameResolution::ExactOnly,
        BooleanNameResolution::PreferBareThenIs,
        BooleanNameResolution::PreferIsThenBare,
    ] {
        let p = policy(true, UnknownFieldAction::Ignore, mode);
        let text = encode_to_text(&Book::nothing(), &book_schema(), &p).unwrap();
        assert_eq!(text, STANDARD_BOOK_JSON, "{mode:?}");
    }
}

#[test]
fn non_ascii_names_are_escaped() {
    let mut book = Book::nothing();
    book.name = "张三".to_owned();
    let text = encode_to_text(&book, &book_schema(), &lenient()).unwrap();
    assert!(text.starts_with(r#"{"name":"\u5f20\u4e09","#));
    let back = bind_text(&text, &book_schema(), &lenient()).unwrap();
    assert_eq!(back.get_str("name").unwrap(), "张三");
}

#[test]
fn encoding_is_deterministic() {
    let schema = book_schema();
    let p = lenient().with_emit_nulls(true);
    let first = encode_to_text(&Book::nothing(), &schema, &p).unwrap();
    for _ in 0..8 {
        assert_eq!(encode_to_text(&Book::nothing(), &schema, &p).unwrap(), first);
    }
}

// ---------------------------------------------------------------------------
// lists
// ---------------------------------------------------------------------------

#[test]
fn standard_list_binds_each_book() {
    let text = format!("[{STANDARD_BOOK_JSON}]");
    let records = bind_list(&parse(&text).unwrap(), &book_schema(), &strict()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get_str("name").unwrap(), "nothing");
}

#[test]
fn list_encodes_and_binds_back() {
    let mut second = Book::nothing();
    second.name = "second".to_owned();
    second.optional = Some("note".to_owned());
    let books = [Book::nothing(), second.clone()];
    let text = encode_list_to_text(&books, &book_schema(), &lenient()).unwrap();
    let records = bind_list(&parse(&text).unwrap(), &book_schema(), &strict()).unwrap();
    let back: Vec<Book> = records
        .into_iter()
        .map(<Book as FromRecord>::from_record)
        .collect::<json_bind::Result<_>>()
        .unwrap();
    assert_eq!(back, books);
}

// ---------------------------------------------------------------------------
// malformed input
// ---------------------------------------------------------------------------

#[test]
fn truncated_member_is_malformed() {
    let err = bind_text(r#"{"name":}"#, &book_schema(), &lenient()).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedJson {
            position: 8,
            reason: "expected a value"
        }
    );
}

#[test]
fn wrong_member_types_report_path() {
    let text = r#"{"name":"n","type":"CULTURE","price":"20.5","hot":true,"popular":true}"#;
    let err = bind_text(text, &book_schema(), &lenient()).unwrap_err();
    assert_eq!(
        err,
        Error::TypeMismatch {
            path: "price".into(),
            expected: "number".into(),
            found: "string"
        }
    );
}
