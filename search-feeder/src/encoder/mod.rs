//! Value encoder: store-specific scalars to portable JSON.
//!
//! Applied recursively over the full document tree before extraction. The
//! encoder has no knowledge of the field mapping; it only guarantees that
//! the output is a pure data tree (strings, numbers, booleans, null, arrays,
//! objects) with no store-specific types remaining.
//!
//! Encodings:
//!
//! - native datetimes become ISO-8601 strings with microsecond precision and
//!   the process-local offset (`YYYY-MM-DDTHH:MM:SS.ffffff±HHMM`) — BSON
//!   datetimes are UTC instants and carry no offset of their own
//! - object ids become their 24-character lowercase hex form
//! - UUID binaries become their 32-character lowercase hex form (no dashes)
//! - everything else either passes through or fails with [`EncodeError`]

use bson::spec::BinarySubtype;
use bson::{Bson, Document};
use chrono::Local;
use serde_json::{Map, Number, Value};

use crate::errors::EncodeError;

/// Encode a raw document into a normalized JSON document.
pub fn encode_document(document: &Document) -> Result<Value, EncodeError> {
    encode_tree(document, "")
}

fn encode_tree(document: &Document, path: &str) -> Result<Value, EncodeError> {
    let mut fields = Map::with_capacity(document.len());
    for (key, value) in document {
        let child_path = join_path(path, key);
        fields.insert(key.clone(), encode_value(value, &child_path)?);
    }
    Ok(Value::Object(fields))
}

fn encode_value(value: &Bson, path: &str) -> Result<Value, EncodeError> {
    match value {
        Bson::String(text) => Ok(Value::String(text.clone())),
        Bson::Boolean(flag) => Ok(Value::Bool(*flag)),
        Bson::Null => Ok(Value::Null),
        Bson::Int32(number) => Ok(Value::Number((*number).into())),
        Bson::Int64(number) => Ok(Value::Number((*number).into())),
        Bson::Double(number) => Number::from_f64(*number)
            .map(Value::Number)
            .ok_or_else(|| EncodeError::non_finite(path)),
        Bson::Array(items) => {
            let mut encoded = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, index);
                encoded.push(encode_value(item, &item_path)?);
            }
            Ok(Value::Array(encoded))
        }
        Bson::Document(document) => encode_tree(document, path),
        Bson::DateTime(instant) => Ok(Value::String(encode_datetime(*instant))),
        Bson::ObjectId(id) => Ok(Value::String(id.to_hex())),
        Bson::Binary(binary) => match binary.subtype {
            BinarySubtype::Uuid | BinarySubtype::UuidOld => {
                let id = uuid::Uuid::from_slice(&binary.bytes)
                    .map_err(|_| EncodeError::unsupported("Binary", path))?;
                Ok(Value::String(id.simple().to_string()))
            }
            _ => Err(EncodeError::unsupported("Binary", path)),
        },
        other => Err(EncodeError::unsupported(bson_type_name(other), path)),
    }
}

fn encode_datetime(instant: bson::DateTime) -> String {
    instant
        .to_chrono()
        .with_timezone(&Local)
        .format("%Y-%m-%dT%H:%M:%S%.6f%z")
        .to_string()
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn bson_type_name(value: &Bson) -> &'static str {
    match value {
        Bson::Decimal128(_) => "Decimal128",
        Bson::Timestamp(_) => "Timestamp",
        Bson::RegularExpression(_) => "RegularExpression",
        Bson::JavaScriptCode(_) => "JavaScriptCode",
        Bson::JavaScriptCodeWithScope(_) => "JavaScriptCodeWithScope",
        Bson::Symbol(_) => "Symbol",
        Bson::DbPointer(_) => "DbPointer",
        Bson::Undefined => "Undefined",
        Bson::MinKey => "MinKey",
        Bson::MaxKey => "MaxKey",
        _ => "Binary",
    }
}
